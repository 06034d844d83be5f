use std::sync::Arc;

use axum::{Extension, Json};
use serde_json::{Value, json};

use crate::{error::Error, server::AppState, types::AccountRequest};

use super::require;

pub async fn profile(
    Extension(state): Extension<Arc<AppState>>,
    Json(body): Json<AccountRequest>,
) -> Result<Json<Value>, Error> {
    let spotify_id = require(body.spotify_id, "spotify_id")?;
    let token = state.tokens.ensure_fresh_token(&spotify_id).await?;

    match state.spotify.profile(&token).await {
        Ok(profile) => Ok(Json(json!({ "profile": profile }))),
        Err(Error::Upstream { status: 401, body }) => {
            // Spotify no longer honors the token even though our bookkeeping
            // said it was fine. Drop the local copy so the next call goes
            // straight to a refresh, and surface the failure.
            state.tokens.invalidate_access_token(&spotify_id).await?;
            Err(Error::Upstream { status: 401, body })
        }
        Err(e) => Err(e),
    }
}
