use std::sync::Arc;

use axum::{Extension, Json};
use serde_json::{Value, json};

use crate::{error::Error, server::AppState, types::AccountRequest};

use super::require;

pub async fn access_token(
    Extension(state): Extension<Arc<AppState>>,
    Json(body): Json<AccountRequest>,
) -> Result<Json<Value>, Error> {
    let spotify_id = require(body.spotify_id, "spotify_id")?;
    let access_token = state.tokens.ensure_fresh_token(&spotify_id).await?;
    Ok(Json(json!({ "access_token": access_token })))
}
