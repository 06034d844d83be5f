use std::sync::Arc;

use axum::{Extension, Json};
use serde_json::{Value, json};

use crate::{error::Error, server::AppState, spotify, types::CallbackRequest};

pub async fn authorize_url(Extension(state): Extension<Arc<AppState>>) -> Json<Value> {
    let attempt = state.states.issue();
    Json(json!({ "url": state.auth.authorize_url(&attempt) }))
}

pub async fn callback(
    Extension(state): Extension<Arc<AppState>>,
    Json(body): Json<CallbackRequest>,
) -> Result<Json<Value>, Error> {
    let code = body
        .code
        .filter(|c| !c.is_empty())
        .ok_or_else(|| Error::Validation("no authorization code provided".to_string()))?;
    let returned_state = body
        .state
        .filter(|s| !s.is_empty())
        .ok_or_else(|| Error::Validation("no state value provided".to_string()))?;

    if !state.states.consume(&returned_state) {
        return Err(Error::Validation("unrecognized state value".to_string()));
    }

    let record =
        spotify::complete_authorization(&state.auth, &state.spotify, state.store.as_ref(), &code)
            .await?;

    // The refresh token stays server-side; the UI only ever sees the
    // short-lived access token.
    let expires_in = record.expires_at - chrono::Utc::now().timestamp();
    Ok(Json(json!({
        "spotify_id": record.account_id,
        "access_token": record.access_token,
        "expires_in": expires_in,
    })))
}
