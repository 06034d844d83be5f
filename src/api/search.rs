use std::sync::Arc;

use axum::{Extension, Json};
use serde_json::{Value, json};

use crate::{error::Error, server::AppState, types::SearchRequest};

use super::require;

pub async fn search(
    Extension(state): Extension<Arc<AppState>>,
    Json(body): Json<SearchRequest>,
) -> Result<Json<Value>, Error> {
    let search_text = require(body.search_text, "search_text")?;
    let spotify_id = require(body.spotify_id, "spotify_id")?;

    let token = state.tokens.ensure_fresh_token(&spotify_id).await?;
    let results = state.spotify.search_tracks(&search_text, &token).await?;
    Ok(Json(json!({ "tracks": results.items })))
}
