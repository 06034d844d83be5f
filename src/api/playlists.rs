use std::sync::Arc;

use axum::{Extension, Json};
use serde_json::{Value, json};

use crate::{
    error::Error,
    server::AppState,
    types::{AccountRequest, TracksRequest},
};

use super::require;

pub async fn playlists(
    Extension(state): Extension<Arc<AppState>>,
    Json(body): Json<AccountRequest>,
) -> Result<Json<Value>, Error> {
    let spotify_id = require(body.spotify_id, "spotify_id")?;
    let token = state.tokens.ensure_fresh_token(&spotify_id).await?;
    let playlists = state.spotify.user_playlists(&spotify_id, &token).await?;
    Ok(Json(json!({ "playlists": playlists })))
}

pub async fn tracks(
    Extension(state): Extension<Arc<AppState>>,
    Json(body): Json<TracksRequest>,
) -> Result<Json<Value>, Error> {
    let playlist_id = require(body.playlist_id, "playlist_id")?;
    let spotify_id = require(body.spotify_id, "spotify_id")?;

    let token = state.tokens.ensure_fresh_token(&spotify_id).await?;
    let playlist = state.spotify.playlist_with_tracks(&playlist_id, &token).await?;
    Ok(Json(json!({ "playlist": playlist })))
}
