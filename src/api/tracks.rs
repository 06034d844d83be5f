use std::sync::Arc;

use axum::{Extension, Json};

use crate::{
    error::Error,
    server::AppState,
    types::{AddTracksBody, RemoveTracksBody, SnapshotResponse},
};

use super::require;

pub async fn add_track(
    Extension(state): Extension<Arc<AppState>>,
    Json(body): Json<AddTracksBody>,
) -> Result<Json<SnapshotResponse>, Error> {
    let playlist_id = require(body.playlist_id, "playlist_id")?;
    let spotify_id = require(body.spotify_id, "spotify_id")?;
    let uris = body
        .uris
        .filter(|u| !u.is_empty())
        .ok_or_else(|| Error::Validation("uris is required".to_string()))?;

    let token = state.tokens.ensure_fresh_token(&spotify_id).await?;
    let snapshot = state.spotify.add_tracks(&playlist_id, uris, &token).await?;
    Ok(Json(snapshot))
}

pub async fn remove_track(
    Extension(state): Extension<Arc<AppState>>,
    Json(body): Json<RemoveTracksBody>,
) -> Result<Json<SnapshotResponse>, Error> {
    let playlist_id = require(body.playlist_id, "playlist_id")?;
    let spotify_id = require(body.spotify_id, "spotify_id")?;
    let tracks = body
        .tracks
        .filter(|t| !t.is_empty())
        .ok_or_else(|| Error::Validation("tracks is required".to_string()))?;

    let token = state.tokens.ensure_fresh_token(&spotify_id).await?;
    let snapshot = state
        .spotify
        .remove_tracks(&playlist_id, tracks, &token)
        .await?;
    Ok(Json(snapshot))
}
