use urlencoding::encode;

use crate::{
    error::Error,
    types::{AddTracksRequest, RemoveTracksRequest, SnapshotResponse, TrackUri},
};

use super::{Spotify, check};

impl Spotify {
    /// Appends tracks to a playlist. Returns the new snapshot id.
    pub async fn add_tracks(
        &self,
        playlist_id: &str,
        uris: Vec<String>,
        token: &str,
    ) -> Result<SnapshotResponse, Error> {
        let url = self.endpoint(&format!("/playlists/{}/tracks", encode(playlist_id)));
        let response = self
            .http()
            .post(&url)
            .bearer_auth(token)
            .json(&AddTracksRequest { uris })
            .send()
            .await?;
        let response = check(response).await?;
        Ok(response.json().await?)
    }

    /// Removes tracks from a playlist. Returns the new snapshot id.
    pub async fn remove_tracks(
        &self,
        playlist_id: &str,
        tracks: Vec<TrackUri>,
        token: &str,
    ) -> Result<SnapshotResponse, Error> {
        let url = self.endpoint(&format!("/playlists/{}/tracks", encode(playlist_id)));
        let response = self
            .http()
            .delete(&url)
            .bearer_auth(token)
            .json(&RemoveTracksRequest { tracks })
            .send()
            .await?;
        let response = check(response).await?;
        Ok(response.json().await?)
    }
}
