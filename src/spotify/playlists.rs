use urlencoding::encode;

use crate::{
    error::Error,
    types::{Page, Playlist, PlaylistDetail},
};

use super::Spotify;

impl Spotify {
    /// Lists every playlist owned or followed by the user, draining all
    /// pages before returning.
    pub async fn user_playlists(&self, user_id: &str, token: &str) -> Result<Page<Playlist>, Error> {
        let url = self.endpoint(&format!("/users/{}/playlists?limit=50", encode(user_id)));
        let first: Page<Playlist> = self.get_json(&url, token).await?;
        self.drain_pages(first, token).await
    }

    /// Fetches a playlist with its full track listing.
    ///
    /// The playlist endpoint returns only the first page of tracks; the
    /// remaining pages are followed and folded in, so the returned playlist
    /// always carries the complete collection.
    pub async fn playlist_with_tracks(
        &self,
        playlist_id: &str,
        token: &str,
    ) -> Result<PlaylistDetail, Error> {
        let url = self.endpoint(&format!("/playlists/{}", encode(playlist_id)));
        let mut playlist: PlaylistDetail = self.get_json(&url, token).await?;
        playlist.tracks = self.drain_pages(playlist.tracks, token).await?;
        Ok(playlist)
    }
}
