use urlencoding::encode;

use crate::{
    error::Error,
    types::{Page, SearchResponse, Track},
};

use super::Spotify;

impl Spotify {
    /// Searches the catalog for tracks matching the query. Returns the
    /// first result page, which is what the search box displays.
    pub async fn search_tracks(&self, query: &str, token: &str) -> Result<Page<Track>, Error> {
        let url = self.endpoint(&format!("/search?q={}&type=track&limit=20", encode(query)));
        let response: SearchResponse = self.get_json(&url, token).await?;
        Ok(response.tracks)
    }
}
