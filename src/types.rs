use serde::{Deserialize, Serialize};

/// One stored credential record per Spotify account. Overwritten in place on
/// every refresh; `expires_at` is unix seconds fixed at mint time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    pub account_id: String,
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: i64,
}

/// Body of a successful response from the token endpoint. `refresh_token`
/// is absent when Spotify chooses not to rotate it.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_in: i64,
    pub scope: Option<String>,
    pub token_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrivateUser {
    pub id: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicUser {
    pub id: String,
    pub display_name: Option<String>,
}

/// Spotify's offset-paged collection wrapper. List endpoints link further
/// pages through `next`; a drained collection has `next == None` and `total`
/// equal to the item count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub href: Option<String>,
    pub items: Vec<T>,
    pub limit: Option<u32>,
    pub next: Option<String>,
    pub offset: Option<u32>,
    pub total: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    pub height: Option<u32>,
    pub width: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub public: Option<bool>,
    pub collaborative: Option<bool>,
    pub snapshot_id: String,
    pub images: Option<Vec<Image>>,
    pub owner: Option<PublicUser>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistDetail {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub public: Option<bool>,
    pub collaborative: Option<bool>,
    pub snapshot_id: String,
    pub images: Option<Vec<Image>>,
    pub owner: Option<PublicUser>,
    pub tracks: Page<PlaylistItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistItem {
    pub added_at: Option<String>,
    pub track: Option<Track>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub id: Option<String>,
    pub name: String,
    pub uri: String,
    pub duration_ms: Option<u64>,
    #[serde(default)]
    pub artists: Vec<TrackArtist>,
    pub album: Option<AlbumRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackArtist {
    pub id: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumRef {
    pub id: Option<String>,
    pub name: String,
    pub release_date: Option<String>,
    pub images: Option<Vec<Image>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub tracks: Page<Track>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTracksRequest {
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackUri {
    pub uri: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoveTracksRequest {
    pub tracks: Vec<TrackUri>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotResponse {
    pub snapshot_id: String,
}

// Request bodies of the local API surface. Field names match what the UI
// already sends; absent fields are rejected by the handlers, not by serde.

#[derive(Debug, Clone, Deserialize)]
pub struct AccountRequest {
    pub spotify_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CallbackRequest {
    pub code: Option<String>,
    pub state: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TracksRequest {
    pub spotify_id: Option<String>,
    pub playlist_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchRequest {
    pub spotify_id: Option<String>,
    pub search_text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddTracksBody {
    pub spotify_id: Option<String>,
    pub playlist_id: Option<String>,
    pub uris: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RemoveTracksBody {
    pub spotify_id: Option<String>,
    pub playlist_id: Option<String>,
    pub tracks: Option<Vec<TrackUri>>,
}
