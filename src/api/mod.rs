//! # API Module
//!
//! HTTP handlers for the local server surface the browser UI talks to.
//! Every endpoint is a thin passthrough: validate the request body, obtain
//! a fresh access token from the lifecycle manager, relay the call to
//! Spotify, and return JSON. Failures map onto HTTP statuses through
//! [`crate::error::Error`]; nothing here retries.
//!
//! ## Endpoints
//!
//! - [`health`] - status and version for monitoring
//! - [`authorize_url`] - starts an authorization attempt
//! - [`callback`] - exchanges the returned authorization code
//! - [`access_token`] - hands the UI a guaranteed-fresh access token
//! - [`profile`] - account profile passthrough
//! - [`playlists`] - the user's playlists, all pages drained
//! - [`tracks`] - one playlist with its full track listing
//! - [`search`] - track search
//! - [`add_track`] / [`remove_track`] - playlist mutation

mod auth;
mod health;
mod playlists;
mod search;
mod token;
mod tracks;
mod users;

pub use auth::authorize_url;
pub use auth::callback;
pub use health::health;
pub use playlists::playlists;
pub use playlists::tracks;
pub use search::search;
pub use token::access_token;
pub use tracks::add_track;
pub use tracks::remove_track;
pub use users::profile;

use crate::error::Error;

/// Pulls a required string field out of a request body, rejecting absent or
/// blank values before anything touches the store or the network.
pub(crate) fn require(field: Option<String>, name: &str) -> Result<String, Error> {
    match field {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(Error::Validation(format!("{} is required", name))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_accepts_present_values() {
        assert_eq!(require(Some("abc".into()), "spotify_id").unwrap(), "abc");
    }

    #[test]
    fn require_rejects_missing_and_blank_values() {
        assert!(require(None, "spotify_id").is_err());
        assert!(require(Some(String::new()), "spotify_id").is_err());
        assert!(require(Some("   ".into()), "search_text").is_err());
    }
}
