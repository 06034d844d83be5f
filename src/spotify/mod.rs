//! # Spotify Integration Module
//!
//! Client layer for everything that crosses the wire to Spotify. It covers
//! the two upstream surfaces the relay consumes:
//!
//! - the accounts service ([`auth`]): authorization URL construction, the
//!   authorization-code exchange, and the refresh-token exchange
//! - the Web API resource endpoints: profile, playlists, playlist tracks,
//!   search, and playlist mutation
//!
//! ## Error handling
//!
//! Resource calls never retry. A non-success response becomes
//! [`Error::Upstream`] carrying the upstream status and body verbatim, and
//! transport failures surface as [`Error::Network`]; the boundary layer
//! decides what to do with either. Token-endpoint failures map to the
//! exchange-specific variants in [`auth`].
//!
//! ## Pagination
//!
//! List endpoints return offset-paged collections linked through `next`
//! URLs. [`Spotify::drain_pages`] follows those links until exhaustion, so
//! callers always receive one fully materialized collection.

pub mod auth;
pub mod playlists;
pub mod search;
pub mod tracks;
pub mod users;

pub use auth::{SpotifyAuth, complete_authorization};

use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::{config, error::Error, types::Page};

/// Bearer-authenticated client for the Spotify Web API.
#[derive(Debug, Clone)]
pub struct Spotify {
    http: Client,
    api_url: String,
}

impl Spotify {
    pub fn new(api_url: impl Into<String>) -> Self {
        Spotify {
            http: Client::new(),
            api_url: api_url.into(),
        }
    }

    /// Builds a client against the configured API base URL.
    pub fn from_env() -> Self {
        Self::new(config::spotify_apiurl())
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    pub(crate) fn endpoint(&self, path_and_query: &str) -> String {
        format!("{}{}", self.api_url, path_and_query)
    }

    /// GETs a URL with a bearer token and decodes the JSON body.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        token: &str,
    ) -> Result<T, Error> {
        let response = self.http.get(url).bearer_auth(token).send().await?;
        let response = check(response).await?;
        Ok(response.json::<T>().await?)
    }

    /// Follows `next` links until the collection is exhausted, concatenating
    /// items along the way. The returned page carries every item, the final
    /// total, and no `next` pointer.
    pub(crate) async fn drain_pages<T: DeserializeOwned>(
        &self,
        mut page: Page<T>,
        token: &str,
    ) -> Result<Page<T>, Error> {
        let mut items = std::mem::take(&mut page.items);
        let mut next = page.next.take();

        while let Some(url) = next {
            let mut chunk: Page<T> = self.get_json(&url, token).await?;
            items.append(&mut chunk.items);
            next = chunk.next;
        }

        page.total = Some(items.len() as u64);
        page.items = items;
        page.next = None;
        Ok(page)
    }
}

/// Turns a non-success response into [`Error::Upstream`] with its body.
pub(crate) async fn check(response: reqwest::Response) -> Result<reqwest::Response, Error> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    tracing::warn!(status = status.as_u16(), "spotify call failed");
    Err(Error::Upstream {
        status: status.as_u16(),
        body,
    })
}
