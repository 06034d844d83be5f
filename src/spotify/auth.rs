use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::Utc;
use reqwest::Client;
use urlencoding::encode;

use crate::{
    config,
    error::Error,
    management::CredentialStore,
    types::{Credentials, TokenResponse},
};

use super::Spotify;

/// Client for the Spotify accounts service.
///
/// Owns the pieces of the OAuth 2.0 authorization-code flow that talk to
/// Spotify: building the authorization URL the browser is sent to, trading
/// an authorization code for tokens, and trading a refresh token for a new
/// access token. The relay holds the client secret, so the code grant
/// authenticates with a Basic header rather than PKCE.
#[derive(Debug, Clone)]
pub struct SpotifyAuth {
    http: Client,
    auth_url: String,
    token_url: String,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    scope: String,
}

impl SpotifyAuth {
    pub fn new(
        auth_url: impl Into<String>,
        token_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
        scope: impl Into<String>,
    ) -> Self {
        SpotifyAuth {
            http: Client::new(),
            auth_url: auth_url.into(),
            token_url: token_url.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: redirect_uri.into(),
            scope: scope.into(),
        }
    }

    /// Builds a client from the configured environment.
    ///
    /// # Panics
    ///
    /// Panics when the Spotify client id or secret is not configured.
    pub fn from_env() -> Self {
        Self::new(
            config::spotify_apiauth_url(),
            config::spotify_apitoken_url(),
            config::spotify_client_id(),
            config::spotify_client_secret(),
            config::spotify_redirect_uri(),
            config::spotify_scope(),
        )
    }

    /// Constructs the authorization URL the user's browser is redirected to.
    ///
    /// Deterministic for a given `state`; no side effects. The caller is
    /// responsible for generating a fresh anti-forgery `state` per attempt
    /// and remembering it until the callback returns.
    pub fn authorize_url(&self, state: &str) -> String {
        format!(
            "{auth_url}?response_type=code&client_id={client_id}&scope={scope}&redirect_uri={redirect_uri}&state={state}",
            auth_url = self.auth_url,
            client_id = encode(&self.client_id),
            scope = encode(&self.scope),
            redirect_uri = encode(&self.redirect_uri),
            state = encode(state),
        )
    }

    /// Exchanges an authorization code for tokens.
    ///
    /// Posts `grant_type=authorization_code` with the registered redirect
    /// URI, authenticating with the client credentials in a Basic header.
    /// A single attempt; any rejection or transport failure surfaces as
    /// [`Error::AuthExchange`] and is never retried here.
    pub async fn exchange_code(&self, code: &str) -> Result<TokenResponse, Error> {
        let basic = STANDARD.encode(format!("{}:{}", self.client_id, self.client_secret));

        let response = self
            .http
            .post(&self.token_url)
            .header(reqwest::header::AUTHORIZATION, format!("Basic {}", basic))
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", &self.redirect_uri),
            ])
            .send()
            .await
            .map_err(|e| Error::AuthExchange(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::AuthExchange(e.to_string()))?;

        if !status.is_success() {
            return Err(Error::AuthExchange(body));
        }

        parse_token_response(&body).map_err(Error::AuthExchange)
    }

    /// Exchanges a refresh token for a new access token.
    ///
    /// Posts `grant_type=refresh_token` with the stored refresh token and
    /// the client id. A single attempt; failures surface as
    /// [`Error::Refresh`], which callers must treat as "re-authorization
    /// required".
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenResponse, Error> {
        let response = self
            .http
            .post(&self.token_url)
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
                ("client_id", &self.client_id),
            ])
            .send()
            .await
            .map_err(|e| Error::Refresh(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Refresh(e.to_string()))?;

        if !status.is_success() {
            return Err(Error::Refresh(body));
        }

        parse_token_response(&body).map_err(Error::Refresh)
    }
}

/// Completes an authorization attempt for a just-exchanged code.
///
/// Exchanges the code, resolves the owning account through the profile
/// endpoint with the fresh access token, and persists the resulting record.
/// Nothing is written when any step fails.
pub async fn complete_authorization(
    auth: &SpotifyAuth,
    spotify: &Spotify,
    store: &dyn CredentialStore,
    code: &str,
) -> Result<Credentials, Error> {
    let token = auth.exchange_code(code).await?;
    let refresh_token = token
        .refresh_token
        .clone()
        .ok_or_else(|| Error::AuthExchange("token response carried no refresh token".to_string()))?;

    let profile = spotify.profile(&token.access_token).await?;

    let record = Credentials {
        account_id: profile.id,
        access_token: token.access_token,
        refresh_token,
        expires_at: Utc::now().timestamp() + token.expires_in,
    };
    store.put(&record).await?;

    tracing::info!(account = %record.account_id, "authorization completed");
    Ok(record)
}

/// Decodes a token-endpoint body, honoring Spotify's in-body error reports.
fn parse_token_response(body: &str) -> Result<TokenResponse, String> {
    let value: serde_json::Value = serde_json::from_str(body).map_err(|e| e.to_string())?;

    if let Some(err) = value.get("error").and_then(|e| e.as_str()) {
        let detail = value
            .get("error_description")
            .and_then(|d| d.as_str())
            .unwrap_or("");
        return Err(if detail.is_empty() {
            err.to_string()
        } else {
            format!("{}: {}", err, detail)
        });
    }

    serde_json::from_value(value).map_err(|e| e.to_string())
}
