use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// Failure taxonomy for the relay.
///
/// Every failure is returned to the caller as one of these variants; nothing
/// in the core retries. The boundary layer (UI) decides between showing a
/// message and forcing a re-login.
#[derive(Debug, Error)]
pub enum Error {
    /// A required input was missing or empty. Never reaches the network.
    #[error("{0}")]
    Validation(String),

    /// No credential record exists for the account; the user must
    /// re-authenticate.
    #[error("no credentials stored for account {0}")]
    NotFound(String),

    /// The authorization server rejected the code-for-token exchange.
    #[error("authorization code exchange failed: {0}")]
    AuthExchange(String),

    /// The authorization server rejected the refresh-token exchange.
    #[error("token refresh failed: {0}")]
    Refresh(String),

    /// A resource call failed after a valid token was obtained. Carries the
    /// upstream status and body verbatim.
    #[error("spotify returned {status}: {body}")]
    Upstream { status: u16, body: String },

    /// Transport failure talking to a resource endpoint.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The credential store could not be read or written.
    #[error("credential store error: {0}")]
    Store(String),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, msg) = match &self {
            Error::Validation(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            Error::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            Error::AuthExchange(_) | Error::Refresh(_) => {
                (StatusCode::UNAUTHORIZED, self.to_string())
            }
            Error::Upstream { status, .. } => (
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY),
                self.to_string(),
            ),
            Error::Network(e) => {
                tracing::error!("upstream transport failure: {}", e);
                (StatusCode::BAD_GATEWAY, self.to_string())
            }
            Error::Store(e) => {
                tracing::error!("credential store failure: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "store error".to_string())
            }
        };

        (status, Json(json!({ "error": msg }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    #[test]
    fn validation_maps_to_400() {
        let resp = Error::Validation("search_text is required".into()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_found_maps_to_404() {
        let resp = Error::NotFound("someone".into()).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn refresh_failures_map_to_401() {
        let resp = Error::Refresh("invalid_grant".into()).into_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn upstream_status_passes_through() {
        let resp = Error::Upstream {
            status: 403,
            body: "Forbidden".into(),
        }
        .into_response();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }
}
