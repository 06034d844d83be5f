use std::{net::SocketAddr, str::FromStr, sync::Arc};

use axum::{
    Extension, Router,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    api, config, error,
    management::{AuthStateRegistry, CredentialStore, TokenManager},
    spotify::{Spotify, SpotifyAuth},
    success,
};

/// Shared state handed to every handler.
pub struct AppState {
    pub auth: SpotifyAuth,
    pub spotify: Spotify,
    pub tokens: TokenManager,
    pub store: Arc<dyn CredentialStore>,
    pub states: AuthStateRegistry,
}

/// Builds the local API router, with CORS restricted to the configured UI
/// origins.
pub fn router(state: Arc<AppState>) -> Router {
    let origins: Vec<HeaderValue> = config::ui_origins()
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/health", get(api::health))
        .route("/authorize-url", post(api::authorize_url))
        .route("/callback", post(api::callback))
        .route("/token", post(api::access_token))
        .route("/profile", post(api::profile))
        .route("/playlists", post(api::playlists))
        .route("/tracks", post(api::tracks))
        .route("/search", post(api::search))
        .route("/tracks/add", post(api::add_track))
        .route("/tracks/remove", post(api::remove_track))
        .layer(Extension(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub async fn start_api_server(state: Arc<AppState>, address: Option<String>) {
    let app = router(state);

    let addr_str = address.unwrap_or_else(config::server_addr);
    let addr = match SocketAddr::from_str(&addr_str) {
        Ok(addr) => addr,
        Err(e) => error!("Failed to parse server address: {}", e),
    };

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => error!("Failed to bind {}: {}", addr, e),
    };

    success!("Listening on http://{}", addr);
    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
    }
}
