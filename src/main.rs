use std::sync::Arc;

use clap::{
    Parser,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use tracing_subscriber::EnvFilter;

use playlistd::{
    config, info,
    management::{AuthStateRegistry, CredentialStore, FsCredentialStore, TokenManager},
    server::{AppState, start_api_server},
    spotify::{Spotify, SpotifyAuth},
    warning,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name = env!("CARGO_PKG_NAME"),
  bin_name = env!("CARGO_PKG_NAME"),
  about = env!("CARGO_PKG_DESCRIPTION"),
  styles = styles(),
)]
struct Cli {
    /// Bind address override (e.g. 127.0.0.1:3001)
    #[clap(long)]
    address: Option<String>,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        warning!(
            "No .env loaded ({}); falling back to the process environment",
            e
        );
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("playlistd=info,tower_http=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();

    let store: Arc<dyn CredentialStore> =
        Arc::new(FsCredentialStore::new(config::credentials_dir()));
    let auth = SpotifyAuth::from_env();
    let spotify = Spotify::from_env();
    let tokens = TokenManager::new(auth.clone(), store.clone());

    let state = Arc::new(AppState {
        auth,
        spotify,
        tokens,
        store,
        states: AuthStateRegistry::new(),
    });

    info!("Starting playlist relay server...");
    start_api_server(state, cli.address).await;
}
