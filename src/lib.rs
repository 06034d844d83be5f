//! Spotify Playlist Relay Server Library
//!
//! This library backs a small web application for browsing and editing a
//! user's Spotify playlists. The browser UI talks to a local HTTP server
//! which relays every call to the Spotify Web API, owning the OAuth2 token
//! lifecycle on the way: authorization-code exchange, per-account credential
//! persistence, and transparent refresh of expired access tokens.
//!
//! # Modules
//!
//! - `api` - HTTP handlers for the local server surface
//! - `config` - Configuration management and environment variables
//! - `error` - Error taxonomy shared across the crate
//! - `management` - Credential storage and the token lifecycle manager
//! - `server` - Router construction and the serve loop
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions

pub mod api;
pub mod config;
pub mod error;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;

/// A convenient Result type alias for bootstrap operations that may fail.
///
/// Used on startup paths (config loading, binding) where any error is fatal
/// and only needs to be displayed. Request handling uses the typed
/// [`error::Error`] instead.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// This macro terminates the process with exit code 1 after printing. It is
/// only for fatal bootstrap errors where the server cannot come up.
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
