mod auth;
mod state;
mod store;

pub use auth::SAFETY_MARGIN_SECS;
pub use auth::TokenManager;
pub use auth::is_fresh;
pub use state::AuthStateRegistry;
pub use store::CredentialStore;
pub use store::FsCredentialStore;
pub use store::MemoryCredentialStore;
