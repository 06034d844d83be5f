use std::{collections::HashMap, sync::Arc};

use chrono::Utc;
use tokio::sync::Mutex;

use crate::{error::Error, spotify::SpotifyAuth, types::Credentials};

use super::CredentialStore;

/// Seconds before expiry at which a stored access token is already treated
/// as stale. Covers clock skew and the latency of the request the token is
/// about to authenticate.
pub const SAFETY_MARGIN_SECS: i64 = 120;

/// The token lifecycle manager.
///
/// Sits between every caller and the credential store: callers never read
/// an access token out of the store themselves, they ask the manager for a
/// guaranteed-fresh one immediately before each resource call.
pub struct TokenManager {
    auth: SpotifyAuth,
    store: Arc<dyn CredentialStore>,
    refresh_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl TokenManager {
    pub fn new(auth: SpotifyAuth, store: Arc<dyn CredentialStore>) -> Self {
        TokenManager {
            auth,
            store,
            refresh_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Returns an access token valid for at least the safety margin.
    ///
    /// The fast path is side-effect free: a record whose token is still
    /// inside its margin is returned as-is, with no store write and no
    /// upstream call. A stale record triggers exactly one refresh exchange;
    /// the stored refresh token is kept unless the response rotates it, and
    /// the full updated record is persisted before the new token is handed
    /// out.
    ///
    /// Refreshes are serialized per account: concurrent stale callers wait
    /// for the one in-flight refresh and reuse its record instead of each
    /// issuing their own.
    ///
    /// # Errors
    ///
    /// [`Error::NotFound`] when the account has no stored record, and
    /// [`Error::Refresh`] when the upstream exchange is rejected or
    /// unreachable. Both mean the UI has to send the user back through
    /// authorization; nothing is retried here.
    pub async fn ensure_fresh_token(&self, account_id: &str) -> Result<String, Error> {
        let record = self.load(account_id).await?;
        if is_fresh(&record, Utc::now().timestamp()) {
            return Ok(record.access_token);
        }

        let lock = self.refresh_lock(account_id).await;
        let _guard = lock.lock().await;

        // A concurrent caller may have refreshed while we waited for the lock.
        let record = self.load(account_id).await?;
        if is_fresh(&record, Utc::now().timestamp()) {
            return Ok(record.access_token);
        }

        let refreshed = self.refresh(record).await?;
        self.store.put(&refreshed).await?;
        Ok(refreshed.access_token)
    }

    /// Discards the stored access-token copy for an account.
    ///
    /// Used when Spotify reports the token as expired ahead of our own
    /// bookkeeping. The record itself survives, so the next
    /// [`ensure_fresh_token`](Self::ensure_fresh_token) call goes straight
    /// to a refresh.
    pub async fn invalidate_access_token(&self, account_id: &str) -> Result<(), Error> {
        let mut record = self.load(account_id).await?;
        record.access_token = String::new();
        record.expires_at = 0;
        self.store.put(&record).await
    }

    async fn load(&self, account_id: &str) -> Result<Credentials, Error> {
        self.store
            .get(account_id)
            .await?
            .ok_or_else(|| Error::NotFound(account_id.to_string()))
    }

    async fn refresh(&self, record: Credentials) -> Result<Credentials, Error> {
        tracing::debug!(account = %record.account_id, "refreshing access token");
        let token = self.auth.refresh(&record.refresh_token).await?;

        Ok(Credentials {
            account_id: record.account_id,
            access_token: token.access_token,
            // Spotify only sometimes rotates the refresh token
            refresh_token: token.refresh_token.unwrap_or(record.refresh_token),
            expires_at: Utc::now().timestamp() + token.expires_in,
        })
    }

    async fn refresh_lock(&self, account_id: &str) -> Arc<Mutex<()>> {
        let mut locks = self.refresh_locks.lock().await;
        locks
            .entry(account_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

/// A token is usable only while the safety margin still fits before expiry.
pub fn is_fresh(record: &Credentials, now: i64) -> bool {
    now + SAFETY_MARGIN_SECS < record.expires_at
}
