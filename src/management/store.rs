use std::{collections::HashMap, path::PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{error::Error, types::Credentials};

/// Keyed persistence for credential records.
///
/// One record per account; `put` overwrites in place, `get` returns `None`
/// for accounts that never authorized. Backends are swappable behind this
/// trait; anything like at-rest encryption belongs inside a backend, not in
/// the callers.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn put(&self, record: &Credentials) -> Result<(), Error>;
    async fn get(&self, account_id: &str) -> Result<Option<Credentials>, Error>;
}

/// Filesystem-backed store: one pretty-printed JSON file per account under
/// the data directory.
pub struct FsCredentialStore {
    dir: PathBuf,
}

impl FsCredentialStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FsCredentialStore { dir: dir.into() }
    }

    fn record_path(&self, account_id: &str) -> PathBuf {
        // Account ids land in filenames; anything unexpected is mapped away.
        let safe: String = account_id
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{}.json", safe))
    }
}

#[async_trait]
impl CredentialStore for FsCredentialStore {
    async fn put(&self, record: &Credentials) -> Result<(), Error> {
        async_fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| Error::Store(e.to_string()))?;

        let json =
            serde_json::to_string_pretty(record).map_err(|e| Error::Store(e.to_string()))?;
        async_fs::write(self.record_path(&record.account_id), json)
            .await
            .map_err(|e| Error::Store(e.to_string()))
    }

    async fn get(&self, account_id: &str) -> Result<Option<Credentials>, Error> {
        let path = self.record_path(account_id);
        let content = match async_fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(Error::Store(e.to_string())),
        };

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| Error::Store(e.to_string()))
    }
}

/// In-process store for tests and ephemeral runs.
#[derive(Default)]
pub struct MemoryCredentialStore {
    records: Mutex<HashMap<String, Credentials>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn put(&self, record: &Credentials) -> Result<(), Error> {
        self.records
            .lock()
            .await
            .insert(record.account_id.clone(), record.clone());
        Ok(())
    }

    async fn get(&self, account_id: &str) -> Result<Option<Credentials>, Error> {
        Ok(self.records.lock().await.get(account_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, distr::Alphanumeric};

    fn record(account_id: &str, access_token: &str) -> Credentials {
        Credentials {
            account_id: account_id.to_string(),
            access_token: access_token.to_string(),
            refresh_token: "R".to_string(),
            expires_at: 1_000_000,
        }
    }

    fn scratch_dir() -> PathBuf {
        let suffix: String = rand::rng()
            .sample_iter(&Alphanumeric)
            .take(12)
            .map(char::from)
            .collect();
        std::env::temp_dir().join(format!("playlistd-store-test-{}", suffix))
    }

    #[tokio::test]
    async fn memory_store_round_trips_and_overwrites() {
        let store = MemoryCredentialStore::new();
        assert!(store.get("alice").await.unwrap().is_none());

        store.put(&record("alice", "A")).await.unwrap();
        assert_eq!(
            store.get("alice").await.unwrap().unwrap().access_token,
            "A"
        );

        // overwrite in place, no history
        store.put(&record("alice", "B")).await.unwrap();
        assert_eq!(
            store.get("alice").await.unwrap().unwrap().access_token,
            "B"
        );
    }

    #[tokio::test]
    async fn fs_store_round_trips() {
        let dir = scratch_dir();
        let store = FsCredentialStore::new(&dir);

        assert!(store.get("alice").await.unwrap().is_none());

        store.put(&record("alice", "A")).await.unwrap();
        let loaded = store.get("alice").await.unwrap().unwrap();
        assert_eq!(loaded, record("alice", "A"));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn fs_store_keeps_accounts_separate() {
        let dir = scratch_dir();
        let store = FsCredentialStore::new(&dir);

        store.put(&record("alice", "A")).await.unwrap();
        store.put(&record("bob", "B")).await.unwrap();

        assert_eq!(store.get("alice").await.unwrap().unwrap().access_token, "A");
        assert_eq!(store.get("bob").await.unwrap().unwrap().access_token, "B");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn fs_store_sanitizes_hostile_account_ids() {
        let dir = scratch_dir();
        let store = FsCredentialStore::new(&dir);

        store.put(&record("../../etc/passwd", "A")).await.unwrap();
        let loaded = store.get("../../etc/passwd").await.unwrap().unwrap();
        assert_eq!(loaded.access_token, "A");

        // nothing escaped the store directory
        assert!(dir.join(".._.._etc_passwd.json").is_file());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
