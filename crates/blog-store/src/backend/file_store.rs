//! JSON file backend
//!
//! All keys live in one JSON object on disk. Writes go to a sibling temp file
//! and are renamed over the previous file.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use blog_common::StorageConfig;
use tokio::sync::Mutex;

use super::{KeyValueStore, StoreError, StoreResult};

type Entries = BTreeMap<String, String>;

/// File-backed key-value store
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within the process
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Create a store over `path`; the file is created on first write
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Create a store from blog-common config
    #[must_use]
    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(config.session_file.clone())
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_entries(&self) -> StoreResult<Entries> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Entries::new()),
            Err(e) => return Err(e.into()),
        };

        if raw.trim().is_empty() {
            return Ok(Entries::new());
        }

        serde_json::from_str(&raw).map_err(|e| StoreError::Corrupt {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        })
    }

    // A corrupt file is replaced rather than blocking every later write
    async fn read_entries_for_write(&self) -> StoreResult<Entries> {
        match self.read_entries().await {
            Err(StoreError::Corrupt { path, reason }) => {
                tracing::warn!(path = %path, reason = %reason, "Discarding corrupt store file");
                Ok(Entries::new())
            }
            other => other,
        }
    }

    async fn write_entries(&self, entries: &Entries) -> StoreResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let body = serde_json::to_string_pretty(entries)?;
        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, body).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.read_entries().await?.remove(key))
    }

    async fn set(&self, key: &str, value: String) -> StoreResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.read_entries_for_write().await?;
        entries.insert(key.to_string(), value);
        self.write_entries(&entries).await?;

        tracing::debug!(key = %key, path = %self.path.display(), "Stored value");
        Ok(())
    }

    async fn delete(&self, key: &str) -> StoreResult<bool> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.read_entries_for_write().await?;
        let existed = entries.remove(key).is_some();
        if existed {
            self.write_entries(&entries).await?;
            tracing::debug!(key = %key, path = %self.path.display(), "Deleted value");
        }
        Ok(existed)
    }
}
