//! File-backed key/value storage
//!
//! All keys live in one JSON object file. Writes go to a temporary sibling
//! and are renamed into place, so a crash never leaves a half-written file.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use backoffice_core::KeyValueStore;
use backoffice_domain::{BackofficeError, Result};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, instrument, warn};

type Items = BTreeMap<String, String>;

/// [`KeyValueStore`] persisted as a JSON object on disk
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), write_lock: Mutex::new(()) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Items> {
        let data = match fs::read(&self.path).await {
            Ok(data) => data,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Items::new()),
            Err(err) => return Err(storage_error("read", &self.path, &err)),
        };

        if data.iter().all(u8::is_ascii_whitespace) {
            return Ok(Items::new());
        }

        serde_json::from_slice(&data).or_else(|err| {
            warn!(path = %self.path.display(), error = %err, "storage file is corrupt; starting empty");
            Ok(Items::new())
        })
    }

    async fn save(&self, items: &Items) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(|e| storage_error("create", parent, &e))?;
        }

        let data = serde_json::to_vec_pretty(items)?;
        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, &data).await.map_err(|e| storage_error("write", &temp_path, &e))?;
        fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| storage_error("rename", &self.path, &e))?;

        debug!(path = %self.path.display(), keys = items.len(), "storage file written");
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load().await?.remove(key))
    }

    #[instrument(skip(self, value))]
    async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut items = self.load().await?;
        items.insert(key.to_string(), value.to_string());
        self.save(&items).await
    }

    #[instrument(skip(self))]
    async fn remove_item(&self, key: &str) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut items = self.load().await?;
        if items.remove(key).is_some() {
            self.save(&items).await?;
        }
        Ok(())
    }
}

fn storage_error(action: &str, path: &Path, err: &std::io::Error) -> BackofficeError {
    BackofficeError::Storage(format!("failed to {action} {}: {err}", path.display()))
}
