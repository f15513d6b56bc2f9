//! Durable history persistence

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use crate::shared::errors::StoreError;
use crate::shared::types::History;

#[async_trait]
pub trait HistoryStore {
    async fn load(&self) -> Result<History, StoreError>;
    async fn save(&self, history: &History) -> Result<(), StoreError>;
}

/// JSON file-backed store. Saves go to a sibling temp file followed by a
/// rename, so a crash mid-run never leaves a torn history behind.
pub struct FileHistoryStore {
    path: PathBuf,
}

impl FileHistoryStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

#[async_trait]
impl HistoryStore for FileHistoryStore {
    async fn load(&self) -> Result<History, StoreError> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            // Missing file is a normal first run
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(History::default()),
            Err(e) => return Err(StoreError::Read(e)),
        };

        Ok(serde_json::from_str(&raw)?)
    }

    async fn save(&self, history: &History) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(history)?;
        let tmp = self.tmp_path();

        fs::write(&tmp, json).await.map_err(StoreError::Write)?;
        fs::rename(&tmp, &self.path).await.map_err(StoreError::Write)?;

        Ok(())
    }
}
