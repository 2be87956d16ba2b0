//! JSON file checkpoint
//!
//! Stores the crawl state as a small pretty-printed JSON document. Saving
//! overwrites the file in place; there is no rename dance and no backup.

use crate::state::CrawlState;
use crate::storage::traits::{StateStore, StorageResult};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// File-backed `StateStore`
#[derive(Debug, Clone)]
pub struct JsonStateStore {
    path: PathBuf,
    start_url: String,
}

impl JsonStateStore {
    /// Creates a store at `path`; `start_url` seeds the default state
    pub fn new(path: impl Into<PathBuf>, start_url: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            start_url: start_url.into(),
        }
    }

    /// Location of the checkpoint file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StateStore for JsonStateStore {
    fn load(&self) -> StorageResult<CrawlState> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(
                    "No checkpoint at {}, starting from {}",
                    self.path.display(),
                    self.start_url
                );
                return Ok(CrawlState::new(self.start_url.clone()));
            }
            Err(e) => return Err(e.into()),
        };

        Ok(serde_json::from_str(&content)?)
    }

    fn save(&mut self, state: &CrawlState) -> StorageResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(state)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    fn reset(&mut self) -> StorageResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
