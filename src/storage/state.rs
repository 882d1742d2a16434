// src/storage/state.rs

//! Durable last-seen report state.

use std::collections::HashMap;
use std::path::PathBuf;

use tokio::io::AsyncWriteExt;

use crate::error::Result;

/// Mapping from source key to last-delivered report identifier.
pub type StateMap = HashMap<String, String>;

/// JSON-file backed store for the last-seen state.
///
/// Loading never fails: a missing, unreadable, or malformed file is
/// treated as empty state, which at worst re-delivers the most recent
/// report once.
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    /// Create a store backed by the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read the persisted mapping, degrading to empty on any failure.
    pub async fn load(&self) -> StateMap {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No state file at {:?}, starting empty", self.path);
                return StateMap::new();
            }
            Err(e) => {
                log::warn!("Failed to read state file {:?}: {}", self.path, e);
                return StateMap::new();
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(map) => map,
            Err(e) => {
                log::warn!(
                    "State file {:?} is malformed ({}), treating as empty",
                    self.path,
                    e
                );
                StateMap::new()
            }
        }
    }

    /// Write the mapping, fully replacing prior content.
    ///
    /// Writes to a temp file and renames, so a crash mid-write leaves the
    /// previous state intact.
    pub async fn save(&self, state: &StateMap) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let bytes = serde_json::to_vec_pretty(state)?;
        let tmp = self.path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(&bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}
