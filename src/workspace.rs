//! Workspace persistence
//!
//! The persistence collaborator: open requests, the environment, history
//! and collections serialized as one JSON document. The data-model types
//! are stored exactly as they are - there is no separate storage encoding.
//!
//! Saves are atomic (write to a temp file in the target directory, then
//! rename over the destination) so an interrupted save never corrupts the
//! store.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::collections::CollectionItem;
use crate::errors::{RestpadError, Result};
use crate::models::{Environment, Request};

/// Most recent requests kept in history
pub const HISTORY_LIMIT: usize = 50;

/// Everything the client persists between sessions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Workspace {
    /// Open request tabs
    #[serde(default)]
    pub requests: Vec<Request>,
    /// The active variable environment
    #[serde(default)]
    pub environment: Environment,
    /// Recently sent requests, newest first
    #[serde(default)]
    pub history: Vec<Request>,
    /// Saved-request folder tree
    #[serde(default)]
    pub collections: Vec<CollectionItem>,
}

impl Workspace {
    /// Load a workspace, or start empty when the file does not exist yet
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no workspace file, starting empty");
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let workspace = serde_json::from_str(&content)?;
        debug!(path = %path.display(), "workspace loaded");
        Ok(workspace)
    }

    /// Save the workspace atomically
    pub fn save(&self, path: &Path) -> Result<()> {
        let dir = path.parent().ok_or_else(|| {
            RestpadError::Store(format!("workspace path has no parent: {}", path.display()))
        })?;
        fs::create_dir_all(dir)?;

        let json = serde_json::to_string_pretty(self)?;
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(json.as_bytes())?;
        tmp.persist(path).map_err(|e| RestpadError::Io(e.error))?;
        debug!(path = %path.display(), "workspace saved");
        Ok(())
    }

    /// Record a sent request at the head of history
    ///
    /// Any earlier entry with the same id moves to the front; history is
    /// truncated to [`HISTORY_LIMIT`].
    pub fn record_history(&mut self, request: Request) {
        self.history.retain(|r| r.id != request.id);
        self.history.insert(0, request);
        self.history.truncate(HISTORY_LIMIT);
    }

    /// Default workspace file under the platform data directory
    pub fn default_path() -> Result<PathBuf> {
        let base = dirs::data_dir().ok_or_else(|| {
            RestpadError::Store("could not determine a data directory".to_string())
        })?;
        Ok(base.join("restpad").join("workspace.json"))
    }
}
