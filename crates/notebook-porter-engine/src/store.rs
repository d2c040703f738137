use std::fs;
use std::path::{Path, PathBuf};

use crate::models::Workspace;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to access workspace store at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Workspace store at {path} is not valid: {source}")]
    Decode {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Failed to encode workspace: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Where the workspace lives between runs.
///
/// The codecs never see this; only the layer that merges imports into the
/// workspace (and writes it back) does.
pub trait WorkspaceStore {
    fn load(&self) -> Result<Workspace, StoreError>;
    fn save(&self, workspace: &Workspace) -> Result<(), StoreError>;
}

/// Keeps the workspace as a JSON file in the notebook's own storage shape.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl WorkspaceStore for JsonFileStore {
    /// A missing file is an empty workspace, not an error
    fn load(&self) -> Result<Workspace, StoreError> {
        if !self.path.exists() {
            log::debug!(
                "No workspace at {}, starting empty",
                self.path.display()
            );
            return Ok(Workspace::default());
        }

        let content = fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;
        serde_json::from_str(&content).map_err(|source| StoreError::Decode {
            path: self.path.clone(),
            source,
        })
    }

    fn save(&self, workspace: &Workspace) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        let content = serde_json::to_string_pretty(workspace).map_err(StoreError::Encode)?;
        fs::write(&self.path, content).map_err(|e| self.io_error(e))?;
        log::debug!(
            "Saved {} files to {}",
            workspace.files.len(),
            self.path.display()
        );
        Ok(())
    }
}
