//! Local filesystem vault source.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::storage::{StorageError, VaultSource};

/// Vault source that walks a directory on the local filesystem.
pub struct LocalVault {
    root: PathBuf,
}

impl LocalVault {
    /// Create a new local vault rooted at the given path.
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }
}

impl VaultSource for LocalVault {
    fn list_files(&self) -> Result<Vec<PathBuf>, StorageError> {
        if !self.root.exists() {
            return Err(StorageError::NotFound(self.root.clone()));
        }
        if !self.root.is_dir() {
            return Err(StorageError::NotADirectory(self.root.clone()));
        }

        let mut files = Vec::new();

        // Symlinked folders are walked too; link loops surface as errors below.
        for entry in WalkDir::new(&self.root).min_depth(1).follow_links(true) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(error = %e, "Skipping unreadable vault entry");
                    continue;
                }
            };

            if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }

        debug!(root = %self.root.display(), count = files.len(), "Enumerated vault files");
        Ok(files)
    }

    fn read_text(&self, path: &Path) -> Option<String> {
        match fs::read_to_string(path) {
            Ok(text) => Some(text),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Could not read note");
                None
            }
        }
    }

    fn root(&self) -> &Path {
        &self.root
    }
}
