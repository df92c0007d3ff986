//! Vault source trait and implementations.
//!
//! This module provides an abstraction over where notes are read from, so the
//! index builder does not care whether it is walking a local directory or
//! something else.

pub mod local;

use std::path::{Path, PathBuf};

/// Errors that can occur while enumerating a vault.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Vault root not found: {0}")]
    NotFound(PathBuf),

    #[error("Vault root is not a directory: {0}")]
    NotADirectory(PathBuf),
}

/// Trait for sources of vault notes (local filesystem, in-memory fixtures, etc.).
pub trait VaultSource {
    /// List every regular file reachable beneath the root, at any depth.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the root itself cannot be walked.
    fn list_files(&self) -> Result<Vec<PathBuf>, StorageError>;

    /// Read a file's full text.
    ///
    /// Returns `None` when the file cannot be read or is not valid UTF-8.
    /// That is a tolerated condition, not an error.
    fn read_text(&self, path: &Path) -> Option<String>;

    /// Get the root path of this source.
    fn root(&self) -> &Path;
}
