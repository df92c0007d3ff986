//! In-memory knowledge store: the index of every note in a vault.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use rand::Rng;
use rand::seq::IndexedRandom;
use thiserror::Error;
use tracing::{debug, info};

use crate::frontmatter::{self, FrontMatterError, Metadata, Origin};
use crate::storage::{StorageError, VaultSource};

/// Errors that can occur while building a store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Invalid front matter in {path}: {source}")]
    FrontMatter {
        path: PathBuf,
        #[source]
        source: FrontMatterError,
    },
}

/// One note in the vault.
#[derive(Debug, Clone, PartialEq)]
pub struct VaultEntry {
    pub path: PathBuf,
    /// Full text of the note, or `None` if it could not be read.
    pub content: Option<String>,
    pub metadata: Metadata,
    pub origin: Origin,
}

impl VaultEntry {
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.metadata.tags
    }

    #[must_use]
    pub fn is_readable(&self) -> bool {
        self.content.is_some()
    }
}

/// Outcome of picking a random note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection<'a> {
    /// A readable note was chosen.
    Note { path: &'a Path, content: &'a str },
    /// The chosen note could not be read, so there is nothing to show.
    Unreadable(&'a Path),
    /// No note matched the filter.
    NoMatch,
}

impl<'a> Selection<'a> {
    /// The selected note's text, if there is one.
    #[must_use]
    pub fn content(&self) -> Option<&'a str> {
        match *self {
            Selection::Note { content, .. } => Some(content),
            Selection::Unreadable(_) | Selection::NoMatch => None,
        }
    }
}

/// Index of every note under a vault root, keyed by path.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeStore {
    root: PathBuf,
    entries: BTreeMap<PathBuf, VaultEntry>,
}

impl KnowledgeStore {
    /// Scan a vault source and index every file in it.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Storage` if the vault cannot be enumerated, or
    /// `StoreError::FrontMatter` for the first note whose front matter is
    /// unterminated or malformed.
    pub fn build(source: &dyn VaultSource) -> Result<Self, StoreError> {
        let mut entries = BTreeMap::new();

        for path in source.list_files()? {
            let content = source.read_text(&path);
            let extracted = frontmatter::extract(content.as_deref()).map_err(|source| {
                StoreError::FrontMatter {
                    path: path.clone(),
                    source,
                }
            })?;
            debug!(
                path = %path.display(),
                origin = ?extracted.origin,
                tags = ?extracted.metadata.tags,
                "Indexed note"
            );

            entries.insert(
                path.clone(),
                VaultEntry {
                    path,
                    content,
                    metadata: extracted.metadata,
                    origin: extracted.origin,
                },
            );
        }

        info!(root = %source.root().display(), notes = entries.len(), "Built knowledge store");
        Ok(Self {
            root: source.root().to_path_buf(),
            entries,
        })
    }

    /// Build a store from already-constructed entries.
    #[must_use]
    pub fn from_entries(root: PathBuf, entries: impl IntoIterator<Item = VaultEntry>) -> Self {
        Self {
            root,
            entries: entries.into_iter().map(|e| (e.path.clone(), e)).collect(),
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, path: &Path) -> Option<&VaultEntry> {
        self.entries.get(path)
    }

    /// All entries in path order.
    pub fn entries(&self) -> impl Iterator<Item = &VaultEntry> {
        self.entries.values()
    }

    /// Path of an entry relative to the vault root, for display.
    #[must_use]
    pub fn relative_path<'p>(&self, path: &'p Path) -> &'p Path {
        path.strip_prefix(&self.root).unwrap_or(path)
    }

    /// Every distinct tag used by any note, in lexicographic order.
    #[must_use]
    pub fn tag_universe(&self) -> BTreeSet<String> {
        self.entries
            .values()
            .flat_map(|entry| entry.tags().iter().cloned())
            .collect()
    }

    /// Entries whose tags intersect `tags`, or every entry if `tags` is empty.
    #[must_use]
    pub fn candidates(&self, tags: &[String]) -> Vec<&VaultEntry> {
        self.entries
            .values()
            .filter(|entry| tags.is_empty() || entry.metadata.has_any_tag(tags))
            .collect()
    }

    /// Pick one note uniformly at random among those matching `tags`.
    ///
    /// An empty filter matches every note. A filter matches a note that
    /// carries at least one of the tags.
    pub fn choose<R: Rng + ?Sized>(&self, tags: &[String], rng: &mut R) -> Selection<'_> {
        let candidates = self.candidates(tags);

        let Some(&entry) = candidates.choose(rng) else {
            debug!(?tags, "No notes match filter");
            return Selection::NoMatch;
        };

        match entry.content.as_deref() {
            Some(content) => Selection::Note {
                path: &entry.path,
                content,
            },
            None => Selection::Unreadable(&entry.path),
        }
    }
}
