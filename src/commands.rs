//! Command implementations behind the CLI.

use std::path::{Path, PathBuf};

use anyhow::Context;
use rand::Rng;
use serde::Serialize;
use tracing::info;

use crate::config::Config;
use crate::frontmatter::{self, Origin};
use crate::render::Renderer;
use crate::storage::local::LocalVault;
use crate::store::{KnowledgeStore, Selection};

/// Parse tag arguments, splitting comma-separated values.
///
/// Trims whitespace and filters out empty strings, so `["a, b", "c"]` and
/// `["a", "b", "c"]` mean the same thing.
#[must_use]
pub fn parse_tags<S: AsRef<str>>(values: &[S]) -> Vec<String> {
    values
        .iter()
        .flat_map(|v| v.as_ref().split(','))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Resolve the directory to scan: an explicit override wins over config.
#[must_use]
pub fn scan_root(config: &Config, vault: Option<&Path>) -> PathBuf {
    vault.map_or_else(|| config.vault.scan_root(), Path::to_path_buf)
}

/// Index every note under `root`.
///
/// # Errors
///
/// Returns an error if the root does not exist or a note has malformed
/// front matter.
pub fn load_store(root: &Path) -> anyhow::Result<KnowledgeStore> {
    let vault = LocalVault::new(root.to_path_buf());
    KnowledgeStore::build(&vault)
        .with_context(|| format!("Failed to index vault at {}", root.display()))
}

/// Every tag in use, sorted.
#[must_use]
pub fn tags(store: &KnowledgeStore) -> Vec<String> {
    store.tag_universe().into_iter().collect()
}

/// Summary of one note for listing.
#[derive(Debug, Clone, Serialize)]
pub struct NoteInfo {
    /// Path relative to the vault root.
    pub path: PathBuf,
    pub tags: Vec<String>,
    pub origin: Origin,
}

/// List notes, optionally only those carrying one of `filter`.
#[must_use]
pub fn list(store: &KnowledgeStore, filter: &[String]) -> Vec<NoteInfo> {
    store
        .candidates(filter)
        .into_iter()
        .map(|entry| NoteInfo {
            path: store.relative_path(&entry.path).to_path_buf(),
            tags: entry.tags().to_vec(),
            origin: entry.origin,
        })
        .collect()
}

/// A note chosen for display.
#[derive(Debug, Clone)]
pub struct PickedNote {
    pub path: PathBuf,
    pub content: String,
}

/// Pick a random note matching any of `filter`.
///
/// # Errors
///
/// Returns an error if nothing matches or the chosen note is unreadable.
pub fn pick<R: Rng + ?Sized>(
    store: &KnowledgeStore,
    filter: &[String],
    rng: &mut R,
) -> anyhow::Result<PickedNote> {
    match store.choose(filter, rng) {
        Selection::Note { path, content } => {
            info!(path = %path.display(), "Picked note");
            Ok(PickedNote {
                path: store.relative_path(path).to_path_buf(),
                content: content.to_string(),
            })
        }
        Selection::Unreadable(path) => {
            anyhow::bail!("No note available: {} could not be read", path.display())
        }
        Selection::NoMatch if filter.is_empty() => {
            anyhow::bail!("No note available: the vault is empty")
        }
        Selection::NoMatch => {
            anyhow::bail!("No note available with tags: {}", filter.join(", "))
        }
    }
}

/// Render a note to HTML, optionally dropping its front matter first.
#[must_use]
pub fn render(renderer: &dyn Renderer, content: &str, strip_front_matter: bool) -> String {
    if strip_front_matter {
        renderer.render(frontmatter::body(content))
    } else {
        renderer.render(content)
    }
}

/// Format tags for the daily prompt header, e.g. `[career, rust]`.
#[must_use]
pub fn format_tag_list(tags: &[String]) -> String {
    format!("[{}]", tags.join(", "))
}

/// The note chosen by the daily prompt, rendered.
#[derive(Debug, Clone)]
pub struct DailyNote {
    pub note: PickedNote,
    pub html: String,
}

/// Pick a note with one of the configured daily tags and render it.
///
/// Callers print the tag list first, so it is shown even when this fails.
///
/// # Errors
///
/// Returns an error if no readable note matches.
pub fn daily<R: Rng + ?Sized>(
    config: &Config,
    store: &KnowledgeStore,
    renderer: &dyn Renderer,
    rng: &mut R,
) -> anyhow::Result<DailyNote> {
    let note = pick(store, &config.daily.tags, rng)?;
    let html = render(renderer, &note.content, config.daily.strip_front_matter);

    Ok(DailyNote { note, html })
}
