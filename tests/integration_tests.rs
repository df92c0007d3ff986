//! Integration tests for learnvault indexing and selection.
//!
//! Each test builds a throwaway vault in a temp directory and drives the
//! library directly.

use std::fs;
use std::path::PathBuf;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tempfile::TempDir;

use learnvault::frontmatter::{FrontMatterError, Origin};
use learnvault::storage::local::LocalVault;
use learnvault::store::{KnowledgeStore, Selection, StoreError};

/// Test helper to create a temporary vault directory.
struct TestVault {
    _temp_dir: TempDir,
    pub root: PathBuf,
}

impl TestVault {
    /// Create a new empty vault.
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let root = temp_dir.path().to_path_buf();

        Self {
            _temp_dir: temp_dir,
            root,
        }
    }

    /// The two-note vault: `a.md` tagged career, `b.md` without front matter.
    fn with_notes() -> Self {
        let vault = Self::new();
        vault.write("a.md", "---\ntags: [career]\n---\nBody A");
        vault.write("b.md", "Just some text, no front matter.");
        vault
    }

    fn write(&self, relative: &str, content: impl AsRef<[u8]>) -> PathBuf {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create dir");
        }
        fs::write(&path, content).expect("Failed to write note");
        path
    }

    fn build(&self) -> Result<KnowledgeStore, StoreError> {
        KnowledgeStore::build(&LocalVault::new(self.root.clone()))
    }
}

fn tags(list: &[&str]) -> Vec<String> {
    list.iter().map(|t| (*t).to_string()).collect()
}

// =============================================================================
// Index Builder Tests
// =============================================================================

mod build_tests {
    use super::*;

    #[test]
    fn indexes_every_file_by_path() {
        let vault = TestVault::with_notes();
        let store = vault.build().unwrap();

        assert_eq!(store.len(), 2);
        let a = store.get(&vault.root.join("a.md")).unwrap();
        assert_eq!(a.tags(), ["career"]);
        assert_eq!(a.origin, Origin::FrontMatter);
        assert_eq!(
            a.content.as_deref(),
            Some("---\ntags: [career]\n---\nBody A")
        );

        let b = store.get(&vault.root.join("b.md")).unwrap();
        assert!(b.tags().is_empty());
        assert_eq!(b.origin, Origin::NoFrontMatter);
    }

    #[test]
    fn walks_nested_directories() {
        let vault = TestVault::new();
        vault.write("books/2024/deep-work.md", "---\ntags: [focus]\n---\n");
        vault.write("top.md", "---\ntags: [misc]\n---\n");
        fs::create_dir_all(vault.root.join("empty/dir")).unwrap();

        let store = vault.build().unwrap();
        assert_eq!(store.len(), 2);
        assert!(store.get(&vault.root.join("books/2024/deep-work.md")).is_some());
    }

    #[test]
    fn unreadable_files_stay_in_store_without_tags() {
        let vault = TestVault::with_notes();
        let binary = vault.write("image.png", [0x89, 0x50, 0x4e, 0x47, 0xff, 0xfe]);

        let store = vault.build().unwrap();
        let entry = store.get(&binary).unwrap();

        assert_eq!(entry.content, None);
        assert!(entry.tags().is_empty());
        assert_eq!(entry.origin, Origin::Unreadable);
        assert_eq!(store.tag_universe().len(), 1);
    }

    #[test]
    fn unterminated_front_matter_fails_with_path() {
        let vault = TestVault::with_notes();
        let broken = vault.write("broken.md", "---\ntags: [career]\nno closing marker");

        let err = vault.build().unwrap_err();
        match &err {
            StoreError::FrontMatter { path, source } => {
                assert_eq!(path, &broken);
                assert!(matches!(source, FrontMatterError::Unterminated));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().contains("broken.md"));
    }

    #[test]
    fn malformed_yaml_fails() {
        let vault = TestVault::new();
        vault.write("bad.md", "---\ntags: [a\n---\n");

        assert!(matches!(
            vault.build(),
            Err(StoreError::FrontMatter {
                source: FrontMatterError::Yaml(_),
                ..
            })
        ));
    }

    #[test]
    fn missing_root_fails() {
        let vault = TestVault::new();
        let store = KnowledgeStore::build(&LocalVault::new(vault.root.join("missing")));

        assert!(matches!(store, Err(StoreError::Storage(_))));
    }

    #[test]
    fn rebuilding_unchanged_vault_is_idempotent() {
        let vault = TestVault::with_notes();
        vault.write("nested/c.md", "---\ntags: [rust, career]\nrating: 5\n---\nBody C");

        let first = vault.build().unwrap();
        let second = vault.build().unwrap();

        let first_entries: Vec<_> = first.entries().collect();
        let second_entries: Vec<_> = second.entries().collect();
        assert_eq!(first_entries, second_entries);
    }
}

// =============================================================================
// Tag Universe Tests
// =============================================================================

mod tag_universe_tests {
    use super::*;

    #[test]
    fn scenario_vault_has_only_career() {
        let store = TestVault::with_notes().build().unwrap();
        assert_eq!(
            store.tag_universe().into_iter().collect::<Vec<_>>(),
            tags(&["career"])
        );
    }

    #[test]
    fn union_is_deduplicated_and_sorted() {
        let vault = TestVault::new();
        vault.write("1.md", "---\ntags: [rust, career]\n---\n");
        vault.write("2.md", "---\ntags: [career, politics]\n---\n");
        vault.write("3.md", "---\ntitle: untagged\n---\n");

        let store = vault.build().unwrap();
        assert_eq!(
            store.tag_universe().into_iter().collect::<Vec<_>>(),
            tags(&["career", "politics", "rust"])
        );
    }

    #[test]
    fn empty_vault_has_no_tags() {
        let store = TestVault::new().build().unwrap();
        assert!(store.is_empty());
        assert!(store.tag_universe().is_empty());
    }
}

// =============================================================================
// Selector Tests
// =============================================================================

mod selector_tests {
    use super::*;

    #[test]
    fn career_filter_always_returns_body_a() {
        let store = TestVault::with_notes().build().unwrap();
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..25 {
            let selection = store.choose(&tags(&["career"]), &mut rng);
            assert_eq!(
                selection.content(),
                Some("---\ntags: [career]\n---\nBody A")
            );
        }
    }

    #[test]
    fn unknown_tag_is_no_match() {
        let store = TestVault::with_notes().build().unwrap();
        let mut rng = StdRng::seed_from_u64(11);

        assert_eq!(
            store.choose(&tags(&["politics"]), &mut rng),
            Selection::NoMatch
        );
    }

    #[test]
    fn filter_matches_any_listed_tag() {
        let vault = TestVault::new();
        vault.write("career.md", "---\ntags: [career]\n---\nC");
        vault.write("politics.md", "---\ntags: [politics]\n---\nP");
        vault.write("rust.md", "---\ntags: [rust]\n---\nR");

        let store = vault.build().unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let filter = tags(&["career", "politics"]);

        let mut seen = Vec::new();
        for _ in 0..200 {
            if let Selection::Note { path, .. } = store.choose(&filter, &mut rng) {
                let name = path.file_name().unwrap().to_string_lossy().to_string();
                if !seen.contains(&name) {
                    seen.push(name);
                }
            }
        }
        seen.sort();

        assert_eq!(seen, vec!["career.md", "politics.md"]);
    }

    #[test]
    fn empty_filter_can_pick_any_note() {
        let store = TestVault::with_notes().build().unwrap();
        let candidates = store.candidates(&[]);

        assert_eq!(candidates.len(), 2);
        assert!(candidates.iter().all(|e| e.is_readable()));
    }
}

// =============================================================================
// Config Tests
// =============================================================================

mod config_tests {
    use learnvault::config::expand_tilde;
    use std::path::PathBuf;

    #[test]
    fn expand_tilde_with_home_prefix() {
        let result = expand_tilde("~/.learnvault");
        assert!(!result.to_string_lossy().starts_with('~'));
        assert!(result.to_string_lossy().ends_with(".learnvault"));
    }

    #[test]
    fn expand_tilde_absolute_path_unchanged() {
        let result = expand_tilde("/absolute/path");
        assert_eq!(result, PathBuf::from("/absolute/path"));
    }
}
