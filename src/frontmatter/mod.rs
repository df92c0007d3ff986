//! Front-matter extraction and metadata types.
//!
//! A note may open with a YAML block fenced by `---` markers:
//!
//! ```text
//! ---
//! tags: [career, habits]
//! source: "Deep Work"
//! ---
//! Body of the note.
//! ```
//!
//! Only `tags` gets special treatment. Every other key is kept as a
//! [`MetaValue`] so nothing in the block is lost.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_yaml::Value;
use thiserror::Error;
use tracing::warn;

/// Marker that opens and closes a front-matter block.
pub const SENTINEL: &str = "---";

/// The metadata key that holds a note's tags.
pub const TAGS_KEY: &str = "tags";

/// Errors for front matter that starts correctly but cannot be used.
#[derive(Debug, Error)]
pub enum FrontMatterError {
    #[error("Front matter is missing its closing '---'")]
    Unterminated,

    #[error("Failed to parse front matter: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Front matter must be a key-value mapping, found {0}")]
    NotAMapping(&'static str),

    #[error("'tags' must be a list of strings, found {0}")]
    InvalidTags(&'static str),
}

/// A semi-structured front-matter value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetaValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    List(Vec<MetaValue>),
    Map(BTreeMap<String, MetaValue>),
}

/// Metadata extracted from a note. `tags` is always present.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Metadata {
    pub tags: Vec<String>,
    /// Every other front-matter key, preserved as parsed.
    #[serde(flatten)]
    pub fields: BTreeMap<String, MetaValue>,
}

impl Metadata {
    /// Look up a non-tag field.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&MetaValue> {
        self.fields.get(key)
    }

    /// True if any of `wanted` appears in this note's tags.
    #[must_use]
    pub fn has_any_tag(&self, wanted: &[String]) -> bool {
        wanted.iter().any(|tag| self.tags.contains(tag))
    }
}

/// How a note's metadata was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    /// Parsed from a front-matter block.
    FrontMatter,
    /// The note has no front matter; tags defaulted to empty.
    NoFrontMatter,
    /// The note could not be read; tags defaulted to empty.
    Unreadable,
}

/// Result of running the extractor over one note.
#[derive(Debug, Clone, PartialEq)]
pub struct Extracted {
    pub metadata: Metadata,
    pub origin: Origin,
}

/// Extract metadata from a note's text.
///
/// Absent text and text without a leading [`SENTINEL`] are tolerated: a
/// warning is logged and the metadata is `{tags: []}`.
///
/// # Errors
///
/// Returns `FrontMatterError` when the text opens a front-matter block that
/// is unterminated, is not valid YAML, is not a mapping, or carries a
/// `tags` value that is not a list of scalars.
pub fn extract(content: Option<&str>) -> Result<Extracted, FrontMatterError> {
    let Some(text) = content else {
        warn!("No valid file content, defaulting to empty tags");
        return Ok(Extracted {
            metadata: Metadata::default(),
            origin: Origin::Unreadable,
        });
    };

    let Some((block, _body)) = split(text)? else {
        warn!("No front matter found, defaulting to empty tags");
        return Ok(Extracted {
            metadata: Metadata::default(),
            origin: Origin::NoFrontMatter,
        });
    };

    Ok(Extracted {
        metadata: parse_block(block)?,
        origin: Origin::FrontMatter,
    })
}

/// Split text into its front-matter block and body.
///
/// Returns `Ok(None)` when the text does not start with [`SENTINEL`].
///
/// # Errors
///
/// Returns `FrontMatterError::Unterminated` if there is no closing sentinel.
pub fn split(text: &str) -> Result<Option<(&str, &str)>, FrontMatterError> {
    let Some(rest) = text.strip_prefix(SENTINEL) else {
        return Ok(None);
    };

    let end = rest.find(SENTINEL).ok_or(FrontMatterError::Unterminated)?;
    Ok(Some((&rest[..end], &rest[end + SENTINEL.len()..])))
}

/// The part of a note after its front matter, or the whole text when there is
/// no well-formed block.
#[must_use]
pub fn body(text: &str) -> &str {
    match split(text) {
        Ok(Some((_, body))) => body.trim_start_matches(['\r', '\n']),
        _ => text,
    }
}

fn parse_block(block: &str) -> Result<Metadata, FrontMatterError> {
    if block.trim().is_empty() {
        return Ok(Metadata::default());
    }

    let mapping = match serde_yaml::from_str::<Value>(block)? {
        Value::Mapping(mapping) => mapping,
        // A block holding only comments parses as null.
        Value::Null => return Ok(Metadata::default()),
        other => return Err(FrontMatterError::NotAMapping(kind(&other))),
    };

    let mut metadata = Metadata::default();
    for (key, value) in mapping {
        let key = key_text(&key);
        if key == TAGS_KEY {
            metadata.tags = normalize_tags(value)?;
        } else {
            metadata.fields.insert(key, MetaValue::from(value));
        }
    }

    Ok(metadata)
}

fn normalize_tags(value: Value) -> Result<Vec<String>, FrontMatterError> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::String(tag) => Ok(vec![tag]),
        Value::Sequence(items) => Ok(items
            .into_iter()
            .filter_map(|item| {
                let tag = scalar_text(&item);
                if tag.is_none() {
                    warn!(kind = kind(&item), "Ignoring non-scalar tag");
                }
                tag
            })
            .collect()),
        Value::Tagged(tagged) => normalize_tags(tagged.value),
        other => Err(FrontMatterError::InvalidTags(kind(&other))),
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_text(&tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

fn key_text(key: &Value) -> String {
    scalar_text(key).unwrap_or_else(|| {
        serde_yaml::to_string(key)
            .map(|s| s.trim().to_string())
            .unwrap_or_default()
    })
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

impl From<Value> for MetaValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => MetaValue::Null,
            Value::Bool(b) => MetaValue::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => MetaValue::Integer(i),
                None => n.as_f64().map_or_else(|| MetaValue::Text(n.to_string()), MetaValue::Float),
            },
            Value::String(s) => MetaValue::Text(s),
            Value::Sequence(items) => MetaValue::List(items.into_iter().map(Into::into).collect()),
            Value::Mapping(mapping) => MetaValue::Map(
                mapping
                    .into_iter()
                    .map(|(k, v)| (key_text(&k), v.into()))
                    .collect(),
            ),
            Value::Tagged(tagged) => tagged.value.into(),
        }
    }
}
