//! learnvault - daily learning prompts from a notes vault.
//!
//! This library scans a directory of notes, pulls the tags out of each note's
//! YAML front matter, and picks a random note matching a tag filter so it can
//! be rendered as HTML.
//!
//! # Modules
//!
//! - [`commands`] - High-level operations (tags, list, pick, daily)
//! - [`frontmatter`] - Front-matter extraction and metadata types
//! - [`store`] - The in-memory index and random selection
//! - [`storage`] - Vault source trait and the local filesystem implementation
//! - [`render`] - Markdown to HTML rendering
//! - [`config`] - Configuration loading
//! - [`cli`] - Command-line interface definitions

pub mod cli;
pub mod commands;
pub mod config;
pub mod frontmatter;
pub mod render;
pub mod storage;
pub mod store;
