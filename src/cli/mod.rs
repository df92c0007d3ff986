//! CLI interface for learnvault.
//!
//! Provides command-line argument parsing using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Command-line interface for learnvault.
#[derive(Parser)]
#[command(name = "learnvault")]
#[command(author, version, about = "Daily learning from a tagged notes vault", long_about = None)]
pub struct Cli {
    /// Scan this directory instead of the configured vault folder.
    #[arg(long, global = true)]
    pub vault: Option<PathBuf>,

    /// The subcommand to run. Defaults to `daily`.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Print every tag used in the vault, sorted.
    Tags {
        /// Print a JSON array instead of one tag per line.
        #[arg(long)]
        json: bool,
    },

    /// List notes and their tags.
    List {
        /// Only notes carrying this tag (repeatable, or comma-separated).
        #[arg(short, long = "tag")]
        tags: Vec<String>,

        /// Print JSON instead of plain text.
        #[arg(long)]
        json: bool,
    },

    /// Pick one note at random and print it as HTML.
    Pick {
        /// Only notes carrying this tag (repeatable, or comma-separated).
        #[arg(short, long = "tag")]
        tags: Vec<String>,

        /// Print the note's text instead of rendering it.
        #[arg(short, long)]
        raw: bool,

        /// Drop the front-matter block before rendering.
        #[arg(short = 'S', long)]
        strip_front_matter: bool,
    },

    /// Print all tags, then a random note with one of the configured daily tags.
    Daily,
}
