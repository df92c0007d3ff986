//! HTML rendering of selected notes.

use pulldown_cmark::{Options, Parser, html};

/// Turns note text into HTML.
pub trait Renderer {
    fn render(&self, text: &str) -> String;
}

/// CommonMark renderer with the common GitHub-style extensions enabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownRenderer;

impl MarkdownRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn options() -> Options {
        Options::ENABLE_TABLES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_FOOTNOTES
    }
}

impl Renderer for MarkdownRenderer {
    fn render(&self, text: &str) -> String {
        let parser = Parser::new_ext(text, Self::options());
        let mut out = String::with_capacity(text.len() * 3 / 2);
        html::push_html(&mut out, parser);
        out
    }
}
