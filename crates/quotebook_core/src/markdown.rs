//! Markdown to HTML rendering.
//!
//! Thin wrapper over `pulldown-cmark`; parsing itself is not reimplemented.
//! Rendering is pure and never fails: malformed input yields best-effort HTML.

use pulldown_cmark::{html, Options, Parser};

/// Reusable renderer holding parser options.
#[derive(Debug, Clone, Copy)]
pub struct MarkdownRenderer {
    options: Options,
}

impl MarkdownRenderer {
    /// CommonMark renderer with no extensions enabled.
    pub fn new() -> Self {
        Self {
            options: Options::empty(),
        }
    }

    pub fn to_html(&self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, self.options);
        let mut rendered = String::with_capacity(markdown.len() + markdown.len() / 2);
        html::push_html(&mut rendered, parser);
        rendered
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}
