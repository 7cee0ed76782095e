//! Prose rendering for the windvane documentation page.
//!
//! The page's text blocks are authored in a small markdown dialect:
//! `###`/`####` headings, `**bold**`, `*emphasis*`, `` `inline code` ``,
//! `-` bullet lists, and plain paragraphs. This crate parses that dialect
//! with `pulldown-cmark` and lays it out into styled, word-wrapped
//! [`ratatui::text::Line`]s.
//!
//! Parse once, render per width:
//!
//! ```rust
//! use windvane_core::theme::Theme;
//! use windvane_markdown::ProseDocument;
//!
//! let doc = ProseDocument::parse("### Heading\n\nSome **bold** prose.");
//! let lines = doc.render(60, &Theme::default());
//! assert!(!lines.is_empty());
//! ```

mod layout;
mod parse;

use ratatui::text::Line;
use windvane_core::theme::Theme;

pub(crate) use parse::Inline;
pub(crate) use parse::ProseBlock;

/// A parsed prose block, ready to render at any width.
#[derive(Clone, Debug)]
pub struct ProseDocument {
    blocks: Vec<ProseBlock>,
}

impl ProseDocument {
    /// Parses `source` into block form. Parsing never fails; constructs
    /// outside the dialect degrade to their literal text.
    pub fn parse(source: &str) -> Self {
        Self {
            blocks: parse::parse_blocks(source),
        }
    }

    /// Lays the document out as styled lines wrapped to `width` columns.
    ///
    /// Rendering is pure: the same document, width, and theme produce the
    /// same lines.
    pub fn render(&self, width: u16, theme: &Theme) -> Vec<Line<'static>> {
        layout::layout_blocks(&self.blocks, width, theme)
    }
}
