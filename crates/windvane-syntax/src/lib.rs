//! Syntect backend for the [`CodeHighlighter`] seam.
//!
//! The documentation page tags its listings `sql`; this backend resolves
//! that tag against syntect's bundled syntax definitions and colors each
//! line. Any unknown tag falls back to plain text, so a bad tag can never
//! fail a render.
//!
//! [`CodeHighlighter`]: windvane_core::text::CodeHighlighter

mod highlighter;

pub use highlighter::SyntectHighlighter;
