//! `windvane-core` provides the display-surface primitives shared by the
//! windvane documentation crates.
//!
//! The documentation page is a fixed sequence of display blocks rendered
//! into a terminal. This crate holds the pieces every block renderer needs:
//!
//! - [`theme::Theme`]: one style per block role.
//! - [`viewport::ViewportState`]: vertical scroll state for the page.
//! - [`render`]: cell-level drawing of styled lines and the scrollbar.
//! - [`wrapping`]: style-preserving word wrap for prose.
//! - [`text::CodeHighlighter`]: the seam highlight backends plug into.
//! - [`assets`]: the asset directory, image-format detection, and the
//!   fail-fast asset errors.
//!
//! Heavier functionality (markdown parsing, the syntect backend, the
//! document model itself) lives in the sibling crates.

pub mod assets;
pub mod render;
pub mod text;
pub mod theme;
pub mod viewport;
pub mod wrapping;
