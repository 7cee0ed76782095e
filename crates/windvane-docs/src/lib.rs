//! Terminal documentation page for the windvane wind-resource-assessment
//! dashboard.
//!
//! The page is a fixed, authored sequence of display blocks (title,
//! divider, a captioned lineage-graph image, a strip of tool logos in
//! equal slots, markdown prose, SQL transformation listings, and formula
//! displays) rendered in document order. There is no computation here:
//! the SQL and formulas are display text documenting a pipeline that runs
//! elsewhere (dbt models on a warehouse).
//!
//! - [`page::methodology`] builds the authored document.
//! - [`Document::render`] materializes it for a width, after a fail-fast
//!   check that every referenced image exists under the asset directory.
//! - [`DocumentView`] adds scrolling for the interactive viewer.

pub mod block;
pub mod document;
pub mod layout;
pub mod page;
pub mod view;

pub use block::Block;
pub use block::CodeListing;
pub use block::ImageBlock;
pub use document::Document;
pub use document::RenderError;
pub use document::RenderedDocument;
pub use view::DocumentView;
