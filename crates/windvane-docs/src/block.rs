/// One displayable unit of the page, in authored order.
///
/// Blocks never reference each other; the document is purely positional.
#[derive(Clone, Debug)]
pub enum Block {
    /// The page title.
    Title(String),
    /// A full-width horizontal rule.
    Divider,
    /// A single image, optionally captioned.
    Image(ImageBlock),
    /// A strip of images shown in equal horizontal slots.
    ImageRow(Vec<String>),
    /// Prose in the markdown dialect.
    Prose(String),
    /// A literal code listing. The text is display-only, never executed.
    Code(CodeListing),
    /// Literal typeset markup. Rendered as-is, never evaluated.
    Formula(String),
}

#[derive(Clone, Debug)]
pub struct ImageBlock {
    /// File name under the asset directory.
    pub source: String,
    pub caption: Option<String>,
}

#[derive(Clone, Debug)]
pub struct CodeListing {
    /// Highlighting tag (e.g. `sql`); `None` renders plain.
    pub language: Option<String>,
    pub source: String,
}
