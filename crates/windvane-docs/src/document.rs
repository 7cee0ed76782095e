//! The document model and its renderer.
//!
//! A [`Document`] is a fixed sequence of [`Block`]s assembled at authoring
//! time. Rendering is a single linear pass: assets are verified up front
//! (fail-fast), then each block is routed to its rendering primitive and
//! materialized into styled lines for the terminal surface.

use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use thiserror::Error;
use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;
use windvane_core::assets::AssetDir;
use windvane_core::assets::AssetError;
use windvane_core::assets::ImageInfo;
use windvane_core::text::CodeHighlighter;
use windvane_core::theme::Theme;
use windvane_core::wrapping::Fragment;
use windvane_core::wrapping::wrap_fragments;
use windvane_markdown::ProseDocument;

use crate::block::Block;
use crate::block::CodeListing;
use crate::block::ImageBlock;
use crate::layout::partition_row;

const CODE_INDENT: usize = 4;
const FORMULA_INDENT: usize = 4;

/// Errors surfaced by [`Document::render`].
#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Asset(#[from] AssetError),
}

/// An ordered, immutable sequence of display blocks.
#[derive(Clone, Debug, Default)]
pub struct Document {
    blocks: Vec<Block>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, text: impl Into<String>) -> Self {
        self.blocks.push(Block::Title(text.into()));
        self
    }

    pub fn divider(mut self) -> Self {
        self.blocks.push(Block::Divider);
        self
    }

    pub fn image(mut self, source: impl Into<String>, caption: Option<&str>) -> Self {
        self.blocks.push(Block::Image(ImageBlock {
            source: source.into(),
            caption: caption.map(str::to_string),
        }));
        self
    }

    pub fn image_row<I, S>(mut self, sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.blocks
            .push(Block::ImageRow(sources.into_iter().map(Into::into).collect()));
        self
    }

    pub fn prose(mut self, markdown: impl Into<String>) -> Self {
        self.blocks.push(Block::Prose(markdown.into()));
        self
    }

    pub fn code(mut self, language: Option<&str>, source: impl Into<String>) -> Self {
        self.blocks.push(Block::Code(CodeListing {
            language: language.map(str::to_string),
            source: source.into(),
        }));
        self
    }

    pub fn formula(mut self, markup: impl Into<String>) -> Self {
        self.blocks.push(Block::Formula(markup.into()));
        self
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Every referenced image file name, in authored order.
    pub fn image_sources(&self) -> Vec<&str> {
        let mut out = Vec::new();
        for block in &self.blocks {
            match block {
                Block::Image(image) => out.push(image.source.as_str()),
                Block::ImageRow(sources) => out.extend(sources.iter().map(String::as_str)),
                _ => {}
            }
        }
        out
    }

    /// Checks every referenced image in authored order, stopping at the
    /// first bad one.
    pub fn verify_assets(&self, assets: &AssetDir) -> Result<(), AssetError> {
        for source in self.image_sources() {
            assets.load_image(source)?;
        }
        Ok(())
    }

    /// Renders the whole document at `width` columns.
    ///
    /// The render is stateless and idempotent: the same inputs and asset
    /// directory contents produce identical output. Any bad asset aborts
    /// before a single line is produced.
    pub fn render(
        &self,
        width: u16,
        theme: &Theme,
        highlighter: Option<&dyn CodeHighlighter>,
        assets: &AssetDir,
    ) -> Result<RenderedDocument, RenderError> {
        // Fail-fast: no line is produced unless every asset checks out.
        self.verify_assets(assets)?;

        if width == 0 {
            return Ok(RenderedDocument { lines: Vec::new() });
        }

        let mut lines: Vec<Line<'static>> = Vec::new();
        for block in &self.blocks {
            match block {
                Block::Title(text) => layout_title(&mut lines, text, theme),
                Block::Divider => layout_divider(&mut lines, width, theme),
                Block::Image(image) => {
                    let info = assets.load_image(&image.source)?;
                    layout_image(&mut lines, &info, image.caption.as_deref(), width, theme);
                }
                Block::ImageRow(sources) => {
                    let infos = sources
                        .iter()
                        .map(|source| assets.load_image(source))
                        .collect::<Result<Vec<ImageInfo>, _>>()?;
                    layout_image_row(&mut lines, &infos, width, theme);
                }
                Block::Prose(markdown) => {
                    lines.extend(ProseDocument::parse(markdown).render(width, theme));
                }
                Block::Code(listing) => layout_code(&mut lines, listing, theme, highlighter),
                Block::Formula(markup) => layout_formula(&mut lines, markup, theme),
            }
            lines.push(Line::default());
        }

        while lines.last().is_some_and(|l| l.spans.is_empty()) {
            lines.pop();
        }

        Ok(RenderedDocument { lines })
    }
}

/// A fully materialized render, ready to draw or dump.
#[derive(Clone, Debug)]
pub struct RenderedDocument {
    lines: Vec<Line<'static>>,
}

impl RenderedDocument {
    pub fn lines(&self) -> &[Line<'static>] {
        &self.lines
    }

    pub fn content_height(&self) -> u32 {
        self.lines.len() as u32
    }

    /// The render with styles stripped, one `String` per line.
    pub fn plain_lines(&self) -> Vec<String> {
        self.lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }
}

fn layout_title(out: &mut Vec<Line<'static>>, text: &str, theme: &Theme) {
    out.push(Line::from(Span::styled(text.to_string(), theme.title)));
}

fn layout_divider(out: &mut Vec<Line<'static>>, width: u16, theme: &Theme) {
    out.push(Line::from(Span::styled(
        "─".repeat(width as usize),
        theme.divider,
    )));
}

fn layout_image(
    out: &mut Vec<Line<'static>>,
    info: &ImageInfo,
    caption: Option<&str>,
    width: u16,
    theme: &Theme,
) {
    let width = width as usize;
    if width < 8 {
        out.push(Line::from(Span::styled(
            clip(&info.name, width),
            theme.text_primary,
        )));
    } else {
        let inner = width - 4;
        out.push(frame_edge('┌', '┐', width, theme));
        out.push(frame_line(&info.name, theme.text_primary, inner, theme));
        out.push(frame_line(
            &format!("{} image, {}", info.format.label(), info.display_size()),
            theme.text_muted,
            inner,
            theme,
        ));
        out.push(frame_edge('└', '┘', width, theme));
    }

    if let Some(caption) = caption {
        let caption_frags = [Fragment::new(caption, theme.caption)];
        for line in wrap_fragments(&caption_frags, width as u16, 0) {
            let text: String = line.iter().map(|f| f.text.as_str()).collect();
            let pad = width.saturating_sub(UnicodeWidthStr::width(text.as_str())) / 2;
            out.push(Line::from(vec![
                Span::raw(" ".repeat(pad)),
                Span::styled(text, theme.caption),
            ]));
        }
    }
}

fn layout_image_row(out: &mut Vec<Line<'static>>, infos: &[ImageInfo], width: u16, theme: &Theme) {
    if infos.is_empty() {
        return;
    }
    let slots = partition_row(width, infos.len());

    let mut top: Vec<Span<'static>> = Vec::new();
    let mut mid: Vec<Span<'static>> = Vec::new();
    let mut bottom: Vec<Span<'static>> = Vec::new();

    for (info, (_, w)) in infos.iter().zip(&slots) {
        let w = *w as usize;
        if w < 4 {
            top.push(Span::raw(" ".repeat(w)));
            mid.push(Span::styled(clip(&info.name, w), theme.text_muted));
            bottom.push(Span::raw(" ".repeat(w)));
            continue;
        }
        let inner = w - 2;
        top.push(Span::styled(
            format!("┌{}┐", "─".repeat(inner)),
            theme.image_frame,
        ));
        mid.push(Span::styled("│".to_string(), theme.image_frame));
        mid.push(Span::styled(center(&info.name, inner), theme.text_muted));
        mid.push(Span::styled("│".to_string(), theme.image_frame));
        bottom.push(Span::styled(
            format!("└{}┘", "─".repeat(inner)),
            theme.image_frame,
        ));
    }

    out.push(Line::from(top));
    out.push(Line::from(mid));
    out.push(Line::from(bottom));
}

fn layout_code(
    out: &mut Vec<Line<'static>>,
    listing: &CodeListing,
    theme: &Theme,
    highlighter: Option<&dyn CodeHighlighter>,
) {
    let highlighted =
        highlighter.map(|hi| hi.highlight(listing.language.as_deref(), &listing.source));
    let indent = " ".repeat(CODE_INDENT);

    for (idx, raw) in listing.source.split('\n').enumerate() {
        let mut spans: Vec<Span<'static>> = vec![Span::raw(indent.clone())];
        let mut content = highlighted
            .as_ref()
            .and_then(|rows| rows.get(idx).cloned())
            .unwrap_or_else(|| vec![Span::styled(raw.to_string(), theme.code)]);
        for span in &mut content {
            span.style = theme.code.patch(span.style);
        }
        spans.extend(content);
        out.push(Line::from(spans));
    }
}

fn layout_formula(out: &mut Vec<Line<'static>>, markup: &str, theme: &Theme) {
    let indent = " ".repeat(FORMULA_INDENT);
    for raw in markup.split('\n') {
        out.push(Line::from(vec![
            Span::raw(indent.clone()),
            Span::styled(raw.to_string(), theme.formula),
        ]));
    }
}

fn frame_edge(left: char, right: char, width: usize, theme: &Theme) -> Line<'static> {
    Line::from(Span::styled(
        format!("{left}{}{right}", "─".repeat(width - 2)),
        theme.image_frame,
    ))
}

fn frame_line(content: &str, style: Style, inner: usize, theme: &Theme) -> Line<'static> {
    let clipped = clip(content, inner);
    let pad = inner.saturating_sub(UnicodeWidthStr::width(clipped.as_str()));
    Line::from(vec![
        Span::styled("│ ".to_string(), theme.image_frame),
        Span::styled(clipped, style),
        Span::raw(" ".repeat(pad)),
        Span::styled(" │".to_string(), theme.image_frame),
    ])
}

/// Clips `text` to `max` cells, marking truncation with an ellipsis.
fn clip(text: &str, max: usize) -> String {
    if UnicodeWidthStr::width(text) <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }

    let budget = max - 1;
    let mut used = 0usize;
    let mut out = String::new();
    for ch in text.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > budget {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

/// Centers `text` in `width` cells, clipping when it does not fit.
fn center(text: &str, width: usize) -> String {
    let clipped = clip(text, width);
    let text_w = UnicodeWidthStr::width(clipped.as_str());
    let left = width.saturating_sub(text_w) / 2;
    let right = width.saturating_sub(text_w + left);
    format!("{}{}{}", " ".repeat(left), clipped, " ".repeat(right))
}
