use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use windvane_core::assets::AssetDir;
use windvane_core::render;
use windvane_core::text::CodeHighlighter;
use windvane_core::theme::Theme;
use windvane_core::viewport::ViewportState;

use crate::document::Document;
use crate::document::RenderError;
use crate::document::RenderedDocument;

/// A scrollable viewer over a rendered [`Document`].
///
/// The document re-renders only when the width changes; scrolling reuses
/// the cached lines. Rendering and drawing are split so the fallible part
/// (asset checks) happens outside the terminal draw closure.
pub struct DocumentView {
    document: Document,
    rendered: Option<RenderedDocument>,
    cached_width: Option<u16>,
    pub state: ViewportState,
}

impl DocumentView {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            rendered: None,
            cached_width: None,
            state: ViewportState::default(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Re-renders the document if `area_width` changed since the last
    /// successful call.
    pub fn ensure_rendered(
        &mut self,
        area_width: u16,
        theme: &Theme,
        highlighter: Option<&dyn CodeHighlighter>,
        assets: &AssetDir,
    ) -> Result<(), RenderError> {
        let width = content_width(area_width);
        if self.cached_width == Some(width) && self.rendered.is_some() {
            return Ok(());
        }
        let rendered = self.document.render(width, theme, highlighter, assets)?;
        self.state.set_content_height(rendered.content_height());
        self.rendered = Some(rendered);
        self.cached_width = Some(width);
        Ok(())
    }

    /// Draws the cached render into `buf`. A view that has never been
    /// rendered draws nothing.
    pub fn render_ref(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let (content_area, scrollbar_x) = if area.width >= 2 {
            (
                Rect::new(area.x, area.y, area.width - 1, area.height),
                Some(area.x + area.width - 1),
            )
        } else {
            (area, None)
        };

        self.state.set_viewport_height(content_area.height);

        let Some(rendered) = &self.rendered else {
            return;
        };

        for row in 0..content_area.height {
            let y = content_area.y + row;
            let idx = (self.state.y as usize).saturating_add(row as usize);
            buf.set_style(
                Rect::new(content_area.x, y, content_area.width, 1),
                theme.text_primary,
            );
            if let Some(line) = rendered.lines().get(idx) {
                render::render_spans_clipped(
                    content_area.x,
                    y,
                    content_area.width,
                    buf,
                    &line.spans,
                    theme.text_primary,
                );
            }
        }

        if let Some(sb_x) = scrollbar_x {
            render::render_scrollbar(
                Rect::new(sb_x, area.y, 1, area.height),
                buf,
                &self.state,
                theme.text_muted,
            );
        }
    }

    pub fn scroll_by(&mut self, delta: i32) {
        self.state.scroll_by(delta);
    }

    pub fn page_up(&mut self) {
        self.state.page_up();
    }

    pub fn page_down(&mut self) {
        self.state.page_down();
    }

    pub fn to_top(&mut self) {
        self.state.to_top();
    }

    pub fn to_bottom(&mut self) {
        self.state.to_bottom();
    }
}

/// Width available for document lines once the scrollbar column is
/// reserved. Must agree between `ensure_rendered` and `render_ref`.
fn content_width(area_width: u16) -> u16 {
    if area_width >= 2 {
        area_width - 1
    } else {
        area_width
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    fn fixture() -> (TempDir, AssetDir, Document) {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("graph.png"), PNG_MAGIC).unwrap();
        let assets = AssetDir::new(dir.path());
        let doc = Document::new()
            .title("Methodology")
            .image("graph.png", Some("lineage"))
            .prose("Some prose that is long enough to wrap at narrow widths.");
        (dir, assets, doc)
    }

    #[test]
    fn rerenders_only_on_width_change() {
        let (_dir, assets, doc) = fixture();
        let theme = Theme::default();
        let mut view = DocumentView::new(doc);

        view.ensure_rendered(40, &theme, None, &assets).unwrap();
        let first = view.rendered.as_ref().unwrap().plain_lines();
        view.ensure_rendered(40, &theme, None, &assets).unwrap();
        assert_eq!(view.rendered.as_ref().unwrap().plain_lines(), first);

        view.ensure_rendered(30, &theme, None, &assets).unwrap();
        assert_ne!(view.rendered.as_ref().unwrap().plain_lines(), first);
    }

    #[test]
    fn draw_clips_to_viewport() {
        let (_dir, assets, doc) = fixture();
        let theme = Theme::default();
        let mut view = DocumentView::new(doc);
        view.ensure_rendered(20, &theme, None, &assets).unwrap();

        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);
        view.render_ref(area, &mut buf, &theme);

        let top_row: String = (0..20)
            .filter_map(|x| buf.cell((x, 0)).map(|c| c.symbol().to_string()))
            .collect();
        assert!(top_row.starts_with("Methodology"));
    }

    #[test]
    fn missing_asset_fails_ensure_not_draw() {
        let (_dir, assets, _) = fixture();
        let doc = Document::new().image("nope.png", None);
        let theme = Theme::default();
        let mut view = DocumentView::new(doc);
        assert!(view.ensure_rendered(40, &theme, None, &assets).is_err());

        // Drawing after a failed render is a no-op, not a panic.
        let area = Rect::new(0, 0, 10, 2);
        let mut buf = Buffer::empty(area);
        view.render_ref(area, &mut buf, &theme);
    }
}
