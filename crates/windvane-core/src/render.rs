use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Span;
use unicode_width::UnicodeWidthChar;

use crate::viewport::ViewportState;

/// Draws `spans` at `(x, y)`, clipped to `max_cols` terminal cells.
///
/// Spans with a default style inherit `fallback_style`. Wide characters
/// that would straddle the clip edge are dropped rather than split.
pub fn render_spans_clipped(
    x: u16,
    y: u16,
    max_cols: u16,
    buf: &mut Buffer,
    spans: &[Span<'static>],
    fallback_style: Style,
) {
    if max_cols == 0 {
        return;
    }

    let max_cols = max_cols as usize;
    let mut out_cols = 0usize;
    let mut dx = 0u16;
    let mut tmp = [0u8; 4];

    for span in spans {
        let style = if span.style == Style::default() {
            fallback_style
        } else {
            span.style
        };
        for ch in span.content.chars() {
            let w = UnicodeWidthChar::width(ch).unwrap_or(0);
            if w == 0 {
                continue;
            }
            if out_cols + w > max_cols {
                return;
            }

            let s = ch.encode_utf8(&mut tmp);
            if let Some(cell) = buf.cell_mut((x + dx, y)) {
                cell.set_style(style);
                cell.set_symbol(s);
            }
            dx += 1;
            out_cols += w;

            if w == 2 {
                if let Some(cell) = buf.cell_mut((x + dx, y)) {
                    cell.set_style(style);
                    cell.set_symbol("");
                }
                dx += 1;
            }
        }
    }
}

/// Draws a one-column scrollbar for `state` into `area`.
///
/// The track is blank when the whole page fits in the viewport.
pub fn render_scrollbar(area: Rect, buf: &mut Buffer, state: &ViewportState, style: Style) {
    buf.set_style(area, style);
    if area.height == 0 {
        return;
    }
    if state.content_h <= state.viewport_h as u32 || state.content_h == 0 {
        for dy in 0..area.height {
            buf.set_stringn(area.x, area.y + dy, " ", 1, style);
        }
        return;
    }

    let track_h = area.height as f64;
    let thumb_h = ((state.viewport_h as f64 / state.content_h as f64) * track_h)
        .round()
        .clamp(1.0, track_h) as u16;

    let max_y = state
        .content_h
        .saturating_sub(state.viewport_h as u32)
        .max(1) as f64;
    let thumb_top = ((state.y as f64 / max_y) * (track_h - thumb_h as f64))
        .round()
        .clamp(0.0, (track_h - thumb_h as f64).max(0.0)) as u16;

    for dy in 0..area.height {
        let ch = if dy >= thumb_top && dy < thumb_top + thumb_h {
            "█"
        } else {
            " "
        };
        buf.set_stringn(area.x, area.y + dy, ch, 1, style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Stylize;
    use ratatui::text::Span;

    fn row_text(buf: &Buffer, y: u16, w: u16) -> String {
        (0..w)
            .filter_map(|x| buf.cell((x, y)).map(|c| c.symbol().to_string()))
            .collect()
    }

    #[test]
    fn clips_at_max_cols() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 10, 1));
        let spans = vec![Span::raw("hello world")];
        render_spans_clipped(0, 0, 5, &mut buf, &spans, Style::default());
        assert_eq!(row_text(&buf, 0, 5), "hello");
        assert_eq!(row_text(&buf, 0, 10).trim_end(), "hello");
    }

    #[test]
    fn default_styled_spans_inherit_fallback() {
        use ratatui::style::Color;

        let mut buf = Buffer::empty(Rect::new(0, 0, 4, 1));
        let fallback = Style::default().red();
        render_spans_clipped(0, 0, 4, &mut buf, &[Span::raw("ab")], fallback);
        let cell = buf.cell((0, 0)).unwrap();
        assert_eq!(cell.fg, Color::Red);
    }

    #[test]
    fn wide_char_is_dropped_at_the_edge() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 4, 1));
        render_spans_clipped(0, 0, 3, &mut buf, &[Span::raw("a你b")], Style::default());
        // "你" occupies cols 1-2; "b" would land past the clip.
        assert_eq!(row_text(&buf, 0, 3), "a你");
    }

    #[test]
    fn scrollbar_is_blank_when_content_fits() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 1, 4));
        let state = ViewportState {
            y: 0,
            viewport_h: 10,
            content_h: 5,
        };
        render_scrollbar(Rect::new(0, 0, 1, 4), &mut buf, &state, Style::default());
        assert_eq!((0..4).map(|y| row_text(&buf, y, 1)).collect::<String>(), "    ");
    }

    #[test]
    fn scrollbar_thumb_tracks_position() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 1, 4));
        let mut state = ViewportState {
            y: 0,
            viewport_h: 10,
            content_h: 40,
        };
        state.to_bottom();
        render_scrollbar(Rect::new(0, 0, 1, 4), &mut buf, &state, Style::default());
        assert_eq!(row_text(&buf, 3, 1), "█");
        assert_eq!(row_text(&buf, 0, 1), " ");
    }
}
