use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use windvane_core::theme::Theme;
use windvane_core::wrapping::Fragment;
use windvane_core::wrapping::wrap_fragments;

use crate::Inline;
use crate::ProseBlock;

const BULLET: &str = "• ";
const BULLET_HANG: u16 = 2;

/// Lays parsed blocks out as wrapped, styled lines.
pub(crate) fn layout_blocks(blocks: &[ProseBlock], width: u16, theme: &Theme) -> Vec<Line<'static>> {
    let mut out: Vec<Line<'static>> = Vec::new();

    for block in blocks {
        match block {
            ProseBlock::Heading { level, inlines } => {
                let base = if *level <= 3 {
                    theme.heading
                } else {
                    theme.subheading
                };
                push_wrapped(&mut out, &fragments(inlines, base, theme), width, 0);
            }
            ProseBlock::Paragraph { inlines } => {
                push_wrapped(&mut out, &fragments(inlines, theme.text_primary, theme), width, 0);
            }
            ProseBlock::Bullet { inlines } => {
                let mut frags = vec![Fragment::new(BULLET, theme.text_primary)];
                frags.extend(fragments(inlines, theme.text_primary, theme));
                push_wrapped(&mut out, &frags, width, BULLET_HANG);
            }
            ProseBlock::Blank => out.push(Line::default()),
        }
    }

    out
}

fn fragments(inlines: &[Inline], base: Style, theme: &Theme) -> Vec<Fragment> {
    inlines
        .iter()
        .map(|inline| {
            let style = if inline.code {
                theme.code
            } else {
                let mut style = base;
                if inline.strong {
                    style = style.add_modifier(Modifier::BOLD);
                }
                if inline.emphasis {
                    style = style.add_modifier(Modifier::ITALIC);
                }
                style
            };
            Fragment::new(inline.text.clone(), style)
        })
        .collect()
}

fn push_wrapped(out: &mut Vec<Line<'static>>, frags: &[Fragment], width: u16, hang: u16) {
    for line in wrap_fragments(frags, width, hang) {
        let spans: Vec<Span<'static>> = line
            .into_iter()
            .map(|f| Span::styled(f.text, f.style))
            .collect();
        out.push(Line::from(spans));
    }
}
