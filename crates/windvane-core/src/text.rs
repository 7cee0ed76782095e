use ratatui::style::Style;
use ratatui::text::Span;

/// Seam between the document renderer and highlight backends.
///
/// The page's code listings go through this trait so the syntect backend
/// can live in its own crate. Implementations split `source` on `\n` and
/// return one span row per line; the renderer relies on the row count
/// matching the line count.
pub trait CodeHighlighter {
    /// Highlights a whole listing. `language` is the authored tag
    /// (e.g. `sql`); `None` means plain text.
    fn highlight(&self, language: Option<&str>, source: &str) -> Vec<Vec<Span<'static>>>;
}

/// Pass-through backend: every line becomes one unstyled span.
pub struct NoHighlight;

impl CodeHighlighter for NoHighlight {
    fn highlight(&self, _language: Option<&str>, source: &str) -> Vec<Vec<Span<'static>>> {
        source
            .split('\n')
            .map(|l| vec![Span::styled(l.to_string(), Style::default())])
            .collect()
    }
}
