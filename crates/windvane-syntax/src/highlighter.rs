use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Span;
use syntect::easy::HighlightLines;
use syntect::highlighting::FontStyle;
use syntect::highlighting::Style as SynStyle;
use syntect::highlighting::Theme;
use syntect::highlighting::ThemeSet;
use syntect::parsing::SyntaxReference;
use syntect::parsing::SyntaxSet;
use windvane_core::text::CodeHighlighter;

const DEFAULT_THEME: &str = "base16-ocean.dark";

/// Highlights code listings with syntect's bundled syntaxes.
///
/// Construction loads the syntax and theme sets once; keep one instance
/// for the lifetime of the viewer.
pub struct SyntectHighlighter {
    syntax_set: SyntaxSet,
    theme: Theme,
}

impl SyntectHighlighter {
    pub fn new() -> Self {
        Self::with_theme(DEFAULT_THEME)
    }

    /// Uses the named bundled theme, falling back to any available theme
    /// when the name is unknown.
    pub fn with_theme(name: &str) -> Self {
        let syntax_set = SyntaxSet::load_defaults_newlines();
        let theme_set = ThemeSet::load_defaults();
        let theme = theme_set
            .themes
            .get(name)
            .cloned()
            .or_else(|| theme_set.themes.values().next().cloned())
            .unwrap_or_default();
        Self { syntax_set, theme }
    }

    fn syntax_for(&self, language: Option<&str>) -> &SyntaxReference {
        if let Some(lang) = language {
            // The page's tags are token names ("sql"), so try those
            // before extensions.
            if let Some(syntax) = self.syntax_set.find_syntax_by_token(lang) {
                return syntax;
            }
            if let Some(syntax) = self.syntax_set.find_syntax_by_extension(lang) {
                return syntax;
            }
        }
        self.syntax_set.find_syntax_plain_text()
    }
}

impl Default for SyntectHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeHighlighter for SyntectHighlighter {
    fn highlight(&self, language: Option<&str>, source: &str) -> Vec<Vec<Span<'static>>> {
        let syntax = self.syntax_for(language);
        let mut highlighter = HighlightLines::new(syntax, &self.theme);

        source
            .split('\n')
            .map(|line| {
                let regions = highlighter
                    .highlight_line(line, &self.syntax_set)
                    .unwrap_or_default();
                let mut spans: Vec<Span<'static>> = regions
                    .into_iter()
                    .filter(|(_, s)| !s.is_empty())
                    .map(|(style, s)| Span::styled(s.to_string(), convert_style(style)))
                    .collect();
                if spans.is_empty() {
                    spans.push(Span::raw(line.to_string()));
                }
                spans
            })
            .collect()
    }
}

fn convert_style(s: SynStyle) -> Style {
    let mut out = Style::default().fg(Color::Rgb(s.foreground.r, s.foreground.g, s.foreground.b));

    if s.font_style.contains(FontStyle::BOLD) {
        out = out.add_modifier(Modifier::BOLD);
    }
    if s.font_style.contains(FontStyle::ITALIC) {
        out = out.add_modifier(Modifier::ITALIC);
    }
    if s.font_style.contains(FontStyle::UNDERLINE) {
        out = out.add_modifier(Modifier::UNDERLINED);
    }

    out
}
