use ratatui::style::Style;
use unicode_width::UnicodeWidthStr;

/// One styled run of prose text.
///
/// Prose lines are sequences of fragments; wrapping must keep each
/// fragment's style attached to whatever line its words end up on.
#[derive(Clone, Debug, PartialEq)]
pub struct Fragment {
    pub text: String,
    pub style: Style,
}

impl Fragment {
    pub fn new(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    pub fn width(&self) -> usize {
        UnicodeWidthStr::width(self.text.as_str())
    }
}

/// Word-wraps `fragments` to `width` columns.
///
/// Style boundaries are preserved across breaks. Lines after the first are
/// prefixed with `hang` spaces (used for list-item continuations). A word
/// longer than a whole line is hard-broken at the width. `width == 0`
/// disables wrapping and returns the input as a single line.
pub fn wrap_fragments(fragments: &[Fragment], width: u16, hang: u16) -> Vec<Vec<Fragment>> {
    if width == 0 {
        return vec![merge_adjacent(fragments.to_vec())];
    }

    let max_cols = width as usize;
    let hang = (hang as usize).min(max_cols.saturating_sub(1));

    let mut out: Vec<Vec<Fragment>> = Vec::new();
    let mut line: Vec<Fragment> = Vec::new();
    let mut line_cols = 0usize;

    let flush = |line: &mut Vec<Fragment>, line_cols: &mut usize, out: &mut Vec<Vec<Fragment>>| {
        trim_trailing_ws(line);
        out.push(merge_adjacent(std::mem::take(line)));
        *line_cols = 0;
    };

    for token in tokenize(fragments) {
        let token_w = token.width();
        let at_line_start = line_cols == indent_cols(&out, hang);

        if token.is_ws {
            if at_line_start {
                continue;
            }
            push_token(&mut line, &mut line_cols, token.frag);
            continue;
        }

        if line_cols + token_w > max_cols && !at_line_start {
            flush(&mut line, &mut line_cols, &mut out);
            start_line(&mut line, &mut line_cols, hang);
        }

        if line_cols + token_w <= max_cols {
            push_token(&mut line, &mut line_cols, token.frag);
            continue;
        }

        // The word alone exceeds the line: hard-break it at the width.
        let mut rest = token.frag;
        loop {
            let room = max_cols.saturating_sub(line_cols).max(1);
            let (head, tail) = split_at_cols(&rest.text, room);
            push_token(
                &mut line,
                &mut line_cols,
                Fragment::new(head, rest.style),
            );
            match tail {
                Some(tail) => {
                    flush(&mut line, &mut line_cols, &mut out);
                    start_line(&mut line, &mut line_cols, hang);
                    rest = Fragment::new(tail, rest.style);
                }
                None => break,
            }
        }
    }

    trim_trailing_ws(&mut line);
    if !line.is_empty() || out.is_empty() {
        out.push(merge_adjacent(line));
    }
    out
}

struct Token {
    frag: Fragment,
    is_ws: bool,
}

impl Token {
    fn width(&self) -> usize {
        self.frag.width()
    }
}

/// Splits fragments into alternating word/whitespace tokens, each carrying
/// its source style.
fn tokenize(fragments: &[Fragment]) -> Vec<Token> {
    let mut out = Vec::new();
    for frag in fragments {
        let mut current = String::new();
        let mut current_ws: Option<bool> = None;
        for ch in frag.text.chars() {
            let ws = ch.is_whitespace();
            if current_ws.is_some_and(|prev| prev != ws) {
                out.push(Token {
                    frag: Fragment::new(std::mem::take(&mut current), frag.style),
                    is_ws: current_ws == Some(true),
                });
            }
            current_ws = Some(ws);
            current.push(if ch == '\t' { ' ' } else { ch });
        }
        if !current.is_empty() {
            out.push(Token {
                frag: Fragment::new(current, frag.style),
                is_ws: current_ws == Some(true),
            });
        }
    }
    out
}

fn start_line(line: &mut Vec<Fragment>, line_cols: &mut usize, hang: usize) {
    if hang > 0 {
        line.push(Fragment::new(" ".repeat(hang), Style::default()));
        *line_cols = hang;
    }
}

fn indent_cols(out: &[Vec<Fragment>], hang: usize) -> usize {
    if out.is_empty() { 0 } else { hang }
}

fn push_token(line: &mut Vec<Fragment>, line_cols: &mut usize, frag: Fragment) {
    *line_cols += frag.width();
    line.push(frag);
}

fn trim_trailing_ws(line: &mut Vec<Fragment>) {
    while let Some(last) = line.last_mut() {
        let trimmed = last.text.trim_end();
        if trimmed.len() == last.text.len() {
            break;
        }
        if trimmed.is_empty() {
            line.pop();
        } else {
            last.text.truncate(trimmed.len());
            break;
        }
    }
}

fn merge_adjacent(line: Vec<Fragment>) -> Vec<Fragment> {
    let mut out: Vec<Fragment> = Vec::new();
    for frag in line {
        match out.last_mut() {
            Some(prev) if prev.style == frag.style => prev.text.push_str(&frag.text),
            _ => out.push(frag),
        }
    }
    out
}

/// Splits `text` so the head occupies at most `cols` cells. Returns the
/// remainder when the text did not fit.
fn split_at_cols(text: &str, cols: usize) -> (String, Option<String>) {
    use unicode_width::UnicodeWidthChar;

    let mut used = 0usize;
    for (idx, ch) in text.char_indices() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > cols && idx > 0 {
            return (text[..idx].to_string(), Some(text[idx..].to_string()));
        }
        if used + w > cols {
            // A single cell cannot hold this char; take it anyway to
            // guarantee progress.
            let next = idx + ch.len_utf8();
            let tail = (next < text.len()).then(|| text[next..].to_string());
            return (text[..next].to_string(), tail);
        }
        used += w;
    }
    (text.to_string(), None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Stylize;

    fn plain(lines: &[Vec<Fragment>]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.iter().map(|f| f.text.as_str()).collect())
            .collect()
    }

    #[test]
    fn wraps_at_word_boundaries() {
        let frags = [Fragment::new("hello brave new world", Style::default())];
        let lines = wrap_fragments(&frags, 11, 0);
        assert_eq!(plain(&lines), vec!["hello brave", "new world"]);
    }

    #[test]
    fn styles_survive_the_break() {
        let bold = Style::default().bold();
        let frags = [
            Fragment::new("plain ", Style::default()),
            Fragment::new("boldword", bold),
        ];
        let lines = wrap_fragments(&frags, 6, 0);
        assert_eq!(plain(&lines), vec!["plain", "boldwo", "rd"]);
        assert_eq!(lines[1][0].style, bold);
        assert_eq!(lines[2][0].style, bold);
    }

    #[test]
    fn hang_indent_applies_to_continuation_lines() {
        let frags = [Fragment::new("alpha beta gamma", Style::default())];
        let lines = wrap_fragments(&frags, 7, 2);
        assert_eq!(plain(&lines), vec!["alpha", "  beta", "  gamma"]);
    }

    #[test]
    fn zero_width_disables_wrapping() {
        let frags = [Fragment::new("one two three", Style::default())];
        let lines = wrap_fragments(&frags, 0, 0);
        assert_eq!(plain(&lines), vec!["one two three"]);
    }

    #[test]
    fn merges_same_style_fragments() {
        let frags = [
            Fragment::new("ab", Style::default()),
            Fragment::new("cd", Style::default()),
        ];
        let lines = wrap_fragments(&frags, 10, 0);
        assert_eq!(lines[0].len(), 1);
        assert_eq!(lines[0][0].text, "abcd");
    }

    #[test]
    fn empty_input_yields_one_empty_line() {
        let lines = wrap_fragments(&[], 10, 0);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].is_empty());
    }
}
