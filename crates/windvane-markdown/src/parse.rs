use pulldown_cmark::Event;
use pulldown_cmark::HeadingLevel;
use pulldown_cmark::Options;
use pulldown_cmark::Parser;
use pulldown_cmark::Tag;
use pulldown_cmark::TagEnd;

/// One styled run of text inside a prose block.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Inline {
    pub text: String,
    pub strong: bool,
    pub emphasis: bool,
    pub code: bool,
}

/// A prose block in document order.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum ProseBlock {
    Heading { level: u8, inlines: Vec<Inline> },
    Paragraph { inlines: Vec<Inline> },
    Bullet { inlines: Vec<Inline> },
    Blank,
}

struct Builder {
    blocks: Vec<ProseBlock>,
    inlines: Vec<Inline>,
    strong: bool,
    emphasis: bool,
    list_depth: usize,
}

impl Builder {
    fn new() -> Self {
        Self {
            blocks: Vec::new(),
            inlines: Vec::new(),
            strong: false,
            emphasis: false,
            list_depth: 0,
        }
    }

    fn push_text(&mut self, text: &str, code: bool) {
        let last_matches = self
            .inlines
            .last()
            .is_some_and(|i| i.strong == self.strong && i.emphasis == self.emphasis && i.code == code);
        if last_matches {
            if let Some(last) = self.inlines.last_mut() {
                last.text.push_str(text);
                return;
            }
        }
        self.inlines.push(Inline {
            text: text.to_string(),
            strong: self.strong,
            emphasis: self.emphasis,
            code,
        });
    }

    fn blank(&mut self) {
        if !matches!(self.blocks.last(), None | Some(ProseBlock::Blank)) {
            self.blocks.push(ProseBlock::Blank);
        }
    }

    fn finish(mut self) -> Vec<ProseBlock> {
        while matches!(self.blocks.last(), Some(ProseBlock::Blank)) {
            self.blocks.pop();
        }
        self.blocks
    }
}

fn heading_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Parses the prose dialect into blocks. Constructs outside the dialect
/// (links, block quotes, fenced code) degrade to their literal text.
pub(crate) fn parse_blocks(source: &str) -> Vec<ProseBlock> {
    let parser = Parser::new_ext(source, Options::empty());
    let mut b = Builder::new();

    for event in parser {
        match event {
            Event::Start(tag) => match tag {
                Tag::Strong => b.strong = true,
                Tag::Emphasis => b.emphasis = true,
                Tag::List(_) => b.list_depth += 1,
                Tag::Paragraph => {
                    // Later paragraphs of a loose list item join the
                    // item's text rather than discarding it.
                    if b.list_depth > 0 && !b.inlines.is_empty() {
                        b.push_text(" ", false);
                    } else {
                        b.inlines.clear();
                    }
                }
                Tag::Heading { .. } | Tag::Item | Tag::CodeBlock(_) => {
                    b.inlines.clear();
                }
                _ => {}
            },
            Event::End(tag) => match tag {
                TagEnd::Strong => b.strong = false,
                TagEnd::Emphasis => b.emphasis = false,
                TagEnd::Heading(level) => {
                    let inlines = std::mem::take(&mut b.inlines);
                    b.blocks.push(ProseBlock::Heading {
                        level: heading_level(level),
                        inlines,
                    });
                    b.blank();
                }
                TagEnd::Paragraph | TagEnd::CodeBlock => {
                    let inlines = std::mem::take(&mut b.inlines);
                    if b.list_depth > 0 {
                        // A paragraph inside a list item; the Item end
                        // emits the block.
                        b.inlines = inlines;
                    } else if !inlines.is_empty() {
                        b.blocks.push(ProseBlock::Paragraph { inlines });
                        b.blank();
                    }
                }
                TagEnd::Item => {
                    let inlines = std::mem::take(&mut b.inlines);
                    if !inlines.is_empty() {
                        b.blocks.push(ProseBlock::Bullet { inlines });
                    }
                }
                TagEnd::List(_) => {
                    b.list_depth = b.list_depth.saturating_sub(1);
                    if b.list_depth == 0 {
                        b.blank();
                    }
                }
                _ => {}
            },
            Event::Text(text) => b.push_text(&text, false),
            Event::Code(text) => b.push_text(&text, true),
            Event::SoftBreak | Event::HardBreak => b.push_text(" ", false),
            Event::Rule => b.blank(),
            _ => {}
        }
    }

    b.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_levels_and_text() {
        let blocks = parse_blocks("### Tools\n\n#### Availability");
        assert_eq!(
            blocks,
            vec![
                ProseBlock::Heading {
                    level: 3,
                    inlines: vec![Inline {
                        text: "Tools".into(),
                        ..Inline::default()
                    }],
                },
                ProseBlock::Blank,
                ProseBlock::Heading {
                    level: 4,
                    inlines: vec![Inline {
                        text: "Availability".into(),
                        ..Inline::default()
                    }],
                },
            ]
        );
    }

    #[test]
    fn strong_runs_are_flagged() {
        let blocks = parse_blocks("plain **bold** tail");
        let ProseBlock::Paragraph { inlines } = &blocks[0] else {
            panic!("expected paragraph");
        };
        assert_eq!(inlines.len(), 3);
        assert!(!inlines[0].strong);
        assert!(inlines[1].strong);
        assert_eq!(inlines[1].text, "bold");
        assert_eq!(inlines[2].text, " tail");
    }

    #[test]
    fn bullets_become_one_block_each() {
        let blocks = parse_blocks("- one\n- two\n");
        let bullets: Vec<_> = blocks
            .iter()
            .filter(|b| matches!(b, ProseBlock::Bullet { .. }))
            .collect();
        assert_eq!(bullets.len(), 2);
    }

    #[test]
    fn soft_breaks_join_with_spaces() {
        let blocks = parse_blocks("first\nsecond");
        let ProseBlock::Paragraph { inlines } = &blocks[0] else {
            panic!("expected paragraph");
        };
        assert_eq!(inlines[0].text, "first second");
    }

    #[test]
    fn inline_code_is_flagged() {
        let blocks = parse_blocks("run `dbt build` now");
        let ProseBlock::Paragraph { inlines } = &blocks[0] else {
            panic!("expected paragraph");
        };
        assert!(inlines.iter().any(|i| i.code && i.text == "dbt build"));
    }

    #[test]
    fn trailing_blank_is_trimmed() {
        let blocks = parse_blocks("only paragraph\n");
        assert_eq!(blocks.len(), 1);
    }
}
