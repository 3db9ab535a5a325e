//! Line lexer and block tree builder.

use super::inline::{Inline, parse_inlines};

/// Fence marker for code blocks.
const FENCE: &str = "```";

/// Block level node of a parsed document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// ATX heading, level 1 through 3.
    Heading { level: u8, content: Vec<Inline> },
    /// Fenced code block with optional language tag.
    CodeBlock {
        language: Option<String>,
        code: String,
    },
    /// Run of consecutive `- item` lines.
    List { items: Vec<Vec<Inline>> },
    /// Run of consecutive `> text` lines.
    Blockquote { lines: Vec<Vec<Inline>> },
    /// Run of consecutive plain text lines.
    Paragraph { lines: Vec<Vec<Inline>> },
}

/// Classified source line.
#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    Blank,
    Heading(u8, &'a str),
    Fence(&'a str),
    ListItem(&'a str),
    Quote(&'a str),
    Text(&'a str),
}

impl<'a> Line<'a> {
    fn classify(line: &'a str) -> Self {
        if line.trim().is_empty() {
            return Line::Blank;
        }

        if let Some(rest) = line.trim_start().strip_prefix(FENCE) {
            return Line::Fence(rest);
        }

        // Most specific prefix first so `## x` never reads as `# `
        for (level, prefix) in [(3, "### "), (2, "## "), (1, "# ")] {
            if let Some(rest) = line.strip_prefix(prefix) {
                return Line::Heading(level, rest.trim_end());
            }
        }

        if let Some(rest) = list_item(line) {
            return Line::ListItem(rest);
        }

        if let Some(rest) = line.strip_prefix("> ") {
            return Line::Quote(rest);
        }

        Line::Text(line)
    }
}

/// Matches optional indentation, `-`, at least one space or tab, content.
fn list_item(line: &str) -> Option<&str> {
    let rest = line.trim_start().strip_prefix('-')?;
    let content = rest.trim_start_matches([' ', '\t']);
    if content.len() == rest.len() {
        return None;
    }
    Some(content)
}

/// Group that the next line of the same kind extends.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Open {
    Paragraph,
    List,
    Quote,
}

/// Parses document content into a sequence of blocks.
///
/// Lines are classified first, then consecutive lines of the same kind are
/// grouped: plain text into paragraphs, list items into a list, quote lines
/// into one blockquote. Blank lines and headings end any open group. Fenced
/// code is collected verbatim up to the closing fence; an opener without a
/// closing fence is treated as plain text. Text after a closing fence marker
/// starts a new paragraph.
///
/// # Arguments
///
/// * `content`: Full document source
///
/// # Returns
///
/// Blocks in document order
pub fn parse_blocks(content: &str) -> Vec<Block> {
    let lines: Vec<&str> = content
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();

    let mut blocks = Vec::new();
    let mut open: Option<Open> = None;
    let mut i = 0;

    while i < lines.len() {
        let line = Line::classify(lines[i]);
        i += 1;

        match line {
            Line::Blank => open = None,
            Line::Heading(level, text) => {
                blocks.push(Block::Heading {
                    level,
                    content: parse_inlines(text),
                });
                open = None;
            }
            Line::Fence(rest) => match fenced_code(rest, &lines[i..]) {
                Some((block, consumed, trailing)) => {
                    blocks.push(block);
                    open = None;
                    i += consumed;

                    let trailing = trailing.trim();
                    if !trailing.is_empty() {
                        push_grouped(&mut blocks, &mut open, Open::Paragraph, trailing);
                    }
                }
                None => push_grouped(&mut blocks, &mut open, Open::Paragraph, lines[i - 1]),
            },
            Line::ListItem(text) => push_grouped(&mut blocks, &mut open, Open::List, text),
            Line::Quote(text) => push_grouped(&mut blocks, &mut open, Open::Quote, text),
            Line::Text(text) => push_grouped(&mut blocks, &mut open, Open::Paragraph, text),
        }
    }

    blocks
}

/// Appends a line to the open group of the same kind, or starts a new one.
fn push_grouped(blocks: &mut Vec<Block>, open: &mut Option<Open>, kind: Open, text: &str) {
    let line = parse_inlines(text);

    if *open == Some(kind) {
        match blocks.last_mut() {
            Some(Block::Paragraph { lines }) | Some(Block::Blockquote { lines }) => {
                lines.push(line);
                return;
            }
            Some(Block::List { items }) => {
                items.push(line);
                return;
            }
            _ => {}
        }
    }

    blocks.push(match kind {
        Open::Paragraph => Block::Paragraph { lines: vec![line] },
        Open::List => Block::List { items: vec![line] },
        Open::Quote => Block::Blockquote { lines: vec![line] },
    });
    *open = Some(kind);
}

/// Collects a fenced code block.
///
/// `opener` is the text after the opening fence marker. When it contains a
/// second marker the block is a single line (```` ```code``` ````).
/// Otherwise the opener is the language tag and the body runs until the
/// next line starting with a fence marker.
///
/// # Returns
///
/// The block, the number of lines consumed after the opener, and the text
/// following the closing marker on its line. None when the fence is never
/// closed
fn fenced_code<'a>(opener: &'a str, following: &[&'a str]) -> Option<(Block, usize, &'a str)> {
    if let Some(end) = opener.find(FENCE) {
        let code = &opener[..end];
        if code.is_empty() {
            return None;
        }
        return Some((
            Block::CodeBlock {
                language: None,
                code: code.to_string(),
            },
            0,
            &opener[end + FENCE.len()..],
        ));
    }

    let close = following
        .iter()
        .position(|line| line.trim_start().starts_with(FENCE))?;
    let trailing = &following[close].trim_start()[FENCE.len()..];

    let language = opener.trim();
    let language = (!language.is_empty()).then(|| language.to_string());

    Some((
        Block::CodeBlock {
            language,
            code: following[..close].join("\n"),
        },
        close + 1,
        trailing,
    ))
}
