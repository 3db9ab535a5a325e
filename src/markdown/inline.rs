//! Inline tokenizer for emphasis, code spans, links and images.

/// Inline content node.
///
/// Produced by [`parse_inlines`] for a single line of text. Inline
/// constructs never span lines, so every node tree belongs to exactly one
/// source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    /// Literal text, unescaped.
    Text(String),
    /// `**content**`
    Strong(Vec<Inline>),
    /// `*content*`
    Emphasis(Vec<Inline>),
    /// Backtick delimited code, kept verbatim.
    Code(String),
    /// `[content](href)`
    Link { href: String, content: Vec<Inline> },
    /// `![alt](src)`
    Image { src: String, alt: String },
}

use std::collections::HashMap;

/// Nesting limit for links, bold and italic.
///
/// Delimiters deeper than this are kept as literal text, which bounds both
/// parser and renderer recursion.
const MAX_DEPTH: usize = 32;

/// Parses one line of text into inline nodes.
///
/// Constructs are recognised left to right. At any position a code span is
/// tried first, then image, link, bold and italic. Delimiters that do not
/// close are kept as literal text, so parsing never fails.
///
/// # Arguments
///
/// * `text`: Single line of source text
///
/// # Returns
///
/// Inline nodes with adjacent text merged
pub fn parse_inlines(text: &str) -> Vec<Inline> {
    Scanner::new(text, 0).parse()
}

/// One nesting level of the inline parser.
///
/// Closing positions are indexed up front in a single pass, so every
/// opening delimiter is resolved without rescanning the rest of the line.
struct Scanner<'a> {
    text: &'a str,
    depth: usize,
    /// `[` offset to the offset of its balancing `]`.
    brackets: HashMap<usize, usize>,
    /// Backtick run offset to the next run of the same length.
    code_spans: HashMap<usize, usize>,
    /// Offset of the next `]` at or after each offset, `text.len()` if none.
    next_bracket: Vec<usize>,
    /// Offset of the next `)` at or after each offset, `text.len()` if none.
    next_paren: Vec<usize>,
}

impl<'a> Scanner<'a> {
    fn new(text: &'a str, depth: usize) -> Self {
        let bytes = text.as_bytes();

        let mut brackets = HashMap::new();
        let mut open = Vec::new();
        for (i, &b) in bytes.iter().enumerate() {
            match b {
                b'[' => open.push(i),
                b']' => {
                    if let Some(start) = open.pop() {
                        brackets.insert(start, i);
                    }
                }
                _ => {}
            }
        }

        let mut runs = Vec::new();
        let mut i = 0;
        while i < bytes.len() {
            if bytes[i] == b'`' {
                let run = backtick_run(&bytes[i..]);
                runs.push((i, run));
                i += run;
            } else {
                i += 1;
            }
        }
        let mut code_spans = HashMap::new();
        let mut last_by_len: HashMap<usize, usize> = HashMap::new();
        for &(start, run) in runs.iter().rev() {
            if let Some(&close) = last_by_len.get(&run) {
                code_spans.insert(start, close);
            }
            last_by_len.insert(run, start);
        }

        Self {
            text,
            depth,
            brackets,
            code_spans,
            next_bracket: next_offsets(bytes, b']'),
            next_paren: next_offsets(bytes, b')'),
        }
    }

    fn parse(&self) -> Vec<Inline> {
        let mut nodes = Vec::new();
        let bytes = self.text.as_bytes();
        let mut pos = 0;

        while pos < bytes.len() {
            let parsed = match bytes[pos] {
                b'`' => self.code_span(pos),
                b'!' => self.image(pos),
                b'[' => self.link(pos),
                b'*' if bytes.get(pos + 1) == Some(&b'*') => self.strong(pos),
                b'*' => self.emphasis(pos),
                _ => None,
            };

            if let Some((node, end)) = parsed {
                nodes.push(node);
                pos = end;
                continue;
            }

            let len = literal_len(&self.text[pos..]);
            push_text(&mut nodes, &self.text[pos..pos + len]);
            pos += len;
        }

        nodes
    }

    fn nested(&self, start: usize, end: usize) -> Vec<Inline> {
        Scanner::new(&self.text[start..end], self.depth + 1).parse()
    }

    /// Matches a code span opened by the backtick run at `pos`.
    ///
    /// The span closes at the next run of exactly the same length. Empty
    /// spans cannot occur since adjacent runs merge into one.
    fn code_span(&self, pos: usize) -> Option<(Inline, usize)> {
        let close = *self.code_spans.get(&pos)?;
        let run = backtick_run(&self.text.as_bytes()[pos..]);
        let code = self.text[pos + run..close].to_string();
        Some((Inline::Code(code), close + run))
    }

    fn image(&self, pos: usize) -> Option<(Inline, usize)> {
        if !self.text[pos..].starts_with("![") {
            return None;
        }
        let alt_end = self.next_bracket[pos + 2];
        if alt_end == self.text.len() {
            return None;
        }

        let (src, end) = self.destination(alt_end + 1)?;
        Some((
            Inline::Image {
                src: src.to_string(),
                alt: self.text[pos + 2..alt_end].to_string(),
            },
            end,
        ))
    }

    fn link(&self, pos: usize) -> Option<(Inline, usize)> {
        if self.depth >= MAX_DEPTH {
            return None;
        }
        let text_end = *self.brackets.get(&pos)?;
        if text_end == pos + 1 {
            return None;
        }

        let (href, end) = self.destination(text_end + 1)?;
        Some((
            Inline::Link {
                href: href.to_string(),
                content: self.nested(pos + 1, text_end),
            },
            end,
        ))
    }

    /// Parses `(url)` at `pos` and returns the url with the offset past `)`.
    fn destination(&self, pos: usize) -> Option<(&'a str, usize)> {
        if self.text.as_bytes().get(pos) != Some(&b'(') {
            return None;
        }
        let close = self.next_paren[pos + 1];
        if close == self.text.len() || close == pos + 1 {
            return None;
        }
        Some((&self.text[pos + 1..close], close + 1))
    }

    fn strong(&self, pos: usize) -> Option<(Inline, usize)> {
        if self.depth >= MAX_DEPTH {
            return None;
        }
        let close = self.find_closing(pos + 2, Delimiter::Double)?;
        if close == pos + 2 {
            return None;
        }
        Some((Inline::Strong(self.nested(pos + 2, close)), close + 2))
    }

    fn emphasis(&self, pos: usize) -> Option<(Inline, usize)> {
        if self.depth >= MAX_DEPTH {
            return None;
        }
        let close = self.find_closing(pos + 1, Delimiter::Single)?;
        if close == pos + 1 {
            return None;
        }
        Some((Inline::Emphasis(self.nested(pos + 1, close)), close + 1))
    }

    /// Finds the closing emphasis delimiter at or after `from`.
    ///
    /// Code spans are stepped over so a `*` inside backticks never closes
    /// emphasis. When looking for a single `*`, `**` pairs are skipped so
    /// bold can nest inside italic.
    fn find_closing(&self, from: usize, delimiter: Delimiter) -> Option<usize> {
        let bytes = self.text.as_bytes();
        let mut i = from;

        while i < bytes.len() {
            match bytes[i] {
                b'`' => match self.code_span(i) {
                    Some((_, end)) => i = end,
                    None => i += backtick_run(&bytes[i..]),
                },
                b'*' => {
                    let double = bytes.get(i + 1) == Some(&b'*');
                    match (delimiter, double) {
                        (Delimiter::Double, true) | (Delimiter::Single, false) => return Some(i),
                        (Delimiter::Single, true) => i += 2,
                        (Delimiter::Double, false) => i += 1,
                    }
                }
                _ => i += 1,
            }
        }

        None
    }
}

/// Length of the literal run starting at the beginning of `rest`.
///
/// An unmatched backtick run is consumed whole so a shorter run inside it
/// cannot open a code span on the next iteration.
fn literal_len(rest: &str) -> usize {
    let bytes = rest.as_bytes();
    match bytes[0] {
        b'`' => backtick_run(bytes),
        b'!' | b'[' | b'*' => 1,
        _ => rest
            .find(['`', '!', '[', '*'])
            .unwrap_or(rest.len()),
    }
}

fn push_text(nodes: &mut Vec<Inline>, text: &str) {
    if let Some(Inline::Text(last)) = nodes.last_mut() {
        last.push_str(text);
    } else {
        nodes.push(Inline::Text(text.to_string()));
    }
}

fn backtick_run(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|&&b| b == b'`').count()
}

/// For every offset, the offset of the next `target` byte at or after it.
fn next_offsets(bytes: &[u8], target: u8) -> Vec<usize> {
    let mut next = vec![bytes.len(); bytes.len() + 1];
    for i in (0..bytes.len()).rev() {
        next[i] = if bytes[i] == target { i } else { next[i + 1] };
    }
    next
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Delimiter {
    Single,
    Double,
}
