//! HTML emission for parsed documents.

use anyhow::{Context, Result};
use maud::{Markup, PreEscaped, html};
use std::path::Path;
use tracing::{debug, warn};

use super::block::{Block, parse_blocks};
use super::inline::Inline;
use super::style::{Construct, StyleMap};
use crate::highlight::CodeHighlighter;

/// Separator between lines of one paragraph or blockquote.
const LINE_BREAK: &str = "<br/>";

/// Replacement for links with script-capable schemes.
const BLOCKED_URL: &str = "#";

/// Rendering switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Escape text, code and attribute values, and neutralise script URLs.
    ///
    /// Turn off only when every author is trusted; raw HTML in the source
    /// then passes straight through.
    pub escape_html: bool,
    /// Wrap runs of list items in a `<ul>`; otherwise emit bare `<li>`s.
    pub group_list_items: bool,
    /// Highlight fenced code that names a known language.
    pub highlight_code: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            escape_html: true,
            group_list_items: true,
            highlight_code: false,
        }
    }
}

/// Renders lightweight markdown to class-annotated HTML fragments.
///
/// Content goes through three stages: a line lexer groups blocks, an
/// inline tokenizer builds the node tree of each line, and emission walks
/// the tree with maud. Rendering is total: any input produces some HTML
/// and never an error. Output has no document wrapper and is meant for
/// injection into an existing page.
pub struct MarkdownRenderer {
    styles: StyleMap,
    options: RenderOptions,
    highlighter: Option<CodeHighlighter>,
}

impl MarkdownRenderer {
    /// Creates renderer with default classes and options.
    pub fn new() -> Self {
        Self::with_options(StyleMap::default(), RenderOptions::default())
    }

    /// Creates renderer with custom classes and default options.
    pub fn with_styles(styles: StyleMap) -> Self {
        Self::with_options(styles, RenderOptions::default())
    }

    /// Creates renderer with custom classes and options.
    ///
    /// Syntax definitions are only loaded when highlighting is enabled.
    pub fn with_options(styles: StyleMap, options: RenderOptions) -> Self {
        let highlighter = options.highlight_code.then(CodeHighlighter::new);
        Self {
            styles,
            options,
            highlighter,
        }
    }

    pub fn styles(&self) -> &StyleMap {
        &self.styles
    }

    pub fn options(&self) -> RenderOptions {
        self.options
    }

    /// Renders markdown content to an HTML fragment.
    ///
    /// # Arguments
    ///
    /// * `content`: Markdown source, possibly empty
    ///
    /// # Returns
    ///
    /// Concatenated block HTML, empty for empty or blank input
    pub fn render(&self, content: &str) -> String {
        if content.is_empty() {
            return String::new();
        }

        let blocks = parse_blocks(content);
        debug!(bytes = content.len(), blocks = blocks.len(), "rendering markdown");

        let mut html = String::with_capacity(content.len() * 2);
        for block in &blocks {
            html.push_str(&self.render_block(block).into_string());
        }
        html
    }

    /// Renders markdown file at given path.
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read
    pub fn render_file(&self, path: impl AsRef<Path>) -> Result<String> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read markdown file: {}", path.display()))?;
        Ok(self.render(&content))
    }

    fn render_block(&self, block: &Block) -> Markup {
        match block {
            Block::Heading { level, content } => {
                let class = self.styles.class(Construct::heading(*level));
                let inner = self.render_line(content);
                match *level {
                    0 | 1 => html! { h1 class=[class] { (inner) } },
                    2 => html! { h2 class=[class] { (inner) } },
                    _ => html! { h3 class=[class] { (inner) } },
                }
            }
            Block::CodeBlock { language, code } => {
                self.render_code_block(language.as_deref(), code)
            }
            Block::List { items } => {
                let item_class = self.styles.class(Construct::ListItem);
                let rendered = html! {
                    @for item in items {
                        li class=[item_class] { (self.render_line(item)) }
                    }
                };
                if self.options.group_list_items {
                    html! { ul class=[self.styles.class(Construct::List)] { (rendered) } }
                } else {
                    rendered
                }
            }
            Block::Blockquote { lines } => html! {
                blockquote class=[self.styles.class(Construct::Blockquote)] {
                    (self.render_lines(lines))
                }
            },
            Block::Paragraph { lines } => html! {
                p class=[self.styles.class(Construct::Paragraph)] { (self.render_lines(lines)) }
            },
        }
    }

    fn render_code_block(&self, language: Option<&str>, code: &str) -> Markup {
        let code_class = language.map(|lang| format!("language-{lang}"));
        let body = self
            .highlight(language, code)
            .unwrap_or_else(|| self.text(code));

        html! {
            pre class=[self.styles.class(Construct::CodeBlock)] {
                code class=[code_class] { (body) }
            }
        }
    }

    /// Highlighted code body, or None to fall back to plain text.
    fn highlight(&self, language: Option<&str>, code: &str) -> Option<Markup> {
        let highlighter = self.highlighter.as_ref()?;
        let language = language?;
        if !highlighter.supports(language) {
            debug!(language, "no syntax for language, rendering plain");
            return None;
        }

        match highlighter.highlight(code, language) {
            Ok(html) => html.map(PreEscaped),
            Err(err) => {
                warn!(language, error = %err, "code highlighting failed");
                None
            }
        }
    }

    /// Lines joined by line breaks.
    fn render_lines(&self, lines: &[Vec<Inline>]) -> Markup {
        html! {
            @for (i, line) in lines.iter().enumerate() {
                @if i > 0 { (PreEscaped(LINE_BREAK)) }
                (self.render_line(line))
            }
        }
    }

    fn render_line(&self, nodes: &[Inline]) -> Markup {
        html! {
            @for node in nodes {
                (self.render_inline(node))
            }
        }
    }

    fn render_inline(&self, node: &Inline) -> Markup {
        match node {
            Inline::Text(text) => self.text(text),
            Inline::Strong(content) => html! {
                strong class=[self.styles.class(Construct::Strong)] { (self.render_line(content)) }
            },
            Inline::Emphasis(content) => html! {
                em class=[self.styles.class(Construct::Emphasis)] { (self.render_line(content)) }
            },
            Inline::Code(code) => html! {
                code class=[self.styles.class(Construct::InlineCode)] { (self.text(code)) }
            },
            Inline::Link { href, content } => html! {
                a href=(self.url(href, false)) class=[self.styles.class(Construct::Link)] {
                    (self.render_line(content))
                }
            },
            Inline::Image { src, alt } => html! {
                img src=(self.url(src, true)) alt=(self.text(alt)) class=[self.styles.class(Construct::Image)];
            },
        }
    }

    /// Text run, escaped unless escaping is disabled.
    fn text(&self, text: &str) -> Markup {
        if self.options.escape_html {
            html! { (text) }
        } else {
            PreEscaped(text.to_string())
        }
    }

    fn url(&self, url: &str, is_image: bool) -> Markup {
        if self.options.escape_html && !is_safe_url(url, is_image) {
            return PreEscaped(BLOCKED_URL.to_string());
        }
        self.text(url)
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Rejects URL schemes that can execute script.
///
/// Browsers ignore ASCII whitespace and control characters inside the
/// scheme, so they are stripped before comparison.
fn is_safe_url(url: &str, is_image: bool) -> bool {
    let normalized: String = url
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && !c.is_ascii_control())
        .take(16)
        .collect::<String>()
        .to_ascii_lowercase();

    if normalized.starts_with("javascript:") || normalized.starts_with("vbscript:") {
        return false;
    }

    if normalized.starts_with("data:") {
        return is_image && normalized.starts_with("data:image/");
    }

    true
}

/// Renders markdown with the default classes and options.
///
/// Missing or empty content yields an empty string.
///
/// # Examples
///
/// ```
/// use pagemark::render_markdown;
///
/// let html = render_markdown("# Title");
/// assert!(html.starts_with("<h1"));
/// assert_eq!(render_markdown(None::<&str>), "");
/// ```
pub fn render_markdown<'a>(content: impl Into<Option<&'a str>>) -> String {
    match content.into() {
        Some(content) => MarkdownRenderer::new().render(content),
        None => String::new(),
    }
}
