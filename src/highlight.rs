//! Syntax highlighting for fenced code blocks.

use anyhow::{Context, Result};
use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

/// CSS class prefix for highlighted spans.
const CLASS_PREFIX: &str = "hl-";

/// Highlights code with syntect using CSS classes.
///
/// Produces `<span class="hl-*">` markup instead of inline styles so the
/// colour scheme stays in the page stylesheet.
pub struct CodeHighlighter {
    syntax_set: SyntaxSet,
}

impl CodeHighlighter {
    /// Creates highlighter with syntect's bundled syntax definitions.
    pub fn new() -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
        }
    }

    /// Whether a language tag maps to a known syntax.
    pub fn supports(&self, language: &str) -> bool {
        self.syntax_set.find_syntax_by_token(language).is_some()
    }

    /// Highlights code for a language tag.
    ///
    /// # Arguments
    ///
    /// * `code`: Source code to highlight
    /// * `language`: Language token or file extension (rust, py, js)
    ///
    /// # Returns
    ///
    /// Escaped HTML with class spans, or None if the language is unknown
    ///
    /// # Errors
    ///
    /// Returns error if syntect fails to parse a line
    pub fn highlight(&self, code: &str, language: &str) -> Result<Option<String>> {
        let Some(syntax) = self.syntax_set.find_syntax_by_token(language) else {
            return Ok(None);
        };

        if code.is_empty() {
            return Ok(Some(String::new()));
        }

        let mut generator = ClassedHTMLGenerator::new_with_class_style(
            syntax,
            &self.syntax_set,
            ClassStyle::SpacedPrefixed {
                prefix: CLASS_PREFIX,
            },
        );

        for line in LinesWithEndings::from(code) {
            generator
                .parse_html_for_line_which_includes_newline(line)
                .context("Failed to parse line for syntax highlighting")?;
        }

        Ok(Some(generator.finalize()))
    }
}

impl Default for CodeHighlighter {
    fn default() -> Self {
        Self::new()
    }
}
