//! Lightweight markdown to class-annotated HTML for CMS-backed pages.

mod config;
mod highlight;
pub mod logging;
mod markdown;
pub mod preview;

pub use config::Config;
pub use highlight::CodeHighlighter;
pub use markdown::{
    Block, Construct, Inline, MarkdownRenderer, RenderOptions, StyleMap, parse_blocks,
    parse_inlines, render_markdown,
};
pub use preview::preview_page;
