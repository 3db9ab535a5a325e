//! Lightweight markdown rendering with class-annotated output.
//!
//! Recognises a constrained subset: `#`/`##`/`###` headings, bold, italic,
//! images, links, fenced and inline code, `- ` list items, `> ` quotes and
//! blank-line paragraph breaks. Content is tokenized into a block tree
//! before any HTML is emitted, so markup produced for one construct is
//! never re-scanned by another.

mod block;
mod inline;
mod renderer;
mod style;

pub use block::{Block, parse_blocks};
pub use inline::{Inline, parse_inlines};
pub use renderer::{MarkdownRenderer, RenderOptions, render_markdown};
pub use style::{Construct, StyleMap};
