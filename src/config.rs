//! Command line configuration.

use anyhow::{Result, bail};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::level_filters::LevelFilter;

use crate::markdown::{RenderOptions, StyleMap};

/// Input path that selects stdin.
const STDIN: &str = "-";

/// Title used when rendering from stdin.
const DEFAULT_TITLE: &str = "Preview";

/// Command line configuration for Pagemark.
#[derive(Debug, Clone, Parser)]
#[command(name = "pagemark", version, about, long_about = None)]
pub struct Config {
    /// Markdown file to render, `-` for stdin
    #[arg(default_value = STDIN)]
    pub input: PathBuf,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Style file overriding the default classes (toml, json or yaml)
    #[arg(long)]
    pub styles: Option<PathBuf>,

    /// Insert text and URLs unescaped (trusted authors only)
    #[arg(long)]
    pub no_escape: bool,

    /// Emit bare list items without a wrapping list element
    #[arg(long)]
    pub flat_lists: bool,

    /// Highlight fenced code blocks that name a language
    #[arg(long)]
    pub highlight: bool,

    /// Wrap output in a standalone HTML document
    #[arg(long)]
    pub preview: bool,

    /// Preview document title
    #[arg(long)]
    pub title: Option<String>,

    /// Stylesheet linked from the preview document
    #[arg(long = "stylesheet")]
    pub stylesheets: Vec<String>,

    /// Load Tailwind from its CDN in the preview document
    #[arg(long)]
    pub tailwind: bool,

    /// Open the output file in the browser
    #[arg(long)]
    pub open: bool,

    /// Log level (error, warn, info, debug, trace); RUST_LOG overrides
    #[arg(long, default_value = "warn")]
    pub log_level: LevelFilter,
}

impl Config {
    /// Parses configuration from command line arguments.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Validates configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the input file does not exist, or if `--open` is
    /// given without an output file.
    pub fn validate(&self) -> Result<()> {
        if !self.reads_stdin() && !self.input.exists() {
            bail!("Input file does not exist: {}", self.input.display());
        }

        if self.open && self.output.is_none() {
            bail!("--open requires --output");
        }

        Ok(())
    }

    /// Whether input comes from stdin.
    pub fn reads_stdin(&self) -> bool {
        self.input == Path::new(STDIN)
    }

    /// Rendering switches selected by flags.
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            escape_html: !self.no_escape,
            group_list_items: !self.flat_lists,
            highlight_code: self.highlight,
        }
    }

    /// Loads the style map from `--styles` layered over the defaults.
    ///
    /// # Errors
    ///
    /// Returns error if the style file cannot be read or parsed.
    pub fn style_map(&self) -> Result<StyleMap> {
        StyleMap::load(self.styles.as_deref())
    }

    /// Returns preview title from configuration or input file stem.
    pub fn preview_title(&self) -> String {
        if let Some(title) = &self.title {
            return title.clone();
        }

        if self.reads_stdin() {
            return DEFAULT_TITLE.to_string();
        }

        self.input
            .file_stem()
            .and_then(|stem| stem.to_str())
            .map(String::from)
            .unwrap_or_else(|| DEFAULT_TITLE.to_string())
    }
}
