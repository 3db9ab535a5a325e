//! Class annotations for rendered constructs.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Environment prefix for style overrides (`PAGEMARK_STYLE_LINK=...`).
const ENV_PREFIX: &str = "PAGEMARK_STYLE";

const HEADING_BASE: &str = "text-3xl md:text-2xl font-bold text-foreground leading-tight mb-6 font-heading";

/// Rendered construct that carries a class attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Construct {
    Heading1,
    Heading2,
    Heading3,
    Strong,
    Emphasis,
    Image,
    Link,
    CodeBlock,
    InlineCode,
    List,
    ListItem,
    Blockquote,
    Paragraph,
}

impl Construct {
    /// Heading construct for a level, clamped to 1..=3.
    pub fn heading(level: u8) -> Self {
        match level {
            0 | 1 => Construct::Heading1,
            2 => Construct::Heading2,
            _ => Construct::Heading3,
        }
    }
}

/// Mapping from construct to class string.
///
/// Defaults match the utility classes of the marketing site theme. An
/// empty string suppresses the class attribute entirely. Missing keys in a
/// style file keep their default.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StyleMap {
    pub h1: String,
    pub h2: String,
    pub h3: String,
    pub strong: String,
    pub em: String,
    pub image: String,
    pub link: String,
    pub code_block: String,
    pub inline_code: String,
    pub list: String,
    pub list_item: String,
    pub blockquote: String,
    pub paragraph: String,
}

impl Default for StyleMap {
    fn default() -> Self {
        Self {
            h1: format!("{HEADING_BASE} tracking-tight"),
            h2: format!("{HEADING_BASE} tracking-tight"),
            h3: HEADING_BASE.to_string(),
            strong: String::new(),
            em: String::new(),
            image: "max-w-full h-auto rounded-lg col-span-full my-8 shadow-md".to_string(),
            link: "text-primary underline hover:opacity-80 transition-opacity".to_string(),
            code_block: "bg-muted p-4 rounded-lg my-6 overflow-x-auto font-mono text-sm"
                .to_string(),
            inline_code: "bg-muted px-1.5 py-0.5 rounded text-sm font-mono".to_string(),
            list: "my-4".to_string(),
            list_item: "ml-4 list-disc".to_string(),
            blockquote: "border-l-4 border-primary pl-4 italic my-6".to_string(),
            paragraph: "mb-4 text-slate-200 leading-relaxed".to_string(),
        }
    }
}

impl StyleMap {
    /// Loads a style map layered over the defaults.
    ///
    /// Layers, lowest precedence first: built-in defaults, the optional
    /// style file (format chosen by extension: toml, json, yaml), then
    /// `PAGEMARK_STYLE_*` environment variables.
    ///
    /// # Arguments
    ///
    /// * `path`: Optional style file
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or does not deserialize
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = ::config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(::config::File::from(path));
        }

        let layered = builder
            .add_source(::config::Environment::with_prefix(ENV_PREFIX))
            .build()
            .context("Failed to read style configuration")?;

        layered
            .try_deserialize()
            .context("Invalid style configuration")
    }

    /// Class string for a construct, or None when it is empty.
    pub fn class(&self, construct: Construct) -> Option<&str> {
        let class = self.slot(construct).as_str();
        (!class.trim().is_empty()).then_some(class)
    }

    /// Replaces the class string for a construct.
    pub fn set(&mut self, construct: Construct, class: impl Into<String>) {
        *self.slot_mut(construct) = class.into();
    }

    fn slot(&self, construct: Construct) -> &String {
        match construct {
            Construct::Heading1 => &self.h1,
            Construct::Heading2 => &self.h2,
            Construct::Heading3 => &self.h3,
            Construct::Strong => &self.strong,
            Construct::Emphasis => &self.em,
            Construct::Image => &self.image,
            Construct::Link => &self.link,
            Construct::CodeBlock => &self.code_block,
            Construct::InlineCode => &self.inline_code,
            Construct::List => &self.list,
            Construct::ListItem => &self.list_item,
            Construct::Blockquote => &self.blockquote,
            Construct::Paragraph => &self.paragraph,
        }
    }

    fn slot_mut(&mut self, construct: Construct) -> &mut String {
        match construct {
            Construct::Heading1 => &mut self.h1,
            Construct::Heading2 => &mut self.h2,
            Construct::Heading3 => &mut self.h3,
            Construct::Strong => &mut self.strong,
            Construct::Emphasis => &mut self.em,
            Construct::Image => &mut self.image,
            Construct::Link => &mut self.link,
            Construct::CodeBlock => &mut self.code_block,
            Construct::InlineCode => &mut self.inline_code,
            Construct::List => &mut self.list,
            Construct::ListItem => &mut self.list_item,
            Construct::Blockquote => &mut self.blockquote,
            Construct::Paragraph => &mut self.paragraph,
        }
    }
}
