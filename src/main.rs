use anyhow::{Context, Result};
use pagemark::{Config, MarkdownRenderer};
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;
use tracing::{info, warn};

/// Reads markdown from a file, or stdin when the config says so.
fn read_input(config: &Config) -> Result<String> {
    if config.reads_stdin() {
        let mut content = String::new();
        io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read stdin")?;
        return Ok(content);
    }

    fs::read_to_string(&config.input)
        .with_context(|| format!("Failed to read {}", config.input.display()))
}

/// Writes HTML to the output file, creating parent directories, or stdout.
fn write_output(output: Option<&Path>, html: &str) -> Result<()> {
    let Some(path) = output else {
        let mut stdout = io::stdout().lock();
        stdout
            .write_all(html.as_bytes())
            .context("Failed to write stdout")?;
        return stdout.flush().context("Failed to flush stdout");
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).context("Failed to create output directory")?;
    }

    fs::write(path, html).with_context(|| format!("Failed to write {}", path.display()))
}

fn main() -> Result<()> {
    let config = Config::parse();
    pagemark::logging::init(config.log_level)?;
    config.validate().context("Invalid configuration")?;

    let styles = config.style_map().context("Failed to load styles")?;
    let renderer = MarkdownRenderer::with_options(styles, config.render_options());

    let content = read_input(&config)?;
    let fragment = renderer.render(&content);

    let html = if config.preview {
        pagemark::preview_page(
            &config.preview_title(),
            &fragment,
            &config.stylesheets,
            config.tailwind,
        )
        .into_string()
    } else {
        fragment
    };

    write_output(config.output.as_deref(), &html)?;

    if let Some(path) = &config.output {
        info!(path = %path.display(), bytes = html.len(), "wrote output");

        if config.open
            && let Err(err) = open::that(path)
        {
            warn!(path = %path.display(), error = %err, "failed to open browser");
        }
    }

    Ok(())
}
