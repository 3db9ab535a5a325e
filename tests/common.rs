//! Shared test utilities for integration tests.
//!
//! Provides helpers for writing markdown fixtures to temporary
//! directories and inspecting rendered HTML.

#![allow(dead_code)]

use anyhow::Result;
use std::path::{Path, PathBuf};

/// Writes file into directory, creating parent directories as needed.
///
/// # Returns
///
/// Full path of the written file
///
/// # Errors
///
/// Returns error if directory creation or file write fails
pub fn write_file(dir: &Path, path: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(path);
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Byte offset of each needle in order, or None if any is missing or
/// appears before the previous one.
///
/// # Examples
///
/// ```no_run
/// let offsets = common::ordered_offsets("<h3>a</h3><p>b</p>", &["<h3", "<p"]);
/// assert!(offsets.is_some());
/// ```
pub fn ordered_offsets(haystack: &str, needles: &[&str]) -> Option<Vec<usize>> {
    let mut offsets = Vec::with_capacity(needles.len());
    let mut from = 0;

    for needle in needles {
        let offset = from + haystack[from..].find(needle)?;
        offsets.push(offset);
        from = offset + needle.len();
    }

    Some(offsets)
}

/// Inputs that stress unmatched and overlapping constructs.
pub fn adversarial_inputs() -> Vec<String> {
    let mut inputs: Vec<String> = [
        "",
        " ",
        "\n",
        "\r\n\r\n",
        "\t\t\n   \n",
        "*",
        "**",
        "***",
        "****",
        "*****bold?*****",
        "`",
        "``",
        "```",
        "````",
        "```\n",
        "```\n```",
        "``` ```",
        "[",
        "]",
        "[]",
        "[]()",
        "![",
        "![]",
        "![]()",
        "[[[[]]]](x)",
        "[a](b",
        "![a](b",
        "#",
        "# ",
        "##",
        "### ",
        "####",
        "- ",
        "-",
        "> ",
        ">",
        "**a *b** c*",
        "*a **b* c**",
        "`*`*`*`",
        "[**](**)",
        "![*](*)",
        "<script>alert(1)</script>",
        "&amp; &lt; &gt;",
        "日本語 **太字** *斜体*",
        "emoji 🎉 *party* [🔗](/🔗)",
        "\u{0}\u{1}\u{7f}",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    inputs.push("*".repeat(1000));
    inputs.push("[".repeat(500) + &"]".repeat(500));
    inputs.push("`".repeat(777));
    inputs.push("- item\n".repeat(200));
    inputs.push("```\n".repeat(51));
    inputs.push("[".repeat(5000) + "x" + &"](/u)".repeat(5000));
    inputs.push("*[".repeat(2000) + "x" + &"](/u)*".repeat(2000));
    inputs.push("[".repeat(40_000));
    inputs.push("![".repeat(10_000));
    inputs.push("[a](".repeat(10_000));
    inputs.push("```npm install``` then run the app".to_string());
    inputs.push("```sh\nmake\n``` trailing *text*".to_string());

    inputs
}
