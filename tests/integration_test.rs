//! Integration tests for the public rendering API.

mod common;

use anyhow::Result;
use pagemark::{
    Block, Construct, MarkdownRenderer, RenderOptions, StyleMap, parse_blocks, render_markdown,
};
use tempfile::TempDir;

const H1_CLASS: &str =
    "text-3xl md:text-2xl font-bold text-foreground leading-tight mb-6 font-heading tracking-tight";

#[test]
fn test_missing_and_empty_input_render_empty() {
    assert_eq!(render_markdown(None::<&str>), "");
    assert_eq!(render_markdown(Some("")), "");
    assert_eq!(render_markdown(""), "");
}

#[test]
fn test_adversarial_inputs_never_panic() {
    // Arrange
    let renderer = MarkdownRenderer::new();
    let highlighting = MarkdownRenderer::with_options(
        StyleMap::default(),
        RenderOptions {
            highlight_code: true,
            ..RenderOptions::default()
        },
    );

    for input in common::adversarial_inputs() {
        // Act
        let first = renderer.render(&input);
        let second = renderer.render(&input);
        let _ = highlighting.render(&input);

        // Assert
        assert_eq!(first, second, "Rendering should be deterministic for {:?}", input);
    }
}

#[test]
fn test_heading_renders_without_markers() {
    // Act
    let html = render_markdown("# Title");

    // Assert
    assert_eq!(html, format!("<h1 class=\"{H1_CLASS}\">Title</h1>"));
    assert!(!html.contains('#'), "No leftover heading markers: {}", html);
}

#[test]
fn test_bold_and_italic_each_once() {
    // Act
    let html = render_markdown("**bold** and *italic*");

    // Assert
    assert_eq!(html.matches("<strong>bold</strong>").count(), 1, "{}", html);
    assert_eq!(html.matches("<em>italic</em>").count(), 1, "{}", html);
    assert!(!html.contains("<em></em>"), "Bold must not split into italics");
    assert!(!html.contains('*'), "{}", html);
}

#[test]
fn test_image_attributes() {
    // Act
    let html = render_markdown("![alt text](/img.png)");

    // Assert
    assert!(html.contains("<img src=\"/img.png\" alt=\"alt text\""), "{}", html);
    for artifact in ['[', ']', '(', ')'] {
        assert!(
            !html.contains(artifact),
            "Unexpected {:?} in {}",
            artifact,
            html
        );
    }
}

#[test]
fn test_link_attributes() {
    // Act
    let html = render_markdown("[Click](/page)");

    // Assert
    assert!(html.contains("<a href=\"/page\""), "{}", html);
    assert!(html.contains(">Click</a>"), "{}", html);
    assert!(!html.contains('['), "{}", html);
    assert!(!html.contains("]("), "{}", html);
}

#[test]
fn test_double_newline_separates_paragraphs() {
    // Act
    let html = render_markdown("Line one\n\nLine two");

    // Assert
    assert_eq!(html.matches("<p").count(), 2, "{}", html);
    let offsets = common::ordered_offsets(&html, &["Line one", "</p><p", "Line two"]);
    assert!(offsets.is_some(), "Paragraph boundary expected: {}", html);
    assert!(!html.contains("<br/>"), "{}", html);
}

#[test]
fn test_single_newline_is_line_break() {
    // Act
    let html = render_markdown("Line one\nLine two");

    // Assert
    assert_eq!(html.matches("<p").count(), 1, "{}", html);
    let offsets = common::ordered_offsets(&html, &["Line one", "<br/>", "Line two"]);
    assert!(offsets.is_some(), "Line break expected: {}", html);
}

#[test]
fn test_end_to_end_order() {
    // Arrange
    let input = "### Sub\nSome **bold** text with a [link](/x) and an image ![a](/y.png).";

    // Act
    let html = render_markdown(input);

    // Assert
    let offsets = common::ordered_offsets(
        &html,
        &["<h3", "<strong>", "<a href=\"/x\"", "<img src=\"/y.png\""],
    );
    assert!(offsets.is_some(), "Constructs out of order: {}", html);
    assert!(html.ends_with(".</p>"), "{}", html);
}

#[test]
fn test_plain_text_gets_paragraph_container() {
    // Act
    let html = render_markdown("just text");

    // Assert
    assert_eq!(
        html,
        "<p class=\"mb-4 text-slate-200 leading-relaxed\">just text</p>"
    );
}

#[test]
fn test_rerender_output_does_not_panic() {
    // Rendering is not idempotent; re-rendering HTML is out of contract and
    // only checked for totality.
    let once = render_markdown("# Title\n\n- **a**\n- `b`\n\n> quote");

    let _ = render_markdown(once.as_str());
}

#[test]
fn test_fenced_code_is_not_reparsed() {
    // Act
    let html = render_markdown("```\n**not bold** [x](/y)\n# nope\n```");

    // Assert
    assert!(html.contains("**not bold** [x](/y)\n# nope"), "{}", html);
    assert!(!html.contains("<strong>"), "{}", html);
    assert!(!html.contains("<a "), "{}", html);
    assert!(!html.contains("<h1"), "{}", html);
}

#[test]
fn test_text_after_fences_is_kept() {
    // Act
    let one_line = render_markdown("```npm install``` then run the app");
    let closing = render_markdown("```sh\nmake\n``` trailing *text*");

    // Assert
    assert!(
        common::ordered_offsets(&one_line, &["<pre", "npm install", "</pre>", "then run the app"])
            .is_some(),
        "{}",
        one_line
    );
    assert!(closing.contains("make"), "{}", closing);
    assert!(closing.contains("trailing <em"), "{}", closing);
}

#[test]
fn test_deeply_nested_input_keeps_content() {
    // Arrange
    let links = format!("{}x{}", "[".repeat(5000), "](/u)".repeat(5000));
    let mixed = format!("{}y{}", "*[".repeat(2000), "](/u)*".repeat(2000));

    // Act
    let links_html = render_markdown(links.as_str());
    let mixed_html = render_markdown(mixed.as_str());

    // Assert
    assert!(links_html.contains('x'));
    assert!(links_html.matches("<a ").count() <= 64, "Link nesting should be bounded");
    assert!(mixed_html.contains('y'));
}

#[test]
fn test_unmatched_bracket_flood_renders_quickly() {
    // Arrange
    let content = "[".repeat(200_000);
    let start = std::time::Instant::now();

    // Act
    let html = render_markdown(content.as_str());

    // Assert
    assert!(html.contains(&content));
    assert!(
        start.elapsed() < std::time::Duration::from_secs(10),
        "Unmatched brackets should render in linear time, took {:?}",
        start.elapsed()
    );
}

#[test]
fn test_document_tree_shape() {
    // Act
    let blocks = parse_blocks("# A\ntext\n- one\n- two\n> q\n```\ncode\n```");

    // Assert
    let kinds: Vec<&str> = blocks
        .iter()
        .map(|block| match block {
            Block::Heading { .. } => "heading",
            Block::Paragraph { .. } => "paragraph",
            Block::List { .. } => "list",
            Block::Blockquote { .. } => "blockquote",
            Block::CodeBlock { .. } => "code",
        })
        .collect();
    assert_eq!(
        kinds,
        vec!["heading", "paragraph", "list", "blockquote", "code"]
    );
}

#[test]
fn test_custom_styles_change_classes() {
    // Arrange
    let mut styles = StyleMap::default();
    styles.set(Construct::Heading1, "title");
    styles.set(Construct::Paragraph, "");
    styles.set(Construct::Strong, "font-black");
    let renderer = MarkdownRenderer::with_styles(styles);

    // Act
    let html = renderer.render("# Hi\n\n**x**");

    // Assert
    assert_eq!(
        html,
        "<h1 class=\"title\">Hi</h1><p><strong class=\"font-black\">x</strong></p>"
    );
}

#[test]
fn test_style_file_drives_rendering() -> Result<()> {
    // Arrange
    let dir = TempDir::new()?;
    let path = common::write_file(
        dir.path(),
        "theme/styles.toml",
        "list_item = \"bullet\"\nlist = \"\"\n",
    )?;
    let styles = StyleMap::load(Some(path.as_path()))?;
    let renderer = MarkdownRenderer::with_styles(styles);

    // Act
    let html = renderer.render("- a\n- b");

    // Assert
    assert_eq!(
        html,
        "<ul><li class=\"bullet\">a</li><li class=\"bullet\">b</li></ul>"
    );
    Ok(())
}

#[test]
fn test_escaping_toggle() {
    // Arrange
    let safe = MarkdownRenderer::new();
    let trusted = MarkdownRenderer::with_options(
        StyleMap::default(),
        RenderOptions {
            escape_html: false,
            ..RenderOptions::default()
        },
    );
    let input = "Hello <em>world</em>";

    // Act
    let escaped = safe.render(input);
    let raw = trusted.render(input);

    // Assert
    assert!(escaped.contains("Hello &lt;em&gt;world&lt;/em&gt;"), "{}", escaped);
    assert!(raw.contains("Hello <em>world</em>"), "{}", raw);
}

#[test]
fn test_renderer_is_shareable_across_threads() {
    // Arrange
    let renderer = std::sync::Arc::new(MarkdownRenderer::new());

    // Act
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let renderer = std::sync::Arc::clone(&renderer);
            std::thread::spawn(move || renderer.render(&format!("# Page {i}")))
        })
        .collect();

    // Assert
    for (i, handle) in handles.into_iter().enumerate() {
        let html = handle.join().expect("Render thread should not panic");
        assert!(html.contains(&format!(">Page {i}</h1>")), "{}", html);
    }
}

#[test]
fn test_render_large_document() {
    // Arrange
    let section = "# Services\n\nWe build **reliable** systems. See [cases](/case-studies).\n\n\
                   - Cloud\n- Security\n\n> Trusted by many\n\n```\nlet x = 1;\n```\n\n";
    let content = section.repeat(2_000);

    // Act
    let html = render_markdown(content.as_str());

    // Assert
    assert_eq!(html.matches("<h1").count(), 2_000);
    assert_eq!(html.matches("<ul").count(), 2_000);
    assert!(html.len() > content.len());
}
