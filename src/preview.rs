//! Standalone preview document for rendered fragments.

use maud::{DOCTYPE, Markup, PreEscaped, html};

/// Tailwind Play CDN, which compiles utility classes in the browser.
const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";

/// Wraps a rendered fragment in a complete HTML document.
///
/// Rendered fragments carry utility classes but no document structure.
/// The preview supplies DOCTYPE, charset and viewport, and optionally
/// loads Tailwind so the classes take effect without a build step.
///
/// # Arguments
///
/// * `title`: Document title
/// * `fragment`: Rendered HTML, inserted unescaped
/// * `stylesheets`: Stylesheet URLs linked in the head
/// * `tailwind`: Whether to load the Tailwind CDN script
///
/// # Returns
///
/// Complete HTML document
pub fn preview_page(title: &str, fragment: &str, stylesheets: &[String], tailwind: bool) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                @if tailwind {
                    script src=(TAILWIND_CDN) {}
                }
                @for stylesheet in stylesheets {
                    link rel="stylesheet" href=(stylesheet);
                }
            }
            body {
                main class="preview" {
                    (PreEscaped(fragment))
                }
            }
        }
    }
}
