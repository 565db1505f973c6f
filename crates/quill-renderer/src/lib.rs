//! Markdown renderer for Quill blog posts.
//!
//! Converts a constrained markdown dialect into an HTML fragment by running a
//! fixed, ordered list of whole-buffer substitution passes (see [`PIPELINE`]).
//! It is not a CommonMark parser: emphasis is greedy and non-nested, and raw
//! HTML in the source passes through unless escaping is enabled.
//!
//! # Example
//!
//! ```
//! let html = quill_renderer::render("# Hello\n\n**Bold** text");
//! assert_eq!(html, "<p><h1>Hello</h1></p><p><strong>Bold</strong> text</p>");
//! ```

mod escape;
mod markup;
mod pass;
mod renderer;
mod theme;

use std::sync::LazyLock;

pub use escape::escape_html;
pub use pass::{PIPELINE, Pass};
pub use renderer::MarkdownRenderer;
pub use theme::{ElementClasses, InvalidClass, RESERVED_CLASS_CHARS, Theme};

static DEFAULT_RENDERER: LazyLock<MarkdownRenderer> = LazyLock::new(MarkdownRenderer::new);

/// Render markdown with the default settings (bare tags, no escaping).
#[must_use]
pub fn render(markdown: &str) -> String {
    DEFAULT_RENDERER.render(markdown)
}
