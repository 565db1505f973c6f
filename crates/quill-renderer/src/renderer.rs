//! Markdown renderer built from the ordered substitution passes.

use crate::escape::escape_source;
use crate::markup::Markup;
use crate::pass::PIPELINE;
use crate::theme::{ElementClasses, Theme};

/// Markdown to HTML fragment renderer.
///
/// The renderer is total: every input, however malformed, produces HTML.
/// Settings are fixed at construction, so one renderer can be shared across
/// threads and reused for any number of documents.
///
/// # Example
///
/// ```
/// use quill_renderer::{MarkdownRenderer, Theme};
///
/// let renderer = MarkdownRenderer::new().with_theme(Theme::Tailwind);
/// let html = renderer.render("# Hello");
/// assert!(html.contains(r#"<h1 class="text-3xl font-bold text-primary mt-8 mb-6">Hello</h1>"#));
/// ```
#[derive(Clone, Debug)]
pub struct MarkdownRenderer {
    classes: ElementClasses,
    markup: Markup,
    escape_html: bool,
}

impl MarkdownRenderer {
    /// Create a renderer with bare tags and no escaping.
    #[must_use]
    pub fn new() -> Self {
        let classes = ElementClasses::default();
        Self {
            markup: Markup::new(&classes),
            classes,
            escape_html: false,
        }
    }

    /// Use the class set of a built-in theme.
    #[must_use]
    pub fn with_theme(self, theme: Theme) -> Self {
        self.with_classes(theme.classes())
    }

    /// Use an explicit class set.
    ///
    /// Classes that fail [`ElementClasses::validate`] are left off their
    /// elements; the rest still apply.
    #[must_use]
    pub fn with_classes(mut self, classes: ElementClasses) -> Self {
        self.markup = Markup::new(&classes);
        self.classes = classes;
        self
    }

    /// Escape raw HTML in the source before any pass runs.
    ///
    /// Off by default: raw markup in posts is passed through verbatim.
    #[must_use]
    pub fn with_html_escaping(mut self) -> Self {
        self.escape_html = true;
        self
    }

    /// Class set in use.
    #[must_use]
    pub fn classes(&self) -> &ElementClasses {
        &self.classes
    }

    /// Whether raw HTML in the source is escaped.
    #[must_use]
    pub fn escapes_html(&self) -> bool {
        self.escape_html
    }

    /// Render markdown source to an HTML fragment.
    #[must_use]
    pub fn render(&self, markdown: &str) -> String {
        let mut html = if self.escape_html {
            escape_source(markdown)
        } else {
            markdown.to_owned()
        };

        for pass in PIPELINE {
            html = pass.apply(html, &self.markup);
            tracing::trace!(pass = pass.name(), len = html.len(), "Applied pass");
        }

        tracing::debug!(
            input_len = markdown.len(),
            output_len = html.len(),
            "Rendered markdown"
        );
        html
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}
