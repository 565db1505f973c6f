//! Substitution passes and their fixed order.
//!
//! Every pass reads the whole working buffer and returns the rewritten
//! buffer. Passes are not re-entrant, so output of an earlier pass is input
//! to every later one. [`PIPELINE`] is the only order the renderer uses.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

use crate::markup::Markup;

// Line-anchored patterns run in multi-line CRLF mode so `^`/`$` see `\r\n`
// line endings and `.` never swallows a `\r`. Only these patterns know about
// CRLF: paragraphs and line breaks split on `\n` alone, so `\r\n\r\n` is not
// a paragraph break and each `\r` survives in front of its `<br/>`.
static H3: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?mR)^### (.*)$").unwrap());
static H2: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?mR)^## (.*)$").unwrap());
static H1: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?mR)^# (.*)$").unwrap());

// Greedy on purpose: first delimiter to last delimiter on the line.
static BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?R)\*\*(.*)\*\*").unwrap());
static ITALIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?R)\*(.*)\*").unwrap());

static INLINE_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`]*)`").unwrap());
static FENCED_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"```([^`]*)```").unwrap());

static IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[([^\]]*)\]\(([^)]*)\)").unwrap());
static LINK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[([^\]]*)\]\(([^)]*)\)").unwrap());

static STAR_ITEM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?mR)^\* (.*)$").unwrap());
static DASH_ITEM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?mR)^- (.*)$").unwrap());
/// A run of list items; whitespace (blank lines included) between items keeps the run going.
static LIST_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?mR)(?:<li[^>]*>.*</li>\s*)+").unwrap());

static BLOCKQUOTE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?mR)^> (.*)$").unwrap());

static EMPTY_PARAGRAPH: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<p[^>]*></p>").unwrap());

/// One substitution pass of the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Pass {
    /// `###`, `##` and `#` lines, longest prefix first.
    Headings,
    /// `**text**`
    Bold,
    /// `*text*`
    Italic,
    /// `` `code` ``
    InlineCode,
    /// ```` ```code``` ````
    FencedCode,
    /// `![alt](url)`
    Images,
    /// `[text](url)`
    Links,
    /// `* item` and `- item` lines.
    ListItems,
    /// Wraps each run of list items in one `<ul>`.
    ListGroups,
    /// `> quote` lines.
    Blockquotes,
    /// Blank lines split paragraphs; the whole buffer is wrapped.
    Paragraphs,
    /// Drops `<p></p>` left by the paragraph pass.
    EmptyParagraphs,
    /// Remaining `\n` become `<br/>`.
    LineBreaks,
}

/// Passes in the order they run.
///
/// Reordering changes output for lines that mix constructs: headings must see
/// raw `#` before anything else, bold must consume `**` before italic looks
/// for `*`, images must claim `![..](..)` before links see the bracket pair,
/// and list items must exist before they can be grouped.
pub const PIPELINE: [Pass; 13] = [
    Pass::Headings,
    Pass::Bold,
    Pass::Italic,
    Pass::InlineCode,
    Pass::FencedCode,
    Pass::Images,
    Pass::Links,
    Pass::ListItems,
    Pass::ListGroups,
    Pass::Blockquotes,
    Pass::Paragraphs,
    Pass::EmptyParagraphs,
    Pass::LineBreaks,
];

impl Pass {
    /// Short name used in logs.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Headings => "headings",
            Self::Bold => "bold",
            Self::Italic => "italic",
            Self::InlineCode => "inline_code",
            Self::FencedCode => "fenced_code",
            Self::Images => "images",
            Self::Links => "links",
            Self::ListItems => "list_items",
            Self::ListGroups => "list_groups",
            Self::Blockquotes => "blockquotes",
            Self::Paragraphs => "paragraphs",
            Self::EmptyParagraphs => "empty_paragraphs",
            Self::LineBreaks => "line_breaks",
        }
    }

    /// Run this pass over the whole buffer.
    pub(crate) fn apply(self, html: String, markup: &Markup) -> String {
        match self {
            Self::Headings => {
                let html = substitute(html, &H3, &markup.h3);
                let html = substitute(html, &H2, &markup.h2);
                substitute(html, &H1, &markup.h1)
            }
            Self::Bold => substitute(html, &BOLD, &markup.strong),
            Self::Italic => substitute(html, &ITALIC, &markup.em),
            Self::InlineCode => substitute(html, &INLINE_CODE, &markup.code),
            Self::FencedCode => substitute(html, &FENCED_CODE, &markup.fenced_code),
            Self::Images => substitute(html, &IMAGE, &markup.image),
            Self::Links => substitute(html, &LINK, &markup.link),
            Self::ListItems => {
                let html = substitute(html, &STAR_ITEM, &markup.list_item);
                substitute(html, &DASH_ITEM, &markup.list_item)
            }
            Self::ListGroups => substitute(html, &LIST_RUN, &markup.list),
            Self::Blockquotes => substitute(html, &BLOCKQUOTE, &markup.blockquote),
            Self::Paragraphs => {
                let body = replace_literal(html, "\n\n", &markup.paragraph_break);
                format!("{}{body}</p>", markup.paragraph_open)
            }
            Self::EmptyParagraphs => substitute(html, &EMPTY_PARAGRAPH, ""),
            Self::LineBreaks => replace_literal(html, "\n", "<br/>"),
        }
    }
}

/// Replace every match of `pattern`, reusing the buffer when nothing matches.
fn substitute(html: String, pattern: &Regex, template: &str) -> String {
    if let Cow::Owned(replaced) = pattern.replace_all(&html, template) {
        return replaced;
    }
    html
}

fn replace_literal(html: String, from: &str, to: &str) -> String {
    if html.contains(from) {
        html.replace(from, to)
    } else {
        html
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::ElementClasses;
    use pretty_assertions::assert_eq;

    fn apply(pass: Pass, input: &str) -> String {
        pass.apply(input.to_owned(), &Markup::new(&ElementClasses::default()))
    }

    #[test]
    fn test_pipeline_has_every_pass_once() {
        let mut names: Vec<_> = PIPELINE.iter().map(|p| p.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), PIPELINE.len());
    }

    #[test]
    fn test_pipeline_order_constraints() {
        let position = |pass| PIPELINE.iter().position(|p| *p == pass).unwrap();
        assert!(position(Pass::Headings) < position(Pass::Bold));
        assert!(position(Pass::Bold) < position(Pass::Italic));
        assert!(position(Pass::InlineCode) < position(Pass::FencedCode));
        assert!(position(Pass::Images) < position(Pass::Links));
        assert!(position(Pass::ListItems) < position(Pass::ListGroups));
        assert!(position(Pass::Paragraphs) < position(Pass::EmptyParagraphs));
        assert_eq!(PIPELINE.last(), Some(&Pass::LineBreaks));
    }

    #[test]
    fn test_headings_longest_prefix_first() {
        assert_eq!(
            apply(Pass::Headings, "# One\n## Two\n### Three"),
            "<h1>One</h1>\n<h2>Two</h2>\n<h3>Three</h3>"
        );
    }

    #[test]
    fn test_headings_require_space() {
        assert_eq!(apply(Pass::Headings, "#tag"), "#tag");
        assert_eq!(apply(Pass::Headings, "#### Four"), "#### Four");
    }

    #[test]
    fn test_headings_with_crlf() {
        assert_eq!(apply(Pass::Headings, "# Title\r\nbody"), "<h1>Title</h1>\r\nbody");
    }

    #[test]
    fn test_heading_only_at_line_start() {
        assert_eq!(apply(Pass::Headings, "see # not"), "see # not");
    }

    #[test]
    fn test_bold_is_greedy_within_line() {
        assert_eq!(
            apply(Pass::Bold, "**a** and **b**"),
            "<strong>a** and **b</strong>"
        );
    }

    #[test]
    fn test_bold_does_not_cross_lines() {
        assert_eq!(apply(Pass::Bold, "**a\nb**"), "**a\nb**");
    }

    #[test]
    fn test_italic_is_greedy_within_line() {
        assert_eq!(apply(Pass::Italic, "*a* and *b*"), "<em>a* and *b</em>");
    }

    #[test]
    fn test_single_asterisk_unchanged() {
        assert_eq!(apply(Pass::Italic, "2 * 3"), "2 * 3");
    }

    #[test]
    fn test_inline_code_spans_lines() {
        assert_eq!(apply(Pass::InlineCode, "`a\nb`"), "<code>a\nb</code>");
    }

    #[test]
    fn test_fenced_code_alone() {
        assert_eq!(
            apply(Pass::FencedCode, "```\nlet x = 1;\n```"),
            "<pre><code>\nlet x = 1;\n</code></pre>"
        );
    }

    #[test]
    fn test_image() {
        assert_eq!(
            apply(Pass::Images, "![cat](/cat.png)"),
            r#"<img src="/cat.png" alt="cat" />"#
        );
    }

    #[test]
    fn test_link() {
        assert_eq!(
            apply(Pass::Links, "[home](/)"),
            r#"<a href="/" target="_blank" rel="noopener noreferrer">home</a>"#
        );
    }

    #[test]
    fn test_list_items() {
        assert_eq!(
            apply(Pass::ListItems, "* one\n- two\n-three"),
            "<li>one</li>\n<li>two</li>\n-three"
        );
    }

    #[test]
    fn test_list_groups_wrap_contiguous_runs() {
        assert_eq!(
            apply(Pass::ListGroups, "<li>a</li>\n<li>b</li>\ntext\n<li>c</li>"),
            "<ul><li>a</li>\n<li>b</li>\n</ul>text\n<ul><li>c</li></ul>"
        );
    }

    #[test]
    fn test_list_groups_span_blank_lines() {
        assert_eq!(
            apply(Pass::ListGroups, "<li>a</li>\n\n<li>b</li>"),
            "<ul><li>a</li>\n\n<li>b</li></ul>"
        );
    }

    #[test]
    fn test_blockquote() {
        assert_eq!(
            apply(Pass::Blockquotes, "> wise words"),
            "<blockquote>wise words</blockquote>"
        );
    }

    #[test]
    fn test_paragraphs() {
        assert_eq!(apply(Pass::Paragraphs, "a\n\nb"), "<p>a</p><p>b</p>");
        assert_eq!(apply(Pass::Paragraphs, ""), "<p></p>");
    }

    #[test]
    fn test_empty_paragraphs_with_attributes() {
        assert_eq!(
            apply(Pass::EmptyParagraphs, r#"<p class="mb-4"></p><p>x</p>"#),
            "<p>x</p>"
        );
    }

    #[test]
    fn test_line_breaks() {
        assert_eq!(apply(Pass::LineBreaks, "a\nb"), "a<br/>b");
    }

    #[test]
    fn test_crlf_blank_line_is_not_a_paragraph_break() {
        assert_eq!(apply(Pass::Paragraphs, "a\r\n\r\nb"), "<p>a\r\n\r\nb</p>");
        assert_eq!(apply(Pass::LineBreaks, "a\r\nb"), "a\r<br/>b");
    }
}
