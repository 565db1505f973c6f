//! Replacement templates for the substitution passes.
//!
//! Templates use `regex` replacement syntax (`${1}`, `${0}`), so every literal
//! `$` coming from a class value is doubled when the template is built.

use crate::escape::escape_html;
use crate::theme::{ElementClasses, reserved_char};

/// Prebuilt replacement strings for one [`ElementClasses`] set.
#[derive(Clone, Debug)]
pub(crate) struct Markup {
    pub h1: String,
    pub h2: String,
    pub h3: String,
    pub strong: String,
    pub em: String,
    pub code: String,
    pub fenced_code: String,
    pub image: String,
    pub link: String,
    pub list_item: String,
    pub list: String,
    pub blockquote: String,
    /// Literal opening paragraph tag (not a template).
    pub paragraph_open: String,
    /// Literal paragraph boundary inserted for each blank line.
    pub paragraph_break: String,
}

impl Markup {
    pub fn new(classes: &ElementClasses) -> Self {
        let attr = |class: Option<&String>| template_safe(&class_attr(class));
        let paragraph_open = format!("<p{}>", class_attr(classes.paragraph.as_ref()));

        Self {
            h1: format!("<h1{}>${{1}}</h1>", attr(classes.h1.as_ref())),
            h2: format!("<h2{}>${{1}}</h2>", attr(classes.h2.as_ref())),
            h3: format!("<h3{}>${{1}}</h3>", attr(classes.h3.as_ref())),
            strong: format!("<strong{}>${{1}}</strong>", attr(classes.strong.as_ref())),
            em: format!("<em{}>${{1}}</em>", attr(classes.em.as_ref())),
            code: format!("<code{}>${{1}}</code>", attr(classes.code.as_ref())),
            fenced_code: format!(
                "<pre{}><code>${{1}}</code></pre>",
                attr(classes.pre.as_ref())
            ),
            image: format!(
                r#"<img src="${{2}}" alt="${{1}}"{} />"#,
                attr(classes.image.as_ref())
            ),
            link: format!(
                r#"<a href="${{2}}"{} target="_blank" rel="noopener noreferrer">${{1}}</a>"#,
                attr(classes.link.as_ref())
            ),
            list_item: format!("<li{}>${{1}}</li>", attr(classes.list_item.as_ref())),
            list: format!("<ul{}>${{0}}</ul>", attr(classes.list.as_ref())),
            blockquote: format!(
                "<blockquote{}>${{1}}</blockquote>",
                attr(classes.blockquote.as_ref())
            ),
            paragraph_break: format!("</p>{paragraph_open}"),
            paragraph_open,
        }
    }
}

/// Render ` class="..."`, or nothing for an unset or empty class.
///
/// A class containing a reserved character is dropped.
fn class_attr(class: Option<&String>) -> String {
    match class.map(|c| c.trim()) {
        Some(c) if c.is_empty() => String::new(),
        Some(c) if reserved_char(c).is_some() => {
            tracing::warn!(class = %c, "Ignoring class with reserved character");
            String::new()
        }
        Some(c) => format!(r#" class="{}""#, escape_html(c)),
        None => String::new(),
    }
}

/// Make a literal safe to embed in a `regex` replacement template.
fn template_safe(s: &str) -> String {
    s.replace('$', "$$")
}
