//! HTML escaping helpers.

/// Escape special HTML characters for use in text or attribute values.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

/// Escape raw HTML in markdown source before any pass runs.
///
/// Same as [`escape_html`] except that a `>` opening a line is kept, since it
/// is the blockquote marker.
pub(crate) fn escape_source(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut line_start = true;
    for c in s.chars() {
        match c {
            '>' if line_start => result.push('>'),
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
        line_start = c == '\n';
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#x27;Jerry&#x27;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_escape_source_keeps_blockquote_marker() {
        assert_eq!(escape_source("> a > b"), "> a &gt; b");
        assert_eq!(escape_source("x\n> quote"), "x\n> quote");
    }

    #[test]
    fn test_escape_source_escapes_tags() {
        assert_eq!(
            escape_source("<script>alert(1)</script>"),
            "&lt;script&gt;alert(1)&lt;/script&gt;"
        );
    }
}
