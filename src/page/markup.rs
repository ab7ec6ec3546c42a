//! Escaping for values interpolated into the page template

use serde::Serialize;

/// Escape text for use in element content or a quoted attribute
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Serialize `value` as a JavaScript literal safe to place inside an inline
/// `<script>` element.
///
/// JSON is valid JavaScript; the extra escapes keep `</script>` and `<!--`
/// from ending the element early and keep line separators out of the source.
pub fn script_literal<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    let json = serde_json::to_string(value)?;
    let mut out = String::with_capacity(json.len());
    for c in json.chars() {
        match c {
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '&' => out.push_str("\\u0026"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c => out.push(c),
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html_covers_text_and_attributes() {
        assert_eq!(
            escape_html(r#"<b title="x">Tom & Jerry's</b>"#),
            "&lt;b title=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/b&gt;"
        );
        assert_eq!(escape_html("plain text"), "plain text");
    }

    #[test]
    fn test_script_literal_cannot_close_script() {
        let literal = script_literal("</script><script>alert(1)</script>").unwrap();
        assert!(!literal.contains("</script"));
        assert!(!literal.contains('<'));
        let back: String = serde_json::from_str(&literal).unwrap();
        assert_eq!(back, "</script><script>alert(1)</script>");
    }

    #[test]
    fn test_script_literal_escapes_line_separators() {
        let literal = script_literal("a\u{2028}b`${x}`").unwrap();
        assert_eq!(literal, "\"a\\u2028b`${x}`\"");
    }
}
