/// Escape text for embedding in HTML
///
/// Covers `&`, `<`, `>`, `"` and `'`; output is never parsed again.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escapes_markup() {
        assert_eq!(
            escape_html(r#"<b>"Bot" & 'Co'</b>"#),
            "&lt;b&gt;&quot;Bot&quot; &amp; &#039;Co&#039;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_plain_text_untouched() {
        assert_eq!(escape_html("Firefox 3.0.1"), "Firefox 3.0.1");
    }
}
