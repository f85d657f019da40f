//! CSS escaping for injected stylesheet rules.

/// Escape a value for use inside a single-quoted CSS string, such as `url('...')`.
///
/// Backslashes and quotes are escaped, line breaks and `<` are written as CSS
/// hex escapes so the value cannot end the string or the enclosing `<style>`.
pub fn css_string_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '"' => out.push_str("\\\""),
            '<' => out.push_str("\\3c "),
            '\n' => out.push_str("\\a "),
            '\r' => out.push_str("\\d "),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_string_escape() {
        assert_eq!(css_string_escape("images/bg.jpg"), "images/bg.jpg");
        assert_eq!(css_string_escape("a\\b"), "a\\\\b");
        assert_eq!(css_string_escape("x'); }"), "x\\'); }");
        assert_eq!(css_string_escape("</style>"), "\\3c /style>");
    }
}
