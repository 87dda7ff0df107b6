use unicode_width::UnicodeWidthChar;

/// Truncate a string to at most `max_width` display columns, appending an
/// ellipsis when anything was cut.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut width = 0;
    let mut out = String::new();
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if width + w > max_width.saturating_sub(1) {
            out.push('…');
            return out;
        }
        width += w;
        out.push(c);
    }
    out
}

/// Single-line preview of query content for list rows.
pub fn inline_preview(s: &str, max_width: usize) -> String {
    let collapsed: String = s.split_whitespace().collect::<Vec<_>>().join(" ");
    truncate_to_width(&collapsed, max_width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_strings_pass_through() {
        assert_eq!(truncate_to_width("hello", 10), "hello");
    }

    #[test]
    fn long_strings_get_ellipsis() {
        let out = truncate_to_width("abcdefghij", 5);
        assert!(out.ends_with('…'));
        assert!(out.chars().count() <= 5);
    }

    #[test]
    fn wide_chars_count_double() {
        let out = truncate_to_width("日本語テスト", 5);
        assert!(out.ends_with('…'));
    }

    #[test]
    fn preview_collapses_newlines() {
        assert_eq!(inline_preview("a\n  b\tc", 20), "a b c");
    }
}
