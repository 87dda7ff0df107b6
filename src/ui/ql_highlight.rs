use ratatui::style::Style;
use ratatui::text::Span;

use super::theme::Theme;

/// Query-language keywords to highlight
pub const QL_KEYWORDS: &[&str] = &[
    "QUERY", "SELECT", "FROM", "WHERE", "AND", "OR", "NOT", "IN", "IS", "NULL",
    "AS", "JOIN", "ON", "ORDER", "BY", "ASC", "DESC", "GROUP", "HAVING",
    "LIMIT", "OFFSET", "UNION", "DISTINCT", "EXISTS", "CASE", "WHEN", "THEN",
    "ELSE", "END", "TRUE", "FALSE", "LIKE", "BETWEEN", "INSERT", "INTO",
    "VALUES", "UPDATE", "SET", "DELETE", "RETURNING", "WITH", "RETURN",
];

/// Highlight one line of query text, returning styled spans. Parameters
/// (`$name`) get the number color, single-quoted strings the string color,
/// `//` comments the comment color.
pub fn highlight_line(text: &str) -> Vec<Span<'static>> {
    let keyword_style = Style::default().fg(Theme::ql_keyword());
    let string_style = Style::default().fg(Theme::ql_string());
    let number_style = Style::default().fg(Theme::ql_number());
    let comment_style = Style::default().fg(Theme::ql_comment());
    let default_style = Style::default().fg(Theme::fg());

    let mut spans: Vec<Span<'static>> = Vec::new();
    let chars: Vec<char> = text.chars().collect();
    let len = chars.len();
    let mut i = 0;

    while i < len {
        let c = chars[i];

        // Line comment runs to end of line
        if c == '/' && i + 1 < len && chars[i + 1] == '/' {
            let s: String = chars[i..].iter().collect();
            spans.push(Span::styled(s, comment_style));
            break;
        }

        // String literal
        if c == '\'' {
            let start = i;
            i += 1;
            while i < len {
                if chars[i] == '\'' {
                    i += 1;
                    break;
                }
                i += 1;
            }
            let s: String = chars[start..i].iter().collect();
            spans.push(Span::styled(s, string_style));
            continue;
        }

        // Named parameter $param
        if c == '$' && i + 1 < len && (chars[i + 1].is_alphanumeric() || chars[i + 1] == '_') {
            let start = i;
            i += 1;
            while i < len && (chars[i].is_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let s: String = chars[start..i].iter().collect();
            spans.push(Span::styled(s, number_style));
            continue;
        }

        // Number
        if c.is_ascii_digit() {
            let start = i;
            while i < len && (chars[i].is_ascii_digit() || chars[i] == '.') {
                i += 1;
            }
            let num: String = chars[start..i].iter().collect();
            spans.push(Span::styled(num, number_style));
            continue;
        }

        // Identifier or keyword
        if c.is_alphabetic() || c == '_' {
            let start = i;
            while i < len && (chars[i].is_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            let upper = word.to_uppercase();
            let style = if QL_KEYWORDS.contains(&upper.as_str()) {
                keyword_style
            } else {
                default_style
            };
            spans.push(Span::styled(word, style));
            continue;
        }

        // Anything else (whitespace, operators, punctuation)
        let start = i;
        while i < len {
            let ch = chars[i];
            if ch.is_alphanumeric() || ch == '_' || ch == '\'' || ch == '$' || ch == '/' {
                break;
            }
            i += 1;
        }
        if i == start {
            i += 1;
        }
        let other: String = chars[start..i].iter().collect();
        spans.push(Span::styled(other, default_style));
    }

    spans
}
