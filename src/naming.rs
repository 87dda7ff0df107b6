//! Query-name derivation and pre-save validation.
//!
//! A query declares its own name in its source text:
//!
//! ```text
//! QUERY activeUsers ($region) =>
//!     ...
//! ```
//!
//! The declared token is everything after `QUERY ` up to (not including) the
//! first whitespace, `=`, `>`, newline, or `(`. The stored name is that token
//! normalized to snake_case, so `activeUsers` becomes `active_users`.

use thiserror::Error;

/// Characters that terminate a declared-name token.
const TOKEN_TERMINATORS: &[char] = &['=', '>', '\n', '('];

/// Extract the raw declared-name token from query content.
///
/// Scans for a `QUERY` keyword followed by at least one whitespace character
/// and returns the token that follows. Returns `None` when no declaration is
/// present.
pub fn extract_declared_name(content: &str) -> Option<&str> {
    declared_name_span(content).map(|(start, token)| &content[start..start + token.len()])
}

/// Byte offset and text of the declared-name token.
fn declared_name_span(content: &str) -> Option<(usize, &str)> {
    let mut search_from = 0;
    while let Some(pos) = content[search_from..].find("QUERY") {
        let after = search_from + pos + "QUERY".len();
        let rest = &content[after..];
        if rest.starts_with(char::is_whitespace) {
            let trimmed = rest.trim_start();
            let start = after + (rest.len() - trimmed.len());
            let end = trimmed
                .find(|c: char| c.is_whitespace() || TOKEN_TERMINATORS.contains(&c))
                .unwrap_or(trimmed.len());
            if end > 0 {
                return Some((start, &trimmed[..end]));
            }
        }
        search_from = after;
    }
    None
}

/// Normalize a token to snake_case.
///
/// Word boundaries are runs of non-alphanumeric characters and the border
/// between a lowercase/digit run and a following uppercase run. Returns
/// `None` when the token contains no alphanumeric material at all, so the
/// caller can fall back to the previous name explicitly.
pub fn to_snake_case(token: &str) -> Option<String> {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut prev_lower_or_digit = false;

    for c in token.chars() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower_or_digit = false;
            continue;
        }
        if c.is_uppercase() && prev_lower_or_digit && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        for lc in c.to_lowercase() {
            current.push(lc);
        }
        prev_lower_or_digit = c.is_lowercase() || c.is_numeric();
    }
    if !current.is_empty() {
        words.push(current);
    }

    if words.is_empty() {
        None
    } else {
        Some(words.join("_"))
    }
}

/// Derive the stored query name from content: extract the declared token and
/// normalize it. `None` means the content carries no usable declaration and
/// the previous name should be kept.
pub fn derive_query_name(content: &str) -> Option<String> {
    extract_declared_name(content).and_then(to_snake_case)
}

/// True when the content matches the full `QUERY <name> (` declaration shape
/// required before a save is allowed. Extraction alone is looser: it stops at
/// the opening paren without requiring one.
pub fn has_query_declaration(content: &str) -> bool {
    let Some((start, token)) = declared_name_span(content) else {
        return false;
    };
    content[start + token.len()..]
        .trim_start_matches([' ', '\t'])
        .starts_with('(')
}

/// Why a save was rejected before reaching the API.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SaveValidationError {
    #[error("query is empty")]
    EmptyContent,

    #[error("no changes to save")]
    NothingToSave,

    #[error("missing QUERY <name> ( declaration")]
    InvalidFormat,

    #[error("another query is already named '{0}'")]
    DuplicateName(String),
}

/// Pre-save validation, enforced at the UI layer before any network call.
///
/// `other_names` must hold the derived names of every query in the instance
/// *except* the one being saved.
pub fn validate_save(
    content: &str,
    dirty: bool,
    other_names: &[String],
) -> Result<String, SaveValidationError> {
    if content.trim().is_empty() {
        return Err(SaveValidationError::EmptyContent);
    }
    if !dirty {
        return Err(SaveValidationError::NothingToSave);
    }
    if !has_query_declaration(content) {
        return Err(SaveValidationError::InvalidFormat);
    }
    let name = derive_query_name(content).ok_or(SaveValidationError::InvalidFormat)?;
    if other_names.iter().any(|n| *n == name) {
        return Err(SaveValidationError::DuplicateName(name));
    }
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_simple_declaration() {
        assert_eq!(
            extract_declared_name("QUERY activeUsers ($region) =>"),
            Some("activeUsers")
        );
    }

    #[test]
    fn extraction_stops_at_paren() {
        assert_eq!(extract_declared_name("QUERY foo() =>"), Some("foo"));
    }

    #[test]
    fn extraction_stops_at_arrow() {
        assert_eq!(extract_declared_name("QUERY foo=>"), Some("foo"));
    }

    #[test]
    fn extraction_across_newline_token_boundary() {
        assert_eq!(extract_declared_name("QUERY foo\nbar"), Some("foo"));
    }

    #[test]
    fn no_declaration_yields_none() {
        assert_eq!(extract_declared_name("SELECT * FROM users"), None);
        assert_eq!(extract_declared_name(""), None);
    }

    #[test]
    fn keyword_requires_following_whitespace() {
        // "QUERYfoo" is not a declaration, but a later real one is found.
        assert_eq!(extract_declared_name("QUERYfoo QUERY bar ("), Some("bar"));
    }

    #[test]
    fn snake_case_camel() {
        assert_eq!(to_snake_case("activeUsers"), Some("active_users".into()));
        assert_eq!(to_snake_case("getHTTPResult"), Some("get_httpresult".into()));
    }

    #[test]
    fn snake_case_digit_boundary() {
        assert_eq!(to_snake_case("top10Rows"), Some("top10_rows".into()));
    }

    #[test]
    fn snake_case_separators() {
        assert_eq!(to_snake_case("my-query--name"), Some("my_query_name".into()));
        assert_eq!(to_snake_case("already_snake"), Some("already_snake".into()));
    }

    #[test]
    fn snake_case_no_alphanumerics() {
        assert_eq!(to_snake_case("$$$"), None);
        assert_eq!(to_snake_case(""), None);
    }

    #[test]
    fn derivation_is_deterministic() {
        let content = "QUERY dailyActiveUsers ($day) =>\n    ...";
        assert_eq!(derive_query_name(content), derive_query_name(content));
        assert_eq!(
            derive_query_name(content),
            Some("daily_active_users".into())
        );
    }

    #[test]
    fn declaration_requires_open_paren() {
        assert!(has_query_declaration("QUERY foo ()"));
        assert!(has_query_declaration("QUERY foo("));
        assert!(!has_query_declaration("QUERY foo =>"));
        assert!(!has_query_declaration("QUERY foo"));
    }

    #[test]
    fn validate_rejects_empty() {
        assert_eq!(
            validate_save("   \n ", true, &[]),
            Err(SaveValidationError::EmptyContent)
        );
    }

    #[test]
    fn validate_rejects_clean_edit() {
        assert_eq!(
            validate_save("QUERY foo ()", false, &[]),
            Err(SaveValidationError::NothingToSave)
        );
    }

    #[test]
    fn validate_rejects_bad_format() {
        assert_eq!(
            validate_save("SELECT 1", true, &[]),
            Err(SaveValidationError::InvalidFormat)
        );
    }

    #[test]
    fn validate_rejects_duplicate_name() {
        let others = vec!["foo".to_string(), "bar".to_string()];
        assert_eq!(
            validate_save("QUERY foo () =>", true, &others),
            Err(SaveValidationError::DuplicateName("foo".into()))
        );
    }

    #[test]
    fn duplicate_check_is_case_sensitive_post_normalization() {
        // "Foo" normalizes to "foo", which collides.
        let others = vec!["foo".to_string()];
        assert_eq!(
            validate_save("QUERY Foo () =>", true, &others),
            Err(SaveValidationError::DuplicateName("foo".into()))
        );
    }

    #[test]
    fn validate_accepts_good_save() {
        let others = vec!["bar".to_string()];
        assert_eq!(
            validate_save("QUERY foo ($x) =>", true, &others),
            Ok("foo".into())
        );
    }
}
