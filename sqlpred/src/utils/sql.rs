//! SQL utility functions

/// Escape SQL LIKE metacharacters (%, _, \) in user input
///
/// Use this when building LIKE patterns from user input to prevent
/// unintended pattern matching. Patterns built from escaped input must be
/// followed by `ESCAPE '\'`.
///
/// # Example
///
/// ```
/// use sqlpred::utils::sql::escape_like_pattern;
///
/// let user_input = "100% match_test";
/// let pattern = format!("%{}%", escape_like_pattern(user_input));
/// assert_eq!(pattern, "%100\\% match\\_test%");
/// ```
pub fn escape_like_pattern(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Quote text as a SQL string literal, doubling embedded single quotes
///
/// ```
/// use sqlpred::utils::sql::quote_literal;
///
/// assert_eq!(quote_literal("O'Brien"), "'O''Brien'");
/// ```
pub fn quote_literal(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like_pattern_plain() {
        assert_eq!(escape_like_pattern("hello"), "hello");
        assert_eq!(escape_like_pattern(""), "");
    }

    #[test]
    fn test_escape_like_pattern_wildcards() {
        assert_eq!(escape_like_pattern("50%"), "50\\%");
        assert_eq!(escape_like_pattern("snake_case"), "snake\\_case");
    }

    #[test]
    fn test_escape_like_pattern_backslash_first() {
        // Backslash must be doubled before the wildcards gain their escapes
        assert_eq!(escape_like_pattern("a\\%"), "a\\\\\\%");
    }

    #[test]
    fn test_quote_literal_plain() {
        assert_eq!(quote_literal("abc"), "'abc'");
        assert_eq!(quote_literal(""), "''");
    }

    #[test]
    fn test_quote_literal_embedded_quotes() {
        assert_eq!(quote_literal("it's"), "'it''s'");
        assert_eq!(quote_literal("'; DROP TABLE t; --"), "'''; DROP TABLE t; --'");
    }

    #[test]
    fn test_quote_literal_leaves_wildcards() {
        assert_eq!(quote_literal("%_\\"), "'%_\\'");
    }
}
