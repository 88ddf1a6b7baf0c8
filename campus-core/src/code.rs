//! Code normalization
//!
//! Codes are compared and transmitted in normalized form only: surrounding
//! whitespace is stripped and, for code-like fields, letters are upper-cased.

use serde::{Deserialize, Serialize};

/// Minimum number of characters before a code is worth checking.
pub const MIN_CODE_LEN: usize = 2;

/// How a raw field value is folded before comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CodeStyle {
    /// Trim and upper-case (institution, branch and course codes).
    #[default]
    Upper,
    /// Trim only (department codes keep the casing the user typed).
    AsTyped,
}

/// Normalize a raw field value according to `style`.
pub fn normalize_code(raw: &str, style: CodeStyle) -> String {
    let trimmed = raw.trim();
    match style {
        CodeStyle::Upper => trimmed.to_uppercase(),
        CodeStyle::AsTyped => trimmed.to_string(),
    }
}

/// Whether a normalized value is long enough to be checked.
///
/// Counts characters, not bytes.
pub fn meets_threshold(value: &str, min_len: usize) -> bool {
    value.chars().count() >= min_len
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trims_and_uppercases() {
        assert_eq!(normalize_code("  cs101 ", CodeStyle::Upper), "CS101");
    }

    #[test]
    fn test_normalize_as_typed_keeps_case() {
        assert_eq!(normalize_code(" Mech ", CodeStyle::AsTyped), "Mech");
    }

    #[test]
    fn test_threshold_counts_chars() {
        assert!(!meets_threshold("", MIN_CODE_LEN));
        assert!(!meets_threshold("C", MIN_CODE_LEN));
        assert!(meets_threshold("CS", MIN_CODE_LEN));
        // One multi-byte character is still one character.
        assert!(!meets_threshold("É", MIN_CODE_LEN));
    }
}
