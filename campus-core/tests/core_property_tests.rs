use campus_core::validate::{validate_established_year, validate_phone, MIN_ESTABLISHED_YEAR};
use campus_core::{meets_threshold, normalize_code, CodeScope, CodeStyle, DepartmentId, MIN_CODE_LEN};
use proptest::prelude::*;

proptest! {
    // ========================================================================
    // Normalization
    // ========================================================================

    #[test]
    fn normalize_is_idempotent(raw in "[ A-Za-z0-9_-]{0,24}", upper in prop::bool::ANY) {
        let style = if upper { CodeStyle::Upper } else { CodeStyle::AsTyped };
        let once = normalize_code(&raw, style);
        let twice = normalize_code(&once, style);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn normalize_ignores_surrounding_whitespace(
        code in "[A-Za-z0-9]{1,12}",
        left in "[ \t]{0,4}",
        right in "[ \t]{0,4}",
    ) {
        let padded = format!("{left}{code}{right}");
        prop_assert_eq!(
            normalize_code(&padded, CodeStyle::Upper),
            code.to_uppercase()
        );
    }

    #[test]
    fn threshold_matches_char_count(code in "[A-Z0-9]{0,6}") {
        prop_assert_eq!(meets_threshold(&code, MIN_CODE_LEN), code.len() >= MIN_CODE_LEN);
    }

    // ========================================================================
    // Scope keys
    // ========================================================================

    #[test]
    fn course_scope_equality_follows_department(a in "[a-f0-9]{6}", b in "[a-f0-9]{6}") {
        let left = CodeScope::Course { department_id: DepartmentId::new(a.clone()) };
        let right = CodeScope::Course { department_id: DepartmentId::new(b.clone()) };
        prop_assert_eq!(left == right, a == b);
    }

    // ========================================================================
    // Registration rules
    // ========================================================================

    #[test]
    fn any_ten_digit_phone_accepted(phone in "[0-9]{10}") {
        prop_assert!(validate_phone(&phone).is_ok());
    }

    #[test]
    fn short_phone_rejected(phone in "[0-9]{0,9}") {
        prop_assert!(validate_phone(&phone).is_err());
    }

    #[test]
    fn years_in_range_accepted(year in MIN_ESTABLISHED_YEAR..=2026i32) {
        prop_assert_eq!(validate_established_year(&year.to_string(), 2026), Ok(year));
    }

    #[test]
    fn future_years_rejected(delta in 1i32..500) {
        let year = 2026 + delta;
        prop_assert!(validate_established_year(&year.to_string(), 2026).is_err());
    }
}
