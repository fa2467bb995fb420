//! Postal code validation and formatting (`DD-DDD`)

use regex::Regex;
use std::sync::OnceLock;

use super::ValidationResult;

/// Formatted length of a complete postal code
pub const POSTAL_CODE_LEN: usize = 6;

pub const POSTAL_CODE_REQUIRED: &str = "Kod pocztowy jest wymagany";
pub const POSTAL_CODE_INVALID: &str = "Kod pocztowy musi mieć format XX-XXX";

fn postal_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^[0-9]{2}-[0-9]{3}$").ok())
        .as_ref()
}

/// Validate a postal code
pub fn validate_postal_code(value: &str) -> ValidationResult {
    if value.is_empty() {
        return ValidationResult::invalid(POSTAL_CODE_REQUIRED);
    }

    if !postal_pattern().is_some_and(|re| re.is_match(value)) {
        return ValidationResult::invalid(POSTAL_CODE_INVALID);
    }

    ValidationResult::valid()
}

/// Insert the hyphen after the second digit; output never exceeds six characters
pub fn format_postal_code(raw: &str) -> String {
    let mut formatted = String::with_capacity(POSTAL_CODE_LEN);
    for (i, digit) in raw.chars().filter(|c| c.is_ascii_digit()).take(5).enumerate() {
        if i == 2 {
            formatted.push('-');
        }
        formatted.push(digit);
    }
    formatted
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_valid_postal_code() {
        assert!(validate_postal_code("44-151").is_valid);
        assert!(validate_postal_code("00-950").is_valid);
    }

    #[test]
    fn test_invalid_postal_code() {
        assert_eq!(validate_postal_code("").error(), Some(POSTAL_CODE_REQUIRED));
        assert_eq!(validate_postal_code("44151").error(), Some(POSTAL_CODE_INVALID));
        assert_eq!(validate_postal_code("4-4151").error(), Some(POSTAL_CODE_INVALID));
        assert_eq!(validate_postal_code("44-15").error(), Some(POSTAL_CODE_INVALID));
        assert_eq!(validate_postal_code("44-1511").error(), Some(POSTAL_CODE_INVALID));
    }

    #[test]
    fn test_format_inserts_hyphen() {
        assert_eq!(format_postal_code("44151"), "44-151");
        assert_eq!(format_postal_code("4"), "4");
        assert_eq!(format_postal_code("44"), "44");
        assert_eq!(format_postal_code("441"), "44-1");
    }

    #[test]
    fn test_format_truncates_overflow() {
        assert_eq!(format_postal_code("441511234"), "44-151");
        assert_eq!(format_postal_code("44-151-99"), "44-151");
    }

    #[test]
    fn test_format_ignores_non_digits() {
        assert_eq!(format_postal_code("ab44 15x1"), "44-151");
    }

    proptest! {
        #[test]
        fn format_is_idempotent(raw in ".{0,16}") {
            let once = format_postal_code(&raw);
            prop_assert_eq!(format_postal_code(&once), once.clone());
            prop_assert!(once.chars().count() <= POSTAL_CODE_LEN);
        }

        #[test]
        fn five_digits_always_validate(raw in "[0-9]{5}") {
            prop_assert!(validate_postal_code(&format_postal_code(&raw)).is_valid);
        }
    }
}
