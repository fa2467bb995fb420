//! Phone validation and formatting
//!
//! Local (national) numbers only: nine digits, displayed as `123 456 789`.

use super::ValidationResult;

/// Digits in a local phone number
pub const PHONE_DIGITS: usize = 9;

pub const PHONE_REQUIRED: &str = "Numer telefonu jest wymagany";
pub const PHONE_INVALID_CHARACTERS: &str = "Numer telefonu może zawierać tylko cyfry";
pub const PHONE_INVALID_LENGTH: &str = "Numer telefonu musi mieć 9 cyfr";

fn is_separator(c: char) -> bool {
    matches!(c, ' ' | '-' | '(' | ')' | '.')
}

fn digits(raw: &str) -> impl Iterator<Item = char> + '_ {
    raw.chars().filter(|c| c.is_ascii_digit())
}

/// Validate a phone number after stripping formatting characters
pub fn validate_phone(value: &str) -> ValidationResult {
    if value.trim().is_empty() {
        return ValidationResult::invalid(PHONE_REQUIRED);
    }

    if !value.chars().all(|c| c.is_ascii_digit() || is_separator(c)) {
        return ValidationResult::invalid(PHONE_INVALID_CHARACTERS);
    }

    if digits(value).count() != PHONE_DIGITS {
        return ValidationResult::invalid(PHONE_INVALID_LENGTH);
    }

    ValidationResult::valid()
}

/// Group digits 3-3-3 as they are typed, dropping anything past nine digits
pub fn format_phone(raw: &str) -> String {
    let mut formatted = String::with_capacity(PHONE_DIGITS + 2);
    for (i, digit) in digits(raw).take(PHONE_DIGITS).enumerate() {
        if i > 0 && i % 3 == 0 {
            formatted.push(' ');
        }
        formatted.push(digit);
    }
    formatted
}
