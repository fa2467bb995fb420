//! Email validation
//!
//! Accepts the usual `local@domain.tld` shape: no whitespace, exactly one
//! `@`, and at least one dot inside the domain with content on both sides.

use super::ValidationResult;

pub const EMAIL_REQUIRED: &str = "Email jest wymagany";
pub const EMAIL_INVALID: &str = "Nieprawidłowy format adresu email";

/// Validate an email address as typed
pub fn validate_email(value: &str) -> ValidationResult {
    if value.is_empty() {
        return ValidationResult::invalid(EMAIL_REQUIRED);
    }

    if !is_valid_format(value) {
        return ValidationResult::invalid(EMAIL_INVALID);
    }

    ValidationResult::valid()
}

fn is_valid_format(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    // At least two labels, none of them empty
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && domain.split('.').all(|label| !label.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_email() {
        assert!(validate_email("jan@x.pl").is_valid);
        assert!(validate_email("jan.kowalski@poczta.example.com").is_valid);
    }

    #[test]
    fn test_empty_email_is_required() {
        let result = validate_email("");
        assert!(!result.is_valid);
        assert_eq!(result.error(), Some(EMAIL_REQUIRED));
    }

    #[test]
    fn test_invalid_email_no_at() {
        assert_eq!(validate_email("jan.x.pl").error(), Some(EMAIL_INVALID));
    }

    #[test]
    fn test_invalid_email_no_dot_in_domain() {
        assert!(!validate_email("jan@localhost").is_valid);
    }

    #[test]
    fn test_invalid_email_whitespace() {
        assert!(!validate_email("jan kowalski@x.pl").is_valid);
        assert!(!validate_email(" jan@x.pl").is_valid);
    }

    #[test]
    fn test_invalid_email_dangling_dots() {
        assert!(!validate_email("jan@.pl").is_valid);
        assert!(!validate_email("jan@x.").is_valid);
        assert!(!validate_email("jan@x..pl").is_valid);
    }

    #[test]
    fn test_invalid_email_second_at() {
        assert!(!validate_email("jan@x@y.pl").is_valid);
        assert!(!validate_email("@x.pl").is_valid);
    }

    #[test]
    fn test_partial_input_never_panics() {
        for partial in ["j", "ja@", "@", "@@", "jan@x", "jan@x."] {
            assert!(!validate_email(partial).is_valid);
        }
    }
}
