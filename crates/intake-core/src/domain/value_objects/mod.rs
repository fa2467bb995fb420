//! Value Objects module
//!
//! Field validation and keystroke formatting. Every function here is pure and
//! safe to call on partial input: invalid input degrades to a message, never
//! to a panic.

pub mod email;
pub mod phone;
pub mod postal_code;
pub mod construction;

pub use email::validate_email;
pub use phone::{format_phone, validate_phone, PHONE_DIGITS};
pub use postal_code::{format_postal_code, validate_postal_code};
pub use construction::ConstructionType;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a single field validation
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub error: Option<String>,
}

impl ValidationResult {
    pub fn valid() -> Self {
        Self { is_valid: true, error: None }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self { is_valid: false, error: Some(message.into()) }
    }

    /// Error message, if invalid
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

/// Named text fields owned by the intake form
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldName {
    Name,
    Email,
    Phone,
    Address,
    PostalCode,
    City,
    Comment,
}

impl FieldName {
    pub const ALL: [FieldName; 7] = [
        Self::Name,
        Self::Email,
        Self::Phone,
        Self::Address,
        Self::PostalCode,
        Self::City,
        Self::Comment,
    ];

    /// Wire key used in submission payloads
    pub fn key(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Address => "address",
            Self::PostalCode => "postal_code",
            Self::City => "city",
            Self::Comment => "comment",
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
