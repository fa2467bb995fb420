//! API Models

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// Attachment metadata carried with a lead
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AttachmentInfo {
    pub name: String,
    #[serde(default, alias = "type")]
    pub mime_type: String,
    #[serde(default, alias = "size")]
    pub size_bytes: u64,
}

/// Lead submission, as sent by the intake form.
///
/// Every field is optional on the wire; blank strings count as missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct LeadSubmission {
    /// Construction type id, e.g. `classic-warm`
    #[serde(alias = "type", alias = "constructionType")]
    pub construction_type: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    #[serde(alias = "postalCode")]
    pub postal_code: Option<String>,
    pub city: Option<String>,
    pub comment: Option<String>,
    /// ISO date, `YYYY-MM-DD`
    #[serde(alias = "preferredDate", alias = "date")]
    pub preferred_date: Option<String>,
    pub attachments: Vec<AttachmentInfo>,
    /// Honeypot
    pub company: Option<String>,
}

impl LeadSubmission {
    /// Assign a text field by its form key; unknown keys are ignored
    pub fn set_text(&mut self, key: &str, value: String) -> bool {
        let slot = match key {
            "type" | "construction_type" | "constructionType" => &mut self.construction_type,
            "name" => &mut self.name,
            "email" => &mut self.email,
            "phone" => &mut self.phone,
            "address" => &mut self.address,
            "postal_code" | "postalCode" => &mut self.postal_code,
            "city" => &mut self.city,
            "comment" => &mut self.comment,
            "preferred_date" | "preferredDate" | "date" => &mut self.preferred_date,
            "company" => &mut self.company,
            _ => return false,
        };
        *slot = Some(value);
        true
    }
}

/// Trimmed value, `None` when blank
pub fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Lead endpoint answer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LeadResponse {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Field key to message
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub errors: BTreeMap<String, String>,
}

impl LeadResponse {
    pub fn success() -> Self {
        Self {
            ok: true,
            ..Default::default()
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: Some(message.into()),
            errors: BTreeMap::new(),
        }
    }

    pub fn invalid(message: impl Into<String>, errors: BTreeMap<String, String>) -> Self {
        Self {
            ok: false,
            message: Some(message.into()),
            errors,
        }
    }
}

/// Serviceable location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Location {
    pub city: String,
}
