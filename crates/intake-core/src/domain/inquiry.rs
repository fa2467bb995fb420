//! Inquiry payload
//!
//! The draft is assembled only at submission time; nothing is kept between
//! sessions.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::attachments::AttachmentRecord;
use super::value_objects::ConstructionType;

/// Attachment metadata sent with an inquiry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentSummary {
    pub name: String,
    pub mime_type: String,
    pub size_bytes: u64,
}

impl From<&AttachmentRecord> for AttachmentSummary {
    fn from(record: &AttachmentRecord) -> Self {
        Self {
            name: record.file.name.clone(),
            mime_type: record.file.mime_type.clone(),
            size_bytes: record.file.size_bytes,
        }
    }
}

/// Everything the visitor entered
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InquiryDraft {
    pub construction_type: Option<ConstructionType>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub postal_code: String,
    pub city: String,
    pub comment: String,
    pub preferred_date: Option<NaiveDate>,
    #[serde(default)]
    pub attachments: Vec<AttachmentSummary>,
    /// Honeypot; never set by a person
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
}

/// Backend answer to a submission
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadReceipt {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub errors: BTreeMap<String, String>,
}

impl LeadReceipt {
    pub fn accepted() -> Self {
        Self {
            ok: true,
            ..Default::default()
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: Some(message.into()),
            errors: BTreeMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_wire_shape() {
        let draft = InquiryDraft {
            construction_type: Some(ConstructionType::Pergola),
            name: "Jan Kowalski".into(),
            phone: "123 456 789".into(),
            preferred_date: NaiveDate::from_ymd_opt(2027, 3, 1),
            ..Default::default()
        };

        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["construction_type"], "pergola");
        assert_eq!(json["preferred_date"], "2027-03-01");
        assert!(json.get("company").is_none());
    }

    #[test]
    fn test_receipt_decodes_minimal_body() {
        let receipt: LeadReceipt = serde_json::from_str(r#"{"ok":true}"#).unwrap();
        assert_eq!(receipt, LeadReceipt::accepted());

        let receipt: LeadReceipt = serde_json::from_str(
            r#"{"ok":false,"message":"Wpisz imię i telefon.","errors":{"phone":"x"}}"#,
        )
        .unwrap();
        assert!(!receipt.ok);
        assert_eq!(receipt.errors["phone"], "x");
    }
}
