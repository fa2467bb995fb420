//! Lead submission endpoint
//!
//! Accepts the intake form as JSON, urlencoded or multipart. A filled
//! honeypot is answered with success and dropped; otherwise name and phone
//! are required and every other supplied field is checked with the same
//! validators the form uses.

use axum::{
    async_trait,
    extract::{FromRequest, Multipart, Request, State},
    http::{header, StatusCode},
    Form, Json,
};
use chrono::NaiveDate;
use intake_core::{
    validate_email, validate_phone, validate_postal_code, AttachmentPolicy, ConstructionType,
    DateAvailability, FileHandle,
};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::ApiError;
use crate::models::{present, AttachmentInfo, LeadResponse, LeadSubmission};
use crate::ApiState;

pub const MSG_NAME_AND_PHONE: &str = "Wpisz imię i telefon.";
pub const MSG_INVALID_FIELDS: &str = "Popraw błędy w formularzu.";
pub const MSG_INVALID_DATE: &str = "Nieprawidłowa data";
pub const MSG_UNKNOWN_TYPE: &str = "Nieznany typ konstrukcji";

/// Submission body in any of the accepted encodings
pub struct LeadPayload(pub LeadSubmission);

#[async_trait]
impl<S> FromRequest<S> for LeadPayload
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mime = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
            .map(|v| v.trim().to_ascii_lowercase())
            .unwrap_or_default();

        match mime.as_str() {
            "application/json" => {
                let Json(submission) = Json::<LeadSubmission>::from_request(req, state)
                    .await
                    .map_err(|e| ApiError::from_rejection(e.status(), e.body_text()))?;
                Ok(Self(submission))
            }
            "application/x-www-form-urlencoded" => {
                let Form(submission) = Form::<LeadSubmission>::from_request(req, state)
                    .await
                    .map_err(|e| ApiError::from_rejection(e.status(), e.body_text()))?;
                Ok(Self(submission))
            }
            "multipart/form-data" => {
                let multipart = Multipart::from_request(req, state)
                    .await
                    .map_err(|e| ApiError::from_rejection(e.status(), e.body_text()))?;
                read_multipart(multipart).await.map(Self)
            }
            _ => Err(ApiError::UnsupportedMediaType(mime)),
        }
    }
}

/// Text parts become fields, file parts become attachment metadata
async fn read_multipart(mut multipart: Multipart) -> Result<LeadSubmission, ApiError> {
    let mut submission = LeadSubmission::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::from_rejection(e.status(), e.body_text()))?
    {
        let key = field.name().unwrap_or_default().to_string();

        if let Some(file_name) = field.file_name().map(str::to_string) {
            let mime_type = field.content_type().unwrap_or_default().to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::from_rejection(e.status(), e.body_text()))?;
            // Browsers send an empty part for an untouched file input
            if file_name.is_empty() && bytes.is_empty() {
                continue;
            }
            submission.attachments.push(AttachmentInfo {
                name: file_name,
                mime_type,
                size_bytes: bytes.len() as u64,
            });
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| ApiError::from_rejection(e.status(), e.body_text()))?;
        if !submission.set_text(&key, value) {
            tracing::trace!(key = %key, "Ignoring unknown form field");
        }
    }

    Ok(submission)
}

/// Outcome of checking one submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Honeypot filled; pretend success
    Honeypot,
    /// Name or phone missing
    MissingRequired,
    /// Field key to message
    Invalid(BTreeMap<String, String>),
    Accepted,
}

/// Check a submission against the intake rules
pub fn review(
    submission: &LeadSubmission,
    availability: &DateAvailability,
    policy: &AttachmentPolicy,
) -> Verdict {
    if present(&submission.company).is_some() {
        return Verdict::Honeypot;
    }

    let (Some(_), Some(phone)) = (present(&submission.name), present(&submission.phone)) else {
        return Verdict::MissingRequired;
    };

    let mut errors = BTreeMap::new();
    let mut report = |key: &str, error: Option<String>| {
        if let Some(error) = error {
            errors.insert(key.to_string(), error);
        }
    };

    report("phone", validate_phone(phone).error);
    if let Some(email) = present(&submission.email) {
        report("email", validate_email(email).error);
    }
    if let Some(postal_code) = present(&submission.postal_code) {
        report("postal_code", validate_postal_code(postal_code).error);
    }
    if let Some(kind) = present(&submission.construction_type) {
        if kind.parse::<ConstructionType>().is_err() {
            report("construction_type", Some(MSG_UNKNOWN_TYPE.into()));
        }
    }
    if let Some(date) = present(&submission.preferred_date) {
        report("preferred_date", check_date(date, availability));
    }
    let rejection = submission.attachments.iter().enumerate().find_map(|(held, info)| {
        let file = FileHandle::new(&info.name, &info.mime_type, info.size_bytes);
        policy
            .check(&file, held)
            .err()
            .map(|reason| format!("{}: {}", info.name, reason))
    });
    report("attachments", rejection);

    if errors.is_empty() {
        Verdict::Accepted
    } else {
        Verdict::Invalid(errors)
    }
}

fn check_date(value: &str, availability: &DateAvailability) -> Option<String> {
    let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") else {
        return Some(MSG_INVALID_DATE.into());
    };
    if availability.is_selectable(date) {
        return None;
    }
    Some(format!(
        "Wybierz termin od {}",
        availability.express_min_date().format("%d.%m.%Y")
    ))
}

/// Submit a lead
#[utoipa::path(
    post,
    path = "/api/lead",
    request_body(
        content = LeadSubmission,
        description = "JSON, urlencoded or multipart form",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Lead accepted", body = LeadResponse),
        (status = 400, description = "Missing or invalid fields", body = LeadResponse),
        (status = 415, description = "Unsupported content type", body = LeadResponse)
    ),
    tag = "lead"
)]
pub async fn submit_lead(
    State(state): State<Arc<ApiState>>,
    LeadPayload(submission): LeadPayload,
) -> (StatusCode, Json<LeadResponse>) {
    let availability = DateAvailability::from_clock(state.clock.as_ref(), state.config.lead_time);

    match review(&submission, &availability, &state.config.attachments) {
        Verdict::Honeypot => {
            tracing::info!("Honeypot filled, dropping lead");
            (StatusCode::OK, Json(LeadResponse::success()))
        }
        Verdict::MissingRequired => (
            StatusCode::BAD_REQUEST,
            Json(LeadResponse::failure(MSG_NAME_AND_PHONE)),
        ),
        Verdict::Invalid(errors) => {
            tracing::debug!(fields = ?errors.keys().collect::<Vec<_>>(), "Lead has invalid fields");
            (
                StatusCode::BAD_REQUEST,
                Json(LeadResponse::invalid(MSG_INVALID_FIELDS, errors)),
            )
        }
        Verdict::Accepted => {
            tracing::info!(
                construction_type = present(&submission.construction_type).unwrap_or("-"),
                city = present(&submission.city).unwrap_or("-"),
                preferred_date = present(&submission.preferred_date).unwrap_or("-"),
                attachments = submission.attachments.len(),
                "Lead accepted"
            );
            (StatusCode::OK, Json(LeadResponse::success()))
        }
    }
}
