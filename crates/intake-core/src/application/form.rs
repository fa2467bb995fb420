//! Intake form controller
//!
//! One form session: field values and their inline errors, the construction
//! type, the calendar, the attachments and the retention prompt. Submission
//! re-validates everything, posts the assembled draft and resets the session
//! only when the backend confirms.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::broadcast;

use crate::config::IntakeConfig;
use crate::domain::attachments::{
    AcceptOutcome, AttachmentId, AttachmentManager, AttachmentRecord, FileHandle, PreviewStore,
    StepSource, UploadEvent,
};
use crate::domain::calendar::{Calendar, Clock};
use crate::domain::inquiry::{AttachmentSummary, InquiryDraft, LeadReceipt};
use crate::domain::progress::{CompletionSignals, SubmitGate};
use crate::domain::value_objects::{
    format_phone, format_postal_code, validate_email, validate_phone, validate_postal_code,
    ConstructionType, FieldName, ValidationResult,
};
use crate::ports::outbound::{GatewayError, LeadGateway};

use super::notifications::{Notification, NotificationKind, Notifications};

pub const MSG_SUBMITTED: &str = "Dziękujemy! Wkrótce się odezwiemy.";
pub const MSG_NETWORK_ERROR: &str = "Błąd sieci.";
pub const MSG_SUBMIT_FAILED: &str = "Błąd wysyłki.";
pub const MSG_FIX_ERRORS: &str = "Popraw błędy w formularzu przed wysłaniem";
pub const MSG_RETENTION_THANKS: &str = "Dziękujemy! Sprawdź swoją skrzynkę email.";
pub const NAME_REQUIRED: &str = "Imię jest wymagane";
const NOT_SELECTED: &str = "Nie wybrano";

/// Submission failure
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// Progress is below the submit threshold
    #[error("form is {progress}% complete, below the submit threshold")]
    Incomplete { progress: u8 },

    /// One or more fields failed validation
    #[error("{} field(s) failed validation", .0.len())]
    Invalid(Vec<(FieldName, String)>),

    /// Backend answered but did not accept the inquiry
    #[error("inquiry rejected: {0}")]
    Rejected(String),

    /// Backend could not be reached
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// Side panel contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormSummary {
    pub construction_type: String,
    pub date: String,
    pub attachments: usize,
    pub progress: u8,
}

/// Exit-intent retention prompt
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RetentionPrompt {
    pub open: bool,
    pub email: String,
    pub error: Option<String>,
}

/// Intake form session
pub struct IntakeForm {
    config: IntakeConfig,
    gate: SubmitGate,
    clock: Arc<dyn Clock>,
    gateway: Arc<dyn LeadGateway>,
    fields: BTreeMap<FieldName, String>,
    errors: BTreeMap<FieldName, String>,
    touched: BTreeSet<FieldName>,
    construction_type: Option<ConstructionType>,
    calendar: Calendar,
    attachments: AttachmentManager,
    notifications: Notifications,
    retention: RetentionPrompt,
}

impl IntakeForm {
    pub fn new(
        config: IntakeConfig,
        clock: Arc<dyn Clock>,
        gateway: Arc<dyn LeadGateway>,
        previews: Arc<dyn PreviewStore>,
    ) -> Self {
        let calendar = Calendar::new(clock.today(), config.lead_time, None);
        let attachments = AttachmentManager::new(
            config.attachments.clone(),
            config.uploads,
            previews,
        );

        Self {
            gate: config.submit_gate(),
            notifications: Notifications::new(config.notification_ttl()),
            config,
            clock,
            gateway,
            fields: BTreeMap::new(),
            errors: BTreeMap::new(),
            touched: BTreeSet::new(),
            construction_type: None,
            calendar,
            attachments,
            retention: RetentionPrompt::default(),
        }
    }

    /// Replace the upload increment source
    pub fn with_step_source(mut self, steps: Arc<dyn StepSource>) -> Self {
        self.attachments = self.attachments.with_step_source(steps);
        self
    }

    // ---------------------------------------------------------------------
    // Fields
    // ---------------------------------------------------------------------

    pub fn field(&self, field: FieldName) -> &str {
        self.fields.get(&field).map(String::as_str).unwrap_or("")
    }

    /// Inline error currently shown for a field
    pub fn error(&self, field: FieldName) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn errors(&self) -> &BTreeMap<FieldName, String> {
        &self.errors
    }

    pub fn is_touched(&self, field: FieldName) -> bool {
        self.touched.contains(&field)
    }

    /// Apply a keystroke-level edit. Phone and postal code are reformatted;
    /// inline errors update only for fields already blurred once.
    pub fn set_field(&mut self, field: FieldName, value: impl Into<String>) {
        let value = value.into();
        let value = match field {
            FieldName::Phone => format_phone(&value),
            FieldName::PostalCode => format_postal_code(&value),
            _ => value,
        };
        self.fields.insert(field, value);
        self.refresh_error(field);
    }

    /// Field lost focus
    pub fn blur(&mut self, field: FieldName) {
        self.touched.insert(field);
        self.refresh_error(field);
    }

    fn refresh_error(&mut self, field: FieldName) {
        let Some(result) = validate_field(field, self.field(field)) else {
            return;
        };
        match result.error {
            Some(message) if !result.is_valid && self.is_touched(field) => {
                self.errors.insert(field, message);
            }
            _ => {
                self.errors.remove(&field);
            }
        }
    }

    // ---------------------------------------------------------------------
    // Construction type and date
    // ---------------------------------------------------------------------

    pub fn construction_type(&self) -> Option<ConstructionType> {
        self.construction_type
    }

    pub fn select_type(&mut self, kind: ConstructionType) {
        self.construction_type = Some(kind);
    }

    pub fn calendar(&self) -> &Calendar {
        &self.calendar
    }

    /// Activate the calendar; reference dates are recomputed from the clock
    pub fn open_calendar(&mut self) {
        self.calendar = Calendar::new(
            self.clock.today(),
            self.config.lead_time,
            self.calendar.selected(),
        );
        self.calendar.open();
    }

    pub fn close_calendar(&mut self) {
        self.calendar.close();
    }

    pub fn navigate_month(&mut self, direction: i32) -> (u32, i32) {
        self.calendar.navigate_month(direction)
    }

    /// Pick a date; non-selectable dates are ignored
    pub fn select_date(&mut self, date: NaiveDate) -> bool {
        self.calendar.select(date).is_some()
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.calendar.selected()
    }

    // ---------------------------------------------------------------------
    // Attachments
    // ---------------------------------------------------------------------

    /// Accept picked files; every rejection becomes an error notification
    pub fn add_files(&mut self, files: Vec<FileHandle>) -> AcceptOutcome {
        let outcome = self.attachments.accept(files);
        for rejection in &outcome.rejected {
            self.notifications
                .push(NotificationKind::Error, rejection.to_string());
        }
        outcome
    }

    pub fn remove_file(&mut self, id: &AttachmentId) -> bool {
        self.attachments.remove(id)
    }

    pub fn attachments(&self) -> Vec<AttachmentRecord> {
        self.attachments.records()
    }

    pub fn upload_events(&self) -> broadcast::Receiver<UploadEvent> {
        self.attachments.subscribe()
    }

    // ---------------------------------------------------------------------
    // Progress, gate and summary
    // ---------------------------------------------------------------------

    pub fn signals(&self) -> CompletionSignals {
        let filled = |field| !self.field(field).trim().is_empty();
        CompletionSignals {
            construction_type: self.construction_type.is_some(),
            name: filled(FieldName::Name),
            email: filled(FieldName::Email),
            phone: filled(FieldName::Phone),
            address: filled(FieldName::Address),
            postal_code: filled(FieldName::PostalCode),
            city: filled(FieldName::City),
            date: self.calendar.selected().is_some(),
            attachment: !self.attachments.is_empty(),
        }
    }

    pub fn progress(&self) -> u8 {
        self.signals().progress()
    }

    pub fn can_submit(&self) -> bool {
        self.gate.is_open(self.progress())
    }

    pub fn submit_label(&self) -> String {
        self.gate.label(self.progress())
    }

    pub fn summary(&self) -> FormSummary {
        FormSummary {
            construction_type: self
                .construction_type
                .map(|t| t.name().to_string())
                .unwrap_or_else(|| NOT_SELECTED.to_string()),
            date: self
                .calendar
                .selected()
                .map(|d| d.format("%d.%m.%Y").to_string())
                .unwrap_or_else(|| NOT_SELECTED.to_string()),
            attachments: self.attachments.len(),
            progress: self.progress(),
        }
    }

    // ---------------------------------------------------------------------
    // Notifications and retention prompt
    // ---------------------------------------------------------------------

    pub fn notifications(&mut self) -> Vec<Notification> {
        self.notifications.active()
    }

    pub fn retention_prompt(&self) -> &RetentionPrompt {
        &self.retention
    }

    /// Pointer left the viewport at `client_y`
    pub fn pointer_left(&mut self, client_y: f64) -> bool {
        let progress = self.progress();
        if client_y <= 0.0 && progress > 0 && progress < 100 && !self.retention.open {
            tracing::debug!(progress, "Exit intent, showing retention prompt");
            self.retention.open = true;
        }
        self.retention.open
    }

    pub fn set_retention_email(&mut self, email: impl Into<String>) {
        self.retention.email = email.into();
        self.retention.error = None;
    }

    /// Submit the prompt's email; the prompt closes only on a valid address
    pub fn submit_retention(&mut self) -> bool {
        let result = validate_email(&self.retention.email);
        if !result.is_valid {
            self.retention.error = result.error;
            return false;
        }
        self.notifications
            .push(NotificationKind::Success, MSG_RETENTION_THANKS);
        self.retention = RetentionPrompt::default();
        true
    }

    pub fn dismiss_retention(&mut self) {
        self.retention = RetentionPrompt::default();
    }

    // ---------------------------------------------------------------------
    // Submission
    // ---------------------------------------------------------------------

    /// Validate every required field, reporting all failures at once
    pub fn validate_all(&mut self) -> Result<(), SubmitError> {
        let mut failures = Vec::new();

        if self.field(FieldName::Name).trim().is_empty() {
            failures.push((FieldName::Name, NAME_REQUIRED.to_string()));
        }
        for field in [FieldName::Email, FieldName::Phone, FieldName::PostalCode] {
            if let Some(ValidationResult { is_valid: false, error }) =
                validate_field(field, self.field(field))
            {
                failures.push((field, error.unwrap_or_default()));
            }
        }

        for field in [FieldName::Name, FieldName::Email, FieldName::Phone, FieldName::PostalCode] {
            self.touched.insert(field);
            self.errors.remove(&field);
        }
        if failures.is_empty() {
            return Ok(());
        }
        for (field, message) in &failures {
            self.errors.insert(*field, message.clone());
        }
        Err(SubmitError::Invalid(failures))
    }

    /// Assemble the payload from current state
    pub fn draft(&self) -> InquiryDraft {
        let text = |field| self.field(field).trim().to_string();
        InquiryDraft {
            construction_type: self.construction_type,
            name: text(FieldName::Name),
            email: text(FieldName::Email),
            phone: text(FieldName::Phone),
            address: text(FieldName::Address),
            postal_code: text(FieldName::PostalCode),
            city: text(FieldName::City),
            comment: text(FieldName::Comment),
            preferred_date: self.calendar.selected(),
            attachments: self
                .attachments
                .records()
                .iter()
                .map(AttachmentSummary::from)
                .collect(),
            company: None,
        }
    }

    /// Submit the inquiry.
    ///
    /// State is reset only after the backend accepts; on any failure the
    /// visitor keeps everything they entered.
    pub async fn submit(&mut self) -> Result<LeadReceipt, SubmitError> {
        let progress = self.progress();
        if !self.gate.is_open(progress) {
            return Err(SubmitError::Incomplete { progress });
        }

        if let Err(e) = self.validate_all() {
            self.notifications.push(NotificationKind::Error, MSG_FIX_ERRORS);
            return Err(e);
        }

        let draft = self.draft();
        tracing::info!(
            construction_type = ?draft.construction_type,
            attachments = draft.attachments.len(),
            "Submitting inquiry"
        );

        match self.gateway.submit(&draft).await {
            Ok(receipt) if receipt.ok => {
                tracing::info!("Inquiry accepted");
                self.notifications.push(NotificationKind::Success, MSG_SUBMITTED);
                self.reset();
                Ok(receipt)
            }
            Ok(receipt) => {
                let message = receipt
                    .message
                    .clone()
                    .unwrap_or_else(|| MSG_SUBMIT_FAILED.to_string());
                tracing::warn!(message = %message, "Inquiry rejected");
                for (key, error) in &receipt.errors {
                    if let Some(field) = FieldName::ALL.into_iter().find(|f| f.key() == key.as_str()) {
                        self.errors.insert(field, error.clone());
                    }
                }
                self.notifications.push(NotificationKind::Error, message.clone());
                Err(SubmitError::Rejected(message))
            }
            Err(e) => {
                tracing::warn!(error = %e, "Inquiry submission failed");
                let message = match &e {
                    GatewayError::Transport(_) => MSG_NETWORK_ERROR,
                    _ => MSG_SUBMIT_FAILED,
                };
                self.notifications.push(NotificationKind::Error, message);
                Err(e.into())
            }
        }
    }

    /// Return every owned piece of state to its initial value
    pub fn reset(&mut self) {
        self.fields.clear();
        self.errors.clear();
        self.touched.clear();
        self.construction_type = None;
        self.calendar = Calendar::new(self.clock.today(), self.config.lead_time, None);
        self.attachments.clear();
        self.retention = RetentionPrompt::default();
    }
}

/// Validator for fields that have one
fn validate_field(field: FieldName, value: &str) -> Option<ValidationResult> {
    match field {
        FieldName::Email => Some(validate_email(value)),
        FieldName::Phone => Some(validate_phone(value)),
        FieldName::PostalCode => Some(validate_postal_code(value)),
        _ => None,
    }
}

impl std::fmt::Debug for IntakeForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntakeForm")
            .field("fields", &self.fields)
            .field("errors", &self.errors)
            .field("construction_type", &self.construction_type)
            .field("selected_date", &self.calendar.selected())
            .field("attachments", &self.attachments)
            .finish()
    }
}
