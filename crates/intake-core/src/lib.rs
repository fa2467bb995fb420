//! Winter Garden Inquiry Intake
//!
//! Stateful logic behind the lead-generation form for made-to-order winter
//! gardens (conservatories, pergolas, home extensions).
//!
//! ## Architecture
//!
//! - **Domain Layer**: field validation and formatting, lead-time calendar,
//!   attachment manager with simulated uploads, completion progress
//! - **Application Layer**: the intake form controller and its notifications
//! - **Ports Layer**: the outbound lead gateway
//! - **Infrastructure Layer**: HTTP and in-memory adapters
//!
//! ## Flow
//!
//! ```text
//!  user edit ──► validation engine ──► field errors
//!      │                                    │
//!      ├──► calendar ──► selected date      ▼
//!      │                     │        completion model ──► submit gate
//!      └──► attachments ─────┴──────────────┘                 │
//!                                                             ▼
//!                                                     lead gateway (HTTP)
//! ```

pub mod config;
pub mod error;
pub mod domain;
pub mod application;
pub mod ports;
pub mod infrastructure;

pub use config::IntakeConfig;
pub use error::{ConfigError, IntakeError};
pub use domain::value_objects::{
    validate_email, validate_phone, validate_postal_code, format_phone, format_postal_code,
    ConstructionType, FieldName, ValidationResult,
};
pub use domain::calendar::{
    Calendar, CalendarCell, Clock, DateAvailability, DayClassification, DayStatus, FixedClock,
    LeadTimeRules, SystemClock,
};
pub use domain::attachments::{
    AcceptOutcome, AttachmentId, AttachmentManager, AttachmentPolicy, AttachmentRecord, FileHandle,
    PreviewHandle, PreviewStore, Rejection, RejectionReason, UploadEvent, UploadSchedule,
    UploadState, FixedSteps, RandomSteps, StepSource,
};
pub use domain::progress::{compute_progress, CompletionSignals, SubmitGate};
pub use domain::inquiry::{AttachmentSummary, InquiryDraft, LeadReceipt};
pub use application::{IntakeForm, Notification, NotificationKind, SubmitError, FormSummary};
pub use ports::outbound::{GatewayError, LeadGateway};
pub use infrastructure::{HttpLeadGateway, InMemoryPreviewStore, RecordingLeadGateway};
