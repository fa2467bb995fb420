//! Application layer
//!
//! The intake form controller: owns field state and composes the domain
//! pieces into one form session.

pub mod form;
pub mod notifications;

pub use form::{FormSummary, IntakeForm, RetentionPrompt, SubmitError};
pub use notifications::{Notification, NotificationKind, Notifications};
