//! Outbound ports

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::inquiry::{InquiryDraft, LeadReceipt};

/// Backend that accepts inquiries
#[async_trait]
pub trait LeadGateway: Send + Sync {
    /// Deliver one inquiry. A receipt with `ok == false` is still `Ok`;
    /// only transport and protocol failures are errors.
    async fn submit(&self, draft: &InquiryDraft) -> Result<LeadReceipt, GatewayError>;
}

/// Lead gateway error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// Backend unreachable or the request did not complete
    #[error("transport error: {0}")]
    Transport(String),

    /// Backend answered with a non-success status and no usable body
    #[error("rejected with status {status}: {message}")]
    Rejected { status: u16, message: String },

    /// Response body was not a receipt
    #[error("decode error: {0}")]
    Decode(String),
}
