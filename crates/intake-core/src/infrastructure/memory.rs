//! In-memory lead gateway (for testing and offline use)

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;

use crate::domain::inquiry::{InquiryDraft, LeadReceipt};
use crate::ports::outbound::{GatewayError, LeadGateway};

/// Records every submitted draft and answers from a script.
///
/// With an empty script every submission is accepted.
#[derive(Default)]
pub struct RecordingLeadGateway {
    submitted: Mutex<Vec<InquiryDraft>>,
    script: Mutex<VecDeque<Result<LeadReceipt, GatewayError>>>,
}

impl RecordingLeadGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the answer for the next submission
    pub fn respond_with(&self, response: Result<LeadReceipt, GatewayError>) {
        self.script.lock().push_back(response);
    }

    pub fn submitted(&self) -> Vec<InquiryDraft> {
        self.submitted.lock().clone()
    }
}

#[async_trait]
impl LeadGateway for RecordingLeadGateway {
    async fn submit(&self, draft: &InquiryDraft) -> Result<LeadReceipt, GatewayError> {
        self.submitted.lock().push(draft.clone());
        self.script
            .lock()
            .pop_front()
            .unwrap_or_else(|| Ok(LeadReceipt::accepted()))
    }
}
