//! Infrastructure module
//!
//! Adapters for the outbound ports and the preview store.

pub mod http;
pub mod memory;
pub mod preview;

pub use http::HttpLeadGateway;
pub use memory::RecordingLeadGateway;
pub use preview::InMemoryPreviewStore;
