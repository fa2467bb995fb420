//! Image preview resources
//!
//! A preview is a transient handle (a browser object URL, a temp file, a
//! thumbnail cache slot). Every handle created must be released exactly once,
//! when its attachment is removed or the manager is torn down.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::FileHandle;

/// Opaque reference to a live preview resource
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PreviewHandle(String);

impl PreviewHandle {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PreviewHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Allocates and releases preview resources
pub trait PreviewStore: Send + Sync {
    /// Allocate a preview for an image file
    fn create(&self, file: &FileHandle) -> PreviewHandle;

    /// Release a preview; releasing an unknown handle is a no-op
    fn release(&self, handle: &PreviewHandle);
}
