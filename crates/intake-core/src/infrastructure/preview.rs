//! In-memory preview store

use dashmap::DashMap;

use crate::domain::attachments::{FileHandle, PreviewHandle, PreviewStore};

/// Tracks live preview handles; `live_count` exposes leaks
#[derive(Debug, Default)]
pub struct InMemoryPreviewStore {
    live: DashMap<PreviewHandle, String>,
}

impl InMemoryPreviewStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn is_live(&self, handle: &PreviewHandle) -> bool {
        self.live.contains_key(handle)
    }
}

impl PreviewStore for InMemoryPreviewStore {
    fn create(&self, file: &FileHandle) -> PreviewHandle {
        let handle = PreviewHandle::new(format!("blob:preview/{}", uuid::Uuid::new_v4()));
        self.live.insert(handle.clone(), file.name.clone());
        handle
    }

    fn release(&self, handle: &PreviewHandle) {
        if self.live.remove(handle).is_none() {
            tracing::trace!(handle = %handle, "Release of unknown preview");
        }
    }
}
