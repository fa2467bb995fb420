//! Attachment manager
//!
//! Owns the attachment collection and one simulated upload task per file.
//!
//! The collection is only ever replaced wholesale by a snapshot computed from
//! the previous one ([`advance`], [`without`]), so ticks from several upload
//! tasks interleaving with user removals cannot lose updates. Running uploads
//! live in a registry keyed by attachment id; removal cancels one entry,
//! [`AttachmentManager::clear`] and `Drop` drain all of them and release every
//! preview.

use parking_lot::{Mutex, RwLock};
use rand::Rng;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};

use super::{
    advance, without, AttachmentId, AttachmentPolicy, AttachmentRecord, FileHandle,
    PreviewStore, Rejection, UploadEvent, UploadSchedule,
};

const EVENT_CAPACITY: usize = 256;

type UploadRegistry = Arc<Mutex<HashMap<AttachmentId, JoinHandle<()>>>>;

/// Source of per-tick progress increments
pub trait StepSource: Send + Sync {
    /// Increment in `1..=max_step`
    fn next_step(&self, max_step: u8) -> u8;
}

/// Uniformly random increments
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomSteps;

impl StepSource for RandomSteps {
    fn next_step(&self, max_step: u8) -> u8 {
        rand::thread_rng().gen_range(1..=max_step.max(1))
    }
}

/// Constant increments
#[derive(Debug, Clone, Copy)]
pub struct FixedSteps(pub u8);

impl StepSource for FixedSteps {
    fn next_step(&self, max_step: u8) -> u8 {
        self.0.clamp(1, max_step.max(1))
    }
}

/// Result of one accept call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AcceptOutcome {
    pub accepted: Vec<AttachmentId>,
    pub rejected: Vec<Rejection>,
}

/// Attachment collection plus its running uploads
pub struct AttachmentManager {
    policy: AttachmentPolicy,
    schedule: UploadSchedule,
    records: Arc<RwLock<Vec<AttachmentRecord>>>,
    uploads: UploadRegistry,
    previews: Arc<dyn PreviewStore>,
    steps: Arc<dyn StepSource>,
    events: broadcast::Sender<UploadEvent>,
}

impl AttachmentManager {
    pub fn new(
        policy: AttachmentPolicy,
        schedule: UploadSchedule,
        previews: Arc<dyn PreviewStore>,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            policy,
            schedule,
            records: Arc::new(RwLock::new(Vec::new())),
            uploads: Arc::new(Mutex::new(HashMap::new())),
            previews,
            steps: Arc::new(RandomSteps),
            events,
        }
    }

    /// Replace the increment source
    pub fn with_step_source(mut self, steps: Arc<dyn StepSource>) -> Self {
        self.steps = steps;
        self
    }

    pub fn policy(&self) -> &AttachmentPolicy {
        &self.policy
    }

    pub fn subscribe(&self) -> broadcast::Receiver<UploadEvent> {
        self.events.subscribe()
    }

    /// Snapshot of the collection in insertion order
    pub fn records(&self) -> Vec<AttachmentRecord> {
        self.records.read().clone()
    }

    pub fn get(&self, id: &AttachmentId) -> Option<AttachmentRecord> {
        self.records.read().iter().find(|r| &r.id == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// Uploads still running
    pub fn active_uploads(&self) -> usize {
        self.uploads.lock().len()
    }

    /// Accept a batch of picked files.
    ///
    /// Each file is checked against the policy on its own; a rejected file
    /// is reported and the rest of the batch is still processed. Accepted
    /// files are appended after existing ones and start uploading at once.
    /// Must be called from within a Tokio runtime.
    pub fn accept(&self, files: Vec<FileHandle>) -> AcceptOutcome {
        let mut outcome = AcceptOutcome::default();

        {
            let mut records = self.records.write();
            let mut next = records.clone();

            for file in files {
                match self.policy.check(&file, next.len()) {
                    Ok(()) => {
                        let preview = file.is_image().then(|| self.previews.create(&file));
                        let record = AttachmentRecord::new(file, preview);
                        tracing::debug!(id = %record.id, name = %record.file.name, "Attachment accepted");
                        outcome.accepted.push(record.id.clone());
                        next.push(record);
                    }
                    Err(reason) => {
                        tracing::warn!(name = %file.name, reason = %reason, "Attachment rejected");
                        outcome.rejected.push(Rejection {
                            file_name: file.name,
                            reason,
                        });
                    }
                }
            }

            *records = next;
        }

        for id in &outcome.accepted {
            self.start_upload(id.clone());
        }

        outcome
    }

    /// Remove one attachment, cancelling its upload and releasing its preview.
    ///
    /// Returns false if the id is unknown.
    pub fn remove(&self, id: &AttachmentId) -> bool {
        if let Some(handle) = self.uploads.lock().remove(id) {
            handle.abort();
        }

        let removed = {
            let mut records = self.records.write();
            let (next, removed) = without(&records, id);
            *records = next;
            removed
        };

        match removed {
            Some(record) => {
                if let Some(preview) = &record.preview {
                    self.previews.release(preview);
                }
                tracing::debug!(id = %id, progress = record.progress, "Attachment removed");
                true
            }
            None => false,
        }
    }

    /// Cancel every upload, release every preview and empty the collection
    pub fn clear(&self) {
        let handles: Vec<_> = self.uploads.lock().drain().map(|(_, h)| h).collect();
        let cancelled = handles.len();
        for handle in handles {
            handle.abort();
        }

        let records = std::mem::take(&mut *self.records.write());
        for preview in records.iter().filter_map(|r| r.preview.as_ref()) {
            self.previews.release(preview);
        }

        if cancelled > 0 || !records.is_empty() {
            tracing::debug!(cancelled, released = records.len(), "Attachments cleared");
        }
    }

    fn start_upload(&self, id: AttachmentId) {
        let task = UploadTask {
            id: id.clone(),
            records: self.records.clone(),
            uploads: self.uploads.clone(),
            schedule: self.schedule,
            steps: self.steps.clone(),
            events: self.events.clone(),
        };

        // Registry stays locked until the handle is stored, so a task that
        // finishes early cannot deregister before it was registered.
        let mut uploads = self.uploads.lock();
        let handle = tokio::spawn(task.run());
        uploads.insert(id, handle);
    }
}

impl Drop for AttachmentManager {
    fn drop(&mut self) {
        self.clear();
    }
}

impl std::fmt::Debug for AttachmentManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AttachmentManager")
            .field("policy", &self.policy)
            .field("schedule", &self.schedule)
            .field("records", &self.records.read().len())
            .field("active_uploads", &self.uploads.lock().len())
            .finish()
    }
}

/// One simulated upload
struct UploadTask {
    id: AttachmentId,
    records: Arc<RwLock<Vec<AttachmentRecord>>>,
    uploads: UploadRegistry,
    schedule: UploadSchedule,
    steps: Arc<dyn StepSource>,
    events: broadcast::Sender<UploadEvent>,
}

impl UploadTask {
    async fn run(self) {
        let period = self.schedule.tick();
        let mut ticker = interval_at(Instant::now() + period, period);

        loop {
            ticker.tick().await;

            let step = self.steps.next_step(self.schedule.max_step);
            let progress = {
                let mut records = self.records.write();
                advance(&records, &self.id, step).map(|(next, progress)| {
                    *records = next;
                    progress
                })
            };

            let Some(progress) = progress else {
                break;
            };

            let _ = self.events.send(UploadEvent::Progressed {
                id: self.id.clone(),
                progress,
            });

            if progress >= 100 {
                tracing::debug!(id = %self.id, "Upload complete");
                let _ = self.events.send(UploadEvent::Completed { id: self.id.clone() });
                break;
            }
        }

        self.uploads.lock().remove(&self.id);
    }
}
