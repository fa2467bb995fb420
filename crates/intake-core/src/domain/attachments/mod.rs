//! Attachments
//!
//! Reference files a visitor attaches to an inquiry: the acceptance policy,
//! per-file records and the pure state transitions the upload manager
//! applies to them.

pub mod preview;
pub mod manager;

pub use preview::{PreviewHandle, PreviewStore};
pub use manager::{AcceptOutcome, AttachmentManager, FixedSteps, RandomSteps, StepSource};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Attachment identifier
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttachmentId(String);

impl AttachmentId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for AttachmentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AttachmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A file picked by the visitor (click or drag-and-drop)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileHandle {
    pub name: String,
    pub mime_type: String,
    pub size_bytes: u64,
}

impl FileHandle {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size_bytes,
        }
    }

    /// Lowercased extension without the dot
    pub fn extension(&self) -> Option<String> {
        self.name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .filter(|ext| !ext.is_empty())
    }

    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }
}

/// Count, size and type limits for attachments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentPolicy {
    pub max_files: usize,
    pub max_file_size: u64,
    pub allowed_mime_types: Vec<String>,
    pub allowed_extensions: Vec<String>,
}

impl Default for AttachmentPolicy {
    fn default() -> Self {
        Self {
            max_files: 5,
            max_file_size: 10 * 1024 * 1024,
            allowed_mime_types: [
                "image/jpeg",
                "image/png",
                "image/gif",
                "image/webp",
                "image/heic",
                "application/pdf",
                "application/msword",
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            allowed_extensions: ["jpg", "jpeg", "png", "gif", "webp", "heic", "pdf", "doc", "docx"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl AttachmentPolicy {
    /// MIME type or extension must be allow-listed
    pub fn is_allowed_type(&self, file: &FileHandle) -> bool {
        let mime = file.mime_type.to_ascii_lowercase();
        self.allowed_mime_types.iter().any(|m| *m == mime)
            || file
                .extension()
                .map(|ext| self.allowed_extensions.iter().any(|e| *e == ext))
                .unwrap_or(false)
    }

    /// Check one candidate given how many files are already held
    pub fn check(&self, file: &FileHandle, held: usize) -> Result<(), RejectionReason> {
        if held >= self.max_files {
            return Err(RejectionReason::TooManyFiles { max: self.max_files });
        }
        if file.size_bytes > self.max_file_size {
            return Err(RejectionReason::TooLarge {
                size: file.size_bytes,
                max: self.max_file_size,
            });
        }
        if !self.is_allowed_type(file) {
            return Err(RejectionReason::UnsupportedType {
                mime_type: file.mime_type.clone(),
            });
        }
        Ok(())
    }
}

/// Why a file was turned away
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectionReason {
    TooManyFiles { max: usize },
    TooLarge { size: u64, max: u64 },
    UnsupportedType { mime_type: String },
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooManyFiles { max } => write!(f, "można dodać maksymalnie {} plików", max),
            Self::TooLarge { max, .. } => {
                write!(f, "plik przekracza limit {} MB", max / (1024 * 1024))
            }
            Self::UnsupportedType { .. } => write!(f, "nieobsługiwany typ pliku"),
        }
    }
}

/// A rejected file and the reason
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
    pub file_name: String,
    pub reason: RejectionReason,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.file_name, self.reason)
    }
}

/// Upload lifecycle, derived from progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadState {
    Pending,
    Uploading,
    Complete,
}

/// One accepted file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentRecord {
    pub id: AttachmentId,
    pub file: FileHandle,
    /// Percent, 0..=100
    pub progress: u8,
    pub preview: Option<PreviewHandle>,
}

impl AttachmentRecord {
    pub fn new(file: FileHandle, preview: Option<PreviewHandle>) -> Self {
        Self {
            id: AttachmentId::new(),
            file,
            progress: 0,
            preview,
        }
    }

    pub fn state(&self) -> UploadState {
        match self.progress {
            0 => UploadState::Pending,
            100..=u8::MAX => UploadState::Complete,
            _ => UploadState::Uploading,
        }
    }
}

/// Pacing of the simulated upload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadSchedule {
    pub tick_ms: u64,
    /// Largest progress increment per tick, in percentage points
    pub max_step: u8,
}

impl Default for UploadSchedule {
    fn default() -> Self {
        Self {
            tick_ms: 500,
            max_step: 30,
        }
    }
}

impl UploadSchedule {
    /// Tick period, never shorter than one millisecond
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1))
    }
}

/// Published by the manager as uploads advance
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadEvent {
    Progressed { id: AttachmentId, progress: u8 },
    Completed { id: AttachmentId },
}

/// Advance one record by `step`, returning the new snapshot and its progress.
///
/// `None` when the record is no longer in the collection.
pub fn advance(
    records: &[AttachmentRecord],
    id: &AttachmentId,
    step: u8,
) -> Option<(Vec<AttachmentRecord>, u8)> {
    let position = records.iter().position(|r| &r.id == id)?;
    let progress = records[position].progress.saturating_add(step.max(1)).min(100);
    let mut next = records.to_vec();
    next[position].progress = progress;
    Some((next, progress))
}

/// Snapshot without `id`, plus the removed record if it was present
pub fn without(
    records: &[AttachmentRecord],
    id: &AttachmentId,
) -> (Vec<AttachmentRecord>, Option<AttachmentRecord>) {
    let (removed, kept): (Vec<_>, Vec<_>) =
        records.iter().cloned().partition(|r| &r.id == id);
    (kept, removed.into_iter().next())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pdf(name: &str, size: u64) -> FileHandle {
        FileHandle::new(name, "application/pdf", size)
    }

    #[test]
    fn test_schedule_tick_never_zero() {
        let schedule = UploadSchedule {
            tick_ms: 0,
            max_step: 30,
        };
        assert_eq!(schedule.tick(), Duration::from_millis(1));
        assert_eq!(UploadSchedule::default().tick(), Duration::from_millis(500));
    }

    #[test]
    fn test_extension() {
        assert_eq!(FileHandle::new("Plan.DOCX", "", 1).extension(), Some("docx".into()));
        assert_eq!(FileHandle::new("README", "", 1).extension(), None);
        assert_eq!(FileHandle::new("trailing.", "", 1).extension(), None);
    }

    #[test]
    fn test_policy_accepts_allowed() {
        let policy = AttachmentPolicy::default();
        assert!(policy.check(&pdf("oferta.pdf", 1024), 0).is_ok());
        assert!(policy.check(&FileHandle::new("ogrod.jpg", "image/jpeg", 2048), 4).is_ok());
    }

    #[test]
    fn test_policy_accepts_by_extension_when_mime_missing() {
        let policy = AttachmentPolicy::default();
        assert!(policy.check(&FileHandle::new("rzut.docx", "", 10), 0).is_ok());
    }

    #[test]
    fn test_policy_rejects_count() {
        let policy = AttachmentPolicy::default();
        assert_eq!(
            policy.check(&pdf("a.pdf", 1), 5),
            Err(RejectionReason::TooManyFiles { max: 5 })
        );
    }

    #[test]
    fn test_policy_rejects_size() {
        let policy = AttachmentPolicy::default();
        let limit = policy.max_file_size;
        assert!(policy.check(&pdf("exact.pdf", limit), 0).is_ok());
        assert!(matches!(
            policy.check(&pdf("big.pdf", limit + 1), 0),
            Err(RejectionReason::TooLarge { .. })
        ));
    }

    #[test]
    fn test_policy_rejects_type() {
        let policy = AttachmentPolicy::default();
        let exe = FileHandle::new("setup.exe", "application/x-msdownload", 10);
        assert!(matches!(
            policy.check(&exe, 0),
            Err(RejectionReason::UnsupportedType { .. })
        ));
    }

    #[test]
    fn test_rejection_message() {
        let rejection = Rejection {
            file_name: "big.pdf".into(),
            reason: RejectionReason::TooLarge { size: 11 << 20, max: 10 << 20 },
        };
        assert_eq!(rejection.to_string(), "big.pdf: plik przekracza limit 10 MB");
    }

    #[test]
    fn test_state_from_progress() {
        let mut record = AttachmentRecord::new(pdf("a.pdf", 1), None);
        assert_eq!(record.state(), UploadState::Pending);
        record.progress = 42;
        assert_eq!(record.state(), UploadState::Uploading);
        record.progress = 100;
        assert_eq!(record.state(), UploadState::Complete);
    }

    #[test]
    fn test_advance_caps_at_hundred() {
        let mut record = AttachmentRecord::new(pdf("a.pdf", 1), None);
        record.progress = 95;
        let id = record.id.clone();
        let (next, progress) = advance(&[record], &id, 30).unwrap();
        assert_eq!(progress, 100);
        assert_eq!(next[0].progress, 100);
    }

    #[test]
    fn test_advance_leaves_others_untouched() {
        let a = AttachmentRecord::new(pdf("a.pdf", 1), None);
        let b = AttachmentRecord::new(pdf("b.pdf", 1), None);
        let (next, _) = advance(&[a.clone(), b.clone()], &a.id, 10).unwrap();
        assert_eq!(next[0].progress, 10);
        assert_eq!(next[1], b);
    }

    #[test]
    fn test_advance_missing_record() {
        let a = AttachmentRecord::new(pdf("a.pdf", 1), None);
        assert!(advance(&[a], &AttachmentId::new(), 10).is_none());
    }

    #[test]
    fn test_without() {
        let a = AttachmentRecord::new(pdf("a.pdf", 1), None);
        let b = AttachmentRecord::new(pdf("b.pdf", 1), None);
        let (next, removed) = without(&[a.clone(), b.clone()], &a.id);
        assert_eq!(next, vec![b]);
        assert_eq!(removed, Some(a));
    }
}
