//! Intake configuration

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::domain::attachments::{AttachmentPolicy, UploadSchedule};
use crate::domain::calendar::LeadTimeRules;
use crate::domain::progress::SubmitGate;
use crate::error::ConfigError;

/// Intake form configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntakeConfig {
    /// Lead-time rules for the calendar
    pub lead_time: LeadTimeRules,
    /// Attachment limits
    pub attachments: AttachmentPolicy,
    /// Simulated upload pacing
    pub uploads: UploadSchedule,
    /// Minimum progress (percent) to enable submission
    pub submit_threshold: u8,
    /// How long notifications stay visible
    pub notification_ttl_ms: u64,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            lead_time: LeadTimeRules::default(),
            attachments: AttachmentPolicy::default(),
            uploads: UploadSchedule::default(),
            submit_threshold: 50,
            notification_ttl_ms: 5_000,
        }
    }
}

impl IntakeConfig {
    /// Load from a JSON file and validate
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lead_time.express_min_weeks > self.lead_time.min_weeks {
            return Err(ConfigError::Invalid(format!(
                "express_min_weeks ({}) exceeds min_weeks ({})",
                self.lead_time.express_min_weeks, self.lead_time.min_weeks
            )));
        }
        if self.attachments.max_files == 0 {
            return Err(ConfigError::Invalid("max_files must be positive".into()));
        }
        if self.uploads.tick_ms == 0 || self.uploads.max_step == 0 {
            return Err(ConfigError::Invalid(
                "upload tick and max_step must be positive".into(),
            ));
        }
        if self.submit_threshold > 100 {
            return Err(ConfigError::Invalid(format!(
                "submit_threshold {} is above 100",
                self.submit_threshold
            )));
        }
        Ok(())
    }

    pub fn submit_gate(&self) -> SubmitGate {
        SubmitGate::new(self.submit_threshold)
    }

    pub fn notification_ttl(&self) -> Duration {
        Duration::from_millis(self.notification_ttl_ms)
    }
}
