//! API configuration

use intake_core::{AttachmentPolicy, ConfigError, LeadTimeRules};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "/etc/intake/api.json";
pub const DEFAULT_CACHE_CONTROL: &str = "public, s-maxage=300, stale-while-revalidate=600";
/// Room left in a request body for text fields and multipart framing
pub const FORM_OVERHEAD_BYTES: u64 = 1024 * 1024;

/// API service configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Listen address
    pub bind_addr: String,
    /// Serviceable cities returned by the locations endpoint
    pub locations: Vec<String>,
    /// Cache-Control value for public endpoints
    pub cache_control: String,
    /// Lead-time rules used to check preferred dates
    pub lead_time: LeadTimeRules,
    /// Limits applied to attachment metadata
    pub attachments: AttachmentPolicy,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".into(),
            locations: vec!["Warszawa".into(), "Gdańsk".into()],
            cache_control: DEFAULT_CACHE_CONTROL.into(),
            lead_time: LeadTimeRules::default(),
            attachments: AttachmentPolicy::default(),
        }
    }
}

impl ApiConfig {
    /// Load from file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `CONFIG_PATH`, falling back to defaults. `BIND_ADDR`
    /// overrides the listen address either way.
    pub fn from_env() -> Self {
        let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());

        let mut config = Self::load(&path).unwrap_or_else(|e| {
            tracing::warn!(path = %path, error = %e, "Config not loaded, using defaults");
            Self::default()
        });

        if let Ok(addr) = std::env::var("BIND_ADDR") {
            config.bind_addr = addr;
        }
        config
    }

    /// Largest request body accepted on the lead endpoint: a full set of
    /// attachments at the size limit plus the form overhead
    pub fn body_limit(&self) -> usize {
        let files = (self.attachments.max_files as u64)
            .saturating_mul(self.attachments.max_file_size)
            .saturating_add(FORM_OVERHEAD_BYTES);
        usize::try_from(files).unwrap_or(usize::MAX)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lead_time.express_min_weeks > self.lead_time.min_weeks {
            return Err(ConfigError::Invalid(
                "express_min_weeks exceeds min_weeks".into(),
            ));
        }
        if axum::http::HeaderValue::from_str(&self.cache_control).is_err() {
            return Err(ConfigError::Invalid(format!(
                "cache_control is not a valid header value: {:?}",
                self.cache_control
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.locations, ["Warszawa", "Gdańsk"]);
    }

    #[test]
    fn test_partial_json() {
        let config: ApiConfig =
            serde_json::from_str(r#"{"locations": ["Kraków"], "bind_addr": "127.0.0.1:3000"}"#)
                .unwrap();
        assert_eq!(config.locations, ["Kraków"]);
        assert_eq!(config.cache_control, DEFAULT_CACHE_CONTROL);
    }

    #[test]
    fn test_body_limit_fits_full_attachment_set() {
        let config = ApiConfig::default();
        assert_eq!(config.body_limit(), 5 * 10 * 1024 * 1024 + 1024 * 1024);

        let config = ApiConfig {
            attachments: AttachmentPolicy {
                max_files: 2,
                max_file_size: 1024,
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(config.body_limit(), 2048 + FORM_OVERHEAD_BYTES as usize);
    }

    #[test]
    fn test_rejects_bad_header() {
        let config = ApiConfig {
            cache_control: "public\nmax-age=1".into(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
