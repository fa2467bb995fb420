//! Error types for the intake engine

use thiserror::Error;

use crate::ports::outbound::GatewayError;

/// Configuration error
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid JSON for the expected shape
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Config values contradict each other
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Intake engine error type
#[derive(Error, Debug)]
pub enum IntakeError {
    /// Configuration error
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// Lead gateway error
    #[error("gateway error: {0}")]
    Gateway(#[from] GatewayError),
}

/// Result type for the intake engine
pub type IntakeResult<T> = Result<T, IntakeError>;
