//! Domain error types

use thiserror::Error;

/// Error when the transcription config cannot be resolved
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    ReadError(String),
}

