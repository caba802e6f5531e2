//! Domain layer - Core business logic
//!
//! Contains value objects, the output contract, and domain errors.
//! This layer has no dependencies on external systems.

pub mod config;
pub mod device;
pub mod error;
pub mod transcription;

// Re-export common types
pub use config::TranscriptionConfig;
pub use device::{select_device, DevicePolicy, DeviceSelection, EnvironmentSnapshot};
pub use error::*;
pub use transcription::{ErrorResult, InvocationOutcome, Segment, TranscriptionResult};
