//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod config;
pub mod engine;
pub mod environment;
pub mod installer;

// Re-export common types
pub use config::ConfigSource;
pub use engine::{
    DecodeOptions, EngineUnavailable, ModelSpec, SegmentSource, SegmentStream, SpeechEngine,
    SpeechModel, Transcription, TranscriptionError, TranscriptionInfo,
};
pub use environment::EnvironmentProbe;
pub use installer::{InstallError, InstallScope, PackageInstaller};
