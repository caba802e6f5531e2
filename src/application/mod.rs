//! Application layer - Use cases and port interfaces
//!
//! Contains the core business operations and trait definitions
//! for external system interactions.

pub mod availability;
pub mod invoke;
pub mod normalize;
pub mod ports;
pub mod transcribe;

// Re-export use cases
pub use availability::{
    attempt_repair, ensure_engine, probe_engine, Availability, AvailabilityReport, RepairPolicy,
};
pub use invoke::{InvokeCallbacks, InvokeError, InvokeInput, InvokeTranscriptionUseCase};
pub use normalize::normalize;
pub use transcribe::{TranscribeAudioUseCase, TranscribeCallbacks, TranscribeInput};
