//! Transcription configuration

mod transcription_config;

pub use transcription_config::{Temperature, TranscriptionConfig};
