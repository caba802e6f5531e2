//! WhisperBridge - single-shot speech-to-text invocation layer
//!
//! This crate turns one audio file and an optional JSON config file into
//! exactly one JSON object on stdout, using faster-whisper when it can be
//! loaded and a fixed mock result when it cannot.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Config, device selection, segments and the output contract
//! - **Application**: Use cases and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (faster-whisper, pip, host probes)
//! - **CLI**: Argument parsing, stderr narration, and result emission

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
