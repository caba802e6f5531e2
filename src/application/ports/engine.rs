//! Speech engine port interface

use std::path::Path;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::config::{Temperature, TranscriptionConfig};
use crate::domain::device::{ComputeType, Device, DeviceSelection};
use crate::domain::transcription::Segment;

/// Errors raised while loading a model or decoding audio
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TranscriptionError {
    #[error("Failed to load model: {0}")]
    ModelLoad(String),

    #[error("{0}")]
    Engine(String),

    #[error("Failed to start engine: {0}")]
    Spawn(String),

    #[error("Unexpected engine output: {0}")]
    Protocol(String),

    #[error("Engine exited with status: {0}")]
    ExitStatus(String),
}

/// The engine's entry point could not be loaded
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("speech engine unavailable: {0}")]
pub struct EngineUnavailable(pub String);

/// Everything needed to construct a model
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSpec {
    pub model_path: String,
    pub device: Device,
    pub compute_type: ComputeType,
}

impl ModelSpec {
    pub fn new(config: &TranscriptionConfig, selection: DeviceSelection) -> Self {
        Self {
            model_path: config.model_path.clone(),
            device: selection.device,
            compute_type: selection.compute_type,
        }
    }
}

/// Decoding parameters for one transcription call
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeOptions {
    pub language: Option<String>,
    pub temperature: Temperature,
    pub best_of: u32,
    pub beam_size: u32,
    pub patience: f64,
    pub length_penalty: f64,
    /// Produce per-segment timestamps
    pub timestamps: bool,
}

impl From<&TranscriptionConfig> for DecodeOptions {
    fn from(config: &TranscriptionConfig) -> Self {
        Self {
            language: config.language.clone(),
            temperature: config.temperature.clone(),
            best_of: config.best_of,
            beam_size: config.beam_size,
            patience: config.patience,
            length_penalty: config.length_penalty,
            timestamps: true,
        }
    }
}

/// Metadata reported alongside the segments
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptionInfo {
    pub language: String,
    pub language_probability: f64,
}

/// Producer behind a [`SegmentStream`].
///
/// Returns `Ok(None)` once exhausted. Callers must not poll again after that.
#[async_trait]
pub trait SegmentSource: Send {
    async fn next_segment(&mut self) -> Result<Option<Segment>, TranscriptionError>;
}

/// Finite, single-pass sequence of segments in temporal order.
///
/// There is no way to rewind it; consumers take it by value.
pub struct SegmentStream {
    source: Box<dyn SegmentSource>,
    exhausted: bool,
}

impl SegmentStream {
    pub fn new(source: impl SegmentSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            exhausted: false,
        }
    }

    /// A stream over already materialized segments
    pub fn from_segments(segments: Vec<Segment>) -> Self {
        Self::new(VecSource(segments.into_iter()))
    }

    /// Next segment, or `None` at the end. Fused after the end or an error.
    pub async fn next(&mut self) -> Result<Option<Segment>, TranscriptionError> {
        if self.exhausted {
            return Ok(None);
        }

        let next = self.source.next_segment().await;
        if !matches!(next, Ok(Some(_))) {
            self.exhausted = true;
        }
        next
    }
}

struct VecSource(std::vec::IntoIter<Segment>);

#[async_trait]
impl SegmentSource for VecSource {
    async fn next_segment(&mut self) -> Result<Option<Segment>, TranscriptionError> {
        Ok(self.0.next())
    }
}

/// Lazy output of a transcription call
pub struct Transcription {
    pub segments: SegmentStream,
    pub info: TranscriptionInfo,
}

/// A constructed model, ready to decode
#[async_trait]
pub trait SpeechModel: Send + Sync {
    /// Start decoding `audio`. Segments are produced as the stream is read.
    async fn transcribe(
        &self,
        audio: &Path,
        options: &DecodeOptions,
    ) -> Result<Transcription, TranscriptionError>;
}

/// Port for the speech-to-text engine
#[async_trait]
pub trait SpeechEngine: Send + Sync {
    /// Check that the engine's entry point can be loaded.
    async fn probe(&self) -> Result<(), EngineUnavailable>;

    /// Construct a model for `spec`.
    async fn load(&self, spec: &ModelSpec) -> Result<Box<dyn SpeechModel>, TranscriptionError>;
}
