//! Transcribe audio use case

use std::path::PathBuf;

use crate::domain::config::TranscriptionConfig;
use crate::domain::device::DeviceSelection;
use crate::domain::transcription::TranscriptionResult;

use super::availability::Availability;
use super::normalize::normalize;
use super::ports::{DecodeOptions, ModelSpec, SpeechEngine, TranscriptionError};

/// Input parameters for the transcribe use case
#[derive(Debug, Clone)]
pub struct TranscribeInput {
    /// Audio file handed to the engine untouched
    pub audio_path: PathBuf,
    pub config: TranscriptionConfig,
    pub device: DeviceSelection,
    pub availability: Availability,
}

/// Callbacks for progress and status updates
#[derive(Default)]
#[allow(clippy::type_complexity)]
pub struct TranscribeCallbacks {
    /// Called when the mock result is used instead of the engine
    pub on_mock: Option<Box<dyn Fn() + Send + Sync>>,
    /// Called before the model is constructed
    pub on_model_loading: Option<Box<dyn Fn(&ModelSpec) + Send + Sync>>,
    /// Called once decoding has started
    pub on_transcribing_start: Option<Box<dyn Fn() + Send + Sync>>,
    /// Called with the final result
    pub on_transcribing_end: Option<Box<dyn Fn(&TranscriptionResult) + Send + Sync>>,
}

/// Drives the engine, or the mock when the engine is unavailable
pub struct TranscribeAudioUseCase<E>
where
    E: SpeechEngine,
{
    engine: E,
}

impl<E> TranscribeAudioUseCase<E>
where
    E: SpeechEngine,
{
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Execute one transcription. Engine failures are never retried.
    pub async fn execute(
        &self,
        input: TranscribeInput,
        callbacks: &TranscribeCallbacks,
    ) -> Result<TranscriptionResult, TranscriptionError> {
        if !input.availability.is_available() {
            if let Some(ref cb) = callbacks.on_mock {
                cb();
            }
            return Ok(TranscriptionResult::mock());
        }

        let spec = ModelSpec::new(&input.config, input.device);
        if let Some(ref cb) = callbacks.on_model_loading {
            cb(&spec);
        }
        let model = self.engine.load(&spec).await?;

        let options = DecodeOptions::from(&input.config);
        let transcription = model.transcribe(&input.audio_path, &options).await?;

        if let Some(ref cb) = callbacks.on_transcribing_start {
            cb();
        }

        let result = normalize(transcription.segments, transcription.info).await?;

        if let Some(ref cb) = callbacks.on_transcribing_end {
            cb(&result);
        }

        Ok(result)
    }
}
