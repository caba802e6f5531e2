//! End-to-end invocation use case
//!
//! Runs config resolution, engine availability, device selection,
//! transcription and normalization in order, stopping at the first failure.

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::config::TranscriptionConfig;
use crate::domain::device::{select_device, DevicePolicy, DeviceSelection};
use crate::domain::error::ConfigError;
use crate::domain::transcription::{ErrorResult, InvocationOutcome, TranscriptionResult};

use super::availability::{ensure_engine, AvailabilityReport, RepairPolicy};
use super::ports::{
    ConfigSource, EnvironmentProbe, PackageInstaller, SpeechEngine, TranscriptionError,
};
use super::transcribe::{TranscribeAudioUseCase, TranscribeCallbacks, TranscribeInput};

/// Errors that end an invocation with an error result
#[derive(Debug, Error)]
pub enum InvokeError {
    #[error("Audio file path not provided")]
    MissingAudioPath,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Transcription(#[from] TranscriptionError),
}

impl From<InvokeError> for ErrorResult {
    fn from(error: InvokeError) -> Self {
        ErrorResult::new(error.to_string())
    }
}

impl From<Result<TranscriptionResult, InvokeError>> for InvocationOutcome {
    fn from(result: Result<TranscriptionResult, InvokeError>) -> Self {
        match result {
            Ok(result) => InvocationOutcome::Transcription(result),
            Err(e) => InvocationOutcome::Error(e.into()),
        }
    }
}

/// Input parameters for one invocation
#[derive(Debug, Clone)]
pub struct InvokeInput {
    pub audio_path: PathBuf,
    pub device_policy: DevicePolicy,
    /// `None` disables the install attempt
    pub repair: Option<RepairPolicy>,
}

/// Callbacks for side-channel narration
#[derive(Default)]
#[allow(clippy::type_complexity)]
pub struct InvokeCallbacks {
    /// Called with the effective config
    pub on_config: Option<Box<dyn Fn(&TranscriptionConfig) + Send + Sync>>,
    /// Called before the engine probe starts
    pub on_probe_start: Option<Box<dyn Fn() + Send + Sync>>,
    /// Called with the availability report
    pub on_availability: Option<Box<dyn Fn(&AvailabilityReport) + Send + Sync>>,
    /// Called with the chosen device
    pub on_device: Option<Box<dyn Fn(DevicePolicy, DeviceSelection) + Send + Sync>>,
    /// Forwarded to the transcribe stage
    pub transcribe: TranscribeCallbacks,
}

/// The whole pipeline behind one process invocation
pub struct InvokeTranscriptionUseCase<C, E, I, H>
where
    C: ConfigSource,
    E: SpeechEngine,
    I: PackageInstaller,
    H: EnvironmentProbe,
{
    config_source: C,
    transcribe: TranscribeAudioUseCase<E>,
    installer: I,
    host: H,
}

impl<C, E, I, H> InvokeTranscriptionUseCase<C, E, I, H>
where
    C: ConfigSource,
    E: SpeechEngine,
    I: PackageInstaller,
    H: EnvironmentProbe,
{
    pub fn new(config_source: C, engine: E, installer: I, host: H) -> Self {
        Self {
            config_source,
            transcribe: TranscribeAudioUseCase::new(engine),
            installer,
            host,
        }
    }

    /// Run every stage once, in order.
    pub async fn execute(
        &self,
        input: InvokeInput,
        callbacks: &InvokeCallbacks,
    ) -> Result<TranscriptionResult, InvokeError> {
        let overrides = self.config_source.load_overrides().await?;
        let config = TranscriptionConfig::resolve(overrides)?;
        if let Some(ref cb) = callbacks.on_config {
            cb(&config);
        }

        if let Some(ref cb) = callbacks.on_probe_start {
            cb();
        }
        let report = ensure_engine(
            self.transcribe.engine(),
            &self.installer,
            input.repair.as_ref(),
        )
        .await;
        if let Some(ref cb) = callbacks.on_availability {
            cb(&report);
        }

        let device = select_device(input.device_policy, &self.host.snapshot());
        if let Some(ref cb) = callbacks.on_device {
            cb(input.device_policy, device);
        }

        let result = self
            .transcribe
            .execute(
                TranscribeInput {
                    audio_path: input.audio_path,
                    config,
                    device,
                    availability: report.availability,
                },
                &callbacks.transcribe,
            )
            .await?;

        Ok(result)
    }
}
