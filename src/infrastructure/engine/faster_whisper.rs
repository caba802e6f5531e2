//! faster-whisper engine adapter
//!
//! faster-whisper lives in Python, so each transcription runs a small runner
//! script in a child interpreter. The runner prints one JSON event per line:
//! an `info` event, then a `segment` event as each segment is decoded, or an
//! `error` event. Reading stdout line by line keeps the segment stream lazy.

use std::path::Path;
use std::process::{ExitStatus, Stdio};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncBufReadExt, BufReader, Lines};
use tokio::process::{Child, ChildStdout};

use crate::application::ports::{
    DecodeOptions, EngineUnavailable, ModelSpec, SegmentSource, SegmentStream, SpeechEngine,
    SpeechModel, Transcription, TranscriptionError, TranscriptionInfo,
};
use crate::domain::config::Temperature;
use crate::domain::device::Device;
use crate::domain::transcription::Segment;
use crate::infrastructure::process::{background_command, last_line, output_within, RunError};
use crate::infrastructure::python::PythonInterpreter;

/// Runner executed with `python -c`; takes the request JSON as its argument
const RUNNER_SCRIPT: &str = include_str!("runner.py");

/// Statement whose success means the engine's entry point loads
const PROBE_SCRIPT: &str = "from faster_whisper import WhisperModel";

/// Bound on the import probe
const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(60);

/// Receives runner stdout lines that are not protocol events
pub type DiagnosticSink = Arc<dyn Fn(&str) + Send + Sync>;

/// Request handed to the runner
#[derive(Debug, Serialize)]
struct RunnerRequest<'a> {
    model_path: &'a str,
    device: &'static str,
    compute_type: String,
    audio_path: String,
    language: Option<&'a str>,
    temperature: &'a Temperature,
    best_of: u32,
    beam_size: u32,
    patience: f64,
    length_penalty: f64,
    timestamps: bool,
}

impl<'a> RunnerRequest<'a> {
    fn new(spec: &'a ModelSpec, audio: &Path, options: &'a DecodeOptions) -> Self {
        Self {
            model_path: &spec.model_path,
            device: engine_device(spec.device),
            compute_type: spec.compute_type.to_string(),
            audio_path: audio.to_string_lossy().to_string(),
            language: options.language.as_deref(),
            temperature: &options.temperature,
            best_of: options.best_of,
            beam_size: options.beam_size,
            patience: options.patience,
            length_penalty: options.length_penalty,
            timestamps: options.timestamps,
        }
    }
}

/// One line of runner output
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum RunnerEvent {
    Info {
        language: String,
        language_probability: f64,
    },
    Segment {
        text: String,
        start: f64,
        end: f64,
    },
    Error {
        message: String,
    },
}

/// Device name as faster-whisper spells it
fn engine_device(device: Device) -> &'static str {
    match device {
        Device::Cpu => "cpu",
        Device::Gpu => "cuda",
    }
}

/// Parse one stdout line. Blank and non-JSON lines are not events; the
/// latter are handed to `diagnostics`.
fn parse_line(
    line: &str,
    diagnostics: &(dyn Fn(&str) + Send + Sync),
) -> Result<Option<RunnerEvent>, TranscriptionError> {
    let line = line.trim();
    if !line.starts_with('{') {
        if !line.is_empty() {
            diagnostics(line);
        }
        return Ok(None);
    }

    serde_json::from_str(line)
        .map(Some)
        .map_err(|e| TranscriptionError::Protocol(format!("{}: {}", e, line)))
}

fn exit_error(status: ExitStatus) -> TranscriptionError {
    TranscriptionError::ExitStatus(status.to_string())
}

/// faster-whisper hosted in a Python interpreter
pub struct FasterWhisperEngine {
    python: PythonInterpreter,
    probe_timeout: Duration,
    diagnostics: DiagnosticSink,
}

impl FasterWhisperEngine {
    pub fn new(python: PythonInterpreter) -> Self {
        Self {
            python,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            diagnostics: Arc::new(|line: &str| eprintln!("{}", line)),
        }
    }

    /// Route stray runner output somewhere other than plain stderr
    pub fn with_diagnostics(mut self, diagnostics: DiagnosticSink) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }
}

#[async_trait]
impl SpeechEngine for FasterWhisperEngine {
    async fn probe(&self) -> Result<(), EngineUnavailable> {
        let mut command = background_command(self.python.program());
        command.args(["-c", PROBE_SCRIPT]);

        let output = output_within(command, self.probe_timeout)
            .await
            .map_err(|e| {
                EngineUnavailable(match e {
                    RunError::NotFound => format!(
                        "Python interpreter not found: {}",
                        self.python.program().display()
                    ),
                    RunError::TimedOut => {
                        format!("import timed out after {:?}", self.probe_timeout)
                    }
                    RunError::Io(e) => e.to_string(),
                })
            })?;

        if output.status.success() {
            Ok(())
        } else {
            let reason = last_line(&output.stderr);
            Err(EngineUnavailable(if reason.is_empty() {
                output.status.to_string()
            } else {
                reason
            }))
        }
    }

    async fn load(&self, spec: &ModelSpec) -> Result<Box<dyn SpeechModel>, TranscriptionError> {
        Ok(Box::new(FasterWhisperModel {
            python: self.python.clone(),
            spec: spec.clone(),
            diagnostics: Arc::clone(&self.diagnostics),
        }))
    }
}

/// A model spec bound to an interpreter.
///
/// The model itself is constructed inside the runner, so construction errors
/// surface from [`SpeechModel::transcribe`].
pub struct FasterWhisperModel {
    python: PythonInterpreter,
    spec: ModelSpec,
    diagnostics: DiagnosticSink,
}

#[async_trait]
impl SpeechModel for FasterWhisperModel {
    async fn transcribe(
        &self,
        audio: &Path,
        options: &DecodeOptions,
    ) -> Result<Transcription, TranscriptionError> {
        let request = serde_json::to_string(&RunnerRequest::new(&self.spec, audio, options))
            .map_err(|e| TranscriptionError::Spawn(e.to_string()))?;

        let mut child = background_command(self.python.program())
            .args(["-c", RUNNER_SCRIPT, request.as_str()])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| TranscriptionError::Spawn(e.to_string()))?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| TranscriptionError::Spawn("engine stdout not captured".to_string()))?;
        let mut lines = BufReader::new(stdout).lines();

        // The runner reports metadata before the first segment
        loop {
            let line = lines
                .next_line()
                .await
                .map_err(|e| TranscriptionError::Protocol(e.to_string()))?;

            let Some(line) = line else {
                let status = child
                    .wait()
                    .await
                    .map_err(|e| TranscriptionError::Protocol(e.to_string()))?;
                return Err(if status.success() {
                    TranscriptionError::Protocol("engine exited without reporting".to_string())
                } else {
                    exit_error(status)
                });
            };

            match parse_line(&line, self.diagnostics.as_ref())? {
                None => continue,
                Some(RunnerEvent::Info {
                    language,
                    language_probability,
                }) => {
                    return Ok(Transcription {
                        segments: SegmentStream::new(RunnerSegments {
                            child,
                            lines,
                            diagnostics: Arc::clone(&self.diagnostics),
                        }),
                        info: TranscriptionInfo {
                            language,
                            language_probability,
                        },
                    });
                }
                Some(RunnerEvent::Error { message }) => {
                    return Err(TranscriptionError::Engine(message));
                }
                Some(RunnerEvent::Segment { .. }) => {
                    return Err(TranscriptionError::Protocol(
                        "segment reported before transcription info".to_string(),
                    ));
                }
            }
        }
    }
}

/// Segments read from a running runner process
struct RunnerSegments {
    child: Child,
    lines: Lines<BufReader<ChildStdout>>,
    diagnostics: DiagnosticSink,
}

#[async_trait]
impl SegmentSource for RunnerSegments {
    async fn next_segment(&mut self) -> Result<Option<Segment>, TranscriptionError> {
        loop {
            let line = self
                .lines
                .next_line()
                .await
                .map_err(|e| TranscriptionError::Protocol(e.to_string()))?;

            let Some(line) = line else {
                let status = self
                    .child
                    .wait()
                    .await
                    .map_err(|e| TranscriptionError::Protocol(e.to_string()))?;
                return if status.success() {
                    Ok(None)
                } else {
                    Err(exit_error(status))
                };
            };

            match parse_line(&line, self.diagnostics.as_ref())? {
                None => continue,
                Some(RunnerEvent::Segment { text, start, end }) => {
                    return Ok(Some(Segment::new(text, start, end)))
                }
                Some(RunnerEvent::Error { message }) => {
                    return Err(TranscriptionError::Engine(message))
                }
                Some(RunnerEvent::Info { .. }) => {
                    return Err(TranscriptionError::Protocol(
                        "transcription info reported twice".to_string(),
                    ))
                }
            }
        }
    }
}
