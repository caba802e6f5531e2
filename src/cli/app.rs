//! Main app runner for a single invocation

use std::process::ExitCode;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::application::ports::ModelSpec;
use crate::application::{
    AvailabilityReport, InvokeCallbacks, InvokeError, InvokeInput, InvokeTranscriptionUseCase,
    RepairPolicy, TranscribeCallbacks,
};
use crate::domain::config::TranscriptionConfig;
use crate::domain::device::{DevicePolicy, DeviceSelection};
use crate::domain::transcription::{ErrorResult, InvocationOutcome, TranscriptionResult};
use crate::infrastructure::engine::DiagnosticSink;
use crate::infrastructure::{
    FasterWhisperEngine, HostEnvironment, JsonConfigFile, PipInstaller, PythonInterpreter,
};

use super::args::InvokeOptions;
use super::presenter::Presenter;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;

type SharedPresenter = Arc<Mutex<Presenter>>;

fn lock(presenter: &SharedPresenter) -> MutexGuard<'_, Presenter> {
    presenter.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Run one invocation and emit its outcome on stdout.
///
/// Succeeds whenever a JSON object was written, including error objects.
pub async fn run_invocation(options: InvokeOptions) -> ExitCode {
    let presenter: SharedPresenter = Arc::new(Mutex::new(Presenter::new()));

    let outcome = invoke(options, &presenter).await;
    let guard = lock(&presenter);
    emit(&guard, &outcome)
}

/// Emit an outcome, mapping a failed write to [`EXIT_ERROR`]
pub fn emit(presenter: &Presenter, outcome: &InvocationOutcome) -> ExitCode {
    match presenter.emit(outcome) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            presenter.error(&format!("Failed to write result: {}", e));
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Outcome for arguments clap could not parse
pub fn usage_error(error: &clap::Error) -> InvocationOutcome {
    let rendered = error.to_string();
    let first = rendered
        .lines()
        .next()
        .unwrap_or_default()
        .trim_start_matches("error: ")
        .trim();
    ErrorResult::new(format!("Invalid arguments: {}", first)).into()
}

async fn invoke(options: InvokeOptions, presenter: &SharedPresenter) -> InvocationOutcome {
    let Some(audio_path) = options.audio_path else {
        lock(presenter).error("Audio file path not provided");
        return Err::<TranscriptionResult, _>(InvokeError::MissingAudioPath).into();
    };

    {
        let p = lock(presenter);
        p.info(&format!("Audio path: {}", audio_path.display()));
        match options.config_path.as_deref() {
            Some(path) => p.info(&format!("Config path: {}", path.display())),
            None => p.info("Config path: (none)"),
        }
    }

    let python = PythonInterpreter::resolve(options.python);
    lock(presenter).info(&format!(
        "Python interpreter: {}",
        python.program().display()
    ));

    let use_case = InvokeTranscriptionUseCase::new(
        JsonConfigFile::new(options.config_path),
        FasterWhisperEngine::new(python.clone()).with_diagnostics(engine_output(presenter)),
        PipInstaller::new(python),
        HostEnvironment::new(),
    );

    let input = InvokeInput {
        audio_path,
        device_policy: options.device_policy,
        repair: options.repair.then(RepairPolicy::default),
    };

    let callbacks = narration(presenter);
    let result = use_case.execute(input, &callbacks).await;

    if let Err(ref e) = result {
        let mut p = lock(presenter);
        p.spinner_fail("Transcription failed");
        p.error(&e.to_string());
    }

    result.into()
}

/// Sink relaying stray engine output through the presenter
fn engine_output(presenter: &SharedPresenter) -> DiagnosticSink {
    let presenter = Arc::clone(presenter);
    Arc::new(move |line: &str| lock(&presenter).diagnostic(line))
}

/// Callbacks narrating each stage on stderr
fn narration(presenter: &SharedPresenter) -> InvokeCallbacks {
    let on_config = Arc::clone(presenter);
    let on_probe = Arc::clone(presenter);
    let on_availability = Arc::clone(presenter);
    let on_device = Arc::clone(presenter);
    let on_mock = Arc::clone(presenter);
    let on_loading = Arc::clone(presenter);
    let on_start = Arc::clone(presenter);
    let on_end = Arc::clone(presenter);

    InvokeCallbacks {
        on_config: Some(Box::new(move |config: &TranscriptionConfig| {
            let p = lock(&on_config);
            p.info(&format!(
                "Model: {}, language: {}",
                config.model_path,
                config.language.as_deref().unwrap_or("auto")
            ));
            if !config.extra.is_empty() {
                let keys: Vec<&str> = config.extra.keys().map(String::as_str).collect();
                p.warn(&format!("Ignoring unrecognized config keys: {}", keys.join(", ")));
            }
        })),
        on_probe_start: Some(Box::new(move || {
            lock(&on_probe).info("Checking if faster-whisper is available...");
        })),
        on_availability: Some(Box::new(move |report: &AvailabilityReport| {
            let p = lock(&on_availability);
            for line in &report.trail {
                if report.is_available() {
                    p.info(line);
                } else {
                    p.warn(line);
                }
            }
        })),
        on_device: Some(Box::new(move |policy: DevicePolicy, selection: DeviceSelection| {
            lock(&on_device).info(&format!(
                "Using device: {}, compute_type: {} (policy: {})",
                selection.device, selection.compute_type, policy
            ));
        })),
        transcribe: TranscribeCallbacks {
            on_mock: Some(Box::new(move || {
                lock(&on_mock).warn("faster-whisper not available, using mock transcription");
            })),
            on_model_loading: Some(Box::new(move |spec: &ModelSpec| {
                lock(&on_loading).start_spinner(&format!("Loading model {}...", spec.model_path));
            })),
            on_transcribing_start: Some(Box::new(move || {
                let mut p = lock(&on_start);
                p.spinner_success("Model initialized");
                p.start_spinner("Transcribing...");
            })),
            on_transcribing_end: Some(Box::new(move |result: &TranscriptionResult| {
                lock(&on_end).spinner_success(&completion_message(result));
            })),
        },
    }
}

fn completion_message(result: &TranscriptionResult) -> String {
    format!(
        "Transcription complete ({} segments, {} chars)",
        result.segments.len(),
        result.text.chars().count()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::args::Cli;
    use clap::Parser;
    use serde_json::{json, Value};

    #[test]
    fn usage_error_names_the_problem() {
        let err = Cli::try_parse_from(["whisper-bridge", "a.wav", "--device-policy", "tpu"])
            .unwrap_err();
        let outcome = usage_error(&err);

        let value: Value = serde_json::from_str(&outcome.to_json()).unwrap();
        let message = value["error"].as_str().unwrap();
        assert!(message.starts_with("Invalid arguments: "));
        assert!(message.contains("tpu"));
    }

    #[test]
    fn completion_message_counts_characters() {
        let result = TranscriptionResult {
            text: "Grüße aus Köln".to_string(),
            language: "de".to_string(),
            language_probability: 0.9,
            segments: vec![crate::domain::transcription::Segment::new("Grüße aus Köln", 0.0, 1.0)],
        };

        assert_eq!(
            completion_message(&result),
            "Transcription complete (1 segments, 14 chars)"
        );
    }

    #[test]
    fn engine_output_goes_through_presenter() {
        let presenter: SharedPresenter = Arc::new(Mutex::new(Presenter::new()));
        lock(&presenter).start_spinner("Transcribing...");

        let sink = engine_output(&presenter);
        sink("Downloading model.bin");

        let mut p = lock(&presenter);
        p.spinner_success("done");
    }

    #[tokio::test]
    async fn missing_audio_path_short_circuits() {
        let presenter: SharedPresenter = Arc::new(Mutex::new(Presenter::new()));
        let options = InvokeOptions {
            audio_path: None,
            config_path: None,
            device_policy: Default::default(),
            python: None,
            repair: true,
        };

        let outcome = invoke(options, &presenter).await;

        let value: Value = serde_json::from_str(&outcome.to_json()).unwrap();
        assert_eq!(value, json!({"error": "Audio file path not provided"}));
    }
}
