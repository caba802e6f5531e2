//! CLI argument definitions using Clap

use std::ffi::OsString;
use std::path::PathBuf;

use clap::builder::FalseyValueParser;
use clap::{ArgAction, Parser, ValueEnum};

use crate::domain::device::DevicePolicy;

/// WhisperBridge - single-shot speech-to-text with a JSON result
#[derive(Parser, Debug)]
#[command(name = "whisper-bridge")]
#[command(version)]
#[command(about = "Transcribe one audio file with faster-whisper and print the result as JSON")]
#[command(long_about = None)]
pub struct Cli {
    /// Audio file to transcribe
    #[arg(value_name = "AUDIO", allow_hyphen_values = true)]
    pub audio_path: Option<PathBuf>,

    /// JSON file overriding transcription options
    #[arg(value_name = "CONFIG", allow_hyphen_values = true)]
    pub config_path: Option<PathBuf>,

    /// Trailing arguments, accepted and ignored
    #[arg(hide = true, allow_hyphen_values = true)]
    pub ignored: Vec<OsString>,

    /// Device selection policy
    #[arg(
        long,
        value_name = "POLICY",
        env = "WHISPER_BRIDGE_DEVICE_POLICY",
        default_value = "cpu"
    )]
    pub device_policy: DevicePolicyArg,

    /// Python interpreter hosting faster-whisper
    #[arg(long, value_name = "PATH", env = "WHISPER_BRIDGE_PYTHON")]
    pub python: Option<PathBuf>,

    /// Do not try to install faster-whisper when it is missing
    #[arg(
        long,
        env = "WHISPER_BRIDGE_NO_REPAIR",
        action = ArgAction::SetTrue,
        value_parser = FalseyValueParser::new()
    )]
    pub no_repair: bool,
}

/// Device policy argument for clap ValueEnum
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum DevicePolicyArg {
    /// Use the GPU when one is detected
    Auto,
    /// Always use the CPU
    Cpu,
}

impl From<DevicePolicyArg> for DevicePolicy {
    fn from(arg: DevicePolicyArg) -> Self {
        match arg {
            DevicePolicyArg::Auto => DevicePolicy::Auto,
            DevicePolicyArg::Cpu => DevicePolicy::Cpu,
        }
    }
}

/// Parsed invocation options
#[derive(Debug, Clone)]
pub struct InvokeOptions {
    pub audio_path: Option<PathBuf>,
    pub config_path: Option<PathBuf>,
    pub device_policy: DevicePolicy,
    pub python: Option<PathBuf>,
    pub repair: bool,
}

impl From<Cli> for InvokeOptions {
    fn from(cli: Cli) -> Self {
        Self {
            audio_path: cli.audio_path,
            config_path: cli.config_path,
            device_policy: cli.device_policy.into(),
            python: cli.python,
            repair: !cli.no_repair,
        }
    }
}
