//! Python interpreter resolution
//!
//! The probe, the installer and the engine bridge all run the same
//! interpreter so that an install lands where the engine is imported from.

use std::path::{Path, PathBuf};

/// Application directory name under the platform data dir
const APP_DIR: &str = "whisper-bridge";

/// Python interpreter used to host faster-whisper
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PythonInterpreter {
    program: PathBuf,
}

impl PythonInterpreter {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Resolve the interpreter.
    ///
    /// Order: `explicit`, then the app virtualenv if it has an interpreter,
    /// then the platform default on `PATH`.
    pub fn resolve(explicit: Option<PathBuf>) -> Self {
        if let Some(program) = explicit {
            return Self::new(program);
        }

        if let Some(venv) = dirs::data_dir().map(|d| d.join(APP_DIR).join("venv")) {
            if let Some(program) = Self::from_venv(&venv) {
                return program;
            }
        }

        Self::new(Self::default_program())
    }

    /// Interpreter inside a virtualenv, if present
    pub fn from_venv(venv: &Path) -> Option<Self> {
        let program = if cfg!(windows) {
            venv.join("Scripts").join("python.exe")
        } else {
            venv.join("bin").join("python")
        };

        program.exists().then(|| Self::new(program))
    }

    fn default_program() -> &'static str {
        if cfg!(windows) {
            "python"
        } else {
            "python3"
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}
