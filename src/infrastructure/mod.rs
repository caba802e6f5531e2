//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with external systems like the Python interpreter,
//! pip, and the host filesystem.

pub mod config;
pub mod engine;
pub mod host;
pub mod installer;
mod process;
pub mod python;

// Re-export adapters
pub use config::JsonConfigFile;
pub use engine::FasterWhisperEngine;
pub use host::HostEnvironment;
pub use installer::PipInstaller;
pub use python::PythonInterpreter;
