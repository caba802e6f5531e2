//! CLI layer - Command-line interface
//!
//! Contains argument parsing, side-channel narration,
//! and the invocation runner.

pub mod app;
pub mod args;
pub mod presenter;

// Re-export commonly used types
pub use app::{run_invocation, usage_error, EXIT_ERROR, EXIT_SUCCESS};
pub use args::{Cli, DevicePolicyArg, InvokeOptions};
pub use presenter::Presenter;
