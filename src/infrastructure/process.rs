//! Bounded child process execution

use std::io;
use std::path::Path;
use std::process::{Output, Stdio};
use std::time::Duration;

use tokio::process::Command;

/// Suppresses the console window a child would otherwise open
#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

/// Command for a helper process that never shows a console window
pub(crate) fn background_command(program: &Path) -> Command {
    let mut command = Command::new(program);
    #[cfg(windows)]
    command.creation_flags(CREATE_NO_WINDOW);
    command
}

/// Why a bounded command did not produce output
#[derive(Debug)]
pub(crate) enum RunError {
    /// The program does not exist
    NotFound,
    /// The deadline passed; the child has been killed
    TimedOut,
    Io(io::Error),
}

/// Run `command` to completion, capturing stdout and stderr, killing it if
/// it outlives `timeout`.
pub(crate) async fn output_within(
    mut command: Command,
    timeout: Duration,
) -> Result<Output, RunError> {
    command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    match tokio::time::timeout(timeout, command.output()).await {
        Ok(Ok(output)) => Ok(output),
        Ok(Err(e)) if e.kind() == io::ErrorKind::NotFound => Err(RunError::NotFound),
        Ok(Err(e)) => Err(RunError::Io(e)),
        Err(_) => Err(RunError::TimedOut),
    }
}

/// Last non-empty line of captured output, for diagnostics
pub(crate) fn last_line(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .lines()
        .rev()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or_default()
        .to_string()
}
