//! CLI presenter for output formatting
//!
//! Everything except the result goes to stderr; stdout carries exactly one
//! JSON line.

use std::io::{self, Write};

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

use crate::domain::transcription::InvocationOutcome;

/// Presenter for CLI output formatting
pub struct Presenter {
    spinner: Option<ProgressBar>,
}

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self { spinner: None }
    }

    /// Start a spinner with message
    pub fn start_spinner(&mut self, message: &str) {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
                .template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        self.spinner = Some(spinner);
    }

    /// Mark spinner as success and finish
    pub fn spinner_success(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_with_message(format!("{} {}", "✓".green(), message));
        }
    }

    /// Mark spinner as failed and finish
    pub fn spinner_fail(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_with_message(format!("{} {}", "✗".red(), message));
        }
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        self.print(format!("{} {}", "ℹ".cyan(), message));
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        self.print(format!("{} {}", "⚠".yellow(), message));
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        self.print(format!("{} {}", "✗".red(), message));
    }

    /// Relay a line of engine output to stderr
    pub fn diagnostic(&self, line: &str) {
        self.print(line.dimmed().to_string());
    }

    /// Write a stderr line without tearing an active spinner
    fn print(&self, line: String) {
        match &self.spinner {
            Some(spinner) => spinner.suspend(|| eprintln!("{}", line)),
            None => eprintln!("{}", line),
        }
    }

    /// Write the result line to stdout
    pub fn emit(&self, outcome: &InvocationOutcome) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", outcome.to_json())?;
        stdout.flush()
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}
