//! WhisperBridge CLI entry point

use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;

use whisper_bridge::cli::{app, run_invocation, usage_error, Cli, Presenter};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            let presenter = Presenter::new();
            presenter.error(&e.to_string());
            return app::emit(&presenter, &usage_error(&e));
        }
    };

    run_invocation(cli.into()).await
}
