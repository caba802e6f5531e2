//! pip package installer adapter

use std::time::Duration;

use async_trait::async_trait;

use crate::application::ports::{InstallError, InstallScope, PackageInstaller};
use crate::infrastructure::process::{background_command, last_line, output_within, RunError};
use crate::infrastructure::python::PythonInterpreter;

/// Installs packages with `python -m pip`
pub struct PipInstaller {
    python: PythonInterpreter,
}

impl PipInstaller {
    pub fn new(python: PythonInterpreter) -> Self {
        Self { python }
    }

    /// Arguments after the interpreter for `pip --version`
    fn version_args() -> Vec<String> {
        vec!["-m".into(), "pip".into(), "--version".into()]
    }

    /// Arguments after the interpreter for installing `package`
    fn install_args(package: &str, scope: InstallScope) -> Vec<String> {
        let mut args = vec!["-m".to_string(), "pip".to_string(), "install".to_string()];
        if scope == InstallScope::User {
            args.push("--user".to_string());
        }
        args.push(package.to_string());
        args
    }

    async fn run(&self, args: Vec<String>, timeout: Duration) -> Result<String, InstallError> {
        let mut command = background_command(self.python.program());
        command.args(&args);

        let output = output_within(command, timeout).await.map_err(|e| match e {
            RunError::NotFound => InstallError::InstallerNotFound(
                self.python.program().to_string_lossy().to_string(),
            ),
            RunError::TimedOut => InstallError::Timeout(timeout),
            RunError::Io(e) => InstallError::Io(e.to_string()),
        })?;

        if !output.status.success() {
            let reason = last_line(&output.stderr);
            return Err(InstallError::Failed(if reason.is_empty() {
                output.status.to_string()
            } else {
                reason
            }));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

#[async_trait]
impl PackageInstaller for PipInstaller {
    async fn version(&self, timeout: Duration) -> Result<String, InstallError> {
        self.run(Self::version_args(), timeout).await
    }

    async fn install(
        &self,
        package: &str,
        scope: InstallScope,
        timeout: Duration,
    ) -> Result<(), InstallError> {
        self.run(Self::install_args(package, scope), timeout)
            .await
            .map(|_| ())
    }
}
