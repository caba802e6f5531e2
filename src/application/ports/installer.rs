//! Package installer port interface

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

/// Package installer errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InstallError {
    #[error("Package installer not found: {0}")]
    InstallerNotFound(String),

    #[error("Timed out after {0:?}")]
    Timeout(Duration),

    #[error("Command failed: {0}")]
    Failed(String),

    #[error("I/O error: {0}")]
    Io(String),
}

/// Where an install puts the package
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallScope {
    /// Interpreter-wide (or active virtualenv) site-packages
    System,
    /// The current user's site-packages
    User,
}

impl fmt::Display for InstallScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstallScope::System => write!(f, "system"),
            InstallScope::User => write!(f, "user"),
        }
    }
}

/// Port for installing the engine's package
#[async_trait]
pub trait PackageInstaller: Send + Sync {
    /// Check that the installer responds. Returns its version banner.
    async fn version(&self, timeout: Duration) -> Result<String, InstallError>;

    /// Install `package` into `scope`.
    async fn install(
        &self,
        package: &str,
        scope: InstallScope,
        timeout: Duration,
    ) -> Result<(), InstallError>;
}
