//! Engine availability detection and best-effort repair

use std::time::Duration;

use super::ports::{InstallScope, PackageInstaller, SpeechEngine};

/// Whether the real engine can be used
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    Available,
    Unavailable,
}

impl Availability {
    pub fn is_available(self) -> bool {
        self == Availability::Available
    }
}

/// How a missing engine may be installed
#[derive(Debug, Clone)]
pub struct RepairPolicy {
    /// Package to install
    pub package: String,
    /// Strategies tried in order until one succeeds
    pub strategies: Vec<InstallScope>,
    /// Bound on the installer version check
    pub version_timeout: Duration,
    /// Bound on each install attempt
    pub install_timeout: Duration,
}

impl Default for RepairPolicy {
    fn default() -> Self {
        Self {
            package: "faster-whisper".to_string(),
            strategies: vec![InstallScope::System, InstallScope::User],
            version_timeout: Duration::from_secs(10),
            install_timeout: Duration::from_secs(120),
        }
    }
}

/// Outcome of [`ensure_engine`] with its diagnostic trail
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityReport {
    pub availability: Availability,
    /// Human-readable lines for the side channel
    pub trail: Vec<String>,
}

impl AvailabilityReport {
    pub fn is_available(&self) -> bool {
        self.availability.is_available()
    }
}

/// Check once whether the engine's entry point loads.
pub async fn probe_engine<E: SpeechEngine + ?Sized>(
    engine: &E,
    trail: &mut Vec<String>,
) -> Availability {
    match engine.probe().await {
        Ok(()) => {
            trail.push("Speech engine is available".to_string());
            Availability::Available
        }
        Err(e) => {
            trail.push(format!("Speech engine is not available: {}", e.0));
            Availability::Unavailable
        }
    }
}

/// Try to install the engine package. Returns true if some strategy succeeded.
///
/// Never fails: a missing installer, a timeout, or every strategy failing all
/// yield `false`.
pub async fn attempt_repair<I: PackageInstaller + ?Sized>(
    installer: &I,
    policy: &RepairPolicy,
    trail: &mut Vec<String>,
) -> bool {
    match installer.version(policy.version_timeout).await {
        Ok(banner) => trail.push(format!("Package installer available: {}", banner.trim())),
        Err(e) => {
            trail.push(format!("Package installer not available: {}", e));
            return false;
        }
    }

    for scope in &policy.strategies {
        trail.push(format!(
            "Installing {} ({} scope)...",
            policy.package, scope
        ));
        match installer
            .install(&policy.package, *scope, policy.install_timeout)
            .await
        {
            Ok(()) => {
                trail.push(format!("Installed {}", policy.package));
                return true;
            }
            Err(e) => trail.push(format!("Install ({} scope) failed: {}", scope, e)),
        }
    }

    trail.push("All installation attempts failed".to_string());
    false
}

/// Probe the engine, and when it is missing and `repair` is given, attempt one
/// repair followed by one more probe.
pub async fn ensure_engine<E, I>(
    engine: &E,
    installer: &I,
    repair: Option<&RepairPolicy>,
) -> AvailabilityReport
where
    E: SpeechEngine + ?Sized,
    I: PackageInstaller + ?Sized,
{
    let mut trail = Vec::new();

    let availability = match probe_engine(engine, &mut trail).await {
        Availability::Available => Availability::Available,
        Availability::Unavailable => match repair {
            None => {
                trail.push("Automatic installation disabled".to_string());
                Availability::Unavailable
            }
            Some(policy) => {
                if attempt_repair(installer, policy, &mut trail).await {
                    let retried = probe_engine(engine, &mut trail).await;
                    if !retried.is_available() {
                        trail.push("Still unable to load the engine after installation".to_string());
                    }
                    retried
                } else {
                    Availability::Unavailable
                }
            }
        },
    };

    if !availability.is_available() {
        trail.push("Falling back to mock transcription".to_string());
    }

    AvailabilityReport {
        availability,
        trail,
    }
}
