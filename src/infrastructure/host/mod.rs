//! Host GPU marker detection

use std::env;
use std::path::{Path, PathBuf};

use crate::application::ports::EnvironmentProbe;
use crate::domain::device::EnvironmentSnapshot;

/// Device nodes created by the NVIDIA driver
const GPU_DEVICE_NODES: &[&str] = &["/dev/nvidia0", "/dev/nvidiactl"];

/// Environment variables pointing at a CUDA toolkit
const GPU_TOOLKIT_VARS: &[&str] = &["CUDA_PATH", "CUDA_HOME"];

/// Default CUDA toolkit install location
const GPU_TOOLKIT_DIR: &str = "/usr/local/cuda";

/// Reads GPU markers from the real filesystem and environment
pub struct HostEnvironment {
    device_nodes: Vec<PathBuf>,
    toolkit_dir: PathBuf,
}

impl HostEnvironment {
    pub fn new() -> Self {
        Self {
            device_nodes: GPU_DEVICE_NODES.iter().map(|p| PathBuf::from(*p)).collect(),
            toolkit_dir: PathBuf::from(GPU_TOOLKIT_DIR),
        }
    }

    /// Probe custom locations instead of the well-known ones
    pub fn with_paths(device_nodes: Vec<PathBuf>, toolkit_dir: impl Into<PathBuf>) -> Self {
        Self {
            device_nodes,
            toolkit_dir: toolkit_dir.into(),
        }
    }

    fn toolkit_from_env() -> bool {
        GPU_TOOLKIT_VARS.iter().any(|var| {
            env::var_os(var)
                .map(|value| !value.is_empty() && Path::new(&value).exists())
                .unwrap_or(false)
        })
    }
}

impl Default for HostEnvironment {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvironmentProbe for HostEnvironment {
    fn snapshot(&self) -> EnvironmentSnapshot {
        EnvironmentSnapshot {
            gpu_device_node: self.device_nodes.iter().any(|p| p.exists()),
            gpu_toolkit: self.toolkit_dir.is_dir() || Self::toolkit_from_env(),
        }
    }
}
