//! Device and numeric precision selection

use std::fmt;

/// Which device selection profile is in force.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DevicePolicy {
    /// Use the GPU when the host shows signs of a GPU runtime
    Auto,
    /// Always run on the CPU, whatever the host offers
    #[default]
    Cpu,
}

impl fmt::Display for DevicePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DevicePolicy::Auto => write!(f, "auto"),
            DevicePolicy::Cpu => write!(f, "cpu"),
        }
    }
}

/// Compute device handed to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Device {
    Cpu,
    Gpu,
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Device::Cpu => write!(f, "cpu"),
            Device::Gpu => write!(f, "gpu"),
        }
    }
}

/// Numeric precision used for inference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComputeType {
    Int8,
    Float16,
}

impl fmt::Display for ComputeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComputeType::Int8 => write!(f, "int8"),
            ComputeType::Float16 => write!(f, "float16"),
        }
    }
}

/// Device plus precision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceSelection {
    pub device: Device,
    pub compute_type: ComputeType,
}

impl DeviceSelection {
    pub const CPU: Self = Self {
        device: Device::Cpu,
        compute_type: ComputeType::Int8,
    };

    pub const GPU: Self = Self {
        device: Device::Gpu,
        compute_type: ComputeType::Float16,
    };
}

/// GPU markers observed on the host, captured once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EnvironmentSnapshot {
    /// A GPU device node such as `/dev/nvidia0` exists
    pub gpu_device_node: bool,
    /// A GPU toolkit install was found (env var or well-known path)
    pub gpu_toolkit: bool,
}

impl EnvironmentSnapshot {
    pub fn gpu_detected(&self) -> bool {
        self.gpu_device_node || self.gpu_toolkit
    }
}

/// Pick the device and precision for `policy` on a host described by `snapshot`.
pub fn select_device(policy: DevicePolicy, snapshot: &EnvironmentSnapshot) -> DeviceSelection {
    match policy {
        DevicePolicy::Auto if snapshot.gpu_detected() => DeviceSelection::GPU,
        DevicePolicy::Auto | DevicePolicy::Cpu => DeviceSelection::CPU,
    }
}
