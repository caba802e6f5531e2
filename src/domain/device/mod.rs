//! Compute device selection

mod selection;

pub use selection::{select_device, ComputeType, Device, DevicePolicy, DeviceSelection, EnvironmentSnapshot};
