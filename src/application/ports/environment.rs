//! Host environment port interface

use crate::domain::device::EnvironmentSnapshot;

/// Port for observing GPU markers on the host
pub trait EnvironmentProbe: Send + Sync {
    fn snapshot(&self) -> EnvironmentSnapshot;
}

/// Always reports the same snapshot
impl EnvironmentProbe for EnvironmentSnapshot {
    fn snapshot(&self) -> EnvironmentSnapshot {
        *self
    }
}
