//! Configuration port interface

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::domain::error::ConfigError;

/// Port for the optional config override
#[async_trait]
pub trait ConfigSource: Send + Sync {
    /// Load the override mapping.
    ///
    /// # Returns
    /// `None` when there is nothing to overlay (no path, or no file at it)
    async fn load_overrides(&self) -> Result<Option<Map<String, Value>>, ConfigError>;
}
