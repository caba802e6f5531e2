//! JSON config file adapter

use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::fs;

use crate::application::ports::ConfigSource;
use crate::domain::error::ConfigError;

/// Optional JSON override file given on the command line
pub struct JsonConfigFile {
    path: Option<PathBuf>,
}

impl JsonConfigFile {
    /// Create a source for `path`; `None` means no override
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    /// Parse file content into an override mapping
    fn parse_json(content: &str) -> Result<Map<String, Value>, ConfigError> {
        match serde_json::from_str::<Value>(content) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => Err(ConfigError::ReadError(format!(
                "expected a JSON object, found {}",
                json_kind(&other)
            ))),
            Err(e) => Err(ConfigError::ReadError(e.to_string())),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[async_trait]
impl ConfigSource for JsonConfigFile {
    async fn load_overrides(&self) -> Result<Option<Map<String, Value>>, ConfigError> {
        let Some(path) = self.path.as_deref() else {
            return Ok(None);
        };

        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(path)
            .await
            .map_err(|e| ConfigError::ReadError(e.to_string()))?;

        Self::parse_json(&content).map(Some)
    }
}
