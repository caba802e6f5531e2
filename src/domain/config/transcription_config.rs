//! Transcription configuration value object

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::error::ConfigError;

/// Sampling temperature, or a schedule of temperatures tried in order when
/// decoding at the previous one fails
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Temperature {
    Single(f64),
    Fallback(Vec<f64>),
}

impl Default for Temperature {
    fn default() -> Self {
        Temperature::Single(0.0)
    }
}

/// Options forwarded to the speech engine.
///
/// Built from [`TranscriptionConfig::default`], overlaid at most once from an
/// override mapping, and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptionConfig {
    /// Model identifier (e.g. `base`, `small.en`) or a filesystem path
    pub model_path: String,
    /// Spoken language; `None` lets the engine detect it
    pub language: Option<String>,
    pub temperature: Temperature,
    pub best_of: u32,
    pub beam_size: u32,
    pub patience: f64,
    pub length_penalty: f64,
    /// Keys the override supplied that have no meaning here
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            model_path: "base".to_string(),
            language: None,
            temperature: Temperature::default(),
            best_of: 5,
            beam_size: 5,
            patience: 1.0,
            length_penalty: 1.0,
            extra: Map::new(),
        }
    }
}

impl TranscriptionConfig {
    /// Resolve the effective config from the defaults and an optional override.
    ///
    /// Every key of `overrides` replaces the default of the same name; keys
    /// the override omits keep their default. Unknown keys are carried in
    /// [`TranscriptionConfig::extra`].
    pub fn resolve(overrides: Option<Map<String, Value>>) -> Result<Self, ConfigError> {
        let Some(overrides) = overrides else {
            return Ok(Self::default());
        };

        let mut merged = Self::default_map();
        merged.extend(overrides);

        serde_json::from_value(Value::Object(merged))
            .map_err(|e| ConfigError::ReadError(e.to_string()))
    }

    /// The defaults as a JSON mapping
    fn default_map() -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("model_path".into(), Value::from("base"));
        map.insert("language".into(), Value::Null);
        map.insert("temperature".into(), Value::from(0.0));
        map.insert("best_of".into(), Value::from(5));
        map.insert("beam_size".into(), Value::from(5));
        map.insert("patience".into(), Value::from(1.0));
        map.insert("length_penalty".into(), Value::from(1.0));
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn overrides(value: Value) -> Option<Map<String, Value>> {
        match value {
            Value::Object(map) => Some(map),
            _ => panic!("test overrides must be an object"),
        }
    }

    #[test]
    fn defaults_have_expected_values() {
        let config = TranscriptionConfig::default();
        assert_eq!(config.model_path, "base");
        assert!(config.language.is_none());
        assert_eq!(config.temperature, Temperature::Single(0.0));
        assert_eq!(config.best_of, 5);
        assert_eq!(config.beam_size, 5);
        assert_eq!(config.patience, 1.0);
        assert_eq!(config.length_penalty, 1.0);
        assert!(config.extra.is_empty());
    }

    #[test]
    fn default_map_matches_default() {
        let from_map = TranscriptionConfig::resolve(Some(Map::new())).unwrap();
        assert_eq!(from_map, TranscriptionConfig::default());
    }

    #[test]
    fn resolve_without_overrides_returns_defaults() {
        let config = TranscriptionConfig::resolve(None).unwrap();
        assert_eq!(config, TranscriptionConfig::default());
    }

    #[test]
    fn resolve_overlays_present_keys_only() {
        let config =
            TranscriptionConfig::resolve(overrides(json!({"beam_size": 10, "language": "fr"})))
                .unwrap();

        assert_eq!(config.beam_size, 10);
        assert_eq!(config.language.as_deref(), Some("fr"));
        assert_eq!(config.model_path, "base");
        assert_eq!(config.temperature, Temperature::Single(0.0));
        assert_eq!(config.best_of, 5);
        assert_eq!(config.patience, 1.0);
        assert_eq!(config.length_penalty, 1.0);
    }

    #[test]
    fn resolve_replaces_every_recognized_key() {
        let config = TranscriptionConfig::resolve(overrides(json!({
            "model_path": "/models/large-v3",
            "language": "de",
            "temperature": 0.4,
            "best_of": 2,
            "beam_size": 1,
            "patience": 2.0,
            "length_penalty": 0.5,
        })))
        .unwrap();

        assert_eq!(config.model_path, "/models/large-v3");
        assert_eq!(config.language.as_deref(), Some("de"));
        assert_eq!(config.temperature, Temperature::Single(0.4));
        assert_eq!(config.best_of, 2);
        assert_eq!(config.beam_size, 1);
        assert_eq!(config.patience, 2.0);
        assert_eq!(config.length_penalty, 0.5);
    }

    #[test]
    fn resolve_keeps_unknown_keys_verbatim() {
        let config = TranscriptionConfig::resolve(overrides(
            json!({"vad_filter": true, "initial_prompt": {"nested": [1, 2]}}),
        ))
        .unwrap();

        assert_eq!(config.extra.get("vad_filter"), Some(&json!(true)));
        assert_eq!(
            config.extra.get("initial_prompt"),
            Some(&json!({"nested": [1, 2]}))
        );
        assert_eq!(config.beam_size, 5);
    }

    #[test]
    fn resolve_accepts_explicit_null_language() {
        let config = TranscriptionConfig::resolve(overrides(json!({"language": null}))).unwrap();
        assert!(config.language.is_none());
    }

    #[test]
    fn resolve_accepts_integer_for_float_option() {
        let config = TranscriptionConfig::resolve(overrides(json!({"temperature": 1}))).unwrap();
        assert_eq!(config.temperature, Temperature::Single(1.0));
    }

    #[test]
    fn resolve_accepts_temperature_schedule() {
        let config =
            TranscriptionConfig::resolve(overrides(json!({"temperature": [0.0, 0.2, 0.4]})))
                .unwrap();
        assert_eq!(
            config.temperature,
            Temperature::Fallback(vec![0.0, 0.2, 0.4])
        );
        assert!(config.extra.is_empty());
    }

    #[test]
    fn resolve_rejects_non_numeric_temperature() {
        let err = TranscriptionConfig::resolve(overrides(json!({"temperature": "hot"})))
            .unwrap_err();
        assert!(err.to_string().starts_with("Failed to read config: "));
    }

    #[test]
    fn resolve_rejects_wrong_type() {
        let err = TranscriptionConfig::resolve(overrides(json!({"beam_size": "wide"})))
            .unwrap_err();
        assert!(err.to_string().starts_with("Failed to read config: "));
    }
}
