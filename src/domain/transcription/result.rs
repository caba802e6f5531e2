//! Output contract emitted on stdout

use serde::{Deserialize, Serialize};

use super::Segment;

/// Advisory text of the mock result
pub const MOCK_TEXT: &str = "This is a mock transcription. Please install faster-whisper to get real transcription. Run: pip install faster-whisper";

/// Text of the single mock segment
pub const MOCK_SEGMENT_TEXT: &str = "This is a mock transcription.";

/// End of the single mock segment, in seconds
pub const MOCK_SEGMENT_END: f64 = 5.0;

/// A completed transcription.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptionResult {
    /// All segment texts joined with a single space
    pub text: String,
    pub language: String,
    pub language_probability: f64,
    pub segments: Vec<Segment>,
}

impl TranscriptionResult {
    /// The canned result used when no speech engine can be loaded.
    pub fn mock() -> Self {
        Self {
            text: MOCK_TEXT.to_string(),
            language: "en".to_string(),
            language_probability: 1.0,
            segments: vec![Segment::new(MOCK_SEGMENT_TEXT, 0.0, MOCK_SEGMENT_END)],
        }
    }
}

/// A failed invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResult {
    pub error: String,
}

impl ErrorResult {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Exactly one of these is emitted per process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InvocationOutcome {
    Transcription(TranscriptionResult),
    Error(ErrorResult),
}

impl InvocationOutcome {
    /// Render as a single compact JSON line
    pub fn to_json(&self) -> String {
        match serde_json::to_string(self) {
            Ok(json) => json,
            Err(e) => serde_json::json!({ "error": format!("Failed to encode result: {}", e) })
                .to_string(),
        }
    }
}

impl From<TranscriptionResult> for InvocationOutcome {
    fn from(result: TranscriptionResult) -> Self {
        InvocationOutcome::Transcription(result)
    }
}

impl From<ErrorResult> for InvocationOutcome {
    fn from(error: ErrorResult) -> Self {
        InvocationOutcome::Error(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn mock_has_documented_shape() {
        let mock = TranscriptionResult::mock();
        assert!(mock.text.starts_with(MOCK_SEGMENT_TEXT));
        assert_eq!(mock.language, "en");
        assert_eq!(mock.language_probability, 1.0);
        assert_eq!(mock.segments.len(), 1);
        assert_eq!(mock.segments[0].start, 0.0);
        assert!(mock.segments[0].end > 0.0);
    }

    #[test]
    fn mock_serializes_to_documented_json() {
        let outcome = InvocationOutcome::from(TranscriptionResult::mock());
        let value: Value = serde_json::from_str(&outcome.to_json()).unwrap();
        assert_eq!(
            value,
            json!({
                "text": MOCK_TEXT,
                "language": "en",
                "language_probability": 1.0,
                "segments": [
                    {"text": "This is a mock transcription.", "start": 0.0, "end": 5.0}
                ]
            })
        );
    }

    #[test]
    fn error_serializes_with_only_error_key() {
        let outcome = InvocationOutcome::from(ErrorResult::new("boom"));
        assert_eq!(outcome.to_json(), r#"{"error":"boom"}"#);
    }

    #[test]
    fn output_is_a_single_line() {
        let result = TranscriptionResult {
            text: "a b".to_string(),
            language: "en".to_string(),
            language_probability: 0.9,
            segments: vec![Segment::new("a", 0.0, 1.0), Segment::new("b", 1.0, 2.0)],
        };
        let json = InvocationOutcome::from(result).to_json();
        assert!(!json.contains('\n'));
    }
}
