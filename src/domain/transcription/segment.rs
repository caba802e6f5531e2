//! Recognized speech segment

use serde::{Deserialize, Serialize};

/// One timed span of recognized speech.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub text: String,
    /// Start offset in seconds
    pub start: f64,
    /// End offset in seconds
    pub end: f64,
}

impl Segment {
    pub fn new(text: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            text: text.into(),
            start,
            end,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_expected_keys() {
        let segment = Segment::new("hello", 0.0, 1.5);
        let json = serde_json::to_string(&segment).unwrap();
        assert_eq!(json, r#"{"text":"hello","start":0.0,"end":1.5}"#);
    }
}
