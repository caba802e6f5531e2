//! Normalization of engine output into the result contract

use crate::domain::transcription::TranscriptionResult;

use super::ports::{SegmentStream, TranscriptionError, TranscriptionInfo};

/// Drain `segments` once, in order, into a [`TranscriptionResult`].
///
/// `text` is the segment texts joined by a single space, with no trimming.
/// An error anywhere in the stream discards everything produced so far.
pub async fn normalize(
    mut segments: SegmentStream,
    info: TranscriptionInfo,
) -> Result<TranscriptionResult, TranscriptionError> {
    let mut collected = Vec::new();
    while let Some(segment) = segments.next().await? {
        collected.push(segment);
    }

    let text = collected
        .iter()
        .map(|s| s.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    Ok(TranscriptionResult {
        text,
        language: info.language,
        language_probability: info.language_probability,
        segments: collected,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::SegmentSource;
    use crate::domain::transcription::Segment;
    use async_trait::async_trait;

    fn info() -> TranscriptionInfo {
        TranscriptionInfo {
            language: "fr".to_string(),
            language_probability: 0.87,
        }
    }

    #[tokio::test]
    async fn joins_texts_with_single_space() {
        let segments = vec![
            Segment::new(" Bonjour", 0.0, 1.2),
            Segment::new(" tout le monde.", 1.2, 2.8),
        ];
        let result = normalize(SegmentStream::from_segments(segments.clone()), info())
            .await
            .unwrap();

        assert_eq!(result.text, " Bonjour  tout le monde.");
        assert_eq!(result.segments, segments);
        assert_eq!(result.language, "fr");
        assert_eq!(result.language_probability, 0.87);
    }

    #[tokio::test]
    async fn join_invariant_holds() {
        let segments: Vec<Segment> = (0..5)
            .map(|i| Segment::new(format!("part{}", i), i as f64, i as f64 + 1.0))
            .collect();
        let result = normalize(SegmentStream::from_segments(segments), info())
            .await
            .unwrap();

        let rejoined = result
            .segments
            .iter()
            .map(|s| s.text.clone())
            .collect::<Vec<_>>()
            .join(" ");
        assert_eq!(result.text, rejoined);
    }

    #[tokio::test]
    async fn empty_stream_gives_empty_text() {
        let result = normalize(SegmentStream::from_segments(Vec::new()), info())
            .await
            .unwrap();

        assert_eq!(result.text, "");
        assert!(result.segments.is_empty());
    }

    struct BreaksAfter(usize);

    #[async_trait]
    impl SegmentSource for BreaksAfter {
        async fn next_segment(&mut self) -> Result<Option<Segment>, TranscriptionError> {
            if self.0 == 0 {
                return Err(TranscriptionError::Engine("CUDA out of memory".into()));
            }
            self.0 -= 1;
            Ok(Some(Segment::new("partial", 0.0, 1.0)))
        }
    }

    #[tokio::test]
    async fn stream_error_discards_partial_segments() {
        let err = normalize(SegmentStream::new(BreaksAfter(3)), info())
            .await
            .unwrap_err();

        assert_eq!(err, TranscriptionError::Engine("CUDA out of memory".into()));
    }
}
