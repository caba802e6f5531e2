//! Transcription domain module

mod result;
mod segment;

pub use result::{
    ErrorResult, InvocationOutcome, TranscriptionResult, MOCK_SEGMENT_END, MOCK_SEGMENT_TEXT,
    MOCK_TEXT,
};
pub use segment::Segment;
