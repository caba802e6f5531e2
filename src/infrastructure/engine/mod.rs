//! Speech engine adapters

mod faster_whisper;

pub use faster_whisper::{DiagnosticSink, FasterWhisperEngine};
