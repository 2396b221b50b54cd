//! Transcription module for Skrift.
//!
//! Covers the whole path from raw model output to rendered files: the
//! segment data model, the best-effort response parser, the TXT and SRT
//! renderers, and the Gemini-backed pipeline that drives them.

mod flash;
mod format;
mod models;
mod parser;

pub use flash::FlashTranscriber;
pub use format::{format_srt_timestamp, format_transcript, OutputFormat};
pub use models::{format_timestamp, parse_timestamp, Transcript, TranscriptSegment};
pub use parser::{parse_raw_transcript, DEFAULT_FALLBACK_SECONDS};

use crate::error::Result;
use async_trait::async_trait;
use std::path::Path;

/// Trait for transcription services.
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe an audio file and return segments with timestamps.
    async fn transcribe(&self, audio_path: &Path) -> Result<Transcript>;
}
