//! Gemini Flash transcription pipeline.
//!
//! Splits the audio into chunks, sends each chunk to the model with a
//! minute-offset prompt, and parses the combined raw text into a transcript.
//! Recordings longer than the configured maximum are rejected up front.
//! Chunks are processed sequentially; a failed chunk is logged and skipped,
//! and the run only fails when no chunk produced any text.

use super::parser::parse_raw_transcript;
use super::{Transcriber, Transcript};
use crate::audio::{mime_type, probe_duration, split_audio};
use crate::config::{Prompts, Settings};
use crate::error::{Result, SkriftError};
use crate::gemini::{GeminiClient, GenerationConfig};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, instrument, warn};

/// Gemini-based transcriber producing timestamped segments.
pub struct FlashTranscriber {
    client: GeminiClient,
    prompts: Prompts,
    chunk_duration_seconds: u32,
    fallback_segment_seconds: f64,
    max_duration_seconds: u32,
    temp_dir: PathBuf,
}

impl FlashTranscriber {
    /// Create a transcriber from settings, reading the API key from the
    /// environment.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let generation = GenerationConfig {
            temperature: settings.gemini.temperature,
            top_p: settings.gemini.top_p,
            top_k: settings.gemini.top_k,
            max_output_tokens: settings.gemini.max_output_tokens,
        };

        let client = GeminiClient::from_env(
            &settings.gemini.model,
            Duration::from_secs(settings.gemini.timeout_seconds),
            generation,
        )?;

        Ok(Self {
            client,
            prompts: Prompts::default(),
            chunk_duration_seconds: settings.transcription.chunk_duration_seconds,
            fallback_segment_seconds: settings.transcription.fallback_segment_seconds,
            max_duration_seconds: settings.transcription.max_duration_seconds,
            temp_dir: settings.temp_dir(),
        })
    }

    /// Create a transcriber with an explicit client and prompts.
    pub fn new(
        client: GeminiClient,
        prompts: Prompts,
        chunk_duration_seconds: u32,
        fallback_segment_seconds: f64,
        max_duration_seconds: u32,
        temp_dir: PathBuf,
    ) -> Self {
        Self {
            client,
            prompts,
            chunk_duration_seconds,
            fallback_segment_seconds,
            max_duration_seconds,
            temp_dir,
        }
    }

    /// Create the scratch directory for chunk files under the configured
    /// temp dir. The directory and its chunks are removed on drop.
    fn chunk_workspace(&self) -> Result<tempfile::TempDir> {
        std::fs::create_dir_all(&self.temp_dir)?;
        Ok(tempfile::tempdir_in(&self.temp_dir)?)
    }

    /// Transcribe a single chunk to raw timestamped text.
    #[instrument(skip(self), fields(chunk = %chunk_path.display()))]
    async fn transcribe_chunk(&self, chunk_path: &Path, offset_seconds: f64) -> Result<String> {
        let audio = tokio::fs::read(chunk_path).await?;
        let prompt = self.prompts.segment_prompt(offset_seconds);

        self.client
            .generate_transcript(
                &self.prompts.system_instruction,
                &prompt,
                &audio,
                mime_type(chunk_path),
            )
            .await
    }

    /// Transcribe a whole audio file and return the raw concatenated model
    /// output, before any parsing.
    pub async fn transcribe_raw(&self, audio_path: &Path) -> Result<String> {
        if !audio_path.is_file() {
            return Err(SkriftError::InvalidInput(format!(
                "Audio file not found: {}",
                audio_path.display()
            )));
        }

        let duration = probe_duration(audio_path).await?;
        if !within_duration_limit(duration, self.max_duration_seconds) {
            return Err(SkriftError::InvalidInput(format!(
                "Audio is {:.0}s long, over the configured maximum of {}s",
                duration, self.max_duration_seconds
            )));
        }

        let workspace = self.chunk_workspace()?;
        let chunks = split_audio(audio_path, workspace.path(), self.chunk_duration_seconds).await?;

        let chunk_count = chunks.len();
        info!("Transcribing {} chunk(s)", chunk_count);

        let mut parts: Vec<String> = Vec::with_capacity(chunk_count);
        let mut failures = 0usize;

        for (idx, (chunk_path, offset)) in chunks.into_iter().enumerate() {
            match self.transcribe_chunk(&chunk_path, offset).await {
                Ok(text) if !text.trim().is_empty() => parts.push(text),
                Ok(_) => {
                    info!("Chunk {} at {:.0}s produced no speech", idx, offset);
                }
                Err(e) => {
                    warn!("Chunk {} at {:.0}s failed: {}", idx, offset, e);
                    failures += 1;
                }
            }
        }

        drop(workspace);

        if parts.is_empty() && failures > 0 {
            return Err(SkriftError::Transcription(format!(
                "all {} chunk(s) failed",
                chunk_count
            )));
        }

        Ok(parts.join("\n"))
    }
}

/// A limit of zero disables the duration check.
fn within_duration_limit(duration_seconds: f64, max_duration_seconds: u32) -> bool {
    max_duration_seconds == 0 || duration_seconds <= max_duration_seconds as f64
}

#[async_trait]
impl Transcriber for FlashTranscriber {
    async fn transcribe(&self, audio_path: &Path) -> Result<Transcript> {
        let raw = self.transcribe_raw(audio_path).await?;
        let segments = parse_raw_transcript(&raw, self.fallback_segment_seconds);
        Ok(Transcript::new(segments))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_transcriber(temp_dir: PathBuf) -> FlashTranscriber {
        let client = GeminiClient::new(
            "test-key",
            "gemini-2.0-flash",
            Duration::from_secs(5),
            GenerationConfig::default(),
        )
        .unwrap();
        FlashTranscriber::new(client, Prompts::default(), 300, 3.0, 14400, temp_dir)
    }

    #[tokio::test]
    async fn test_missing_file_is_invalid_input() {
        let transcriber = test_transcriber(std::env::temp_dir());
        let result = transcriber.transcribe_raw(Path::new("/nonexistent.mp3")).await;
        assert!(matches!(result, Err(SkriftError::InvalidInput(_))));
    }

    #[test]
    fn test_duration_limit() {
        assert!(within_duration_limit(100.0, 200));
        assert!(within_duration_limit(200.0, 200));
        assert!(!within_duration_limit(200.5, 200));
        // Zero disables the limit
        assert!(within_duration_limit(1_000_000.0, 0));
    }

    #[test]
    fn test_chunk_workspace_under_configured_dir() {
        let base = tempfile::tempdir().unwrap();
        let configured = base.path().join("chunks");
        let transcriber = test_transcriber(configured.clone());

        let workspace = transcriber.chunk_workspace().unwrap();
        assert!(workspace.path().starts_with(&configured));
        assert!(workspace.path().exists());
    }
}
