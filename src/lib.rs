//! Skrift - Timestamped Audio Transcription
//!
//! A CLI tool that transcribes audio files with a hosted multimodal model
//! and exports the result as timestamped text and SubRip subtitles.
//!
//! The name "Skrift" comes from the Norwegian word for "writing."
//!
//! # Overview
//!
//! Skrift allows you to:
//! - Transcribe local audio files via the Gemini API
//! - Split long recordings into chunks the model can handle
//! - Export transcripts as plain timestamped text (`[MM:SS] ...`) or SRT
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration and prompt templates
//! - `audio` - Audio probing and chunking (ffmpeg/ffprobe)
//! - `gemini` - HTTP client for the Gemini generateContent endpoint
//! - `transcription` - Response parsing, segment model, output formatting
//! - `cli` - Command-line interface
//!
//! # Example
//!
//! ```rust,no_run
//! use skrift::config::Settings;
//! use skrift::transcription::{FlashTranscriber, OutputFormat, Transcriber, format_transcript};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let transcriber = FlashTranscriber::from_settings(&settings)?;
//!
//!     let transcript = transcriber.transcribe(std::path::Path::new("talk.mp3")).await?;
//!     println!("{}", format_transcript(&transcript, OutputFormat::Srt));
//!
//!     Ok(())
//! }
//! ```

pub mod audio;
pub mod cli;
pub mod config;
pub mod error;
pub mod gemini;
pub mod transcription;

pub use error::{Result, SkriftError};
