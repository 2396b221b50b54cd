//! CLI module for Skrift.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Skrift - Timestamped Audio Transcription
///
/// Transcribes local audio files via the Gemini API and exports the result
/// as timestamped text and SubRip subtitles.
/// The name "Skrift" comes from the Norwegian word for "writing."
#[derive(Parser, Debug)]
#[command(name = "skrift")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Transcribe an audio file
    Transcribe {
        /// Path to the audio file
        input: String,

        /// Directory to write transcript files to (overrides config)
        #[arg(short, long)]
        output_dir: Option<String>,

        /// Output format (txt, srt, both)
        #[arg(long, default_value = "both")]
        format: String,

        /// Print the full transcript instead of a preview
        #[arg(long)]
        full: bool,
    },

    /// Check system requirements and configuration
    Doctor,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Open configuration file in editor
    Edit,

    /// Show configuration file path
    Path,
}
