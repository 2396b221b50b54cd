//! Transcript output formatting (TXT, SRT).
//!
//! Renderers are pure: the same segment sequence always produces the same
//! text, segments are never reordered or merged, and an empty transcript
//! renders to an empty string.

use super::models::format_timestamp;
use super::Transcript;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputFormat {
    Txt,
    Srt,
}

impl OutputFormat {
    /// File extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Txt => "txt",
            OutputFormat::Srt => "srt",
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "txt" | "text" => Ok(OutputFormat::Txt),
            "srt" | "subrip" => Ok(OutputFormat::Srt),
            _ => Err(format!("Unknown format: {}. Use txt or srt.", s)),
        }
    }
}

/// Format a transcript for output.
pub fn format_transcript(transcript: &Transcript, format: OutputFormat) -> String {
    match format {
        OutputFormat::Txt => format_txt(transcript),
        OutputFormat::Srt => format_srt(transcript),
    }
}

/// Format as plain timestamped text: one `[MM:SS] text` line per segment.
fn format_txt(transcript: &Transcript) -> String {
    let mut output = String::new();

    for segment in &transcript.segments {
        output.push_str(&format!(
            "[{}] {}\n",
            format_timestamp(segment.start_seconds),
            segment.text
        ));
    }

    output
}

/// Format as SRT (SubRip).
fn format_srt(transcript: &Transcript) -> String {
    let mut output = String::new();

    for (i, segment) in transcript.segments.iter().enumerate() {
        // Sequence number (1-indexed)
        output.push_str(&format!("{}\n", i + 1));

        // Timestamps: 00:00:00,000 --> 00:00:00,000
        output.push_str(&format!(
            "{} --> {}\n",
            format_srt_timestamp(segment.start_seconds),
            format_srt_timestamp(segment.end_seconds)
        ));

        // Text, verbatim; embedded line breaks pass through
        output.push_str(&segment.text);
        output.push_str("\n\n");
    }

    output
}

/// Format timestamp for SRT (`HH:MM:SS,mmm`).
///
/// The comma separator is mandated by the SubRip format. Milliseconds are
/// truncated, not rounded. Negative input clamps to zero.
pub fn format_srt_timestamp(seconds: f64) -> String {
    let total_ms = (seconds.max(0.0) * 1000.0) as u64;
    let hours = total_ms / 3_600_000;
    let minutes = (total_ms % 3_600_000) / 60_000;
    let secs = (total_ms % 60_000) / 1000;
    let ms = total_ms % 1000;

    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, secs, ms)
}
