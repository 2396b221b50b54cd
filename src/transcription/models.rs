//! Data models for transcription.

use serde::{Deserialize, Serialize};

/// A complete transcript with segments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    /// Individual transcript segments with timestamps, in source order.
    pub segments: Vec<TranscriptSegment>,
    /// Full transcript text (concatenated segments).
    pub full_text: String,
    /// Total duration in seconds.
    pub duration_seconds: f64,
}

impl Transcript {
    /// Create a new transcript from segments.
    pub fn new(segments: Vec<TranscriptSegment>) -> Self {
        let full_text = segments
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        let duration_seconds = segments
            .iter()
            .map(|s| s.end_seconds)
            .fold(0.0f64, f64::max);

        Self {
            segments,
            full_text,
            duration_seconds,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// A single segment of a transcript with timestamp information.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    /// Start time in seconds.
    pub start_seconds: f64,
    /// End time in seconds.
    pub end_seconds: f64,
    /// Transcribed text content.
    pub text: String,
}

impl TranscriptSegment {
    /// Create a new transcript segment.
    pub fn new(start_seconds: f64, end_seconds: f64, text: String) -> Self {
        Self {
            start_seconds,
            end_seconds,
            text,
        }
    }

    /// Duration of this segment in seconds.
    pub fn duration(&self) -> f64 {
        self.end_seconds - self.start_seconds
    }
}

/// Format seconds as `MM:SS`.
///
/// Minutes are not wrapped to hours; `[75:30]` is a valid marker since
/// transcripts are assumed short. Negative input clamps to zero (a negative
/// timestamp is a caller bug, and rendering stays total).
pub fn format_timestamp(seconds: f64) -> String {
    let total_seconds = seconds.max(0.0) as u64;
    let minutes = total_seconds / 60;
    let secs = total_seconds % 60;

    format!("{:02}:{:02}", minutes, secs)
}

/// Parse a `MM:SS` timestamp (with or without surrounding brackets) into
/// seconds. Returns None for anything that doesn't match the marker grammar.
pub fn parse_timestamp(timestamp: &str) -> Option<f64> {
    let trimmed = timestamp.trim().trim_start_matches('[').trim_end_matches(']');
    let (minutes, seconds) = trimmed.split_once(':')?;

    let minutes: u64 = minutes.trim().parse().ok()?;
    let seconds_str = seconds.trim();
    if seconds_str.len() != 2 {
        return None;
    }
    let seconds: u64 = seconds_str.parse().ok()?;
    if seconds >= 60 {
        return None;
    }

    Some((minutes * 60 + seconds) as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transcript_creation() {
        let segments = vec![
            TranscriptSegment::new(0.0, 5.0, "Hello world".to_string()),
            TranscriptSegment::new(5.0, 10.0, "This is a test".to_string()),
        ];

        let transcript = Transcript::new(segments);

        assert_eq!(transcript.full_text, "Hello world This is a test");
        assert_eq!(transcript.duration_seconds, 10.0);
        assert!(!transcript.is_empty());
    }

    #[test]
    fn test_empty_transcript() {
        let transcript = Transcript::new(vec![]);
        assert!(transcript.is_empty());
        assert_eq!(transcript.duration_seconds, 0.0);
        assert_eq!(transcript.full_text, "");
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(0.0), "00:00");
        assert_eq!(format_timestamp(65.0), "01:05");
        assert_eq!(format_timestamp(15.0), "00:15");
    }

    #[test]
    fn test_format_timestamp_minutes_exceed_59() {
        // Minutes are never wrapped to hours
        assert_eq!(format_timestamp(3665.0), "61:05");
        assert_eq!(format_timestamp(5999.0), "99:59");
    }

    #[test]
    fn test_format_timestamp_clamps_negative() {
        assert_eq!(format_timestamp(-12.0), "00:00");
    }

    #[test]
    fn test_parse_timestamp() {
        assert_eq!(parse_timestamp("00:00"), Some(0.0));
        assert_eq!(parse_timestamp("01:05"), Some(65.0));
        assert_eq!(parse_timestamp("[12:34]"), Some(754.0));
        assert_eq!(parse_timestamp("99:59"), Some(5999.0));
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        assert_eq!(parse_timestamp("banana"), None);
        assert_eq!(parse_timestamp("12:345"), None);
        assert_eq!(parse_timestamp("12:99"), None);
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("12:3a"), None);
    }

    #[test]
    fn test_timestamp_round_trip() {
        // MM:SS round-trips exactly for all integer seconds under 100 minutes
        for s in (0..6000).step_by(7) {
            let rendered = format_timestamp(s as f64);
            assert_eq!(parse_timestamp(&rendered), Some(s as f64), "s = {}", s);
        }
    }

    #[test]
    fn test_segment_duration() {
        let seg = TranscriptSegment::new(10.0, 13.5, "x".into());
        assert_eq!(seg.duration(), 3.5);
    }
}
