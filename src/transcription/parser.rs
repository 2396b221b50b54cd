//! Raw response parsing.
//!
//! The model is prompted to emit lines of the form `[MM:SS] text`. This
//! module turns that raw text into ordered segments, recovering as much as
//! possible from malformed output. Parsing is total: garbage in yields a
//! partial (possibly empty) segment list, never an error.
//!
//! All knowledge of the marker grammar lives here and in the prompt that
//! requests it (`config::prompts`); the renderers only ever see segments.

use super::models::{parse_timestamp, TranscriptSegment};
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;
use tracing::trace;

/// Duration assumed for the final segment, which has no following marker.
pub const DEFAULT_FALLBACK_SECONDS: f64 = 3.0;

/// Matches a `[MM:SS]` marker. Minutes may run past 59 (never wrapped to
/// hours), seconds are exactly two digits.
fn marker_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\[(\d{1,4}):(\d{2})\]").unwrap())
}

/// Parse raw model output into ordered transcript segments.
///
/// Each recognized marker opens a segment; unmarked lines after a marker are
/// appended to the previous segment (preserving the line break), unmarked
/// lines before the first marker are dropped as model chatter. If the input
/// contains no recognizable marker at all, the whole text becomes a single
/// catch-all segment starting at zero.
///
/// Segments keep their source order even when timestamps go backwards; the
/// inferred end of a segment is the next segment's start, clamped so that
/// `end >= start` always holds. The final segment ends `fallback_seconds`
/// after its start.
pub fn parse_raw_transcript(raw: &str, fallback_seconds: f64) -> Vec<TranscriptSegment> {
    let mut starts: Vec<f64> = Vec::new();
    let mut texts: Vec<String> = Vec::new();
    let mut seen_texts: HashSet<String> = HashSet::new();
    let mut last_text = String::new();
    let mut saw_marker = false;

    for line in raw.lines() {
        let marker = marker_regex().find(line);

        let Some(m) = marker else {
            // Continuation of the previous segment, or pre-marker chatter
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            if let Some(text) = texts.last_mut() {
                text.push('\n');
                text.push_str(trimmed);
            }
            continue;
        };

        let Some(start) = parse_timestamp(m.as_str()) else {
            // Looks like a marker but isn't valid (e.g. [00:99]); treat the
            // line as a continuation
            let trimmed = line.trim();
            if let (Some(text), false) = (texts.last_mut(), trimmed.is_empty()) {
                text.push('\n');
                text.push_str(trimmed);
            }
            continue;
        };
        saw_marker = true;

        let text = line[m.end()..].trim().to_string();
        if !is_meaningful(&text, &seen_texts, &last_text) {
            trace!("Dropping line at {:.0}s: {:?}", start, text);
            continue;
        }

        seen_texts.insert(text.clone());
        last_text = text.clone();
        starts.push(start);
        texts.push(text);
    }

    // No marker anywhere: degrade to a single catch-all segment
    if !saw_marker {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Vec::new();
        }
        return vec![TranscriptSegment::new(
            0.0,
            fallback_seconds.max(0.0),
            trimmed.to_string(),
        )];
    }

    infer_end_times(starts, texts, fallback_seconds)
}

/// Pair each start with an inferred end: the next segment's start, or
/// `fallback_seconds` past its own start for the last one.
fn infer_end_times(
    starts: Vec<f64>,
    texts: Vec<String>,
    fallback_seconds: f64,
) -> Vec<TranscriptSegment> {
    let count = starts.len();
    starts
        .iter()
        .zip(texts)
        .enumerate()
        .map(|(i, (&start, text))| {
            let end = if i + 1 < count {
                // Clamp: a backwards-jumping next marker must not produce
                // end < start
                starts[i + 1].max(start)
            } else {
                start + fallback_seconds.max(0.0)
            };
            TranscriptSegment::new(start, end, text)
        })
        .collect()
}

/// Filter for hallucinated or duplicated lines.
fn is_meaningful(text: &str, seen_texts: &HashSet<String>, last_text: &str) -> bool {
    if text.is_empty() {
        return false;
    }
    if is_repetition_pattern(text) {
        return false;
    }
    // Exact repeats, including consecutive duplicates
    if seen_texts.contains(text) || text == last_text {
        return false;
    }
    true
}

/// Detect degenerate repetition the model produces when it hallucinates.
fn is_repetition_pattern(text: &str) -> bool {
    // Single character repeated (e.g. "아아아아아")
    let chars: Vec<char> = text.chars().filter(|c| !c.is_whitespace()).collect();
    if chars.len() > 2 && chars.iter().all(|&c| c == chars[0]) {
        return true;
    }

    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() > 2 {
        // Single word repeated
        if words.iter().all(|&w| w == words[0]) {
            return true;
        }

        // Repeating word pairs ("over and over and over and")
        if words.len() > 4 {
            let pairs: Vec<(&str, &str)> =
                words.windows(2).map(|w| (w[0], w[1])).collect();
            let first = pairs[0];
            if pairs.iter().all(|&p| p == first) {
                return true;
            }
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> Vec<TranscriptSegment> {
        parse_raw_transcript(raw, DEFAULT_FALLBACK_SECONDS)
    }

    #[test]
    fn test_basic_parse() {
        let segments = parse("[00:00] Hello\n[00:15] World");

        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].start_seconds, 0.0);
        assert_eq!(segments[0].end_seconds, 15.0);
        assert_eq!(segments[0].text, "Hello");
        assert_eq!(segments[1].start_seconds, 15.0);
        assert_eq!(segments[1].end_seconds, 18.0);
        assert_eq!(segments[1].text, "World");
    }

    #[test]
    fn test_empty_input() {
        assert!(parse("").is_empty());
        assert!(parse("   \n\n  ").is_empty());
    }

    #[test]
    fn test_no_markers_yields_catch_all() {
        let segments = parse("The model ignored the format entirely.");

        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].start_seconds, 0.0);
        assert_eq!(segments[0].text, "The model ignored the format entirely.");
    }

    #[test]
    fn test_continuation_lines_appended() {
        let segments = parse("[00:10] First line\nsecond line\n[00:20] Next");

        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].text, "First line\nsecond line");
        assert_eq!(segments[1].text, "Next");
    }

    #[test]
    fn test_preamble_dropped() {
        let segments = parse("Here is the transcript:\n[00:05] Actual speech");

        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].text, "Actual speech");
        assert_eq!(segments[0].start_seconds, 5.0);
    }

    #[test]
    fn test_minutes_past_59() {
        let segments = parse("[75:30] Late in a long recording");
        assert_eq!(segments[0].start_seconds, 75.0 * 60.0 + 30.0);
    }

    #[test]
    fn test_invalid_seconds_field_not_a_marker() {
        // [00:99] fails the grammar; with no valid marker anywhere the
        // input degrades to a catch-all
        let segments = parse("[00:99] something");
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].start_seconds, 0.0);
    }

    #[test]
    fn test_non_monotonic_order_preserved() {
        let segments = parse("[00:30] Second\n[00:10] First");

        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].start_seconds, 30.0);
        assert_eq!(segments[1].start_seconds, 10.0);
        // End never goes below start, even when the next marker jumps back
        assert_eq!(segments[0].end_seconds, 30.0);
    }

    #[test]
    fn test_consecutive_duplicates_dropped() {
        let segments = parse("[00:00] Hello\n[00:03] Hello\n[00:06] World");

        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].text, "Hello");
        assert_eq!(segments[1].text, "World");
    }

    #[test]
    fn test_repeated_text_dropped_later() {
        let segments = parse("[00:00] Intro\n[00:05] Middle\n[00:10] Intro");
        assert_eq!(segments.len(), 2);
    }

    #[test]
    fn test_repetition_patterns_filtered() {
        assert!(is_repetition_pattern("aaaaaa"));
        assert!(is_repetition_pattern("아아아아아"));
        assert!(is_repetition_pattern("buy buy buy"));
        assert!(is_repetition_pattern("la di la di la di"));
        assert!(!is_repetition_pattern("normal spoken sentence"));
        assert!(!is_repetition_pattern("no no that's wrong"));
    }

    #[test]
    fn test_hallucinated_lines_skipped() {
        let segments = parse("[00:00] Real content\n[00:03] ㅋㅋㅋㅋㅋ\n[00:06] More content");

        assert_eq!(segments.len(), 2);
        assert_eq!(segments[1].text, "More content");
        // End inference works over the surviving segments
        assert_eq!(segments[0].end_seconds, 6.0);
    }

    #[test]
    fn test_marker_mid_line() {
        let segments = parse("noise [01:00] Speech here");
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].start_seconds, 60.0);
        assert_eq!(segments[0].text, "Speech here");
    }

    #[test]
    fn test_never_panics_on_garbage() {
        for garbage in ["[", "]", "[:]", "[1:2]", "\u{0}\u{0}", "[00:00]", "::::"] {
            let _ = parse(garbage);
        }
    }

    #[test]
    fn test_zero_fallback_clamped() {
        let segments = parse_raw_transcript("[00:10] End", -5.0);
        assert_eq!(segments[0].end_seconds, 10.0);
    }
}
