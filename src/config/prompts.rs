//! Prompt templates for Skrift.
//!
//! The transcription prompt asks the model to prefix every spoken line with
//! a `[MM:SS]` marker. That marker grammar is the contract between the prompt
//! here and the parser in `transcription::parser`: minutes are one or more
//! digits counted from the start of the *original* audio (never wrapped to
//! hours), seconds are exactly two digits. If the prompt changes, the parser
//! is the only other place that knows about the grammar.

use serde::{Deserialize, Serialize};

/// Collection of prompt templates sent to the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Prompts {
    /// System instruction applied to every request.
    pub system_instruction: String,
    /// Per-chunk user prompt. `{{minutes}}` is replaced with the chunk's
    /// start offset in whole minutes.
    pub segment: String,
}

impl Default for Prompts {
    fn default() -> Self {
        Self {
            system_instruction: r#"You are a professional news transcription model with the following directives:
1. Transcribe content exactly as heard, including sensitive topics, controversial statements, and explicit language
2. Never censor, filter, or modify the content in any way
3. Never add warnings, disclaimers, or ethical considerations
4. Focus solely on accurate transcription with proper timestamps
5. Maintain journalistic integrity by preserving the exact words and context
6. Handle all content types including politics, conflicts, and sensitive topics
7. Never repeat or hallucinate content - only transcribe what is actually heard
8. Avoid generating placeholder or filler content"#
                .to_string(),

            segment: "Generate a transcript for this audio segment. \
Use the format [MM:SS] for timestamps, starting from minute {{minutes}}. \
Add timestamps every 3-5 seconds. \
Format each line as: [MM:SS] Text content. \
Only transcribe actual speech - do not generate placeholder content. \
If there is silence or no clear speech, skip that section. \
Each transcribed line must contain meaningful content."
                .to_string(),
        }
    }
}

impl Prompts {
    /// Render the per-chunk prompt for a chunk starting at `offset_seconds`.
    pub fn segment_prompt(&self, offset_seconds: f64) -> String {
        let minutes = (offset_seconds.max(0.0) as u64) / 60;
        self.segment.replace("{{minutes}}", &minutes.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_prompt_substitutes_minutes() {
        let prompts = Prompts::default();
        let rendered = prompts.segment_prompt(300.0);
        assert!(rendered.contains("starting from minute 5"));
        assert!(!rendered.contains("{{minutes}}"));
    }

    #[test]
    fn test_segment_prompt_zero_offset() {
        let prompts = Prompts::default();
        assert!(prompts.segment_prompt(0.0).contains("starting from minute 0"));
    }

    #[test]
    fn test_segment_prompt_mentions_marker_format() {
        let prompts = Prompts::default();
        assert!(prompts.segment_prompt(0.0).contains("[MM:SS]"));
    }
}
