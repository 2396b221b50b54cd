//! Transcribe command implementation.

use crate::cli::output::preview;
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::transcription::{
    format_transcript, FlashTranscriber, OutputFormat, Transcriber, Transcript,
};
use anyhow::Result;
use std::path::{Path, PathBuf};

/// Which formats a run should write.
enum FormatSelection {
    One(OutputFormat),
    Both,
}

impl FormatSelection {
    fn parse(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("both") {
            return Ok(FormatSelection::Both);
        }
        let format: OutputFormat = s.parse().map_err(|e: String| anyhow::anyhow!(e))?;
        Ok(FormatSelection::One(format))
    }

    fn formats(&self) -> Vec<OutputFormat> {
        match self {
            FormatSelection::One(f) => vec![*f],
            FormatSelection::Both => vec![OutputFormat::Txt, OutputFormat::Srt],
        }
    }
}

/// Run the transcribe command.
pub async fn run_transcribe(
    input: &str,
    output_dir: Option<String>,
    format: &str,
    full: bool,
    settings: Settings,
) -> Result<()> {
    let selection = FormatSelection::parse(format)?;

    // Pre-flight checks
    if let Err(e) = preflight::check(Operation::Transcribe) {
        Output::error(&format!("{}", e));
        Output::info("Run 'skrift doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let input_path = Path::new(input);
    if !input_path.is_file() {
        Output::error(&format!("Audio file not found: {}", input));
        return Err(anyhow::anyhow!("File not found: {}", input));
    }

    let out_dir = match output_dir {
        Some(dir) => Settings::expand_path(&dir),
        None => settings.output_dir(),
    };
    std::fs::create_dir_all(&out_dir)?;

    Output::info(&format!("Transcribing: {}", input));

    let transcriber = FlashTranscriber::from_settings(&settings)?;

    let spinner = Output::spinner("Waiting for the model...");
    let result = transcriber.transcribe(input_path).await;
    spinner.finish_and_clear();

    let transcript = match result {
        Ok(t) => t,
        Err(e) => {
            Output::error(&format!("Transcription failed: {}", e));
            return Err(e.into());
        }
    };

    if transcript.is_empty() {
        Output::warning("No speech was recognized in this file.");
        return Ok(());
    }

    let written = write_outputs(&transcript, &selection, &out_dir)?;
    for path in &written {
        Output::success(&format!("Wrote {}", path.display()));
    }

    // Preview uses the plain text rendering regardless of what was written
    let txt = format_transcript(&transcript, OutputFormat::Txt);
    Output::header("Transcript");
    if full {
        println!("{}", txt.trim_end());
    } else {
        println!("{}", preview(&txt, 10));
    }

    Output::info(&format!(
        "{} segments, {:.0}s of audio",
        transcript.segments.len(),
        transcript.duration_seconds
    ));

    Ok(())
}

/// Render and write the selected formats with a shared timestamped basename.
fn write_outputs(
    transcript: &Transcript,
    selection: &FormatSelection,
    out_dir: &Path,
) -> Result<Vec<PathBuf>> {
    let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let mut written = Vec::new();

    for format in selection.formats() {
        let path = out_dir.join(format!("transcript_{}.{}", stamp, format.extension()));
        std::fs::write(&path, format_transcript(transcript, format))?;
        written.push(path);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcription::TranscriptSegment;

    #[test]
    fn test_format_selection() {
        assert_eq!(
            FormatSelection::parse("txt").unwrap().formats(),
            vec![OutputFormat::Txt]
        );
        assert_eq!(
            FormatSelection::parse("both").unwrap().formats(),
            vec![OutputFormat::Txt, OutputFormat::Srt]
        );
        assert!(FormatSelection::parse("docx").is_err());
    }

    #[test]
    fn test_write_outputs_both_formats() {
        let dir = tempfile::tempdir().unwrap();
        let transcript = Transcript::new(vec![TranscriptSegment::new(0.0, 2.0, "Hi".into())]);

        let written = write_outputs(&transcript, &FormatSelection::Both, dir.path()).unwrap();

        assert_eq!(written.len(), 2);
        assert!(written[0].extension().unwrap() == "txt");
        assert!(written[1].extension().unwrap() == "srt");
        let srt = std::fs::read_to_string(&written[1]).unwrap();
        assert!(srt.starts_with("1\n00:00:00,000 --> 00:00:02,000"));
    }
}
