//! Pre-flight checks before expensive operations.
//!
//! Validates that required tools and configuration are available
//! before starting operations that would otherwise fail midway.

use crate::error::{Result, SkriftError};
use crate::gemini::API_KEY_VAR;
use std::process::Command;

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Transcription requires ffmpeg tooling and an API key.
    Transcribe,
}

/// Run pre-flight checks for the given operation.
///
/// Returns Ok(()) if all checks pass, or an error describing what's missing.
pub fn check(operation: Operation) -> Result<()> {
    match operation {
        Operation::Transcribe => {
            check_api_key()?;
            check_tool("ffmpeg")?;
            check_tool("ffprobe")?;
        }
    }
    Ok(())
}

/// Check if the Gemini API key is configured.
pub fn check_api_key() -> Result<()> {
    match std::env::var(API_KEY_VAR) {
        Ok(key) if !key.is_empty() => Ok(()),
        Ok(_) => Err(SkriftError::Config(format!(
            "{} is empty. Set it with: export {}='...'",
            API_KEY_VAR, API_KEY_VAR
        ))),
        Err(_) => Err(SkriftError::Config(format!(
            "{} not set. Set it with: export {}='...'",
            API_KEY_VAR, API_KEY_VAR
        ))),
    }
}

/// Check if an external tool is available.
pub fn check_tool(name: &str) -> Result<()> {
    // ffmpeg/ffprobe use -version (single dash)
    let version_arg = match name {
        "ffmpeg" | "ffprobe" => "-version",
        _ => "--version",
    };
    match Command::new(name).arg(version_arg).output() {
        Ok(output) if output.status.success() => Ok(()),
        Ok(_) => Err(SkriftError::ToolNotFound(format!(
            "{} is installed but not working correctly",
            name
        ))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(SkriftError::ToolNotFound(name.to_string()))
        }
        Err(e) => Err(SkriftError::ToolNotFound(format!("{}: {}", name, e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_missing_tool() {
        assert!(check_tool("definitely-not-a-real-tool-name").is_err());
    }
}
