//! Configuration settings for Skrift.

use crate::transcription::DEFAULT_FALLBACK_SECONDS;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub transcription: TranscriptionSettings,
    pub gemini: GeminiSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Directory where transcript files are written.
    pub output_dir: String,
    /// Directory for temporary files (audio chunks).
    pub temp_dir: String,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            output_dir: "./output".to_string(),
            temp_dir: "/tmp/skrift".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Transcription pipeline settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptionSettings {
    /// Duration in seconds for splitting long audio files.
    pub chunk_duration_seconds: u32,
    /// Assumed duration of the final segment when the model supplies no end.
    pub fallback_segment_seconds: f64,
    /// Maximum audio duration to process (in seconds). Zero disables the
    /// limit.
    pub max_duration_seconds: u32,
}

impl Default for TranscriptionSettings {
    fn default() -> Self {
        Self {
            chunk_duration_seconds: 300,
            fallback_segment_seconds: DEFAULT_FALLBACK_SECONDS,
            max_duration_seconds: 14400, // 4 hours
        }
    }
}

/// Gemini API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiSettings {
    /// Model to use for transcription.
    pub model: String,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
    /// Sampling temperature. Low values keep timestamped output consistent.
    pub temperature: f64,
    /// Nucleus sampling parameter.
    pub top_p: f64,
    /// Top-k sampling parameter.
    pub top_k: u32,
    /// Maximum output tokens per chunk.
    pub max_output_tokens: u32,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            model: "gemini-2.0-flash".to_string(),
            timeout_seconds: 300,
            temperature: 0.2,
            top_p: 0.95,
            top_k: 40,
            max_output_tokens: 8192,
        }
    }
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to the default configuration file.
    pub fn save(&self) -> crate::error::Result<()> {
        self.save_to(&Self::default_config_path())
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::SkriftError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("skrift")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded output directory path.
    pub fn output_dir(&self) -> PathBuf {
        Self::expand_path(&self.general.output_dir)
    }

    /// Get the expanded temp directory path.
    pub fn temp_dir(&self) -> PathBuf {
        Self::expand_path(&self.general.temp_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.gemini.model, "gemini-2.0-flash");
        assert_eq!(settings.transcription.chunk_duration_seconds, 300);
        assert_eq!(settings.general.log_level, "info");
    }

    #[test]
    fn test_toml_roundtrip() {
        let settings = Settings::default();
        let toml_str = toml::to_string_pretty(&settings).unwrap();
        let parsed: Settings = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.gemini.model, settings.gemini.model);
        assert_eq!(
            parsed.transcription.fallback_segment_seconds,
            settings.transcription.fallback_segment_seconds
        );
    }

    #[test]
    fn test_fallback_default_matches_parser() {
        assert_eq!(
            TranscriptionSettings::default().fallback_segment_seconds,
            DEFAULT_FALLBACK_SECONDS
        );
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let parsed: Settings = toml::from_str("[gemini]\nmodel = \"gemini-1.5-pro\"\n").unwrap();
        assert_eq!(parsed.gemini.model, "gemini-1.5-pro");
        assert_eq!(parsed.transcription.chunk_duration_seconds, 300);
    }
}
