//! Gemini API client.
//!
//! Thin wrapper around the `generateContent` endpoint, used to send an audio
//! chunk plus a transcription prompt and get raw timestamped text back.

use crate::error::{Result, SkriftError};
use base64::Engine;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Environment variable holding the API key.
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";

/// Tunable generation parameters for a request.
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    pub temperature: f64,
    pub top_p: f64,
    pub top_k: u32,
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.2,
            top_p: 0.95,
            top_k: 40,
            max_output_tokens: 8192,
        }
    }
}

/// Client for the Gemini generateContent endpoint.
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    generation: GenerationConfig,
}

// -- Response types --

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: GeminiResponseContent,
}

#[derive(Debug, Deserialize)]
struct GeminiResponseContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponsePart {
    text: Option<String>,
}

impl GeminiClient {
    /// Create a client reading the API key from the environment.
    pub fn from_env(model: &str, timeout: Duration, generation: GenerationConfig) -> Result<Self> {
        let api_key = std::env::var(API_KEY_VAR).map_err(|_| {
            SkriftError::Config(format!(
                "{} not set. Set it with: export {}='...'",
                API_KEY_VAR, API_KEY_VAR
            ))
        })?;
        Self::new(&api_key, model, timeout, generation)
    }

    /// Create a client with an explicit API key.
    pub fn new(
        api_key: &str,
        model: &str,
        timeout: Duration,
        generation: GenerationConfig,
    ) -> Result<Self> {
        if api_key.trim().is_empty() {
            return Err(SkriftError::Config("Gemini API key is empty".into()));
        }

        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            model: model.to_string(),
            generation,
        })
    }

    /// Build the JSON request body for an audio transcription call.
    ///
    /// The audio travels inline as base64; safety categories are set to
    /// BLOCK_NONE so news content is transcribed rather than refused.
    pub fn build_request_body(
        &self,
        system_instruction: &str,
        prompt: &str,
        audio: &[u8],
        mime_type: &str,
    ) -> serde_json::Value {
        let encoded = base64::engine::general_purpose::STANDARD.encode(audio);

        serde_json::json!({
            "system_instruction": {
                "parts": [{"text": system_instruction}]
            },
            "contents": [{
                "parts": [
                    {"inline_data": {"mime_type": mime_type, "data": encoded}},
                    {"text": prompt}
                ]
            }],
            "generationConfig": {
                "temperature": self.generation.temperature,
                "topP": self.generation.top_p,
                "topK": self.generation.top_k,
                "maxOutputTokens": self.generation.max_output_tokens
            },
            "safetySettings": [
                {"category": "HARM_CATEGORY_HARASSMENT", "threshold": "BLOCK_NONE"},
                {"category": "HARM_CATEGORY_HATE_SPEECH", "threshold": "BLOCK_NONE"},
                {"category": "HARM_CATEGORY_SEXUALLY_EXPLICIT", "threshold": "BLOCK_NONE"},
                {"category": "HARM_CATEGORY_DANGEROUS_CONTENT", "threshold": "BLOCK_NONE"}
            ]
        })
    }

    /// Send an audio chunk with a prompt and return the model's raw text.
    pub async fn generate_transcript(
        &self,
        system_instruction: &str,
        prompt: &str,
        audio: &[u8],
        mime_type: &str,
    ) -> Result<String> {
        let url = format!("{}/{}:generateContent", GEMINI_ENDPOINT, self.model);
        let body = self.build_request_body(system_instruction, prompt, audio, mime_type);

        debug!("Gemini request: {} bytes of {}", audio.len(), mime_type);

        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .header(
                "x-goog-api-key",
                HeaderValue::from_str(&self.api_key)
                    .map_err(|e| SkriftError::Config(format!("Invalid API key header: {}", e)))?,
            )
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            let truncated: String = error_body.chars().take(200).collect();
            return Err(SkriftError::Gemini(format!("{}: {}", status, truncated)));
        }

        let parsed: GeminiResponse = response
            .json()
            .await
            .map_err(|e| SkriftError::Gemini(format!("Unreadable response: {}", e)))?;

        extract_text(&parsed)
            .ok_or_else(|| SkriftError::Gemini("Response contained no text".into()))
    }
}

/// Pull the first candidate's text parts out of a response.
fn extract_text(response: &GeminiResponse) -> Option<String> {
    let candidate = response.candidates.first()?;
    let text: Vec<&str> = candidate
        .content
        .parts
        .iter()
        .filter_map(|p| p.text.as_deref())
        .collect();

    if text.is_empty() {
        None
    } else {
        Some(text.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> GeminiClient {
        GeminiClient::new(
            "test-key",
            "gemini-2.0-flash",
            Duration::from_secs(5),
            GenerationConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_empty_api_key_rejected() {
        let result = GeminiClient::new(
            "  ",
            "gemini-2.0-flash",
            Duration::from_secs(5),
            GenerationConfig::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_request_body_shape() {
        let client = test_client();
        let body = client.build_request_body("sys", "transcribe this", b"abc", "audio/mpeg");

        assert_eq!(body["system_instruction"]["parts"][0]["text"], "sys");
        assert_eq!(
            body["contents"][0]["parts"][0]["inline_data"]["mime_type"],
            "audio/mpeg"
        );
        assert_eq!(body["contents"][0]["parts"][1]["text"], "transcribe this");
        assert_eq!(body["generationConfig"]["temperature"], 0.2);
        assert_eq!(body["safetySettings"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn test_request_body_encodes_audio() {
        let client = test_client();
        let body = client.build_request_body("s", "p", b"abc", "audio/wav");
        // "abc" in standard base64
        assert_eq!(
            body["contents"][0]["parts"][0]["inline_data"]["data"],
            "YWJj"
        );
    }

    #[test]
    fn test_extract_text_joins_parts() {
        let response: GeminiResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{
                "content": {"parts": [{"text": "[00:00] Hello"}, {"text": "[00:05] World"}]}
            }]
        }))
        .unwrap();

        assert_eq!(
            extract_text(&response).unwrap(),
            "[00:00] Hello\n[00:05] World"
        );
    }

    #[test]
    fn test_extract_text_empty_response() {
        let response: GeminiResponse = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(extract_text(&response).is_none());
    }
}
