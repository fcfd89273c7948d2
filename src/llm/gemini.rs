use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{Result, TeachkitError};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Client for the Google Gemini `generateContent` REST API.
///
/// Built once at startup from config plus the API key resolved from the
/// environment, then shared read-only across requests. One outbound call per
/// trigger action; no retries, no streaming.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    max_output_tokens: usize,
    temperature: f32,
}

// -- Gemini request/response types ---

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: usize,
    temperature: f32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: Option<ErrorBody>,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl GeminiClient {
    pub fn new(config: &Config, api_key: String) -> Result<Self> {
        let base_url = std::env::var("GEMINI_BASE_URL")
            .ok()
            .or_else(|| {
                if config.llm.base_url.is_empty() {
                    None
                } else {
                    Some(config.llm.base_url.clone())
                }
            })
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let model = std::env::var("GEMINI_MODEL")
            .ok()
            .unwrap_or_else(|| config.llm.model.clone());

        let timeout_secs = config.llm.timeout_secs;

        let mut builder = Client::builder();
        if timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(timeout_secs));
        }
        let client = builder
            .build()
            .map_err(|e| TeachkitError::Config(format!("failed to create HTTP client: {e}")))?;

        info!(
            model = %model,
            base_url = %base_url,
            max_output_tokens = config.llm.max_output_tokens,
            temperature = config.llm.temperature,
            timeout_secs,
            "Gemini client initialized"
        );

        Ok(Self {
            client,
            api_key,
            base_url,
            model,
            max_output_tokens: config.llm.max_output_tokens,
            temperature: config.llm.temperature,
        })
    }

    /// Send a prompt to Gemini and return the generated markdown text.
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);

        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                max_output_tokens: self.max_output_tokens,
                temperature: self.temperature,
            },
        };

        debug!(
            model = %self.model,
            prompt_len = prompt.len(),
            "invoking Gemini API"
        );

        let resp = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| TeachkitError::Generation(format!("Gemini request failed: {e}")))?;

        let status = resp.status();

        if !status.is_success() {
            let error_text = resp.text().await.unwrap_or_default();
            let error_msg = if let Ok(err_resp) = serde_json::from_str::<ErrorResponse>(&error_text)
            {
                err_resp
                    .error
                    .map(|e| e.message)
                    .unwrap_or_else(|| error_text.clone())
            } else {
                error_text
            };

            warn!(
                status = %status,
                error = %error_msg,
                "Gemini API error"
            );

            return Err(TeachkitError::Generation(format!(
                "Gemini API returned {status}: {error_msg}"
            )));
        }

        let gen_resp: GenerateResponse = resp.json().await.map_err(|e| {
            TeachkitError::Generation(format!("failed to parse Gemini response: {e}"))
        })?;

        let response = gen_resp
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| {
                c.parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default()
            .trim()
            .to_string();

        info!(response_len = response.len(), "Gemini response received");

        if response.is_empty() {
            return Err(TeachkitError::Generation(
                "Gemini returned empty response".into(),
            ));
        }

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> GeminiClient {
        let mut config = Config::default();
        config.llm.base_url = base_url.to_string();
        config.llm.timeout_secs = 5;
        GeminiClient::new(&config, "test-key".into()).unwrap()
    }

    #[test]
    fn request_body_matches_wire_format() {
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: "hello".into(),
                }],
            }],
            generation_config: GenerationConfig {
                max_output_tokens: 2048,
                temperature: 0.7,
            },
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(value["generationConfig"]["maxOutputTokens"], 2048);
    }

    #[test]
    fn response_text_parses() {
        let json = r###"{
            "candidates": [
                {"content": {"parts": [{"text": "## Lesson Plan\n"}, {"text": "Body"}], "role": "model"}}
            ]
        }"###;
        let resp: GenerateResponse = serde_json::from_str(json).unwrap();
        let text: String = resp.candidates[0]
            .content
            .as_ref()
            .unwrap()
            .parts
            .iter()
            .map(|p| p.text.clone())
            .collect();
        assert_eq!(text, "## Lesson Plan\nBody");
    }

    #[test]
    fn error_body_parses() {
        let json = r#"{"error": {"code": 400, "message": "API key not valid", "status": "INVALID_ARGUMENT"}}"#;
        let resp: ErrorResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.error.unwrap().message, "API key not valid");
    }

    #[tokio::test]
    async fn transport_error_becomes_generation_error() {
        // Nothing listens on this port; the connection is refused immediately.
        let client = test_client("http://127.0.0.1:9");
        let err = client.generate("hello").await.unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Gemini request failed"), "{msg}");
    }
}
