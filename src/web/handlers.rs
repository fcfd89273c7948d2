use axum::extract::State;
use axum::response::Json;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::forms::{self, RawInputs, ToolKind};
use crate::prompts;

use super::markdown;
use super::routes::AppState;

#[derive(Deserialize)]
pub struct GenerateBody {
    pub tool: ToolKind,
    #[serde(flatten)]
    pub inputs: RawInputs,
}

/// Outcome of one trigger action, as consumed by the page. Either the
/// rendered output is present (`ok: true`) or a user-facing message with its
/// kind ("validation" or "generation") is.
#[derive(Serialize)]
pub struct GenerateResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markdown: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<&'static str>,
}

impl GenerateResponse {
    fn displayed(text: String) -> Self {
        Self {
            ok: true,
            html: Some(markdown::to_html(&text)),
            markdown: Some(text),
            error: None,
            kind: None,
        }
    }

    fn rejected(message: String) -> Self {
        Self {
            ok: false,
            html: None,
            markdown: None,
            error: Some(message),
            kind: Some("validation"),
        }
    }

    fn failed(message: String) -> Self {
        Self {
            ok: false,
            html: None,
            markdown: None,
            error: Some(message),
            kind: Some("generation"),
        }
    }
}

// -- Generate ------------------------------------------------------------

pub async fn generate(
    State(state): State<AppState>,
    Json(body): Json<GenerateBody>,
) -> Json<GenerateResponse> {
    let request = match forms::collect(body.tool, &body.inputs) {
        Ok(r) => r,
        Err(e) => {
            info!(tool = body.tool.label(), "request rejected: {e}");
            return Json(GenerateResponse::rejected(e.message));
        }
    };

    let prompt = prompts::render(&request);
    debug!(
        tool = body.tool.label(),
        prompt_len = prompt.len(),
        "prompt rendered"
    );

    match state.client.generate(&prompt).await {
        Ok(text) => {
            info!(tool = body.tool.label(), "generation complete");
            Json(GenerateResponse::displayed(text))
        }
        Err(e) => {
            error!(tool = body.tool.label(), "generation failed: {e}");
            Json(GenerateResponse::failed(format!(
                "An error occurred while generating the content: {e}"
            )))
        }
    }
}

// -- Health --------------------------------------------------------------

pub async fn healthz() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "ok": true }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::llm::GeminiClient;
    use std::sync::Arc;

    fn test_state() -> AppState {
        // Points at a closed local port; any outbound call would fail fast,
        // which the validation tests below must never trigger.
        let mut config = Config::default();
        config.llm.base_url = "http://127.0.0.1:9".to_string();
        config.llm.timeout_secs = 5;
        let client = Arc::new(GeminiClient::new(&config, "test-key".into()).unwrap());
        AppState { config, client }
    }

    #[test]
    fn body_deserializes_with_flattened_inputs() {
        let json = r#"{
            "tool": "quiz",
            "source_text": "Plants make food from sunlight.",
            "question_count": 4
        }"#;
        let body: GenerateBody = serde_json::from_str(json).unwrap();
        assert_eq!(body.tool, ToolKind::Quiz);
        assert_eq!(body.inputs.source_text, "Plants make food from sunlight.");
        assert_eq!(body.inputs.question_count, Some(4));
    }

    #[test]
    fn success_response_shape() {
        let resp = GenerateResponse::displayed("# Title".into());
        let value = serde_json::to_value(&resp).unwrap();
        assert_eq!(value["ok"], true);
        assert_eq!(value["markdown"], "# Title");
        assert!(value["html"].as_str().unwrap().contains("<h1>"));
        assert!(value.get("error").is_none());
    }

    #[test]
    fn failure_response_shape() {
        let resp = GenerateResponse::failed("boom".into());
        let value = serde_json::to_value(&resp).unwrap();
        assert_eq!(value["ok"], false);
        assert_eq!(value["error"], "boom");
        assert_eq!(value["kind"], "generation");
        assert!(value.get("html").is_none());
    }

    #[tokio::test]
    async fn empty_fields_are_rejected_without_outbound_call() {
        let body = GenerateBody {
            tool: ToolKind::Quiz,
            inputs: RawInputs {
                question_count: Some(3),
                ..Default::default()
            },
        };
        let Json(resp) = generate(State(test_state()), Json(body)).await;
        assert!(!resp.ok);
        assert_eq!(resp.kind, Some("validation"));
        assert!(resp.error.unwrap().contains("fill in all the fields"));
    }

    #[tokio::test]
    async fn failed_generation_is_a_value_not_a_panic() {
        let body = GenerateBody {
            tool: ToolKind::Concept,
            inputs: RawInputs {
                complex_topic: "Photosynthesis".into(),
                target_audience: "a 5th grader".into(),
                ..Default::default()
            },
        };
        let Json(resp) = generate(State(test_state()), Json(body)).await;
        assert!(!resp.ok);
        assert_eq!(resp.kind, Some("generation"));
        assert!(resp
            .error
            .unwrap()
            .contains("An error occurred while generating the content"));
    }
}
