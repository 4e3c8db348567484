/// Gemini client — the single point of entry for all generative-API calls.
///
/// ARCHITECTURAL RULE: No other module may call the Gemini API directly.
/// All upstream interactions MUST go through this module.
///
/// Model: gemini-2.0-flash (hardcoded — do not make configurable to prevent drift)
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
/// The model used for all generation calls.
pub const MODEL: &str = "gemini-2.0-flash";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

// Response-side types are tolerant: every field is optional because the
// upstream shape varies (safety blocks, empty candidates, missing parts).
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    prompt_token_count: Option<u32>,
    candidates_token_count: Option<u32>,
}

impl GenerateContentResponse {
    /// Extracts the first text part of the first candidate, if any.
    fn text(&self) -> Option<String> {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .and_then(|content| content.parts.iter().find_map(|p| p.text.clone()))
    }
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

/// Result of a generation call: the extracted text plus the raw response
/// body, which is passed through to the client for debugging.
#[derive(Debug)]
pub struct GeminiReply {
    pub text: Option<String>,
    pub raw: Value,
}

/// The single Gemini client used by all route handlers.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }

    /// Makes a single generateContent call. No retries: a failed round trip
    /// surfaces directly to the handler.
    pub async fn call(&self, prompt: &str) -> Result<GeminiReply, LlmError> {
        let request_body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let url = format!("{GEMINI_API_BASE}/{MODEL}:generateContent");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Try to parse the structured error message
            let message = serde_json::from_str::<GeminiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let raw: Value = response.json().await?;

        // Extraction failures are not errors: callers get `text: None` plus
        // the raw body, mirroring the tolerant passthrough contract.
        let parsed: GenerateContentResponse =
            serde_json::from_value(raw.clone()).unwrap_or_default();

        if let Some(usage) = &parsed.usage_metadata {
            debug!(
                "Gemini call succeeded: prompt_tokens={:?}, candidate_tokens={:?}",
                usage.prompt_token_count, usage.candidates_token_count
            );
        }

        Ok(GeminiReply {
            text: parsed.text(),
            raw,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_extraction_from_candidate_parts() {
        let body = json!({
            "candidates": [{
                "content": {
                    "parts": [{"text": "EXPERIENCE:\n- Built a thing"}],
                    "role": "model"
                },
                "finishReason": "STOP"
            }],
            "usageMetadata": {"promptTokenCount": 12, "candidatesTokenCount": 34}
        });
        let parsed: GenerateContentResponse = serde_json::from_value(body).unwrap();
        assert_eq!(
            parsed.text().as_deref(),
            Some("EXPERIENCE:\n- Built a thing")
        );
        assert_eq!(parsed.usage_metadata.unwrap().prompt_token_count, Some(12));
    }

    #[test]
    fn test_text_extraction_skips_textless_parts() {
        let body = json!({
            "candidates": [{
                "content": {"parts": [{"inlineData": {}}, {"text": "fallback"}]}
            }]
        });
        let parsed: GenerateContentResponse = serde_json::from_value(body).unwrap();
        assert_eq!(parsed.text().as_deref(), Some("fallback"));
    }

    #[test]
    fn test_empty_candidates_yield_no_text() {
        let parsed: GenerateContentResponse =
            serde_json::from_value(json!({"candidates": []})).unwrap();
        assert_eq!(parsed.text(), None);

        // A blocked response has no candidates field at all.
        let parsed: GenerateContentResponse =
            serde_json::from_value(json!({"promptFeedback": {"blockReason": "SAFETY"}})).unwrap();
        assert_eq!(parsed.text(), None);
    }

    #[test]
    fn test_error_body_message_parses() {
        let body = r#"{"error": {"code": 400, "message": "API key not valid", "status": "INVALID_ARGUMENT"}}"#;
        let err: GeminiError = serde_json::from_str(body).unwrap();
        assert_eq!(err.error.message, "API key not valid");
    }
}
