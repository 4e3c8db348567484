//! Axum route handler for the generation endpoint.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppError;
use crate::prompt::{build_prompt, ResumeForm};
use crate::render::{render_sections, RenderedSection};
use crate::segmenter::segment;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerateRequest {
    /// Ready-made prompt. Takes precedence over `form_data` when non-blank.
    pub prompt: Option<String>,
    /// Intake form; used to synthesize a prompt when `prompt` is absent.
    pub form_data: Option<ResumeForm>,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    /// Plain text extracted from the upstream response (empty if the model
    /// returned no text part).
    pub text: String,
    /// Display-ready sections segmented out of `text`.
    pub sections: Vec<RenderedSection>,
    /// Raw upstream response body, passed through for client-side debugging.
    pub raw: Value,
}

/// POST /api/generate
///
/// Forwards the prompt to Gemini and returns the generated resume text along
/// with its segmented, display-ready sections.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    let prompt = resolve_prompt(&request)?;

    let reply = state
        .llm
        .call(&prompt)
        .await
        .map_err(|e| AppError::Llm(e.to_string()))?;

    let text = reply.text.unwrap_or_default();
    let sections = render_sections(&segment(&text));

    Ok(Json(GenerateResponse {
        text,
        sections,
        raw: reply.raw,
    }))
}

/// Picks the explicit prompt when non-blank, otherwise synthesizes one from
/// the form data. Neither present is a validation error.
fn resolve_prompt(request: &GenerateRequest) -> Result<String, AppError> {
    if let Some(prompt) = &request.prompt {
        if !prompt.trim().is_empty() {
            return Ok(prompt.clone());
        }
    }

    if let Some(form) = &request.form_data {
        return Ok(build_prompt(form));
    }

    Err(AppError::Validation("Missing prompt".to_string()))
}
