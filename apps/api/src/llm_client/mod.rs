//! LLM Client — the single point of entry for all Gemini API calls.
//!
//! ARCHITECTURAL RULE: No other module may call the Gemini API directly.
//! All generation calls go through the `TextGenerator` trait defined here.
//!
//! Model: gemini-2.5-flash (hardcoded — do not make configurable to prevent drift)
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

pub mod prompts;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
/// The model used for all generation calls.
pub const MODEL: &str = "gemini-2.5-flash";
const JSON_MIME_TYPE: &str = "application/json";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

/// One structured-output call: instruction + input text, constrained to a schema.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub system_instruction: String,
    pub input_text: String,
    pub response_schema: Value,
    pub temperature: f32,
}

/// The generation call boundary. Returns the raw response text, or `None`
/// when the service answered without any text.
///
/// No retries and no timeout: a call runs until the service reports success or failure.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<Option<String>, LlmError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Gemini wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest<'a> {
    system_instruction: GeminiContent<'a>,
    contents: Vec<GeminiContent<'a>>,
    generation_config: GeminiGenerationConfig<'a>,
}

#[derive(Debug, Serialize)]
struct GeminiContent<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig<'a> {
    response_mime_type: &'a str,
    response_schema: &'a Value,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<CandidateContent>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    pub prompt_token_count: Option<u32>,
    pub candidates_token_count: Option<u32>,
}

impl GeminiResponse {
    /// Concatenated text of the first candidate's parts; `None` if there is no text at all.
    pub fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
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

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

/// Wraps the Gemini `generateContent` endpoint with structured JSON output.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().build()?,
            api_key,
        })
    }

    fn endpoint() -> String {
        format!("{GEMINI_API_BASE}/{MODEL}:generateContent")
    }

    /// Makes a raw call to the Gemini API, returning the full response object.
    pub async fn call(&self, request: &GenerationRequest) -> Result<GeminiResponse, LlmError> {
        let body = build_request_body(request);

        let response = self
            .client
            .post(Self::endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<GeminiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let gemini_response: GeminiResponse = response.json().await?;

        if let Some(usage) = &gemini_response.usage_metadata {
            debug!(
                "LLM call succeeded: prompt_tokens={:?}, output_tokens={:?}",
                usage.prompt_token_count, usage.candidates_token_count
            );
        }

        Ok(gemini_response)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<Option<String>, LlmError> {
        let response = self.call(request).await?;
        if let Some(reason) = response
            .candidates
            .first()
            .and_then(|c| c.finish_reason.as_deref())
        {
            debug!("Gemini finish reason: {reason}");
        }
        Ok(response.text())
    }
}

fn build_request_body(request: &GenerationRequest) -> GeminiRequest<'_> {
    GeminiRequest {
        system_instruction: GeminiContent {
            role: None,
            parts: vec![GeminiPart {
                text: &request.system_instruction,
            }],
        },
        contents: vec![GeminiContent {
            role: Some("user"),
            parts: vec![GeminiPart {
                text: &request.input_text,
            }],
        }],
        generation_config: GeminiGenerationConfig {
            response_mime_type: JSON_MIME_TYPE,
            response_schema: &request.response_schema,
            temperature: request.temperature,
        },
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}
