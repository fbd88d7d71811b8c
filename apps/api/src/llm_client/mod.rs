//! LLM Client — the single point of entry for calls to the OpenAI Responses API.
//!
//! ARCHITECTURAL RULE: No other module may talk to the provider directly.
//! The client is deliberately thin: it ships a prepared payload and hands back
//! the raw status and body. Interpreting the body is the response processor's job.
//!
//! Model: gpt-5.2 with low reasoning effort (hardcoded, do not make configurable).

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod prompts;

pub const DEFAULT_RESPONSES_URL: &str = "https://api.openai.com/v1/responses";
/// The model used for every generation call.
pub const MODEL: &str = "gpt-5.2";
pub const REASONING_EFFORT: &str = "low";
/// Content item type carrying the model's final text.
pub const OUTPUT_TEXT_TYPE: &str = "output_text";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API Error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Could not decode the provider response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("No content generated.")]
    EmptyContent,
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponsesRequest {
    pub model: String,
    pub reasoning: Reasoning,
    pub input: Vec<InputMessage>,
    pub max_output_tokens: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reasoning {
    pub effort: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputMessage {
    pub role: String,
    pub content: String,
}

/// The provider's response envelope: output items, each holding content items.
#[derive(Debug, Deserialize)]
pub struct ResponsesEnvelope {
    pub output: Vec<OutputItem>,
}

#[derive(Debug, Deserialize)]
pub struct OutputItem {
    #[serde(default)]
    pub content: Vec<ContentItem>,
}

#[derive(Debug, Deserialize)]
pub struct ContentItem {
    #[serde(rename = "type")]
    pub item_type: String,
    pub text: Option<String>,
}

impl ResponsesEnvelope {
    /// Text of the first `output_text` item in the first output item.
    pub fn output_text(&self) -> Option<&str> {
        self.output
            .first()?
            .content
            .iter()
            .find(|c| c.item_type == OUTPUT_TEXT_TYPE)
            .and_then(|c| c.text.as_deref())
    }
}

/// Status and body exactly as received.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

/// The HTTP client used for all generation calls.
/// No retries and no custom timeout: a call is awaited to completion or failure.
#[derive(Clone)]
pub struct ResponsesClient {
    client: Client,
    endpoint: String,
}

impl ResponsesClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// POSTs the payload and returns the raw response. Only transport-level
    /// failures are errors here; non-2xx statuses come back as `RawResponse`.
    pub async fn send(
        &self,
        api_key: &str,
        request: &ResponsesRequest,
    ) -> Result<RawResponse, LlmError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .header("content-type", "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();

        debug!(
            "Responses API returned status {} ({} bytes, max_output_tokens={})",
            status,
            body.len(),
            request.max_output_tokens
        );

        Ok(RawResponse { status, body })
    }
}
