//! Completion oracle — the single point of entry for all text-completion
//! calls in the screening pipeline.
//!
//! ARCHITECTURAL RULE: no other module may talk to the completions API
//! directly. Handlers and the pipeline see only `dyn CompletionOracle`, so
//! tests run against deterministic fakes.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
/// The model used for all oracle calls.
/// Intentionally hardcoded to prevent accidental drift.
pub const MODEL: &str = "gpt-3.5-turbo";
/// Upper bound on any single oracle call. Expiry is reported as an ordinary
/// oracle error and isolated to the item that made the call.
const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum OracleError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Oracle returned no usable completion")]
    EmptyCompletion,
}

/// A single-turn completion request. `system` is optional; sampling
/// parameters are fixed by the caller per §4 contracts.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub system: Option<&'static str>,
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Injected capability for single-turn text completion.
#[async_trait]
pub trait CompletionOracle: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<String, OracleError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
    n: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Production oracle backed by the OpenAI chat-completions API.
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    api_key: String,
}

impl OpenAiClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }
}

#[async_trait]
impl CompletionOracle for OpenAiClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String, OracleError> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = request.system {
            messages.push(ChatMessage {
                role: "system",
                content: system,
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: &request.prompt,
        });

        let body = ChatRequest {
            model: MODEL,
            messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            n: 1,
        };

        let response = self
            .client
            .post(OPENAI_API_URL)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiError>(&text)
                .map(|e| e.error.message)
                .unwrap_or(text);
            return Err(OracleError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ChatResponse = response.json().await?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(OracleError::EmptyCompletion)?;

        debug!("Oracle completion received ({} chars)", content.len());
        Ok(content)
    }
}
