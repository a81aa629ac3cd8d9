use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Error, Result};

pub mod classifier;
pub mod summarizer;

pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Message role in a chat-completion conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }
}

// OpenAI-compatible wire envelopes
#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChatMessage,
}

/// Client for an OpenAI-compatible chat-completion HTTP API.
///
/// Each call is a single stateless round-trip: no retries, no streaming,
/// no cross-call state beyond the shared connection pool.
#[derive(Debug)]
pub struct LlmClient {
    api_url: String,
    api_key: String,
    model: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl LlmClient {
    pub fn new(
        api_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            api_url: api_url.into(),
            api_key: api_key.into(),
            model: model.into(),
            timeout: DEFAULT_TIMEOUT,
            client: reqwest::Client::new(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build a client from configuration, resolving the API key from the
    /// environment variable named in `api_key_env`.
    pub fn from_config(cfg: &common::LlmConfig) -> Result<Self> {
        let key_env = cfg.api_key_env.as_deref().unwrap_or("OPENAI_API_KEY");
        let api_key = std::env::var(key_env)
            .map_err(|_| Error::Config(format!("environment variable {} is not set", key_env)))?;

        let mut client = Self::new(
            cfg.api_url.as_deref().unwrap_or(DEFAULT_API_URL),
            api_key,
            cfg.model.as_deref().unwrap_or(DEFAULT_MODEL),
        );
        if let Some(secs) = cfg.timeout_seconds {
            client = client.with_timeout(Duration::from_secs(secs));
        }
        Ok(client)
    }

    /// Send a system prompt + user turn and return the first choice's content.
    ///
    /// The request always asks for `json_object` response format; callers
    /// parse the returned content into their expected shape.
    pub(crate) async fn chat_json(&self, system_prompt: &str, user_content: String) -> Result<String> {
        let req_body = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::system(system_prompt),
                ChatMessage::user(user_content),
            ],
            response_format: ResponseFormat { format_type: "json_object" },
        };

        let response = tokio::time::timeout(
            self.timeout,
            self.client
                .post(&self.api_url)
                .header("Authorization", format!("Bearer {}", self.api_key))
                .header("Content-Type", "application/json")
                .json(&req_body)
                .send(),
        )
        .await
        .map_err(|_| Error::Timeout(self.timeout))??;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(Error::Upstream { status, message });
        }

        let body = response.text().await?;
        let resp_body: ChatResponse = serde_json::from_str(&body)
            .map_err(|e| Error::malformed("failed to parse chat-completion response", e))?;

        let choice = resp_body
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| Error::MalformedResponse("chat-completion response has no choices".into()))?;

        info!(model = %self.model, "chat completion returned {} chars", choice.message.content.len());
        Ok(choice.message.content)
    }
}

/// Helper to extract JSON from text that might contain markdown backticks or preamble
pub fn extract_json_from_text(text: &str) -> Option<String> {
    // 1. Try to find content between ```json and ```
    if let Some(start) = text.find("```json") {
        let rest = &text[start + 7..];
        if let Some(end) = rest.find("```") {
            return Some(rest[..end].trim().to_string());
        }
    }

    // 2. Try to find content between ``` and ```
    if let Some(start) = text.find("```") {
        let rest = &text[start + 3..];
        if let Some(end) = rest.find("```") {
            return Some(rest[..end].trim().to_string());
        }
    }

    // 3. Try to find the first '{' and last '}'
    if let (Some(start), Some(end)) = (text.find('{'), text.rfind('}')) {
        return Some(text[start..=end].to_string());
    }

    None
}
