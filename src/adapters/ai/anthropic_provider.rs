//! Anthropic provider - implementation of [`AiProvider`] for the Claude API.
//!
//! Non-streaming completions only: every engine interaction is a single
//! request-response turn, so SSE plumbing is not needed here.
//!
//! # Configuration
//!
//! ```ignore
//! let config = AnthropicConfig::new(api_key)
//!     .with_model("claude-sonnet-4-20250514")
//!     .with_timeout(Duration::from_secs(25));
//!
//! let provider = AnthropicProvider::new(config);
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use tokio::time::sleep;

use crate::ports::{
    AiError, AiProvider, CompletionRequest, CompletionResponse, MessageRole, ProviderInfo,
    TokenUsage,
};

/// Anthropic API version header value.
const ANTHROPIC_API_VERSION: &str = "2023-06-01";

/// Configuration for the Anthropic provider.
#[derive(Debug, Clone)]
pub struct AnthropicConfig {
    api_key: Secret<String>,
    /// Model to use.
    pub model: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Maximum retries on transient failures.
    pub max_retries: u32,
    /// Default max tokens when the request does not set one.
    pub default_max_tokens: u32,
    /// Default temperature when the request does not set one.
    pub default_temperature: f32,
}

impl AnthropicConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "claude-sonnet-4-20250514".to_string(),
            base_url: "https://api.anthropic.com".to_string(),
            timeout: Duration::from_secs(25),
            max_retries: 2,
            default_max_tokens: 1024,
            default_temperature: 0.8,
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the maximum retry count.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Sets default generation limits.
    pub fn with_defaults(mut self, max_tokens: u32, temperature: f32) -> Self {
        self.default_max_tokens = max_tokens;
        self.default_temperature = temperature;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Anthropic API provider implementation.
pub struct AnthropicProvider {
    config: AnthropicConfig,
    client: Client,
}

impl AnthropicProvider {
    /// Creates a new Anthropic provider with the given configuration.
    pub fn new(config: AnthropicConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.config.base_url)
    }

    /// Converts our request to Anthropic's format.
    fn to_anthropic_request(&self, request: &CompletionRequest) -> AnthropicRequest {
        let mut messages: Vec<AnthropicMessage> = request
            .messages
            .iter()
            .map(|msg| AnthropicMessage {
                role: match msg.role {
                    MessageRole::User => "user",
                    MessageRole::Assistant => "assistant",
                }
                .to_string(),
                content: msg.content.clone(),
            })
            .collect();

        // Anthropic requires a non-empty message list starting with a user
        // turn. The opening-line call sends an empty history, and the
        // in-session transcript starts with the partner's (assistant)
        // opening, so seed a neutral user turn in both cases.
        if messages.first().map(|m| m.role.as_str()) != Some("user") {
            messages.insert(
                0,
                AnthropicMessage {
                    role: "user".to_string(),
                    content: "(the conversation begins)".to_string(),
                },
            );
        }

        AnthropicRequest {
            model: self.config.model.clone(),
            messages,
            system: request.system_prompt.clone(),
            max_tokens: request.max_tokens.unwrap_or(self.config.default_max_tokens),
            temperature: Some(
                request
                    .temperature
                    .unwrap_or(self.config.default_temperature),
            ),
        }
    }

    async fn send_request(&self, request: &CompletionRequest) -> Result<Response, AiError> {
        let anthropic_request = self.to_anthropic_request(request);

        self.client
            .post(self.messages_url())
            .header("x-api-key", self.config.api_key())
            .header("anthropic-version", ANTHROPIC_API_VERSION)
            .header("Content-Type", "application/json")
            .json(&anthropic_request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AiError::Timeout {
                        timeout_secs: self.config.timeout.as_secs() as u32,
                    }
                } else if e.is_connect() {
                    AiError::network(format!("Connection failed: {}", e))
                } else {
                    AiError::network(e.to_string())
                }
            })
    }

    /// Parses the API response status and handles errors.
    async fn handle_response_status(&self, response: Response) -> Result<Response, AiError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();

        match status.as_u16() {
            401 => Err(AiError::AuthenticationFailed),
            429 => Err(AiError::rate_limited(Self::parse_retry_after(&error_body))),
            400 => Err(AiError::InvalidRequest(error_body)),
            500..=599 => Err(AiError::unavailable(format!(
                "Server error {}: {}",
                status, error_body
            ))),
            _ => Err(AiError::network(format!(
                "Unexpected status {}: {}",
                status, error_body
            ))),
        }
    }

    /// Parses retry-after hints from error response text.
    fn parse_retry_after(error_body: &str) -> u32 {
        if let Ok(parsed) = serde_json::from_str::<serde_json::Value>(error_body) {
            if let Some(msg) = parsed
                .get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
            {
                if let Some(idx) = msg.find("try again in ") {
                    let rest = &msg[idx + 13..];
                    if let Some(num_end) = rest.find(|c: char| !c.is_ascii_digit()) {
                        if let Ok(secs) = rest[..num_end].parse::<u32>() {
                            return secs;
                        }
                    }
                }
            }
        }
        60
    }

    async fn parse_response(&self, response: Response) -> Result<CompletionResponse, AiError> {
        let response = self.handle_response_status(response).await?;

        let anthropic_response: AnthropicResponse = response
            .json()
            .await
            .map_err(|e| AiError::parse(format!("Failed to parse response: {}", e)))?;

        let content = anthropic_response
            .content
            .into_iter()
            .filter_map(|block| {
                if block.block_type == "text" {
                    block.text
                } else {
                    None
                }
            })
            .collect::<Vec<_>>()
            .join("");

        let usage = TokenUsage::new(
            anthropic_response.usage.input_tokens,
            anthropic_response.usage.output_tokens,
        );

        Ok(CompletionResponse {
            content,
            usage,
            model: anthropic_response.model,
        })
    }
}

#[async_trait]
impl AiProvider for AnthropicProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AiError> {
        let mut last_error = AiError::network("No attempts made");
        let mut retry_count = 0;

        while retry_count <= self.config.max_retries {
            match self.send_request(&request).await {
                Ok(response) => match self.parse_response(response).await {
                    Ok(completion) => return Ok(completion),
                    Err(err) => {
                        if !err.is_retryable() || retry_count >= self.config.max_retries {
                            return Err(err);
                        }
                        last_error = err;
                    }
                },
                Err(err) => {
                    if !err.is_retryable() || retry_count >= self.config.max_retries {
                        return Err(err);
                    }
                    last_error = err;
                }
            }

            // Exponential backoff: 1s, 2s, 4s, ...
            let delay = Duration::from_secs(1 << retry_count);
            sleep(delay).await;
            retry_count += 1;
        }

        Err(last_error)
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("anthropic", &self.config.model)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Anthropic wire types
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Serialize)]
struct AnthropicRequest {
    model: String,
    messages: Vec<AnthropicMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct AnthropicMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    content: Vec<ContentBlock>,
    model: String,
    usage: AnthropicUsage,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AnthropicUsage {
    input_tokens: u32,
    output_tokens: u32,
}
