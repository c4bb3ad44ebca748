//! Mock AI provider for testing.
//!
//! Configurable mock implementation of the [`AiProvider`] port: queued
//! responses, error injection, and call capture, so tests run without
//! calling a real model.
//!
//! # Example
//!
//! ```ignore
//! let provider = MockAiProvider::new()
//!     .with_response("Hey... today was rough.")
//!     .with_error(MockError::Timeout { timeout_secs: 25 });
//! ```

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::ports::{
    AiError, AiProvider, CompletionRequest, CompletionResponse, ProviderInfo, TokenUsage,
};

/// Mock AI provider.
///
/// Responses are consumed in queue order; an empty queue falls back to a
/// fixed canned reply so multi-turn tests do not need to enumerate every
/// exchange.
#[derive(Debug, Clone)]
pub struct MockAiProvider {
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
    default_reply: String,
}

/// A configured mock response.
#[derive(Debug, Clone)]
enum MockResponse {
    Success(String),
    Error(MockError),
}

/// Mock error types for testing error handling.
#[derive(Debug, Clone)]
pub enum MockError {
    RateLimited { retry_after_secs: u32 },
    Unavailable { message: String },
    AuthenticationFailed,
    Network { message: String },
    Timeout { timeout_secs: u32 },
}

impl From<MockError> for AiError {
    fn from(err: MockError) -> Self {
        match err {
            MockError::RateLimited { retry_after_secs } => AiError::rate_limited(retry_after_secs),
            MockError::Unavailable { message } => AiError::unavailable(message),
            MockError::AuthenticationFailed => AiError::AuthenticationFailed,
            MockError::Network { message } => AiError::network(message),
            MockError::Timeout { timeout_secs } => AiError::Timeout { timeout_secs },
        }
    }
}

impl Default for MockAiProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockAiProvider {
    /// Creates a new mock provider with default settings.
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            default_reply: "I hear you.".to_string(),
        }
    }

    /// Adds a successful response to the queue.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(MockResponse::Success(content.into()));
        self
    }

    /// Adds an error response to the queue.
    pub fn with_error(self, error: MockError) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(MockResponse::Error(error));
        self
    }

    /// Sets the reply used when the queue is exhausted.
    pub fn with_default_reply(mut self, reply: impl Into<String>) -> Self {
        self.default_reply = reply.into();
        self
    }

    /// Number of completions requested so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Snapshot of all captured requests.
    pub fn calls(&self) -> Vec<CompletionRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl AiProvider for MockAiProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AiError> {
        self.calls.lock().unwrap().push(request);

        let next = self.responses.lock().unwrap().pop_front();
        match next {
            Some(MockResponse::Success(content)) => Ok(CompletionResponse {
                content,
                usage: TokenUsage::new(10, 20),
                model: "mock-model-1".to_string(),
            }),
            Some(MockResponse::Error(err)) => Err(err.into()),
            None => Ok(CompletionResponse {
                content: self.default_reply.clone(),
                usage: TokenUsage::new(10, 20),
                model: "mock-model-1".to_string(),
            }),
        }
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("mock", "mock-model-1")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn queued_responses_are_consumed_in_order() {
        let provider = MockAiProvider::new()
            .with_response("first")
            .with_response("second");

        let r1 = provider.complete(CompletionRequest::new()).await.unwrap();
        let r2 = provider.complete(CompletionRequest::new()).await.unwrap();
        assert_eq!(r1.content, "first");
        assert_eq!(r2.content, "second");
    }

    #[tokio::test]
    async fn empty_queue_uses_default_reply() {
        let provider = MockAiProvider::new().with_default_reply("fallback reply");
        let r = provider.complete(CompletionRequest::new()).await.unwrap();
        assert_eq!(r.content, "fallback reply");
    }

    #[tokio::test]
    async fn errors_are_injected() {
        let provider = MockAiProvider::new().with_error(MockError::Timeout { timeout_secs: 25 });
        let err = provider
            .complete(CompletionRequest::new())
            .await
            .unwrap_err();
        assert!(matches!(err, AiError::Timeout { timeout_secs: 25 }));
    }

    #[tokio::test]
    async fn calls_are_captured() {
        let provider = MockAiProvider::new();
        let request = CompletionRequest::new().with_system_prompt("persona");
        provider.complete(request).await.unwrap();

        assert_eq!(provider.call_count(), 1);
        assert_eq!(
            provider.calls()[0].system_prompt.as_deref(),
            Some("persona")
        );
    }
}
