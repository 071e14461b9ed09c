//! Chat completion client for OpenAI-compatible endpoints.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::debug;

use crate::error::ChatError;

use super::decorator::{BearerAuth, JsonContentType, RequestDecorator, apply_all};
use super::types::{ChatCompletionResult, ChatMessage, ChatRequest};

/// Trait for issuing chat completions.
///
/// This abstraction allows mocking the HTTP endpoint in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatCompletions: Send + Sync {
    /// Send `messages` to `model` and return the decoded response.
    async fn complete(
        &self,
        model: &str,
        messages: &[ChatMessage],
    ) -> Result<ChatCompletionResult, ChatError>;
}

/// One-shot HTTP client for `POST <base_url>/chat/completions`.
///
/// No retries: a failed request is reported to the caller as-is.
pub struct ChatClient {
    http: Client,
    base_url: String,
    decorators: Vec<Box<dyn RequestDecorator>>,
}

impl ChatClient {
    /// Client authenticated with `api_key`, sending JSON bodies.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self, ChatError> {
        let http = Client::builder()
            .user_agent(concat!("auto-commit-msg/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ChatError::Transport)?;

        Ok(Self {
            http,
            base_url: base_url.into(),
            decorators: vec![Box::new(BearerAuth::new(api_key)), Box::new(JsonContentType)],
        })
    }

    /// Append a decorator; it runs after the built-in ones.
    pub fn with_decorator(mut self, decorator: impl RequestDecorator + 'static) -> Self {
        self.decorators.push(Box::new(decorator));
        self
    }

    /// Endpoint URL, tolerating a trailing slash on the base URL.
    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl ChatCompletions for ChatClient {
    async fn complete(
        &self,
        model: &str,
        messages: &[ChatMessage],
    ) -> Result<ChatCompletionResult, ChatError> {
        let url = self.endpoint();
        debug!("POST {} (model={}, messages={})", url, model, messages.len());

        let request = self.http.post(&url).json(&ChatRequest { model, messages });
        let response = apply_all(&self.decorators, request)
            .send()
            .await
            .map_err(ChatError::Transport)?;

        let status = response.status();
        let body = response.text().await.map_err(ChatError::Transport)?;

        if status != StatusCode::OK {
            return Err(ChatError::Status {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|source| ChatError::MalformedBody { source, body })
    }
}
