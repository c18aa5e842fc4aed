//! Chat-completion client abstraction
//!
//! The parser talks to the model through the `ChatClient` trait so the
//! transport can be swapped out. `HttpChatClient` is the production
//! implementation for OpenAI-compatible endpoints.

use async_trait::async_trait;

use crate::error::ParseError;
use crate::types::{ChatEndpoint, ChatRequest};

/// A client able to run one non-streaming chat completion
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Human-readable name for logs
    fn name(&self) -> &'static str;

    /// Send `request` to `endpoint` and return the first choice's content
    async fn complete(
        &self,
        endpoint: &ChatEndpoint,
        request: &ChatRequest,
    ) -> Result<String, ParseError>;
}

/// OpenAI-compatible HTTP client
#[derive(Debug, Clone, Default)]
pub struct HttpChatClient {
    http_client: reqwest::Client,
}

impl HttpChatClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reuse an existing reqwest client (shared connection pool, proxies, ...)
    pub fn with_client(http_client: reqwest::Client) -> Self {
        Self { http_client }
    }
}

#[async_trait]
impl ChatClient for HttpChatClient {
    fn name(&self) -> &'static str {
        "OpenAI-compatible HTTP"
    }

    async fn complete(
        &self,
        endpoint: &ChatEndpoint,
        request: &ChatRequest,
    ) -> Result<String, ParseError> {
        let url = endpoint.completions_url();

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&endpoint.api_key)
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            log::debug!("Completion request to {} failed with {}: {}", url, status, body);
            return Err(ParseError::Http(status.as_u16()));
        }

        let json: serde_json::Value = response.json().await.map_err(|e| {
            ParseError::UnexpectedResponse(format!("Failed to parse response: {}", e))
        })?;

        json.get("choices")
            .and_then(|c| c.get(0))
            .and_then(|c| c.get("message"))
            .and_then(|m| m.get("content"))
            .and_then(|c| c.as_str())
            .map(str::to_string)
            .ok_or_else(|| {
                ParseError::UnexpectedResponse(
                    "missing choices[0].message.content".to_string(),
                )
            })
    }
}
