//! HTTP chat-completions gateway
//!
//! Implements [`ModelGateway`] against any OpenAI-compatible
//! `/chat/completions` endpoint (DeepSeek by default). One request per
//! call; no retries.

use super::protocol::{ChatRequest, ChatResponse};
use async_trait::async_trait;
use govmind_application::{CompletionRequest, GatewayError, ModelGateway};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_ENDPOINT: &str = "https://api.deepseek.com/chat/completions";
pub const DEFAULT_MODEL: &str = "deepseek-chat";

/// Connection setup limit; the overall limit comes from the variant profile
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Longest error body kept in `GatewayError::Http`
const MAX_ERROR_BODY: usize = 2000;

pub struct ChatCompletionGateway {
    client: Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

impl ChatCompletionGateway {
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
    ) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| GatewayError::Connection(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            model: model.into(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

#[async_trait]
impl ModelGateway for ChatCompletionGateway {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, GatewayError> {
        let body = ChatRequest::from_completion(&self.model, request);

        let mut builder = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .timeout(request.profile.timeout());
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        debug!(endpoint = %self.endpoint, model = %self.model, variant = %request.variant(), "POST chat completion");

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                GatewayError::Timeout(request.profile.timeout_seconds)
            } else {
                GatewayError::Connection(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let mut text = response.text().await.unwrap_or_default();
            if text.len() > MAX_ERROR_BODY {
                text = govmind_domain::core::string::truncate(&text, MAX_ERROR_BODY);
            }
            warn!(status = status.as_u16(), "Chat completion request rejected");
            return Err(GatewayError::Http {
                status: status.as_u16(),
                body: text,
            });
        }

        let parsed: ChatResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                GatewayError::Timeout(request.profile.timeout_seconds)
            } else {
                GatewayError::InvalidResponse(e.to_string())
            }
        })?;

        parsed.into_first_content().ok_or(GatewayError::NoChoices)
    }
}
