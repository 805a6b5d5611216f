//! Model Gateway port
//!
//! Defines the interface for sending one built prompt to a chat-completion
//! model and getting the raw text back.

use async_trait::async_trait;
use govmind_domain::{DecodingProfile, Prompt, Variant};
use thiserror::Error;

/// Errors that can occur during a model call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Model response contained no choices")]
    NoChoices,

    #[error("Model call timed out after {0}s")]
    Timeout(u64),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl GatewayError {
    /// A gateway failure belongs to one completion; a fresh call may succeed.
    pub fn is_retryable(&self) -> bool {
        true
    }

    /// Short machine-readable kind, used in event logs
    pub fn kind(&self) -> &'static str {
        match self {
            GatewayError::Http { .. } => "http",
            GatewayError::NoChoices => "no_choices",
            GatewayError::Timeout(_) => "timeout",
            GatewayError::Connection(_) => "connection",
            GatewayError::InvalidResponse(_) => "invalid_response",
        }
    }
}

/// One completion request: the prompt plus the decoding profile to use
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub prompt: Prompt,
    pub profile: DecodingProfile,
}

impl CompletionRequest {
    pub fn new(prompt: Prompt, profile: DecodingProfile) -> Self {
        Self { prompt, profile }
    }

    pub fn variant(&self) -> Variant {
        self.prompt.variant
    }
}

/// Gateway for model communication
///
/// A single attempt per call; retry policy belongs to the caller. The
/// per-variant timeout is enforced by the use cases around this port.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait ModelGateway: Send + Sync {
    /// Send the request and return the first choice's message content.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, GatewayError>;
}
