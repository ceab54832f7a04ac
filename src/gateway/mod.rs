// src/gateway/mod.rs

pub mod openai;
pub mod prompts;

use std::fmt;

use async_trait::async_trait;
use serde::Serialize;

pub use openai::OpenAiGateway;

/// Role of a message in a chat-style prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Sampling knobs sent along with a prompt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletionOptions {
    pub max_tokens: u32,
    /// `None` leaves the service default in place.
    pub temperature: Option<f32>,
}

#[derive(Debug)]
pub enum GatewayError {
    /// No answer within the configured timeout.
    Timeout,
    /// Connection or protocol failure before a response arrived.
    Transport(String),
    /// The service answered with a non-success status.
    Status { status: u16, body: String },
    /// The service answered, but not with a usable completion.
    MalformedResponse(String),
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GatewayError::Timeout => write!(f, "request timed out"),
            GatewayError::Transport(msg) => write!(f, "transport error: {}", msg),
            GatewayError::Status { status, body } => {
                write!(f, "service returned status {}: {}", status, body)
            }
            GatewayError::MalformedResponse(msg) => write!(f, "malformed response: {}", msg),
        }
    }
}

impl std::error::Error for GatewayError {}

/// Boundary to the external text-generation service.
///
/// Implementations return the raw completion text; callers own any cleanup.
#[async_trait]
pub trait ModelGateway: Send + Sync {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        options: CompletionOptions,
    ) -> Result<String, GatewayError>;
}
