// src/gateway/openai.rs

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use super::{ChatMessage, CompletionOptions, GatewayError, ModelGateway};
use crate::config::Config;

/// Request body of the chat-completions endpoint.
#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// Gateway to an OpenAI-compatible chat-completions API.
#[derive(Clone)]
pub struct OpenAiGateway {
    client: Client,
    endpoint: Url,
    api_key: String,
    model: String,
}

impl OpenAiGateway {
    /// Builds the HTTP client with the configured timeout applied to every call.
    pub fn new(config: &Config) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.gateway_timeout_secs))
            .build()
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let endpoint = Url::parse(&format!(
            "{}/chat/completions",
            config.openai_base_url.as_str().trim_end_matches('/')
        ))
        .map_err(|e| GatewayError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            endpoint,
            api_key: config.openai_api_key.clone(),
            model: config.openai_model.clone(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl ModelGateway for OpenAiGateway {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        options: CompletionOptions,
    ) -> Result<String, GatewayError> {
        let payload = ChatRequest {
            model: &self.model,
            messages,
            max_tokens: options.max_tokens,
            temperature: options.temperature,
        };

        tracing::debug!("Sending completion request to {} ({})", self.endpoint, self.model);

        let res = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(map_transport_error)?;

        if !res.status().is_success() {
            let status = res.status().as_u16();
            let body = res.text().await.unwrap_or_default();
            return Err(GatewayError::Status { status, body });
        }

        let body: ChatResponse = res.json().await.map_err(|e| {
            if e.is_timeout() {
                GatewayError::Timeout
            } else {
                GatewayError::MalformedResponse(e.to_string())
            }
        })?;

        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .ok_or_else(|| GatewayError::MalformedResponse("no completion content".to_string()))
    }
}

fn map_transport_error(err: reqwest::Error) -> GatewayError {
    if err.is_timeout() {
        GatewayError::Timeout
    } else {
        GatewayError::Transport(err.to_string())
    }
}
