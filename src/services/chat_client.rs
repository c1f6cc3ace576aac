use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::Config;
use crate::errors::{AppError, AppResult};

const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Boundary to the external text-generation provider. Injected into the
/// orchestrator so tests can substitute a double.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// One chat-completion round trip. `json_mode` asks the provider for
    /// JSON-formatted output; the returned string is the raw message
    /// content either way.
    async fn chat(
        &self,
        model: &str,
        system_prompt: &str,
        user_prompt: &str,
        json_mode: bool,
    ) -> AppResult<String>;
}

/// OpenAI-compatible chat-completions client.
pub struct OpenAiChatClient {
    api_key: SecretString,
    base_url: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    temperature: f64,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

impl OpenAiChatClient {
    pub fn new(config: &Config) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .expect("failed to build HTTP client");

        Self {
            api_key: config.openai_api_key.clone(),
            base_url: config.openai_base_url.clone(),
            client,
        }
    }
}

#[async_trait]
impl ChatProvider for OpenAiChatClient {
    async fn chat(
        &self,
        model: &str,
        system_prompt: &str,
        user_prompt: &str,
        json_mode: bool,
    ) -> AppResult<String> {
        let body = ChatRequest {
            model: model.to_string(),
            temperature: 0.7,
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system_prompt.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user_prompt.to_string(),
                },
            ],
            response_format: json_mode.then(|| ResponseFormat {
                format_type: "json_object".to_string(),
            }),
        };

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .header(
                "Authorization",
                format!("Bearer {}", self.api_key.expose_secret()),
            )
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AppError::ProviderError(format!(
                        "request to model '{model}' timed out after {DEFAULT_TIMEOUT_SECS}s"
                    ))
                } else {
                    AppError::ProviderError(format!("network error calling model '{model}': {e}"))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ProviderError(format!(
                "model '{model}' returned {status}: {body}"
            )));
        }

        let api_response: ChatResponse = response.json().await.map_err(|e| {
            AppError::ProviderError(format!("failed to parse provider response: {e}"))
        })?;

        api_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|content| content.trim().to_string())
            .ok_or_else(|| {
                AppError::ProviderError(format!("model '{model}' returned no message content"))
            })
    }
}
