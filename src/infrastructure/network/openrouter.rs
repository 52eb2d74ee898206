use crate::domain::error::NlqError;
use crate::domain::traits::CompletionBackend;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Hosted chat-completion backend (OpenRouter wire format).
pub struct OpenRouterBackend {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
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
    content: String,
}

#[derive(Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    message: String,
}

impl OpenRouterBackend {
    /// Fails fast when the API key is missing or empty; no request is ever
    /// attempted with broken credentials.
    pub fn new(
        client: Client,
        base_url: impl Into<String>,
        api_key: Option<String>,
        model: impl Into<String>,
    ) -> Result<Self, NlqError> {
        let api_key = match api_key {
            Some(key) if !key.trim().is_empty() => key,
            _ => {
                return Err(NlqError::MisconfiguredProvider(
                    "OPENROUTER_API_KEY is not set".to_string(),
                ))
            }
        };

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            model: model.into(),
        })
    }
}

#[async_trait]
impl CompletionBackend for OpenRouterBackend {
    async fn complete(&self, prompt: &str) -> Result<String, NlqError> {
        let endpoint = format!("{}/chat/completions", self.base_url);
        debug!(endpoint = %endpoint, model = %self.model, "sending completion request");

        let response = self
            .client
            .post(&endpoint)
            .bearer_auth(&self.api_key)
            .json(&ChatRequest {
                model: &self.model,
                messages: vec![ChatMessage {
                    role: "user",
                    content: prompt,
                }],
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Prefer the provider's own error message when the body carries one.
            let message = serde_json::from_str::<ApiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(NlqError::BackendRejected {
                status: status.as_u16(),
                message: if message.is_empty() {
                    status.to_string()
                } else {
                    message
                },
            });
        }

        let body: ChatResponse = response.json().await?;
        body.choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| NlqError::BackendRejected {
                status: status.as_u16(),
                message: "response contained no choices".to_string(),
            })
    }

    fn describe(&self) -> String {
        format!("openrouter ({})", self.model)
    }
}
