use crate::domain::error::NlqError;
use crate::domain::traits::CompletionBackend;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Local model server backend (Ollama wire format).
pub struct OllamaBackend {
    client: Client,
    url: String,
    model: String,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

impl OllamaBackend {
    pub fn new(client: Client, url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into().trim_end_matches('/').to_string(),
            model: model.into(),
        }
    }
}

#[async_trait]
impl CompletionBackend for OllamaBackend {
    async fn complete(&self, prompt: &str) -> Result<String, NlqError> {
        let endpoint = format!("{}/api/generate", self.url);
        debug!(endpoint = %endpoint, model = %self.model, "sending completion request");

        let response = self
            .client
            .post(&endpoint)
            .json(&GenerateRequest {
                model: &self.model,
                prompt,
                stream: false,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(NlqError::BackendRejected {
                status: status.as_u16(),
                message: if message.is_empty() {
                    status.to_string()
                } else {
                    message
                },
            });
        }

        let body: GenerateResponse = response.json().await?;
        Ok(body.response)
    }

    fn describe(&self) -> String {
        format!("ollama ({})", self.model)
    }
}
