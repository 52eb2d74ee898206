pub mod ollama;
pub mod openrouter;

use crate::domain::error::NlqError;
use crate::domain::model::ProviderKind;
use crate::domain::traits::CompletionBackend;
use crate::infrastructure::config::{ProviderConfig, OPENROUTER_BASE_URL};
use reqwest::Client;

pub use ollama::OllamaBackend;
pub use openrouter::OpenRouterBackend;

/// Select the active backend from configuration. Called once at startup;
/// a new provider means a new arm here, not branching in callers.
pub fn backend_from_config(
    client: Client,
    provider: &ProviderConfig,
) -> Result<Box<dyn CompletionBackend>, NlqError> {
    match provider.kind {
        ProviderKind::Ollama => Ok(Box::new(OllamaBackend::new(
            client,
            provider.ollama_url.clone(),
            provider.ollama_model.clone(),
        ))),
        ProviderKind::OpenRouter => Ok(Box::new(OpenRouterBackend::new(
            client,
            OPENROUTER_BASE_URL,
            provider.openrouter_api_key.clone(),
            provider.openrouter_model.clone(),
        )?)),
    }
}
