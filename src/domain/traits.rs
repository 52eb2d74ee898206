use crate::domain::error::NlqError;
use async_trait::async_trait;

/// A text-completion backend that turns a prompt into raw model output.
///
/// Both the local (Ollama-style) and hosted (OpenRouter-style) providers
/// implement this; the caller never branches on the concrete type. One
/// request, one bounded attempt, no retry inside the backend.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Send the prompt and return the raw completion text.
    async fn complete(&self, prompt: &str) -> Result<String, NlqError>;

    /// Short human-readable label, e.g. "ollama (gemma:2b)".
    fn describe(&self) -> String;
}
