//! Question-to-SQL orchestration: schema hint, prompt, completion, extraction.

use crate::domain::error::NlqError;
use crate::domain::{extract, prompt};
use crate::infrastructure::storage::postgres;
use crate::state::AppState;
use tracing::debug;

/// Translate a natural-language question into a single SQL statement.
///
/// One bounded attempt end to end. Every failure mode maps to a distinct
/// [`NlqError`] variant so the shell can tell the user what to do next:
/// check the local server, fix the API key, or rephrase the question.
pub async fn translate_question(state: &AppState, question: &str) -> Result<String, NlqError> {
    let schema = postgres::schema_hint(&state.db).await;
    if schema.is_none() {
        debug!("no schema hint available, translating without one");
    }

    let prompt = prompt::build(question, &state.examples, schema.as_deref());
    debug!(prompt_len = prompt.len(), backend = %state.backend.describe(), "requesting completion");

    let raw = state.backend.complete(&prompt).await?;
    extract::extract(&raw)
}
