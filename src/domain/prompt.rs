//! Prompt construction for the translation backend.
//!
//! Pure string assembly: the same question, examples and schema hint always
//! produce byte-identical output, so the template is pinned by tests.

use crate::domain::model::Example;
use std::fmt::Write;

const PREAMBLE: &str = "You are a SQL expert. Translate the following natural-language question \
into a single valid SQL statement for the target PostgreSQL schema.";

const QUESTION_MARKER: &str = "Question:";

const CLOSING: &str = "Return only the SQL statement, with no explanation and no additional text.";

/// Build the full prompt sent to the completion backend.
///
/// Examples are rendered in the order given. When the list is empty the
/// example section is omitted entirely, header included.
pub fn build(question: &str, examples: &[Example], schema_hint: Option<&str>) -> String {
    let mut prompt = String::new();

    prompt.push_str(PREAMBLE);
    prompt.push_str("\n\n");

    if let Some(schema) = schema_hint {
        if !schema.is_empty() {
            writeln!(prompt, "{}", schema).ok();
            prompt.push('\n');
        }
    }

    if !examples.is_empty() {
        prompt.push_str("Examples:\n\n");
        for example in examples {
            writeln!(prompt, "-- {}", example.description).ok();
            writeln!(prompt, "{}", example.statement).ok();
            prompt.push('\n');
        }
    }

    writeln!(prompt, "{} {}", QUESTION_MARKER, question).ok();
    prompt.push('\n');
    prompt.push_str(CLOSING);

    prompt
}
