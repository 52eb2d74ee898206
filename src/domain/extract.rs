//! Pulls a single SQL statement out of free-form model output.
//!
//! This is a deliberate heuristic, not a SQL parser: strip markdown fences,
//! find the first line that starts with a known statement keyword, and cut
//! at the first semicolon. Syntax errors are the database's job to report.

use crate::domain::error::NlqError;

/// Statement starts the extractor recognizes. Anything else is treated as
/// prose, which keeps the boundary of the heuristic explicit.
const STATEMENT_KEYWORDS: [&str; 5] = ["SELECT", "INSERT", "UPDATE", "DELETE", "WITH"];

/// Extract a single clean SQL statement from raw completion text.
///
/// Fails with [`NlqError::NoStatementFound`] when no recognized statement
/// keyword appears at the start of any line; the raw text rides along in the
/// error so the shell can show the user what the model actually said.
pub fn extract(raw: &str) -> Result<String, NlqError> {
    let body = first_fenced_block(raw).unwrap_or(raw);

    let start = match statement_start(body) {
        Some(offset) => offset,
        None => {
            return Err(NlqError::NoStatementFound {
                raw: raw.to_string(),
            })
        }
    };

    let tail = &body[start..];
    let statement = match tail.find(';') {
        Some(end) => &tail[..=end],
        None => tail,
    };

    Ok(statement.trim().to_string())
}

/// Contents of the first ``` fence, language-tagged or bare. An unclosed
/// fence runs to end of input.
fn first_fenced_block(text: &str) -> Option<&str> {
    let open = text.find("```")?;
    let after_marker = &text[open + 3..];

    // Skip the rest of the opening line (language tag, if any).
    let body_start = match after_marker.find('\n') {
        Some(nl) => nl + 1,
        None => return None,
    };
    let body = &after_marker[body_start..];

    match body.find("```") {
        Some(close) => Some(&body[..close]),
        None => Some(body),
    }
}

/// Byte offset of the first line that begins with a recognized statement
/// keyword, pointing at the keyword itself (leading whitespace skipped).
fn statement_start(text: &str) -> Option<usize> {
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        let trimmed = line.trim_start();
        if starts_with_keyword(trimmed) {
            return Some(offset + (line.len() - trimmed.len()));
        }
        offset += line.len();
    }
    None
}

fn starts_with_keyword(line: &str) -> bool {
    STATEMENT_KEYWORDS.iter().any(|kw| match line.get(..kw.len()) {
        Some(head) if head.eq_ignore_ascii_case(kw) => line[kw.len()..]
            .chars()
            .next()
            .map(|c| !c.is_ascii_alphanumeric() && c != '_')
            .unwrap_or(true),
        _ => false,
    })
}
