use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single few-shot example loaded from the examples file.
///
/// One comment block in the file maps to one example; whatever SQL follows
/// the block is kept verbatim as the statement, even if it holds more than
/// one statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    pub description: String,
    pub statement: String,
}

/// Which translation backend is active. Selected once at startup;
/// switching providers means restarting the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Ollama,
    OpenRouter,
}

impl ProviderKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "ollama" => Some(ProviderKind::Ollama),
            "openrouter" => Some(ProviderKind::OpenRouter),
            _ => None,
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderKind::Ollama => write!(f, "ollama"),
            ProviderKind::OpenRouter => write!(f, "openrouter"),
        }
    }
}

/// Result of executing a statement against the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum QueryOutput {
    Rows {
        columns: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    Affected(u64),
}

/// What kind of input a history line records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Nl,
    Sql,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Nl => "nl",
            EntryKind::Sql => "sql",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "nl" => Some(EntryKind::Nl),
            "sql" => Some(EntryKind::Sql),
            _ => None,
        }
    }
}

/// One line of the append-only history file.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub timestamp: DateTime<Utc>,
    pub kind: EntryKind,
    pub text: String,
}

impl HistoryEntry {
    pub fn now(kind: EntryKind, text: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            kind,
            text: text.into(),
        }
    }
}
