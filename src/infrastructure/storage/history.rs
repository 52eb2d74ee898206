//! Append-only history of what the user typed.
//!
//! One tab-separated line per entry: `{rfc3339}\t{kind}\t{text}`. Newlines
//! inside the text are flattened so the file stays line-oriented.

use crate::domain::error::NlqError;
use crate::domain::model::{EntryKind, HistoryEntry};
use chrono::DateTime;
use std::path::PathBuf;
use tokio::io::AsyncWriteExt;
use tracing::warn;

pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Default location: `~/.nlq_history`.
    pub fn default_location() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::new(home.join(".nlq_history"))
    }

    pub async fn append(&self, entry: &HistoryEntry) -> Result<(), NlqError> {
        let line = format!(
            "{}\t{}\t{}\n",
            entry.timestamp.to_rfc3339(),
            entry.kind.as_str(),
            entry.text.replace(['\n', '\t'], " ")
        );

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        Ok(())
    }

    /// Record an entry, logging instead of failing: losing a history line
    /// must never interrupt the session.
    pub async fn record(&self, kind: EntryKind, text: &str) {
        let entry = HistoryEntry::now(kind, text);
        if let Err(err) = self.append(&entry).await {
            warn!(%err, "failed to write history entry");
        }
    }

    /// The most recent `limit` entries, oldest first. Malformed lines are
    /// skipped; a missing file reads as empty history.
    pub async fn recent(&self, limit: usize) -> Vec<HistoryEntry> {
        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .unwrap_or_default();

        let entries: Vec<HistoryEntry> = contents.lines().filter_map(parse_line).collect();
        let skip = entries.len().saturating_sub(limit);
        entries.into_iter().skip(skip).collect()
    }
}

fn parse_line(line: &str) -> Option<HistoryEntry> {
    let mut fields = line.splitn(3, '\t');
    let timestamp = DateTime::parse_from_rfc3339(fields.next()?).ok()?;
    let kind = EntryKind::parse(fields.next()?)?;
    let text = fields.next()?;
    Some(HistoryEntry {
        timestamp: timestamp.into(),
        kind,
        text: text.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (tempfile::TempDir, HistoryStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = HistoryStore::new(dir.path().join("history"));
        (dir, store)
    }

    #[tokio::test]
    async fn append_then_recent_round_trips() {
        let (_dir, store) = temp_store();
        store.record(EntryKind::Nl, "show all actors").await;
        store.record(EntryKind::Sql, "SELECT 1;").await;

        let entries = store.recent(10).await;
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].kind, EntryKind::Nl);
        assert_eq!(entries[0].text, "show all actors");
        assert_eq!(entries[1].kind, EntryKind::Sql);
    }

    #[tokio::test]
    async fn recent_returns_only_the_tail() {
        let (_dir, store) = temp_store();
        for i in 0..5 {
            store.record(EntryKind::Sql, &format!("SELECT {};", i)).await;
        }

        let entries = store.recent(2).await;
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].text, "SELECT 3;");
        assert_eq!(entries[1].text, "SELECT 4;");
    }

    #[tokio::test]
    async fn malformed_lines_are_skipped() {
        let (_dir, store) = temp_store();
        tokio::fs::write(
            &store.path,
            "not a history line\n2024-01-01T00:00:00+00:00\tsql\tSELECT 1;\n",
        )
        .await
        .unwrap();

        let entries = store.recent(10).await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].text, "SELECT 1;");
    }

    #[tokio::test]
    async fn missing_file_reads_as_empty() {
        let (_dir, store) = temp_store();
        assert!(store.recent(10).await.is_empty());
    }

    #[tokio::test]
    async fn multiline_input_stays_on_one_line() {
        let (_dir, store) = temp_store();
        store.record(EntryKind::Sql, "SELECT 1\nFROM t;").await;
        let entries = store.recent(10).await;
        assert_eq!(entries[0].text, "SELECT 1 FROM t;");
    }
}
