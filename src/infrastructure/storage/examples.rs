//! Few-shot example store.
//!
//! Example files alternate `--` comment lines (the natural-language
//! description) with the SQL that answers them:
//!
//! ```text
//! -- count all actors
//! SELECT COUNT(*) FROM actor;
//! ```

use crate::domain::model::Example;
use std::path::Path;
use tracing::debug;

/// Parse example file contents into ordered examples.
///
/// A `--` line starts a new example; consecutive comment lines join into one
/// description. Following non-comment, non-blank lines accumulate verbatim
/// into the statement until the next comment or end of input. Blank lines
/// separate but never terminate a statement. Comment blocks with no SQL are
/// dropped, and SQL with no preceding comment is skipped.
pub fn parse(source: &str) -> Vec<Example> {
    let mut examples = Vec::new();
    let mut description: Option<String> = None;
    let mut statement_lines: Vec<&str> = Vec::new();

    let mut in_comment_run = false;
    for line in source.lines() {
        let trimmed = line.trim();
        if let Some(comment) = trimmed.strip_prefix("--") {
            let comment = comment.trim();
            if in_comment_run {
                // Directly consecutive comment lines extend the description.
                if let Some(desc) = description.as_mut() {
                    if !comment.is_empty() {
                        if !desc.is_empty() {
                            desc.push(' ');
                        }
                        desc.push_str(comment);
                    }
                }
            } else {
                flush(&mut examples, &mut description, &mut statement_lines);
                description = Some(comment.to_string());
            }
            in_comment_run = true;
        } else if trimmed.is_empty() {
            if !statement_lines.is_empty() {
                statement_lines.push(line);
            }
            in_comment_run = false;
        } else {
            // Statement text with no preceding description is malformed
            // input and skipped.
            if description.is_some() {
                statement_lines.push(line);
            }
            in_comment_run = false;
        }
    }

    flush(&mut examples, &mut description, &mut statement_lines);
    examples
}

/// Close out the current example, dropping it when no statement followed
/// the description.
fn flush(examples: &mut Vec<Example>, description: &mut Option<String>, statement_lines: &mut Vec<&str>) {
    if let Some(desc) = description.take() {
        let statement = statement_lines.join("\n").trim().to_string();
        if !statement.is_empty() {
            examples.push(Example {
                description: desc,
                statement,
            });
        }
    }
    statement_lines.clear();
}

/// Load examples from a file. A missing or unreadable file is not an error;
/// translation just runs without few-shot context.
pub async fn load(path: impl AsRef<Path>) -> Vec<Example> {
    let path = path.as_ref();
    match tokio::fs::read_to_string(path).await {
        Ok(contents) => parse(&contents),
        Err(err) => {
            debug!(path = %path.display(), %err, "no examples loaded");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_source_yields_no_examples() {
        assert!(parse("").is_empty());
        assert!(parse("\n\n\n").is_empty());
    }

    #[test]
    fn single_example_parses() {
        let examples = parse("-- count actors\nSELECT COUNT(*) FROM actor;\n");
        assert_eq!(examples.len(), 1);
        assert_eq!(examples[0].description, "count actors");
        assert_eq!(examples[0].statement, "SELECT COUNT(*) FROM actor;");
    }

    #[test]
    fn file_order_is_preserved() {
        let source = "-- first\nSELECT 1;\n-- second\nSELECT 2;\n-- third\nSELECT 3;\n";
        let descriptions: Vec<_> = parse(source).into_iter().map(|e| e.description).collect();
        assert_eq!(descriptions, ["first", "second", "third"]);
    }

    #[test]
    fn consecutive_comments_join_into_one_description() {
        let source = "-- find the busiest\n-- rental store\nSELECT store_id FROM rental;\n";
        let examples = parse(source);
        assert_eq!(examples.len(), 1);
        assert_eq!(examples[0].description, "find the busiest rental store");
    }

    #[test]
    fn blank_lines_do_not_terminate_a_statement() {
        let source = "-- two part\nSELECT a\n\nFROM t;\n";
        let examples = parse(source);
        assert_eq!(examples.len(), 1);
        assert!(examples[0].statement.contains("SELECT a"));
        assert!(examples[0].statement.contains("FROM t;"));
    }

    #[test]
    fn description_without_statement_is_dropped() {
        let source = "-- orphaned description\n\n-- real one\nSELECT 1;\n";
        let examples = parse(source);
        assert_eq!(examples.len(), 1);
        assert_eq!(examples[0].description, "real one");
    }

    #[test]
    fn statement_without_description_is_skipped() {
        let source = "SELECT 1;\n-- labeled\nSELECT 2;\n";
        let examples = parse(source);
        assert_eq!(examples.len(), 1);
        assert_eq!(examples[0].statement, "SELECT 2;");
    }

    #[test]
    fn multi_statement_block_stays_one_example() {
        let source = "-- setup\nINSERT INTO t VALUES (1);\nINSERT INTO t VALUES (2);\n";
        let examples = parse(source);
        assert_eq!(examples.len(), 1);
        assert_eq!(
            examples[0].statement,
            "INSERT INTO t VALUES (1);\nINSERT INTO t VALUES (2);"
        );
    }

    #[test]
    fn no_example_has_an_empty_statement() {
        let source = "-- a\nSELECT 1;\n-- b\n-- c\n-- d\nSELECT 2;\n";
        for example in parse(source) {
            assert!(!example.statement.is_empty());
        }
    }

    #[test]
    fn round_trips_written_pairs() {
        let pairs: Vec<(String, String)> = (0..5)
            .map(|i| (format!("question {}", i), format!("SELECT {};", i)))
            .collect();
        let source: String = pairs
            .iter()
            .map(|(d, s)| format!("-- {}\n{}\n", d, s))
            .collect();

        let examples = parse(&source);
        assert_eq!(examples.len(), pairs.len());
        for (example, (d, s)) in examples.iter().zip(&pairs) {
            assert_eq!(&example.description, d);
            assert_eq!(&example.statement, s);
        }
    }

    #[tokio::test]
    async fn missing_file_loads_as_empty() {
        let examples = load("/nonexistent/path/examples.sql").await;
        assert!(examples.is_empty());
    }
}
