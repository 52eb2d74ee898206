//! Plain-text table rendering for query results.

use crate::domain::model::QueryOutput;
use colored::Colorize;
use std::fmt::Write;

/// Longest cell before truncation kicks in.
const MAX_COLUMN_WIDTH: usize = 48;

/// Render a query output as an aligned ASCII table (or an affected-rows
/// summary for non-SELECT statements).
pub fn render(output: &QueryOutput) -> String {
    match output {
        QueryOutput::Affected(n) => format!("Query OK, {} row(s) affected\n", n),
        QueryOutput::Rows { columns, rows } => {
            if rows.is_empty() {
                return "(0 rows)\n".to_string();
            }
            let mut out = render_grid(columns, rows);
            writeln!(out, "({} row{})", rows.len(), if rows.len() == 1 { "" } else { "s" }).ok();
            out
        }
    }
}

pub fn render_grid(columns: &[String], rows: &[Vec<String>]) -> String {
    let widths = column_widths(columns, rows);
    let mut out = String::new();

    // Header
    for (i, col) in columns.iter().enumerate() {
        if i > 0 {
            out.push_str(" | ");
        }
        // Pad before colorizing: escape codes confuse width formatting.
        let cell = format!("{:width$}", truncate(col, widths[i]), width = widths[i]);
        out.push_str(&cell.bold().to_string());
    }
    out.push('\n');

    for (i, &w) in widths.iter().enumerate() {
        if i > 0 {
            out.push_str("-+-");
        }
        out.push_str(&"-".repeat(w));
    }
    out.push('\n');

    for row in rows {
        for (i, value) in row.iter().enumerate() {
            if i > 0 {
                out.push_str(" | ");
            }
            let width = *widths.get(i).unwrap_or(&0);
            let cell = format!("{:width$}", truncate(value, width), width = width);
            if value == "NULL" {
                out.push_str(&cell.dimmed().to_string());
            } else {
                out.push_str(&cell);
            }
        }
        out.push('\n');
    }

    out
}

fn column_widths(columns: &[String], rows: &[Vec<String>]) -> Vec<usize> {
    let mut widths: Vec<usize> = columns
        .iter()
        .map(|c| c.chars().count().min(MAX_COLUMN_WIDTH))
        .collect();
    for row in rows {
        for (i, value) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(value.chars().count().min(MAX_COLUMN_WIDTH));
            }
        }
    }
    widths
}

fn truncate(value: &str, max_width: usize) -> String {
    if value.chars().count() <= max_width {
        value.to_string()
    } else if max_width <= 3 {
        value.chars().take(max_width).collect()
    } else {
        let kept: String = value.chars().take(max_width - 3).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn affected_rows_render_as_summary() {
        let rendered = render(&QueryOutput::Affected(3));
        assert_eq!(rendered, "Query OK, 3 row(s) affected\n");
    }

    #[test]
    fn empty_result_renders_row_count_only() {
        let rendered = render(&QueryOutput::Rows {
            columns: strings(&["id"]),
            rows: vec![],
        });
        assert_eq!(rendered, "(0 rows)\n");
    }

    #[test]
    fn grid_contains_headers_and_values() {
        colored::control::set_override(false);
        let rendered = render(&QueryOutput::Rows {
            columns: strings(&["id", "name"]),
            rows: vec![strings(&["1", "alice"]), strings(&["2", "bob"])],
        });
        assert!(rendered.contains("id"));
        assert!(rendered.contains("alice"));
        assert!(rendered.contains("(2 rows)"));
    }

    #[test]
    fn long_values_are_truncated_with_ellipsis() {
        let long = "x".repeat(100);
        assert_eq!(truncate(&long, 10).len(), 10);
        assert!(truncate(&long, 10).ends_with("..."));
        assert_eq!(truncate("short", 10), "short");
    }

    #[test]
    fn widths_track_the_widest_cell_up_to_the_cap() {
        let widths = column_widths(
            &strings(&["a"]),
            &[strings(&["12345"]), strings(&[&"y".repeat(200)])],
        );
        assert_eq!(widths, vec![MAX_COLUMN_WIDTH]);
    }
}
