//! Query execution against PostgreSQL.
//!
//! The generated (or hand-typed) SQL passes through unmodified: no
//! rewriting, no parameter binding, no silent retry. Failures surface as
//! [`NlqError::Database`] and the shell shows them next to the statement
//! that was attempted.

use crate::domain::error::NlqError;
use crate::domain::model::QueryOutput;
use crate::infrastructure::config::DatabaseConfig;
use sqlx::postgres::{PgColumn, PgPool, PgPoolOptions, PgRow};
use sqlx::{Column, Row, TypeInfo, ValueRef};
use std::fmt::Write;
use std::time::Duration;
use tracing::debug;

pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, NlqError> {
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .connect(&config.connection_string())
        .await?;
    Ok(pool)
}

pub async fn execute(pool: &PgPool, sql: &str) -> Result<QueryOutput, NlqError> {
    let sql = sql.trim();
    debug!(%sql, "executing statement");

    if is_row_returning(sql) {
        let rows = sqlx::query(sql).fetch_all(pool).await?;

        let columns = match rows.first() {
            Some(row) => row
                .columns()
                .iter()
                .map(|c| c.name().to_string())
                .collect(),
            None => Vec::new(),
        };
        let rows = rows.iter().map(decode_row).collect();

        Ok(QueryOutput::Rows { columns, rows })
    } else {
        let result = sqlx::query(sql).execute(pool).await?;
        Ok(QueryOutput::Affected(result.rows_affected()))
    }
}

fn is_row_returning(sql: &str) -> bool {
    let lower = sql.trim_start().to_lowercase();
    lower.starts_with("select") || lower.starts_with("with") || has_returning_clause(&lower)
}

/// True only for the RETURNING keyword as its own word; identifiers like
/// `returning_log` must not route a plain INSERT through fetch_all.
fn has_returning_clause(lower: &str) -> bool {
    lower
        .split(|c: char| !c.is_ascii_alphanumeric() && c != '_')
        .any(|word| word == "returning")
}

fn decode_row(row: &PgRow) -> Vec<String> {
    row.columns()
        .iter()
        .enumerate()
        .map(|(i, column)| decode_cell(row, column, i))
        .collect()
}

/// Render one cell as display text. Postgres can hand most types over as
/// text; the remainder get typed fallbacks keyed on the column's type name.
fn decode_cell(row: &PgRow, column: &PgColumn, index: usize) -> String {
    match row.try_get_raw(index) {
        Ok(raw) if raw.is_null() => return "NULL".to_string(),
        Ok(_) => {}
        Err(_) => return "?".to_string(),
    }

    if let Ok(v) = row.try_get::<String, _>(index) {
        return v;
    }

    match column.type_info().name() {
        "BOOL" => try_display::<bool>(row, index),
        "INT2" => try_display::<i16>(row, index),
        "INT4" => try_display::<i32>(row, index),
        "INT8" => try_display::<i64>(row, index),
        "FLOAT4" => try_display::<f32>(row, index),
        "FLOAT8" => try_display::<f64>(row, index),
        "NUMERIC" => try_display::<rust_decimal::Decimal>(row, index),
        "TIMESTAMP" => try_display::<chrono::NaiveDateTime>(row, index),
        "TIMESTAMPTZ" => try_display::<chrono::DateTime<chrono::Utc>>(row, index),
        "DATE" => try_display::<chrono::NaiveDate>(row, index),
        other => format!("<{}>", other.to_lowercase()),
    }
}

fn try_display<'r, T>(row: &'r PgRow, index: usize) -> String
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres> + std::fmt::Display,
{
    row.try_get::<T, _>(index)
        .map(|v| v.to_string())
        .unwrap_or_else(|_| "?".to_string())
}

/// Summarize `information_schema` into a prompt-sized schema description.
/// Any failure degrades to `None`; translation still works, just blind.
pub async fn schema_hint(pool: &PgPool) -> Option<String> {
    let rows = sqlx::query(
        r#"
        SELECT table_name,
               string_agg(column_name || ' ' || data_type, ', ' ORDER BY ordinal_position)
        FROM information_schema.columns
        WHERE table_schema = 'public'
        GROUP BY table_name
        ORDER BY table_name
        "#,
    )
    .fetch_all(pool)
    .await
    .ok()?;

    if rows.is_empty() {
        return None;
    }

    let mut hint = String::from("Database Schema:\n");
    for row in &rows {
        let table: String = row.try_get(0).ok()?;
        let columns: String = row.try_get(1).ok()?;
        writeln!(hint, "\nTable: {}", table).ok();
        writeln!(hint, "Columns: {}", columns).ok();
    }
    Some(hint)
}
