//! The interactive read loop.
//!
//! Input dispatch: `?question` goes through translation, `\`-prefixed words
//! are meta-commands, anything else is executed as SQL verbatim. Every error
//! is rendered and the loop keeps going; only `\q`, `exit`, `quit` or EOF
//! end the session.

use crate::application::translate::translate_question;
use crate::domain::error::NlqError;
use crate::domain::model::{EntryKind, ProviderKind};
use crate::infrastructure::storage::postgres;
use crate::presentation::table;
use crate::state::AppState;
use chrono::Local;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::time::Duration;

const HISTORY_DISPLAY_LIMIT: usize = 10;

pub async fn run(state: &AppState) -> anyhow::Result<()> {
    let mut rl = DefaultEditor::new()?;

    println!(
        "{}",
        "Welcome to nlq - PostgreSQL with natural language.".green().bold()
    );
    println!("Backend: {}", state.backend.describe());
    println!("Enter SQL, a natural-language question, or a command:");
    println!("  {} - Quit", "\\q".blue());
    println!("  {} - Show query history", "\\h".blue());
    println!("  {} - Clear screen", "\\c".blue());
    println!("\nTip: start your input with '?' to ask in plain language\n");

    loop {
        let line = match rl.readline(" > ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        };

        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        rl.add_history_entry(input).ok();

        match input.to_lowercase().as_str() {
            "\\q" | "quit" | "exit" => break,
            "\\h" | "history" => {
                show_history(state).await;
                continue;
            }
            "\\c" | "clear" => {
                clear_screen();
                continue;
            }
            other if other.starts_with('\\') => {
                println!(
                    "{}",
                    format!("Unknown command '{}'. Available: \\q, \\h, \\c", input).yellow()
                );
                continue;
            }
            _ => {}
        }

        if let Some(question) = input.strip_prefix('?') {
            let question = question.trim();
            if question.is_empty() {
                println!("{}", "Usage: ?<your question>".yellow());
                continue;
            }
            state.history.record(EntryKind::Nl, question).await;
            handle_question(state, &mut rl, question).await;
        } else {
            state.history.record(EntryKind::Sql, input).await;
            execute_and_render(state, input).await;
        }
    }

    println!("\nGoodbye!");
    Ok(())
}

/// Translate, show the SQL, confirm, execute.
async fn handle_question(state: &AppState, rl: &mut DefaultEditor, question: &str) {
    let spinner = thinking_spinner();
    let translated = translate_question(state, question).await;
    spinner.finish_and_clear();

    let sql = match translated {
        Ok(sql) => sql,
        Err(err) => {
            report(state, &err, None);
            return;
        }
    };

    println!("{}", "Generated SQL:".blue().bold());
    println!("{}\n", sql.cyan());

    if confirm(rl, "Execute this SQL query? [y/N] ") {
        execute_and_render(state, &sql).await;
    }
}

async fn execute_and_render(state: &AppState, sql: &str) {
    match postgres::execute(&state.db, sql).await {
        Ok(output) => {
            print!("{}", table::render(&output));
            println!("{}", "Query executed successfully".dimmed());
        }
        Err(err) => report(state, &err, Some(sql)),
    }
}

/// Render an error at the shell boundary. Nothing here aborts the session.
fn report(state: &AppState, err: &NlqError, sql: Option<&str>) {
    match err {
        NlqError::BackendUnavailable(detail) => {
            println!("{}", format!("Backend unavailable: {}", detail).red());
            if state.config.provider.kind == ProviderKind::Ollama {
                println!(
                    "{}",
                    format!(
                        "Is the local model server running at {}?",
                        state.config.provider.ollama_url
                    )
                    .yellow()
                );
            }
        }
        NlqError::NoStatementFound { raw } => {
            println!(
                "{}",
                "Could not find a SQL statement in the model output:".red()
            );
            println!("{}", raw.dimmed());
            println!("{}", "Try rephrasing your question.".yellow());
        }
        NlqError::Database(db_err) => {
            println!("{}", format!("Error executing query: {}", db_err).red());
            if let Some(sql) = sql {
                println!("{} {}", "Statement was:".yellow(), sql);
            }
        }
        other => println!("{}", format!("Error: {}", other).red()),
    }
}

async fn show_history(state: &AppState) {
    let entries = state.history.recent(HISTORY_DISPLAY_LIMIT).await;
    if entries.is_empty() {
        println!("{}", "No query history found".yellow());
        return;
    }

    let columns = vec![
        "Timestamp".to_string(),
        "Kind".to_string(),
        "Input".to_string(),
    ];
    let rows: Vec<Vec<String>> = entries
        .iter()
        .map(|e| {
            vec![
                e.timestamp
                    .with_timezone(&Local)
                    .format("%Y-%m-%d %H:%M:%S")
                    .to_string(),
                e.kind.as_str().to_string(),
                e.text.clone(),
            ]
        })
        .collect();

    println!("{}", "Recent query history:".bold());
    print!("{}", table::render_grid(&columns, &rows));
}

fn confirm(rl: &mut DefaultEditor, prompt: &str) -> bool {
    match rl.readline(prompt) {
        Ok(answer) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
        Err(_) => false,
    }
}

fn thinking_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("Thinking...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

fn clear_screen() {
    // ANSI: clear screen, cursor to top-left.
    print!("\x1B[2J\x1B[1;1H");
    use std::io::Write;
    std::io::stdout().flush().ok();
}
