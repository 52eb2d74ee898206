use chrono::Local;
use clap::Parser;
use colored::Colorize;
use nlq::domain::model::{EntryKind, QueryOutput};
use nlq::infrastructure::config::load_config;
use nlq::infrastructure::storage::{examples, postgres};
use nlq::interfaces::cli::Cli;
use nlq::interfaces::shell;
use nlq::presentation::table;
use nlq::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let cli = Cli::parse();

    // Startup configuration failures exit non-zero before anything runs.
    let config = match load_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err.to_string().red());
            std::process::exit(1);
        }
    };

    let db = match postgres::connect(&config.database).await {
        Ok(pool) => pool,
        Err(err) => {
            eprintln!("{}", format!("Failed to connect to database: {}", err).red());
            std::process::exit(1);
        }
    };

    let loaded = examples::load(&config.examples_file).await;
    if loaded.is_empty() {
        eprintln!("{}", "No query examples loaded".yellow());
    } else {
        eprintln!("{}", format!("Loaded {} query examples", loaded.len()).green());
    }

    let state = match AppState::new(db, loaded, config) {
        Ok(state) => state,
        Err(err) => {
            eprintln!("{}", err.to_string().red());
            std::process::exit(1);
        }
    };

    if let Some(sql) = cli.sql.as_deref() {
        run_once(&state, sql, cli.save).await;
        return Ok(());
    }

    shell::run(&state).await
}

/// One-shot mode: execute the given SQL, print the table, optionally save
/// the results as JSON.
async fn run_once(state: &AppState, sql: &str, save: bool) {
    state.history.record(EntryKind::Sql, sql).await;

    match postgres::execute(&state.db, sql).await {
        Ok(output) => {
            print!("{}", table::render(&output));
            if save {
                save_results(&output);
            }
        }
        Err(err) => {
            eprintln!("{}", format!("Error executing query: {}", err).red());
            std::process::exit(1);
        }
    }
}

fn save_results(output: &QueryOutput) {
    let filename = format!(
        "query_results_{}.json",
        Local::now().format("%Y%m%d_%H%M%S")
    );
    match serde_json::to_string_pretty(output)
        .map_err(anyhow::Error::from)
        .and_then(|json| std::fs::write(&filename, json).map_err(anyhow::Error::from))
    {
        Ok(()) => println!("{}", format!("Results saved to {}", filename).green()),
        Err(err) => eprintln!("{}", format!("Failed to save results: {}", err).red()),
    }
}

fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
