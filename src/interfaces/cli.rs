use clap::Parser;

#[derive(Parser)]
#[command(name = "nlq")]
#[command(about = "Ask your PostgreSQL database questions in plain language.")]
#[command(version)]
pub struct Cli {
    /// Execute a single SQL statement and exit
    #[arg(short = 's', long)]
    pub sql: Option<String>,

    /// With --sql, also save the results to a JSON file
    #[arg(long)]
    pub save: bool,
}
