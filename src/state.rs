use crate::domain::error::NlqError;
use crate::domain::model::Example;
use crate::domain::traits::CompletionBackend;
use crate::infrastructure::config::Config;
use crate::infrastructure::network::backend_from_config;
use crate::infrastructure::storage::history::HistoryStore;
use reqwest::Client;
use sqlx::PgPool;
use std::time::Duration;

/// Everything a session needs, built once at startup. The configuration and
/// the selected backend never change for the lifetime of the process.
pub struct AppState {
    pub db: PgPool,
    pub backend: Box<dyn CompletionBackend>,
    pub examples: Vec<Example>,
    pub history: HistoryStore,
    pub config: Config,
}

impl AppState {
    pub fn new(db: PgPool, examples: Vec<Example>, config: Config) -> Result<Self, NlqError> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.llm_timeout_secs))
            .connect_timeout(Duration::from_secs(5))
            .user_agent(concat!("nlq/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let backend = backend_from_config(http_client, &config.provider)?;

        Ok(Self {
            db,
            backend,
            examples,
            history: HistoryStore::default_location(),
            config,
        })
    }
}
