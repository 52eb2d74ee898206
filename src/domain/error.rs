use thiserror::Error;

#[derive(Error, Debug)]
pub enum NlqError {
    #[error("Provider misconfigured: {0}")]
    MisconfiguredProvider(String),

    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("Backend rejected request (HTTP {status}): {message}")]
    BackendRejected { status: u16, message: String },

    #[error("No SQL statement found in model output")]
    NoStatementFound { raw: String },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for NlqError {
    // Connect and timeout failures mean the backend never answered;
    // anything else came from a server that did respond.
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            NlqError::BackendUnavailable(err.to_string())
        } else {
            NlqError::BackendRejected {
                status: err.status().map(|s| s.as_u16()).unwrap_or(0),
                message: err.to_string(),
            }
        }
    }
}
