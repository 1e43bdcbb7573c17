use thiserror::Error;

use trace_combo_core::api::{CommandError, ToolFailure, ValidationError};

#[derive(Debug, Error)]
pub enum CliError {
    #[error("config: {0:#}")]
    Config(anyhow::Error),

    #[error("invalid request: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Capture(#[from] ToolFailure),

    #[error(transparent)]
    Command(#[from] CommandError),

    #[error("logging setup: {0}")]
    Logging(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
