// core/src/errors/validation_error.rs
use thiserror::Error;

/// Request-level problems detected before any subprocess is started.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("no device selected")]
    NoDevice,

    #[error("select at least one tool")]
    NoToolsEnabled,

    #[error("unknown tool: {0}")]
    UnknownTool(String),

    #[error("timed captures need a duration of at least one second")]
    ZeroDuration,
}
