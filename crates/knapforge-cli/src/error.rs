//! CLI-level errors

use std::path::PathBuf;

use knapforge_config::ConfigError;
use knapforge_core::KnapforgeError;
use thiserror::Error;

use crate::exitcode;

/// Errors reported to the user, each with its own exit code.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Input(#[from] KnapforgeError),

    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("cannot write output: {0}")]
    Write(#[from] std::io::Error),

    #[error("cannot encode output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Usage(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Input(e) if e.is_invalid_input() => exitcode::DATAERR,
            CliError::Input(_) => exitcode::SOFTWARE,
            CliError::Config(_) => exitcode::CONFIG,
            CliError::Read { .. } => exitcode::NOINPUT,
            CliError::Parse { .. } => exitcode::DATAERR,
            CliError::Write(_) => exitcode::IOERR,
            CliError::Json(_) => exitcode::SOFTWARE,
            CliError::Usage(_) => exitcode::USAGE,
        }
    }
}
