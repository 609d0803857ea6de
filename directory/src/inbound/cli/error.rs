//! Errors surfaced by command dispatch.

use std::io;

use thiserror::Error;

use crate::domain::UserIdError;

/// Failure of one CLI command.
#[derive(Debug, Error)]
pub enum CliError {
    /// A fetch ended in the failed state.
    #[error("failed to load users: {message}")]
    Fetch { message: String },
    #[error(transparent)]
    InvalidId(#[from] UserIdError),
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
    #[error("failed to encode user: {0}")]
    Json(#[from] serde_json::Error),
}
