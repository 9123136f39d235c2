use std::io;
use thiserror::Error;

use crate::config::settings::ConfigError;

/// Errors that can occur while driving the git executable
///
/// A git command that runs and exits nonzero is not an error: client
/// operations report it as `false` or `None`. These variants cover the
/// cases where a command could not be run or its result not rendered.
#[derive(Debug, Error)]
pub enum GitError {
    #[error("Failed to execute {program}: {source}")]
    SpawnFailed {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("Empty command")]
    EmptyCommand,

    #[error("Failed to parse git output: {0}")]
    ParseError(String),

    #[error("Invalid date format: {0}")]
    InvalidDateFormat(String),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
}

/// Top-level error that wraps all module-specific errors
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Git error: {0}")]
    Git(#[from] GitError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for git operations
pub type Result<T> = std::result::Result<T, GitError>;

/// Result type for application-level operations
pub type AppResult<T> = std::result::Result<T, AppError>;
