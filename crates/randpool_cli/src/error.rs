//! CLI error types.

use randpool_core::{ConfigError, RandPoolError};
use thiserror::Error;

/// Result alias for CLI commands.
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors surfaced by `randpool` commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Entropy or pool failure. Fatal.
    #[error("Generator pool error: {0}")]
    Pool(#[from] RandPoolError),

    /// Invalid configuration file or value.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Invalid command line argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A draw fell outside [0, 1).
    #[error("Draw out of range: {0} draws outside [0, 1)")]
    OutOfRange(usize),
}
