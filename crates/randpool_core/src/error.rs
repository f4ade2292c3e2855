//! Error types for the generator pool.
//!
//! Entropy failures are fatal by contract: callers receive them as values and
//! are expected to stop, never to retry or substitute weaker randomness.

use thiserror::Error;

/// Convenience result alias for pool operations.
pub type Result<T> = std::result::Result<T, RandPoolError>;

/// Errors raised by seeding and pool construction.
#[derive(Debug, Error)]
pub enum RandPoolError {
    /// The entropy facility returned fewer bytes than a seed needs.
    #[error("Entropy unavailable: requested {requested} bytes, read {read}")]
    EntropyUnavailable {
        /// Bytes required for one seed.
        requested: usize,
        /// Bytes actually returned by the read.
        read: usize,
    },

    /// The entropy facility failed outright.
    #[error("Entropy read failed: {0}")]
    EntropyRead(String),

    /// Invalid pool configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl RandPoolError {
    /// Returns `true` for the entropy failure family.
    ///
    /// These indicate a broken runtime environment and must not be retried.
    pub fn is_entropy_failure(&self) -> bool {
        matches!(
            self,
            Self::EntropyUnavailable { .. } | Self::EntropyRead(_)
        )
    }
}

/// Configuration error for [`PoolConfig`](crate::config::PoolConfig) and the
/// string forms of its fields.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid seeding strategy: {0}. Must be one of: standard, continuous-secure")]
    InvalidStrategy(String),

    #[error("Invalid prefill count {0}: must be at most {max}", max = crate::config::MAX_PREFILL)]
    InvalidPrefill(usize),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Configuration file error: {0}")]
    FileError(String),
}
