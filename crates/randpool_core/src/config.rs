//! Generator pool configuration.
//!
//! [`PoolConfig`] is built either through [`PoolConfigBuilder`] or from a
//! TOML table:
//!
//! ```toml
//! strategy = "continuous-secure"
//! prefill = 8
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::rng::SeedingStrategy;

/// Maximum number of instances built eagerly at pool construction.
pub const MAX_PREFILL: usize = 65_536;

/// Generator pool configuration.
///
/// # Examples
///
/// ```rust
/// use randpool_core::{PoolConfig, SeedingStrategy};
///
/// let config = PoolConfig::builder()
///     .strategy(SeedingStrategy::ContinuousSecure)
///     .prefill(4)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.strategy(), SeedingStrategy::ContinuousSecure);
/// assert_eq!(config.prefill(), 4);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PoolConfig {
    /// Seeding strategy for every instance the pool builds.
    strategy: SeedingStrategy,
    /// Idle instances built up front.
    prefill: usize,
}

impl PoolConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> PoolConfigBuilder {
        PoolConfigBuilder::default()
    }

    /// Returns the seeding strategy.
    #[inline]
    pub fn strategy(&self) -> SeedingStrategy {
        self.strategy
    }

    /// Returns the number of instances built up front.
    #[inline]
    pub fn prefill(&self) -> usize {
        self.prefill
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPrefill`] if `prefill` exceeds
    /// [`MAX_PREFILL`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.prefill > MAX_PREFILL {
            return Err(ConfigError::InvalidPrefill(self.prefill));
        }
        Ok(())
    }

    /// Parses and validates a configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: PoolConfig = toml::from_str(content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("Failed to read config file: {}", e)))?;
        Self::from_toml_str(&content)
    }
}

/// Builder for [`PoolConfig`], validating at build time.
#[derive(Clone, Debug, Default)]
pub struct PoolConfigBuilder {
    strategy: Option<SeedingStrategy>,
    prefill: Option<usize>,
}

impl PoolConfigBuilder {
    /// Sets the seeding strategy (default: [`SeedingStrategy::Standard`]).
    #[inline]
    pub fn strategy(mut self, strategy: SeedingStrategy) -> Self {
        self.strategy = Some(strategy);
        self
    }

    /// Sets the number of instances built up front (default: 0).
    #[inline]
    pub fn prefill(mut self, prefill: usize) -> Self {
        self.prefill = Some(prefill);
        self
    }

    /// Builds and validates the configuration.
    ///
    /// # Errors
    ///
    /// See [`PoolConfig::validate`].
    pub fn build(self) -> Result<PoolConfig, ConfigError> {
        let config = PoolConfig {
            strategy: self.strategy.unwrap_or_default(),
            prefill: self.prefill.unwrap_or(0),
        };
        config.validate()?;
        Ok(config)
    }
}
