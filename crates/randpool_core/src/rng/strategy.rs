//! Seeding strategy selected at pool construction.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::ConfigError;

/// How a [`GeneratorPool`](crate::generator::GeneratorPool) seeds the
/// instances it builds.
///
/// The choice is fixed for the lifetime of a pool.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum SeedingStrategy {
    /// One secure seed per instance, then a fast PCG-64 stream.
    ///
    /// Statistically random output, but not adversary-resistant after
    /// construction.
    #[default]
    Standard,

    /// Every 64-bit output word is a fresh read from the secure seed source.
    ///
    /// Much slower; opt in only when every output must be unpredictable.
    ContinuousSecure,
}

impl SeedingStrategy {
    /// Returns the canonical configuration name.
    pub fn as_str(&self) -> &'static str {
        match self {
            SeedingStrategy::Standard => "standard",
            SeedingStrategy::ContinuousSecure => "continuous-secure",
        }
    }
}

impl FromStr for SeedingStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "standard" => Ok(SeedingStrategy::Standard),
            "continuous-secure" | "continuous" | "secure" => Ok(SeedingStrategy::ContinuousSecure),
            _ => Err(ConfigError::InvalidStrategy(s.to_string())),
        }
    }
}

impl TryFrom<String> for SeedingStrategy {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for SeedingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
