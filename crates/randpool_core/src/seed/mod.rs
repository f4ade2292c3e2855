//! Secure seed generation.
//!
//! [`SecureSeedSource`] turns exactly one read from an [`EntropySource`] into
//! a 64-bit [`Seed`]. The default source is the operating system CSPRNG
//! ([`OsEntropy`]).
//!
//! A short read is never padded and a failed read is never retried: both
//! surface as [`RandPoolError`] so the caller can stop.
//!
//! # Example
//!
//! ```rust
//! use randpool_core::seed::SecureSeedSource;
//!
//! let seeds = SecureSeedSource::os();
//! let a = seeds.next_seed().unwrap();
//! let b = seeds.next_seed().unwrap();
//! assert_ne!(a, b);
//! ```

use std::fmt;
use std::sync::Arc;

use rand::rngs::OsRng;
use rand::RngCore;

use crate::error::{RandPoolError, Result};

/// Number of entropy bytes consumed per seed.
pub const SEED_BYTES: usize = 8;

/// A 64-bit seed for PRNG construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Seed(u64);

impl Seed {
    /// Decodes a seed from little-endian bytes.
    #[inline]
    pub fn from_le_bytes(bytes: [u8; SEED_BYTES]) -> Self {
        Self(u64::from_le_bytes(bytes))
    }

    /// Returns the seed as an unsigned integer.
    #[inline]
    pub fn as_u64(self) -> u64 {
        self.0
    }

    /// Returns the seed reinterpreted as a signed integer.
    #[inline]
    pub fn as_i64(self) -> i64 {
        self.0 as i64
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}

/// A process-wide source of cryptographically secure bytes.
///
/// `read` reports how many bytes it wrote so that a short read is visible to
/// the caller instead of being silently zero-padded. Implementations are
/// shared across threads without extra locking.
pub trait EntropySource: Send + Sync {
    /// Fills as much of `buf` as possible and returns the number of bytes
    /// written.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying facility fails.
    fn read(&self, buf: &mut [u8]) -> Result<usize>;
}

/// Operating system entropy via `getrandom` (through [`OsRng`]).
#[derive(Clone, Copy, Debug, Default)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn read(&self, buf: &mut [u8]) -> Result<usize> {
        OsRng
            .try_fill_bytes(buf)
            .map_err(|e| RandPoolError::EntropyRead(e.to_string()))?;
        Ok(buf.len())
    }
}

/// Produces fresh seeds, one entropy read per seed.
///
/// Cloning is cheap and shares the underlying [`EntropySource`].
#[derive(Clone)]
pub struct SecureSeedSource {
    source: Arc<dyn EntropySource>,
}

impl SecureSeedSource {
    /// Creates a seed source backed by the given entropy source.
    pub fn new(source: Arc<dyn EntropySource>) -> Self {
        Self { source }
    }

    /// Creates a seed source backed by the operating system CSPRNG.
    pub fn os() -> Self {
        Self::new(Arc::new(OsEntropy))
    }

    /// Reads exactly [`SEED_BYTES`] bytes and decodes them little-endian.
    ///
    /// # Errors
    ///
    /// - [`RandPoolError::EntropyUnavailable`] on a short read
    /// - [`RandPoolError::EntropyRead`] if the facility fails
    pub fn next_seed(&self) -> Result<Seed> {
        let mut buf = [0u8; SEED_BYTES];
        let read = self.source.read(&mut buf).inspect_err(|e| {
            tracing::error!(error = %e, "secure entropy read failed");
        })?;

        if read != SEED_BYTES {
            tracing::error!(
                requested = SEED_BYTES,
                read,
                "short read from secure entropy source"
            );
            return Err(RandPoolError::EntropyUnavailable {
                requested: SEED_BYTES,
                read,
            });
        }

        Ok(Seed::from_le_bytes(buf))
    }
}

impl Default for SecureSeedSource {
    fn default() -> Self {
        Self::os()
    }
}

impl fmt::Debug for SecureSeedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecureSeedSource").finish_non_exhaustive()
    }
}
