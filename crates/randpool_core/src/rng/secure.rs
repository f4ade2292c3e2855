//! Generator that reads secure entropy on every refill.

use std::fmt;

use rand::{CryptoRng, RngCore};

use crate::seed::{SecureSeedSource, SEED_BYTES};

/// A generator whose every 64-bit output word is a fresh secure seed.
///
/// There is no internal state to predict: each refill is one
/// [`SecureSeedSource::next_seed`] call.
///
/// # Panics
///
/// The infallible [`RngCore`] methods panic if the entropy source fails,
/// matching [`rand::rngs::OsRng`]. Use [`try_fill_bytes`](RngCore::try_fill_bytes)
/// to observe the error instead.
#[derive(Clone)]
pub struct ContinuousSecureRng {
    seeds: SecureSeedSource,
}

impl ContinuousSecureRng {
    /// Creates a generator drawing from `seeds`.
    pub fn new(seeds: SecureSeedSource) -> Self {
        Self { seeds }
    }

    fn try_next_u64(&self) -> Result<u64, rand::Error> {
        self.seeds
            .next_seed()
            .map(|seed| seed.as_u64())
            .map_err(rand::Error::new)
    }
}

impl RngCore for ContinuousSecureRng {
    fn next_u32(&mut self) -> u32 {
        self.next_u64() as u32
    }

    fn next_u64(&mut self) -> u64 {
        match self.try_next_u64() {
            Ok(value) => value,
            Err(e) => panic!("secure entropy unavailable: {}", e),
        }
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        if let Err(e) = self.try_fill_bytes(dest) {
            panic!("secure entropy unavailable: {}", e);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        for chunk in dest.chunks_mut(SEED_BYTES) {
            let word = self.try_next_u64()?.to_le_bytes();
            chunk.copy_from_slice(&word[..chunk.len()]);
        }
        Ok(())
    }
}

impl CryptoRng for ContinuousSecureRng {}

impl fmt::Debug for ContinuousSecureRng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContinuousSecureRng").finish_non_exhaustive()
    }
}
