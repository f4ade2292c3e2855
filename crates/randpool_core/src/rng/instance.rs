//! Pooled generator instance.

use std::fmt;

use rand::{Rng, RngCore, SeedableRng};
use rand_distr::{Distribution, StandardNormal};
use rand_pcg::Pcg64;

use super::secure::ContinuousSecureRng;
use super::strategy::SeedingStrategy;
use crate::seed::{SecureSeedSource, Seed};

enum Engine {
    Standard(Pcg64),
    ContinuousSecure(ContinuousSecureRng),
}

/// A generator owned by a [`GeneratorPool`](crate::generator::GeneratorPool).
///
/// Not safe for concurrent mutation; the pool guarantees that only one caller
/// holds a given instance at a time. Implements [`RngCore`], so every
/// [`rand::Rng`] method is available in addition to the helpers below.
///
/// # Examples
///
/// ```rust
/// use randpool_core::{GeneratorPool, SeedingStrategy};
///
/// let pool = GeneratorPool::new(SeedingStrategy::Standard);
/// let mut rng = pool.checkout().unwrap();
///
/// let u = rng.gen_uniform();
/// assert!((0.0..1.0).contains(&u));
///
/// let mut buffer = vec![0.0; 16];
/// rng.fill_normal(&mut buffer);
/// ```
pub struct PoolRng {
    id: u64,
    seed: Option<Seed>,
    engine: Engine,
}

impl PoolRng {
    /// Builds a PCG-64 instance from one secure seed.
    pub(crate) fn standard(id: u64, seed: Seed) -> Self {
        Self {
            id,
            seed: Some(seed),
            engine: Engine::Standard(Pcg64::seed_from_u64(seed.as_u64())),
        }
    }

    /// Builds an instance that reads secure entropy on every refill.
    pub(crate) fn continuous_secure(id: u64, seeds: SecureSeedSource) -> Self {
        Self {
            id,
            seed: None,
            engine: Engine::ContinuousSecure(ContinuousSecureRng::new(seeds)),
        }
    }

    /// Returns the identifier assigned by the owning pool.
    ///
    /// Identifiers are unique within one pool.
    #[inline]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Returns the construction seed, or `None` for continuous secure
    /// instances.
    #[inline]
    pub fn seed(&self) -> Option<Seed> {
        self.seed
    }

    /// Returns the strategy this instance was built with.
    pub fn strategy(&self) -> SeedingStrategy {
        match self.engine {
            Engine::Standard(_) => SeedingStrategy::Standard,
            Engine::ContinuousSecure(_) => SeedingStrategy::ContinuousSecure,
        }
    }

    /// Generates a single uniform value in [0, 1).
    #[inline]
    pub fn gen_uniform(&mut self) -> f64 {
        self.gen()
    }

    /// Generates a single standard normal variate (mean=0, std=1).
    #[inline]
    pub fn gen_normal(&mut self) -> f64 {
        StandardNormal.sample(&mut *self)
    }

    /// Fills the buffer with uniform values in [0, 1).
    ///
    /// Empty buffers are a no-op.
    pub fn fill_uniform(&mut self, buffer: &mut [f64]) {
        for value in buffer.iter_mut() {
            *value = self.gen();
        }
    }

    /// Fills the buffer with standard normal variates.
    pub fn fill_normal(&mut self, buffer: &mut [f64]) {
        for value in buffer.iter_mut() {
            *value = StandardNormal.sample(&mut *self);
        }
    }
}

impl RngCore for PoolRng {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        match &mut self.engine {
            Engine::Standard(rng) => rng.next_u32(),
            Engine::ContinuousSecure(rng) => rng.next_u32(),
        }
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        match &mut self.engine {
            Engine::Standard(rng) => rng.next_u64(),
            Engine::ContinuousSecure(rng) => rng.next_u64(),
        }
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        match &mut self.engine {
            Engine::Standard(rng) => rng.fill_bytes(dest),
            Engine::ContinuousSecure(rng) => rng.fill_bytes(dest),
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        match &mut self.engine {
            Engine::Standard(rng) => rng.try_fill_bytes(dest),
            Engine::ContinuousSecure(rng) => rng.try_fill_bytes(dest),
        }
    }
}

impl fmt::Debug for PoolRng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Generator state stays out of logs.
        f.debug_struct("PoolRng")
            .field("id", &self.id)
            .field("strategy", &self.strategy())
            .finish_non_exhaustive()
    }
}
