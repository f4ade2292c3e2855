//! Pool of securely seeded generators.
//!
//! [`GeneratorPool`] combines the generic [`ObjectPool`] with a
//! [`SeedingStrategy`] and a [`SecureSeedSource`]. Every instance it ever
//! holds is built by [`GeneratorPool::checkout`] or
//! [`GeneratorPool::prefill`] with the pool's own strategy.
//!
//! # Thread Safety
//!
//! `GeneratorPool` is `Send + Sync` and is meant to be shared by reference or
//! through an `Arc`. The generators themselves are not shared: a checked-out
//! [`PooledRng`] belongs to one caller until it is dropped.
//!
//! # Example
//!
//! ```rust
//! use randpool_core::{GeneratorPool, SeedingStrategy};
//!
//! let pool = GeneratorPool::new(SeedingStrategy::Standard);
//!
//! std::thread::scope(|s| {
//!     for _ in 0..4 {
//!         s.spawn(|| {
//!             let mut rng = pool.checkout().unwrap();
//!             let u = rng.gen_uniform();
//!             assert!((0.0..1.0).contains(&u));
//!         });
//!     }
//! });
//!
//! assert!(pool.stats().created <= 4);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

use crate::config::PoolConfig;
use crate::error::Result;
use crate::pool::{ObjectPool, PoolStats, Pooled};
use crate::rng::{PoolRng, SeedingStrategy};
use crate::seed::SecureSeedSource;

/// A generator checked out of a [`GeneratorPool`]; returns to the pool on drop.
pub type PooledRng<'a> = Pooled<'a, PoolRng>;

/// A concurrency-safe, unbounded pool of [`PoolRng`] instances.
#[derive(Debug)]
pub struct GeneratorPool {
    strategy: SeedingStrategy,
    seeds: SecureSeedSource,
    idle: ObjectPool<PoolRng>,
    next_id: AtomicU64,
}

impl GeneratorPool {
    /// Creates an empty pool seeded from the operating system CSPRNG.
    pub fn new(strategy: SeedingStrategy) -> Self {
        Self::with_seed_source(strategy, SecureSeedSource::os())
    }

    /// Creates an empty pool seeded from `seeds`.
    pub fn with_seed_source(strategy: SeedingStrategy, seeds: SecureSeedSource) -> Self {
        Self {
            strategy,
            seeds,
            idle: ObjectPool::new(),
            next_id: AtomicU64::new(0),
        }
    }

    /// Creates a pool from a validated configuration, prefilling it if asked.
    ///
    /// # Errors
    ///
    /// Returns a configuration error, or an entropy error raised while
    /// prefilling.
    pub fn from_config(config: &PoolConfig) -> Result<Self> {
        config.validate()?;
        let pool = Self::new(config.strategy());
        pool.prefill(config.prefill())?;
        Ok(pool)
    }

    /// Returns the seeding strategy fixed at construction.
    #[inline]
    pub fn strategy(&self) -> SeedingStrategy {
        self.strategy
    }

    /// Checks out a generator for exclusive use.
    ///
    /// An idle instance is reused when available; otherwise a fresh one is
    /// built outside the pool lock. The pool never runs out.
    ///
    /// # Errors
    ///
    /// Only fails when a fresh instance cannot be seeded. Entropy failures
    /// are fatal and should not be retried.
    pub fn checkout(&self) -> Result<PooledRng<'_>> {
        self.idle.try_get_or_create(|| self.build())
    }

    /// Hands a generator back to the idle set.
    ///
    /// Only needed for instances taken out with [`Pooled::detach`]; a
    /// [`PooledRng`] returns itself on drop. Returning a foreign instance or
    /// the same instance twice is not detected.
    pub fn put_back(&self, rng: PoolRng) {
        self.idle.put(rng);
    }

    /// Builds `count` instances and places them in the idle set.
    ///
    /// # Errors
    ///
    /// Stops at the first entropy failure; instances built before it stay
    /// in the pool.
    pub fn prefill(&self, count: usize) -> Result<()> {
        for _ in 0..count {
            let rng = self.build()?;
            self.idle.seed_idle(rng);
        }
        if count > 0 {
            tracing::debug!(count, strategy = %self.strategy, "prefilled generator pool");
        }
        Ok(())
    }

    /// Returns a snapshot of pool statistics.
    pub fn stats(&self) -> PoolStats {
        self.idle.stats()
    }

    fn build(&self) -> Result<PoolRng> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let rng = match self.strategy {
            SeedingStrategy::Standard => PoolRng::standard(id, self.seeds.next_seed()?),
            SeedingStrategy::ContinuousSecure => PoolRng::continuous_secure(id, self.seeds.clone()),
        };
        tracing::debug!(id, strategy = %self.strategy, "constructed pooled generator");
        Ok(rng)
    }
}

impl Default for GeneratorPool {
    fn default() -> Self {
        Self::new(SeedingStrategy::default())
    }
}
