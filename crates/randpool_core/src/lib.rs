//! # randpool_core
//!
//! A concurrency-safe pool of pseudo-random number generators, each seeded
//! from the operating system's cryptographically secure entropy source.
//!
//! Many threads can draw random values at once without sharing generator
//! state: a caller checks a generator out, draws, and hands it back. Missing
//! generators are built lazily, outside the pool lock, and seeded securely.
//!
//! ## Module Structure
//!
//! - [`seed`]: [`SecureSeedSource`], 64-bit seeds from secure entropy
//! - [`pool`]: [`ObjectPool`], the generic get-or-create / put-back pool
//! - [`rng`]: [`PoolRng`] and the [`SeedingStrategy`] variants
//! - [`generator`]: [`GeneratorPool`], the seeded generator pool
//! - [`floater`]: [`SingleDrawFloater`], one uniform draw per call
//! - [`config`]: [`PoolConfig`] and its builder
//! - [`error`]: [`RandPoolError`] and [`ConfigError`]
//!
//! ## Usage Example
//!
//! ```rust
//! use randpool_core::{GeneratorPool, SeedingStrategy};
//!
//! let pool = GeneratorPool::new(SeedingStrategy::Standard);
//!
//! {
//!     let mut rng = pool.checkout().expect("secure entropy available");
//!     let u = rng.gen_uniform();
//!     assert!((0.0..1.0).contains(&u));
//!     // `rng` returns to the pool here
//! }
//!
//! assert_eq!(pool.stats().idle, 1);
//! ```
//!
//! ## Failure Model
//!
//! Entropy failures (a failed or short read) are fatal. They surface as
//! [`RandPoolError`] values and are never retried or replaced with weaker
//! seeding.

#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod floater;
pub mod generator;
pub mod pool;
pub mod rng;
pub mod seed;

// Public re-exports
pub use config::PoolConfig;
pub use error::{ConfigError, RandPoolError, Result};
pub use floater::SingleDrawFloater;
pub use generator::{GeneratorPool, PooledRng};
pub use pool::{ObjectPool, PoolStats, Pooled};
pub use rng::{ContinuousSecureRng, PoolRng, SeedingStrategy};
pub use seed::{EntropySource, OsEntropy, SecureSeedSource, Seed};
