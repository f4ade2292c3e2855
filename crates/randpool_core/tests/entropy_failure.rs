//! Entropy failure handling.
//!
//! A short or failed read must never produce a seed or a generator.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use rand::RngCore;
use randpool_core::{
    EntropySource, GeneratorPool, RandPoolError, SecureSeedSource, SeedingStrategy,
    SingleDrawFloater,
};

/// Writes at most `limit` bytes per read and counts the attempts.
struct TruncatingEntropy {
    limit: usize,
    attempts: AtomicUsize,
}

impl TruncatingEntropy {
    fn new(limit: usize) -> Arc<Self> {
        Arc::new(Self {
            limit,
            attempts: AtomicUsize::new(0),
        })
    }
}

impl EntropySource for TruncatingEntropy {
    fn read(&self, buf: &mut [u8]) -> Result<usize, RandPoolError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        let n = buf.len().min(self.limit);
        buf[..n].fill(0x5A);
        Ok(n)
    }
}

struct DeadEntropy;

impl EntropySource for DeadEntropy {
    fn read(&self, _buf: &mut [u8]) -> Result<usize, RandPoolError> {
        Err(RandPoolError::EntropyRead("getrandom unavailable".to_string()))
    }
}

#[test]
fn short_read_fails_seed_generation() {
    let entropy = TruncatingEntropy::new(7);
    let seeds = SecureSeedSource::new(entropy.clone());

    let err = seeds.next_seed().unwrap_err();
    assert!(matches!(
        err,
        RandPoolError::EntropyUnavailable {
            requested: 8,
            read: 7
        }
    ));
    // Exactly one read, no retry.
    assert_eq!(entropy.attempts.load(Ordering::SeqCst), 1);
}

#[test]
fn short_read_fails_checkout() {
    let entropy = TruncatingEntropy::new(0);
    let pool = GeneratorPool::with_seed_source(
        SeedingStrategy::Standard,
        SecureSeedSource::new(entropy.clone()),
    );

    for _ in 0..3 {
        assert!(pool.checkout().unwrap_err().is_entropy_failure());
    }
    assert_eq!(entropy.attempts.load(Ordering::SeqCst), 3);
    assert_eq!(pool.stats().created, 0);
}

#[test]
fn failed_read_fails_prefill_and_facade() {
    let pool = Arc::new(GeneratorPool::with_seed_source(
        SeedingStrategy::Standard,
        SecureSeedSource::new(Arc::new(DeadEntropy)),
    ));
    assert!(pool.prefill(2).unwrap_err().is_entropy_failure());

    let floater = SingleDrawFloater::new(pool);
    let err = floater.float64().unwrap_err();
    assert!(err.to_string().contains("getrandom unavailable"));
}

#[test]
fn continuous_generator_surfaces_failure() {
    let pool = GeneratorPool::with_seed_source(
        SeedingStrategy::ContinuousSecure,
        SecureSeedSource::new(TruncatingEntropy::new(4)),
    );

    // Construction reads nothing; the first refill does.
    let mut rng = pool.checkout().unwrap();
    let mut buf = [0u8; 16];
    assert!(rng.try_fill_bytes(&mut buf).is_err());
}

#[test]
fn continuous_generator_aborts_infallible_draws() {
    let pool = GeneratorPool::with_seed_source(
        SeedingStrategy::ContinuousSecure,
        SecureSeedSource::new(TruncatingEntropy::new(4)),
    );

    let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        let mut rng = pool.checkout().unwrap();
        rng.gen_uniform()
    }));

    assert!(outcome.is_err());
    // The guard still handed the instance back while unwinding.
    assert_eq!(pool.stats().idle, 1);
}
