//! Concurrency tests for the generator pool.
//!
//! # Test Coverage
//!
//! - Distinct instances under concurrent checkout
//! - Single-threaded reuse never builds a second instance
//! - One entropy read per constructed instance
//! - Coarse uniformity across checkout/return cycles
//! - Many callers cycling checkout → draw → return

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier, Mutex};
use std::thread;

use approx::assert_abs_diff_eq;
use rayon::prelude::*;

use randpool_core::{
    EntropySource, GeneratorPool, OsEntropy, PoolRng, RandPoolError, SecureSeedSource,
    SeedingStrategy,
};

/// OS entropy that counts reads and records each seed it hands out.
#[derive(Default)]
struct RecordingEntropy {
    reads: AtomicUsize,
    seeds: Mutex<Vec<u64>>,
}

impl EntropySource for RecordingEntropy {
    fn read(&self, buf: &mut [u8]) -> Result<usize, RandPoolError> {
        let n = OsEntropy.read(buf)?;
        self.reads.fetch_add(1, Ordering::SeqCst);
        if let Ok(bytes) = <[u8; 8]>::try_from(&buf[..n]) {
            self.seeds.lock().unwrap().push(u64::from_le_bytes(bytes));
        }
        Ok(n)
    }
}

// ============================================================================
// Uniqueness
// ============================================================================

#[test]
fn concurrent_checkouts_are_distinct() {
    const N: usize = 1_000;
    let pool = GeneratorPool::new(SeedingStrategy::Standard);

    // Nothing is returned, so every checkout must build its own instance.
    let held: Vec<PoolRng> = (0..N)
        .into_par_iter()
        .map(|_| pool.checkout().unwrap().detach())
        .collect();

    let ids: HashSet<u64> = held.iter().map(PoolRng::id).collect();
    assert_eq!(ids.len(), N);

    let stats = pool.stats();
    assert_eq!(stats.created, N);
    assert_eq!(stats.reused, 0);
}

#[test]
fn concurrent_checkouts_from_prefilled_pool_are_distinct() {
    const THREADS: usize = 64;
    let pool = GeneratorPool::new(SeedingStrategy::Standard);
    pool.prefill(THREADS / 2).unwrap();

    let barrier = Barrier::new(THREADS);
    let ids = Mutex::new(Vec::new());

    thread::scope(|s| {
        for _ in 0..THREADS {
            s.spawn(|| {
                barrier.wait();
                let rng = pool.checkout().unwrap();
                ids.lock().unwrap().push(rng.id());
                // Hold until every thread has its instance.
                barrier.wait();
            });
        }
    });

    let ids = ids.into_inner().unwrap();
    let unique: HashSet<u64> = ids.iter().copied().collect();
    assert_eq!(unique.len(), THREADS);
    assert_eq!(pool.stats().created, THREADS);
    assert_eq!(pool.stats().idle, THREADS);
}

// ============================================================================
// Reuse
// ============================================================================

#[test]
fn single_threaded_cycles_build_one_instance() {
    let pool = GeneratorPool::new(SeedingStrategy::Standard);

    let first = pool.checkout().unwrap().id();
    for _ in 0..10_000 {
        let mut rng = pool.checkout().unwrap();
        assert_eq!(rng.id(), first);
        let u = rng.gen_uniform();
        assert!((0.0..1.0).contains(&u));
    }

    let stats = pool.stats();
    assert_eq!(stats.created, 1);
    assert_eq!(stats.requests, 10_001);
    assert_eq!(stats.idle, 1);
}

// ============================================================================
// Seed freshness
// ============================================================================

#[test]
fn each_new_instance_reads_a_fresh_seed() {
    let entropy = Arc::new(RecordingEntropy::default());
    let pool = GeneratorPool::with_seed_source(
        SeedingStrategy::Standard,
        SecureSeedSource::new(entropy.clone()),
    );

    let barrier = Barrier::new(2);
    let seeds: Vec<u64> = thread::scope(|s| {
        let handles: Vec<_> = (0..2)
            .map(|_| {
                s.spawn(|| {
                    barrier.wait();
                    let rng = pool.checkout().unwrap();
                    let seed = rng.seed().unwrap().as_u64();
                    // Keep both instances out until both are built.
                    barrier.wait();
                    seed
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(entropy.reads.load(Ordering::SeqCst), 2);
    assert_ne!(seeds[0], seeds[1]);

    let mut recorded = entropy.seeds.lock().unwrap().clone();
    let mut drawn = seeds.clone();
    recorded.sort_unstable();
    drawn.sort_unstable();
    assert_eq!(recorded, drawn);

    // Reuse does not touch the entropy source again.
    drop(pool.checkout().unwrap());
    assert_eq!(entropy.reads.load(Ordering::SeqCst), 2);
}

#[test]
fn continuous_strategy_reads_entropy_per_draw() {
    let entropy = Arc::new(RecordingEntropy::default());
    let pool = GeneratorPool::with_seed_source(
        SeedingStrategy::ContinuousSecure,
        SecureSeedSource::new(entropy.clone()),
    );

    let mut rng = pool.checkout().unwrap();
    assert_eq!(entropy.reads.load(Ordering::SeqCst), 0);

    for _ in 0..10 {
        rng.gen_uniform();
    }
    assert_eq!(entropy.reads.load(Ordering::SeqCst), 10);
}

// ============================================================================
// Statistical sanity
// ============================================================================

#[test]
fn uniform_draws_across_cycles_look_uniform() {
    const DRAWS: usize = 100_000;
    let pool = GeneratorPool::new(SeedingStrategy::Standard);

    let mut sum = 0.0;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for _ in 0..DRAWS {
        let u = pool.checkout().unwrap().gen_uniform();
        sum += u;
        min = min.min(u);
        max = max.max(u);
    }

    let mean = sum / DRAWS as f64;
    assert_abs_diff_eq!(mean, 0.5, epsilon = 0.01);
    assert!(min >= 0.0);
    assert!(max < 1.0);
}

// ============================================================================
// Scenario: many callers cycling
// ============================================================================

#[test]
fn fifty_callers_cycle_without_failure() {
    const CALLERS: usize = 50;
    const CYCLES: usize = 10_000;

    let pool = GeneratorPool::new(SeedingStrategy::Standard);
    let out_of_range = AtomicUsize::new(0);

    thread::scope(|s| {
        for _ in 0..CALLERS {
            s.spawn(|| {
                for _ in 0..CYCLES {
                    let mut rng = pool.checkout().unwrap();
                    let u = rng.gen_uniform();
                    if !(0.0..1.0).contains(&u) {
                        out_of_range.fetch_add(1, Ordering::Relaxed);
                    }
                }
            });
        }
    });

    assert_eq!(out_of_range.load(Ordering::Relaxed), 0);

    let stats = pool.stats();
    assert_eq!(stats.requests, CALLERS * CYCLES);
    assert!(stats.created <= CALLERS);
    assert_eq!(stats.idle, stats.created);
}

#[test]
fn shared_pool_through_arc() {
    let pool = Arc::new(GeneratorPool::new(SeedingStrategy::ContinuousSecure));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let pool = Arc::clone(&pool);
            thread::spawn(move || {
                let mut rng = pool.checkout().unwrap();
                let mut buffer = [0.0; 32];
                rng.fill_uniform(&mut buffer);
                buffer.iter().all(|u| (0.0..1.0).contains(u))
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
    assert!(pool.stats().created <= 4);
}
