//! Stress command implementation
//!
//! Runs many concurrent checkout → draw → return cycles against one pool and
//! reports what the pool did.

use std::sync::Mutex;
use std::thread;
use std::time::Instant;

use randpool_core::{GeneratorPool, PoolConfig, PoolStats};
use tracing::{info, warn};

use crate::{CliError, Result};

/// Aggregate result of a stress run
#[derive(Debug, Clone)]
pub struct StressReport {
    /// Total draws performed
    pub draws: usize,
    /// Mean of all draws
    pub mean: f64,
    /// Smallest draw
    pub min: f64,
    /// Largest draw
    pub max: f64,
    /// Draws outside [0, 1)
    pub out_of_range: usize,
    /// Pool statistics after the run
    pub stats: PoolStats,
}

#[derive(Default)]
struct Partial {
    draws: usize,
    sum: f64,
    min: f64,
    max: f64,
    out_of_range: usize,
}

impl Partial {
    fn new() -> Self {
        Self {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            ..Self::default()
        }
    }

    fn record(&mut self, u: f64) {
        self.draws += 1;
        self.sum += u;
        self.min = self.min.min(u);
        self.max = self.max.max(u);
        if !(0.0..1.0).contains(&u) {
            self.out_of_range += 1;
        }
    }

    fn merge(&mut self, other: &Partial) {
        self.draws += other.draws;
        self.sum += other.sum;
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
        self.out_of_range += other.out_of_range;
    }
}

/// Run the stress command
pub fn run(config: &PoolConfig, workers: usize, cycles: usize) -> Result<()> {
    info!(
        strategy = %config.strategy(),
        workers,
        cycles,
        "Starting stress run"
    );

    let pool = GeneratorPool::from_config(config)?;
    let started = Instant::now();
    let report = stress(&pool, workers, cycles)?;
    let elapsed = started.elapsed();

    info!(
        draws = report.draws,
        elapsed_ms = elapsed.as_millis() as u64,
        created = report.stats.created,
        reused = report.stats.reused,
        hit_rate = report.stats.hit_rate(),
        "Stress run complete"
    );

    println!("draws:     {}", report.draws);
    println!("mean:      {:.6}", report.mean);
    println!("min:       {:.6}", report.min);
    println!("max:       {:.6}", report.max);
    println!("created:   {}", report.stats.created);
    println!("reused:    {}", report.stats.reused);
    println!("hit rate:  {:.4}", report.stats.hit_rate());

    if report.out_of_range > 0 {
        warn!(count = report.out_of_range, "Draws outside [0, 1)");
        return Err(CliError::OutOfRange(report.out_of_range));
    }
    Ok(())
}

/// Runs `workers` threads, each performing `cycles` checkout → draw → return
/// cycles on `pool`.
pub fn stress(pool: &GeneratorPool, workers: usize, cycles: usize) -> Result<StressReport> {
    if workers == 0 || cycles == 0 {
        return Err(CliError::InvalidArgument(
            "workers and cycles must be at least 1".to_string(),
        ));
    }

    let total = Mutex::new(Partial::new());

    thread::scope(|s| -> Result<()> {
        let handles: Vec<_> = (0..workers)
            .map(|_| {
                s.spawn(|| -> Result<()> {
                    let mut partial = Partial::new();
                    for _ in 0..cycles {
                        let mut rng = pool.checkout()?;
                        partial.record(rng.gen_uniform());
                    }
                    total
                        .lock()
                        .unwrap_or_else(std::sync::PoisonError::into_inner)
                        .merge(&partial);
                    Ok(())
                })
            })
            .collect();

        for handle in handles {
            match handle.join() {
                Ok(result) => result?,
                Err(panic) => std::panic::resume_unwind(panic),
            }
        }
        Ok(())
    })?;

    let total = total
        .into_inner()
        .unwrap_or_else(std::sync::PoisonError::into_inner);

    Ok(StressReport {
        draws: total.draws,
        mean: total.sum / total.draws as f64,
        min: total.min,
        max: total.max,
        out_of_range: total.out_of_range,
        stats: pool.stats(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use randpool_core::SeedingStrategy;

    #[test]
    fn test_stress_report() {
        let pool = GeneratorPool::new(SeedingStrategy::Standard);
        let report = stress(&pool, 8, 500).unwrap();

        assert_eq!(report.draws, 4_000);
        assert_eq!(report.out_of_range, 0);
        assert!(report.min >= 0.0 && report.max < 1.0);
        assert!((report.mean - 0.5).abs() < 0.05);
        assert!(report.stats.created <= 8);
        assert_eq!(report.stats.requests, 4_000);
    }

    #[test]
    fn test_stress_rejects_empty_run() {
        let pool = GeneratorPool::default();
        assert!(stress(&pool, 0, 10).is_err());
        assert!(stress(&pool, 10, 0).is_err());
    }
}
