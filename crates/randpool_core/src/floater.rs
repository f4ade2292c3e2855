//! Single-draw façade over a shared [`GeneratorPool`].

use std::sync::Arc;

use crate::error::Result;
use crate::generator::GeneratorPool;
use crate::rng::SeedingStrategy;

/// Draws one uniform `f64` per call from a pooled generator.
///
/// Each call checks a generator out, draws once, and hands it back when the
/// guard drops, so concurrent callers never share generator state.
///
/// ```rust
/// use randpool_core::SingleDrawFloater;
///
/// let floater = SingleDrawFloater::standard();
/// let u = floater.float64().unwrap();
/// assert!((0.0..1.0).contains(&u));
/// ```
#[derive(Clone, Debug)]
pub struct SingleDrawFloater {
    pool: Arc<GeneratorPool>,
}

impl SingleDrawFloater {
    /// Creates a façade over an existing pool.
    pub fn new(pool: Arc<GeneratorPool>) -> Self {
        Self { pool }
    }

    /// Creates a façade over its own standard-seeded pool.
    pub fn standard() -> Self {
        Self::new(Arc::new(GeneratorPool::new(SeedingStrategy::Standard)))
    }

    /// Returns the pool backing this façade.
    pub fn pool(&self) -> &Arc<GeneratorPool> {
        &self.pool
    }

    /// Draws one uniform value in [0, 1).
    ///
    /// # Errors
    ///
    /// Fails only if a new generator cannot be securely seeded.
    pub fn float64(&self) -> Result<f64> {
        let mut rng = self.pool.checkout()?;
        Ok(rng.gen_uniform())
    }
}
