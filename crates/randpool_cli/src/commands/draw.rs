//! Draw command implementation
//!
//! Prints uniform draws in [0, 1), one per line, through a
//! [`SingleDrawFloater`].

use std::sync::Arc;

use randpool_core::{GeneratorPool, PoolConfig, SingleDrawFloater};
use rayon::prelude::*;
use tracing::info;

use crate::{CliError, Result};

/// Run the draw command
pub fn run(config: &PoolConfig, count: usize, parallel: bool) -> Result<()> {
    if count == 0 {
        return Err(CliError::InvalidArgument(
            "count must be at least 1".to_string(),
        ));
    }

    info!(
        strategy = %config.strategy(),
        count,
        parallel,
        "Drawing uniform values"
    );

    let floater = SingleDrawFloater::new(Arc::new(GeneratorPool::from_config(config)?));
    let values = draw_values(&floater, count, parallel)?;

    for value in &values {
        println!("{}", value);
    }

    let stats = floater.pool().stats();
    info!(
        created = stats.created,
        reused = stats.reused,
        hit_rate = stats.hit_rate(),
        "Draw complete"
    );
    Ok(())
}

fn draw_values(floater: &SingleDrawFloater, count: usize, parallel: bool) -> Result<Vec<f64>> {
    let values = if parallel {
        (0..count)
            .into_par_iter()
            .map(|_| floater.float64())
            .collect::<randpool_core::Result<Vec<f64>>>()?
    } else {
        (0..count)
            .map(|_| floater.float64())
            .collect::<randpool_core::Result<Vec<f64>>>()?
    };
    Ok(values)
}
