//! Check command implementation
//!
//! Verifies that the operating system entropy source can produce a seed.

use randpool_core::seed::SEED_BYTES;
use randpool_core::SecureSeedSource;
use tracing::info;

use crate::Result;

/// Run the check command
pub fn run() -> Result<()> {
    info!("Checking secure entropy source...");

    SecureSeedSource::os().next_seed()?;

    info!("  Entropy source: operating system CSPRNG");
    info!("  Seed width: {} bytes", SEED_BYTES);
    println!("entropy ok");

    Ok(())
}
