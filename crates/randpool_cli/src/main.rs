//! randpool CLI - Command Line Operations for the Generator Pool
//!
//! # Commands
//!
//! - `randpool draw --count <n>` - Print uniform draws in [0, 1)
//! - `randpool stress --workers <w> --cycles <c>` - Concurrent checkout/return run
//! - `randpool check` - Verify the secure entropy source
//!
//! Settings come from `randpool.toml` when present; command line flags take
//! precedence and `RUST_LOG` overrides the configured log level.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use randpool_core::SeedingStrategy;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;

use config::{CliConfig, LogLevel};
pub use error::{CliError, Result};

/// randpool - securely seeded generator pool
#[derive(Parser)]
#[command(name = "randpool")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "randpool.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print uniform draws in [0, 1)
    Draw {
        /// Number of values to draw
        #[arg(short = 'n', long, default_value = "10")]
        count: usize,

        /// Seeding strategy (standard, continuous-secure)
        #[arg(short, long)]
        strategy: Option<SeedingStrategy>,

        /// Draw from the rayon thread pool
        #[arg(short, long)]
        parallel: bool,
    },

    /// Run concurrent checkout -> draw -> return cycles
    Stress {
        /// Number of concurrent workers
        #[arg(short, long, default_value = "50")]
        workers: usize,

        /// Cycles per worker
        #[arg(long, default_value = "10000")]
        cycles: usize,

        /// Seeding strategy (standard, continuous-secure)
        #[arg(short, long)]
        strategy: Option<SeedingStrategy>,
    },

    /// Check the secure entropy source
    Check,
}

fn init_tracing(log_level: LogLevel) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level.as_filter_str())),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let file_config = CliConfig::load(&cli.config)?;

    let log_level = if cli.verbose {
        LogLevel::Debug
    } else {
        file_config.log_level
    };
    init_tracing(log_level);

    info!("randpool v{}", env!("CARGO_PKG_VERSION"));
    if cli.verbose {
        info!(config = %cli.config.display(), "Verbose mode enabled");
    }

    match cli.command {
        Commands::Draw {
            count,
            strategy,
            parallel,
        } => commands::draw::run(&file_config.pool_with(strategy)?, count, parallel),
        Commands::Stress {
            workers,
            cycles,
            strategy,
        } => commands::stress::run(&file_config.pool_with(strategy)?, workers, cycles),
        Commands::Check => commands::check::run(),
    }
}
