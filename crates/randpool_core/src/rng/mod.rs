//! # Pooled Generators
//!
//! Generator types handed out by a
//! [`GeneratorPool`](crate::generator::GeneratorPool).
//!
//! ## Module Structure
//!
//! - `strategy`: the closed set of seeding strategies
//! - `instance`: [`PoolRng`], the pooled generator and its draw helpers
//! - `secure`: [`ContinuousSecureRng`], entropy read on every refill
//!
//! ## Strategies
//!
//! | Strategy | Entropy reads | Engine |
//! |----------|---------------|--------|
//! | `Standard` | once per instance | PCG-64 (`rand_pcg::Pcg64`) |
//! | `ContinuousSecure` | once per 64-bit output word | OS CSPRNG |

mod instance;
mod secure;
mod strategy;

pub use instance::PoolRng;
pub use secure::ContinuousSecureRng;
pub use strategy::SeedingStrategy;
