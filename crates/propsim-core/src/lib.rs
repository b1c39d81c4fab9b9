//! Core types for the proportion sampling-distribution engine
//!
//! This crate provides the pieces every other propsim crate builds on:
//!
//! - **Errors**: a single [`Error`] enum and [`Result`] alias
//! - **Samples**: the dichotomous [`Sample`] record a host selects
//! - **Randomness**: the [`UniformSource`] seam and `rand`-backed sources
//! - **Math**: log10-space binomial helpers that never overflow
//!
//! # Example
//!
//! ```rust
//! use propsim_core::{RngSource, Sample, UniformSource};
//!
//! let sample = Sample::from_categories(["red", "blue", "red", "green"], "red").unwrap();
//! assert_eq!(sample.num_success(), 2);
//!
//! let mut source = RngSource::seeded(11);
//! let draws = source.generate_uniform_batch(5).unwrap();
//! assert!(draws.iter().all(|&u| (0.0..1.0).contains(&u)));
//! ```

pub mod error;
pub mod math;
pub mod random;
pub mod sample;

// Re-export core types
pub use error::{Error, Result};
pub use random::{ReplaySource, RngSource, UniformSource};
pub use sample::Sample;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{Error, Result, RngSource, Sample, UniformSource};
}
