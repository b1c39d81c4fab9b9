//! Binomial probability windows and alias-table sampling
//!
//! This crate turns a dichotomous sample into something that can be
//! resampled cheaply:
//!
//! - **[`BinomialWindow`]** computes an exact Binomial(n, p) PMF in log10
//!   space, trimmed to ±6 standard deviations once `n` reaches the trim
//!   threshold
//! - **[`AliasTable`]** preprocesses a [`ProbabilityWindow`] so that one
//!   uniform value yields one outcome in constant time
//! - **[`DiscreteSampler`]** is the seam downstream crates consume
//!
//! # Example
//!
//! ```rust
//! use propsim_distribution::{binomial_window, AliasTable, DiscreteSampler};
//!
//! let window = binomial_window(10, 0.3).unwrap();
//! let table = AliasTable::build(&window).unwrap();
//!
//! let outcome = table.sample_uniform(0.42);
//! assert!(outcome <= 10);
//! ```

pub mod alias;
pub mod naive_reference;
pub mod pmf;
pub mod traits;

pub use alias::AliasTable;
pub use pmf::{
    binomial_window, BinomialWindow, ProbabilityWindow, DEFAULT_TRIM_THRESHOLD,
    DEFAULT_WINDOW_STD_DEVS,
};
pub use propsim_core::{Error, Result};
pub use traits::DiscreteSampler;

/// Build the alias table for Binomial(n, p) with default trimming
pub fn binomial_sampler(n: u64, p: f64) -> Result<AliasTable> {
    AliasTable::build(&binomial_window(n, p)?)
}
