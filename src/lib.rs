//! # propsim
//!
//! Sampling-distribution simulation for a single sample proportion.
//!
//! A dichotomous [`Sample`] (k successes out of n) is resampled by drawing
//! from Binomial(n, k/n) through a precomputed alias table. Each draw is
//! recorded in a running frequency distribution whose empirical
//! percentiles give confidence bounds for the proportion.
//!
//! ## Crate Organization
//!
//! - `propsim-core`: errors, samples, uniform random sources, log10 binomial math
//! - `propsim-distribution`: PMF windows and the alias-method sampler
//! - `propsim-histogram`: the running frequency distribution and plot projection
//! - `propsim-confidence`: tails, levels and percentile bounds
//!
//! ## Quick Start
//!
//! ```rust
//! use propsim::prelude::*;
//!
//! let mut sim = Simulation::default();
//! sim.select_sample(Sample::new("heads", 3, "tails", 7).unwrap()).unwrap();
//! sim.set_level(Some(ConfidenceLevel::NINETY_FIVE));
//!
//! let mut source = RngSource::seeded(42);
//! let summary = sim.collect(10_000, &mut source).unwrap().unwrap();
//! assert_eq!(summary.total_trials, 10_000);
//! assert!(sim.bound().contains(0.3));
//! ```

pub mod config;
pub mod simulation;

pub use config::SimulationConfig;
pub use simulation::{BatchSummary, Simulation};

// Re-export sub-crates
pub use propsim_confidence;
pub use propsim_core;
pub use propsim_distribution;
pub use propsim_histogram;

pub use propsim_core::{Error, Result};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{BatchSummary, Simulation, SimulationConfig};
    pub use propsim_confidence::{ConfidenceBound, ConfidenceLevel, Tail, TailRegion};
    pub use propsim_core::{ReplaySource, RngSource, Sample, UniformSource};
    pub use propsim_distribution::{AliasTable, DiscreteSampler};
    pub use propsim_histogram::{FrequencyMap, PlotColumns, PlotLayout};
    pub use propsim_core::{Error, Result};
}
