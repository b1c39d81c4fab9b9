//! Running frequency distributions for resampling simulations
//!
//! This crate keeps the empirical sampling distribution that grows as trials
//! are collected, and reshapes it for charting.
//!
//! # Key Features
//!
//! - **Sparse accumulation**: only observed outcomes take space
//! - **Commutative batches**: any split of a draw sequence gives the same map
//! - **Plot projection**: stacked dots for small runs, bars for large ones
//!
//! # Examples
//!
//! ## Accumulating batches
//!
//! ```rust
//! use propsim_distribution::binomial_sampler;
//! use propsim_histogram::FrequencyMap;
//!
//! let sampler = binomial_sampler(10, 0.3).unwrap();
//! let mut freq = FrequencyMap::new();
//!
//! let last = freq.update(&[0.05, 0.5, 0.95], &sampler);
//! assert_eq!(freq.total_trials(), 3);
//! assert!(last.is_some());
//! ```
//!
//! ## Projecting for a chart
//!
//! ```rust
//! use propsim_histogram::{FrequencyMap, PlotLayout, PlotProjector, ThresholdProjector};
//!
//! let freq: FrequencyMap = [3, 3, 4].into_iter().collect();
//! let columns = ThresholdProjector::default().project(&freq, 10);
//! assert_eq!(columns.layout, PlotLayout::Dot);
//! assert_eq!(columns.counts, vec![1, 2, 1]);
//! ```

pub mod accumulator;
pub mod projectors;
pub mod traits;
pub mod types;

// Re-export main types and traits
pub use projectors::{BarProjector, DotProjector, ThresholdProjector, DEFAULT_PLOT_THRESHOLD};
pub use traits::PlotProjector;
pub use types::{proportion_of, FrequencyMap, PlotColumns, PlotLayout};
