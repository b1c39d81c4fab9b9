//! Confidence bounds for resampled proportions
//!
//! Bounds are read directly off the empirical percentiles of the running
//! sampling distribution kept by `propsim-histogram`.
//!
//! # Example
//!
//! ```rust
//! use propsim_confidence::{BoundEstimator, ConfidenceBound, ConfidenceLevel, PercentileEstimator, Tail};
//! use propsim_histogram::FrequencyMap;
//!
//! let freq: FrequencyMap = [1, 2, 2, 3, 3, 3, 3, 4, 4, 5].into_iter().collect();
//! let bound = PercentileEstimator.estimate(&freq, 10, Tail::Two, Some(ConfidenceLevel::new(0.5)));
//! assert_eq!(bound, ConfidenceBound::TwoTail { low: 0.2, high: 0.4 });
//! ```

pub mod cdf;
pub mod percentile;
pub mod traits;
pub mod types;

pub use cdf::EmpiricalCdf;
pub use percentile::PercentileEstimator;
pub use traits::BoundEstimator;
pub use types::{ConfidenceBound, ConfidenceLevel, Tail, TailRegion};

pub use propsim_core::{Error, Result};
