//! Core traits for bound estimation
//!
//! Estimators are stateless: the running distribution and the sample size
//! are passed in on every call, so one estimator can serve any number of
//! simulations.

use crate::types::{ConfidenceBound, ConfidenceLevel, Tail};
use propsim_histogram::FrequencyMap;

/// Estimator turning a running frequency distribution into a bound
pub trait BoundEstimator {
    /// Estimate the bound for `tail` at `level`
    ///
    /// # Arguments
    /// * `frequencies` - Sampled outcome counts
    /// * `n` - Trials per simulated sample, used to map outcomes to proportions
    /// * `tail` - Which tail(s) to cut
    /// * `level` - Confidence level; `None` yields [`ConfidenceBound::NoBounds`]
    fn estimate(
        &self,
        frequencies: &FrequencyMap,
        n: u64,
        tail: Tail,
        level: Option<ConfidenceLevel>,
    ) -> ConfidenceBound;

    /// Name of the estimation method
    fn method_name(&self) -> &'static str;
}
