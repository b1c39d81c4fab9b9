//! Percentile bounds from the empirical sampling distribution

use crate::cdf::EmpiricalCdf;
use crate::traits::BoundEstimator;
use crate::types::{ConfidenceBound, ConfidenceLevel, Tail};
use propsim_histogram::FrequencyMap;
use tracing::{debug, instrument};

/// Reads bounds straight off the running distribution's percentiles
#[derive(Debug, Clone, Copy, Default)]
pub struct PercentileEstimator;

impl PercentileEstimator {
    pub fn new() -> Self {
        Self
    }

    /// Bound for a prebuilt CDF
    pub fn bound_for_cdf(&self, cdf: &EmpiricalCdf, tail: Tail, level: ConfidenceLevel) -> ConfidenceBound {
        if cdf.is_empty() {
            return ConfidenceBound::NoBounds;
        }
        let tail_area = level.tail_area(tail);
        let bound = match tail {
            Tail::Left => cdf.lower_bound(tail_area).map(ConfidenceBound::Lower),
            Tail::Right => cdf.upper_bound(tail_area).map(ConfidenceBound::Upper),
            Tail::Two => cdf
                .lower_bound(tail_area)
                .zip(cdf.upper_bound(tail_area))
                .map(|(low, high)| ConfidenceBound::TwoTail { low, high }),
        };
        bound.unwrap_or_default()
    }
}

impl BoundEstimator for PercentileEstimator {
    #[instrument(level = "debug", skip(self, frequencies), fields(trials = frequencies.total_trials()))]
    fn estimate(
        &self,
        frequencies: &FrequencyMap,
        n: u64,
        tail: Tail,
        level: Option<ConfidenceLevel>,
    ) -> ConfidenceBound {
        let Some(level) = level else {
            return ConfidenceBound::NoBounds;
        };
        if n == 0 || frequencies.is_empty() {
            return ConfidenceBound::NoBounds;
        }

        let cdf = EmpiricalCdf::from_frequencies(frequencies, n);
        let bound = self.bound_for_cdf(&cdf, tail, level);
        debug!(%bound, distinct = cdf.len(), "percentile bound");
        bound
    }

    fn method_name(&self) -> &'static str {
        "percentile"
    }
}
