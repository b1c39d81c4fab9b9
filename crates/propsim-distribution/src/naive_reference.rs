//! Naive reference implementations for the binomial window and sampler
//!
//! These implementations are intentionally simple and unoptimized.
//! They serve as a reference for verifying the log-space window and the
//! alias table.
//!
//! DO NOT USE IN PRODUCTION - these are for testing and benchmarking only!

use crate::traits::{clamp_unit, DiscreteSampler};
use statrs::distribution::{Binomial, Discrete};
use std::ops::RangeInclusive;

/// Binomial PMF straight from `statrs`
pub struct NaiveBinomial;

impl NaiveBinomial {
    /// Probability of `k` successes in Binomial(n, p)
    pub fn pmf(n: u64, p: f64, k: u64) -> f64 {
        let binomial = Binomial::new(p, n).expect("reference binomial parameters");
        binomial.pmf(k)
    }

    /// Full PMF over `0..=n`
    pub fn full_pmf(n: u64, p: f64) -> Vec<f64> {
        let binomial = Binomial::new(p, n).expect("reference binomial parameters");
        (0..=n).map(|k| binomial.pmf(k)).collect()
    }
}

/// Linear-scan inverse-CDF sampler
///
/// Walks the cumulative distribution on every draw: O(k) per sample.
pub struct NaiveInverseCdf {
    min_outcome: u64,
    cumulative: Vec<f64>,
}

impl NaiveInverseCdf {
    pub fn new(min_outcome: u64, probabilities: &[f64]) -> Self {
        assert!(!probabilities.is_empty(), "Cannot sample from an empty PMF");
        let total: f64 = probabilities.iter().sum();
        let mut running = 0.0;
        let cumulative = probabilities
            .iter()
            .map(|p| {
                running += p / total;
                running
            })
            .collect();
        Self {
            min_outcome,
            cumulative,
        }
    }
}

impl DiscreteSampler for NaiveInverseCdf {
    fn sample_uniform(&self, u: f64) -> u64 {
        let u = clamp_unit(u);
        let index = self
            .cumulative
            .iter()
            .position(|&c| u < c)
            .unwrap_or(self.cumulative.len() - 1);
        self.min_outcome + index as u64
    }

    fn support(&self) -> RangeInclusive<u64> {
        self.min_outcome..=self.min_outcome + self.cumulative.len() as u64 - 1
    }
}
