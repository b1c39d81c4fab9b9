//! Empirical CDF over a frequency distribution
//!
//! Cumulative counts are kept as integers so that "mass strictly below"
//! and "mass strictly above" an entry are exact before the final division.

use propsim_histogram::{proportion_of, FrequencyMap};

/// Inclusive cumulative distribution of sampled proportions
#[derive(Debug, Clone, PartialEq)]
pub struct EmpiricalCdf {
    proportions: Vec<f64>,
    cumulative: Vec<u64>,
    total: u64,
}

impl EmpiricalCdf {
    /// Build the CDF of `frequencies` for a sample of size `n`
    ///
    /// Entries come out of the map in ascending outcome order, which is
    /// ascending proportion order for a fixed `n`.
    pub fn from_frequencies(frequencies: &FrequencyMap, n: u64) -> Self {
        let mut proportions = Vec::with_capacity(frequencies.len());
        let mut cumulative = Vec::with_capacity(frequencies.len());
        let mut running = 0u64;
        for (outcome, count) in frequencies.iter() {
            running += count;
            proportions.push(proportion_of(outcome, n));
            cumulative.push(running);
        }
        Self {
            proportions,
            cumulative,
            total: running,
        }
    }

    pub fn len(&self) -> usize {
        self.proportions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn proportions(&self) -> &[f64] {
        &self.proportions
    }

    /// Inclusive CDF value at entry `index`
    pub fn cdf_at(&self, index: usize) -> f64 {
        self.fraction(self.cumulative[index])
    }

    /// Mass of entries strictly below entry `index`
    pub fn mass_below(&self, index: usize) -> f64 {
        match index {
            0 => 0.0,
            i => self.fraction(self.cumulative[i - 1]),
        }
    }

    /// Mass of entries strictly above entry `index`
    pub fn mass_above(&self, index: usize) -> f64 {
        self.fraction(self.total - self.cumulative[index])
    }

    /// Smallest proportion whose inclusive CDF reaches `tail_area`
    ///
    /// Scans upwards, taking entries while the mass below them is still
    /// under `tail_area`. `None` if no entry is taken.
    pub fn lower_bound(&self, tail_area: f64) -> Option<f64> {
        (0..self.len())
            .take_while(|&i| self.mass_below(i) < tail_area)
            .last()
            .map(|i| self.proportions[i])
    }

    /// Largest proportion whose upper-tail mass reaches `tail_area`
    pub fn upper_bound(&self, tail_area: f64) -> Option<f64> {
        (0..self.len())
            .rev()
            .take_while(|&i| self.mass_above(i) < tail_area)
            .last()
            .map(|i| self.proportions[i])
    }

    fn fraction(&self, count: u64) -> f64 {
        count as f64 / self.total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn bell() -> FrequencyMap {
        [1, 2, 2, 3, 3, 3, 3, 4, 4, 5].into_iter().collect()
    }

    #[test]
    fn test_cumulative_masses() {
        let cdf = EmpiricalCdf::from_frequencies(&bell(), 10);
        assert_eq!(cdf.len(), 5);
        assert_eq!(cdf.total(), 10);
        assert_eq!(cdf.proportions(), &[0.1, 0.2, 0.3, 0.4, 0.5]);
        assert_relative_eq!(cdf.cdf_at(2), 0.7);
        assert_relative_eq!(cdf.mass_below(2), 0.3);
        assert_relative_eq!(cdf.mass_above(2), 0.3);
        assert_relative_eq!(cdf.cdf_at(4), 1.0);
        assert_eq!(cdf.mass_below(0), 0.0);
        assert_eq!(cdf.mass_above(4), 0.0);
    }

    #[test]
    fn test_bounds() {
        let cdf = EmpiricalCdf::from_frequencies(&bell(), 10);
        assert_eq!(cdf.lower_bound(0.25), Some(0.2));
        assert_eq!(cdf.upper_bound(0.25), Some(0.4));
        assert_eq!(cdf.lower_bound(0.05), Some(0.1));
        assert_eq!(cdf.upper_bound(0.05), Some(0.5));
        assert_eq!(cdf.lower_bound(0.5), Some(0.3));
        assert_eq!(cdf.upper_bound(0.5), Some(0.3));
    }

    #[test]
    fn test_single_outcome() {
        let freq: FrequencyMap = [7; 20].into_iter().collect();
        let cdf = EmpiricalCdf::from_frequencies(&freq, 10);
        assert_eq!(cdf.lower_bound(0.025), Some(0.7));
        assert_eq!(cdf.upper_bound(0.025), Some(0.7));
    }

    #[test]
    fn test_empty() {
        let cdf = EmpiricalCdf::from_frequencies(&FrequencyMap::new(), 10);
        assert!(cdf.is_empty());
        assert_eq!(cdf.lower_bound(0.05), None);
        assert_eq!(cdf.upper_bound(0.05), None);
    }
}
