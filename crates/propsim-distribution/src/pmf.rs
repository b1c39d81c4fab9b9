//! Binomial probability windows
//!
//! A [`ProbabilityWindow`] is a contiguous slice of a discrete PMF. The
//! [`BinomialWindow`] builder computes one for Binomial(n, p) entirely in
//! log10 space and, for large `n`, trims it to a band of standard deviations
//! around the mean so that cost stays proportional to `sqrt(n)`.

use propsim_core::{math::binomial, Error, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Trial count at which windows start being trimmed around the mean
pub const DEFAULT_TRIM_THRESHOLD: u64 = 100;

/// Half-width of a trimmed window, in standard deviations
pub const DEFAULT_WINDOW_STD_DEVS: f64 = 6.0;

/// Probabilities for the consecutive outcomes `min_outcome..=max_outcome`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ProbabilityWindowRaw")]
pub struct ProbabilityWindow {
    min_outcome: u64,
    probabilities: Vec<f64>,
}

#[derive(Deserialize)]
struct ProbabilityWindowRaw {
    min_outcome: u64,
    probabilities: Vec<f64>,
}

impl TryFrom<ProbabilityWindowRaw> for ProbabilityWindow {
    type Error = Error;

    fn try_from(raw: ProbabilityWindowRaw) -> Result<Self> {
        Self::from_probabilities(raw.min_outcome, raw.probabilities)
    }
}

impl ProbabilityWindow {
    /// Build a window from explicit probabilities
    ///
    /// Probabilities must be finite, non-negative and carry positive total
    /// mass. They are not renormalised.
    pub fn from_probabilities(min_outcome: u64, probabilities: Vec<f64>) -> Result<Self> {
        if probabilities.is_empty() {
            return Err(Error::InvalidInput(
                "probability window needs at least one outcome".to_string(),
            ));
        }
        if raw_max_outcome(min_outcome, probabilities.len()).is_none() {
            return Err(Error::InvalidInput(format!(
                "window of {} outcomes starting at {min_outcome} overflows u64",
                probabilities.len()
            )));
        }
        if probabilities.iter().any(|p| !p.is_finite()) {
            return Err(Error::non_finite("probability window"));
        }
        if probabilities.iter().any(|&p| p < 0.0) {
            return Err(Error::InvalidInput(
                "probability window contains negative mass".to_string(),
            ));
        }
        if probabilities.iter().sum::<f64>() <= 0.0 {
            return Err(Error::InvalidInput(
                "probability window carries no mass".to_string(),
            ));
        }
        Ok(Self {
            min_outcome,
            probabilities,
        })
    }

    /// First outcome in the window
    pub fn min_outcome(&self) -> u64 {
        self.min_outcome
    }

    /// Last outcome in the window
    pub fn max_outcome(&self) -> u64 {
        self.min_outcome + self.probabilities.len() as u64 - 1
    }

    /// Number of outcomes covered
    pub fn len(&self) -> usize {
        self.probabilities.len()
    }

    /// Windows always hold at least one outcome
    pub fn is_empty(&self) -> bool {
        self.probabilities.is_empty()
    }

    /// Probability of `outcome`, zero outside the window
    pub fn probability(&self, outcome: u64) -> f64 {
        outcome
            .checked_sub(self.min_outcome)
            .and_then(|offset| self.probabilities.get(offset as usize))
            .copied()
            .unwrap_or(0.0)
    }

    /// Raw probabilities, indexed by `outcome - min_outcome`
    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    /// `(outcome, probability)` pairs in ascending outcome order
    pub fn iter(&self) -> impl Iterator<Item = (u64, f64)> + '_ {
        self.probabilities
            .iter()
            .enumerate()
            .map(move |(offset, &p)| (self.min_outcome + offset as u64, p))
    }

    /// Total probability inside the window (slightly below 1 when trimmed)
    pub fn total_mass(&self) -> f64 {
        self.probabilities.iter().sum()
    }

    /// Expected outcome under the window's (renormalised) mass
    pub fn mean(&self) -> f64 {
        let weighted: f64 = self.iter().map(|(x, p)| x as f64 * p).sum();
        weighted / self.total_mass()
    }
}

/// Last outcome of `len` consecutive outcomes from `min_outcome`
pub(crate) fn raw_max_outcome(min_outcome: u64, len: usize) -> Option<u64> {
    (len as u64)
        .checked_sub(1)
        .and_then(|span| min_outcome.checked_add(span))
}

/// Builder for Binomial(n, p) probability windows
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinomialWindow {
    trim_threshold: u64,
    std_devs: f64,
}

impl Default for BinomialWindow {
    fn default() -> Self {
        Self {
            trim_threshold: DEFAULT_TRIM_THRESHOLD,
            std_devs: DEFAULT_WINDOW_STD_DEVS,
        }
    }
}

impl BinomialWindow {
    /// Builder with the default trim threshold and window width
    pub fn new() -> Self {
        Self::default()
    }

    /// Trial count from which windows are trimmed around the mean
    pub fn with_trim_threshold(mut self, trim_threshold: u64) -> Self {
        self.trim_threshold = trim_threshold;
        self
    }

    /// Half-width of trimmed windows in standard deviations
    pub fn with_std_devs(mut self, std_devs: f64) -> Self {
        self.std_devs = std_devs;
        self
    }

    pub fn trim_threshold(&self) -> u64 {
        self.trim_threshold
    }

    pub fn std_devs(&self) -> f64 {
        self.std_devs
    }

    /// Outcome range covered for Binomial(n, p)
    ///
    /// Degenerate probabilities give a zero standard deviation, collapsing a
    /// trimmed window onto the mean.
    pub fn outcome_range(&self, n: u64, p: f64) -> (u64, u64) {
        if n < self.trim_threshold {
            return (0, n);
        }
        let mean = n as f64 * p;
        let sd = (mean * (1.0 - p)).sqrt();
        let low = (mean - self.std_devs * sd).round().max(0.0) as u64;
        let high = ((mean + self.std_devs * sd).round() as u64).min(n);
        (low.min(high), high)
    }

    /// Compute the window for Binomial(n, p)
    #[instrument(skip(self), fields(trim_threshold = self.trim_threshold))]
    pub fn build(&self, n: u64, p: f64) -> Result<ProbabilityWindow> {
        if !(0.0..=1.0).contains(&p) {
            return Err(Error::invalid_probability(p));
        }
        if !(self.std_devs.is_finite() && self.std_devs > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "window width must be a positive number of standard deviations, got {}",
                self.std_devs
            )));
        }

        let (min_x, max_x) = self.outcome_range(n, p);
        debug!(min_x, max_x, "computing binomial window");

        let mut log_coefficient = binomial::log10_choose(n, min_x);
        let mut probabilities = Vec::with_capacity((max_x - min_x + 1) as usize);
        for x in min_x..=max_x {
            if x > min_x {
                log_coefficient = binomial::log10_choose_step(log_coefficient, n, x);
            }
            let log_p = binomial::log10_pmf_term(log_coefficient, n, x, p);
            probabilities.push(10f64.powf(log_p));
        }

        ProbabilityWindow::from_probabilities(min_x, probabilities)
    }
}

/// Binomial(n, p) window with the default trim settings
pub fn binomial_window(n: u64, p: f64) -> Result<ProbabilityWindow> {
    BinomialWindow::new().build(n, p)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_small_n_covers_full_range() {
        let window = binomial_window(10, 0.3).unwrap();
        assert_eq!(window.min_outcome(), 0);
        assert_eq!(window.max_outcome(), 10);
        assert_eq!(window.len(), 11);
        assert_relative_eq!(window.total_mass(), 1.0, epsilon = 1e-12);
        // P(X = 3) for Binomial(10, 0.3)
        assert_relative_eq!(window.probability(3), 0.266_827_932, epsilon = 1e-9);
        assert_eq!(window.probability(11), 0.0);
    }

    #[test]
    fn test_large_n_is_trimmed() {
        let window = binomial_window(10_000, 0.5).unwrap();
        // mean 5000, sd 50, six sd either side
        assert_eq!(window.min_outcome(), 4700);
        assert_eq!(window.max_outcome(), 5300);
        assert_relative_eq!(window.total_mass(), 1.0, epsilon = 1e-7);
        assert_relative_eq!(window.mean(), 5000.0, epsilon = 1e-6);
    }

    #[test]
    fn test_trimmed_window_clamps_to_bounds() {
        let window = BinomialWindow::new().build(200, 0.01).unwrap();
        assert_eq!(window.min_outcome(), 0);
        assert!(window.max_outcome() < 200);
    }

    #[test]
    fn test_degenerate_probabilities() {
        let window = binomial_window(500, 0.0).unwrap();
        assert_eq!(window.len(), 1);
        assert_eq!(window.min_outcome(), 0);
        assert_eq!(window.probability(0), 1.0);

        let window = binomial_window(500, 1.0).unwrap();
        assert_eq!(window.len(), 1);
        assert_eq!(window.min_outcome(), 500);
        assert_eq!(window.probability(500), 1.0);

        // Untrimmed degenerate windows keep the full range with zero tails
        let window = binomial_window(5, 1.0).unwrap();
        assert_eq!(window.len(), 6);
        assert_relative_eq!(window.probability(5), 1.0, epsilon = 1e-12);
        assert!(window.probabilities()[..5].iter().all(|&p| p == 0.0));
    }

    #[test]
    fn test_zero_trials() {
        let window = binomial_window(0, 0.4).unwrap();
        assert_eq!(window.len(), 1);
        assert_eq!(window.probability(0), 1.0);
    }

    #[test]
    fn test_invalid_probability() {
        assert!(binomial_window(10, 1.5).is_err());
        assert!(binomial_window(10, -0.1).is_err());
        assert!(binomial_window(10, f64::NAN).is_err());
    }

    #[test]
    fn test_invalid_width() {
        let builder = BinomialWindow::new().with_std_devs(0.0);
        assert!(builder.build(10, 0.5).is_err());
    }

    #[test]
    fn test_from_probabilities_validation() {
        assert!(ProbabilityWindow::from_probabilities(0, vec![]).is_err());
        assert!(ProbabilityWindow::from_probabilities(0, vec![0.5, -0.1]).is_err());
        assert!(ProbabilityWindow::from_probabilities(0, vec![0.0, 0.0]).is_err());
        assert!(ProbabilityWindow::from_probabilities(0, vec![f64::NAN]).is_err());
        let window = ProbabilityWindow::from_probabilities(3, vec![0.25, 0.75]).unwrap();
        assert_eq!(window.iter().collect::<Vec<_>>(), vec![(3, 0.25), (4, 0.75)]);
    }

    #[test]
    fn test_window_overflowing_outcomes_rejected() {
        assert!(ProbabilityWindow::from_probabilities(u64::MAX, vec![0.5, 0.5]).is_err());
        let window = ProbabilityWindow::from_probabilities(u64::MAX, vec![1.0]).unwrap();
        assert_eq!(window.max_outcome(), u64::MAX);
    }

    #[test]
    fn test_deserialize_validates_window() {
        let window: ProbabilityWindow =
            serde_json::from_str(r#"{"min_outcome":2,"probabilities":[0.5,0.5]}"#).unwrap();
        assert_eq!(window.max_outcome(), 3);

        for json in [
            r#"{"min_outcome":0,"probabilities":[]}"#,
            r#"{"min_outcome":0,"probabilities":[0.0,0.0]}"#,
            r#"{"min_outcome":0,"probabilities":[0.7,-0.2]}"#,
            r#"{"min_outcome":18446744073709551615,"probabilities":[0.5,0.5]}"#,
        ] {
            assert!(serde_json::from_str::<ProbabilityWindow>(json).is_err(), "{json}");
        }
    }
}
