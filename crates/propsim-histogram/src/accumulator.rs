//! Batch accumulation of sampled outcomes
//!
//! The map is a plain caller-owned value: every batch of uniform draws is
//! folded in through [`FrequencyMap::update`]. Batches commute, so only the
//! "last sampled outcome" depends on draw order, and that is returned to the
//! caller rather than stored.

use crate::types::FrequencyMap;
use propsim_distribution::DiscreteSampler;
use tracing::{instrument, trace};

impl FrequencyMap {
    /// Clear every count and the trial counter
    pub fn reset(&mut self) {
        self.counts.clear();
        self.total_trials = 0;
    }

    /// Record one observed outcome
    #[inline]
    pub fn record(&mut self, outcome: u64) {
        *self.counts.entry(outcome).or_insert(0) += 1;
        self.total_trials += 1;
    }

    /// Fold a batch of uniform draws through `sampler`
    ///
    /// Returns the outcome of the final draw, or `None` for an empty batch.
    /// No draw can fail: out-of-range values are clamped by the sampler.
    #[instrument(level = "trace", skip_all, fields(batch = draws.len()))]
    pub fn update<S>(&mut self, draws: &[f64], sampler: &S) -> Option<u64>
    where
        S: DiscreteSampler + ?Sized,
    {
        let mut last = None;
        for &u in draws {
            let outcome = sampler.sample_uniform(u);
            *self.counts.entry(outcome).or_insert(0) += 1;
            last = Some(outcome);
        }
        self.total_trials += draws.len() as u64;
        trace!(total_trials = self.total_trials, distinct = self.counts.len());
        last
    }

    /// Add every count from `other`
    pub fn merge(&mut self, other: &FrequencyMap) {
        for (outcome, count) in other.iter() {
            *self.counts.entry(outcome).or_insert(0) += count;
        }
        self.total_trials += other.total_trials;
    }
}

impl Extend<u64> for FrequencyMap {
    fn extend<I: IntoIterator<Item = u64>>(&mut self, outcomes: I) {
        for outcome in outcomes {
            self.record(outcome);
        }
    }
}

impl FromIterator<u64> for FrequencyMap {
    fn from_iter<I: IntoIterator<Item = u64>>(outcomes: I) -> Self {
        let mut freq = FrequencyMap::new();
        freq.extend(outcomes);
        freq
    }
}
