//! Core types for frequency distributions and plot columns

use propsim_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Convert an outcome count to a proportion of `n` trials
///
/// A zero-trial sample maps every outcome to 0.
#[inline]
pub fn proportion_of(outcome: u64, n: u64) -> f64 {
    if n == 0 {
        0.0
    } else {
        outcome as f64 / n as f64
    }
}

/// Sparse running distribution of sampled outcomes
///
/// Outcomes appear only once observed. The sum of all counts always equals
/// [`total_trials`](Self::total_trials).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "FrequencyMapRaw")]
pub struct FrequencyMap {
    pub(crate) counts: BTreeMap<u64, u64>,
    pub(crate) total_trials: u64,
}

/// Serialized form; the total is recomputed from the counts
#[derive(Deserialize)]
struct FrequencyMapRaw {
    counts: BTreeMap<u64, u64>,
    #[serde(default)]
    total_trials: Option<u64>,
}

impl TryFrom<FrequencyMapRaw> for FrequencyMap {
    type Error = Error;

    fn try_from(raw: FrequencyMapRaw) -> Result<Self> {
        let mut counts = raw.counts;
        counts.retain(|_, count| *count > 0);
        let total_trials = counts
            .values()
            .try_fold(0u64, |total, &count| total.checked_add(count))
            .ok_or_else(|| Error::InvalidInput("trial count overflows u64".to_string()))?;
        match raw.total_trials {
            Some(stated) if stated != total_trials => Err(Error::InvalidInput(format!(
                "total_trials {stated} does not match the {total_trials} counted trials"
            ))),
            _ => Ok(Self {
                counts,
                total_trials,
            }),
        }
    }
}

impl FrequencyMap {
    /// Create an empty distribution
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct outcomes observed
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Check if nothing has been observed yet
    pub fn is_empty(&self) -> bool {
        self.total_trials == 0
    }

    /// Total number of trials folded in since the last reset
    pub fn total_trials(&self) -> u64 {
        self.total_trials
    }

    /// Observations of `outcome` (zero when never seen)
    pub fn count(&self, outcome: u64) -> u64 {
        self.counts.get(&outcome).copied().unwrap_or(0)
    }

    /// `(outcome, count)` pairs in ascending outcome order
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (u64, u64)> + ExactSizeIterator + '_ {
        self.counts.iter().map(|(&outcome, &count)| (outcome, count))
    }

    /// Distinct outcomes in ascending order
    pub fn distinct_outcomes(&self) -> Vec<u64> {
        self.counts.keys().copied().collect()
    }

    /// Smallest observed outcome
    pub fn min_outcome(&self) -> Option<u64> {
        self.counts.keys().next().copied()
    }

    /// Largest observed outcome
    pub fn max_outcome(&self) -> Option<u64> {
        self.counts.keys().next_back().copied()
    }

    /// Get the maximum count of any outcome
    pub fn max_count(&self) -> u64 {
        self.counts.values().copied().max().unwrap_or(0)
    }

    /// Relative frequencies in ascending outcome order
    pub fn frequencies(&self) -> Vec<(u64, f64)> {
        if self.total_trials == 0 {
            return Vec::new();
        }
        let total = self.total_trials as f64;
        self.iter()
            .map(|(outcome, count)| (outcome, count as f64 / total))
            .collect()
    }

    /// Mean sampled outcome, `None` before any trial
    pub fn mean_outcome(&self) -> Option<f64> {
        if self.total_trials == 0 {
            return None;
        }
        let weighted: f64 = self
            .iter()
            .map(|(outcome, count)| outcome as f64 * count as f64)
            .sum();
        Some(weighted / self.total_trials as f64)
    }

    /// Mean of the sampled proportions `outcome / n`
    pub fn mean_proportion(&self, n: u64) -> Option<f64> {
        self.mean_outcome()
            .map(|mean| if n == 0 { 0.0 } else { mean / n as f64 })
    }
}

impl fmt::Display for FrequencyMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FrequencyMap({} outcomes, {} trials)",
            self.len(),
            self.total_trials
        )
    }
}

/// How plot columns are laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlotLayout {
    /// One point per observation, stacked within each outcome
    Dot,
    /// One bar per distinct outcome
    Bar,
}

/// Coordinate columns handed to a chart renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotColumns {
    pub layout: PlotLayout,
    /// x coordinates: sampled proportions
    pub proportions: Vec<f64>,
    /// y coordinates: stack height (dot) or cumulative count (bar)
    pub counts: Vec<u64>,
    /// Whether each point falls in a highlighted tail
    pub in_tail: Vec<bool>,
}

impl PlotColumns {
    pub(crate) fn with_capacity(layout: PlotLayout, capacity: usize) -> Self {
        Self {
            layout,
            proportions: Vec::with_capacity(capacity),
            counts: Vec::with_capacity(capacity),
            in_tail: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, proportion: f64, count: u64, in_tail: bool) {
        self.proportions.push(proportion);
        self.counts.push(count);
        self.in_tail.push(in_tail);
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.proportions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.proportions.is_empty()
    }

    /// Points flagged as lying in a tail
    pub fn tail_points(&self) -> usize {
        self.in_tail.iter().filter(|&&flag| flag).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn map(entries: &[(u64, u64)]) -> FrequencyMap {
        let counts: BTreeMap<u64, u64> = entries.iter().copied().collect();
        let total_trials = counts.values().sum();
        FrequencyMap {
            counts,
            total_trials,
        }
    }

    #[test]
    fn test_empty_map() {
        let freq = FrequencyMap::new();
        assert!(freq.is_empty());
        assert_eq!(freq.len(), 0);
        assert_eq!(freq.max_count(), 0);
        assert_eq!(freq.mean_outcome(), None);
        assert!(freq.frequencies().is_empty());
        assert_eq!(freq.min_outcome(), None);
    }

    #[test]
    fn test_accessors() {
        let freq = map(&[(5, 2), (2, 1), (7, 1)]);
        assert_eq!(freq.total_trials(), 4);
        assert_eq!(freq.distinct_outcomes(), vec![2, 5, 7]);
        assert_eq!(freq.count(5), 2);
        assert_eq!(freq.count(3), 0);
        assert_eq!(freq.max_count(), 2);
        assert_eq!(freq.min_outcome(), Some(2));
        assert_eq!(freq.max_outcome(), Some(7));
        assert_eq!(freq.mean_outcome(), Some(4.75));
        assert_relative_eq!(freq.mean_proportion(10).unwrap(), 0.475);
        assert_eq!(
            freq.frequencies(),
            vec![(2, 0.25), (5, 0.5), (7, 0.25)]
        );
        assert_eq!(freq.to_string(), "FrequencyMap(3 outcomes, 4 trials)");
    }

    #[test]
    fn test_deserialize_recomputes_total() {
        let freq: FrequencyMap =
            serde_json::from_str(r#"{"counts":{"3":2,"5":1,"8":0}}"#).unwrap();
        assert_eq!(freq, map(&[(3, 2), (5, 1)]));
        assert_eq!(freq.total_trials(), 3);

        let stated: FrequencyMap =
            serde_json::from_str(r#"{"counts":{"3":2},"total_trials":2}"#).unwrap();
        assert_eq!(stated.total_trials(), 2);
    }

    #[test]
    fn test_deserialize_rejects_inconsistent_total() {
        let json = r#"{"counts":{"3":2},"total_trials":99}"#;
        assert!(serde_json::from_str::<FrequencyMap>(json).is_err());

        let overflow = r#"{"counts":{"1":18446744073709551615,"2":1}}"#;
        assert!(serde_json::from_str::<FrequencyMap>(overflow).is_err());
    }

    #[test]
    fn test_proportion_of() {
        assert_eq!(proportion_of(3, 10), 0.3);
        assert_eq!(proportion_of(3, 0), 0.0);
    }

    #[test]
    fn test_layout_serialises_lowercase() {
        assert_eq!(serde_json::to_string(&PlotLayout::Dot).unwrap(), "\"dot\"");
        assert_eq!(serde_json::to_string(&PlotLayout::Bar).unwrap(), "\"bar\"");
    }
}
