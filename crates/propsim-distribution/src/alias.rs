//! Alias-table ("squared histogram") sampling
//!
//! The unit interval is cut into `k` equal slots, one per outcome. Each slot
//! is split at a threshold: uniform values below it select the slot's own
//! outcome, values above it select the slot's alias. Building the table
//! redistributes mass from over-full slots into under-full ones until every
//! slot holds exactly `1/k`, after which a draw costs one multiply and one
//! comparison.
//!
//! Construction pairs the lightest under-full slot with the heaviest
//! over-full slot at every step, using a min-heap and a max-heap keyed by
//! remaining mass. Ties are broken by the lower slot index.

use crate::pmf::{raw_max_outcome, ProbabilityWindow};
use crate::traits::{clamp_unit, DiscreteSampler};
use ordered_float::OrderedFloat;
use propsim_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::ops::RangeInclusive;
use tracing::{debug, instrument, trace};

/// O(1) sampler for a [`ProbabilityWindow`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "AliasTableRaw")]
pub struct AliasTable {
    min_offset: u64,
    /// Absolute split points in `[j/k, (j+1)/k]` for each slot `j`
    thresholds: Vec<f64>,
    /// Slot index receiving the mass above each threshold
    aliases: Vec<usize>,
}

/// Slack allowed when checking stored thresholds against their slot
const THRESHOLD_SLACK: f64 = 1e-9;

#[derive(Deserialize)]
struct AliasTableRaw {
    min_offset: u64,
    thresholds: Vec<f64>,
    aliases: Vec<usize>,
}

impl TryFrom<AliasTableRaw> for AliasTable {
    type Error = Error;

    fn try_from(raw: AliasTableRaw) -> Result<Self> {
        let k = raw.thresholds.len();
        if k == 0 {
            return Err(Error::InvalidInput("alias table needs at least one slot".to_string()));
        }
        if raw.aliases.len() != k {
            return Err(Error::InvalidInput(format!(
                "alias table has {k} thresholds but {} aliases",
                raw.aliases.len()
            )));
        }
        if raw_max_outcome(raw.min_offset, k).is_none() {
            return Err(Error::InvalidInput(format!(
                "alias table of {k} slots starting at {} overflows u64",
                raw.min_offset
            )));
        }
        if let Some(alias) = raw.aliases.iter().find(|&&a| a >= k) {
            return Err(Error::InvalidInput(format!(
                "alias {alias} points outside {k} slots"
            )));
        }
        for (j, &threshold) in raw.thresholds.iter().enumerate() {
            let low = j as f64 / k as f64 - THRESHOLD_SLACK;
            let high = (j + 1) as f64 / k as f64 + THRESHOLD_SLACK;
            if !(threshold >= low && threshold <= high) {
                return Err(Error::InvalidInput(format!(
                    "threshold {threshold} lies outside slot {j}"
                )));
            }
        }
        Ok(Self {
            min_offset: raw.min_offset,
            thresholds: raw.thresholds,
            aliases: raw.aliases,
        })
    }
}

type UnderBar = Reverse<(OrderedFloat<f64>, usize)>;
type OverBar = (OrderedFloat<f64>, Reverse<usize>);

impl AliasTable {
    /// Build the table for a probability window
    ///
    /// The window's mass is normalised first, so a trimmed window samples
    /// from its conditional distribution.
    #[instrument(skip(window), fields(k = window.len(), min_outcome = window.min_outcome()))]
    pub fn build(window: &ProbabilityWindow) -> Result<Self> {
        let k = window.len();
        let total = window.total_mass();
        if !(total.is_finite() && total > 0.0) {
            return Err(Error::Computation(format!(
                "cannot build alias table from total mass {total}"
            )));
        }

        let target = 1.0 / k as f64;
        let mut mass: Vec<f64> = window.probabilities().iter().map(|p| p / total).collect();
        let mut thresholds: Vec<f64> = (0..k).map(|j| (j + 1) as f64 * target).collect();
        let mut aliases: Vec<usize> = (0..k).collect();

        let mut under: BinaryHeap<UnderBar> = BinaryHeap::new();
        let mut over: BinaryHeap<OverBar> = BinaryHeap::new();
        for (j, &m) in mass.iter().enumerate() {
            classify(j, m, target, &mut under, &mut over);
        }
        debug!(
            under = under.len(),
            over = over.len(),
            "partitioned bars around target mass"
        );

        let mut transfers = 0usize;
        loop {
            let (Some(&Reverse((small_mass, small))), Some(&(_, Reverse(large)))) =
                (under.peek(), over.peek())
            else {
                break;
            };
            under.pop();
            over.pop();

            let small_mass = small_mass.into_inner();
            thresholds[small] = small as f64 * target + small_mass;
            aliases[small] = large;

            mass[large] -= target - small_mass;
            classify(large, mass[large], target, &mut under, &mut over);
            transfers += 1;
        }

        // Rounding can strand a few bars a hair away from the target once
        // the opposite bucket is empty. They keep their whole slot.
        let stranded = under.len() + over.len();
        if stranded > 0 {
            trace!(stranded, "treating leftover bars as full");
        }
        debug!(transfers, "alias table built");

        Ok(Self {
            min_offset: window.min_outcome(),
            thresholds,
            aliases,
        })
    }

    /// Outcome represented by slot 0
    pub fn min_offset(&self) -> u64 {
        self.min_offset
    }

    /// Largest outcome the table can produce
    pub fn max_outcome(&self) -> u64 {
        self.min_offset + self.thresholds.len() as u64 - 1
    }

    /// Number of slots
    pub fn len(&self) -> usize {
        self.thresholds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.thresholds.is_empty()
    }

    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    pub fn aliases(&self) -> &[usize] {
        &self.aliases
    }

    /// Fraction of slot `j` that belongs to the slot's own outcome
    pub fn own_fraction(&self, j: usize) -> f64 {
        let k = self.thresholds.len() as f64;
        ((self.thresholds[j] - j as f64 / k) * k).clamp(0.0, 1.0)
    }

    /// Marginal probability of each outcome implied by the table
    ///
    /// Indexed by `outcome - min_offset`; reconstructs the normalised window.
    pub fn induced_distribution(&self) -> Vec<f64> {
        let k = self.thresholds.len();
        let slot = 1.0 / k as f64;
        let mut mass = vec![0.0; k];
        for j in 0..k {
            let own = self.own_fraction(j) * slot;
            mass[j] += own;
            mass[self.aliases[j]] += slot - own;
        }
        mass
    }
}

impl DiscreteSampler for AliasTable {
    #[inline]
    fn sample_uniform(&self, u: f64) -> u64 {
        let u = clamp_unit(u);
        let k = self.thresholds.len();
        let j = ((u * k as f64) as usize).min(k - 1);
        let slot = match u.partial_cmp(&self.thresholds[j]) {
            Some(Ordering::Less) => j,
            _ => self.aliases[j],
        };
        self.min_offset + slot as u64
    }

    fn support(&self) -> RangeInclusive<u64> {
        self.min_offset..=self.max_outcome()
    }
}

fn classify(
    j: usize,
    mass: f64,
    target: f64,
    under: &mut BinaryHeap<UnderBar>,
    over: &mut BinaryHeap<OverBar>,
) {
    match mass.partial_cmp(&target) {
        Some(Ordering::Less) => under.push(Reverse((OrderedFloat(mass), j))),
        Some(Ordering::Greater) => over.push((OrderedFloat(mass), Reverse(j))),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pmf::binomial_window;
    use approx::assert_relative_eq;

    fn window(probabilities: &[f64]) -> ProbabilityWindow {
        ProbabilityWindow::from_probabilities(0, probabilities.to_vec()).unwrap()
    }

    #[test]
    fn test_two_outcome_worked_example() {
        let table = AliasTable::build(&window(&[0.25, 0.75])).unwrap();
        assert_eq!(table.thresholds(), &[0.25, 1.0]);
        assert_eq!(table.aliases(), &[1, 1]);

        assert_eq!(table.sample_uniform(0.10), 0);
        assert_eq!(table.sample_uniform(0.30), 1);
        assert_eq!(table.sample_uniform(0.60), 1);
    }

    #[test]
    fn test_uniform_window_needs_no_aliases() {
        let table = AliasTable::build(&window(&[0.25; 4])).unwrap();
        assert_eq!(table.aliases(), &[0, 1, 2, 3]);
        for j in 0..4 {
            assert_relative_eq!(table.own_fraction(j), 1.0);
        }
    }

    #[test]
    fn test_induced_distribution_matches_binomial() {
        let window = binomial_window(10, 0.3).unwrap();
        let table = AliasTable::build(&window).unwrap();
        for (expected, actual) in window.probabilities().iter().zip(table.induced_distribution()) {
            assert_relative_eq!(*expected, actual, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_offset_is_applied() {
        let window = ProbabilityWindow::from_probabilities(40, vec![0.5, 0.5]).unwrap();
        let table = AliasTable::build(&window).unwrap();
        assert_eq!(table.sample_uniform(0.2), 40);
        assert_eq!(table.sample_uniform(0.7), 41);
        assert_eq!(table.support(), 40..=41);
    }

    #[test]
    fn test_out_of_range_draws_stay_in_support() {
        let table = AliasTable::build(&window(&[0.1, 0.2, 0.7])).unwrap();
        for u in [-1.0, 1.0, 2.5, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(table.support().contains(&table.sample_uniform(u)));
        }
    }

    #[test]
    fn test_single_outcome() {
        let window = binomial_window(300, 1.0).unwrap();
        let table = AliasTable::build(&window).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.sample_uniform(0.0), 300);
        assert_eq!(table.sample_uniform(0.999), 300);
    }

    #[test]
    fn test_zero_mass_outcomes_are_never_sampled() {
        let table = AliasTable::build(&window(&[0.0, 1.0, 0.0])).unwrap();
        for i in 0..1000 {
            assert_eq!(table.sample_uniform(i as f64 / 1000.0), 1);
        }
    }

    #[test]
    fn test_deserialize_keeps_built_table() {
        let table = AliasTable::build(&binomial_window(12, 0.4).unwrap()).unwrap();
        let json = serde_json::to_string(&table).unwrap();
        let back: AliasTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back, table);
    }

    #[test]
    fn test_deserialize_rejects_broken_tables() {
        for json in [
            r#"{"min_offset":0,"thresholds":[],"aliases":[]}"#,
            r#"{"min_offset":0,"thresholds":[0.25,1.0],"aliases":[7,1]}"#,
            r#"{"min_offset":0,"thresholds":[0.25,1.0],"aliases":[1]}"#,
            r#"{"min_offset":0,"thresholds":[0.75,1.0],"aliases":[1,1]}"#,
            r#"{"min_offset":0,"thresholds":[0.25,null],"aliases":[1,1]}"#,
            r#"{"min_offset":18446744073709551615,"thresholds":[0.25,1.0],"aliases":[1,1]}"#,
        ] {
            assert!(serde_json::from_str::<AliasTable>(json).is_err(), "{json}");
        }

        let table: AliasTable =
            serde_json::from_str(r#"{"min_offset":0,"thresholds":[0.25,1.0],"aliases":[1,1]}"#).unwrap();
        assert_eq!(table.sample_uniform(0.3), 1);
    }

    #[test]
    fn test_unnormalised_window_is_normalised() {
        let table = AliasTable::build(&window(&[1.0, 3.0])).unwrap();
        let induced = table.induced_distribution();
        assert_relative_eq!(induced[0], 0.25, epsilon = 1e-12);
        assert_relative_eq!(induced[1], 0.75, epsilon = 1e-12);
    }
}
