//! Plot projection strategies
//!
//! Small simulations are drawn as stacked dots, one per observation; once
//! the number of trials makes that unreadable (and expensive) the same data
//! is drawn as one bar per distinct outcome.

use crate::traits::PlotProjector;
use crate::types::{proportion_of, FrequencyMap, PlotColumns, PlotLayout};

/// Trial count at which plots switch from dots to bars
pub const DEFAULT_PLOT_THRESHOLD: u64 = 5000;

/// Dot layout below a trial threshold, bar layout at or above it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdProjector {
    threshold: u64,
}

impl Default for ThresholdProjector {
    fn default() -> Self {
        Self::new(DEFAULT_PLOT_THRESHOLD)
    }
}

impl ThresholdProjector {
    /// Create a projector switching to bars at `threshold` trials
    pub fn new(threshold: u64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> u64 {
        self.threshold
    }
}

impl PlotProjector for ThresholdProjector {
    fn layout_for(&self, total_trials: u64) -> PlotLayout {
        if total_trials < self.threshold {
            PlotLayout::Dot
        } else {
            PlotLayout::Bar
        }
    }

    fn project_with<F>(&self, frequencies: &FrequencyMap, n: u64, in_tail: F) -> PlotColumns
    where
        F: Fn(f64) -> bool,
    {
        match self.layout_for(frequencies.total_trials()) {
            PlotLayout::Dot => DotProjector.project_with(frequencies, n, in_tail),
            PlotLayout::Bar => BarProjector.project_with(frequencies, n, in_tail),
        }
    }
}

/// One point per observation, y = position in the outcome's stack
#[derive(Debug, Clone, Copy, Default)]
pub struct DotProjector;

impl PlotProjector for DotProjector {
    fn layout_for(&self, _total_trials: u64) -> PlotLayout {
        PlotLayout::Dot
    }

    fn project_with<F>(&self, frequencies: &FrequencyMap, n: u64, in_tail: F) -> PlotColumns
    where
        F: Fn(f64) -> bool,
    {
        let mut columns =
            PlotColumns::with_capacity(PlotLayout::Dot, frequencies.total_trials() as usize);
        for (outcome, count) in frequencies.iter() {
            let proportion = proportion_of(outcome, n);
            let flagged = in_tail(proportion);
            for height in 1..=count {
                columns.push(proportion, height, flagged);
            }
        }
        columns
    }
}

/// One point per distinct outcome, y = cumulative count
#[derive(Debug, Clone, Copy, Default)]
pub struct BarProjector;

impl PlotProjector for BarProjector {
    fn layout_for(&self, _total_trials: u64) -> PlotLayout {
        PlotLayout::Bar
    }

    fn project_with<F>(&self, frequencies: &FrequencyMap, n: u64, in_tail: F) -> PlotColumns
    where
        F: Fn(f64) -> bool,
    {
        let mut columns = PlotColumns::with_capacity(PlotLayout::Bar, frequencies.len());
        for (outcome, count) in frequencies.iter() {
            let proportion = proportion_of(outcome, n);
            columns.push(proportion, count, in_tail(proportion));
        }
        columns
    }
}
