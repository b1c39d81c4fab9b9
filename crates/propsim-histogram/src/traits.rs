//! Core traits for plot projection

use crate::types::{FrequencyMap, PlotColumns, PlotLayout};

/// Trait for reshaping a frequency distribution into chart coordinates
pub trait PlotProjector {
    /// Layout used for a distribution holding `total_trials` observations
    fn layout_for(&self, total_trials: u64) -> PlotLayout;

    /// Project `frequencies` of a sample of size `n`, flagging every point
    /// whose proportion satisfies `in_tail`
    fn project_with<F>(&self, frequencies: &FrequencyMap, n: u64, in_tail: F) -> PlotColumns
    where
        F: Fn(f64) -> bool;

    /// Project without tail highlighting
    fn project(&self, frequencies: &FrequencyMap, n: u64) -> PlotColumns {
        self.project_with(frequencies, n, |_| false)
    }
}
