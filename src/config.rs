//! Simulation parameters

use propsim_core::{Error, Result};
use propsim_distribution::{BinomialWindow, DEFAULT_TRIM_THRESHOLD, DEFAULT_WINDOW_STD_DEVS};
use propsim_histogram::{ThresholdProjector, DEFAULT_PLOT_THRESHOLD};
use serde::{Deserialize, Serialize};

/// Tunable parameters of a [`Simulation`](crate::Simulation)
///
/// Missing fields in serialized form fall back to their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SimulationConfig {
    /// Sample size from which the PMF window is trimmed around the mean
    pub trim_threshold: u64,
    /// Half-width of a trimmed window in standard deviations
    pub window_std_devs: f64,
    /// Trial count at which plots switch from dots to bars
    pub plot_threshold: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            trim_threshold: DEFAULT_TRIM_THRESHOLD,
            window_std_devs: DEFAULT_WINDOW_STD_DEVS,
            plot_threshold: DEFAULT_PLOT_THRESHOLD,
        }
    }
}

impl SimulationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the trim threshold.
    pub fn with_trim_threshold(mut self, trim_threshold: u64) -> Self {
        self.trim_threshold = trim_threshold;
        self
    }

    /// Sets the trimmed window half-width.
    pub fn with_window_std_devs(mut self, window_std_devs: f64) -> Self {
        self.window_std_devs = window_std_devs;
        self
    }

    /// Sets the dot/bar switch point.
    pub fn with_plot_threshold(mut self, plot_threshold: u64) -> Self {
        self.plot_threshold = plot_threshold;
        self
    }

    /// Reject parameters no window or plot can be built from
    pub fn validate(&self) -> Result<()> {
        if !self.window_std_devs.is_finite() || self.window_std_devs <= 0.0 {
            return Err(Error::InvalidParameter(format!(
                "window_std_devs must be positive and finite, got {}",
                self.window_std_devs
            )));
        }
        if self.plot_threshold == 0 {
            return Err(Error::InvalidParameter(
                "plot_threshold must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub(crate) fn window_builder(&self) -> BinomialWindow {
        BinomialWindow::new()
            .with_trim_threshold(self.trim_threshold)
            .with_std_devs(self.window_std_devs)
    }

    pub(crate) fn projector(&self) -> ThresholdProjector {
        ThresholdProjector::new(self.plot_threshold)
    }
}
