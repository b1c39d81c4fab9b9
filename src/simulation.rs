//! Interactive resampling session
//!
//! A [`Simulation`] owns everything one sampling-distribution exercise needs:
//! the selected sample with its prepared alias table, the running frequency
//! distribution, and the bound derived from it. Every mutation recomputes
//! the bound before returning, so readers never observe a stale one.

use crate::config::SimulationConfig;
use propsim_confidence::{
    BoundEstimator, ConfidenceBound, ConfidenceLevel, PercentileEstimator, Tail, TailRegion,
};
use propsim_core::{Result, Sample, UniformSource};
use propsim_distribution::{AliasTable, DiscreteSampler, ProbabilityWindow};
use propsim_histogram::{proportion_of, FrequencyMap, PlotColumns, PlotProjector};
use serde::Serialize;
use tracing::{debug, info, instrument};

/// Outcome of folding one batch of draws into the running distribution
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    /// Draws in this batch
    pub batch_size: usize,
    /// Trials accumulated since the sample was selected or reset
    pub total_trials: u64,
    /// Success count of the final draw in the batch
    pub last_outcome: Option<u64>,
    /// `last_outcome` as a proportion of the sample size
    pub last_proportion: Option<f64>,
    /// Bound after the batch
    pub bound: ConfidenceBound,
}

/// Everything derived from the selected sample
#[derive(Debug, Clone)]
struct SampleState {
    sample: Sample,
    window: ProbabilityWindow,
    table: AliasTable,
}

/// One sampling-distribution exercise
#[derive(Debug, Clone)]
pub struct Simulation {
    config: SimulationConfig,
    estimator: PercentileEstimator,
    state: Option<SampleState>,
    frequencies: FrequencyMap,
    tail: Tail,
    level: Option<ConfidenceLevel>,
    bound: ConfidenceBound,
}

impl Default for Simulation {
    fn default() -> Self {
        Self::from_valid_config(SimulationConfig::default())
    }
}

impl Simulation {
    /// Create an empty session with validated parameters
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: SimulationConfig) -> Self {
        Self {
            config,
            estimator: PercentileEstimator,
            state: None,
            frequencies: FrequencyMap::new(),
            tail: Tail::default(),
            level: None,
            bound: ConfidenceBound::NoBounds,
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Make `sample` the resampling source
    ///
    /// Builds the PMF window and alias table, then clears the running
    /// distribution. On error the previous sample and its trials are kept.
    #[instrument(skip_all, fields(n = sample.n(), num_success = sample.num_success()))]
    pub fn select_sample(&mut self, sample: Sample) -> Result<()> {
        let window = self
            .config
            .window_builder()
            .build(sample.n(), sample.proportion())?;
        let table = AliasTable::build(&window)?;
        debug!(
            min_outcome = window.min_outcome(),
            max_outcome = window.max_outcome(),
            "sample prepared"
        );

        self.state = Some(SampleState {
            sample,
            window,
            table,
        });
        self.frequencies.reset();
        self.recompute();
        Ok(())
    }

    /// Drop the current sample along with its trials
    pub fn clear_sample(&mut self) {
        self.state = None;
        self.frequencies.reset();
        self.recompute();
    }

    /// Discard collected trials, keeping the sample
    pub fn reset(&mut self) {
        self.frequencies.reset();
        self.recompute();
    }

    pub fn set_tail(&mut self, tail: Tail) {
        self.tail = tail;
        self.recompute();
    }

    /// Select the confidence level; `None` turns bounds off
    pub fn set_level(&mut self, level: Option<ConfidenceLevel>) {
        self.level = level;
        self.recompute();
    }

    /// Request `count` draws from `source` and fold them in
    ///
    /// Returns `Ok(None)` without touching `source` when no sample is
    /// selected. A source error is returned as is and leaves the session
    /// exactly as it was.
    #[instrument(skip(self, source))]
    pub fn collect<S>(&mut self, count: usize, source: &mut S) -> Result<Option<BatchSummary>>
    where
        S: UniformSource + ?Sized,
    {
        if self.state.is_none() {
            debug!("no sample selected, nothing to collect");
            return Ok(None);
        }
        let draws = source.generate_uniform_batch(count)?;
        Ok(self.apply_draws(&draws))
    }

    /// Fold a batch of uniform draws produced elsewhere
    ///
    /// `None` when no sample is selected.
    pub fn apply_draws(&mut self, draws: &[f64]) -> Option<BatchSummary> {
        let state = self.state.as_ref()?;
        let n = state.sample.n();
        let last_outcome = self.frequencies.update(draws, &state.table);
        self.recompute();

        let summary = BatchSummary {
            batch_size: draws.len(),
            total_trials: self.frequencies.total_trials(),
            last_outcome,
            last_proportion: last_outcome.map(|k| proportion_of(k, n)),
            bound: self.bound,
        };
        info!(
            batch = summary.batch_size,
            total = summary.total_trials,
            bound = %summary.bound,
            "batch collected"
        );
        Some(summary)
    }

    pub fn sample(&self) -> Option<&Sample> {
        self.state.as_ref().map(|s| &s.sample)
    }

    pub fn window(&self) -> Option<&ProbabilityWindow> {
        self.state.as_ref().map(|s| &s.window)
    }

    pub fn alias_table(&self) -> Option<&AliasTable> {
        self.state.as_ref().map(|s| &s.table)
    }

    /// Sampler for the current sample, usable outside the session
    pub fn sampler(&self) -> Option<&dyn DiscreteSampler> {
        self.alias_table().map(|t| t as &dyn DiscreteSampler)
    }

    pub fn frequencies(&self) -> &FrequencyMap {
        &self.frequencies
    }

    pub fn tail(&self) -> Tail {
        self.tail
    }

    pub fn level(&self) -> Option<ConfidenceLevel> {
        self.level
    }

    pub fn bound(&self) -> ConfidenceBound {
        self.bound
    }

    fn sample_size(&self) -> u64 {
        self.sample().map_or(0, Sample::n)
    }

    /// Proportions the current bound cuts off
    pub fn tail_region(&self) -> TailRegion {
        let Some(state) = self.state.as_ref() else {
            return TailRegion::Nothing;
        };
        let mean = self
            .frequencies
            .mean_proportion(state.sample.n())
            .unwrap_or_else(|| state.sample.proportion());
        self.bound.tail_region(mean)
    }

    /// Chart columns for the running distribution, tail points flagged
    pub fn plot(&self) -> PlotColumns {
        let region = self.tail_region();
        self.config
            .projector()
            .project_with(&self.frequencies, self.sample_size(), |x| region.contains(x))
    }

    /// Human-readable summary of the current bound
    pub fn describe_bound(&self) -> String {
        let Some(level) = self.level else {
            return ConfidenceBound::NoBounds.to_string();
        };
        match self.bound {
            ConfidenceBound::NoBounds => ConfidenceBound::NoBounds.to_string(),
            ConfidenceBound::Lower(p) => format!("{level} lower bound: {p:.4}"),
            ConfidenceBound::Upper(p) => format!("{level} upper bound: {p:.4}"),
            bound @ ConfidenceBound::TwoTail { .. } => format!("{level} interval: {bound}"),
        }
    }

    fn recompute(&mut self) {
        self.bound = self.estimator.estimate(
            &self.frequencies,
            self.sample_size(),
            self.tail,
            self.level,
        );
    }
}
