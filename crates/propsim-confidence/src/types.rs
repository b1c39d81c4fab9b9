//! Common types for confidence bounds

use propsim_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which side(s) of the sampling distribution to cut
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tail {
    /// Exclude the low end: a lower bound
    Left,
    /// Exclude the high end: an upper bound
    Right,
    /// Exclude both ends: an interval
    #[default]
    Two,
}

impl Tail {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Two => "two",
        }
    }
}

/// Confidence level type with validation
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct ConfidenceLevel(f64);

impl ConfidenceLevel {
    /// Create a new confidence level
    ///
    /// # Panics
    /// Panics if level is not in (0, 1)
    pub fn new(level: f64) -> Self {
        assert!(
            level > 0.0 && level < 1.0,
            "Confidence level must be in (0, 1)"
        );
        Self(level)
    }

    /// Create a confidence level, rejecting values outside (0, 1)
    pub fn try_new(level: f64) -> Result<Self> {
        if level > 0.0 && level < 1.0 {
            Ok(Self(level))
        } else {
            Err(Error::InvalidParameter(format!(
                "Confidence level {level} must be in (0, 1)"
            )))
        }
    }

    /// Get the confidence level value
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Get the alpha level (1 - confidence level)
    pub fn alpha(&self) -> f64 {
        1.0 - self.0
    }

    /// Mass excluded from each cut tail
    ///
    /// One-sided bounds exclude alpha from their single tail, two-sided
    /// bounds split it evenly.
    pub fn tail_area(&self, tail: Tail) -> f64 {
        match tail {
            Tail::Left | Tail::Right => self.alpha(),
            Tail::Two => self.alpha() / 2.0,
        }
    }

    /// Common confidence levels
    pub const EIGHTY: Self = Self(0.80);
    pub const NINETY: Self = Self(0.90);
    pub const NINETY_FIVE: Self = Self(0.95);
    pub const NINETY_NINE: Self = Self(0.99);

    /// The levels offered to users, in increasing order
    pub const STANDARD: [Self; 4] = [Self::EIGHTY, Self::NINETY, Self::NINETY_FIVE, Self::NINETY_NINE];
}

impl TryFrom<f64> for ConfidenceLevel {
    type Error = Error;

    fn try_from(level: f64) -> Result<Self> {
        Self::try_new(level)
    }
}

impl From<ConfidenceLevel> for f64 {
    fn from(level: ConfidenceLevel) -> Self {
        level.0
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}%", self.0 * 100.0)
    }
}

/// Bound on the sampled proportion derived from the running distribution
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConfidenceBound {
    /// Nothing to report: no sample, no level, or no trials yet
    #[default]
    NoBounds,
    /// Left tail cut: proportions at or above the bound
    Lower(f64),
    /// Right tail cut: proportions at or below the bound
    Upper(f64),
    /// Both tails cut
    TwoTail { low: f64, high: f64 },
}

impl ConfidenceBound {
    /// Check if no bound is available
    pub fn is_none(&self) -> bool {
        matches!(self, Self::NoBounds)
    }

    /// Lower end, if the bound has one
    pub fn lower(&self) -> Option<f64> {
        match *self {
            Self::Lower(p) => Some(p),
            Self::TwoTail { low, .. } => Some(low),
            _ => None,
        }
    }

    /// Upper end, if the bound has one
    pub fn upper(&self) -> Option<f64> {
        match *self {
            Self::Upper(p) => Some(p),
            Self::TwoTail { high, .. } => Some(high),
            _ => None,
        }
    }

    /// Width of a two-tail interval
    pub fn width(&self) -> Option<f64> {
        match *self {
            Self::TwoTail { low, high } => Some(high - low),
            _ => None,
        }
    }

    /// Check if a proportion lies within the bound
    ///
    /// `NoBounds` contains nothing.
    pub fn contains(&self, proportion: f64) -> bool {
        match *self {
            Self::NoBounds => false,
            Self::Lower(p) => proportion >= p,
            Self::Upper(p) => proportion <= p,
            Self::TwoTail { low, high } => proportion >= low && proportion <= high,
        }
    }

    /// Region of proportions cut off by the bound, for highlighting
    ///
    /// A two-tail bound whose endpoint coincides with the distribution's
    /// `mean` is the degenerate single-point interval: nothing is cut.
    pub fn tail_region(&self, mean: f64) -> TailRegion {
        match *self {
            Self::NoBounds => TailRegion::Nothing,
            Self::Lower(p) => TailRegion::Below(p),
            Self::Upper(p) => TailRegion::Above(p),
            Self::TwoTail { low, high } if mean == low || mean == high => TailRegion::Nothing,
            Self::TwoTail { low, high } => TailRegion::Outside { low, high },
        }
    }
}

impl fmt::Display for ConfidenceBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoBounds => write!(f, "no bounds"),
            Self::Lower(p) => write!(f, "lower bound {p:.4}"),
            Self::Upper(p) => write!(f, "upper bound {p:.4}"),
            Self::TwoTail { low, high } => write!(f, "[{low:.4}, {high:.4}]"),
        }
    }
}

/// Proportions that fall outside a confidence bound
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TailRegion {
    Nothing,
    Below(f64),
    Above(f64),
    Outside { low: f64, high: f64 },
}

impl TailRegion {
    /// Check if `proportion` lies in the cut-off region
    pub fn contains(&self, proportion: f64) -> bool {
        match *self {
            Self::Nothing => false,
            Self::Below(p) => proportion < p,
            Self::Above(p) => proportion > p,
            Self::Outside { low, high } => proportion < low || proportion > high,
        }
    }
}
