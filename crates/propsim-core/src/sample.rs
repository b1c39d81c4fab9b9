//! Dichotomous sample records
//!
//! A [`Sample`] is what the host hands the engine once a dataset and a
//! success category have been chosen. It is immutable; re-selecting a
//! category produces a new sample.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Success/failure counts for one categorical column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "SampleRaw")]
pub struct Sample {
    n: u64,
    num_success: u64,
    num_failures: u64,
    success_label: String,
    failure_label: String,
}

/// Serialized form, checked through [`Sample::new`]
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SampleRaw {
    #[serde(default)]
    n: Option<u64>,
    num_success: u64,
    num_failures: u64,
    success_label: String,
    failure_label: String,
}

impl TryFrom<SampleRaw> for Sample {
    type Error = Error;

    fn try_from(raw: SampleRaw) -> Result<Self> {
        let sample = Self::new(
            raw.success_label,
            raw.num_success,
            raw.failure_label,
            raw.num_failures,
        )?;
        match raw.n {
            Some(n) if n != sample.n => Err(Error::InvalidInput(format!(
                "sample size {n} does not match {} + {}",
                sample.num_success, sample.num_failures
            ))),
            _ => Ok(sample),
        }
    }
}

impl Sample {
    /// Create a sample from its two category counts
    ///
    /// Fails with [`Error::InsufficientData`] when both counts are zero.
    pub fn new(
        success_label: impl Into<String>,
        num_success: u64,
        failure_label: impl Into<String>,
        num_failures: u64,
    ) -> Result<Self> {
        let n = num_success
            .checked_add(num_failures)
            .ok_or_else(|| Error::InvalidInput("sample size overflows u64".to_string()))?;
        if n == 0 {
            return Err(Error::empty_sample());
        }
        Ok(Self {
            n,
            num_success,
            num_failures,
            success_label: success_label.into(),
            failure_label: failure_label.into(),
        })
    }

    /// Count a categorical column against a chosen success category
    ///
    /// Every value equal to `success_label` is a success; anything else is a
    /// failure labelled `"not <success_label>"`.
    pub fn from_categories<I, S>(values: I, success_label: &str) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let (successes, failures) =
            values
                .into_iter()
                .fold((0u64, 0u64), |(successes, failures), value| {
                    if value.as_ref() == success_label {
                        (successes + 1, failures)
                    } else {
                        (successes, failures + 1)
                    }
                });
        Self::new(
            success_label,
            successes,
            format!("not {success_label}"),
            failures,
        )
    }

    /// Total number of observations
    pub fn n(&self) -> u64 {
        self.n
    }

    /// Number of observations in the success category
    pub fn num_success(&self) -> u64 {
        self.num_success
    }

    /// Number of observations outside the success category
    pub fn num_failures(&self) -> u64 {
        self.num_failures
    }

    pub fn success_label(&self) -> &str {
        &self.success_label
    }

    pub fn failure_label(&self) -> &str {
        &self.failure_label
    }

    /// Observed proportion of successes, `num_success / n`
    pub fn proportion(&self) -> f64 {
        self.num_success as f64 / self.n as f64
    }
}

impl fmt::Display for Sample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} / {} ({}: {}), p = {:.4}",
            self.success_label,
            self.num_success,
            self.n,
            self.failure_label,
            self.num_failures,
            self.proportion()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_new_sample() {
        let sample = Sample::new("heads", 3, "tails", 7).unwrap();
        assert_eq!(sample.n(), 10);
        assert_eq!(sample.num_success(), 3);
        assert_eq!(sample.num_failures(), 7);
        assert_relative_eq!(sample.proportion(), 0.3);
    }

    #[test]
    fn test_empty_sample_rejected() {
        let err = Sample::new("yes", 0, "no", 0).unwrap_err();
        assert!(matches!(err, Error::InsufficientData { .. }));
    }

    #[test]
    fn test_from_categories() {
        let column = ["cat", "dog", "cat", "bird", "cat"];
        let sample = Sample::from_categories(column, "cat").unwrap();
        assert_eq!(sample.n(), 5);
        assert_eq!(sample.num_success(), 3);
        assert_eq!(sample.num_failures(), 2);
        assert_eq!(sample.failure_label(), "not cat");
    }

    #[test]
    fn test_from_categories_without_success() {
        let sample = Sample::from_categories(vec!["a".to_string(), "b".to_string()], "z").unwrap();
        assert_eq!(sample.num_success(), 0);
        assert_eq!(sample.proportion(), 0.0);
    }

    #[test]
    fn test_serde_round_trip_uses_camel_case() {
        let sample = Sample::new("left", 4, "right", 6).unwrap();
        let json = serde_json::to_string(&sample).unwrap();
        assert!(json.contains("\"numSuccess\":4"));
        let back: Sample = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sample);
    }

    #[test]
    fn test_deserialize_rejects_inconsistent_counts() {
        let empty = r#"{"n":0,"numSuccess":0,"numFailures":0,"successLabel":"a","failureLabel":"b"}"#;
        assert!(serde_json::from_str::<Sample>(empty).is_err());

        let mismatch = r#"{"n":9,"numSuccess":3,"numFailures":7,"successLabel":"a","failureLabel":"b"}"#;
        assert!(serde_json::from_str::<Sample>(mismatch).is_err());

        let without_n = r#"{"numSuccess":3,"numFailures":7,"successLabel":"a","failureLabel":"b"}"#;
        let sample: Sample = serde_json::from_str(without_n).unwrap();
        assert_eq!(sample.n(), 10);
        assert_relative_eq!(sample.proportion(), 0.3);
    }

    #[test]
    fn test_display() {
        let sample = Sample::new("left", 1, "right", 3).unwrap();
        assert_eq!(sample.to_string(), "left: 1 / 4 (right: 3), p = 0.2500");
    }
}
