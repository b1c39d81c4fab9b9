//! Shared utilities for integration tests

pub use approx::assert_relative_eq;

pub const EPSILON: f64 = 1e-9;

/// Trial counts that exercise small, boundary and large binomial sizes
pub fn edge_case_trial_counts() -> Vec<u64> {
    vec![
        1,       // Single trial
        2,       // Smallest symmetric case
        10,      // Classroom sample
        99,      // Just under the default trim threshold
        100,     // Default trim threshold
        1_000,   // Large but exact
        100_000, // Coefficients far beyond f64 range
    ]
}
