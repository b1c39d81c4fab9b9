//! Log-space arithmetic for binomial probabilities
//!
//! Binomial coefficients overflow `f64` long before the trial counts a
//! classroom dataset can reach, so every helper here works with base-10
//! logarithms and only the caller exponentiates the final per-outcome value.

/// Binomial helpers in log10 space
pub mod binomial {
    /// `x * log10(p)` with the convention `0 * log10(0) == 0`.
    ///
    /// A degenerate probability (`p == 0` or `p == 1`) makes one of the
    /// PMF factors `log10(0) = -inf`; multiplying it by a zero exponent must
    /// contribute nothing rather than NaN.
    #[inline]
    pub fn xlog10(x: f64, p: f64) -> f64 {
        if x == 0.0 {
            0.0
        } else {
            x * p.log10()
        }
    }

    /// `log10(C(n, k))` computed directly as
    /// `sum_{i=0}^{k-1} log10(n - i) - log10(i + 1)`.
    ///
    /// Returns `-inf` when `k > n`.
    pub fn log10_choose(n: u64, k: u64) -> f64 {
        if k > n {
            return f64::NEG_INFINITY;
        }
        // C(n, k) == C(n, n - k); the shorter sum loses less precision.
        let k = k.min(n - k);
        compensated_sum((0..k).map(|i| ((n - i) as f64).log10() - ((i + 1) as f64).log10()))
    }

    /// Neumaier summation; the direct coefficient sum runs to `n / 2` terms.
    fn compensated_sum(terms: impl Iterator<Item = f64>) -> f64 {
        let (sum, compensation) = terms.fold((0.0f64, 0.0f64), |(sum, c), term| {
            let t = sum + term;
            let c = if sum.abs() >= term.abs() {
                c + ((sum - t) + term)
            } else {
                c + ((term - t) + sum)
            };
            (t, c)
        });
        sum + compensation
    }

    /// Advance `log10(C(n, k - 1))` to `log10(C(n, k))`.
    #[inline]
    pub fn log10_choose_step(previous: f64, n: u64, k: u64) -> f64 {
        debug_assert!(k >= 1 && k <= n);
        previous + ((n - k + 1) as f64).log10() - (k as f64).log10()
    }

    /// `log10` of the Binomial(n, p) probability of `k` successes given
    /// `log10(C(n, k))`.
    #[inline]
    pub fn log10_pmf_term(log10_coefficient: f64, n: u64, k: u64, p: f64) -> f64 {
        log10_coefficient + xlog10(k as f64, p) + xlog10((n - k) as f64, 1.0 - p)
    }

}
