//! Core traits for discrete sampling

use rand::Rng;
use std::ops::RangeInclusive;

/// Maps uniform variates onto outcomes of a discrete distribution
///
/// Implementations must be total: every `u` (including values outside
/// `[0, 1)` and NaN) yields an outcome inside [`support`](Self::support).
pub trait DiscreteSampler {
    /// Outcome selected by the uniform value `u`
    fn sample_uniform(&self, u: f64) -> u64;

    /// Smallest and largest outcome the sampler can produce
    fn support(&self) -> RangeInclusive<u64>;

    /// Draw one outcome from a random generator
    fn sample<R: Rng>(&self, rng: &mut R) -> u64
    where
        Self: Sized,
    {
        self.sample_uniform(rng.gen::<f64>())
    }
}

impl<S: DiscreteSampler + ?Sized> DiscreteSampler for &S {
    fn sample_uniform(&self, u: f64) -> u64 {
        (**self).sample_uniform(u)
    }

    fn support(&self) -> RangeInclusive<u64> {
        (**self).support()
    }
}

/// Clamp a uniform draw into `[0, 1)`; NaN maps to zero.
#[inline]
pub(crate) fn clamp_unit(u: f64) -> f64 {
    const LARGEST_BELOW_ONE: f64 = 1.0 - f64::EPSILON / 2.0;
    if u >= 0.0 {
        u.min(LARGEST_BELOW_ONE)
    } else {
        0.0
    }
}
