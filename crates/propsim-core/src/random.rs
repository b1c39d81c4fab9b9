//! Uniform random sources
//!
//! The engine never generates randomness on its own: a host-provided source
//! hands over a batch of uniform values in `[0, 1)` per collect request.

use crate::{Error, Result};
use rand::prelude::*;
use tracing::trace;

/// A supplier of independent uniform values in `[0, 1)`
pub trait UniformSource {
    /// Produce exactly `count` uniform values
    ///
    /// An error means the batch never arrived; callers must leave their
    /// state untouched.
    fn generate_uniform_batch(&mut self, count: usize) -> Result<Vec<f64>>;
}

impl<S: UniformSource + ?Sized> UniformSource for &mut S {
    fn generate_uniform_batch(&mut self, count: usize) -> Result<Vec<f64>> {
        (**self).generate_uniform_batch(count)
    }
}

impl<S: UniformSource + ?Sized> UniformSource for Box<S> {
    fn generate_uniform_batch(&mut self, count: usize) -> Result<Vec<f64>> {
        (**self).generate_uniform_batch(count)
    }
}

/// [`UniformSource`] backed by any `rand` generator
#[derive(Debug, Clone)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    /// Wrap an existing generator
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Borrow the underlying generator
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }
}

impl RngSource<StdRng> {
    /// Reproducible source for tests and replays
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Fresh source seeded from the operating system
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> UniformSource for RngSource<R> {
    fn generate_uniform_batch(&mut self, count: usize) -> Result<Vec<f64>> {
        trace!(count, "generating uniform batch");
        Ok((0..count).map(|_| self.rng.gen::<f64>()).collect())
    }
}

/// Replays a fixed sequence of draws, failing once it runs dry
///
/// Useful for hosts that pre-generate randomness elsewhere and for
/// deterministic scenario tests.
#[derive(Debug, Clone, Default)]
pub struct ReplaySource {
    draws: Vec<f64>,
    position: usize,
}

impl ReplaySource {
    pub fn new(draws: Vec<f64>) -> Self {
        Self { draws, position: 0 }
    }

    /// Draws not yet handed out
    pub fn remaining(&self) -> usize {
        self.draws.len() - self.position
    }
}

impl UniformSource for ReplaySource {
    fn generate_uniform_batch(&mut self, count: usize) -> Result<Vec<f64>> {
        if count > self.remaining() {
            return Err(Error::RandomSource(format!(
                "requested {count} draws but only {} remain",
                self.remaining()
            )));
        }
        let batch = self.draws[self.position..self.position + count].to_vec();
        self.position += count;
        Ok(batch)
    }
}
