// Copyright 2026 the Bubblewall Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Integer sampling sources for the placement engine.
//!
//! [`Sampler`] is the only randomness the placement engine consumes. Hosts
//! normally wrap a `rand` generator in [`RandSampler`]; tests and scripted
//! demos can replay a fixed list of values with [`SequenceSampler`].

use alloc::vec::Vec;

use rand::{Rng, RngCore};

/// Source of uniformly distributed integers.
pub trait Sampler {
    /// Returns an integer in `[0, bound)`, or `0` when `bound <= 0`.
    fn uniform_below(&mut self, bound: i32) -> i32;
}

impl<S: Sampler + ?Sized> Sampler for &mut S {
    fn uniform_below(&mut self, bound: i32) -> i32 {
        (**self).uniform_below(bound)
    }
}

/// Adapts any [`RngCore`] into a [`Sampler`].
#[derive(Clone, Debug)]
pub struct RandSampler<R> {
    rng: R,
}

impl<R: RngCore> RandSampler<R> {
    /// Wraps `rng`.
    #[must_use]
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Returns the wrapped generator.
    #[must_use]
    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl<R: RngCore> Sampler for RandSampler<R> {
    fn uniform_below(&mut self, bound: i32) -> i32 {
        if bound <= 0 {
            return 0;
        }
        self.rng.gen_range(0..bound)
    }
}

/// Replays a fixed list of values, cycling when exhausted.
///
/// Each value is reduced into `[0, bound)` with a Euclidean remainder, so
/// values already inside the range are returned unchanged.
#[derive(Clone, Debug, Default)]
pub struct SequenceSampler {
    values: Vec<i32>,
    cursor: usize,
}

impl SequenceSampler {
    /// Creates a sampler that replays `values`.
    #[must_use]
    pub fn new(values: Vec<i32>) -> Self {
        Self { values, cursor: 0 }
    }

    /// Number of values drawn so far.
    #[must_use]
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl Sampler for SequenceSampler {
    fn uniform_below(&mut self, bound: i32) -> i32 {
        if self.values.is_empty() {
            return 0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        if bound <= 0 { 0 } else { value.rem_euclid(bound) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn rand_sampler_stays_in_range() {
        let mut sampler = RandSampler::new(SmallRng::seed_from_u64(7));
        for _ in 0..1000 {
            let v = sampler.uniform_below(250);
            assert!((0..250).contains(&v), "{v} out of range");
        }
    }

    #[test]
    fn non_positive_bound_yields_zero() {
        let mut sampler = RandSampler::new(SmallRng::seed_from_u64(7));
        assert_eq!(sampler.uniform_below(0), 0);
        assert_eq!(sampler.uniform_below(-40), 0);

        let mut seq = SequenceSampler::new(alloc::vec![5]);
        assert_eq!(seq.uniform_below(-1), 0);
    }

    #[test]
    fn sequence_sampler_cycles_and_wraps() {
        let mut seq = SequenceSampler::new(alloc::vec![3, 12, -1]);
        assert_eq!(seq.uniform_below(10), 3);
        assert_eq!(seq.uniform_below(10), 2);
        assert_eq!(seq.uniform_below(10), 9);
        assert_eq!(seq.uniform_below(10), 3);
        assert_eq!(seq.draws(), 4);
    }
}
