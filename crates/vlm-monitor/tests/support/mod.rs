// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

//! Seeded synthetic fixtures shaped like production monitoring pulls:
//! gaussian features with injected level steps, dead periods, volatility
//! bursts, and missing/infinite runs. Every generator takes an explicit
//! seed so fixtures are reproducible without ambient process state.

use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use rand_pcg::Pcg64;
use std::ops::Range;

pub const DAY_NS: i64 = 86_400_000_000_000;

/// Daily timestamp axis of length `n`.
pub fn day_axis(n: usize) -> Vec<i64> {
    (0..n).map(|t| t as i64 * DAY_NS).collect()
}

/// Gaussian series with the given mean and standard deviation.
pub fn gaussian_series(seed: u64, n: usize, mean: f64, sd: f64) -> Vec<f64> {
    let mut rng = Pcg64::seed_from_u64(seed);
    (0..n)
        .map(|_| mean + sd * rng.sample::<f64, _>(StandardNormal))
        .collect()
}

/// Adds a level offset to every sample from `start` on.
pub fn add_step(values: &mut [f64], start: usize, delta: f64) {
    for value in &mut values[start..] {
        *value += delta;
    }
}

/// Scales the spread of `range` around its own mean, leaving the level.
pub fn volatility_burst(values: &mut [f64], range: Range<usize>, factor: f64) {
    let slice = &values[range.clone()];
    let mean = slice.iter().sum::<f64>() / slice.len() as f64;
    for value in &mut values[range] {
        *value = (*value - mean) * factor + mean;
    }
}

/// Zeroes out a span, mimicking a dead feed.
pub fn dead_period(values: &mut [f64], range: Range<usize>) {
    for value in &mut values[range] {
        *value = 0.0;
    }
}

pub fn inject_nan(values: &mut [f64], range: Range<usize>) {
    for value in &mut values[range] {
        *value = f64::NAN;
    }
}

pub fn inject_inf(values: &mut [f64], range: Range<usize>) {
    for value in &mut values[range] {
        *value = f64::INFINITY;
    }
}
