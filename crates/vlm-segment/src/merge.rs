// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

/// Union of the level-channel and volatility-channel boundary sets.
///
/// Exact duplicates collapse; adjacent but distinct boundaries from the two
/// channels are both kept, so closely spaced pairs are expected output.
pub fn merge_boundaries(level: &[usize], volatility: &[usize]) -> Vec<usize> {
    let mut merged: Vec<usize> = level.iter().chain(volatility.iter()).copied().collect();
    merged.sort_unstable();
    merged.dedup();
    merged
}
