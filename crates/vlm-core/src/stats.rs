// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

/// Percentiles of the finite samples in `values`, one per requested rank.
///
/// Uses linear interpolation between order statistics: rank q maps to the
/// fractional position `q / 100 * (m - 1)` among the m sorted finite
/// samples. NaN and infinite samples are skipped; when no finite sample
/// exists every requested rank yields NaN.
pub fn percentiles_of_finite(values: &[f64], ranks: &[f64]) -> Vec<f64> {
    let mut finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        return vec![f64::NAN; ranks.len()];
    }
    finite.sort_by(f64::total_cmp);
    ranks
        .iter()
        .map(|&rank| interpolate(&finite, rank))
        .collect()
}

fn interpolate(sorted: &[f64], rank: f64) -> f64 {
    let last = sorted.len() - 1;
    let position = rank / 100.0 * last as f64;
    let lower = (position.floor() as usize).min(last);
    if lower == last {
        return sorted[last];
    }
    let fraction = position - lower as f64;
    sorted[lower] + fraction * (sorted[lower + 1] - sorted[lower])
}
