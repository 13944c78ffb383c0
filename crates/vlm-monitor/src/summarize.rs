// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use vlm_core::{ChangeKind, ChangePointRecord, percentiles_of_finite};

/// Emits one boundary record per merged boundary with the enclosing
/// segment's percentile summary.
///
/// Spans iterate `[0, b1), [b1, b2), ...` over the feature's raw values;
/// percentiles are computed over each span's finite samples, so a span with
/// no observed value reports NaN at every rank. The record timestamp is
/// `timestamps[min(n - 1, boundary)]`.
pub fn summarize_segments(
    feature: &str,
    raw: &[f64],
    timestamps: &[i64],
    boundaries: &[usize],
    ranks: &[f64],
) -> Vec<ChangePointRecord> {
    let n = raw.len();
    let mut records = Vec::with_capacity(boundaries.len());
    let mut start = 0usize;
    for &end in boundaries {
        let values = percentiles_of_finite(&raw[start..end], ranks);
        records.push(ChangePointRecord {
            feature: feature.to_string(),
            timestamp_ns: timestamps[end.min(n - 1)],
            percentiles: ranks.to_vec(),
            values,
            kind: ChangeKind::TrendOrVolatility,
        });
        start = end;
    }
    records
}
