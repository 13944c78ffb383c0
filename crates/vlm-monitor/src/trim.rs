// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use std::collections::HashMap;
use vlm_core::{ChangePointTable, FlatChangePoint};

/// Removes each feature's close-out record.
///
/// For every feature with more than one record, the record with the maximum
/// timestamp (on ties, the latest row) is dropped; a feature with a single
/// record keeps it. The close-out boundary is emitted unconditionally by
/// the summarizer, so dropping it leaves only genuine change evidence.
pub fn drop_end_changepoints(table: &ChangePointTable) -> ChangePointTable {
    struct Latest {
        count: usize,
        max_index: usize,
        max_timestamp: i64,
    }

    let mut per_feature: HashMap<&str, Latest> = HashMap::new();
    for (index, record) in table.records().iter().enumerate() {
        per_feature
            .entry(record.feature.as_str())
            .and_modify(|latest| {
                latest.count += 1;
                if record.timestamp_ns >= latest.max_timestamp {
                    latest.max_timestamp = record.timestamp_ns;
                    latest.max_index = index;
                }
            })
            .or_insert(Latest {
                count: 1,
                max_index: index,
                max_timestamp: record.timestamp_ns,
            });
    }

    let kept = table
        .records()
        .iter()
        .enumerate()
        .filter(|(index, record)| {
            let latest = &per_feature[record.feature.as_str()];
            latest.count == 1 || *index != latest.max_index
        })
        .map(|(_, record)| record.clone())
        .collect();
    ChangePointTable::from_records(kept)
}

/// Reshapes grouped records into one row per (record, percentile) pair.
///
/// With a `keep_percentiles` filter only rows whose rank is in the kept set
/// survive; anomaly rows have no rank and are dropped by any filter. Without
/// a filter, each anomaly becomes a single NaN-valued row.
pub fn explode(
    table: &ChangePointTable,
    keep_percentiles: Option<&[f64]>,
) -> Vec<FlatChangePoint> {
    let mut rows = Vec::new();
    for record in table.records() {
        if record.kind.is_anomaly() {
            if keep_percentiles.is_none() {
                rows.push(FlatChangePoint {
                    feature: record.feature.clone(),
                    timestamp_ns: record.timestamp_ns,
                    percentile: None,
                    value: f64::NAN,
                    kind: record.kind,
                });
            }
            continue;
        }

        for (&rank, &value) in record.percentiles.iter().zip(record.values.iter()) {
            if let Some(keep) = keep_percentiles
                && !keep.contains(&rank)
            {
                continue;
            }
            rows.push(FlatChangePoint {
                feature: record.feature.clone(),
                timestamp_ns: record.timestamp_ns,
                percentile: Some(rank),
                value,
                kind: record.kind,
            });
        }
    }
    rows
}
