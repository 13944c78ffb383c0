// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

//! Per-feature change-point monitoring over a time-indexed feature table:
//! sanitation, dual-channel (level + rolling volatility) segmentation,
//! segment percentile summaries, and the end-trim policy.

mod sanitize;
mod summarize;
mod trim;

pub use sanitize::{SampleAnomaly, Sanitized, sanitize};
pub use summarize::summarize_segments;
pub use trim::{drop_end_changepoints, explode};

#[cfg(feature = "rayon")]
use rayon::prelude::*;
use std::time::Instant;
use vlm_core::{
    ChangeKind, ChangePointRecord, ChangePointTable, FeatureColumn, FeatureDiagnostics,
    FeatureTable, FlatChangePoint, MonitorConfig, MonitorError,
};
use vlm_segment::{KernelPelt, KernelPeltConfig, Segmenter, merge_boundaries, rolling_std};

/// Result of a monitoring run across all features.
#[derive(Clone, Debug, PartialEq)]
pub struct MonitorReport {
    /// The change-point table, trimmed per `keep_last_changepoint`.
    pub changes: ChangePointTable,
    /// Flat reshaping of `changes`, present when `explode` is set.
    pub flat: Option<Vec<FlatChangePoint>>,
    /// One entry per feature, in input column order.
    pub diagnostics: Vec<FeatureDiagnostics>,
}

/// Batch change-point monitor over a feature table.
///
/// Walks the table one feature at a time; each feature's computation is
/// pure and independent, so the loop runs in parallel under the `rayon`
/// feature with output concatenated in input column order either way.
#[derive(Clone, Debug)]
pub struct ChangePointMonitor {
    config: MonitorConfig,
}

impl ChangePointMonitor {
    pub fn new(config: MonitorConfig) -> Result<Self, MonitorError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Runs the full pipeline: sanitize, segment both channels, merge,
    /// summarize, then apply the end-trim policy.
    pub fn detect(&self, table: &FeatureTable) -> Result<MonitorReport, MonitorError> {
        let n = table.len();
        if let Some(window) = self.config.rolling_sd_window
            && window >= n
        {
            return Err(MonitorError::invalid_config(format!(
                "rolling_sd_window ({window}) must be smaller than the series length ({n})"
            )));
        }

        let level = KernelPelt::new(KernelPeltConfig {
            penalty: self.config.trend_penalty,
            min_segment_len: self.config.min_segment_len,
        })?;
        let volatility = KernelPelt::new(KernelPeltConfig {
            penalty: self.config.rolling_sd_penalty,
            min_segment_len: self.config.min_segment_len,
        })?;

        let timestamps = table.timestamps();

        #[cfg(feature = "rayon")]
        let outcomes = table
            .columns()
            .par_iter()
            .map(|column| self.detect_feature(timestamps, column, &level, &volatility))
            .collect::<Result<Vec<_>, MonitorError>>()?;
        #[cfg(not(feature = "rayon"))]
        let outcomes = table
            .columns()
            .iter()
            .map(|column| self.detect_feature(timestamps, column, &level, &volatility))
            .collect::<Result<Vec<_>, MonitorError>>()?;

        let mut changes = ChangePointTable::new();
        let mut diagnostics = Vec::with_capacity(outcomes.len());
        for (records, feature_diagnostics) in outcomes {
            changes.extend(records);
            diagnostics.push(feature_diagnostics);
        }

        if !self.config.keep_last_changepoint {
            changes = drop_end_changepoints(&changes);
        }
        let flat = self.config.explode.then(|| explode(&changes, None));

        Ok(MonitorReport {
            changes,
            flat,
            diagnostics,
        })
    }

    fn detect_feature(
        &self,
        timestamps: &[i64],
        column: &FeatureColumn,
        level: &KernelPelt,
        volatility: &KernelPelt,
    ) -> Result<(Vec<ChangePointRecord>, FeatureDiagnostics), MonitorError> {
        let started = Instant::now();
        let n = column.values.len();
        let mut diagnostics = FeatureDiagnostics::new(column.name.clone(), n);

        let sanitized = sanitize(&column.values);
        let mut records = Vec::new();
        for anomaly in &sanitized.anomalies {
            match anomaly.kind {
                ChangeKind::Missing => diagnostics.missing_count += 1,
                ChangeKind::Infinite => diagnostics.infinite_count += 1,
                ChangeKind::TrendOrVolatility => {}
            }
            records.push(ChangePointRecord {
                feature: column.name.clone(),
                timestamp_ns: timestamps[anomaly.index],
                percentiles: vec![],
                values: vec![],
                kind: anomaly.kind,
            });
        }

        match sanitized.cleaned {
            None => {
                diagnostics.warnings.push(format!(
                    "feature {} has no finite samples; percentile summary is NaN",
                    column.name
                ));
                records.push(ChangePointRecord {
                    feature: column.name.clone(),
                    timestamp_ns: timestamps[n - 1],
                    percentiles: self.config.percentiles.clone(),
                    values: vec![f64::NAN; self.config.percentiles.len()],
                    kind: ChangeKind::TrendOrVolatility,
                });
                diagnostics.merged_boundaries = 1;
            }
            Some(cleaned) => {
                let level_run = level.segment(&cleaned)?;
                diagnostics.level_boundaries = level_run.boundaries.len();
                diagnostics
                    .notes
                    .extend(level_run.notes.iter().map(|note| format!("level: {note}")));

                let mut volatility_boundaries = Vec::new();
                if let Some(window) = self.config.rolling_sd_window {
                    let rolled = rolling_std(&cleaned, window)?;
                    let volatility_run = volatility.segment(&rolled.values)?;
                    let trimmed_len = rolled.values.len();
                    // The channel's own close-out boundary marks the end of
                    // the trimmed series, not a change; the level channel
                    // contributes the true sentinel.
                    volatility_boundaries = volatility_run
                        .boundaries
                        .iter()
                        .copied()
                        .filter(|&boundary| boundary < trimmed_len)
                        .map(|boundary| rolled.map_boundary(boundary))
                        .collect();
                    diagnostics.volatility_boundaries = volatility_boundaries.len();
                    diagnostics.notes.extend(
                        volatility_run
                            .notes
                            .iter()
                            .map(|note| format!("volatility: {note}")),
                    );
                }

                let merged = merge_boundaries(&level_run.boundaries, &volatility_boundaries);
                diagnostics.merged_boundaries = merged.len();
                records.extend(summarize_segments(
                    &column.name,
                    &column.values,
                    timestamps,
                    &merged,
                    &self.config.percentiles,
                ));
            }
        }

        diagnostics.runtime_ms =
            Some(u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX));
        Ok((records, diagnostics))
    }
}
