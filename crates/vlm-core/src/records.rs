// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

/// Classification of an entry in the change-point table.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChangeKind {
    /// A detected level or volatility regime boundary.
    TrendOrVolatility,
    /// A missing (NaN) sample observed during sanitation.
    Missing,
    /// An infinite sample observed during sanitation.
    Infinite,
}

impl ChangeKind {
    /// True for the data-quality entries that carry no percentile summary.
    pub fn is_anomaly(self) -> bool {
        !matches!(self, Self::TrendOrVolatility)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::TrendOrVolatility => "trend/volatility",
            Self::Missing => "missing",
            Self::Infinite => "infinite",
        }
    }
}

/// One row of the change-point table.
///
/// Boundary records carry the enclosing segment's percentile summary, with
/// `values[i]` computed at rank `percentiles[i]`. Anomaly records carry
/// empty vectors.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct ChangePointRecord {
    pub feature: String,
    pub timestamp_ns: i64,
    pub percentiles: Vec<f64>,
    pub values: Vec<f64>,
    pub kind: ChangeKind,
}

/// Change-point records across all features.
///
/// Append order is input column order; within a feature, anomalies come
/// first (in sample order), then boundary records ascending.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChangePointTable {
    records: Vec<ChangePointRecord>,
}

impl ChangePointTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<ChangePointRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[ChangePointRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<ChangePointRecord> {
        self.records
    }

    pub fn push(&mut self, record: ChangePointRecord) {
        self.records.push(record);
    }

    pub fn extend(&mut self, records: impl IntoIterator<Item = ChangePointRecord>) {
        self.records.extend(records);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Stable sort by `(feature, timestamp)`.
    pub fn sort_by_feature_and_time(&mut self) {
        self.records
            .sort_by(|a, b| (a.feature.as_str(), a.timestamp_ns).cmp(&(b.feature.as_str(), b.timestamp_ns)));
    }
}

/// One exploded row: a single (record, percentile) pair.
///
/// Anomaly rows carry `percentile: None` and a NaN value.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct FlatChangePoint {
    pub feature: String,
    pub timestamp_ns: i64,
    pub percentile: Option<f64>,
    pub value: f64,
    pub kind: ChangeKind,
}
