// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::MonitorError;

/// One monitored feature: a name plus its samples on the shared time axis.
///
/// Gaps are represented as `f64::NAN` samples, never as omitted rows.
#[derive(Clone, Debug, PartialEq)]
pub struct FeatureColumn {
    pub name: String,
    pub values: Vec<f64>,
}

impl FeatureColumn {
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}

/// Time-indexed table of feature columns.
///
/// Timestamps are Unix nanoseconds and strictly increasing; every column is
/// aligned to the shared axis. Column order is preserved and drives the
/// order of all per-feature output.
#[derive(Clone, Debug, PartialEq)]
pub struct FeatureTable {
    timestamps: Vec<i64>,
    columns: Vec<FeatureColumn>,
}

impl FeatureTable {
    /// Constructs a validated `FeatureTable`.
    pub fn new(timestamps: Vec<i64>, columns: Vec<FeatureColumn>) -> Result<Self, MonitorError> {
        let n = timestamps.len();
        if n == 0 {
            return Err(MonitorError::invalid_input(
                "feature table requires at least one timestamp",
            ));
        }
        if columns.is_empty() {
            return Err(MonitorError::invalid_input(
                "feature table requires at least one column",
            ));
        }

        if let Some(window) = timestamps.windows(2).find(|pair| pair[0] >= pair[1]) {
            return Err(MonitorError::invalid_input(format!(
                "timestamps must be strictly increasing; got {} before {}",
                window[0], window[1]
            )));
        }

        for column in &columns {
            if column.values.len() != n {
                return Err(MonitorError::invalid_input(format!(
                    "column {} has {} samples, expected {n}",
                    column.name,
                    column.values.len()
                )));
            }
        }

        for (idx, column) in columns.iter().enumerate() {
            if columns[..idx].iter().any(|prior| prior.name == column.name) {
                return Err(MonitorError::invalid_input(format!(
                    "duplicate feature name: {}",
                    column.name
                )));
            }
        }

        Ok(Self {
            timestamps,
            columns,
        })
    }

    /// Number of samples on the shared time axis.
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn timestamps(&self) -> &[i64] {
        &self.timestamps
    }

    pub fn columns(&self) -> &[FeatureColumn] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&FeatureColumn> {
        self.columns.iter().find(|column| column.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::{FeatureColumn, FeatureTable};

    fn axis(n: usize) -> Vec<i64> {
        (0..n).map(|t| t as i64 * 1_000).collect()
    }

    #[test]
    fn valid_table_exposes_axis_and_columns() {
        let table = FeatureTable::new(
            axis(3),
            vec![
                FeatureColumn::new("latency", vec![1.0, 2.0, 3.0]),
                FeatureColumn::new("volume", vec![4.0, 5.0, 6.0]),
            ],
        )
        .expect("table should be valid");

        assert_eq!(table.len(), 3);
        assert!(!table.is_empty());
        assert_eq!(table.timestamps(), &[0, 1_000, 2_000]);
        assert_eq!(table.columns().len(), 2);
        assert_eq!(
            table.column("volume").map(|c| c.values.as_slice()),
            Some([4.0, 5.0, 6.0].as_slice())
        );
        assert!(table.column("unknown").is_none());
    }

    #[test]
    fn rejects_empty_axis() {
        let err = FeatureTable::new(vec![], vec![FeatureColumn::new("f", vec![])])
            .expect_err("empty axis must fail");
        assert!(err.to_string().contains("at least one timestamp"));
    }

    #[test]
    fn rejects_empty_column_list() {
        let err = FeatureTable::new(axis(2), vec![]).expect_err("no columns must fail");
        assert!(err.to_string().contains("at least one column"));
    }

    #[test]
    fn rejects_non_increasing_timestamps() {
        let err = FeatureTable::new(
            vec![0, 1_000, 1_000],
            vec![FeatureColumn::new("f", vec![1.0, 2.0, 3.0])],
        )
        .expect_err("repeated timestamp must fail");
        assert!(err.to_string().contains("strictly increasing"));
    }

    #[test]
    fn rejects_misaligned_column() {
        let err = FeatureTable::new(axis(3), vec![FeatureColumn::new("f", vec![1.0, 2.0])])
            .expect_err("short column must fail");
        assert!(err.to_string().contains("expected 3"));
    }

    #[test]
    fn rejects_duplicate_feature_names() {
        let err = FeatureTable::new(
            axis(2),
            vec![
                FeatureColumn::new("f", vec![1.0, 2.0]),
                FeatureColumn::new("f", vec![3.0, 4.0]),
            ],
        )
        .expect_err("duplicate name must fail");
        assert!(err.to_string().contains("duplicate feature name"));
    }
}
