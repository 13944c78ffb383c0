// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

//! Shared types for variable-level monitoring: the time-indexed feature
//! table, change-point records, the configuration surface, percentile math,
//! per-feature diagnostics, and the error taxonomy.

mod config;
mod diagnostics;
mod error;
mod records;
mod stats;
mod table;

pub use config::{DEFAULT_PERCENTILES, MonitorConfig, ReportOptions};
pub use diagnostics::FeatureDiagnostics;
pub use error::MonitorError;
pub use records::{ChangeKind, ChangePointRecord, ChangePointTable, FlatChangePoint};
pub use stats::percentiles_of_finite;
pub use table::{FeatureColumn, FeatureTable};
