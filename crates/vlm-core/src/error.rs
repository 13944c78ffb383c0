// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use thiserror::Error;

/// Error taxonomy for the monitoring engine.
///
/// Data-quality findings (missing or infinite samples) are never errors;
/// they surface as records in the change-point table. Only structurally
/// invalid configuration or input aborts a run.
#[derive(Debug, Error)]
pub enum MonitorError {
    /// Malformed configuration; names the offending parameter.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// Structurally invalid input data.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Non-finite intermediate where a finite value is required.
    #[error("numerical issue: {0}")]
    NumericalIssue(String),
}

impl MonitorError {
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn numerical_issue(message: impl Into<String>) -> Self {
        Self::NumericalIssue(message.into())
    }
}
