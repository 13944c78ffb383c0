// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::MonitorError;

/// Default percentile ranks reported per segment.
pub const DEFAULT_PERCENTILES: [f64; 3] = [25.0, 50.0, 75.0];

const DEFAULT_PENALTY: f64 = 10.0;
const DEFAULT_ROLLING_SD_WINDOW: usize = 10;
const DEFAULT_MIN_SEGMENT_LEN: usize = 2;

/// Configuration surface of the change-point monitor.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct MonitorConfig {
    /// Percentile ranks to report per segment, strictly ascending in [0, 100].
    pub percentiles: Vec<f64>,
    /// Also produce the flat (one row per percentile) reshaping of the output.
    pub explode: bool,
    /// Keep each feature's close-out boundary record. Useful when plotting;
    /// set to false to retain only genuine change points.
    pub keep_last_changepoint: bool,
    /// Penalty for the level channel; lower finds more change points.
    pub trend_penalty: f64,
    /// Window for the rolling standard deviation channel; `None` disables it.
    pub rolling_sd_window: Option<usize>,
    /// Penalty for the volatility channel.
    pub rolling_sd_penalty: f64,
    /// Minimum samples per segment in either channel.
    pub min_segment_len: usize,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            percentiles: DEFAULT_PERCENTILES.to_vec(),
            explode: true,
            keep_last_changepoint: true,
            trend_penalty: DEFAULT_PENALTY,
            rolling_sd_window: Some(DEFAULT_ROLLING_SD_WINDOW),
            rolling_sd_penalty: DEFAULT_PENALTY,
            min_segment_len: DEFAULT_MIN_SEGMENT_LEN,
        }
    }
}

impl MonitorConfig {
    pub fn validate(&self) -> Result<(), MonitorError> {
        if self.percentiles.is_empty() {
            return Err(MonitorError::invalid_config(
                "percentiles must contain at least one rank",
            ));
        }
        for &rank in &self.percentiles {
            if !rank.is_finite() || !(0.0..=100.0).contains(&rank) {
                return Err(MonitorError::invalid_config(format!(
                    "percentile ranks must be finite and within [0, 100]; got {rank}"
                )));
            }
        }
        if let Some(pair) = self
            .percentiles
            .windows(2)
            .find(|pair| pair[0] >= pair[1])
        {
            return Err(MonitorError::invalid_config(format!(
                "percentiles must be strictly ascending; got {} before {}",
                pair[0], pair[1]
            )));
        }

        validate_penalty("trend_penalty", self.trend_penalty)?;
        validate_penalty("rolling_sd_penalty", self.rolling_sd_penalty)?;

        if let Some(window) = self.rolling_sd_window
            && window < 2
        {
            return Err(MonitorError::invalid_config(format!(
                "rolling_sd_window must be >= 2; got {window}"
            )));
        }
        if self.min_segment_len == 0 {
            return Err(MonitorError::invalid_config(
                "min_segment_len must be >= 1; got 0",
            ));
        }

        Ok(())
    }
}

fn validate_penalty(name: &str, penalty: f64) -> Result<(), MonitorError> {
    if !penalty.is_finite() || penalty <= 0.0 {
        return Err(MonitorError::invalid_config(format!(
            "{name} must be finite and > 0; got {penalty}"
        )));
    }
    Ok(())
}

/// Display toggles consumed by rendering collaborators, not by the engine.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReportOptions {
    /// Draw whole-series percentile reference lines.
    pub percentile_lines: bool,
    /// Draw per-segment percentile lines at each change point.
    pub change_point_percentile_lines: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            percentile_lines: false,
            change_point_percentile_lines: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_PERCENTILES, MonitorConfig, ReportOptions};

    #[test]
    fn default_config_is_valid() {
        let config = MonitorConfig::default();
        config.validate().expect("default config should validate");
        assert_eq!(config.percentiles, DEFAULT_PERCENTILES.to_vec());
        assert!(config.explode);
        assert!(config.keep_last_changepoint);
        assert_eq!(config.trend_penalty, 10.0);
        assert_eq!(config.rolling_sd_window, Some(10));
        assert_eq!(config.rolling_sd_penalty, 10.0);
        assert_eq!(config.min_segment_len, 2);
    }

    #[test]
    fn rejects_empty_percentiles() {
        let config = MonitorConfig {
            percentiles: vec![],
            ..MonitorConfig::default()
        };
        let err = config.validate().expect_err("empty list must fail");
        assert!(err.to_string().contains("at least one rank"));
    }

    #[test]
    fn rejects_out_of_range_or_non_finite_ranks() {
        for rank in [-1.0, 100.5, f64::NAN, f64::INFINITY] {
            let config = MonitorConfig {
                percentiles: vec![rank],
                ..MonitorConfig::default()
            };
            let err = config.validate().expect_err("bad rank must fail");
            assert!(err.to_string().contains("[0, 100]"), "rank {rank}: {err}");
        }
    }

    #[test]
    fn rejects_non_ascending_ranks() {
        let config = MonitorConfig {
            percentiles: vec![25.0, 25.0, 75.0],
            ..MonitorConfig::default()
        };
        let err = config.validate().expect_err("ties must fail");
        assert!(err.to_string().contains("strictly ascending"));
    }

    #[test]
    fn rejects_bad_penalties() {
        for penalty in [0.0, -2.0, f64::NAN] {
            let config = MonitorConfig {
                trend_penalty: penalty,
                ..MonitorConfig::default()
            };
            let err = config.validate().expect_err("bad penalty must fail");
            assert!(err.to_string().contains("trend_penalty"));
        }

        let config = MonitorConfig {
            rolling_sd_penalty: -1.0,
            ..MonitorConfig::default()
        };
        let err = config.validate().expect_err("bad penalty must fail");
        assert!(err.to_string().contains("rolling_sd_penalty"));
    }

    #[test]
    fn rejects_tiny_rolling_window_but_allows_disabled() {
        let config = MonitorConfig {
            rolling_sd_window: Some(1),
            ..MonitorConfig::default()
        };
        let err = config.validate().expect_err("window 1 must fail");
        assert!(err.to_string().contains("rolling_sd_window"));

        let disabled = MonitorConfig {
            rolling_sd_window: None,
            ..MonitorConfig::default()
        };
        disabled
            .validate()
            .expect("disabled volatility channel should validate");
    }

    #[test]
    fn rejects_zero_min_segment_len() {
        let config = MonitorConfig {
            min_segment_len: 0,
            ..MonitorConfig::default()
        };
        let err = config.validate().expect_err("zero must fail");
        assert!(err.to_string().contains("min_segment_len"));
    }

    #[test]
    fn report_options_defaults() {
        let options = ReportOptions::default();
        assert!(!options.percentile_lines);
        assert!(options.change_point_percentile_lines);
    }
}
