// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use vlm_core::MonitorError;

/// Centered rolling standard deviation of a series.
///
/// `values[i]` is the sample standard deviation (ddof = 1) of the window
/// `[i, i + window)` of the source series and represents original index
/// `i + offset` with `offset = window / 2`; the `window / 2` head samples
/// and the remaining tail samples have no defined rolling value and are
/// excluded.
#[derive(Clone, Debug, PartialEq)]
pub struct RollingStd {
    pub values: Vec<f64>,
    /// Shift from rolling index space back to original index space.
    pub offset: usize,
}

impl RollingStd {
    /// Maps a rolling-space boundary back to the original index space.
    pub fn map_boundary(&self, boundary: usize) -> usize {
        boundary + self.offset
    }
}

/// Computes the centered rolling sample standard deviation.
///
/// `window` must satisfy `2 <= window < values.len()`; a window reaching or
/// exceeding the series length is a configuration error.
pub fn rolling_std(values: &[f64], window: usize) -> Result<RollingStd, MonitorError> {
    let n = values.len();
    if window < 2 {
        return Err(MonitorError::invalid_config(format!(
            "rolling_sd_window must be >= 2; got {window}"
        )));
    }
    if window >= n {
        return Err(MonitorError::invalid_config(format!(
            "rolling_sd_window ({window}) must be smaller than the series length ({n})"
        )));
    }

    let count = n - window + 1;
    let mut out = Vec::with_capacity(count);
    for start in 0..count {
        let slice = &values[start..start + window];
        let mean = slice.iter().sum::<f64>() / window as f64;
        let sum_sq = slice
            .iter()
            .map(|value| {
                let delta = value - mean;
                delta * delta
            })
            .sum::<f64>();
        out.push((sum_sq / (window - 1) as f64).sqrt());
    }

    Ok(RollingStd {
        values: out,
        offset: window / 2,
    })
}
