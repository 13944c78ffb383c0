// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use vlm_core::MonitorError;

// Squared distances are scaled by their median before the exponent; the
// scaled exponent is clamped to this range so that identical samples and
// extreme outliers stay numerically tame.
const EXPONENT_FLOOR: f64 = 1.0e-2;
const EXPONENT_CEIL: f64 = 1.0e2;

/// RBF Gram matrix of a sequence, reduced to prefix sums.
///
/// Memory grows as `O(n^2)`; the within-segment dispersion
/// `c(s, e) = sum_diag - block_sum / (e - s)` is then O(1) per query.
#[derive(Clone, Debug)]
pub(crate) struct GramPrefix {
    n: usize,
    prefix: Vec<f64>,
    diag_prefix: Vec<f64>,
    scale: Option<f64>,
}

impl GramPrefix {
    pub(crate) fn build(values: &[f64]) -> Result<Self, MonitorError> {
        let n = values.len();
        let scale = median_squared_distance(values);

        let mut gram = vec![0.0; n * n];
        for left in 0..n {
            for right in left..n {
                let delta = values[left] - values[right];
                let mut exponent = delta * delta;
                if let Some(scale) = scale {
                    exponent /= scale;
                }
                let kernel = (-exponent.clamp(EXPONENT_FLOOR, EXPONENT_CEIL)).exp();
                if !kernel.is_finite() {
                    return Err(MonitorError::numerical_issue(format!(
                        "non-finite kernel value at ({left}, {right})"
                    )));
                }
                gram[left * n + right] = kernel;
                gram[right * n + left] = kernel;
            }
        }

        let mut prefix = vec![0.0; (n + 1) * (n + 1)];
        for row in 0..n {
            for col in 0..n {
                let idx = (row + 1) * (n + 1) + (col + 1);
                prefix[idx] = gram[row * n + col]
                    + prefix[row * (n + 1) + (col + 1)]
                    + prefix[(row + 1) * (n + 1) + col]
                    - prefix[row * (n + 1) + col];
            }
        }

        let mut diag_prefix = vec![0.0; n + 1];
        for i in 0..n {
            diag_prefix[i + 1] = diag_prefix[i] + gram[i * n + i];
        }

        Ok(Self {
            n,
            prefix,
            diag_prefix,
            scale,
        })
    }

    /// Median of the squared pairwise distances, when positive.
    pub(crate) fn scale(&self) -> Option<f64> {
        self.scale
    }

    /// Within-segment kernel dispersion over `[start, end)`.
    pub(crate) fn segment_cost(&self, start: usize, end: usize) -> Result<f64, MonitorError> {
        if end <= start || end > self.n {
            return Err(MonitorError::invalid_input(format!(
                "invalid segment bounds: start={start}, end={end}, n={}",
                self.n
            )));
        }

        let len = (end - start) as f64;
        let diag_sum = self.diag_prefix[end] - self.diag_prefix[start];
        let block = self.block_sum(start, end);
        let mut cost = diag_sum - block / len;
        if cost < 0.0 && cost > -1.0e-9 {
            cost = 0.0;
        }
        if !cost.is_finite() {
            return Err(MonitorError::numerical_issue(format!(
                "non-finite segment cost at [{start}, {end})"
            )));
        }
        Ok(cost)
    }

    fn block_sum(&self, start: usize, end: usize) -> f64 {
        let stride = self.n + 1;
        self.prefix[end * stride + end] - self.prefix[start * stride + end]
            - self.prefix[end * stride + start]
            + self.prefix[start * stride + start]
    }
}

/// Median of the squared pairwise distances of `values`.
///
/// Returns `None` when fewer than two samples exist or the median is zero
/// (constant-dominated input), in which case distances are used unscaled.
fn median_squared_distance(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 2 {
        return None;
    }

    let mut distances = Vec::with_capacity(n * (n - 1) / 2);
    for left in 0..n {
        for right in left + 1..n {
            let delta = values[left] - values[right];
            distances.push(delta * delta);
        }
    }
    distances.sort_by(f64::total_cmp);

    let mid = distances.len() / 2;
    let median = if distances.len() % 2 == 1 {
        distances[mid]
    } else {
        (distances[mid - 1] + distances[mid]) * 0.5
    };
    (median > 0.0).then_some(median)
}
