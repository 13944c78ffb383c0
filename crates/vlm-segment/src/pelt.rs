// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::kernel::GramPrefix;
use vlm_core::MonitorError;

const DEFAULT_PENALTY: f64 = 10.0;
const DEFAULT_MIN_SEGMENT_LEN: usize = 2;

/// Configuration for [`KernelPelt`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct KernelPeltConfig {
    /// Linear penalty per additional segment; lower = more sensitive.
    pub penalty: f64,
    /// Minimum samples per segment.
    pub min_segment_len: usize,
}

impl Default for KernelPeltConfig {
    fn default() -> Self {
        Self {
            penalty: DEFAULT_PENALTY,
            min_segment_len: DEFAULT_MIN_SEGMENT_LEN,
        }
    }
}

impl KernelPeltConfig {
    fn validate(&self) -> Result<(), MonitorError> {
        if !self.penalty.is_finite() || self.penalty <= 0.0 {
            return Err(MonitorError::invalid_config(format!(
                "KernelPeltConfig.penalty must be finite and > 0; got {}",
                self.penalty
            )));
        }
        if self.min_segment_len == 0 {
            return Err(MonitorError::invalid_config(
                "KernelPeltConfig.min_segment_len must be >= 1; got 0",
            ));
        }
        Ok(())
    }
}

/// Outcome of one change-point search.
#[derive(Clone, Debug, PartialEq)]
pub struct Segmentation {
    /// Ascending segment-end positions in `(0, n]`; the last element is
    /// always `n`, the end-of-series sentinel.
    pub boundaries: Vec<usize>,
    /// Total penalized objective of the selected partition.
    pub objective: f64,
    pub notes: Vec<String>,
}

impl Segmentation {
    /// Interior boundaries, sentinel excluded.
    pub fn change_points(&self) -> &[usize] {
        let len = self.boundaries.len();
        &self.boundaries[..len.saturating_sub(1)]
    }
}

/// Change-point search contract: finite series in, boundary set out.
pub trait Segmenter {
    fn segment(&self, values: &[f64]) -> Result<Segmentation, MonitorError>;
}

/// PELT optimal partitioning under an RBF-kernel segment cost.
///
/// The non-parametric kernel dispersion catches both level and spread
/// changes; the same input and penalty always yield the same boundaries
/// (leftmost tie-break).
#[derive(Clone, Debug)]
pub struct KernelPelt {
    config: KernelPeltConfig,
}

impl KernelPelt {
    pub fn new(config: KernelPeltConfig) -> Result<Self, MonitorError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &KernelPeltConfig {
        &self.config
    }
}

impl Segmenter for KernelPelt {
    fn segment(&self, values: &[f64]) -> Result<Segmentation, MonitorError> {
        if values.is_empty() {
            return Err(MonitorError::invalid_input(
                "segmenter requires a non-empty series",
            ));
        }
        if let Some((index, value)) = values
            .iter()
            .enumerate()
            .find(|(_, value)| !value.is_finite())
        {
            return Err(MonitorError::invalid_input(format!(
                "segmenter requires finite samples; got {value} at index {index}"
            )));
        }

        let n = values.len();
        let beta = self.config.penalty;
        let min_segment_len = self.config.min_segment_len;
        let gram = GramPrefix::build(values)?;

        let mut best_cost = vec![f64::INFINITY; n + 1];
        let mut last_cut = vec![usize::MAX; n + 1];
        best_cost[0] = -beta;
        last_cut[0] = 0;

        let mut candidates = vec![0usize];
        for t in 1..=n {
            let mut scored = vec![None; candidates.len()];
            let mut best = f64::INFINITY;
            let mut best_tau = usize::MAX;

            for (idx, &tau) in candidates.iter().enumerate() {
                // The whole-series segment is always feasible, so a series
                // shorter than min_segment_len still gets its sentinel.
                let feasible = t - tau >= min_segment_len || (tau == 0 && t == n);
                if !feasible || !best_cost[tau].is_finite() {
                    continue;
                }

                let segment_cost = gram.segment_cost(tau, t)?;
                let score = best_cost[tau] + segment_cost;
                if !score.is_finite() {
                    return Err(MonitorError::numerical_issue(format!(
                        "non-finite objective at t={t}, tau={tau}: score={score}"
                    )));
                }
                scored[idx] = Some(score);

                let candidate = score + beta;
                if candidate < best || (candidate == best && tau < best_tau) {
                    best = candidate;
                    best_tau = tau;
                }
            }

            if best_tau == usize::MAX {
                continue;
            }
            best_cost[t] = best;
            last_cut[t] = best_tau;

            let mut next_candidates = Vec::with_capacity(candidates.len() + 1);
            for (idx, &tau) in candidates.iter().enumerate() {
                match scored[idx] {
                    Some(score) if score >= best => {}
                    _ => next_candidates.push(tau),
                }
            }
            if t < n {
                next_candidates.push(t);
            }
            candidates = next_candidates;
        }

        if !best_cost[n].is_finite() {
            return Err(MonitorError::invalid_input(
                "no feasible segmentation reached the end of the series",
            ));
        }

        let boundaries = reconstruct_boundaries(n, &last_cut)?;
        let notes = vec![
            format!("penalty={beta}, min_segment_len={min_segment_len}"),
            match gram.scale() {
                Some(scale) => format!("bandwidth_scale={scale}"),
                None => "bandwidth_scale=unit (constant-dominated input)".to_string(),
            },
            format!("change_count={}", boundaries.len() - 1),
        ];

        Ok(Segmentation {
            boundaries,
            objective: best_cost[n],
            notes,
        })
    }
}

fn reconstruct_boundaries(n: usize, last_cut: &[usize]) -> Result<Vec<usize>, MonitorError> {
    let mut reverse = vec![n];
    let mut cursor = n;
    let mut hops = 0usize;

    while cursor > 0 {
        hops += 1;
        if hops > n + 1 {
            return Err(MonitorError::invalid_input(
                "invalid backtrack state: cycle detected",
            ));
        }

        let tau = last_cut[cursor];
        if tau == usize::MAX || tau >= cursor {
            return Err(MonitorError::invalid_input(format!(
                "invalid backtrack state: predecessor {tau} at position {cursor}"
            )));
        }
        if tau == 0 {
            break;
        }
        reverse.push(tau);
        cursor = tau;
    }

    reverse.reverse();
    Ok(reverse)
}
