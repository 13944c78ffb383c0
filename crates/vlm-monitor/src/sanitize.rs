// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use vlm_core::ChangeKind;

/// One missing or infinite sample found during sanitation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SampleAnomaly {
    pub index: usize,
    pub kind: ChangeKind,
}

/// Outcome of the per-feature sanitation pass.
#[derive(Clone, Debug, PartialEq)]
pub struct Sanitized {
    /// Fully finite series for segmentation, or `None` when the feature has
    /// no finite sample at all.
    pub cleaned: Option<Vec<f64>>,
    /// One entry per offending sample, in sample order.
    pub anomalies: Vec<SampleAnomaly>,
}

/// Records missing and infinite samples and produces the cleaned series.
///
/// Infinite samples are demoted to missing, then every missing sample is
/// replaced with the last finite value before it. Samples before the first
/// finite value are filled with that first finite value, so the cleaned
/// series is finite everywhere.
pub fn sanitize(values: &[f64]) -> Sanitized {
    let mut anomalies = Vec::new();
    for (index, value) in values.iter().enumerate() {
        if value.is_nan() {
            anomalies.push(SampleAnomaly {
                index,
                kind: ChangeKind::Missing,
            });
        } else if value.is_infinite() {
            anomalies.push(SampleAnomaly {
                index,
                kind: ChangeKind::Infinite,
            });
        }
    }

    let Some(first_finite) = values.iter().copied().find(|v| f64::is_finite(*v)) else {
        return Sanitized {
            cleaned: None,
            anomalies,
        };
    };

    let mut carry = first_finite;
    let cleaned = values
        .iter()
        .map(|&value| {
            if value.is_finite() {
                carry = value;
                value
            } else {
                carry
            }
        })
        .collect();

    Sanitized {
        cleaned: Some(cleaned),
        anomalies,
    }
}
