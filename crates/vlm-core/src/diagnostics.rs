// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

/// Structured diagnostics captured from one feature's monitoring run.
///
/// Data-quality findings and channel behavior land here as counters and
/// notes; warnings record recovered degenerate situations.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct FeatureDiagnostics {
    pub feature: String,
    pub n: usize,
    pub missing_count: usize,
    pub infinite_count: usize,
    /// Boundary count from the level channel, sentinel included.
    pub level_boundaries: usize,
    /// Interior boundary count contributed by the volatility channel,
    /// after re-anchoring to the original index space.
    pub volatility_boundaries: usize,
    /// Size of the merged boundary set, sentinel included.
    pub merged_boundaries: usize,
    pub runtime_ms: Option<u64>,
    pub notes: Vec<String>,
    pub warnings: Vec<String>,
}

impl FeatureDiagnostics {
    pub fn new(feature: impl Into<String>, n: usize) -> Self {
        Self {
            feature: feature.into(),
            n,
            missing_count: 0,
            infinite_count: 0,
            level_boundaries: 0,
            volatility_boundaries: 0,
            merged_boundaries: 0,
            runtime_ms: None,
            notes: vec![],
            warnings: vec![],
        }
    }
}
