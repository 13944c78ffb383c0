// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

//! Change-point search over a single numeric sequence: an RBF-kernel PELT
//! segmenter, the centered rolling standard deviation transform feeding the
//! volatility channel, and boundary-set merging.

mod kernel;
mod merge;
mod pelt;
mod rolling;

pub use merge::merge_boundaries;
pub use pelt::{KernelPelt, KernelPeltConfig, Segmentation, Segmenter};
pub use rolling::{RollingStd, rolling_std};
