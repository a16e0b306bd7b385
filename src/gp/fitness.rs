//! Aggregate error of an expression over a dataset.

use super::dataset::Dataset;
use crate::tree::Node;

/// How per-sample residuals are aggregated. Lower is better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorMetric {
    /// Mean of squared residuals.
    #[default]
    MeanSquared,
    /// Mean of absolute residuals.
    MeanAbsolute,
}

impl ErrorMetric {
    /// Error of `tree` over `dataset`.
    ///
    /// The tree's scalar prediction is compared against every component of
    /// each label; the mean runs over all `(sample, component)` pairs. An
    /// aggregate that overflows is reported as `f64::MAX`, so it is finite
    /// and ranks below every non-overflowing error.
    pub fn error(self, tree: &Node, dataset: &Dataset) -> f64 {
        let mut total = 0.0;
        let mut count = 0usize;
        for (input, label) in dataset.iter() {
            let prediction = tree.evaluate(input);
            for &target in label {
                let residual = prediction - target;
                total += match self {
                    ErrorMetric::MeanSquared => residual * residual,
                    ErrorMetric::MeanAbsolute => residual.abs(),
                };
                count += 1;
            }
        }
        if count == 0 {
            return 0.0;
        }
        let mean = total / count as f64;
        if mean.is_finite() {
            mean
        } else {
            f64::MAX
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ErrorMetric::MeanSquared => "mse",
            ErrorMetric::MeanAbsolute => "mae",
        }
    }
}
