//! Training data.

use crate::error::{GpError, Result};
use crate::tree::SENTINEL;

/// Immutable ordered `(input, label)` pairs, fixed for a whole run.
///
/// Every input row has the same width and every label row is non-empty.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "DatasetRows"))]
pub struct Dataset {
    inputs: Vec<Vec<f64>>,
    labels: Vec<Vec<f64>>,
}

/// Unchecked wire form; deserialization goes through [`Dataset::new`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct DatasetRows {
    inputs: Vec<Vec<f64>>,
    labels: Vec<Vec<f64>>,
}

#[cfg(feature = "serde")]
impl TryFrom<DatasetRows> for Dataset {
    type Error = GpError;

    fn try_from(rows: DatasetRows) -> Result<Self> {
        Self::new(rows.inputs, rows.labels)
    }
}

impl Dataset {
    pub fn new(inputs: Vec<Vec<f64>>, labels: Vec<Vec<f64>>) -> Result<Self> {
        if inputs.len() != labels.len() {
            return Err(GpError::DatasetLengthMismatch {
                inputs: inputs.len(),
                labels: labels.len(),
            });
        }
        if inputs.is_empty() {
            return Err(GpError::EmptyDataset);
        }
        let width = inputs[0].len();
        if let Some((row, found)) = inputs
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|&(_, len)| len != width)
        {
            return Err(GpError::InputWidthMismatch {
                row,
                expected: width,
                found,
            });
        }
        if let Some(row) = labels.iter().position(Vec::is_empty) {
            return Err(GpError::EmptyLabel(row));
        }
        Ok(Self { inputs, labels })
    }

    /// Samples a single-output target at each point.
    ///
    /// Non-finite targets are clamped: `±∞ → ±1e10`, `NaN → 0`.
    pub fn from_target<F>(points: impl IntoIterator<Item = Vec<f64>>, target: F) -> Result<Self>
    where
        F: Fn(&[f64]) -> f64,
    {
        let inputs: Vec<Vec<f64>> = points.into_iter().collect();
        let labels = inputs
            .iter()
            .map(|x| {
                let y = target(x);
                let y = if y.is_nan() {
                    0.0
                } else if y.is_infinite() {
                    SENTINEL.copysign(y)
                } else {
                    y
                };
                vec![y]
            })
            .collect();
        Self::new(inputs, labels)
    }

    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    /// Always `false`: construction rejects empty datasets.
    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    /// Number of input features per row.
    pub fn input_width(&self) -> usize {
        self.inputs.first().map_or(0, Vec::len)
    }

    pub fn inputs(&self) -> &[Vec<f64>] {
        &self.inputs
    }

    pub fn labels(&self) -> &[Vec<f64>] {
        &self.labels
    }

    /// Iterates over `(input, label)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&[f64], &[f64])> {
        self.inputs
            .iter()
            .zip(self.labels.iter())
            .map(|(x, y)| (x.as_slice(), y.as_slice()))
    }
}
