//! Confusion-count accumulation (tp/fp/tn/fn) for classification tasks.
//!
//! Each task exposes the same four operations:
//! - `arg_validation`: range checks on configuration arguments
//! - `tensor_validation`: shape/value checks on prediction and target arrays
//! - `format`: probability→label conversion and flattening of extra dimensions
//! - `update`: accumulation of the four confusion counts
//!
//! Counts use a uniform `(rows, classes)` layout: a single row under global
//! reduction, one row per sample under samplewise reduction. Binary tasks
//! use a single class column. This keeps the class axis in the same position
//! for every task and mode, so the reduction code has exactly one layout to
//! reason about.

pub mod binary;
pub mod multiclass;
pub mod multilabel;


use ndarray::{Array2, ArrayViewD, Axis};

use crate::error::{MetricError, Result};

/// True/false positive/negative counts with identical `(rows, classes)` shapes.
///
/// Counts are non-negative whole numbers stored as `f64` so they can feed
/// directly into the floating-point reduction arithmetic.
#[derive(Clone, Debug, PartialEq)]
pub struct StatScores {
    /// Entries predicted positive that are positive
    pub true_positives: Array2<f64>,
    /// Entries predicted positive that are negative
    pub false_positives: Array2<f64>,
    /// Entries predicted negative that are negative
    pub true_negatives: Array2<f64>,
    /// Entries predicted negative that are positive
    pub false_negatives: Array2<f64>,
}

impl StatScores {
    /// Build from the four count arrays, enforcing the shared-shape invariant.
    pub fn new(
        true_positives: Array2<f64>,
        false_positives: Array2<f64>,
        true_negatives: Array2<f64>,
        false_negatives: Array2<f64>,
    ) -> Result<Self> {
        let dim = true_positives.dim();
        for (name, counts) in [
            ("false_positives", &false_positives),
            ("true_negatives", &true_negatives),
            ("false_negatives", &false_negatives),
        ] {
            if counts.dim() != dim {
                return Err(MetricError::ShapeMismatch(format!(
                    "true_positives has shape {:?} but {} has shape {:?}",
                    dim,
                    name,
                    counts.dim()
                )));
            }
        }
        Ok(Self {
            true_positives,
            false_positives,
            true_negatives,
            false_negatives,
        })
    }

    /// Number of rows: 1 under global reduction, N under samplewise.
    pub fn rows(&self) -> usize {
        self.true_positives.nrows()
    }

    /// Number of class columns.
    pub fn classes(&self) -> usize {
        self.true_positives.ncols()
    }

    /// Per-class support: tp + fn.
    pub fn support(&self) -> Array2<f64> {
        &self.true_positives + &self.false_negatives
    }

    /// Copy of the counts with one class column removed.
    pub fn without_class(&self, class: usize) -> Self {
        let keep: Vec<usize> = (0..self.classes()).filter(|&c| c != class).collect();
        Self {
            true_positives: self.true_positives.select(Axis(1), &keep),
            false_positives: self.false_positives.select(Axis(1), &keep),
            true_negatives: self.true_negatives.select(Axis(1), &keep),
            false_negatives: self.false_negatives.select(Axis(1), &keep),
        }
    }
}

/// Flatten an `(N, ...)` array to `(N, flat)` in logical (row-major) order.
pub(crate) fn flatten_to_rows<T: Copy>(values: &ArrayViewD<'_, T>) -> Array2<T> {
    let n = values.shape().first().copied().unwrap_or(1);
    let flat = if n == 0 { 0 } else { values.len() / n };
    let data: Vec<T> = values.iter().copied().collect();
    Array2::from_shape_vec((n, flat), data)
        .expect("row-major flatten preserves the element count")
}
