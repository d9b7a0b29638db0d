//! Multilabel-task stat scores: validation, formatting, accumulation.
//!
//! Every label is an independent binary decision, so counts are accumulated
//! per label column exactly as in the binary task.

use ndarray::{Array2, Array3, ArrayViewD};

use super::binary::IGNORE_SENTINEL;
use super::StatScores;
use crate::average::{Average, MultidimAverage};
use crate::compute::sigmoid;
use crate::error::{MetricError, Result};

/// Validate multilabel-task configuration arguments.
pub fn arg_validation(num_labels: usize, threshold: f64, average: Average) -> Result<()> {
    if num_labels < 2 {
        return Err(MetricError::InvalidArgument(format!(
            "num_labels must be at least 2, got {num_labels}"
        )));
    }
    if !threshold.is_finite() || !(0.0..=1.0).contains(&threshold) {
        return Err(MetricError::InvalidArgument(format!(
            "threshold must lie in [0, 1], got {threshold}"
        )));
    }
    if average == Average::Binary {
        return Err(MetricError::InvalidArgument(
            "binary averaging is not defined for multilabel tasks".into(),
        ));
    }
    Ok(())
}

/// Validate multilabel-task prediction and target arrays.
pub fn tensor_validation(
    preds: &ArrayViewD<'_, f64>,
    target: &ArrayViewD<'_, i64>,
    num_labels: usize,
    multidim_average: MultidimAverage,
    ignore_index: Option<i64>,
) -> Result<()> {
    if preds.shape() != target.shape() {
        return Err(MetricError::InvalidInput(format!(
            "preds and target must have the same shape, got {:?} and {:?}",
            preds.shape(),
            target.shape()
        )));
    }
    if preds.ndim() < 2 {
        return Err(MetricError::InvalidInput(
            "multilabel inputs must have shape (N, num_labels, ...)".into(),
        ));
    }
    if preds.shape()[1] != num_labels {
        return Err(MetricError::InvalidInput(format!(
            "preds second dimension must equal num_labels ({num_labels}), got {}",
            preds.shape()[1]
        )));
    }
    if multidim_average == MultidimAverage::Samplewise && preds.ndim() < 3 {
        return Err(MetricError::InvalidInput(
            "samplewise averaging requires at least one extra dimension beyond (N, num_labels)"
                .into(),
        ));
    }
    if preds.iter().any(|v| !v.is_finite()) {
        return Err(MetricError::InvalidInput(
            "preds contain non-finite values".into(),
        ));
    }
    if let Some(&bad) = target
        .iter()
        .find(|&&t| t != 0 && t != 1 && Some(t) != ignore_index)
    {
        return Err(MetricError::InvalidInput(format!(
            "multilabel target values must be 0 or 1 (or the ignore index), got {bad}"
        )));
    }
    Ok(())
}

/// Binarize predictions and flatten both arrays to `(N, num_labels, flat)`.
///
/// Logit detection and thresholding follow the binary task; ignored target
/// entries are overwritten with the ignore sentinel.
pub fn format(
    preds: &ArrayViewD<'_, f64>,
    target: &ArrayViewD<'_, i64>,
    threshold: f64,
    ignore_index: Option<i64>,
) -> (Array3<i64>, Array3<i64>) {
    let logits = preds.iter().any(|&v| !(0.0..=1.0).contains(&v));
    let probs = if logits {
        sigmoid(preds)
    } else {
        preds.to_owned()
    };
    let binarized = probs.mapv(|p| i64::from(p > threshold));
    let preds = flatten_to_labels(&binarized.view());

    let mut target = flatten_to_labels(target);
    if let Some(ig) = ignore_index {
        target.mapv_inplace(|t| if t == ig { IGNORE_SENTINEL } else { t });
    }
    (preds, target)
}

/// Accumulate per-label confusion counts from `(N, C, flat)` arrays.
///
/// Global reduction yields `(1, C)` counts, samplewise `(N, C)`.
pub fn update(
    preds: &Array3<i64>,
    target: &Array3<i64>,
    multidim_average: MultidimAverage,
) -> StatScores {
    let (n, num_labels, flat) = preds.dim();
    let rows = match multidim_average {
        MultidimAverage::Global => 1,
        MultidimAverage::Samplewise => n,
    };
    let mut tp = Array2::<f64>::zeros((rows, num_labels));
    let mut fp = Array2::<f64>::zeros((rows, num_labels));
    let mut tn = Array2::<f64>::zeros((rows, num_labels));
    let mut fn_ = Array2::<f64>::zeros((rows, num_labels));

    for i in 0..n {
        let r = match multidim_average {
            MultidimAverage::Global => 0,
            MultidimAverage::Samplewise => i,
        };
        for label in 0..num_labels {
            for j in 0..flat {
                match (target[[i, label, j]], preds[[i, label, j]]) {
                    (1, 1) => tp[[r, label]] += 1.0,
                    (1, 0) => fn_[[r, label]] += 1.0,
                    (0, 1) => fp[[r, label]] += 1.0,
                    (0, 0) => tn[[r, label]] += 1.0,
                    _ => {} // ignored entry
                }
            }
        }
    }

    StatScores {
        true_positives: tp,
        false_positives: fp,
        true_negatives: tn,
        false_negatives: fn_,
    }
}

/// Flatten an `(N, C, ...)` array to `(N, C, flat)` in logical order.
fn flatten_to_labels<T: Copy>(values: &ArrayViewD<'_, T>) -> Array3<T> {
    let n = values.shape()[0];
    let c = values.shape()[1];
    let flat = if n * c == 0 { 0 } else { values.len() / (n * c) };
    let data: Vec<T> = values.iter().copied().collect();
    Array3::from_shape_vec((n, c, flat), data)
        .expect("row-major flatten preserves the element count")
}
