//! Binary-task stat scores: validation, formatting, accumulation.

use ndarray::{Array2, ArrayViewD};

use super::{flatten_to_rows, StatScores};
use crate::average::MultidimAverage;
use crate::compute::sigmoid;
use crate::error::{MetricError, Result};

/// Sentinel written over ignored target entries after formatting. It matches
/// neither the positive nor the negative class, so the entry contributes
/// zero to every count.
pub(crate) const IGNORE_SENTINEL: i64 = -1;

/// Validate binary-task configuration arguments.
pub fn arg_validation(threshold: f64) -> Result<()> {
    if !threshold.is_finite() || !(0.0..=1.0).contains(&threshold) {
        return Err(MetricError::InvalidArgument(format!(
            "threshold must lie in [0, 1], got {threshold}"
        )));
    }
    Ok(())
}

/// Validate binary-task prediction and target arrays.
pub fn tensor_validation(
    preds: &ArrayViewD<'_, f64>,
    target: &ArrayViewD<'_, i64>,
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
    if preds.ndim() == 0 {
        return Err(MetricError::InvalidInput(
            "preds and target must have at least one dimension".into(),
        ));
    }
    if multidim_average == MultidimAverage::Samplewise && preds.ndim() < 2 {
        return Err(MetricError::InvalidInput(
            "samplewise averaging requires a sample dimension plus at least one extra dimension"
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
            "binary target values must be 0 or 1 (or the ignore index), got {bad}"
        )));
    }
    Ok(())
}

/// Binarize predictions and flatten both arrays to `(N, flat)`.
///
/// Predictions with any value outside `[0, 1]` are treated as logits and
/// passed through a sigmoid before thresholding. Thresholding is strict:
/// an entry is positive when `value > threshold`. Ignored target entries
/// are overwritten with [`IGNORE_SENTINEL`].
pub fn format(
    preds: &ArrayViewD<'_, f64>,
    target: &ArrayViewD<'_, i64>,
    threshold: f64,
    ignore_index: Option<i64>,
) -> (Array2<i64>, Array2<i64>) {
    let logits = preds.iter().any(|&v| !(0.0..=1.0).contains(&v));
    let probs = if logits {
        sigmoid(preds)
    } else {
        preds.to_owned()
    };
    let binarized = probs.mapv(|p| i64::from(p > threshold));
    let preds = flatten_to_rows(&binarized.view());

    let mut target = flatten_to_rows(target);
    if let Some(ig) = ignore_index {
        target.mapv_inplace(|t| if t == ig { IGNORE_SENTINEL } else { t });
    }
    (preds, target)
}

/// Accumulate confusion counts from formatted `(N, flat)` arrays.
///
/// Global reduction yields `(1, 1)` counts, samplewise `(N, 1)`.
pub fn update(
    preds: &Array2<i64>,
    target: &Array2<i64>,
    multidim_average: MultidimAverage,
) -> StatScores {
    let n = preds.nrows();
    let rows = match multidim_average {
        MultidimAverage::Global => 1,
        MultidimAverage::Samplewise => n,
    };
    let mut tp = Array2::<f64>::zeros((rows, 1));
    let mut fp = Array2::<f64>::zeros((rows, 1));
    let mut tn = Array2::<f64>::zeros((rows, 1));
    let mut fn_ = Array2::<f64>::zeros((rows, 1));

    for i in 0..n {
        let r = match multidim_average {
            MultidimAverage::Global => 0,
            MultidimAverage::Samplewise => i,
        };
        for j in 0..preds.ncols() {
            match (target[[i, j]], preds[[i, j]]) {
                (1, 1) => tp[[r, 0]] += 1.0,
                (1, 0) => fn_[[r, 0]] += 1.0,
                (0, 1) => fp[[r, 0]] += 1.0,
                (0, 0) => tn[[r, 0]] += 1.0,
                _ => {} // ignored entry
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
