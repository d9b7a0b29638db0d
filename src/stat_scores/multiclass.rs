//! Multiclass-task stat scores: validation, formatting, accumulation.
//!
//! Counts are one-vs-rest per class: an entry with target `t` and predicted
//! class `p` is a true positive for `t` when `p == t`, otherwise a false
//! negative for `t` and a false positive for `p`. True negatives are derived
//! from the per-row kept-entry total, since every kept entry contributes to
//! exactly one of tp/fp/fn/tn for each class.

use ndarray::{Array2, Array3, ArrayViewD};

use super::{flatten_to_rows, StatScores};
use crate::average::{Average, MultidimAverage};
use crate::error::{MetricError, Result};

/// Formatted multiclass predictions.
///
/// With `top_k == 1`, per-class scores are argmax-reduced to class ids up
/// front; with `top_k > 1` the scores must be kept so accumulation can rank
/// them per entry.
#[derive(Clone, Debug)]
pub enum MulticlassPreds {
    /// Class ids, shape `(N, flat)`
    Labels(Array2<i64>),
    /// Per-class scores, shape `(N, C, flat)`
    Scores(Array3<f64>),
}

/// Validate multiclass-task configuration arguments.
pub fn arg_validation(num_classes: usize, top_k: usize, average: Average) -> Result<()> {
    if num_classes < 2 {
        return Err(MetricError::InvalidArgument(format!(
            "num_classes must be at least 2, got {num_classes}"
        )));
    }
    if top_k == 0 {
        return Err(MetricError::InvalidArgument(
            "top_k must be at least 1".into(),
        ));
    }
    if top_k > num_classes {
        return Err(MetricError::InvalidArgument(format!(
            "top_k ({top_k}) must not exceed num_classes ({num_classes})"
        )));
    }
    if average == Average::Binary {
        return Err(MetricError::InvalidArgument(
            "binary averaging is not defined for multiclass tasks".into(),
        ));
    }
    Ok(())
}

/// Validate multiclass-task prediction and target arrays.
pub fn tensor_validation(
    preds: &ArrayViewD<'_, f64>,
    target: &ArrayViewD<'_, i64>,
    num_classes: usize,
    top_k: usize,
    multidim_average: MultidimAverage,
    ignore_index: Option<i64>,
) -> Result<()> {
    if target.ndim() == 0 {
        return Err(MetricError::InvalidInput(
            "target must have at least one dimension".into(),
        ));
    }
    if preds.ndim() == target.ndim() + 1 {
        // Per-class scores: (N, C, ...) against target (N, ...)
        if preds.shape()[1] != num_classes {
            return Err(MetricError::InvalidInput(format!(
                "preds second dimension must equal num_classes ({num_classes}), got {}",
                preds.shape()[1]
            )));
        }
        let squeezed: Vec<usize> = std::iter::once(preds.shape()[0])
            .chain(preds.shape()[2..].iter().copied())
            .collect();
        if squeezed != target.shape() {
            return Err(MetricError::InvalidInput(format!(
                "preds shape {:?} is incompatible with target shape {:?}",
                preds.shape(),
                target.shape()
            )));
        }
    } else if preds.ndim() == target.ndim() {
        // Class ids already
        if preds.shape() != target.shape() {
            return Err(MetricError::InvalidInput(format!(
                "preds and target must have the same shape, got {:?} and {:?}",
                preds.shape(),
                target.shape()
            )));
        }
        if top_k > 1 {
            return Err(MetricError::InvalidInput(
                "top_k > 1 requires per-class score predictions".into(),
            ));
        }
        if let Some(&bad) = preds
            .iter()
            .find(|&&p| p.fract() != 0.0 || p < 0.0 || p >= num_classes as f64)
        {
            return Err(MetricError::InvalidInput(format!(
                "class id predictions must be whole numbers in [0, {num_classes}), got {bad}"
            )));
        }
    } else {
        return Err(MetricError::InvalidInput(format!(
            "preds must have the same number of dimensions as target, or one extra \
             class dimension, got {} and {}",
            preds.ndim(),
            target.ndim()
        )));
    }
    if multidim_average == MultidimAverage::Samplewise && target.ndim() < 2 {
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
        .find(|&&t| (t < 0 || t >= num_classes as i64) && Some(t) != ignore_index)
    {
        return Err(MetricError::InvalidInput(format!(
            "target values must lie in [0, {num_classes}) (or equal the ignore index), got {bad}"
        )));
    }
    Ok(())
}

/// Convert predictions to the accumulation layout and flatten targets.
///
/// Per-class scores are argmax-reduced along the class axis when
/// `top_k == 1` (first maximum wins on ties) and kept as `(N, C, flat)`
/// scores otherwise. Class-id predictions pass through unchanged.
pub fn format(
    preds: &ArrayViewD<'_, f64>,
    target: &ArrayViewD<'_, i64>,
    top_k: usize,
) -> (MulticlassPreds, Array2<i64>) {
    let target_ndim = target.ndim();
    let target = flatten_to_rows(target);

    let formatted = if preds.ndim() == target_ndim + 1 {
        let n = preds.shape()[0];
        let c = preds.shape()[1];
        let flat = if n * c == 0 { 0 } else { preds.len() / (n * c) };
        let data: Vec<f64> = preds.iter().copied().collect();

        if top_k == 1 {
            let mut labels = Array2::<i64>::zeros((n, flat));
            for i in 0..n {
                for j in 0..flat {
                    let mut best = 0usize;
                    let mut best_score = f64::NEG_INFINITY;
                    for class in 0..c {
                        let score = data[(i * c + class) * flat + j];
                        if score > best_score {
                            best_score = score;
                            best = class;
                        }
                    }
                    labels[[i, j]] = best as i64;
                }
            }
            MulticlassPreds::Labels(labels)
        } else {
            let scores = Array3::from_shape_vec((n, c, flat), data)
                .expect("row-major flatten preserves the element count");
            MulticlassPreds::Scores(scores)
        }
    } else {
        let labels = preds.mapv(|p| p as i64);
        MulticlassPreds::Labels(flatten_to_rows(&labels.view()))
    };

    (formatted, target)
}

/// Accumulate one-vs-rest confusion counts.
///
/// Target entries equal to `ignore_index` are skipped and contribute to no
/// count. Global reduction yields `(1, C)` counts, samplewise `(N, C)`.
pub fn update(
    preds: &MulticlassPreds,
    target: &Array2<i64>,
    num_classes: usize,
    top_k: usize,
    multidim_average: MultidimAverage,
    ignore_index: Option<i64>,
) -> StatScores {
    let n = target.nrows();
    let rows = match multidim_average {
        MultidimAverage::Global => 1,
        MultidimAverage::Samplewise => n,
    };
    let mut tp = Array2::<f64>::zeros((rows, num_classes));
    let mut fp = Array2::<f64>::zeros((rows, num_classes));
    let mut fn_ = Array2::<f64>::zeros((rows, num_classes));
    let mut kept = vec![0.0f64; rows];

    for i in 0..n {
        let r = match multidim_average {
            MultidimAverage::Global => 0,
            MultidimAverage::Samplewise => i,
        };
        for j in 0..target.ncols() {
            let t = target[[i, j]];
            if Some(t) == ignore_index {
                continue;
            }
            kept[r] += 1.0;
            let t = t as usize;
            match preds {
                MulticlassPreds::Labels(labels) => {
                    let p = labels[[i, j]] as usize;
                    if p == t {
                        tp[[r, t]] += 1.0;
                    } else {
                        fp[[r, p]] += 1.0;
                        fn_[[r, t]] += 1.0;
                    }
                }
                MulticlassPreds::Scores(scores) => {
                    let column: Vec<f64> =
                        (0..num_classes).map(|class| scores[[i, class, j]]).collect();
                    let mut hit = false;
                    for class in top_k_indices(&column, top_k) {
                        if class == t {
                            tp[[r, t]] += 1.0;
                            hit = true;
                        } else {
                            fp[[r, class]] += 1.0;
                        }
                    }
                    if !hit {
                        fn_[[r, t]] += 1.0;
                    }
                }
            }
        }
    }

    // Every kept entry lands in exactly one of tp/fp/fn/tn per class.
    let mut tn = Array2::<f64>::zeros((rows, num_classes));
    for r in 0..rows {
        for class in 0..num_classes {
            tn[[r, class]] = kept[r] - tp[[r, class]] - fp[[r, class]] - fn_[[r, class]];
        }
    }

    StatScores {
        true_positives: tp,
        false_positives: fp,
        true_negatives: tn,
        false_negatives: fn_,
    }
}

/// Indices of the `k` largest values, earlier index first on ties.
fn top_k_indices(values: &[f64], k: usize) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..values.len()).collect();
    indices.sort_by(|&a, &b| {
        values[b]
            .partial_cmp(&values[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    indices.truncate(k);
    indices
}
