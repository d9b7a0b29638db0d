//! Binary F-beta / F1 front-ends.

use ndarray::{ArrayD, ArrayViewD};

use super::reduce::{fbeta_reduce, validate_beta};
use crate::average::{Average, MultidimAverage};
use crate::error::Result;
use crate::stat_scores::binary;

/// F-beta score for binary classification.
///
/// `preds` has shape `(N, ...)` and holds probabilities, logits (detected
/// when any value falls outside `[0, 1]`, then passed through a sigmoid),
/// or already-binarized 0/1 values. `target` holds 0/1 class indicators of
/// the same shape. Extra dimensions are flattened into the batch under
/// [`MultidimAverage::Global`] and scored per sample under
/// [`MultidimAverage::Samplewise`].
///
/// Target entries equal to `ignore_index` contribute to no count.
///
/// Returns a 0-dim scalar (global) or an `(N,)` vector (samplewise).
///
/// # Example
///
/// ```
/// use medir::{binary_fbeta_score, MultidimAverage};
/// use ndarray::array;
///
/// let target = array![0i64, 1, 0, 1, 0, 1].into_dyn();
/// let preds = array![0.11, 0.22, 0.84, 0.73, 0.33, 0.92].into_dyn();
///
/// let score = binary_fbeta_score(
///     preds.view(),
///     target.view(),
///     2.0,
///     0.5,
///     MultidimAverage::Global,
///     None,
///     true,
/// )?;
/// let fbeta = score.into_dimensionality::<ndarray::Ix0>()?.into_scalar();
/// assert!((fbeta - 0.6667).abs() < 1e-4);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn binary_fbeta_score(
    preds: ArrayViewD<'_, f64>,
    target: ArrayViewD<'_, i64>,
    beta: f64,
    threshold: f64,
    multidim_average: MultidimAverage,
    ignore_index: Option<i64>,
    validate_args: bool,
) -> Result<ArrayD<f64>> {
    if validate_args {
        validate_beta(beta)?;
        binary::arg_validation(threshold)?;
        binary::tensor_validation(&preds, &target, multidim_average, ignore_index)?;
    }
    let (preds, target) = binary::format(&preds, &target, threshold, ignore_index);
    let scores = binary::update(&preds, &target, multidim_average);
    fbeta_reduce(&scores, beta, Average::Binary, multidim_average)
}

/// F1 score for binary classification: [`binary_fbeta_score`] with `beta = 1`.
pub fn binary_f1_score(
    preds: ArrayViewD<'_, f64>,
    target: ArrayViewD<'_, i64>,
    threshold: f64,
    multidim_average: MultidimAverage,
    ignore_index: Option<i64>,
    validate_args: bool,
) -> Result<ArrayD<f64>> {
    binary_fbeta_score(
        preds,
        target,
        1.0,
        threshold,
        multidim_average,
        ignore_index,
        validate_args,
    )
}
