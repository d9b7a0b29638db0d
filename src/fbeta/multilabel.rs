//! Multilabel F-beta / F1 front-ends.

use ndarray::{ArrayD, ArrayViewD};

use super::reduce::{fbeta_reduce, validate_beta};
use crate::average::{Average, MultidimAverage};
use crate::error::Result;
use crate::stat_scores::multilabel;

/// F-beta score for multilabel classification.
///
/// `preds` and `target` have shape `(N, num_labels, ...)`; predictions hold
/// probabilities, logits (sigmoid-converted when any value falls outside
/// `[0, 1]`), or 0/1 indicators, and targets hold 0/1 indicators. Each label
/// is scored as an independent binary decision.
///
/// Target entries equal to `ignore_index` contribute to no count.
///
/// Output shape: scalar for `Micro`/`Macro`/`Weighted` under global
/// reduction, `(N,)` under samplewise; `(num_labels,)` / `(N, num_labels)`
/// for [`Average::None`].
///
/// # Example
///
/// ```
/// use medir::{multilabel_fbeta_score, Average, MultidimAverage};
/// use ndarray::array;
///
/// let target = array![[0i64, 1, 0], [1, 0, 1]].into_dyn();
/// let preds = array![[0.11, 0.22, 0.84], [0.73, 0.33, 0.92]].into_dyn();
///
/// let score = multilabel_fbeta_score(
///     preds.view(),
///     target.view(),
///     2.0,
///     3,
///     0.5,
///     Average::Macro,
///     MultidimAverage::Global,
///     None,
///     true,
/// )?;
/// let fbeta = score.into_dimensionality::<ndarray::Ix0>()?.into_scalar();
/// assert!((fbeta - 0.6111).abs() < 1e-4);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[allow(clippy::too_many_arguments)]
pub fn multilabel_fbeta_score(
    preds: ArrayViewD<'_, f64>,
    target: ArrayViewD<'_, i64>,
    beta: f64,
    num_labels: usize,
    threshold: f64,
    average: Average,
    multidim_average: MultidimAverage,
    ignore_index: Option<i64>,
    validate_args: bool,
) -> Result<ArrayD<f64>> {
    if validate_args {
        validate_beta(beta)?;
        multilabel::arg_validation(num_labels, threshold, average)?;
        multilabel::tensor_validation(&preds, &target, num_labels, multidim_average, ignore_index)?;
    }
    let (preds, target) = multilabel::format(&preds, &target, threshold, ignore_index);
    let scores = multilabel::update(&preds, &target, multidim_average);
    fbeta_reduce(&scores, beta, average, multidim_average)
}

/// F1 score for multilabel classification: [`multilabel_fbeta_score`] with
/// `beta = 1`.
#[allow(clippy::too_many_arguments)]
pub fn multilabel_f1_score(
    preds: ArrayViewD<'_, f64>,
    target: ArrayViewD<'_, i64>,
    num_labels: usize,
    threshold: f64,
    average: Average,
    multidim_average: MultidimAverage,
    ignore_index: Option<i64>,
    validate_args: bool,
) -> Result<ArrayD<f64>> {
    multilabel_fbeta_score(
        preds,
        target,
        1.0,
        num_labels,
        threshold,
        average,
        multidim_average,
        ignore_index,
        validate_args,
    )
}
