//! Multiclass F-beta / F1 front-ends.

use ndarray::{ArrayD, ArrayViewD};

use super::reduce::{fbeta_reduce, validate_beta};
use crate::average::{Average, MultidimAverage};
use crate::error::Result;
use crate::stat_scores::multiclass;

/// F-beta score for multiclass classification.
///
/// `preds` is either a class-id array of shape `(N, ...)` (whole-valued) or
/// a per-class score array of shape `(N, C, ...)`; score arrays are reduced
/// with argmax along the class axis, or ranked per entry when `top_k > 1`.
/// `target` holds class ids in `[0, num_classes)` with shape `(N, ...)`.
///
/// Target entries equal to `ignore_index` contribute to no count. When the
/// ignored value names a class (`0 <= ignore_index < num_classes`), that
/// class is removed from per-class output and from macro/weighted
/// aggregation; under [`Average::Micro`] mispredictions into the ignored
/// class still count.
///
/// Output shape: scalar for `Micro`/`Macro`/`Weighted` under global
/// reduction, `(N,)` under samplewise; `(C,)` / `(N, C)` for
/// [`Average::None`].
///
/// # Example
///
/// ```
/// use medir::{multiclass_fbeta_score, Average, MultidimAverage};
/// use ndarray::array;
///
/// let target = array![2i64, 1, 0, 0].into_dyn();
/// let preds = array![2.0, 1.0, 0.0, 1.0].into_dyn();
///
/// let score = multiclass_fbeta_score(
///     preds.view(),
///     target.view(),
///     2.0,
///     3,
///     Average::Macro,
///     1,
///     MultidimAverage::Global,
///     None,
///     true,
/// )?;
/// let fbeta = score.into_dimensionality::<ndarray::Ix0>()?.into_scalar();
/// assert!((fbeta - 0.7963).abs() < 1e-4);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[allow(clippy::too_many_arguments)]
pub fn multiclass_fbeta_score(
    preds: ArrayViewD<'_, f64>,
    target: ArrayViewD<'_, i64>,
    beta: f64,
    num_classes: usize,
    average: Average,
    top_k: usize,
    multidim_average: MultidimAverage,
    ignore_index: Option<i64>,
    validate_args: bool,
) -> Result<ArrayD<f64>> {
    if validate_args {
        validate_beta(beta)?;
        multiclass::arg_validation(num_classes, top_k, average)?;
        multiclass::tensor_validation(
            &preds,
            &target,
            num_classes,
            top_k,
            multidim_average,
            ignore_index,
        )?;
    }
    let (preds, target) = multiclass::format(&preds, &target, top_k);
    let mut scores = multiclass::update(
        &preds,
        &target,
        num_classes,
        top_k,
        multidim_average,
        ignore_index,
    );

    // An in-range ignored class must not surface in per-class output nor
    // influence macro/weighted aggregates; micro keeps the column so that
    // mispredictions into the ignored class still count.
    if matches!(
        average,
        Average::Macro | Average::Weighted | Average::None
    ) {
        if let Some(ig) = ignore_index {
            if ig >= 0 && (ig as usize) < num_classes {
                scores = scores.without_class(ig as usize);
            }
        }
    }

    fbeta_reduce(&scores, beta, average, multidim_average)
}

/// F1 score for multiclass classification: [`multiclass_fbeta_score`] with
/// `beta = 1`.
#[allow(clippy::too_many_arguments)]
pub fn multiclass_f1_score(
    preds: ArrayViewD<'_, f64>,
    target: ArrayViewD<'_, i64>,
    num_classes: usize,
    average: Average,
    top_k: usize,
    multidim_average: MultidimAverage,
    ignore_index: Option<i64>,
    validate_args: bool,
) -> Result<ArrayD<f64>> {
    multiclass_fbeta_score(
        preds,
        target,
        1.0,
        num_classes,
        average,
        top_k,
        multidim_average,
        ignore_index,
        validate_args,
    )
}
