//! Statistic reduction: confusion counts → F-beta score.

use ndarray::{arr0, Array1, Array2, ArrayD, Axis, Zip};

use crate::average::{Average, MultidimAverage};
use crate::compute::safe_divide;
use crate::error::{MetricError, Result};
use crate::stat_scores::StatScores;

/// Reduce confusion counts to an F-beta score.
///
/// Counts have shape `(rows, classes)`: one row under
/// [`MultidimAverage::Global`], one row per sample under
/// [`MultidimAverage::Samplewise`]. The output shape follows from the
/// averaging mode:
///
/// | average | Global | Samplewise |
/// |---|---|---|
/// | `Binary`/`Micro`/`Macro`/`Weighted` | scalar (0-dim) | `(N,)` |
/// | `None` | `(C,)` | `(N, C)` |
///
/// Per-class and aggregate divisions are safe: wherever a denominator is
/// zero the score is 0, never NaN. [`Average::Weighted`] weights classes by
/// support (tp + fn); [`Average::Macro`] weights every class that occurs in
/// predictions or targets equally and excludes classes with
/// `tp = fp = fn = 0` from the mean.
pub fn fbeta_reduce(
    scores: &StatScores,
    beta: f64,
    average: Average,
    multidim_average: MultidimAverage,
) -> Result<ArrayD<f64>> {
    validate_beta(beta)?;
    if multidim_average == MultidimAverage::Global && scores.rows() != 1 {
        return Err(MetricError::ShapeMismatch(format!(
            "global reduction expects a single count row, got {}",
            scores.rows()
        )));
    }
    let beta2 = beta * beta;
    let tp = &scores.true_positives;
    let fp = &scores.false_positives;
    let fn_ = &scores.false_negatives;

    match average {
        Average::Binary => {
            if scores.classes() != 1 {
                return Err(MetricError::ShapeMismatch(format!(
                    "binary reduction expects a single class column, got {}",
                    scores.classes()
                )));
            }
            let score = fbeta_formula(tp, fp, fn_, beta2);
            Ok(collapse_rows(score.column(0).to_owned(), multidim_average))
        }
        Average::Micro => {
            let tp = tp.sum_axis(Axis(1));
            let fp = fp.sum_axis(Axis(1));
            let fn_ = fn_.sum_axis(Axis(1));
            let num = tp.mapv(|v| (1.0 + beta2) * v);
            let denom = &num + &fn_.mapv(|v| beta2 * v) + &fp;
            Ok(collapse_rows(safe_divide(&num, &denom), multidim_average))
        }
        Average::None => {
            let score = fbeta_formula(tp, fp, fn_, beta2);
            Ok(match multidim_average {
                MultidimAverage::Global => score.row(0).to_owned().into_dyn(),
                MultidimAverage::Samplewise => score.into_dyn(),
            })
        }
        Average::Macro | Average::Weighted => {
            let score = fbeta_formula(tp, fp, fn_, beta2);
            let weights = if average == Average::Weighted {
                tp + fn_
            } else {
                let mut weights = Array2::<f64>::zeros(tp.raw_dim());
                Zip::from(&mut weights)
                    .and(tp)
                    .and(fp)
                    .and(fn_)
                    .for_each(|w, &a, &b, &c| {
                        *w = if a + b + c > 0.0 { 1.0 } else { 0.0 };
                    });
                weights
            };
            let num = (&weights * &score).sum_axis(Axis(1));
            let denom = weights.sum_axis(Axis(1));
            Ok(collapse_rows(safe_divide(&num, &denom), multidim_average))
        }
    }
}

/// `(1 + β²)·tp / ((1 + β²)·tp + β²·fn + fp)`, elementwise with safe division.
fn fbeta_formula(
    tp: &Array2<f64>,
    fp: &Array2<f64>,
    fn_: &Array2<f64>,
    beta2: f64,
) -> Array2<f64> {
    let num = tp.mapv(|v| (1.0 + beta2) * v);
    let denom = &num + &fn_.mapv(|v| beta2 * v) + fp;
    safe_divide(&num, &denom)
}

/// Squeeze per-row results to the output shape: a 0-dim scalar under global
/// reduction, an `(N,)` vector under samplewise reduction.
fn collapse_rows(values: Array1<f64>, multidim_average: MultidimAverage) -> ArrayD<f64> {
    match multidim_average {
        MultidimAverage::Global => arr0(values[0]).into_dyn(),
        MultidimAverage::Samplewise => values.into_dyn(),
    }
}

/// Reject non-positive or non-finite beta values.
pub(crate) fn validate_beta(beta: f64) -> Result<()> {
    if !beta.is_finite() || beta <= 0.0 {
        return Err(MetricError::InvalidArgument(format!(
            "beta must be a positive finite value, got {beta}"
        )));
    }
    Ok(())
}
