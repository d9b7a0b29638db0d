//! F-beta and F1 scores for binary, multiclass, and multilabel tasks.
//!
//! The task-specific front-ends validate arguments and inputs, convert
//! predictions to discrete decisions, accumulate confusion counts via
//! [`crate::stat_scores`], and reduce them with [`fbeta_reduce`]. The
//! [`fbeta_score`]/[`f1_score`] entry points dispatch on a [`Task`] tag
//! with the remaining knobs carried by a [`ScoreConfig`].

mod binary;
mod multiclass;
mod multilabel;
mod reduce;


pub use binary::{binary_f1_score, binary_fbeta_score};
pub use multiclass::{multiclass_f1_score, multiclass_fbeta_score};
pub use multilabel::{multilabel_f1_score, multilabel_fbeta_score};
pub use reduce::fbeta_reduce;

use ndarray::{ArrayD, ArrayViewD};

use crate::average::{Average, MultidimAverage, Task};
use crate::error::{MetricError, Result};

/// Configuration for the task-dispatching entry points.
///
/// `num_classes` is required for [`Task::Multiclass`] and `num_labels` for
/// [`Task::Multilabel`]; everything else has a usable default. The
/// `average` field is ignored by [`Task::Binary`], which always computes the
/// single positive-class statistic.
#[derive(Clone, Debug)]
pub struct ScoreConfig {
    /// Probability threshold for binary/multilabel decisions
    pub threshold: f64,
    /// Number of classes (multiclass only)
    pub num_classes: Option<usize>,
    /// Number of labels (multilabel only)
    pub num_labels: Option<usize>,
    /// Averaging strategy over classes/labels
    pub average: Average,
    /// Reduction of extra dimensions
    pub multidim_average: MultidimAverage,
    /// Number of top-ranked classes considered a hit (multiclass only)
    pub top_k: usize,
    /// Target value excluded from every count
    pub ignore_index: Option<i64>,
    /// Skip argument/input validation for speed
    pub validate_args: bool,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            threshold: 0.5,
            num_classes: None,
            num_labels: None,
            average: Average::Micro,
            multidim_average: MultidimAverage::Global,
            top_k: 1,
            ignore_index: None,
            validate_args: true,
        }
    }
}

/// F-beta score dispatched by task.
///
/// # Example
///
/// ```
/// use medir::{fbeta_score, ScoreConfig, Task};
/// use ndarray::array;
///
/// let target = array![0i64, 1, 2, 0, 1, 2].into_dyn();
/// let preds = array![0.0, 2.0, 1.0, 0.0, 0.0, 1.0].into_dyn();
///
/// let config = ScoreConfig {
///     num_classes: Some(3),
///     ..Default::default()
/// };
/// let score = fbeta_score(preds.view(), target.view(), Task::Multiclass, 0.5, &config)?;
/// let fbeta = score.into_dimensionality::<ndarray::Ix0>()?.into_scalar();
/// assert!((fbeta - 0.3333).abs() < 1e-4);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn fbeta_score(
    preds: ArrayViewD<'_, f64>,
    target: ArrayViewD<'_, i64>,
    task: Task,
    beta: f64,
    config: &ScoreConfig,
) -> Result<ArrayD<f64>> {
    match task {
        Task::Binary => binary_fbeta_score(
            preds,
            target,
            beta,
            config.threshold,
            config.multidim_average,
            config.ignore_index,
            config.validate_args,
        ),
        Task::Multiclass => {
            let num_classes = config.num_classes.ok_or_else(|| {
                MetricError::InvalidArgument(
                    "num_classes is required for multiclass tasks".into(),
                )
            })?;
            multiclass_fbeta_score(
                preds,
                target,
                beta,
                num_classes,
                config.average,
                config.top_k,
                config.multidim_average,
                config.ignore_index,
                config.validate_args,
            )
        }
        Task::Multilabel => {
            let num_labels = config.num_labels.ok_or_else(|| {
                MetricError::InvalidArgument(
                    "num_labels is required for multilabel tasks".into(),
                )
            })?;
            multilabel_fbeta_score(
                preds,
                target,
                beta,
                num_labels,
                config.threshold,
                config.average,
                config.multidim_average,
                config.ignore_index,
                config.validate_args,
            )
        }
    }
}

/// F1 score dispatched by task: [`fbeta_score`] with `beta = 1`.
pub fn f1_score(
    preds: ArrayViewD<'_, f64>,
    target: ArrayViewD<'_, i64>,
    task: Task,
    config: &ScoreConfig,
) -> Result<ArrayD<f64>> {
    fbeta_score(preds, target, task, 1.0, config)
}
