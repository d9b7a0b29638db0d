//! Classification metrics over `ndarray` arrays.
//!
//! `medir` computes F-beta and F1 scores for binary, multiclass, and
//! multilabel classification from prediction and target arrays:
//!
//! - Micro, macro, weighted, and per-class averaging
//! - Global or per-sample reduction of extra dimensions
//! - Probability/logit inputs with thresholding, argmax, and top-k decision rules
//! - Ignore-index masking for partially labelled data
//!
//! All functions are pure: every call is independent, idempotent, and free
//! of I/O. Divisions are safe throughout — a zero denominator yields a score
//! of 0, never NaN.
//!
//! # Example
//!
//! ```
//! use medir::{binary_f1_score, MultidimAverage};
//! use ndarray::array;
//!
//! let target = array![0i64, 1, 0, 1, 0, 1].into_dyn();
//! let preds = array![0.0, 0.0, 1.0, 1.0, 0.0, 1.0].into_dyn();
//!
//! let score = binary_f1_score(
//!     preds.view(),
//!     target.view(),
//!     0.5,
//!     MultidimAverage::Global,
//!     None,
//!     true,
//! )?;
//! let f1 = score.into_dimensionality::<ndarray::Ix0>()?.into_scalar();
//! assert!((f1 - 2.0 / 3.0).abs() < 1e-6);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod average;
pub mod compute;
pub mod error;
pub mod fbeta;
pub mod stat_scores;

pub use average::{Average, MultidimAverage, Task};
pub use error::{MetricError, Result};
pub use fbeta::{
    binary_f1_score, binary_fbeta_score, f1_score, fbeta_reduce, fbeta_score,
    multiclass_f1_score, multiclass_fbeta_score, multilabel_f1_score, multilabel_fbeta_score,
    ScoreConfig,
};
pub use stat_scores::StatScores;
