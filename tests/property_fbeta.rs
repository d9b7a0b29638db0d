//! Property tests for the F-beta/F1 metric functions.
//!
//! Ensures the scores satisfy their mathematical invariants:
//! - Scores bounded to [0, 1], never NaN or infinite
//! - F1 is exactly F-beta at beta = 1
//! - Weighted averaging is reproducible from per-class output and supports
//! - Macro averaging is the mean of the per-class output over non-empty classes
//! - Calls are idempotent (bit-identical repeated results)

use medir::{
    binary_f1_score, binary_fbeta_score, multiclass_f1_score, multiclass_fbeta_score,
    multilabel_f1_score, multilabel_fbeta_score, Average, MultidimAverage,
};
use ndarray::{Array1, Array2, ArrayD};
use proptest::collection::vec;
use proptest::prelude::*;

const NUM_CLASSES: usize = 4;
const NUM_LABELS: usize = 3;

// =============================================================================
// Strategy Helpers
// =============================================================================

/// Binary probabilities with 0/1 targets of the same length.
fn binary_pair(
    len: std::ops::Range<usize>,
) -> impl Strategy<Value = (Vec<f64>, Vec<i64>)> {
    len.prop_flat_map(|l| (vec(0.0f64..1.0, l), vec(0i64..2, l)))
}

/// Multiclass class-id predictions and targets of the same length.
fn multiclass_pair(
    len: std::ops::Range<usize>,
) -> impl Strategy<Value = (Vec<i64>, Vec<i64>)> {
    let c = NUM_CLASSES as i64;
    len.prop_flat_map(move |l| (vec(0..c, l), vec(0..c, l)))
}

/// Multilabel probabilities and 0/1 targets, flattened over (N, NUM_LABELS).
fn multilabel_pair(
    len: std::ops::Range<usize>,
) -> impl Strategy<Value = (Vec<f64>, Vec<i64>)> {
    len.prop_flat_map(|l| {
        (
            vec(0.0f64..1.0, l * NUM_LABELS),
            vec(0i64..2, l * NUM_LABELS),
        )
    })
}

fn dyn_f64(values: Vec<f64>) -> ArrayD<f64> {
    Array1::from(values).into_dyn()
}

fn dyn_i64(values: Vec<i64>) -> ArrayD<i64> {
    Array1::from(values).into_dyn()
}

fn dyn_f64_2d(values: Vec<f64>, cols: usize) -> ArrayD<f64> {
    let rows = values.len() / cols;
    Array2::from_shape_vec((rows, cols), values)
        .expect("length is a multiple of cols")
        .into_dyn()
}

fn dyn_i64_2d(values: Vec<i64>, cols: usize) -> ArrayD<i64> {
    let rows = values.len() / cols;
    Array2::from_shape_vec((rows, cols), values)
        .expect("length is a multiple of cols")
        .into_dyn()
}

fn as_scalar(score: &ArrayD<f64>) -> f64 {
    *score.iter().next().expect("scalar output")
}

// =============================================================================
// Binary Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(10_000))]

    #[test]
    fn prop_binary_bounded_and_finite(
        (preds, target) in binary_pair(1..80),
        beta in prop_oneof![Just(0.5), Just(1.0), Just(2.0)]
    ) {
        let preds = dyn_f64(preds);
        let target = dyn_i64(target);
        let score = binary_fbeta_score(
            preds.view(), target.view(), beta, 0.5,
            MultidimAverage::Global, None, true,
        ).unwrap();
        let value = as_scalar(&score);

        prop_assert!((0.0..=1.0).contains(&value), "score {} not in [0, 1]", value);
        prop_assert!(value.is_finite(), "score {} is NaN or Inf", value);
    }

    #[test]
    fn prop_binary_f1_equals_fbeta_one(
        (preds, target) in binary_pair(1..80)
    ) {
        let preds = dyn_f64(preds);
        let target = dyn_i64(target);
        let f1 = binary_f1_score(
            preds.view(), target.view(), 0.5, MultidimAverage::Global, None, true,
        ).unwrap();
        let fbeta = binary_fbeta_score(
            preds.view(), target.view(), 1.0, 0.5, MultidimAverage::Global, None, true,
        ).unwrap();
        prop_assert_eq!(f1, fbeta);
    }

    #[test]
    fn prop_binary_probabilities_match_prethresholded(
        (preds, target) in binary_pair(1..80)
    ) {
        // Thresholding outside the function and passing 0/1 values must
        // give the same score as passing the probabilities.
        let binarized: Vec<f64> = preds
            .iter()
            .map(|&p| if p > 0.5 { 1.0 } else { 0.0 })
            .collect();
        let preds = dyn_f64(preds);
        let binarized = dyn_f64(binarized);
        let target = dyn_i64(target);

        let from_probs = binary_f1_score(
            preds.view(), target.view(), 0.5, MultidimAverage::Global, None, true,
        ).unwrap();
        let from_labels = binary_f1_score(
            binarized.view(), target.view(), 0.5, MultidimAverage::Global, None, true,
        ).unwrap();
        prop_assert_eq!(from_probs, from_labels);
    }
}

// =============================================================================
// Multiclass Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(10_000))]

    #[test]
    fn prop_multiclass_bounded_all_averages(
        (preds, target) in multiclass_pair(1..80),
        beta in prop_oneof![Just(0.5), Just(1.0), Just(2.0)]
    ) {
        let preds = dyn_f64(preds.into_iter().map(|v| v as f64).collect());
        let target = dyn_i64(target);

        for average in [Average::Micro, Average::Macro, Average::Weighted, Average::None] {
            let score = multiclass_fbeta_score(
                preds.view(), target.view(), beta, NUM_CLASSES, average, 1,
                MultidimAverage::Global, None, true,
            ).unwrap();
            for &value in score.iter() {
                prop_assert!(
                    (0.0..=1.0).contains(&value) && value.is_finite(),
                    "score {} invalid under {:?}",
                    value, average
                );
            }
        }
    }

    #[test]
    fn prop_multiclass_f1_equals_fbeta_one(
        (preds, target) in multiclass_pair(1..80)
    ) {
        let preds = dyn_f64(preds.into_iter().map(|v| v as f64).collect());
        let target = dyn_i64(target);
        for average in [Average::Micro, Average::Macro, Average::Weighted, Average::None] {
            let f1 = multiclass_f1_score(
                preds.view(), target.view(), NUM_CLASSES, average, 1,
                MultidimAverage::Global, None, true,
            ).unwrap();
            let fbeta = multiclass_fbeta_score(
                preds.view(), target.view(), 1.0, NUM_CLASSES, average, 1,
                MultidimAverage::Global, None, true,
            ).unwrap();
            prop_assert_eq!(f1, fbeta);
        }
    }

    #[test]
    fn prop_multiclass_weighted_consistent_with_none(
        (preds, target) in multiclass_pair(1..80)
    ) {
        // Weighting the per-class output by support outside the function
        // must reproduce the weighted scalar.
        let supports: Vec<f64> = (0..NUM_CLASSES as i64)
            .map(|c| target.iter().filter(|&&t| t == c).count() as f64)
            .collect();
        let preds = dyn_f64(preds.into_iter().map(|v| v as f64).collect());
        let target = dyn_i64(target);

        let per_class = multiclass_f1_score(
            preds.view(), target.view(), NUM_CLASSES, Average::None, 1,
            MultidimAverage::Global, None, true,
        ).unwrap();
        let weighted = multiclass_f1_score(
            preds.view(), target.view(), NUM_CLASSES, Average::Weighted, 1,
            MultidimAverage::Global, None, true,
        ).unwrap();

        let total: f64 = supports.iter().sum();
        let manual = if total == 0.0 {
            0.0
        } else {
            per_class
                .iter()
                .zip(supports.iter())
                .map(|(s, w)| s * w)
                .sum::<f64>()
                / total
        };
        prop_assert!(
            (as_scalar(&weighted) - manual).abs() < 1e-9,
            "weighted {} != manual {}",
            as_scalar(&weighted), manual
        );
    }

    #[test]
    fn prop_multiclass_macro_is_mean_over_nonempty(
        (preds, target) in multiclass_pair(1..80)
    ) {
        // Macro equals the unweighted mean of the per-class output after
        // excluding classes absent from both predictions and targets.
        let nonempty: Vec<bool> = (0..NUM_CLASSES as i64)
            .map(|c| target.contains(&c) || preds.contains(&c))
            .collect();
        let preds = dyn_f64(preds.into_iter().map(|v| v as f64).collect());
        let target = dyn_i64(target);

        let per_class = multiclass_f1_score(
            preds.view(), target.view(), NUM_CLASSES, Average::None, 1,
            MultidimAverage::Global, None, true,
        ).unwrap();
        let macro_score = multiclass_f1_score(
            preds.view(), target.view(), NUM_CLASSES, Average::Macro, 1,
            MultidimAverage::Global, None, true,
        ).unwrap();

        let kept: Vec<f64> = per_class
            .iter()
            .zip(nonempty.iter())
            .filter(|(_, &keep)| keep)
            .map(|(&s, _)| s)
            .collect();
        prop_assert!(!kept.is_empty());
        let manual = kept.iter().sum::<f64>() / kept.len() as f64;
        prop_assert!(
            (as_scalar(&macro_score) - manual).abs() < 1e-9,
            "macro {} != manual {}",
            as_scalar(&macro_score), manual
        );
    }

    #[test]
    fn prop_multiclass_perfect_predictions_score_one(
        target in vec(0i64..NUM_CLASSES as i64, 1..80)
    ) {
        let preds = dyn_f64(target.iter().map(|&v| v as f64).collect());
        let target = dyn_i64(target);
        for average in [Average::Micro, Average::Macro, Average::Weighted] {
            let score = multiclass_f1_score(
                preds.view(), target.view(), NUM_CLASSES, average, 1,
                MultidimAverage::Global, None, true,
            ).unwrap();
            prop_assert!(
                (as_scalar(&score) - 1.0).abs() < 1e-12,
                "perfect predictions scored {} under {:?}",
                as_scalar(&score), average
            );
        }
    }

    #[test]
    fn prop_multiclass_idempotent(
        (preds, target) in multiclass_pair(1..80)
    ) {
        let preds = dyn_f64(preds.into_iter().map(|v| v as f64).collect());
        let target = dyn_i64(target);
        let first = multiclass_fbeta_score(
            preds.view(), target.view(), 2.0, NUM_CLASSES, Average::Macro, 1,
            MultidimAverage::Global, None, true,
        ).unwrap();
        let second = multiclass_fbeta_score(
            preds.view(), target.view(), 2.0, NUM_CLASSES, Average::Macro, 1,
            MultidimAverage::Global, None, true,
        ).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_multiclass_none_has_one_entry_per_class(
        (preds, target) in multiclass_pair(1..80)
    ) {
        let preds = dyn_f64(preds.into_iter().map(|v| v as f64).collect());
        let target = dyn_i64(target);
        let score = multiclass_f1_score(
            preds.view(), target.view(), NUM_CLASSES, Average::None, 1,
            MultidimAverage::Global, None, true,
        ).unwrap();
        prop_assert_eq!(score.shape(), &[NUM_CLASSES]);
    }
}

// =============================================================================
// Multilabel Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(10_000))]

    #[test]
    fn prop_multilabel_bounded_all_averages(
        (preds, target) in multilabel_pair(1..40),
        beta in prop_oneof![Just(0.5), Just(1.0), Just(2.0)]
    ) {
        let preds = dyn_f64_2d(preds, NUM_LABELS);
        let target = dyn_i64_2d(target, NUM_LABELS);
        for average in [Average::Micro, Average::Macro, Average::Weighted, Average::None] {
            let score = multilabel_fbeta_score(
                preds.view(), target.view(), beta, NUM_LABELS, 0.5, average,
                MultidimAverage::Global, None, true,
            ).unwrap();
            for &value in score.iter() {
                prop_assert!(
                    (0.0..=1.0).contains(&value) && value.is_finite(),
                    "score {} invalid under {:?}",
                    value, average
                );
            }
        }
    }

    #[test]
    fn prop_multilabel_f1_equals_fbeta_one(
        (preds, target) in multilabel_pair(1..40)
    ) {
        let preds = dyn_f64_2d(preds, NUM_LABELS);
        let target = dyn_i64_2d(target, NUM_LABELS);
        let f1 = multilabel_f1_score(
            preds.view(), target.view(), NUM_LABELS, 0.5, Average::Macro,
            MultidimAverage::Global, None, true,
        ).unwrap();
        let fbeta = multilabel_fbeta_score(
            preds.view(), target.view(), 1.0, NUM_LABELS, 0.5, Average::Macro,
            MultidimAverage::Global, None, true,
        ).unwrap();
        prop_assert_eq!(f1, fbeta);
    }
}

// =============================================================================
// Edge Case Tests (not proptest but important coverage)
// =============================================================================

#[test]
fn test_all_entries_ignored_scores_zero() {
    let target = dyn_i64(vec![7, 7, 7, 7]);
    let preds = dyn_f64(vec![0.9, 0.1, 0.8, 0.2]);
    let score = binary_f1_score(
        preds.view(),
        target.view(),
        0.5,
        MultidimAverage::Global,
        Some(7),
        true,
    )
    .unwrap();
    assert_eq!(as_scalar(&score), 0.0);
}

#[test]
fn test_single_entry_inputs() {
    let target = dyn_i64(vec![1]);
    let preds = dyn_f64(vec![0.9]);
    let score = binary_f1_score(
        preds.view(),
        target.view(),
        0.5,
        MultidimAverage::Global,
        None,
        true,
    )
    .unwrap();
    assert_eq!(as_scalar(&score), 1.0);
}

#[test]
fn test_samplewise_preserves_sample_count() {
    let target = dyn_i64_2d(vec![0, 1, 1, 0, 1, 1], 3);
    let preds = dyn_f64_2d(vec![0.9, 0.8, 0.1, 0.2, 0.7, 0.6], 3);
    let score = binary_f1_score(
        preds.view(),
        target.view(),
        0.5,
        MultidimAverage::Samplewise,
        None,
        true,
    )
    .unwrap();
    assert_eq!(score.shape(), &[2]);
}
