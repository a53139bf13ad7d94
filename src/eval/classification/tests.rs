//! Tests for classification metrics

use super::*;
use approx::assert_abs_diff_eq;
use proptest::prelude::*;

#[test]
fn test_confusion_matrix_worked_example() {
    let y_true = vec![0, 1, 2, 2, 1];
    let y_pred = vec![0, 1, 1, 2, 1];
    let cm = confusion_matrix(&y_true, &y_pred, 3);

    assert_eq!(cm.to_rows(), vec![vec![1, 0, 0], vec![0, 2, 0], vec![0, 1, 1]]);
    assert_abs_diff_eq!(accuracy(&y_true, &y_pred), 0.8, epsilon = 1e-12);
}

#[test]
fn test_confusion_matrix_tp_fp_fn() {
    let y_true = vec![1, 0, 0, 1];
    let y_pred = vec![1, 1, 0, 1];
    let cm = confusion_matrix(&y_true, &y_pred, 2);

    // Class 1: predicted 1 twice when true, once when true was 0
    assert_eq!(cm.true_positives(1), 2);
    assert_eq!(cm.false_positives(1), 1);
    assert_eq!(cm.false_negatives(1), 0);

    assert_eq!(cm.true_positives(0), 1);
    assert_eq!(cm.false_positives(0), 0);
    assert_eq!(cm.false_negatives(0), 1);
    assert_eq!(cm.true_negatives(0), 2);
}

#[test]
fn test_confusion_matrix_keeps_absent_classes() {
    let cm = confusion_matrix(&[0, 0], &[0, 0], 5);
    assert_eq!(cm.n_classes(), 5);
    assert_eq!(cm.support(4), 0);
    assert_eq!(cm.predicted(4), 0);
}

#[test]
#[should_panic(expected = "same length")]
fn test_confusion_matrix_length_mismatch_panics() {
    confusion_matrix(&[0, 1], &[0], 2);
}

#[test]
#[should_panic(expected = "out of range")]
fn test_confusion_matrix_out_of_range_panics() {
    confusion_matrix(&[0, 3], &[0, 1], 2);
}

#[test]
fn test_lenient_confusion_discards_out_of_range() {
    let cm = ConfusionMatrix::from_labels_lenient(&[0, 1, 7, 1], &[0, 9, 1, 1], 2);
    assert_eq!(cm.total(), 2);
    assert_eq!(cm.trace(), 2);
}

#[test]
fn test_confusion_matrix_display() {
    let cm = confusion_matrix(&[0, 1], &[0, 1], 2);
    let shown = format!("{cm}");
    let lines: Vec<&str> = shown.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("true\\pred"));
    assert_eq!(lines[1].split_whitespace().collect::<Vec<_>>(), vec!["0", "1", "0"]);
}

#[test]
fn test_accuracy_empty_is_zero() {
    assert_eq!(accuracy(&[], &[]), 0.0);
}

#[test]
fn test_accuracy_all_wrong() {
    assert_eq!(accuracy(&[0, 1, 2], &[1, 2, 0]), 0.0);
}

#[test]
fn test_macro_f1_worked_example() {
    // Class 0: P=1 R=1; class 1: P=2/3 R=1; class 2: P=1 R=1/2
    let f1 = macro_f1(&[0, 1, 2, 2, 1], &[0, 1, 1, 2, 1], 3);
    let expected = (1.0 + 0.8 + 2.0 / 3.0) / 3.0;
    assert_abs_diff_eq!(f1, expected, epsilon = 1e-12);
}

#[test]
fn test_macro_f1_counts_absent_class_as_zero() {
    let f1 = macro_f1(&[0, 0, 1, 1], &[0, 0, 1, 1], 3);
    assert_abs_diff_eq!(f1, 2.0 / 3.0, epsilon = 1e-12);
}

#[test]
fn test_macro_f1_empty_is_zero() {
    assert_eq!(macro_f1(&[], &[], 5), 0.0);
}

#[test]
fn test_weighted_average() {
    let metrics = MultiClassMetrics::from_labels(&[0, 0, 0, 1], &[0, 0, 1, 1], 2);
    // Class 0: P=1 R=2/3 F1=0.8 (support 3); class 1: P=1/2 R=1 F1=2/3 (support 1)
    let expected = (0.8 * 3.0 + 2.0 / 3.0) / 4.0;
    assert_abs_diff_eq!(metrics.f1_avg(Average::Weighted), expected, epsilon = 1e-12);
}

#[test]
fn test_cohen_kappa_worked_example() {
    // Po = 0.8, Pe = (1*1 + 2*3 + 2*1) / 25 = 0.36
    let k = cohen_kappa(&[0, 1, 2, 2, 1], &[0, 1, 1, 2, 1], 3);
    assert_abs_diff_eq!(k, (0.8 - 0.36) / (1.0 - 0.36), epsilon = 1e-12);
}

#[test]
fn test_cohen_kappa_single_shared_class_is_zero() {
    // Pe = 1 here; the fallback avoids dividing by zero
    assert_eq!(cohen_kappa(&[2, 2, 2], &[2, 2, 2], 5), 0.0);
}

#[test]
fn test_kappa_degenerate_inputs() {
    assert_eq!(cohen_kappa(&[], &[], 5), 0.0);
    assert_eq!(quadratic_weighted_kappa(&[], &[], 5), 0.0);
    assert_eq!(cohen_kappa(&[0, 1], &[0], 5), 0.0);
    assert_eq!(quadratic_weighted_kappa(&[0, 1], &[0], 5), 0.0);
    assert_eq!(cohen_kappa(&[7, 8], &[7, 8], 5), 0.0);
    assert_eq!(quadratic_weighted_kappa(&[7, 8], &[7, 8], 5), 0.0);
}

#[test]
fn test_kappa_discards_out_of_range_pairs() {
    let clean = cohen_kappa(&[0, 1, 0, 1], &[0, 1, 1, 1], 2);
    let noisy = cohen_kappa(&[0, 1, 0, 9, 1], &[0, 1, 1, 0, 1], 2);
    assert_abs_diff_eq!(clean, noisy, epsilon = 1e-12);

    let clean = quadratic_weighted_kappa(&[0, 1, 0, 1], &[0, 1, 1, 1], 2);
    let noisy = quadratic_weighted_kappa(&[0, 1, 0, 1, 4], &[0, 1, 1, 1, 1], 2);
    assert_abs_diff_eq!(clean, noisy, epsilon = 1e-12);
}

#[test]
fn test_qwk_worked_example() {
    // Σ W·O = 0.25, Σ W·E = 6.25 / 5
    let k = quadratic_weighted_kappa(&[0, 1, 2, 2, 1], &[0, 1, 1, 2, 1], 3);
    assert_abs_diff_eq!(k, 0.8, epsilon = 1e-12);
}

#[test]
fn test_qwk_single_class_does_not_divide_by_zero() {
    let k = quadratic_weighted_kappa(&[0, 0, 0], &[0, 0, 0], 1);
    assert!(k.is_finite());
    assert_eq!(k, 0.0);
}

#[test]
fn test_qwk_penalizes_distant_errors_more() {
    let near = quadratic_weighted_kappa(&[0, 1, 2, 3, 4], &[1, 1, 2, 3, 4], 5);
    let far = quadratic_weighted_kappa(&[0, 1, 2, 3, 4], &[4, 1, 2, 3, 4], 5);
    assert!(near > far, "near={near} far={far}");
}

#[test]
fn test_run_metrics_designated_kappa() {
    let y_true = [0, 1, 2, 2, 1];
    let y_pred = [0, 1, 1, 2, 1];
    let qwk = RunMetrics::compute(&y_true, &y_pred, 3, KappaVariant::QuadraticWeighted);
    assert_abs_diff_eq!(qwk.kappa(), 0.8, epsilon = 1e-12);

    let cohen = RunMetrics::compute(&y_true, &y_pred, 3, KappaVariant::Cohen);
    assert_abs_diff_eq!(cohen.kappa(), 0.6875, epsilon = 1e-12);
    assert_eq!(cohen.quadratic_weighted_kappa, qwk.quadratic_weighted_kappa);
}

#[test]
fn test_kappa_variant_parse() {
    assert_eq!("cohen".parse::<KappaVariant>().unwrap(), KappaVariant::Cohen);
    assert_eq!("QWK".parse::<KappaVariant>().unwrap(), KappaVariant::QuadraticWeighted);
    assert_eq!(
        "quadratic-weighted".parse::<KappaVariant>().unwrap(),
        KappaVariant::QuadraticWeighted
    );
    assert!("linear".parse::<KappaVariant>().is_err());
}

#[test]
fn test_metrics_summary_mean() {
    let a = RunMetrics {
        accuracy: 0.5,
        macro_f1: 0.4,
        cohen_kappa: 0.1,
        quadratic_weighted_kappa: 0.3,
        kappa_variant: KappaVariant::QuadraticWeighted,
    };
    let b = RunMetrics { accuracy: 1.0, macro_f1: 0.8, quadratic_weighted_kappa: 0.5, ..a };
    let summary = MetricsSummary::mean(&[a, b]);
    assert_eq!(summary.runs, 2);
    assert_abs_diff_eq!(summary.accuracy, 0.75, epsilon = 1e-12);
    assert_abs_diff_eq!(summary.macro_f1, 0.6, epsilon = 1e-12);
    assert_abs_diff_eq!(summary.kappa, 0.4, epsilon = 1e-12);
    assert_eq!(MetricsSummary::mean(&[]), MetricsSummary::default());
}

#[test]
fn test_classification_report_contains_rows() {
    let report = classification_report(&[0, 1, 2, 2, 1], &[0, 1, 1, 2, 1], 3);
    assert!(report.contains("class 2"));
    assert!(report.contains("macro avg"));
    assert!(report.contains("accuracy"));
    assert!(report.contains("0.8000"));
    assert!(report.contains("qwk"));
}

fn labelled_pairs() -> impl Strategy<Value = (usize, Vec<usize>, Vec<usize>)> {
    (1usize..7).prop_flat_map(|k| {
        (0usize..60).prop_flat_map(move |n| {
            (
                Just(k),
                proptest::collection::vec(0..k, n),
                proptest::collection::vec(0..k, n),
            )
        })
    })
}

proptest! {
    #[test]
    fn prop_confusion_rows_match_true_counts((k, y_true, y_pred) in labelled_pairs()) {
        let cm = confusion_matrix(&y_true, &y_pred, k);
        prop_assert_eq!(cm.total(), y_true.len());
        for class in 0..k {
            let expected = y_true.iter().filter(|&&t| t == class).count();
            prop_assert_eq!(cm.support(class), expected);
        }
    }

    #[test]
    fn prop_accuracy_identity(y in proptest::collection::vec(0usize..5, 1..80)) {
        prop_assert_eq!(accuracy(&y, &y), 1.0);
    }

    #[test]
    fn prop_metrics_bounded((k, y_true, y_pred) in labelled_pairs()) {
        let acc = accuracy(&y_true, &y_pred);
        let f1 = macro_f1(&y_true, &y_pred, k);
        prop_assert!((0.0..=1.0).contains(&acc));
        prop_assert!((0.0..=1.0).contains(&f1));
        prop_assert!(cohen_kappa(&y_true, &y_pred, k).is_finite());
        prop_assert!(quadratic_weighted_kappa(&y_true, &y_pred, k).is_finite());
    }

    #[test]
    fn prop_perfect_agreement_kappa_is_one(
        y in proptest::collection::vec(0usize..5, 2..80)
    ) {
        let distinct = y.iter().collect::<std::collections::HashSet<_>>().len();
        prop_assume!(distinct >= 2);
        prop_assert!((cohen_kappa(&y, &y, 5) - 1.0).abs() < 1e-12);
        prop_assert!((quadratic_weighted_kappa(&y, &y, 5) - 1.0).abs() < 1e-12);
    }
}
