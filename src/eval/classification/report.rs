//! Scoring entry points and the text classification report

use super::confusion::ConfusionMatrix;
use super::kappa::{cohen_kappa, quadratic_weighted_kappa};
use super::metrics::{Average, ClassScore, MultiClassMetrics};
use std::fmt::Write;

/// Fraction of positions where `y_pred` matches `y_true`.
///
/// Empty input scores `0.0`.
///
/// # Panics
///
/// Panics if the sequences differ in length.
pub fn accuracy(y_true: &[usize], y_pred: &[usize]) -> f64 {
    assert_eq!(y_true.len(), y_pred.len(), "Predictions and targets must have same length");
    if y_true.is_empty() {
        return 0.0;
    }
    let correct = y_true.iter().zip(y_pred.iter()).filter(|(t, p)| t == p).count();
    correct as f64 / y_true.len() as f64
}

/// Unweighted mean of per-class F1 over all `n_classes` classes.
///
/// Classes that never occur in either sequence contribute an F1 of 0 rather
/// than being skipped, so `macro_f1(&[0, 1], &[0, 1], 3)` is `2/3`.
///
/// # Panics
///
/// Panics on length mismatch or labels `>= n_classes`.
pub fn macro_f1(y_true: &[usize], y_pred: &[usize], n_classes: usize) -> f64 {
    MultiClassMetrics::from_labels(y_true, y_pred, n_classes).f1_avg(Average::Macro)
}

/// Compute confusion matrix from ground truth and predictions
///
/// # Arguments
/// * `y_true` - Ground truth class labels
/// * `y_pred` - Predicted class labels
/// * `n_classes` - Number of classes K; labels must lie in `[0, K)`
///
/// # Returns
/// A ConfusionMatrix where element [i][j] is count of true label i predicted as j
///
/// # Example
/// ```
/// use foldscore::eval::confusion_matrix;
///
/// let y_true = vec![0, 1, 2, 2, 1];
/// let y_pred = vec![0, 1, 1, 2, 1];
/// let cm = confusion_matrix(&y_true, &y_pred, 3);
///
/// assert_eq!(cm.get(2, 1), 1);  // True 2, predicted 1
/// assert_eq!(cm.total(), 5);
/// ```
pub fn confusion_matrix(y_true: &[usize], y_pred: &[usize], n_classes: usize) -> ConfusionMatrix {
    ConfusionMatrix::from_labels(y_true, y_pred, n_classes)
}

/// Per-class table followed by macro and weighted averages, accuracy and
/// both kappas, in the layout of scikit-learn's `classification_report`.
///
/// # Panics
///
/// Panics on length mismatch or labels `>= n_classes`.
pub fn classification_report(y_true: &[usize], y_pred: &[usize], n_classes: usize) -> String {
    let cm = ConfusionMatrix::from_labels(y_true, y_pred, n_classes);
    let metrics = MultiClassMetrics::from_confusion_matrix(&cm);
    let rule = "-".repeat(56);

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>14} {:>10} {:>10} {:>10} {:>9}",
        "", "precision", "recall", "f1", "support"
    );
    let _ = writeln!(out, "{rule}");
    for (class, score) in metrics.classes.iter().enumerate() {
        push_row(&mut out, &format!("class {class}"), score);
    }
    let _ = writeln!(out, "{rule}");
    push_row(&mut out, "macro avg", &metrics.average(Average::Macro));
    push_row(&mut out, "weighted avg", &metrics.average(Average::Weighted));
    let _ = writeln!(out);
    let _ = writeln!(out, "{:>14} {:>10.4}", "accuracy", cm.accuracy());
    let _ = writeln!(
        out,
        "{:>14} {:>10.4}",
        "cohen kappa",
        cohen_kappa(y_true, y_pred, n_classes)
    );
    let _ = writeln!(
        out,
        "{:>14} {:>10.4}",
        "qwk",
        quadratic_weighted_kappa(y_true, y_pred, n_classes)
    );
    out
}

fn push_row(out: &mut String, label: &str, score: &ClassScore) {
    let _ = writeln!(
        out,
        "{label:>14} {:>10.4} {:>10.4} {:>10.4} {:>9}",
        score.precision, score.recall, score.f1, score.support
    );
}
