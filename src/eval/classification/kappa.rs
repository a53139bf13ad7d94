//! Chance-corrected agreement statistics
//!
//! Both variants re-validate their input instead of trusting the caller:
//! mismatched lengths or empty sequences score `0.0`, and observations whose
//! true or predicted label falls outside `[0, n_classes)` are discarded
//! before any count is taken.

use super::confusion::ConfusionMatrix;

/// Cohen's kappa over `n_classes` classes.
///
/// `Po = trace / total`, `Pe = Σ row_i · col_i / total²`, result
/// `(Po - Pe) / (1 - Pe)`. Returns `0.0` when no observation survives the
/// range filter or when `Pe >= 1` (every observation in one shared class).
pub fn cohen_kappa(y_true: &[usize], y_pred: &[usize], n_classes: usize) -> f64 {
    if y_true.len() != y_pred.len() || y_true.is_empty() {
        return 0.0;
    }

    let cm = ConfusionMatrix::from_labels_lenient(y_true, y_pred, n_classes);
    let total = cm.total();
    if total == 0 {
        return 0.0;
    }
    let total = total as f64;

    let po = cm.trace() as f64 / total;
    let pe = cm
        .row_totals()
        .iter()
        .zip(cm.col_totals().iter())
        .map(|(&r, &c)| r as f64 * c as f64)
        .sum::<f64>()
        / (total * total);

    if pe < 1.0 {
        (po - pe) / (1.0 - pe)
    } else {
        0.0
    }
}

/// Quadratic-weighted kappa over `n_classes` ordinal classes.
///
/// Weights are `(i - j)² / (n_classes - 1)²`, with the denominator taken as 1
/// when there is a single class. Observed and expected matrices are kept in
/// raw counts (`E[i][j] = hist_true[i] · hist_pred[j] / N`). Returns `0.0`
/// when the weighted expected sum is zero.
pub fn quadratic_weighted_kappa(y_true: &[usize], y_pred: &[usize], n_classes: usize) -> f64 {
    if y_true.len() != y_pred.len() || y_true.is_empty() {
        return 0.0;
    }

    let cm = ConfusionMatrix::from_labels_lenient(y_true, y_pred, n_classes);
    let n = cm.total();
    if n == 0 {
        return 0.0;
    }
    let n = n as f64;

    let hist_true = cm.row_totals();
    let hist_pred = cm.col_totals();
    let denom = if n_classes > 1 { ((n_classes - 1) * (n_classes - 1)) as f64 } else { 1.0 };

    let mut observed = 0.0;
    let mut expected = 0.0;
    for i in 0..n_classes {
        for j in 0..n_classes {
            let diff = i.abs_diff(j) as f64;
            let w = diff * diff / denom;
            observed += w * cm.get(i, j) as f64;
            expected += w * hist_true[i] as f64 * hist_pred[j] as f64 / n;
        }
    }

    if expected == 0.0 {
        return 0.0;
    }
    1.0 - observed / expected
}
