//! Per-class precision, recall and F1

use super::confusion::ConfusionMatrix;
use serde::Serialize;

/// How per-class scores are folded into one number
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Average {
    /// Plain mean over all classes; a class absent from both sequences counts as 0
    Macro,
    /// Mean weighted by each class's true-label count
    Weighted,
}

/// Scores of a single class
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct ClassScore {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    /// True instances of the class
    pub support: usize,
}

impl ClassScore {
    fn from_counts(tp: usize, fp: usize, fn_: usize) -> Self {
        let ratio = |num: usize, den: usize| if den == 0 { 0.0 } else { num as f64 / den as f64 };
        let precision = ratio(tp, tp + fp);
        let recall = ratio(tp, tp + fn_);
        let f1 = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };
        Self { precision, recall, f1, support: tp + fn_ }
    }
}

/// Per-class scores of one (truth, prediction) pair
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MultiClassMetrics {
    /// Indexed by class label
    pub classes: Vec<ClassScore>,
}

impl MultiClassMetrics {
    pub fn from_confusion_matrix(cm: &ConfusionMatrix) -> Self {
        let classes = (0..cm.n_classes())
            .map(|c| {
                ClassScore::from_counts(
                    cm.true_positives(c),
                    cm.false_positives(c),
                    cm.false_negatives(c),
                )
            })
            .collect();
        Self { classes }
    }

    /// # Panics
    ///
    /// Panics on length mismatch or labels `>= n_classes`.
    pub fn from_labels(y_true: &[usize], y_pred: &[usize], n_classes: usize) -> Self {
        Self::from_confusion_matrix(&ConfusionMatrix::from_labels(y_true, y_pred, n_classes))
    }

    pub fn n_classes(&self) -> usize {
        self.classes.len()
    }

    pub fn total_support(&self) -> usize {
        self.classes.iter().map(|c| c.support).sum()
    }

    /// Precision, recall and F1 averaged per `average`; `support` is the total
    pub fn average(&self, average: Average) -> ClassScore {
        ClassScore {
            precision: self.fold(average, |c| c.precision),
            recall: self.fold(average, |c| c.recall),
            f1: self.fold(average, |c| c.f1),
            support: self.total_support(),
        }
    }

    pub fn f1_avg(&self, average: Average) -> f64 {
        self.fold(average, |c| c.f1)
    }

    fn fold(&self, average: Average, score: impl Fn(&ClassScore) -> f64) -> f64 {
        match average {
            Average::Macro if self.classes.is_empty() => 0.0,
            Average::Macro => {
                self.classes.iter().map(&score).sum::<f64>() / self.classes.len() as f64
            }
            Average::Weighted => {
                let total = self.total_support();
                if total == 0 {
                    return 0.0;
                }
                self.classes.iter().map(|c| score(c) * c.support as f64).sum::<f64>()
                    / total as f64
            }
        }
    }
}
