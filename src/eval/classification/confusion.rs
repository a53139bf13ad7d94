//! Class-by-class agreement counts

use std::fmt;

/// Square count table over `K` classes, rows by true label and columns by
/// predicted label, stored row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfusionMatrix {
    counts: Vec<usize>,
    n_classes: usize,
}

impl ConfusionMatrix {
    pub fn new(n_classes: usize) -> Self {
        Self { counts: vec![0; n_classes * n_classes], n_classes }
    }

    /// Tally `(y_true[i], y_pred[i])` pairs over `n_classes` classes.
    ///
    /// # Panics
    ///
    /// Panics if the sequences differ in length or a label is `>= n_classes`.
    pub fn from_labels(y_true: &[usize], y_pred: &[usize], n_classes: usize) -> Self {
        assert_eq!(y_true.len(), y_pred.len(), "Predictions and targets must have same length");

        let mut cm = Self::new(n_classes);
        for (&t, &p) in y_true.iter().zip(y_pred) {
            assert!(
                t < n_classes && p < n_classes,
                "Label out of range: true={t} pred={p} n_classes={n_classes}"
            );
            cm.record(t, p);
        }
        cm
    }

    /// Like [`ConfusionMatrix::from_labels`] but drops any pair with a label
    /// outside `[0, n_classes)`. Pairs past the shorter sequence are ignored.
    pub fn from_labels_lenient(y_true: &[usize], y_pred: &[usize], n_classes: usize) -> Self {
        let mut cm = Self::new(n_classes);
        y_true
            .iter()
            .zip(y_pred)
            .filter(|(&t, &p)| t < n_classes && p < n_classes)
            .for_each(|(&t, &p)| cm.record(t, p));
        cm
    }

    fn record(&mut self, true_label: usize, predicted: usize) {
        self.counts[true_label * self.n_classes + predicted] += 1;
    }

    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    /// Count of observations with true label `t` predicted as `p`
    pub fn get(&self, t: usize, p: usize) -> usize {
        self.counts[t * self.n_classes + p]
    }

    /// Counts for true label `t`, indexed by predicted label
    pub fn row(&self, t: usize) -> &[usize] {
        &self.counts[t * self.n_classes..(t + 1) * self.n_classes]
    }

    /// Copy of the table as one `Vec` per true label
    pub fn to_rows(&self) -> Vec<Vec<usize>> {
        (0..self.n_classes).map(|t| self.row(t).to_vec()).collect()
    }

    pub fn true_positives(&self, class: usize) -> usize {
        self.get(class, class)
    }

    /// Predicted as `class` with a different true label
    pub fn false_positives(&self, class: usize) -> usize {
        self.predicted(class) - self.true_positives(class)
    }

    /// True label `class` predicted as something else
    pub fn false_negatives(&self, class: usize) -> usize {
        self.support(class) - self.true_positives(class)
    }

    pub fn true_negatives(&self, class: usize) -> usize {
        self.total() + self.true_positives(class) - self.support(class) - self.predicted(class)
    }

    /// Observations whose true label is `class` (row total)
    pub fn support(&self, class: usize) -> usize {
        self.row(class).iter().sum()
    }

    /// Observations predicted as `class` (column total)
    pub fn predicted(&self, class: usize) -> usize {
        (0..self.n_classes).map(|t| self.get(t, class)).sum()
    }

    /// True-label histogram
    pub fn row_totals(&self) -> Vec<usize> {
        (0..self.n_classes).map(|c| self.support(c)).collect()
    }

    /// Predicted-label histogram
    pub fn col_totals(&self) -> Vec<usize> {
        (0..self.n_classes).map(|c| self.predicted(c)).collect()
    }

    /// Correctly classified observations
    pub fn trace(&self) -> usize {
        (0..self.n_classes).map(|c| self.get(c, c)).sum()
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// `trace / total`, or `0.0` for an empty table
    pub fn accuracy(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.trace() as f64 / total as f64,
        }
    }
}

impl fmt::Display for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>8}", "true\\pred")?;
        for p in 0..self.n_classes {
            write!(f, "{p:>7}")?;
        }
        writeln!(f)?;

        for t in 0..self.n_classes {
            write!(f, "{t:>9}")?;
            for count in self.row(t) {
                write!(f, "{count:>7}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
