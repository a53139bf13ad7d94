//! Label and prediction file readers

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors while reading label or prediction files, or exporting predictions
#[derive(Debug, Error)]
pub enum LabelReadError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{path}:{line}: invalid value {token:?}")]
    Parse { path: PathBuf, line: usize, token: String },
}

/// Result type for label file operations
pub type Result<T> = std::result::Result<T, LabelReadError>;

fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|source| LabelReadError::Io { path: path.to_path_buf(), source })
}

fn tokens(line: &str) -> impl Iterator<Item = &str> {
    line.split(|c: char| c.is_whitespace() || c == ',').filter(|t| !t.is_empty())
}

/// Read true class labels: non-negative integers separated by whitespace
/// or commas, in any line layout.
pub fn read_labels<P: AsRef<Path>>(path: P) -> Result<Vec<usize>> {
    let path = path.as_ref();
    let text = read_text(path)?;

    let mut labels = Vec::new();
    for (line_no, line) in text.lines().enumerate() {
        for token in tokens(line) {
            let label = token.parse::<usize>().map_err(|_| LabelReadError::Parse {
                path: path.to_path_buf(),
                line: line_no + 1,
                token: token.to_string(),
            })?;
            labels.push(label);
        }
    }
    Ok(labels)
}

/// Read predicted classes, one observation per non-blank line.
///
/// A line holding a single integer is the class itself. A line holding
/// several numbers is a probability row and yields the index of its
/// largest entry; the first maximum wins.
pub fn read_predicted_classes<P: AsRef<Path>>(path: P) -> Result<Vec<usize>> {
    let path = path.as_ref();
    let text = read_text(path)?;

    let mut classes = Vec::new();
    for (line_no, line) in text.lines().enumerate() {
        let parse_err = |token: &str| LabelReadError::Parse {
            path: path.to_path_buf(),
            line: line_no + 1,
            token: token.to_string(),
        };

        let row: Vec<&str> = tokens(line).collect();
        match row.as_slice() {
            [] => continue,
            [single] => classes.push(single.parse::<usize>().map_err(|_| parse_err(*single))?),
            _ => {
                let mut best = 0;
                let mut best_prob = f64::NEG_INFINITY;
                for (class, token) in row.iter().enumerate() {
                    let prob = token
                        .parse::<f64>()
                        .ok()
                        .filter(|p| !p.is_nan())
                        .ok_or_else(|| parse_err(*token))?;
                    if prob > best_prob {
                        best = class;
                        best_prob = prob;
                    }
                }
                classes.push(best);
            }
        }
    }
    Ok(classes)
}

/// Read a configuration file verbatim, for snapshotting alongside a run
pub fn read_config_text<P: AsRef<Path>>(path: P) -> Result<String> {
    read_text(path.as_ref())
}

#[derive(Serialize)]
struct PredictionRow {
    index: usize,
    y_true: usize,
    y_pred: usize,
}

/// Write `index,y_true,y_pred` rows for one run's predictions
pub fn write_predictions_csv<P: AsRef<Path>>(
    path: P,
    y_true: &[usize],
    y_pred: &[usize],
) -> Result<()> {
    let path = path.as_ref();
    let csv_err = |source| LabelReadError::Csv { path: path.to_path_buf(), source };

    let mut w = csv::WriterBuilder::new().has_headers(false).from_path(path).map_err(csv_err)?;
    w.write_record(["index", "y_true", "y_pred"]).map_err(csv_err)?;
    for (index, (&y_true, &y_pred)) in y_true.iter().zip(y_pred).enumerate() {
        w.serialize(PredictionRow { index, y_true, y_pred }).map_err(csv_err)?;
    }
    w.flush().map_err(|source| LabelReadError::Io { path: path.to_path_buf(), source })
}
