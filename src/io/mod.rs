//! File adapters for label, prediction and configuration files
//!
//! The external trainer writes plain text: true labels as whitespace
//! separated integers and predictions as one row per observation, either a
//! class index or a row of class probabilities.

mod labels;

pub use labels::{
    read_config_text, read_labels, read_predicted_classes, write_predictions_csv, LabelReadError,
    Result,
};
