//! Read-only view of an external study/trial log

use rusqlite::types::Value;
use serde::Serialize;

/// Optimization direction of a study
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Maximize,
    Minimize,
}

impl Direction {
    /// Direction assumed when the log does not record one
    pub const DEFAULT: Direction = Direction::Maximize;

    pub fn label(&self) -> &'static str {
        match self {
            Direction::Maximize => "maximize",
            Direction::Minimize => "minimize",
        }
    }

    /// Whether `candidate` strictly beats `current`
    pub fn improves(&self, candidate: f64, current: f64) -> bool {
        match self {
            Direction::Maximize => candidate > current,
            Direction::Minimize => candidate < current,
        }
    }

    /// Decode a stored direction: enum names (`MAXIMIZE`/`MINIMIZE`) or a
    /// numeric code where `1` is maximize and every other integer minimize.
    pub(crate) fn from_sql(value: &Value) -> Option<Self> {
        match value {
            Value::Text(s) => match s.trim().parse::<i64>() {
                Ok(code) => Self::from_sql(&Value::Integer(code)),
                Err(_) => match s.trim().to_ascii_uppercase().as_str() {
                    "MAXIMIZE" => Some(Direction::Maximize),
                    "MINIMIZE" => Some(Direction::Minimize),
                    _ => None,
                },
            },
            Value::Integer(1) => Some(Direction::Maximize),
            Value::Integer(_) => Some(Direction::Minimize),
            _ => None,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Lifecycle state of a trial
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TrialState {
    Running,
    Complete,
    Pruned,
    Fail,
    Waiting,
    /// Anything the log stores that is not one of the known states
    Other(String),
}

impl TrialState {
    /// Decode a stored state: enum names or numeric codes 0..=4
    pub(crate) fn from_sql(value: &Value) -> Self {
        match value {
            Value::Text(s) => match s.trim().parse::<i64>() {
                Ok(code) => Self::from_sql(&Value::Integer(code)),
                Err(_) => Self::from_name(s),
            },
            Value::Integer(0) => TrialState::Running,
            Value::Integer(1) => TrialState::Complete,
            Value::Integer(2) => TrialState::Pruned,
            Value::Integer(3) => TrialState::Fail,
            Value::Integer(4) => TrialState::Waiting,
            other => TrialState::Other(sql_text(other)),
        }
    }

    fn from_name(s: &str) -> Self {
        match s.trim().to_ascii_uppercase().as_str() {
            "RUNNING" => TrialState::Running,
            "COMPLETE" => TrialState::Complete,
            "PRUNED" => TrialState::Pruned,
            "FAIL" => TrialState::Fail,
            "WAITING" => TrialState::Waiting,
            _ => TrialState::Other(s.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            TrialState::Running => "RUNNING",
            TrialState::Complete => "COMPLETE",
            TrialState::Pruned => "PRUNED",
            TrialState::Fail => "FAIL",
            TrialState::Waiting => "WAITING",
            TrialState::Other(s) => s,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, TrialState::Complete)
    }
}

/// A study in the log
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudyRecord {
    pub id: i64,
    pub name: String,
}

/// One row of a study's trial history
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrialRecord {
    pub trial_id: i64,
    pub number: i64,
    pub state: TrialState,
    pub value: Option<f64>,
    pub datetime_start: Option<String>,
    pub datetime_complete: Option<String>,
}

/// A named parameter of a trial, value kept as opaque text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrialParam {
    pub name: String,
    pub value: String,
}

/// One point of a trial's convergence curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrialIntermediate {
    pub step: i64,
    pub value: Option<f64>,
}

/// Best completed trial of a study
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BestTrial {
    pub trial_id: i64,
    pub number: i64,
    pub value: f64,
}

/// Render any SQLite value as text; NULL becomes the empty string
pub(crate) fn sql_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Integer(i) => i.to_string(),
        Value::Real(f) => f.to_string(),
        Value::Text(s) => s.clone(),
        Value::Blob(b) => String::from_utf8_lossy(b).into_owned(),
    }
}

/// Optional text column that may be stored with any affinity
pub(crate) fn sql_opt_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        other => Some(sql_text(other)),
    }
}
