//! Read adapter over the external trial log
//!
//! Fixed contract: `studies`, `trials`, `trial_values`, `trial_params`;
//! `trial_intermediate_values` and `study_directions` are optional and probed
//! before use.

use super::error::{ReportError, Result};
use super::types::{
    sql_opt_text, sql_text, BestTrial, Direction, StudyRecord, TrialIntermediate, TrialParam,
    TrialRecord, TrialState,
};
use crate::storage::sqlite::table_exists_in;
use rusqlite::types::Value;
use rusqlite::{Connection, OpenFlags, OptionalExtension};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Read-only access to a study/trial log
pub trait StudyLog {
    /// All studies ordered by id
    fn list_studies(&self) -> Result<Vec<StudyRecord>>;

    /// Recorded direction, or [`Direction::DEFAULT`] when none is stored
    fn study_direction(&self, study_id: i64) -> Result<Direction>;

    /// Extremal completed trial per `direction`, ties to the lowest trial id.
    ///
    /// `None` when the study has no completed trial with a value.
    fn best_trial(&self, study_id: i64, direction: Direction) -> Result<Option<BestTrial>>;

    /// Parameters of a trial ordered by name
    fn trial_params(&self, trial_id: i64) -> Result<Vec<TrialParam>>;

    /// Every trial of a study regardless of state, ordered by trial number
    fn trial_history(&self, study_id: i64) -> Result<Vec<TrialRecord>>;

    /// Whether the log carries per-step intermediate values at all
    fn has_intermediate_values(&self) -> Result<bool>;

    /// Intermediate values of a trial ordered by step
    fn intermediate_values(&self, trial_id: i64) -> Result<Vec<TrialIntermediate>>;
}

/// [`StudyLog`] over an SQLite file, opened read-only once per call
#[derive(Debug, Clone)]
pub struct SqliteStudyLog {
    path: PathBuf,
}

impl SqliteStudyLog {
    /// Bind to the log at `path`, which must already exist
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.is_file() {
            return Err(ReportError::SourceMissing(path));
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connect(&self) -> Result<Connection> {
        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        Connection::open_with_flags(&self.path, flags).map_err(|e| ReportError::Unavailable {
            path: self.path.clone(),
            reason: e.to_string(),
        })
    }
}

impl StudyLog for SqliteStudyLog {
    fn list_studies(&self) -> Result<Vec<StudyRecord>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare("SELECT study_id, study_name FROM studies ORDER BY study_id")?;
        let rows = stmt.query_map([], |row| {
            let name: Option<String> = row.get(1)?;
            Ok(StudyRecord { id: row.get(0)?, name: name.unwrap_or_default() })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    fn study_direction(&self, study_id: i64) -> Result<Direction> {
        let conn = self.connect()?;
        if !table_exists_in(&conn, "study_directions")? {
            debug!(study_id, "no study_directions table, assuming {}", Direction::DEFAULT);
            return Ok(Direction::DEFAULT);
        }

        let stored: Option<Value> = conn
            .query_row(
                "SELECT direction FROM study_directions WHERE study_id = ?1 LIMIT 1",
                [study_id],
                |row| row.get(0),
            )
            .optional()?;

        match stored.as_ref().and_then(Direction::from_sql) {
            Some(direction) => Ok(direction),
            None => {
                debug!(study_id, ?stored, "direction not recorded, assuming {}", Direction::DEFAULT);
                Ok(Direction::DEFAULT)
            }
        }
    }

    fn best_trial(&self, study_id: i64, direction: Direction) -> Result<Option<BestTrial>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT t.trial_id, t.number, t.state, v.value
             FROM trials t
             JOIN trial_values v ON v.trial_id = t.trial_id
             WHERE t.study_id = ?1
             ORDER BY t.trial_id",
        )?;
        let rows = stmt.query_map([study_id], |row| {
            let trial_id: i64 = row.get(0)?;
            let number: i64 = row.get(1)?;
            let state: Value = row.get(2)?;
            let value: Option<f64> = row.get(3)?;
            Ok((trial_id, number, state, value))
        })?;

        let mut best: Option<BestTrial> = None;
        for row in rows {
            let (trial_id, number, state, value) = row?;
            let Some(value) = value.filter(|v| !v.is_nan()) else {
                continue;
            };
            if !TrialState::from_sql(&state).is_complete() {
                continue;
            }
            let better = match &best {
                None => true,
                Some(current) => direction.improves(value, current.value),
            };
            if better {
                best = Some(BestTrial { trial_id, number, value });
            }
        }
        Ok(best)
    }

    fn trial_params(&self, trial_id: i64) -> Result<Vec<TrialParam>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT param_name, param_value FROM trial_params
             WHERE trial_id = ?1 ORDER BY param_name",
        )?;
        let rows = stmt.query_map([trial_id], |row| {
            let name: Value = row.get(0)?;
            let value: Value = row.get(1)?;
            Ok(TrialParam { name: sql_text(&name), value: sql_text(&value) })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    fn trial_history(&self, study_id: i64) -> Result<Vec<TrialRecord>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT t.trial_id, t.number, t.state, v.value, t.datetime_start, t.datetime_complete
             FROM trials t
             LEFT JOIN trial_values v ON v.trial_id = t.trial_id
             WHERE t.study_id = ?1
             ORDER BY t.number",
        )?;
        let rows = stmt.query_map([study_id], |row| {
            let state: Value = row.get(2)?;
            let start: Value = row.get(4)?;
            let complete: Value = row.get(5)?;
            Ok(TrialRecord {
                trial_id: row.get(0)?,
                number: row.get(1)?,
                state: TrialState::from_sql(&state),
                value: row.get(3)?,
                datetime_start: sql_opt_text(&start),
                datetime_complete: sql_opt_text(&complete),
            })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    fn has_intermediate_values(&self) -> Result<bool> {
        let conn = self.connect()?;
        Ok(table_exists_in(&conn, "trial_intermediate_values")?)
    }

    fn intermediate_values(&self, trial_id: i64) -> Result<Vec<TrialIntermediate>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT step, intermediate_value FROM trial_intermediate_values
             WHERE trial_id = ?1 ORDER BY step",
        )?;
        let rows = stmt.query_map([trial_id], |row| {
            Ok(TrialIntermediate { step: row.get(0)?, value: row.get(1)? })
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }
}
