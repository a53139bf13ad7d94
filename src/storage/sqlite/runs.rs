//! Run and prediction operations for the results store.

use super::backend::{parse_timestamp, ResultsStore};
use super::types::{PredictionBatch, PredictionRecord, Run, RunId};
use crate::eval::{KappaVariant, RunMetrics};
use crate::storage::{Result, StorageError};
use chrono::Utc;
use rusqlite::{params, OptionalExtension, Row};
use tracing::{debug, info, warn};

const RUN_COLUMNS: &str = "id, created_at, accuracy, macro_f1, kappa_variant, cohen_kappa, \
                           quadratic_weighted_kappa, model_path, config_path, config_text";

/// Raw row before timestamp and variant parsing
struct RunRow {
    id: RunId,
    created_at: String,
    accuracy: f64,
    macro_f1: f64,
    kappa_variant: String,
    cohen_kappa: f64,
    quadratic_weighted_kappa: f64,
    model_path: String,
    config_path: String,
    config_text: String,
}

impl RunRow {
    fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            created_at: row.get(1)?,
            accuracy: row.get(2)?,
            macro_f1: row.get(3)?,
            kappa_variant: row.get(4)?,
            cohen_kappa: row.get(5)?,
            quadratic_weighted_kappa: row.get(6)?,
            model_path: row.get(7)?,
            config_path: row.get(8)?,
            config_text: row.get(9)?,
        })
    }

    fn into_run(self) -> Result<Run> {
        let kappa_variant: KappaVariant =
            self.kappa_variant.parse().map_err(StorageError::Query)?;
        Ok(Run {
            id: self.id,
            created_at: parse_timestamp(&self.created_at)?,
            metrics: RunMetrics {
                accuracy: self.accuracy,
                macro_f1: self.macro_f1,
                cohen_kappa: self.cohen_kappa,
                quadratic_weighted_kappa: self.quadratic_weighted_kappa,
                kappa_variant,
            },
            model_path: self.model_path,
            config_path: self.config_path,
            config_text: self.config_text,
        })
    }
}

impl ResultsStore {
    /// Record one evaluated run and return its freshly assigned id.
    ///
    /// `config_text` is stored verbatim so later edits to the file at
    /// `config_path` do not change the historical record.
    pub fn record_run(
        &self,
        metrics: &RunMetrics,
        model_path: &str,
        config_path: &str,
        config_text: &str,
    ) -> Result<RunId> {
        let conn = self.connect()?;
        let created_at = Utc::now().to_rfc3339();

        conn.execute(
            "INSERT INTO runs (created_at, accuracy, macro_f1, kappa, kappa_variant, cohen_kappa,
                               quadratic_weighted_kappa, model_path, config_path, config_text)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                created_at,
                metrics.accuracy,
                metrics.macro_f1,
                metrics.kappa(),
                metrics.kappa_variant.as_str(),
                metrics.cohen_kappa,
                metrics.quadratic_weighted_kappa,
                model_path,
                config_path,
                config_text,
            ],
        )
        .map_err(|e| self.write_failure("Failed to insert run", e))?;

        let run_id = conn.last_insert_rowid();
        info!(
            run_id,
            accuracy = metrics.accuracy,
            macro_f1 = metrics.macro_f1,
            kappa = metrics.kappa(),
            model = model_path,
            "recorded run"
        );
        Ok(run_id)
    }

    /// Insert one prediction row per observation of `run_id`.
    ///
    /// Rows are written in a single transaction. A row that fails is logged
    /// and counted in the returned batch without aborting the rest, so a
    /// partially inserted prediction set is possible; compare
    /// [`ResultsStore::prediction_count`] with the expected length to detect
    /// it. The run id is not checked for existence.
    pub fn record_predictions(
        &self,
        run_id: RunId,
        y_true: &[usize],
        y_pred: &[usize],
    ) -> Result<PredictionBatch> {
        if y_true.len() != y_pred.len() {
            return Err(StorageError::LengthMismatch { y_true: y_true.len(), y_pred: y_pred.len() });
        }

        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        let mut batch = PredictionBatch::default();
        {
            let mut stmt = tx.prepare(
                "INSERT INTO predictions (run_id, idx, y_true, y_pred) VALUES (?1, ?2, ?3, ?4)",
            )?;
            for (index, (&t, &p)) in y_true.iter().zip(y_pred.iter()).enumerate() {
                match stmt.execute(params![run_id, index as i64, t as i64, p as i64]) {
                    Ok(_) => batch.inserted += 1,
                    Err(e) => {
                        warn!(run_id, index, error = %e, "failed to insert prediction");
                        batch.failed += 1;
                    }
                }
            }
        }
        tx.commit()?;

        debug!(run_id, inserted = batch.inserted, failed = batch.failed, "recorded predictions");
        Ok(batch)
    }

    /// Fetch a run by id
    pub fn get_run(&self, run_id: RunId) -> Result<Run> {
        let conn = self.connect()?;
        let row = conn
            .query_row(
                &format!("SELECT {RUN_COLUMNS} FROM runs WHERE id = ?1"),
                [run_id],
                RunRow::read,
            )
            .optional()?
            .ok_or(StorageError::RunNotFound(run_id))?;
        row.into_run()
    }

    /// All runs in recording order
    pub fn list_runs(&self) -> Result<Vec<Run>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(&format!("SELECT {RUN_COLUMNS} FROM runs ORDER BY id"))?;
        let rows = stmt.query_map([], RunRow::read)?;

        let mut runs = Vec::new();
        for row in rows {
            runs.push(row?.into_run()?);
        }
        Ok(runs)
    }

    /// Predictions of a run ordered by observation index
    pub fn predictions(&self, run_id: RunId) -> Result<Vec<PredictionRecord>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT idx, y_true, y_pred FROM predictions WHERE run_id = ?1 ORDER BY idx",
        )?;
        let rows = stmt.query_map([run_id], |row| {
            let index: i64 = row.get(0)?;
            let y_true: i64 = row.get(1)?;
            let y_pred: i64 = row.get(2)?;
            Ok(PredictionRecord {
                run_id,
                index: index as usize,
                y_true: y_true as usize,
                y_pred: y_pred as usize,
            })
        })?;

        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(StorageError::from)
    }

    /// Number of stored predictions for a run
    ///
    /// Zero for a run whose prediction batch never made it to disk.
    pub fn prediction_count(&self, run_id: RunId) -> Result<usize> {
        let conn = self.connect()?;
        let count: i64 =
            conn.query_row("SELECT COUNT(*) FROM predictions WHERE run_id = ?1", [run_id], |row| {
                row.get(0)
            })?;
        Ok(count as usize)
    }
}
