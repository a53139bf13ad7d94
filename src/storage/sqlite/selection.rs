//! Best-model and final-model pointer operations.

use super::backend::{parse_timestamp, ResultsStore};
use super::types::{BestPointer, FinalModelPointer, RankingMetric, RunId};
use crate::storage::{Result, StorageError};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

impl ResultsStore {
    /// Point the `metric` singleton at the best run recorded so far.
    ///
    /// The winner is the run with the highest value of the metric; ties go
    /// to the lowest (earliest) run id. When the stored pointer already names
    /// the winner and its copy is in place nothing is rewritten, so repeated
    /// calls without new runs are no-ops. Otherwise the winner's model file
    /// is copied to the metric's output location and the pointer upserted.
    ///
    /// Returns `Ok(None)` when no run has been recorded.
    pub fn select_best_by_metric(&self, metric: RankingMetric) -> Result<Option<BestPointer>> {
        let conn = self.connect()?;

        let winner: Option<(RunId, String)> = conn
            .query_row(
                &format!(
                    "SELECT id, model_path FROM runs ORDER BY {} DESC, id ASC LIMIT 1",
                    metric.column()
                ),
                [],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        let Some((run_id, model_path)) = winner else {
            info!(%metric, "no runs recorded, best model not selected");
            return Ok(None);
        };

        let output_path = self.outputs.for_metric(metric).to_path_buf();
        if let Some(current) = read_best_pointer(&conn, metric)? {
            if current.run_id == run_id && current.output_path == output_path && output_path.exists()
            {
                debug!(%metric, run_id, "best model unchanged");
                return Ok(Some(current));
            }
        }

        copy_model(Path::new(&model_path), &output_path)?;

        let pointer =
            BestPointer { metric, run_id, model_path, output_path, selected_at: Utc::now() };
        conn.execute(
            "INSERT INTO best_models (criterion, run_id, model_path, output_path, selected_at)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(criterion) DO UPDATE SET
                 run_id = excluded.run_id,
                 model_path = excluded.model_path,
                 output_path = excluded.output_path,
                 selected_at = excluded.selected_at",
            params![
                metric.as_str(),
                pointer.run_id,
                pointer.model_path,
                pointer.output_path.to_string_lossy(),
                pointer.selected_at.to_rfc3339(),
            ],
        )
        .map_err(|e| self.write_failure("Failed to update best model", e))?;

        info!(
            %metric,
            run_id,
            model = %pointer.model_path,
            output = %pointer.output_path.display(),
            "selected best model"
        );
        Ok(Some(pointer))
    }

    /// Designate `model_path` as the final, production model.
    ///
    /// Not ranked and not tied to any run: the model is copied to the final
    /// output location and the singleton pointer overwritten.
    pub fn set_final_model(&self, model_path: &str, config_path: &str) -> Result<FinalModelPointer> {
        let conn = self.connect()?;
        let output_path = self.outputs.final_model.clone();

        copy_model(Path::new(model_path), &output_path)?;

        let pointer = FinalModelPointer {
            model_path: model_path.to_string(),
            config_path: config_path.to_string(),
            output_path,
            is_final: true,
            assigned_at: Utc::now(),
        };
        conn.execute(
            "INSERT INTO final_model (id, model_path, config_path, output_path, is_final, assigned_at)
             VALUES (1, ?1, ?2, ?3, 1, ?4)
             ON CONFLICT(id) DO UPDATE SET
                 model_path = excluded.model_path,
                 config_path = excluded.config_path,
                 output_path = excluded.output_path,
                 is_final = 1,
                 assigned_at = excluded.assigned_at",
            params![
                pointer.model_path,
                pointer.config_path,
                pointer.output_path.to_string_lossy(),
                pointer.assigned_at.to_rfc3339(),
            ],
        )
        .map_err(|e| self.write_failure("Failed to set final model", e))?;

        info!(model = model_path, output = %pointer.output_path.display(), "final model set");
        Ok(pointer)
    }

    /// Current best pointer for `metric`, if one was ever selected
    pub fn best_pointer(&self, metric: RankingMetric) -> Result<Option<BestPointer>> {
        let conn = self.connect()?;
        read_best_pointer(&conn, metric)
    }

    /// Current final-model pointer, if one was ever set
    pub fn final_model(&self) -> Result<Option<FinalModelPointer>> {
        let conn = self.connect()?;
        let row: Option<(String, String, String, bool, String)> = conn
            .query_row(
                "SELECT model_path, config_path, output_path, is_final, assigned_at
                 FROM final_model WHERE id = 1",
                [],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?)),
            )
            .optional()?;

        row.map(|(model_path, config_path, output_path, is_final, assigned_at)| {
            Ok(FinalModelPointer {
                model_path,
                config_path,
                output_path: PathBuf::from(output_path),
                is_final,
                assigned_at: parse_timestamp(&assigned_at)?,
            })
        })
        .transpose()
    }
}

fn read_best_pointer(conn: &Connection, metric: RankingMetric) -> Result<Option<BestPointer>> {
    let row: Option<(RunId, String, String, String)> = conn
        .query_row(
            "SELECT run_id, model_path, output_path, selected_at FROM best_models
             WHERE criterion = ?1",
            [metric.as_str()],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
        )
        .optional()?;

    row.map(|(run_id, model_path, output_path, selected_at)| {
        Ok(BestPointer {
            metric,
            run_id,
            model_path,
            output_path: PathBuf::from(output_path),
            selected_at: parse_timestamp(&selected_at)?,
        })
    })
    .transpose()
}

fn copy_model(from: &Path, to: &Path) -> Result<()> {
    if from == to {
        return Ok(());
    }
    fs::copy(from, to).map(|_| ()).map_err(|source| StorageError::ArtifactCopy {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    })
}
