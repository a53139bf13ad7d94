//! Per-study report writer

use super::error::Result;
use super::study_log::{SqliteStudyLog, StudyLog};
use super::types::{BestTrial, Direction, StudyRecord, TrialIntermediate, TrialRecord};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Contents of `study_best_params_<name>.json`
#[derive(Debug, Serialize)]
struct BestParamsDocument<'a> {
    study_id: i64,
    study_name: &'a str,
    trial_number: i64,
    direction: Direction,
    best_value: f64,
    params: BTreeMap<String, String>,
}

/// What the reporter produced for one study
#[derive(Debug, Clone, PartialEq)]
pub struct StudyOutcome {
    pub study: StudyRecord,
    pub direction: Direction,
    pub best: Option<BestTrial>,
    /// Files written for this study
    pub artifacts: Vec<PathBuf>,
    /// Failures that were logged and skipped
    pub errors: Vec<String>,
}

/// Result of a whole reporting pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportSummary {
    pub outcomes: Vec<StudyOutcome>,
}

impl ReportSummary {
    /// Whether at least one study yielded a best trial
    pub fn any_best_trial(&self) -> bool {
        self.outcomes.iter().any(|o| o.best.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Every artifact written across all studies
    pub fn artifacts(&self) -> impl Iterator<Item = &Path> {
        self.outcomes.iter().flat_map(|o| o.artifacts.iter().map(PathBuf::as_path))
    }
}

/// Writes history, best-params and curve artifacts for every study in a log
pub struct StudyReporter<L: StudyLog> {
    log: L,
    out_dir: PathBuf,
}

impl<L: StudyLog> StudyReporter<L> {
    pub fn new<P: AsRef<Path>>(log: L, out_dir: P) -> Self {
        Self { log, out_dir: out_dir.as_ref().to_path_buf() }
    }

    /// Report every study.
    ///
    /// Only failing to list the studies is fatal; anything that goes wrong
    /// for a single study or artifact is recorded in its outcome.
    pub fn run(&self) -> Result<ReportSummary> {
        fs::create_dir_all(&self.out_dir)?;
        let studies = self.log.list_studies()?;
        if studies.is_empty() {
            info!("trial log contains no studies");
        }

        let stems = file_stems(&studies);
        let outcomes = studies
            .into_iter()
            .zip(stems)
            .map(|(study, file_stem)| self.report_study(study, &file_stem))
            .collect();
        Ok(ReportSummary { outcomes })
    }

    fn report_study(&self, study: StudyRecord, file_stem: &str) -> StudyOutcome {
        let mut errors = Vec::new();
        let mut artifacts = Vec::new();

        let direction = self.log.study_direction(study.id).unwrap_or_else(|e| {
            warn!(study = %study.name, error = %e, "direction lookup failed");
            errors.push(format!("direction: {e}"));
            Direction::DEFAULT
        });

        let history_path = self.out_dir.join(format!("study_history_{file_stem}.csv"));
        let history =
            self.log.trial_history(study.id).and_then(|trials| write_history(&history_path, &trials));
        match history {
            Ok(()) => artifacts.push(history_path),
            Err(e) => {
                warn!(study = %study.name, error = %e, "history not written");
                errors.push(format!("history: {e}"));
            }
        }

        let best = match self.log.best_trial(study.id, direction) {
            Ok(best) => best,
            Err(e) => {
                warn!(study = %study.name, error = %e, "best trial lookup failed");
                errors.push(format!("best trial: {e}"));
                None
            }
        };

        if let Some(best) = best {
            let params_path = self.out_dir.join(format!("study_best_params_{file_stem}.json"));
            match self.write_best_params(&params_path, &study, direction, &best) {
                Ok(()) => artifacts.push(params_path),
                Err(e) => {
                    warn!(study = %study.name, error = %e, "best params not written");
                    errors.push(format!("best params: {e}"));
                }
            }

            let curve_path = self.out_dir.join(format!("study_curve_best_{file_stem}.csv"));
            match self.write_best_curve(&curve_path, &best) {
                Ok(true) => artifacts.push(curve_path),
                Ok(false) => {}
                Err(e) => {
                    warn!(study = %study.name, error = %e, "curve not written");
                    errors.push(format!("curve: {e}"));
                }
            }

            info!(
                study = %study.name,
                %direction,
                trial = best.number,
                value = best.value,
                "best trial"
            );
        } else {
            info!(study = %study.name, "no completed trial");
        }

        StudyOutcome { study, direction, best, artifacts, errors }
    }

    fn write_best_params(
        &self,
        path: &Path,
        study: &StudyRecord,
        direction: Direction,
        best: &BestTrial,
    ) -> Result<()> {
        let params = self
            .log
            .trial_params(best.trial_id)?
            .into_iter()
            .map(|p| (p.name, p.value))
            .collect();
        let document = BestParamsDocument {
            study_id: study.id,
            study_name: &study.name,
            trial_number: best.number,
            direction,
            best_value: best.value,
            params,
        };
        let json = serde_json::to_string_pretty(&document)?;
        fs::write(path, json + "\n")?;
        Ok(())
    }

    /// Returns `false` when the log has no intermediate values to plot
    fn write_best_curve(&self, path: &Path, best: &BestTrial) -> Result<bool> {
        if !self.log.has_intermediate_values()? {
            return Ok(false);
        }
        let points = self.log.intermediate_values(best.trial_id)?;
        write_curve(path, &points)?;
        Ok(true)
    }
}

/// Report every study in the SQLite trial log at `source_path` into `out_dir`
pub fn generate_report<P: AsRef<Path>, Q: AsRef<Path>>(
    source_path: P,
    out_dir: Q,
) -> Result<ReportSummary> {
    let log = SqliteStudyLog::open(source_path)?;
    StudyReporter::new(log, out_dir).run()
}

/// One row of `study_history_<name>.csv`
#[derive(Serialize)]
struct HistoryRow<'a> {
    trial_number: i64,
    value: Option<f64>,
    state: &'a str,
    datetime_start: Option<&'a str>,
    datetime_complete: Option<&'a str>,
}

const HISTORY_HEADER: [&str; 5] =
    ["trial_number", "value", "state", "datetime_start", "datetime_complete"];

/// CSV writer whose header is written explicitly, so empty tables keep it
fn csv_writer(path: &Path, header: &[&str]) -> Result<csv::Writer<File>> {
    let mut w = csv::WriterBuilder::new().has_headers(false).from_path(path)?;
    w.write_record(header)?;
    Ok(w)
}

fn write_history(path: &Path, trials: &[TrialRecord]) -> Result<()> {
    let mut w = csv_writer(path, &HISTORY_HEADER)?;
    for t in trials {
        w.serialize(HistoryRow {
            trial_number: t.number,
            value: t.value,
            state: t.state.label(),
            datetime_start: t.datetime_start.as_deref(),
            datetime_complete: t.datetime_complete.as_deref(),
        })?;
    }
    w.flush()?;
    Ok(())
}

fn write_curve(path: &Path, points: &[TrialIntermediate]) -> Result<()> {
    let mut w = csv_writer(path, &["step", "value"])?;
    for p in points {
        w.serialize(p)?;
    }
    w.flush()?;
    Ok(())
}

/// Output file stem for every study, in the order given.
///
/// Every study in a group whose sanitised names collide gets `_<id>`
/// appended; the returned stems are pairwise distinct.
pub(crate) fn file_stems(studies: &[StudyRecord]) -> Vec<String> {
    let base: Vec<String> = studies.iter().map(|s| sanitize_name(&s.name, s.id)).collect();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for stem in &base {
        *counts.entry(stem.as_str()).or_default() += 1;
    }

    let mut taken = HashSet::new();
    studies
        .iter()
        .zip(&base)
        .map(|(study, stem)| {
            let mut unique = stem.clone();
            if counts.get(stem.as_str()).copied().unwrap_or(0) > 1 {
                warn!(study = %study.name, stem = %stem, "file name shared with another study");
                unique = format!("{stem}_{}", study.id);
            }
            while !taken.insert(unique.clone()) {
                unique = format!("{unique}_{}", study.id);
            }
            unique
        })
        .collect()
}

/// File-name-safe form of a study name
///
/// Keeps ASCII alphanumerics, `-`, `_` and `.`; anything else becomes `_`.
/// An empty name falls back to `study_<id>`.
pub(crate) fn sanitize_name(name: &str, study_id: i64) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') { c } else { '_' })
        .collect();
    if cleaned.is_empty() || cleaned.chars().all(|c| c == '.') {
        format!("study_{study_id}")
    } else {
        cleaned
    }
}
