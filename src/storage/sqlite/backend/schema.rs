//! SQLite schema definition and migration.
//!
//! Defines all tables for the results store and handles schema initialization.

use rusqlite::Connection;
use std::time::Duration;

/// Current schema version
pub const CURRENT_VERSION: &str = "1.0.0";

/// How long a connection waits on another process's write lock
pub const BUSY_TIMEOUT: Duration = Duration::from_millis(5000);

/// Initialize the database schema, creating tables if they don't exist.
pub fn init_schema(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.busy_timeout(BUSY_TIMEOUT)?;
    conn.execute_batch(
        "PRAGMA foreign_keys = ON;
         PRAGMA synchronous = NORMAL;
         PRAGMA temp_store = MEMORY;",
    )?;

    conn.execute_batch(SCHEMA_SQL)?;

    // Insert schema version if not present
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM schema_version", [], |row| row.get(0))?;
    if count == 0 {
        conn.execute("INSERT INTO schema_version (version) VALUES (?1)", [CURRENT_VERSION])?;
    }

    Ok(())
}

const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS schema_version (
    version TEXT NOT NULL,
    applied_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS runs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    created_at TEXT NOT NULL,
    accuracy REAL NOT NULL,
    macro_f1 REAL NOT NULL,
    kappa REAL NOT NULL,
    kappa_variant TEXT NOT NULL,
    cohen_kappa REAL NOT NULL,
    quadratic_weighted_kappa REAL NOT NULL,
    model_path TEXT NOT NULL,
    config_path TEXT NOT NULL,
    config_text TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_runs_macro_f1 ON runs(macro_f1);
CREATE INDEX IF NOT EXISTS idx_runs_kappa ON runs(kappa);

CREATE TABLE IF NOT EXISTS predictions (
    run_id INTEGER NOT NULL,
    idx INTEGER NOT NULL,
    y_true INTEGER NOT NULL,
    y_pred INTEGER NOT NULL,
    PRIMARY KEY (run_id, idx),
    FOREIGN KEY (run_id) REFERENCES runs(id) ON DELETE CASCADE
);

CREATE TABLE IF NOT EXISTS best_models (
    criterion TEXT PRIMARY KEY,
    run_id INTEGER NOT NULL,
    model_path TEXT NOT NULL,
    output_path TEXT NOT NULL,
    selected_at TEXT NOT NULL,
    FOREIGN KEY (run_id) REFERENCES runs(id)
);

CREATE TABLE IF NOT EXISTS final_model (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    model_path TEXT NOT NULL,
    config_path TEXT NOT NULL,
    output_path TEXT NOT NULL,
    is_final INTEGER NOT NULL DEFAULT 1,
    assigned_at TEXT NOT NULL
);
";
