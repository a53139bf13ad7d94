//! Run recording and read-back tests.

use super::{metrics, store_in};
use crate::eval::{KappaVariant, RunMetrics};
use crate::storage::{table_exists, ModelOutputs, ResultsStore, StorageError};

#[test]
fn test_record_run_assigns_increasing_ids() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(dir.path());

    let first = store.record_run(&metrics(0.4, 0.3), "m0.txt", "c0.txt", "a=1").unwrap();
    let second = store.record_run(&metrics(0.5, 0.2), "m1.txt", "c1.txt", "a=2").unwrap();

    assert!(second > first);
    assert_eq!(store.list_runs().unwrap().len(), 2);
}

#[test]
fn test_record_run_round_trips_metrics() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(dir.path());
    let y_true = [0, 1, 2, 2, 1];
    let y_pred = [0, 1, 1, 2, 1];
    let m = RunMetrics::compute(&y_true, &y_pred, 3, KappaVariant::Cohen);

    let id = store.record_run(&m, "model.txt", "config.txt", "num_leaves=31").unwrap();
    let run = store.get_run(id).unwrap();

    assert_eq!(run.id, id);
    assert_eq!(run.metrics, m);
    assert_eq!(run.model_path, "model.txt");
    assert_eq!(run.config_path, "config.txt");
}

#[test]
fn test_config_text_is_a_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(dir.path());
    let config_path = dir.path().join("config_train_fold_0.txt");
    std::fs::write(&config_path, "learning_rate=0.05\n").unwrap();
    let text = std::fs::read_to_string(&config_path).unwrap();

    let id = store
        .record_run(&metrics(0.4, 0.3), "m.txt", &config_path.to_string_lossy(), &text)
        .unwrap();
    std::fs::write(&config_path, "learning_rate=0.5\n").unwrap();

    assert_eq!(store.get_run(id).unwrap().config_text, "learning_rate=0.05\n");
}

#[test]
fn test_get_run_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(dir.path());
    store.record_run(&metrics(0.4, 0.3), "m.txt", "c.txt", "").unwrap();

    let result = store.get_run(999);
    assert!(matches!(result, Err(StorageError::RunNotFound(999))));
}

#[test]
fn test_unopenable_store_is_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let store =
        ResultsStore::new(dir.path().join("missing").join("results.db"), ModelOutputs::default());

    let result = store.record_run(&metrics(0.4, 0.3), "m.txt", "c.txt", "");
    assert!(matches!(result, Err(StorageError::Unavailable { .. })));
}

#[test]
fn test_table_exists() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(dir.path());

    assert!(!store.table_exists("runs"), "store file not created yet");
    assert!(!dir.path().join("results.db").exists(), "table_exists must not create the store");

    store.record_run(&metrics(0.4, 0.3), "m.txt", "c.txt", "").unwrap();
    assert!(store.table_exists("runs"));
    assert!(store.table_exists("predictions"));
    assert!(!store.table_exists("trials"));
    assert!(!table_exists(&dir.path().join("other.db"), "runs"));
}

#[test]
fn test_refused_write_is_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(dir.path());

    for code in [rusqlite::ffi::SQLITE_READONLY, rusqlite::ffi::SQLITE_FULL] {
        let e = rusqlite::Error::SqliteFailure(rusqlite::ffi::Error::new(code), None);
        assert!(matches!(
            store.write_failure("insert", e),
            StorageError::Unavailable { .. }
        ));
    }

    let e = rusqlite::Error::SqliteFailure(
        rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_CONSTRAINT),
        Some("CHECK constraint failed".into()),
    );
    assert!(matches!(store.write_failure("insert", e), StorageError::Query(_)));
}

#[test]
fn test_rejected_run_insert_is_query_error() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(dir.path());
    store.record_run(&metrics(0.4, 0.3), "m.txt", "c.txt", "").unwrap();

    let conn = rusqlite::Connection::open(store.path()).unwrap();
    conn.execute_batch(
        "CREATE TRIGGER no_runs BEFORE INSERT ON runs BEGIN SELECT RAISE(ABORT, 'frozen'); END;",
    )
    .unwrap();

    let err = store.record_run(&metrics(0.5, 0.3), "m.txt", "c.txt", "").unwrap_err();
    assert!(matches!(&err, StorageError::Query(msg) if msg.contains("frozen")));
}
