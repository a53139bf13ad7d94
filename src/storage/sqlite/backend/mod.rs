//! SQLite connection handling and schema for the results store.

pub(crate) mod schema;
mod sqlite_backend;

pub use sqlite_backend::{table_exists, ResultsStore};
pub(crate) use sqlite_backend::{parse_timestamp, table_exists_in};

#[cfg(test)]
#[path = "tests/mod.rs"]
mod tests;
