//! Purpose: Fixed local file names and store configuration values.
//! Exports: `StoreConfig`, `DEFAULT_DB_FILE`, `DEFAULT_EXPORT_FILE`.
//! Role: Single source for where the store lives; passed explicitly to `Store`.
//! Invariants: The database path is a relative name resolved against the working directory.
//! Invariants: No flag or environment variable overrides the database path.

use std::path::{Path, PathBuf};

pub const DEFAULT_DB_FILE: &str = "inspirations.db";
pub const DEFAULT_EXPORT_FILE: &str = "inspirations.txt";

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StoreConfig {
    db_path: PathBuf,
}

impl StoreConfig {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DB_FILE)
    }
}
