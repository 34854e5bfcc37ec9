// Append-only SQLite store of inspirations: schema, insert, ordered listing, export.
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use rusqlite::{Connection, params};
use serde::Serialize;

use crate::config::StoreConfig;
use crate::core::clock::{Clock, LocalClock, format_timestamp};
use crate::core::error::{Error, ErrorKind};
use crate::core::export::write_records;

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS inspirations (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    content TEXT NOT NULL,
    timestamp TEXT NOT NULL
)";

const SELECT_ALL: &str =
    "SELECT id, timestamp, content FROM inspirations ORDER BY timestamp DESC, id DESC";

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Inspiration {
    pub id: i64,
    pub timestamp: String,
    pub content: String,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub records: usize,
}

/// Handle to the inspirations table. Holds only the path; every operation
/// opens its own connection and drops it before returning.
#[derive(Clone, Debug)]
pub struct Store<C = LocalClock> {
    path: PathBuf,
    clock: C,
}

impl Store<LocalClock> {
    pub fn new(config: &StoreConfig) -> Self {
        Self {
            path: config.db_path().to_path_buf(),
            clock: LocalClock,
        }
    }
}

impl<C: Clock> Store<C> {
    pub fn with_clock<D: Clock>(self, clock: D) -> Store<D> {
        Store {
            path: self.path,
            clock,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the table if missing. Safe to call on every start.
    pub fn initialize(&self) -> Result<(), Error> {
        let conn = self.connect()?;
        conn.execute(CREATE_TABLE, []).map_err(|err| {
            Error::new(ErrorKind::StorageUnavailable)
                .with_message("failed to create inspirations table")
                .with_path(&self.path)
                .with_source(err)
        })?;
        tracing::debug!(path = %self.path.display(), "store initialized");
        Ok(())
    }

    /// Inserts `content` stamped with the current local time and commits
    /// before returning. Content is stored as given.
    pub fn append(&self, content: &str) -> Result<(), Error> {
        let timestamp = format_timestamp(self.clock.now());
        let mut conn = self.connect().map_err(|err| {
            Error::new(ErrorKind::Write)
                .with_message("failed to open store for append")
                .with_path(&self.path)
                .with_source(err)
        })?;
        let write_error = |err: rusqlite::Error| {
            Error::new(ErrorKind::Write)
                .with_message("failed to append inspiration")
                .with_path(&self.path)
                .with_source(err)
        };

        let tx = conn.transaction().map_err(write_error)?;
        tx.execute(
            "INSERT INTO inspirations (content, timestamp) VALUES (?1, ?2)",
            params![content, timestamp],
        )
        .map_err(write_error)?;
        tx.commit().map_err(write_error)?;

        tracing::debug!(%timestamp, chars = content.chars().count(), "inspiration appended");
        Ok(())
    }

    /// All records, newest first; ties on the second fall back to insertion order.
    pub fn list_all(&self) -> Result<Vec<Inspiration>, Error> {
        let conn = self.connect()?;
        let read_error = |err: rusqlite::Error| {
            Error::new(ErrorKind::StorageUnavailable)
                .with_message("failed to read inspirations")
                .with_path(&self.path)
                .with_source(err)
        };

        let mut stmt = conn.prepare(SELECT_ALL).map_err(read_error)?;
        let rows = stmt
            .query_map([], |row| {
                Ok(Inspiration {
                    id: row.get(0)?,
                    timestamp: row.get(1)?,
                    content: row.get(2)?,
                })
            })
            .map_err(read_error)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(read_error)
    }

    /// Overwrites `destination` with every record in `list_all` order.
    /// A failed write may leave a partial file behind.
    pub fn export_all(&self, destination: &Path) -> Result<ExportSummary, Error> {
        let records = self.list_all()?;
        let export_error = |err: std::io::Error| {
            Error::new(ErrorKind::Export)
                .with_message("failed to write export file")
                .with_path(destination)
                .with_hint("Choose a writable destination path.")
                .with_source(err)
        };

        let file = File::create(destination).map_err(export_error)?;
        let mut out = BufWriter::new(file);
        let written = write_records(&mut out, &records).map_err(export_error)?;
        out.into_inner()
            .map_err(|err| export_error(err.into_error()))?
            .sync_all()
            .map_err(export_error)?;

        tracing::debug!(path = %destination.display(), records = written, "export complete");
        Ok(ExportSummary {
            path: destination.to_path_buf(),
            records: written,
        })
    }

    fn connect(&self) -> Result<Connection, Error> {
        Connection::open(&self.path).map_err(|err| {
            Error::new(ErrorKind::StorageUnavailable)
                .with_message("failed to open inspirations database")
                .with_path(&self.path)
                .with_hint("Check that the working directory is writable.")
                .with_source(err)
        })
    }
}
