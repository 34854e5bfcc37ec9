//! Purpose: Browsing view over a materialized snapshot of the store.
//! Exports: `Viewer`, `Column`.
//! Invariants: Rows are read-only and keep `list_all` order (newest first).
//! Invariants: The snapshot is not refreshed; reopening the viewer reloads it.

use std::time::{Duration, Instant};

use crate::core::store::Inspiration;
use crate::shell::label::TransientLabel;

pub const EXPORT_LABEL: &str = "Export all";
pub const EXPORT_OK_LABEL: &str = "Export succeeded!";
pub const EXPORT_FAILED_LABEL: &str = "Export failed!";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Column {
    Timestamp,
    Content,
}

impl Column {
    pub fn header(self) -> &'static str {
        match self {
            Column::Timestamp => "Time",
            Column::Content => "Inspiration",
        }
    }
}

#[derive(Clone, Debug)]
pub struct Viewer {
    rows: Vec<Inspiration>,
    export_label: TransientLabel,
}

impl Viewer {
    pub fn new(rows: Vec<Inspiration>) -> Self {
        Self {
            rows,
            export_label: TransientLabel::new(EXPORT_LABEL),
        }
    }

    pub fn rows(&self) -> &[Inspiration] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Full, untruncated text of one cell.
    pub fn cell(&self, row: usize, column: Column) -> Option<&str> {
        let record = self.rows.get(row)?;
        Some(match column {
            Column::Timestamp => record.timestamp.as_str(),
            Column::Content => record.content.as_str(),
        })
    }

    pub fn export_label(&self) -> &str {
        self.export_label.text()
    }

    pub(crate) fn flash_export(&mut self, ok: bool, now: Instant, duration: Duration) {
        let text = if ok { EXPORT_OK_LABEL } else { EXPORT_FAILED_LABEL };
        self.export_label.flash(text, now, duration);
    }

    pub(crate) fn tick(&mut self, now: Instant) {
        self.export_label.tick(now);
    }
}
