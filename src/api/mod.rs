//! Purpose: Define the public Rust API boundary for inspiration-box.
//! Exports: Store, shell, and error types needed by the CLI and embedders.
//! Role: Additive-only surface; callers should not reach into `core` paths directly.
//! Invariants: Every database access goes through `Store`.

#[doc(hidden)]
pub use crate::core::error::to_exit_code;
pub use crate::config::{DEFAULT_DB_FILE, DEFAULT_EXPORT_FILE, StoreConfig};
pub use crate::core::clock::{Clock, LocalClock, format_timestamp, parse_timestamp};
pub use crate::core::error::{Error, ErrorKind};
pub use crate::core::store::{ExportSummary, Inspiration, Store};
pub use crate::shell::{Column, Outcome, Pose, Shell, ShellEvent, Viewer};
