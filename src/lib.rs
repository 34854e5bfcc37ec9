//! Purpose: Library crate backing the `inspiration-box` CLI and tests.
//! Exports: `api` (stable surface), `core` (store, clock, export, errors), `shell`, `notice`.
//! Role: Holds the persistent store and the headless event-driven shell around it.
//! Invariants: The store is the only component that touches the database file.
//! Invariants: Configuration is passed explicitly; there is no hidden global state.
pub mod api;
pub mod config;
pub mod core;
pub mod notice;
pub mod shell;
