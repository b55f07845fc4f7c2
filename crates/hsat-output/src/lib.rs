//! Persistence boundary for the survey pipeline.
//!
//! - **sink**: the "replace table" contract and a CSV-directory implementation
//! - **view_sql**: DDL for the readable view over the dataset table
//! - **manifest**: a JSON record of what a run produced

pub mod error;
pub mod manifest;
pub mod sink;
pub mod view_sql;

pub use error::{OutputError, Result};
pub use manifest::{MANIFEST_FILE, RunManifest, TableSummary, write_manifest};
pub use sink::{CsvTableSink, TableSink};
pub use view_sql::{quote_identifier, render_readable_view};
