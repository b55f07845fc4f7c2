//! Run manifest.
//!
//! A JSON summary written next to the tables so a reader can tell what a
//! run consumed, what it produced and what data-quality issues it absorbed.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use hsat_transform::PipelineReport;

use crate::error::{OutputError, Result};

pub const MANIFEST_FILE: &str = "manifest.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableSummary {
    pub name: String,
    pub rows: usize,
    pub columns: usize,
    /// Where the table was written; `None` on a dry run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunManifest {
    pub generated_at: DateTime<Utc>,
    pub input: String,
    pub tables: Vec<TableSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub readable_view: Option<String>,
    pub column_collisions: Vec<String>,
    pub missing_mapping_columns: Vec<String>,
    pub duplicates_removed: usize,
    pub records_without_hospital: usize,
}

impl RunManifest {
    /// Start a manifest for `input`, copying the anomalies out of `report`.
    pub fn new(input: &Path, report: &PipelineReport, records_without_hospital: usize) -> Self {
        Self {
            generated_at: Utc::now(),
            input: input.display().to_string(),
            tables: Vec::new(),
            readable_view: None,
            column_collisions: report.normalization.collisions.clone(),
            missing_mapping_columns: report.mapping.missing_columns.clone(),
            duplicates_removed: report.cleaning.duplicates_removed,
            records_without_hospital,
        }
    }

    pub fn add_table(&mut self, name: &str, rows: usize, columns: usize, path: Option<&Path>) {
        self.tables.push(TableSummary {
            name: name.to_string(),
            rows,
            columns,
            path: path.map(|p| p.display().to_string()),
        });
    }
}

/// Write `manifest` to `<dir>/manifest.json`.
pub fn write_manifest(dir: &Path, manifest: &RunManifest) -> Result<PathBuf> {
    let path = dir.join(MANIFEST_FILE);
    let json = serde_json::to_string_pretty(manifest).map_err(|source| OutputError::Json {
        path: path.clone(),
        source,
    })?;
    fs::create_dir_all(dir).map_err(|e| OutputError::io(dir, e))?;
    fs::write(&path, json).map_err(|e| OutputError::io(&path, e))?;
    debug!(path = %path.display(), "manifest written");
    Ok(path)
}
