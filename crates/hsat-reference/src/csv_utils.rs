//! Shared CSV utilities for loading reference files.

use std::collections::BTreeMap;
use std::path::Path;

use csv::ReaderBuilder;

use crate::error::{ReferenceError, Result};

/// One data row keyed by header, with its 1-based line number in the file.
#[derive(Debug, Clone)]
pub struct CsvRow {
    pub line: usize,
    pub fields: BTreeMap<String, String>,
}

impl CsvRow {
    /// Get a field value, returning empty string if not present.
    pub fn field(&self, key: &str) -> &str {
        self.fields.get(key).map(String::as_str).unwrap_or("")
    }

    /// Get an optional field value (None if empty or missing).
    pub fn optional(&self, key: &str) -> Option<String> {
        self.fields.get(key).filter(|v| !v.is_empty()).cloned()
    }
}

/// Read a CSV file into header-keyed rows.
///
/// Handles BOM characters and trims whitespace from values. Fails when any
/// of `required` is absent from the header row.
pub fn read_csv_rows(path: &Path, required: &[&str]) -> Result<Vec<CsvRow>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|error| csv_error(path, &error))?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(|error| csv_error(path, &error))?
        .iter()
        .map(|header| header.trim().trim_matches('\u{feff}').to_string())
        .collect();

    for column in required {
        if !headers.iter().any(|header| header == column) {
            return Err(ReferenceError::MissingColumn {
                path: path.to_path_buf(),
                column: (*column).to_string(),
            });
        }
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|error| csv_error(path, &error))?;
        let line = record
            .position()
            .map(|pos| pos.line() as usize)
            .unwrap_or(rows.len() + 2);
        let mut fields = BTreeMap::new();
        for (idx, value) in record.iter().enumerate() {
            let key = headers.get(idx).cloned().unwrap_or_default();
            fields.insert(key, value.trim().to_string());
        }
        rows.push(CsvRow { line, fields });
    }
    Ok(rows)
}

fn csv_error(path: &Path, error: &csv::Error) -> ReferenceError {
    if let csv::ErrorKind::Io(io) = error.kind() {
        return ReferenceError::io(path, std::io::Error::new(io.kind(), io.to_string()));
    }
    ReferenceError::Csv {
        path: path.to_path_buf(),
        message: error.to_string(),
    }
}
