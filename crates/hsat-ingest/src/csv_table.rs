use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;

use hsat_model::RawTable;

use crate::error::{IngestError, Result};

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Read a comma-separated survey export.
pub fn read_survey_table(path: &Path) -> Result<RawTable> {
    read_survey_table_with_delimiter(path, b',')
}

/// Read a delimited survey export into a [`RawTable`].
///
/// The first non-blank line is the header row. Cells are trimmed and a
/// leading byte-order mark is dropped; fully blank lines are skipped. Rows
/// are padded or cut to the header width. Header names are returned as
/// written apart from BOM removal.
pub fn read_survey_table_with_delimiter(path: &Path, delimiter: u8) -> Result<RawTable> {
    if !path.is_file() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_path(path)
        .map_err(|source| IngestError::Csv {
            path: path.to_path_buf(),
            source,
        })?;

    let mut headers: Option<Vec<String>> = None;
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| IngestError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        if record.iter().all(|value| value.trim().is_empty()) {
            continue;
        }
        match &headers {
            None => {
                headers = Some(
                    record
                        .iter()
                        .map(|value| value.trim_start_matches('\u{feff}').to_string())
                        .collect(),
                );
            }
            Some(names) => {
                let mut row = Vec::with_capacity(names.len());
                for idx in 0..names.len() {
                    row.push(record.get(idx).map(normalize_cell).unwrap_or_default());
                }
                rows.push(row);
            }
        }
    }

    let Some(headers) = headers else {
        return Err(IngestError::EmptyFile {
            path: path.to_path_buf(),
        });
    };
    debug!(
        path = %path.display(),
        columns = headers.len(),
        rows = rows.len(),
        "survey table read"
    );
    Ok(RawTable::new(headers, rows))
}
