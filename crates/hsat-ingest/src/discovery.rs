//! Input file discovery.
//!
//! A survey folder tends to collect more than the export itself: editor
//! lock files (`~$survey.csv`, `.~lock.survey.csv#`), hidden copies and
//! zero-byte placeholders left by an interrupted download. None of them is a
//! candidate export.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{IngestError, Result};

/// Candidate survey exports in `dir`, sorted by path.
///
/// Only regular, non-empty `.csv` files count; hidden and lock files are
/// skipped. Subdirectories (such as a previous run's `output/`) are not
/// searched.
pub fn list_survey_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }
    let read_error = |source| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source,
    };

    let mut exports = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(read_error)? {
        let entry = entry.map_err(read_error)?;
        let path = entry.path();
        if !has_csv_extension(&path) {
            continue;
        }
        if is_hidden_or_lock(&path) {
            debug!(path = %path.display(), "skipping hidden or lock file");
            continue;
        }
        let metadata = entry.metadata().map_err(read_error)?;
        if !metadata.is_file() {
            continue;
        }
        if metadata.len() == 0 {
            debug!(path = %path.display(), "skipping empty export");
            continue;
        }
        exports.push(path);
    }

    exports.sort();
    Ok(exports)
}

fn has_csv_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

fn is_hidden_or_lock(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with('.') || name.starts_with("~$"))
}
