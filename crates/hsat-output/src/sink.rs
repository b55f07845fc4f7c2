//! Table persistence.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use polars::prelude::{CsvWriter, DataFrame, SerWriter};
use tracing::{debug, info};

use crate::error::{OutputError, Result};

/// A destination that stores named tables.
///
/// Every write replaces whatever the sink held under that name before.
pub trait TableSink {
    /// Store `df` as table `name`, returning where it landed.
    fn replace_table(&mut self, name: &str, df: &mut DataFrame) -> Result<PathBuf>;

    /// Store the DDL for view `name`.
    fn replace_view(&mut self, name: &str, ddl: &str) -> Result<PathBuf>;
}

/// Writes each table to `<dir>/<name>.csv` and each view to `<dir>/<name>.sql`.
#[derive(Debug, Clone)]
pub struct CsvTableSink {
    dir: PathBuf,
}

impl CsvTableSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn target(&self, name: &str, extension: &str) -> Result<PathBuf> {
        validate_name(name)?;
        fs::create_dir_all(&self.dir).map_err(|e| OutputError::io(&self.dir, e))?;
        Ok(self.dir.join(format!("{name}.{extension}")))
    }
}

/// Table names become file names; keep them to one path component.
fn validate_name(name: &str) -> Result<()> {
    let valid = !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
        && !name.chars().any(char::is_control);
    if valid {
        Ok(())
    } else {
        Err(OutputError::InvalidTableName {
            name: name.to_string(),
        })
    }
}

impl TableSink for CsvTableSink {
    fn replace_table(&mut self, name: &str, df: &mut DataFrame) -> Result<PathBuf> {
        let path = self.target(name, "csv")?;
        let mut file = File::create(&path).map_err(|e| OutputError::io(&path, e))?;
        CsvWriter::new(&mut file)
            .include_header(true)
            .finish(df)
            .map_err(|source| OutputError::Write {
                table: name.to_string(),
                source,
            })?;
        info!(
            table = name,
            rows = df.height(),
            columns = df.width(),
            path = %path.display(),
            "table written"
        );
        Ok(path)
    }

    fn replace_view(&mut self, name: &str, ddl: &str) -> Result<PathBuf> {
        let path = self.target(name, "sql")?;
        fs::write(&path, ddl).map_err(|e| OutputError::io(&path, e))?;
        debug!(view = name, path = %path.display(), "view DDL written");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_names_that_escape_the_directory() {
        assert!(validate_name("hospital_scores").is_ok());
        assert!(validate_name("").is_err());
        assert!(validate_name("..").is_err());
        assert!(validate_name("a/b").is_err());
        assert!(validate_name("a\\b").is_err());
    }
}
