use std::path::Path;

use tracing::debug;

use hsat_model::{Hospital, HospitalDirectory, QuestionTexts, ValueMappings};

use crate::csv_utils::read_csv_rows;
use crate::error::{ReferenceError, Result};
use crate::paths::{HOSPITALS_FILE, QUESTION_TEXTS_FILE, VALUE_MAPPINGS_FILE, reference_root};

/// All static reference tables a pipeline run needs.
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    pub value_mappings: ValueMappings,
    pub question_texts: QuestionTexts,
    pub hospitals: HospitalDirectory,
}

pub fn load_default_reference_data() -> Result<ReferenceData> {
    load_reference_data(&reference_root())
}

/// Load the three reference files from `dir`.
pub fn load_reference_data(dir: &Path) -> Result<ReferenceData> {
    let value_mappings = load_value_mappings(&dir.join(VALUE_MAPPINGS_FILE))?;
    let question_texts = load_question_texts(&dir.join(QUESTION_TEXTS_FILE))?;
    let hospitals = load_hospitals(&dir.join(HOSPITALS_FILE))?;
    debug!(
        reference_dir = %dir.display(),
        mapping_columns = value_mappings.len(),
        question_texts = question_texts.len(),
        hospitals = hospitals.len(),
        "reference data loaded"
    );
    Ok(ReferenceData {
        value_mappings,
        question_texts,
        hospitals,
    })
}

/// Load a TOML value-mapping table: one `[column]` table of `"raw" = mapped`.
pub fn load_value_mappings(path: &Path) -> Result<ValueMappings> {
    let contents = std::fs::read_to_string(path).map_err(|e| ReferenceError::io(path, e))?;
    toml::from_str(&contents).map_err(|source| ReferenceError::Toml {
        path: path.to_path_buf(),
        source,
    })
}

/// Load `question_number,question_text` rows.
///
/// Rows with an empty text are skipped; a later row for the same number
/// replaces an earlier one.
pub fn load_question_texts(path: &Path) -> Result<QuestionTexts> {
    let rows = read_csv_rows(path, &["question_number", "question_text"])?;
    let mut texts = QuestionTexts::new();
    for row in rows {
        let raw_number = row.field("question_number");
        let number = raw_number
            .parse::<u32>()
            .map_err(|_| ReferenceError::InvalidRow {
                path: path.to_path_buf(),
                line: row.line,
                message: format!("question_number '{raw_number}' is not a positive integer"),
            })?;
        if let Some(text) = row.optional("question_text") {
            texts.insert(number, text);
        }
    }
    Ok(texts)
}

/// Load `code,name,district,ownership,size` rows.
pub fn load_hospitals(path: &Path) -> Result<HospitalDirectory> {
    let rows = read_csv_rows(path, &["code", "name"])?;
    let mut directory = HospitalDirectory::new();
    for row in rows {
        let raw_code = row.field("code");
        let code = raw_code
            .parse::<i64>()
            .map_err(|_| ReferenceError::InvalidRow {
                path: path.to_path_buf(),
                line: row.line,
                message: format!("hospital code '{raw_code}' is not an integer"),
            })?;
        let Some(name) = row.optional("name") else {
            return Err(ReferenceError::InvalidRow {
                path: path.to_path_buf(),
                line: row.line,
                message: format!("hospital {code} has no name"),
            });
        };
        directory.insert(Hospital {
            code,
            name,
            district: row.optional("district"),
            ownership: row.optional("ownership"),
            size: row.optional("size"),
        });
    }
    Ok(directory)
}
