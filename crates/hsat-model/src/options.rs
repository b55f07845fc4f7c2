//! Configuration options for a pipeline run.

use serde::{Deserialize, Serialize};

pub const DEFAULT_HOSPITAL_COLUMN: &str = "code_hospital";
pub const DEFAULT_DATASET_TABLE: &str = "satisfaction_2016_cleaned";
pub const DEFAULT_SCORES_TABLE: &str = "hospital_scores";
pub const DEFAULT_QUESTIONS_TABLE: &str = "question_texts";
pub const DEFAULT_READABLE_VIEW: &str = "vw_satisfaction_readable";

/// Options controlling a pipeline run.
///
/// Deserializable from a TOML file; every field has a default so a config
/// file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineOptions {
    /// Column holding the hospital code, after header normalization.
    pub hospital_column: String,

    /// Table name for the cleaned and recoded survey rows.
    pub dataset_table: String,

    /// Table name for per-hospital averages.
    pub scores_table: String,

    /// Table name for question metadata.
    pub questions_table: String,

    /// Name of the readable view over the dataset table.
    pub readable_view: String,

    /// Impute missing hospital codes like any other numeric column.
    ///
    /// Off by default: a record without a hospital code belongs to no
    /// hospital and must not be given a synthetic one.
    pub impute_hospital_column: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            hospital_column: DEFAULT_HOSPITAL_COLUMN.to_string(),
            dataset_table: DEFAULT_DATASET_TABLE.to_string(),
            scores_table: DEFAULT_SCORES_TABLE.to_string(),
            questions_table: DEFAULT_QUESTIONS_TABLE.to_string(),
            readable_view: DEFAULT_READABLE_VIEW.to_string(),
            impute_hospital_column: false,
        }
    }
}

impl PipelineOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_hospital_column(mut self, column: impl Into<String>) -> Self {
        self.hospital_column = column.into();
        self
    }

    #[must_use]
    pub fn with_impute_hospital_column(mut self, enable: bool) -> Self {
        self.impute_hospital_column = enable;
        self
    }
}
