use polars::prelude::PolarsError;
use thiserror::Error;

/// Contract violations raised by the transform stages.
///
/// Data-quality problems (bad cells, gaps, duplicates) never surface here;
/// each stage absorbs them and records what it did in its report.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("hospital column '{column}' not found in dataset")]
    MissingColumn { column: String },

    #[error("no question columns found (expected names starting with 'q<digit>')")]
    NoQuestionColumns,

    #[error("dataframe operation failed: {0}")]
    InvalidFrame(#[from] PolarsError),
}

pub type Result<T> = std::result::Result<T, TransformError>;
