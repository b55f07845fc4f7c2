//! Survey transformation pipeline.
//!
//! This crate provides the transform stages for satisfaction survey data:
//!
//! - **columns**: header canonicalization and de-duplication
//! - **frame_builder**: typed DataFrame construction from raw text cells
//! - **clean**: duplicate-row removal and missing-value imputation
//! - **mapping**: per-column recoding of categorical codes
//! - **questions**: question metadata derived from column names
//! - **scores**: per-hospital question means and pooled overall average
//! - **view**: human-readable aliases for question columns
//! - **pipeline**: stage orchestration for one dataset snapshot
//!
//! Every stage takes its input by reference and returns a new frame.

pub mod clean;
pub mod columns;
pub mod error;
pub mod frame_builder;
mod frame_utils;
pub mod mapping;
pub mod pipeline;
pub mod questions;
pub mod scores;
pub mod view;

pub use clean::{CleanOptions, CleaningReport, ImputationStrategy, ImputedColumn, clean_frame};
pub use columns::{
    ColumnNormalization, canonical_name, normalize_column_names, normalize_frame_columns,
};
pub use error::{Result, TransformError};
pub use frame_builder::build_frame;
pub use mapping::{MappedColumn, MappingReport, apply_value_mappings};
pub use pipeline::{PipelineOutput, PipelineReport, SurveyPipeline};
pub use questions::{build_question_metadata, question_metadata_frame};
pub use scores::{
    HospitalScoreRow, HospitalScores, OVERALL_AVERAGE_COLUMN, QuestionSummary,
    compute_hospital_scores,
};
pub use view::{ColumnAlias, alias_for_column, readable_aliases};
