//! Stage orchestration for one survey snapshot.
//!
//! ```text
//! RawTable -> normalize headers -> build frame -> clean -> map
//!          -> { question metadata, hospital scores, view aliases }
//! ```
//!
//! Reference tables are borrowed for the lifetime of the pipeline; every
//! stage produces a new frame and leaves its input untouched.

use polars::prelude::DataFrame;
use serde::Serialize;
use tracing::{info, info_span};

use hsat_model::{PipelineOptions, QuestionMetadata, QuestionTexts, RawTable, ValueMappings};

use crate::clean::{CleanOptions, CleaningReport, clean_frame};
use crate::columns::{ColumnNormalization, normalize_column_names, normalize_frame_columns};
use crate::error::Result;
use crate::frame_builder::build_frame;
use crate::frame_utils::column_names;
use crate::mapping::{MappingReport, apply_value_mappings};
use crate::questions::{build_question_metadata, question_metadata_frame};
use crate::scores::{HospitalScores, compute_hospital_scores};
use crate::view::{ColumnAlias, readable_aliases};

/// What each stage recorded about the data it absorbed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PipelineReport {
    pub normalization: ColumnNormalization,
    pub cleaning: CleaningReport,
    pub mapping: MappingReport,
}

/// Everything a run produces, ready for persistence.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Cleaned and recoded survey rows.
    pub dataset: DataFrame,
    pub question_metadata: Vec<QuestionMetadata>,
    /// `question_texts` table built from `question_metadata`.
    pub questions_frame: DataFrame,
    pub scores: HospitalScores,
    /// `hospital_scores` table built from `scores`.
    pub scores_frame: DataFrame,
    /// Display names for the dataset columns, in column order.
    pub aliases: Vec<ColumnAlias>,
    pub report: PipelineReport,
}

pub struct SurveyPipeline<'a> {
    mappings: &'a ValueMappings,
    texts: &'a QuestionTexts,
    options: &'a PipelineOptions,
}

impl<'a> SurveyPipeline<'a> {
    pub fn new(
        mappings: &'a ValueMappings,
        texts: &'a QuestionTexts,
        options: &'a PipelineOptions,
    ) -> Self {
        Self {
            mappings,
            texts,
            options,
        }
    }

    /// Run every stage over a raw extracted table.
    pub fn run_table(&self, table: &RawTable) -> Result<PipelineOutput> {
        let span = info_span!("pipeline", rows = table.row_count(), columns = table.column_count());
        let _guard = span.enter();
        let normalization = normalize_column_names(&table.headers);
        let frame = build_frame(&normalization.columns, table)?;
        self.run_normalized(&frame, normalization)
    }

    /// Run every stage over a frame whose headers have not been normalized.
    pub fn run_frame(&self, df: &DataFrame) -> Result<PipelineOutput> {
        let span = info_span!("pipeline", rows = df.height(), columns = df.width());
        let _guard = span.enter();
        let (frame, normalization) = normalize_frame_columns(df)?;
        self.run_normalized(&frame, normalization)
    }

    fn clean_options(&self) -> CleanOptions {
        if self.options.impute_hospital_column {
            CleanOptions::new()
        } else {
            CleanOptions::new().skip_column(self.options.hospital_column.as_str())
        }
    }

    fn run_normalized(
        &self,
        frame: &DataFrame,
        normalization: ColumnNormalization,
    ) -> Result<PipelineOutput> {
        let (cleaned, cleaning) = clean_frame(frame, &self.clean_options())?;
        let (dataset, mapping) = apply_value_mappings(&cleaned, self.mappings)?;

        let columns = column_names(&dataset);
        let question_metadata = build_question_metadata(&columns, self.texts);
        let questions_frame = question_metadata_frame(&question_metadata)?;
        let scores = compute_hospital_scores(&dataset, &self.options.hospital_column)?;
        let scores_frame = scores.to_frame()?;
        let aliases = readable_aliases(&columns, self.texts);

        info!(
            rows = dataset.height(),
            questions = question_metadata.len(),
            hospitals = scores.len(),
            "pipeline complete"
        );
        Ok(PipelineOutput {
            dataset,
            question_metadata,
            questions_frame,
            scores,
            scores_frame,
            aliases,
            report: PipelineReport {
                normalization,
                cleaning,
                mapping,
            },
        })
    }
}
