//! Per-hospital score aggregation.
//!
//! Records are grouped by hospital code. Each question gets the mean of its
//! non-missing values within the group, and the hospital's overall average
//! pools every non-missing question value: `sum / count` across all
//! question columns, not the mean of the per-question means.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use polars::prelude::{Column, DataFrame, NamedFrom, Series};
use serde::Serialize;
use tracing::{debug, info};

use hsat_model::QuestionCode;

use crate::error::{Result, TransformError};
use crate::frame_utils::{integral_values, numeric_values};

pub const OVERALL_AVERAGE_COLUMN: &str = "overall_average";

/// Aggregated scores for one hospital.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HospitalScoreRow {
    pub hospital_code: i64,
    /// One mean per question, in [`HospitalScores::questions`] order.
    pub question_means: Vec<Option<f64>>,
    pub overall_average: Option<f64>,
    /// Non-missing question values that went into `overall_average`.
    pub responses: usize,
}

/// Distribution of one question's hospital means.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionSummary {
    pub question: String,
    /// Hospitals with a mean for this question.
    pub hospitals: usize,
    pub mean: f64,
    pub median: f64,
    /// Sample standard deviation; `None` with fewer than two hospitals.
    pub std_dev: Option<f64>,
}

/// Result of [`compute_hospital_scores`], one row per hospital in
/// ascending code order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HospitalScores {
    pub hospital_column: String,
    pub questions: Vec<String>,
    pub rows: Vec<HospitalScoreRow>,
    /// Records dropped for lack of a usable hospital code.
    pub excluded_records: usize,
}

impl HospitalScores {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, hospital_code: i64) -> Option<&HospitalScoreRow> {
        self.rows
            .binary_search_by_key(&hospital_code, |row| row.hospital_code)
            .ok()
            .map(|idx| &self.rows[idx])
    }

    /// Mean of `question` for one hospital.
    pub fn mean(&self, hospital_code: i64, question: &str) -> Option<f64> {
        let position = self.question_position(question)?;
        self.row(hospital_code)?.question_means[position]
    }

    fn question_position(&self, question: &str) -> Option<usize> {
        self.questions.iter().position(|q| q == question)
    }

    /// Rows ordered best first: overall average descending, hospitals
    /// without one last, ties broken by ascending code.
    pub fn ranked(&self) -> Vec<&HospitalScoreRow> {
        let mut ranked: Vec<&HospitalScoreRow> = self.rows.iter().collect();
        ranked.sort_by(|a, b| match (a.overall_average, b.overall_average) {
            (Some(x), Some(y)) => y
                .total_cmp(&x)
                .then_with(|| a.hospital_code.cmp(&b.hospital_code)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => a.hospital_code.cmp(&b.hospital_code),
        });
        ranked
    }

    /// Spread of one question's means across hospitals.
    ///
    /// Returns `None` for an unknown question or one no hospital answered.
    pub fn question_summary(&self, question: &str) -> Option<QuestionSummary> {
        let position = self.question_position(question)?;
        let mut means: Vec<f64> = self
            .rows
            .iter()
            .filter_map(|row| row.question_means[position])
            .collect();
        if means.is_empty() {
            return None;
        }
        means.sort_by(f64::total_cmp);
        let n = means.len();
        let mean = means.iter().sum::<f64>() / n as f64;
        let median = if n % 2 == 1 {
            means[n / 2]
        } else {
            (means[n / 2 - 1] + means[n / 2]) / 2.0
        };
        let std_dev = (n > 1).then(|| {
            let variance =
                means.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
            variance.sqrt()
        });
        Some(QuestionSummary {
            question: question.to_string(),
            hospitals: n,
            mean,
            median,
            std_dev,
        })
    }

    /// Summaries for every question, in column order.
    pub fn question_summaries(&self) -> Vec<QuestionSummary> {
        self.questions
            .iter()
            .filter_map(|question| self.question_summary(question))
            .collect()
    }

    /// The `hospital_scores` output table: hospital code (`Int64`), one
    /// `Float64` mean per question, then `overall_average`.
    pub fn to_frame(&self) -> Result<DataFrame> {
        let mut columns: Vec<Column> = Vec::with_capacity(self.questions.len() + 2);
        let codes: Vec<i64> = self.rows.iter().map(|row| row.hospital_code).collect();
        columns.push(Series::new(self.hospital_column.as_str().into(), codes).into());
        for (position, question) in self.questions.iter().enumerate() {
            let means: Vec<Option<f64>> = self
                .rows
                .iter()
                .map(|row| row.question_means[position])
                .collect();
            columns.push(Series::new(question.as_str().into(), means).into());
        }
        let overall: Vec<Option<f64>> = self.rows.iter().map(|row| row.overall_average).collect();
        columns.push(Series::new(OVERALL_AVERAGE_COLUMN.into(), overall).into());
        Ok(DataFrame::new(columns)?)
    }
}

#[derive(Debug, Clone)]
struct Accumulator {
    sums: Vec<f64>,
    counts: Vec<usize>,
}

impl Accumulator {
    fn new(questions: usize) -> Self {
        Self {
            sums: vec![0.0; questions],
            counts: vec![0; questions],
        }
    }

    fn finish(self, hospital_code: i64) -> HospitalScoreRow {
        let question_means = self
            .sums
            .iter()
            .zip(&self.counts)
            .map(|(sum, count)| (*count > 0).then(|| sum / *count as f64))
            .collect();
        let total: f64 = self.sums.iter().sum();
        let responses: usize = self.counts.iter().sum();
        HospitalScoreRow {
            hospital_code,
            question_means,
            overall_average: (responses > 0).then(|| total / responses as f64),
            responses,
        }
    }
}

/// Aggregate question scores per hospital.
///
/// Question columns are detected by name with [`QuestionCode::parse`]; the
/// hospital column itself is never treated as a question. Question cells
/// that are not numeric count as missing. Records whose hospital code is
/// missing or not an integer are excluded.
pub fn compute_hospital_scores(df: &DataFrame, hospital_column: &str) -> Result<HospitalScores> {
    let hospital = df
        .column(hospital_column)
        .map_err(|_| TransformError::MissingColumn {
            column: hospital_column.to_string(),
        })?;

    let question_columns: Vec<&Column> = df
        .get_columns()
        .iter()
        .filter(|column| {
            let name = column.name().as_str();
            name != hospital_column && QuestionCode::parse(name).is_some()
        })
        .collect();
    if question_columns.is_empty() {
        return Err(TransformError::NoQuestionColumns);
    }
    let questions: Vec<String> = question_columns
        .iter()
        .map(|column| column.name().to_string())
        .collect();
    let values: Vec<Vec<Option<f64>>> = question_columns
        .iter()
        .map(|column| numeric_values(column))
        .collect();

    let mut groups: BTreeMap<i64, Accumulator> = BTreeMap::new();
    let mut excluded_records = 0usize;
    for (idx, code) in integral_values(hospital).into_iter().enumerate() {
        let Some(code) = code else {
            excluded_records += 1;
            continue;
        };
        let accumulator = groups
            .entry(code)
            .or_insert_with(|| Accumulator::new(questions.len()));
        for (position, column_values) in values.iter().enumerate() {
            if let Some(value) = column_values[idx] {
                accumulator.sums[position] += value;
                accumulator.counts[position] += 1;
            }
        }
    }

    let rows: Vec<HospitalScoreRow> = groups
        .into_iter()
        .map(|(code, accumulator)| accumulator.finish(code))
        .collect();
    if excluded_records > 0 {
        debug!(excluded_records, "records without hospital code excluded");
    }
    info!(
        hospitals = rows.len(),
        questions = questions.len(),
        excluded_records,
        "hospital scores computed"
    );
    Ok(HospitalScores {
        hospital_column: hospital_column.to_string(),
        questions,
        rows,
        excluded_records,
    })
}
