//! Duplicate removal and missing-value imputation.
//!
//! Deduplication runs first so repeated rows do not bias the statistics used
//! for imputation. Numeric columns are filled with their mean, text columns
//! with their mode.

use std::collections::{BTreeMap, HashSet};

use polars::prelude::{BooleanChunked, DataFrame, DataType, NamedFrom, NewChunkedArray, Series};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::frame_utils::{is_numeric_dtype, missing_count, numeric_values, text_values};

/// Fill value used for a text column with no values at all.
pub const UNKNOWN_CATEGORY: &str = "Unknown";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanOptions {
    /// Columns left exactly as they are during imputation.
    pub skip_columns: Vec<String>,
}

impl CleanOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn skip_column(mut self, column: impl Into<String>) -> Self {
        self.skip_columns.push(column.into());
        self
    }

    fn skips(&self, column: &str) -> bool {
        self.skip_columns.iter().any(|skip| skip == column)
    }
}

/// How the missing cells of one column were filled.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "strategy", content = "value", rename_all = "snake_case")]
pub enum ImputationStrategy {
    /// Numeric column filled with the mean of its values.
    Mean(f64),
    /// Text column filled with its most frequent value.
    Mode(String),
    /// Text column with no values, filled with `Unknown`.
    UnknownFallback,
    /// Numeric column with no values; the mean is undefined so cells stay NaN.
    Undefined,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImputedColumn {
    pub column: String,
    pub strategy: ImputationStrategy,
    /// Number of cells that were missing before the fill.
    pub filled: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CleaningReport {
    pub rows_in: usize,
    pub duplicates_removed: usize,
    pub imputed: Vec<ImputedColumn>,
}

impl CleaningReport {
    pub fn rows_out(&self) -> usize {
        self.rows_in - self.duplicates_removed
    }
}

/// Clean a copy of `df`.
///
/// Duplicates are dropped before imputation and never again, so a filled
/// row may equal one that was already kept.
///
/// Imputed numeric columns come back as `Float64`, since a mean is rarely
/// an integer.
pub fn clean_frame(df: &DataFrame, options: &CleanOptions) -> Result<(DataFrame, CleaningReport)> {
    let rows_in = df.height();
    let mut cleaned = drop_duplicate_rows(df)?;
    let duplicates_removed = rows_in - cleaned.height();

    let mut imputed = Vec::new();
    let columns = cleaned.get_columns().to_vec();
    for column in &columns {
        let name = column.name().to_string();
        if options.skips(&name) {
            debug!(column = %name, "imputation skipped");
            continue;
        }
        let filled = missing_count(column);
        if filled == 0 {
            continue;
        }
        let dtype = column.dtype();
        let (series, strategy) = if is_numeric_dtype(dtype) {
            impute_numeric(&name, &numeric_values(column))
        } else if matches!(dtype, DataType::String) {
            impute_categorical(&name, &text_values(column))
        } else {
            debug!(column = %name, dtype = %dtype, "no imputation rule for dtype");
            continue;
        };
        if strategy == ImputationStrategy::Undefined {
            warn!(column = %name, "numeric column has no values; mean is undefined");
        }
        debug!(column = %name, filled, strategy = ?strategy, "imputed missing values");
        cleaned.with_column(series)?;
        imputed.push(ImputedColumn {
            column: name,
            strategy,
            filled,
        });
    }

    let report = CleaningReport {
        rows_in,
        duplicates_removed,
        imputed,
    };
    info!(
        rows_in,
        rows_out = report.rows_out(),
        duplicates_removed,
        imputed_columns = report.imputed.len(),
        "cleaning complete"
    );
    Ok((cleaned, report))
}

/// Keep the first occurrence of every distinct row, preserving order.
///
/// Rows compare by the canonical text of every cell; null and NaN compare
/// equal to each other.
fn drop_duplicate_rows(df: &DataFrame) -> Result<DataFrame> {
    if df.height() == 0 {
        return Ok(df.clone());
    }
    let columns: Vec<Vec<Option<String>>> = df.get_columns().iter().map(text_values).collect();
    let mut seen: HashSet<Vec<Option<String>>> = HashSet::with_capacity(df.height());
    let mut keep = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let row: Vec<Option<String>> = columns.iter().map(|values| values[idx].clone()).collect();
        keep.push(seen.insert(row));
    }
    if keep.iter().all(|kept| *kept) {
        return Ok(df.clone());
    }
    let mask = BooleanChunked::from_slice("dedupe".into(), &keep);
    Ok(df.filter(&mask)?)
}

fn impute_numeric(name: &str, values: &[Option<f64>]) -> (Series, ImputationStrategy) {
    let present: Vec<f64> = values.iter().flatten().copied().collect();
    let (fill, strategy) = if present.is_empty() {
        (f64::NAN, ImputationStrategy::Undefined)
    } else {
        let mean = present.iter().sum::<f64>() / present.len() as f64;
        (mean, ImputationStrategy::Mean(mean))
    };
    let filled: Vec<f64> = values.iter().map(|value| value.unwrap_or(fill)).collect();
    (Series::new(name.into(), filled), strategy)
}

fn impute_categorical(name: &str, values: &[Option<String>]) -> (Series, ImputationStrategy) {
    let (fill, strategy) = match mode(values) {
        Some(mode) => (mode.clone(), ImputationStrategy::Mode(mode)),
        None => (
            UNKNOWN_CATEGORY.to_string(),
            ImputationStrategy::UnknownFallback,
        ),
    };
    let filled: Vec<String> = values
        .iter()
        .map(|value| value.clone().unwrap_or_else(|| fill.clone()))
        .collect();
    (Series::new(name.into(), filled), strategy)
}

/// Most frequent value; ties go to the value that sorts first.
fn mode(values: &[Option<String>]) -> Option<String> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for value in values.iter().flatten() {
        *counts.entry(value.as_str()).or_insert(0) += 1;
    }
    let mut best: Option<(&str, usize)> = None;
    for (value, count) in counts {
        if best.is_none_or(|(_, best_count)| count > best_count) {
            best = Some((value, count));
        }
    }
    best.map(|(value, _)| value.to_string())
}

#[cfg(test)]
mod tests {
    use polars::prelude::{AnyValue, Column};

    use super::*;

    fn frame(columns: Vec<Column>) -> DataFrame {
        DataFrame::new(columns).expect("frame")
    }

    #[test]
    fn mode_breaks_ties_by_sort_order() {
        let values = vec![
            Some("b".to_string()),
            Some("a".to_string()),
            None,
            Some("b".to_string()),
            Some("a".to_string()),
        ];
        assert_eq!(mode(&values), Some("a".to_string()));
        assert_eq!(mode(&[None, None]), None);
    }

    #[test]
    fn duplicates_are_removed_before_mean() {
        let df = frame(vec![
            Series::new("a".into(), vec![Some(1.0), Some(1.0), Some(4.0), None]).into(),
            Series::new("b".into(), vec!["x", "x", "y", "z"]).into(),
        ]);
        let (cleaned, report) = clean_frame(&df, &CleanOptions::new()).expect("clean");
        assert_eq!(report.duplicates_removed, 1);
        assert_eq!(cleaned.height(), 3);
        let a = cleaned.column("a").expect("a");
        assert_eq!(a.get(2).expect("cell"), AnyValue::Float64(2.5));
        assert_eq!(
            report.imputed,
            vec![ImputedColumn {
                column: "a".to_string(),
                strategy: ImputationStrategy::Mean(2.5),
                filled: 1,
            }]
        );
    }

    #[test]
    fn imputation_can_recreate_a_removed_duplicate() {
        let df = frame(vec![
            Series::new("k".into(), vec![1i64, 1, 1]).into(),
            Series::new("v".into(), vec![Some(2.5), None, Some(2.5)]).into(),
        ]);
        let (cleaned, report) = clean_frame(&df, &CleanOptions::new()).expect("clean");
        assert_eq!(report.duplicates_removed, 1);
        assert_eq!(cleaned.height(), 2);
        let v = cleaned.column("v").expect("v");
        assert_eq!(v.get(0).expect("cell"), AnyValue::Float64(2.5));
        assert_eq!(v.get(1).expect("cell"), AnyValue::Float64(2.5));
    }

    #[test]
    fn nulls_compare_equal_for_deduplication() {
        let df = frame(vec![
            Series::new("a".into(), vec![None::<i64>, None]).into(),
            Series::new("b".into(), vec![Some("x"), Some("x")]).into(),
        ]);
        let (cleaned, report) = clean_frame(&df, &CleanOptions::new()).expect("clean");
        assert_eq!(cleaned.height(), 1);
        assert_eq!(report.duplicates_removed, 1);
    }

    #[test]
    fn text_columns_use_mode_or_unknown() {
        let df = frame(vec![
            Series::new("id".into(), vec![1i64, 2, 3]).into(),
            Series::new("city".into(), vec![Some("haifa"), None, Some("haifa")]).into(),
            Series::new("note".into(), vec![None::<&str>, None, None]).into(),
        ]);
        let (cleaned, report) = clean_frame(&df, &CleanOptions::new()).expect("clean");
        let city = cleaned.column("city").expect("city");
        assert_eq!(city.get(1).expect("cell"), AnyValue::String("haifa"));
        let note = cleaned.column("note").expect("note");
        assert_eq!(note.get(0).expect("cell"), AnyValue::String(UNKNOWN_CATEGORY));
        assert_eq!(report.imputed[1].strategy, ImputationStrategy::UnknownFallback);
        assert_eq!(report.imputed[1].filled, 3);
    }

    #[test]
    fn empty_numeric_column_stays_nan() {
        let df = frame(vec![
            Series::new("id".into(), vec![1i64, 2]).into(),
            Series::new("empty".into(), vec![None::<f64>, None]).into(),
        ]);
        let (cleaned, report) = clean_frame(&df, &CleanOptions::new()).expect("clean");
        let empty = cleaned.column("empty").expect("empty");
        match empty.get(0).expect("cell") {
            AnyValue::Float64(v) => assert!(v.is_nan()),
            other => panic!("unexpected cell {other:?}"),
        }
        assert_eq!(report.imputed[0].strategy, ImputationStrategy::Undefined);
    }

    #[test]
    fn nan_counts_as_missing() {
        let df = frame(vec![
            Series::new("a".into(), vec![2.0, f64::NAN, 4.0]).into(),
        ]);
        let (cleaned, _) = clean_frame(&df, &CleanOptions::new()).expect("clean");
        let a = cleaned.column("a").expect("a");
        assert_eq!(a.get(1).expect("cell"), AnyValue::Float64(3.0));
    }

    #[test]
    fn skipped_columns_keep_their_gaps() {
        let df = frame(vec![
            Series::new("code_hospital".into(), vec![Some(1i64), None, Some(3)]).into(),
            Series::new("q1".into(), vec![Some(1i64), None, Some(3)]).into(),
        ]);
        let options = CleanOptions::new().skip_column("code_hospital");
        let (cleaned, report) = clean_frame(&df, &options).expect("clean");
        let hospital = cleaned.column("code_hospital").expect("hospital");
        assert_eq!(hospital.get(1).expect("cell"), AnyValue::Null);
        assert_eq!(hospital.dtype(), &DataType::Int64);
        let q1 = cleaned.column("q1").expect("q1");
        assert_eq!(q1.get(1).expect("cell"), AnyValue::Float64(2.0));
        assert_eq!(report.imputed.len(), 1);
    }

    #[test]
    fn input_frame_is_not_mutated() {
        let df = frame(vec![
            Series::new("a".into(), vec![Some(1.0), None]).into(),
        ]);
        let _ = clean_frame(&df, &CleanOptions::new()).expect("clean");
        assert_eq!(df.column("a").expect("a").get(1).expect("cell"), AnyValue::Null);
    }
}
