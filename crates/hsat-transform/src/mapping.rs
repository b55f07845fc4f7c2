//! Value recoding.
//!
//! Replaces raw survey codes with their semantic values, one column at a
//! time, from a static [`ValueMappings`] table. Cells whose value is not a
//! key are left as they were; missing cells stay missing.

use std::collections::BTreeMap;

use polars::prelude::{AnyValue, Column, DataFrame, NamedFrom, Series};
use serde::Serialize;
use tracing::{debug, info, warn};

use hsat_common::{any_is_missing, any_to_f64, any_to_text};
use hsat_model::{MappedValue, ValueMappings};

use crate::error::Result;
use crate::frame_utils::{cell, is_integer_dtype, is_numeric_dtype};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MappedColumn {
    pub column: String,
    /// Cells whose value was a mapping key.
    pub replaced: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MappingReport {
    pub applied: Vec<MappedColumn>,
    /// Mapping columns with no counterpart in the dataset.
    pub missing_columns: Vec<String>,
}

/// Apply `mappings` to a copy of `df`.
pub fn apply_value_mappings(
    df: &DataFrame,
    mappings: &ValueMappings,
) -> Result<(DataFrame, MappingReport)> {
    let mut mapped = df.clone();
    let mut report = MappingReport::default();
    for (name, table) in mappings.columns() {
        let Ok(column) = df.column(name) else {
            report.missing_columns.push(name.to_string());
            continue;
        };
        let (series, replaced) = map_column(column, table);
        if let Some(series) = series {
            mapped.with_column(series)?;
        }
        debug!(column = %name, replaced, "value mapping applied");
        report.applied.push(MappedColumn {
            column: name.to_string(),
            replaced,
        });
    }
    if !report.missing_columns.is_empty() {
        warn!(
            columns = ?report.missing_columns,
            "mapping columns not present in dataset"
        );
    }
    info!(
        columns = report.applied.len(),
        replaced = report.applied.iter().map(|c| c.replaced).sum::<usize>(),
        "value mapping complete"
    );
    Ok((mapped, report))
}

/// Recode one column. Returns `None` for the series when nothing matched.
fn map_column(column: &Column, table: &BTreeMap<String, MappedValue>) -> (Option<Series>, usize) {
    let lookups: Vec<Option<&MappedValue>> = (0..column.len())
        .map(|idx| any_to_text(&cell(column, idx)).and_then(|text| table.get(&text)))
        .collect();
    let replaced = lookups.iter().flatten().count();
    if replaced == 0 {
        return (None, 0);
    }

    let name = column.name().clone();
    let dtype = column.dtype();
    let used = || lookups.iter().flatten();
    let series = if is_numeric_dtype(dtype) && used().all(|value| value.is_numeric()) {
        if is_integer_dtype(dtype) && used().all(|value| matches!(value, MappedValue::Integer(_)))
        {
            let values: Vec<Option<i64>> = lookups
                .iter()
                .enumerate()
                .map(|(idx, hit)| match hit {
                    Some(MappedValue::Integer(v)) => Some(*v),
                    _ => original_i64(&cell(column, idx)),
                })
                .collect();
            Series::new(name, values)
        } else {
            let values: Vec<Option<f64>> = lookups
                .iter()
                .enumerate()
                .map(|(idx, hit)| match hit {
                    Some(value) => value.as_f64(),
                    None => original_f64(&cell(column, idx)),
                })
                .collect();
            Series::new(name, values)
        }
    } else {
        let values: Vec<Option<String>> = lookups
            .iter()
            .enumerate()
            .map(|(idx, hit)| match hit {
                Some(value) => Some(value.to_string()),
                None => any_to_text(&cell(column, idx)),
            })
            .collect();
        Series::new(name, values)
    };
    (Some(series), replaced)
}

fn original_i64(value: &AnyValue<'_>) -> Option<i64> {
    match value {
        AnyValue::Int64(v) => Some(*v),
        other => any_to_f64(other).map(|v| v as i64),
    }
}

/// Keeps NaN as NaN so a missing float cell stays the same kind of missing.
fn original_f64(value: &AnyValue<'_>) -> Option<f64> {
    match value {
        AnyValue::Null => None,
        other if any_is_missing(other) => Some(f64::NAN),
        other => any_to_f64(other),
    }
}

#[cfg(test)]
mod tests {
    use polars::prelude::DataType;

    use super::*;

    fn mappings() -> ValueMappings {
        ValueMappings::new()
            .with("gender", "1", "male")
            .with("gender", "2", "female")
            .with("q5", "1", 5i64)
            .with("q5", "5", 1i64)
            .with("q6", "1", 0.5)
            .with("region", "1", "north")
    }

    fn frame() -> DataFrame {
        DataFrame::new(vec![
            Series::new("gender".into(), vec![Some(1i64), Some(2), Some(3), None]).into(),
            Series::new("q5".into(), vec![Some(1i64), Some(5), Some(3), None]).into(),
            Series::new("q6".into(), vec![Some(1i64), Some(2), Some(3), Some(4)]).into(),
        ])
        .expect("frame")
    }

    #[test]
    fn text_mapping_turns_column_into_strings() {
        let (mapped, _) = apply_value_mappings(&frame(), &mappings()).expect("map");
        let gender = mapped.column("gender").expect("gender");
        assert_eq!(gender.dtype(), &DataType::String);
        assert_eq!(gender.get(0).expect("cell"), AnyValue::String("male"));
        assert_eq!(gender.get(2).expect("cell"), AnyValue::String("3"));
        assert_eq!(gender.get(3).expect("cell"), AnyValue::Null);
    }

    #[test]
    fn integer_mapping_keeps_integer_column() {
        let (mapped, _) = apply_value_mappings(&frame(), &mappings()).expect("map");
        let q5 = mapped.column("q5").expect("q5");
        assert_eq!(q5.dtype(), &DataType::Int64);
        assert_eq!(q5.get(0).expect("cell"), AnyValue::Int64(5));
        assert_eq!(q5.get(1).expect("cell"), AnyValue::Int64(1));
        assert_eq!(q5.get(2).expect("cell"), AnyValue::Int64(3));
        assert_eq!(q5.get(3).expect("cell"), AnyValue::Null);
    }

    #[test]
    fn float_mapping_widens_to_float() {
        let (mapped, _) = apply_value_mappings(&frame(), &mappings()).expect("map");
        let q6 = mapped.column("q6").expect("q6");
        assert_eq!(q6.dtype(), &DataType::Float64);
        assert_eq!(q6.get(0).expect("cell"), AnyValue::Float64(0.5));
        assert_eq!(q6.get(1).expect("cell"), AnyValue::Float64(2.0));
    }

    #[test]
    fn float_cells_match_integer_keys() {
        let df = DataFrame::new(vec![
            Series::new("gender".into(), vec![Some(1.0), Some(2.5), None]).into(),
        ])
        .expect("frame");
        let (mapped, report) = apply_value_mappings(&df, &mappings()).expect("map");
        let gender = mapped.column("gender").expect("gender");
        assert_eq!(gender.get(0).expect("cell"), AnyValue::String("male"));
        assert_eq!(gender.get(1).expect("cell"), AnyValue::String("2.5"));
        assert_eq!(report.applied[0].replaced, 1);
    }

    #[test]
    fn absent_columns_are_reported() {
        let (_, report) = apply_value_mappings(&frame(), &mappings()).expect("map");
        assert_eq!(report.missing_columns, vec!["region".to_string()]);
        let columns: Vec<&str> = report.applied.iter().map(|c| c.column.as_str()).collect();
        assert_eq!(columns, vec!["gender", "q5", "q6"]);
    }

    #[test]
    fn column_without_hits_is_untouched() {
        let df = DataFrame::new(vec![
            Series::new("gender".into(), vec![Some(7i64), None]).into(),
        ])
        .expect("frame");
        let (mapped, report) = apply_value_mappings(&df, &mappings()).expect("map");
        assert_eq!(mapped.column("gender").expect("gender").dtype(), &DataType::Int64);
        assert_eq!(report.applied[0].replaced, 0);
    }
}
