//! DataFrame value extraction shared by the stages.

use polars::prelude::{AnyValue, Column, DataFrame, DataType};

use hsat_common::{any_is_missing, any_to_f64, any_to_integral, any_to_text};

/// Names of all columns in frame order.
pub(crate) fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_columns()
        .iter()
        .map(|column| column.name().to_string())
        .collect()
}

pub(crate) fn is_numeric_dtype(dtype: &DataType) -> bool {
    is_integer_dtype(dtype) || matches!(dtype, DataType::Float32 | DataType::Float64)
}

pub(crate) fn is_integer_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
    )
}

pub(crate) fn cell(column: &Column, idx: usize) -> AnyValue<'_> {
    column.get(idx).unwrap_or(AnyValue::Null)
}

/// Canonical text of every cell; missing cells are `None`.
pub(crate) fn text_values(column: &Column) -> Vec<Option<String>> {
    (0..column.len())
        .map(|idx| any_to_text(&cell(column, idx)))
        .collect()
}

/// Numeric coercion of every cell; unparseable and missing cells are `None`.
pub(crate) fn numeric_values(column: &Column) -> Vec<Option<f64>> {
    (0..column.len())
        .map(|idx| any_to_f64(&cell(column, idx)))
        .collect()
}

/// Integer coercion of every cell; non-integral and missing cells are `None`.
pub(crate) fn integral_values(column: &Column) -> Vec<Option<i64>> {
    (0..column.len())
        .map(|idx| any_to_integral(&cell(column, idx)))
        .collect()
}

pub(crate) fn missing_count(column: &Column) -> usize {
    (0..column.len())
        .filter(|idx| any_is_missing(&cell(column, *idx)))
        .count()
}
