//! DataFrame construction from raw survey cells.
//!
//! Each column gets the narrowest type its non-empty cells allow:
//! integer, then float, then text. Empty cells become null. A column with no
//! values at all is built as a float column of nulls.

use polars::prelude::{Column, DataFrame, NamedFrom, Series};
use tracing::debug;

use hsat_common::{parse_f64, parse_i64};
use hsat_model::RawTable;

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InferredType {
    Integer,
    Float,
    Text,
}

fn infer_type<'a>(cells: impl Iterator<Item = &'a str>) -> InferredType {
    let mut inferred = InferredType::Integer;
    for cell in cells.filter(|cell| !cell.is_empty()) {
        match inferred {
            InferredType::Integer if parse_i64(cell).is_some() => {}
            InferredType::Integer | InferredType::Float if parse_f64(cell).is_some() => {
                inferred = InferredType::Float;
            }
            _ => return InferredType::Text,
        }
    }
    inferred
}

/// Build a typed frame from `table`, naming columns with `headers`.
///
/// `headers` is normally the normalized form of `table.headers` and must
/// have the same length.
pub fn build_frame(headers: &[String], table: &RawTable) -> Result<DataFrame> {
    let row_count = table.row_count();
    let mut columns: Vec<Column> = Vec::with_capacity(headers.len());
    for (col, name) in headers.iter().enumerate() {
        let cells = || (0..row_count).map(move |row| table.cell(row, col));
        let all_empty = cells().all(str::is_empty);
        let inferred = infer_type(cells());
        let series = if all_empty {
            Series::new(name.as_str().into(), vec![None::<f64>; row_count])
        } else {
            match inferred {
                InferredType::Integer => {
                    let values: Vec<Option<i64>> = cells().map(parse_i64).collect();
                    Series::new(name.as_str().into(), values)
                }
                InferredType::Float => {
                    let values: Vec<Option<f64>> = cells().map(parse_f64).collect();
                    Series::new(name.as_str().into(), values)
                }
                InferredType::Text => {
                    let values: Vec<Option<&str>> = cells()
                        .map(|cell| (!cell.is_empty()).then_some(cell))
                        .collect();
                    Series::new(name.as_str().into(), values)
                }
            }
        };
        debug!(column = %name, inferred = ?inferred, empty = all_empty, "column typed");
        columns.push(series.into());
    }
    let frame = DataFrame::new(columns)?;
    Ok(frame)
}
