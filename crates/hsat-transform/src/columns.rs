//! Column name normalization.
//!
//! Spreadsheet headers arrive with mixed case, stray punctuation and
//! repeated names. Normalization turns them into stable identifiers:
//!
//! 1. trim, lower-case, collapse whitespace runs to `_`
//! 2. drop every character outside `[0-9a-zA-Z_]`
//! 3. blank or underscore-only results become `unnamed`
//! 4. repeats get `__1`, `__2`, ... in order of appearance
//!
//! Normalization never fails; collisions are reported, not raised.

use std::collections::{HashMap, HashSet};

use polars::prelude::DataFrame;
use serde::Serialize;
use tracing::warn;

use crate::error::Result;
use crate::frame_utils::column_names;

const UNNAMED: &str = "unnamed";

/// Result of normalizing one header sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ColumnNormalization {
    /// Normalized names, same length and order as the input.
    pub columns: Vec<String>,
    /// Base names that needed a `__{n}` suffix, in first-collision order.
    pub collisions: Vec<String>,
}

/// Canonicalize a single header without de-duplication.
pub fn canonical_name(raw: &str) -> String {
    let lowered = raw.trim().to_lowercase();
    let mut out = String::with_capacity(lowered.len());
    let mut in_whitespace = false;
    for ch in lowered.chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                out.push('_');
                in_whitespace = true;
            }
            continue;
        }
        in_whitespace = false;
        if ch.is_ascii_alphanumeric() || ch == '_' {
            out.push(ch);
        }
    }
    if out.chars().all(|ch| ch == '_') {
        UNNAMED.to_string()
    } else {
        out
    }
}

/// Normalize a header sequence into unique identifiers.
///
/// The first occurrence of a name keeps it bare; later occurrences get
/// `__1`, `__2`, ... A suffixed candidate that is already taken (because the
/// input literally contained it) is skipped so the output stays unique.
pub fn normalize_column_names<S: AsRef<str>>(headers: &[S]) -> ColumnNormalization {
    let mut taken: HashSet<String> = HashSet::with_capacity(headers.len());
    let mut counters: HashMap<String, usize> = HashMap::new();
    let mut columns = Vec::with_capacity(headers.len());
    let mut collisions: Vec<String> = Vec::new();

    for header in headers {
        let base = canonical_name(header.as_ref());
        let name = if taken.contains(&base) {
            if !collisions.contains(&base) {
                collisions.push(base.clone());
            }
            let counter = counters.entry(base.clone()).or_insert(0);
            loop {
                *counter += 1;
                let candidate = format!("{base}__{counter}");
                if !taken.contains(&candidate) {
                    break candidate;
                }
            }
        } else {
            base
        };
        taken.insert(name.clone());
        columns.push(name);
    }

    if !collisions.is_empty() {
        warn!(columns = ?collisions, "resolved duplicate column names");
    }
    ColumnNormalization {
        columns,
        collisions,
    }
}

/// Return a copy of `df` with normalized column names.
pub fn normalize_frame_columns(df: &DataFrame) -> Result<(DataFrame, ColumnNormalization)> {
    let normalization = normalize_column_names(&column_names(df));
    let mut renamed = df.clone();
    renamed.set_column_names(normalization.columns.iter().map(String::as_str))?;
    Ok((renamed, normalization))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonicalizes_case_space_and_punctuation() {
        assert_eq!(canonical_name("  Code Hospital "), "code_hospital");
        assert_eq!(canonical_name("Q1 (a)"), "q1_a");
        assert_eq!(canonical_name("a \t\n b"), "a_b");
        assert_eq!(canonical_name("Q21R_2016"), "q21r_2016");
        assert_eq!(canonical_name("מחלקה"), UNNAMED);
        assert_eq!(canonical_name("__"), UNNAMED);
        assert_eq!(canonical_name(""), UNNAMED);
        assert_eq!(canonical_name("   "), UNNAMED);
    }

    #[test]
    fn punctuation_between_spaces_leaves_both_underscores() {
        assert_eq!(canonical_name("a - b"), "a__b");
    }

    #[test]
    fn first_duplicate_gets_suffix_one() {
        let result = normalize_column_names(&["Q1", "q1", " Q1 ", "x"]);
        assert_eq!(result.columns, vec!["q1", "q1__1", "q1__2", "x"]);
        assert_eq!(result.collisions, vec!["q1"]);
    }

    #[test]
    fn unnamed_columns_are_numbered() {
        let result = normalize_column_names(&["", "?", "***"]);
        assert_eq!(result.columns, vec!["unnamed", "unnamed__1", "unnamed__2"]);
        assert_eq!(result.collisions, vec!["unnamed"]);
    }

    #[test]
    fn suffix_skips_names_already_present() {
        let result = normalize_column_names(&["a__1", "a", "a", "a__1"]);
        assert_eq!(result.columns, vec!["a__1", "a", "a__2", "a__1__1"]);
        assert_eq!(result.collisions, vec!["a", "a__1"]);
    }

    #[test]
    fn no_collisions_reported_for_unique_names() {
        let result = normalize_column_names(&["a", "b"]);
        assert!(result.collisions.is_empty());
    }
}
