//! Shared utilities for the hospital satisfaction crates.
//!
//! Survey cells arrive as a mix of integers, floats and free text. The
//! helpers here give every stage the same reading of a Polars `AnyValue`.

pub mod values;

pub use values::{
    any_is_missing, any_to_f64, any_to_integral, any_to_text, format_numeric, parse_f64,
    parse_i64,
};
