//! Polars `AnyValue` conversions.
//!
//! A cell is *missing* when it is null or a floating-point NaN. Every
//! conversion below returns `None` for missing cells so callers never have to
//! special-case NaN themselves.

use polars::prelude::AnyValue;

/// Returns true for null cells and floating-point NaN.
pub fn any_is_missing(value: &AnyValue<'_>) -> bool {
    match value {
        AnyValue::Null => true,
        AnyValue::Float32(v) => v.is_nan(),
        AnyValue::Float64(v) => v.is_nan(),
        _ => false,
    }
}

/// Renders a cell in its canonical text form.
///
/// Integral floats lose their fractional part so that `1.0` and `1` both
/// render as `"1"`. This is the form value-mapping keys are matched against.
///
/// # Examples
///
/// ```
/// use polars::prelude::AnyValue;
/// use hsat_common::any_to_text;
///
/// assert_eq!(any_to_text(&AnyValue::Null), None);
/// assert_eq!(any_to_text(&AnyValue::Float64(2.0)), Some("2".to_string()));
/// assert_eq!(any_to_text(&AnyValue::String("yes")), Some("yes".to_string()));
/// ```
pub fn any_to_text(value: &AnyValue<'_>) -> Option<String> {
    if any_is_missing(value) {
        return None;
    }
    let text = match value {
        AnyValue::Int8(v) => v.to_string(),
        AnyValue::Int16(v) => v.to_string(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::UInt8(v) => v.to_string(),
        AnyValue::UInt16(v) => v.to_string(),
        AnyValue::UInt32(v) => v.to_string(),
        AnyValue::UInt64(v) => v.to_string(),
        AnyValue::Float32(v) => format_numeric(f64::from(*v)),
        AnyValue::Float64(v) => format_numeric(*v),
        AnyValue::String(s) => (*s).to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Boolean(b) => b.to_string(),
        other => other.to_string(),
    };
    Some(text)
}

/// Formats a float without a trailing `.0`.
///
/// Negative zero renders as `"0"`.
///
/// ```
/// use hsat_common::format_numeric;
///
/// assert_eq!(format_numeric(10.0), "10");
/// assert_eq!(format_numeric(3.5), "3.5");
/// assert_eq!(format_numeric(-0.0), "0");
/// ```
pub fn format_numeric(v: f64) -> String {
    if v == 0.0 {
        return "0".to_string();
    }
    // f64's Display never emits trailing fractional zeros.
    format!("{v}")
}

/// Coerces a cell to `f64`.
///
/// Text cells are parsed; anything that does not parse, and any missing
/// cell, yields `None`.
pub fn any_to_f64(value: &AnyValue<'_>) -> Option<f64> {
    let number = match value {
        AnyValue::Int8(v) => f64::from(*v),
        AnyValue::Int16(v) => f64::from(*v),
        AnyValue::Int32(v) => f64::from(*v),
        AnyValue::Int64(v) => *v as f64,
        AnyValue::UInt8(v) => f64::from(*v),
        AnyValue::UInt16(v) => f64::from(*v),
        AnyValue::UInt32(v) => f64::from(*v),
        AnyValue::UInt64(v) => *v as f64,
        AnyValue::Float32(v) => f64::from(*v),
        AnyValue::Float64(v) => *v,
        AnyValue::String(s) => parse_f64(s)?,
        AnyValue::StringOwned(s) => parse_f64(s)?,
        _ => return None,
    };
    if number.is_nan() { None } else { Some(number) }
}

/// Coerces a cell to an integer identifier.
///
/// Floats are accepted only when they carry no fractional part; `4.5` is not
/// a hospital code. Text is parsed as an integer or an integral float.
pub fn any_to_integral(value: &AnyValue<'_>) -> Option<i64> {
    match value {
        AnyValue::Int8(v) => Some(i64::from(*v)),
        AnyValue::Int16(v) => Some(i64::from(*v)),
        AnyValue::Int32(v) => Some(i64::from(*v)),
        AnyValue::Int64(v) => Some(*v),
        AnyValue::UInt8(v) => Some(i64::from(*v)),
        AnyValue::UInt16(v) => Some(i64::from(*v)),
        AnyValue::UInt32(v) => Some(i64::from(*v)),
        AnyValue::UInt64(v) => i64::try_from(*v).ok(),
        AnyValue::Float32(v) => integral_f64(f64::from(*v)),
        AnyValue::Float64(v) => integral_f64(*v),
        AnyValue::String(s) => parse_i64(s).or_else(|| parse_f64(s).and_then(integral_f64)),
        AnyValue::StringOwned(s) => {
            parse_i64(s).or_else(|| parse_f64(s).and_then(integral_f64))
        }
        _ => None,
    }
}

fn integral_f64(v: f64) -> Option<i64> {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 9.0e15 {
        Some(v as i64)
    } else {
        None
    }
}

/// Parses a string as `f64`, returning `None` for invalid or empty strings.
pub fn parse_f64(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

/// Parses a string as `i64`, returning `None` for invalid or empty strings.
pub fn parse_i64(value: &str) -> Option<i64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<i64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_covers_null_and_nan() {
        assert!(any_is_missing(&AnyValue::Null));
        assert!(any_is_missing(&AnyValue::Float64(f64::NAN)));
        assert!(!any_is_missing(&AnyValue::Float64(0.0)));
        assert!(!any_is_missing(&AnyValue::String("")));
    }

    #[test]
    fn text_of_numbers_is_canonical() {
        assert_eq!(any_to_text(&AnyValue::Int64(7)), Some("7".to_string()));
        assert_eq!(any_to_text(&AnyValue::Float64(7.0)), Some("7".to_string()));
        assert_eq!(any_to_text(&AnyValue::Float64(7.25)), Some("7.25".to_string()));
        assert_eq!(any_to_text(&AnyValue::Float64(f64::NAN)), None);
        assert_eq!(any_to_text(&AnyValue::Boolean(true)), Some("true".to_string()));
    }

    #[test]
    fn format_numeric_keeps_significant_zeros() {
        assert_eq!(format_numeric(10.0), "10");
        assert_eq!(format_numeric(100.0), "100");
        assert_eq!(format_numeric(0.5), "0.5");
    }

    #[test]
    fn f64_coercion_parses_text() {
        assert_eq!(any_to_f64(&AnyValue::String(" 4 ")), Some(4.0));
        assert_eq!(any_to_f64(&AnyValue::String("n/a")), None);
        assert_eq!(any_to_f64(&AnyValue::Int32(3)), Some(3.0));
        assert_eq!(any_to_f64(&AnyValue::Float64(f64::NAN)), None);
        assert_eq!(any_to_f64(&AnyValue::Null), None);
    }

    #[test]
    fn integral_rejects_fractions() {
        assert_eq!(any_to_integral(&AnyValue::Float64(12.0)), Some(12));
        assert_eq!(any_to_integral(&AnyValue::Float64(12.5)), None);
        assert_eq!(any_to_integral(&AnyValue::Float64(f64::NAN)), None);
        assert_eq!(any_to_integral(&AnyValue::String("3")), Some(3));
        assert_eq!(any_to_integral(&AnyValue::String("3.0")), Some(3));
        assert_eq!(any_to_integral(&AnyValue::String("three")), None);
    }

    #[test]
    fn parse_helpers_trim() {
        assert_eq!(parse_f64("  "), None);
        assert_eq!(parse_f64(" 2.5 "), Some(2.5));
        assert_eq!(parse_i64(" -4 "), Some(-4));
        assert_eq!(parse_i64("4.0"), None);
    }
}
