//! Question column identification.
//!
//! A question column is any column whose name is `q`, one or more ASCII
//! digits, and an optional variant suffix (`q3`, `q21r_2016`, `q5r_dicho`).
//! [`QuestionCode::parse`] is the single predicate used by the metadata
//! builder, the score aggregator and the readable-view builder; they must
//! never disagree on what counts as a question.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// `(?s)` lets the variant span any character so the match agrees with a
/// plain "starts with q and a digit" test even on odd names.
static QUESTION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^q([0-9]+)(.*)$").expect("question pattern is valid"));

/// A parsed question column name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QuestionCode {
    /// The full column name, e.g. `q21r_2016`.
    pub code: String,
    /// The digit group, e.g. `21`. Saturates at `u32::MAX`.
    pub number: u32,
    /// Everything after the digits, e.g. `r_2016`. May be empty.
    pub variant: String,
}

impl QuestionCode {
    /// Parses a column name, returning `None` for non-question columns.
    ///
    /// Detection depends on the name pattern only. A digit group too large
    /// for `u32` still marks a question; its number saturates.
    pub fn parse(name: &str) -> Option<Self> {
        let captures = QUESTION_PATTERN.captures(name)?;
        let number = captures
            .get(1)?
            .as_str()
            .parse::<u32>()
            .unwrap_or(u32::MAX);
        let variant = captures.get(2).map_or("", |m| m.as_str());
        Some(Self {
            code: name.to_string(),
            number,
            variant: variant.to_string(),
        })
    }
}

impl fmt::Display for QuestionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}

/// Returns true when `name` is a question column.
pub fn is_question_column(name: &str) -> bool {
    QuestionCode::parse(name).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_variant_codes() {
        let plain = QuestionCode::parse("q3").expect("q3");
        assert_eq!(plain.number, 3);
        assert_eq!(plain.variant, "");

        let variant = QuestionCode::parse("q21r_2016").expect("q21r_2016");
        assert_eq!(variant.number, 21);
        assert_eq!(variant.variant, "r_2016");

        let dicho = QuestionCode::parse("q5r_dicho").expect("q5r_dicho");
        assert_eq!(dicho.number, 5);
        assert_eq!(dicho.variant, "r_dicho");
    }

    #[test]
    fn leading_zeros_keep_code_but_not_number() {
        let code = QuestionCode::parse("q03").expect("q03");
        assert_eq!(code.number, 3);
        assert_eq!(code.code, "q03");
    }

    #[test]
    fn rejects_non_question_names() {
        for name in ["q", "qa1", "Q1", "question1", "code_hospital", "_q1", ""] {
            assert!(!is_question_column(name), "{name} should not match");
        }
    }

    #[test]
    fn oversized_digit_group_is_still_a_question() {
        let code = QuestionCode::parse("q99999999999").expect("long digit group");
        assert_eq!(code.number, u32::MAX);
        assert_eq!(code.variant, "");
        assert!(is_question_column("q000000000000000000000001x"));
    }

    #[test]
    fn unicode_digits_are_not_question_numbers() {
        assert!(!is_question_column("q\u{0663}"));
    }

    #[test]
    fn variant_may_contain_newlines() {
        let code = QuestionCode::parse("q1\nx").expect("newline variant");
        assert_eq!(code.variant, "\nx");
    }
}
