//! Display aliases for the readable view.
//!
//! Question columns with reference text are relabelled
//! `q{number}{variant}__{text}`; everything else keeps its physical name.

use serde::Serialize;

use hsat_model::{QuestionCode, QuestionTexts};

const MAX_TEXT_CHARS: usize = 80;
const TRUNCATED_CHARS: usize = 77;

/// A physical column and the name it is shown under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnAlias {
    pub column: String,
    pub alias: String,
}

impl ColumnAlias {
    pub fn is_renamed(&self) -> bool {
        self.column != self.alias
    }
}

fn shorten(text: &str) -> String {
    let flat = text.replace('\n', " ");
    let flat = flat.trim();
    if flat.chars().count() > MAX_TEXT_CHARS {
        let head: String = flat.chars().take(TRUNCATED_CHARS).collect();
        format!("{head}...")
    } else {
        flat.to_string()
    }
}

/// Alias for one column.
pub fn alias_for_column(column: &str, texts: &QuestionTexts) -> String {
    let Some(code) = QuestionCode::parse(column) else {
        return column.to_string();
    };
    match texts.get(code.number) {
        Some(text) if !text.trim().is_empty() => {
            format!("q{}{}__{}", code.number, code.variant, shorten(text))
        }
        _ => column.to_string(),
    }
}

/// Aliases for `columns`, in the same order.
pub fn readable_aliases<S: AsRef<str>>(columns: &[S], texts: &QuestionTexts) -> Vec<ColumnAlias> {
    columns
        .iter()
        .map(|column| ColumnAlias {
            column: column.as_ref().to_string(),
            alias: alias_for_column(column.as_ref(), texts),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_question_columns_pass_through() {
        let texts = QuestionTexts::new().with(1, "Overall");
        assert_eq!(alias_for_column("gender", &texts), "gender");
        assert_eq!(alias_for_column("quality", &texts), "quality");
        assert_eq!(alias_for_column("q2", &texts), "q2");
    }

    #[test]
    fn question_with_text_gets_alias() {
        let texts = QuestionTexts::new().with(21, "How clean was\nthe room?");
        assert_eq!(
            alias_for_column("q21r_2016", &texts),
            "q21r_2016__How clean was the room?"
        );
    }

    #[test]
    fn long_text_is_truncated_to_77_chars() {
        let long = "x".repeat(81);
        let texts = QuestionTexts::new().with(3, long).with(4, "y".repeat(80));
        let alias = alias_for_column("q3", &texts);
        assert_eq!(alias, format!("q3__{}...", "x".repeat(77)));
        assert_eq!(alias_for_column("q4", &texts), format!("q4__{}", "y".repeat(80)));
    }

    #[test]
    fn leading_zeros_are_dropped_from_alias_number() {
        let texts = QuestionTexts::new().with(7, "Food");
        assert_eq!(alias_for_column("q07", &texts), "q7__Food");
    }

    #[test]
    fn aliases_keep_column_order() {
        let texts = QuestionTexts::new().with(1, "Overall");
        let aliases = readable_aliases(&["q1", "age"], &texts);
        assert!(aliases[0].is_renamed());
        assert!(!aliases[1].is_renamed());
        assert_eq!(aliases[1].alias, "age");
    }
}
