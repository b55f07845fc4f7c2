//! Question metadata derived from column names.

use std::collections::BTreeSet;

use polars::prelude::{DataFrame, NamedFrom, Series};
use tracing::debug;

use hsat_model::{QuestionCode, QuestionMetadata, QuestionTexts};

use crate::error::Result;

/// One metadata row per distinct question column, sorted by
/// `(question_number, question_code)`.
///
/// Columns that are not questions are ignored. A number without reference
/// text gets `question_text: None`.
pub fn build_question_metadata<S: AsRef<str>>(
    columns: &[S],
    texts: &QuestionTexts,
) -> Vec<QuestionMetadata> {
    let codes: BTreeSet<(u32, String, String)> = columns
        .iter()
        .filter_map(|name| QuestionCode::parse(name.as_ref()))
        .map(|code| (code.number, code.code, code.variant))
        .collect();
    let metadata: Vec<QuestionMetadata> = codes
        .into_iter()
        .map(|(number, code, variant)| QuestionMetadata {
            question_code: code,
            question_number: number,
            variant,
            question_text: texts.get(number).map(str::to_string),
        })
        .collect();
    debug!(
        questions = metadata.len(),
        without_text = metadata.iter().filter(|m| m.question_text.is_none()).count(),
        "question metadata built"
    );
    metadata
}

/// The `question_texts` output table.
pub fn question_metadata_frame(metadata: &[QuestionMetadata]) -> Result<DataFrame> {
    let codes: Vec<&str> = metadata.iter().map(|m| m.question_code.as_str()).collect();
    let numbers: Vec<i64> = metadata
        .iter()
        .map(|m| i64::from(m.question_number))
        .collect();
    let variants: Vec<&str> = metadata.iter().map(|m| m.variant.as_str()).collect();
    let texts: Vec<Option<&str>> = metadata
        .iter()
        .map(|m| m.question_text.as_deref())
        .collect();
    let frame = DataFrame::new(vec![
        Series::new("question_code".into(), codes).into(),
        Series::new("question_number".into(), numbers).into(),
        Series::new("variant".into(), variants).into(),
        Series::new("question_text".into(), texts).into(),
    ])?;
    Ok(frame)
}

#[cfg(test)]
mod tests {
    use polars::prelude::AnyValue;

    use super::*;

    #[test]
    fn sorts_by_number_then_code_and_collapses_duplicates() {
        let texts = QuestionTexts::new().with(2, "Staff courtesy").with(10, "Discharge");
        let columns = ["q10", "gender", "q2r", "q2", "q10", "q1_dicho"];
        let metadata = build_question_metadata(&columns, &texts);
        let codes: Vec<&str> = metadata.iter().map(|m| m.question_code.as_str()).collect();
        assert_eq!(codes, vec!["q1_dicho", "q2", "q2r", "q10"]);
        assert_eq!(metadata[0].question_text, None);
        assert_eq!(metadata[0].variant, "_dicho");
        assert_eq!(metadata[1].question_text.as_deref(), Some("Staff courtesy"));
        assert_eq!(metadata[2].question_text.as_deref(), Some("Staff courtesy"));
        assert_eq!(metadata[2].variant, "r");
    }

    #[test]
    fn frame_has_expected_columns() {
        let texts = QuestionTexts::new().with(1, "Overall");
        let metadata = build_question_metadata(&["q1", "q3"], &texts);
        let frame = question_metadata_frame(&metadata).expect("frame");
        let names: Vec<String> = frame
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();
        assert_eq!(
            names,
            vec!["question_code", "question_number", "variant", "question_text"]
        );
        let text = frame.column("question_text").expect("text");
        assert_eq!(text.get(1).expect("cell"), AnyValue::Null);
        let number = frame.column("question_number").expect("number");
        assert_eq!(number.get(1).expect("cell"), AnyValue::Int64(3));
    }

    #[test]
    fn empty_input_gives_empty_frame() {
        let metadata = build_question_metadata::<&str>(&[], &QuestionTexts::new());
        assert!(metadata.is_empty());
        let frame = question_metadata_frame(&metadata).expect("frame");
        assert_eq!(frame.height(), 0);
        assert_eq!(frame.width(), 4);
    }
}
