use serde::{Deserialize, Serialize};

/// One row of the `question_texts` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionMetadata {
    pub question_code: String,
    pub question_number: u32,
    pub variant: String,
    /// Human-readable text from the reference table, if the number is known.
    pub question_text: Option<String>,
}
