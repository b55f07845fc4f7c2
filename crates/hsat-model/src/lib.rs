//! Data model for the hospital satisfaction pipeline.
//!
//! Everything here is plain data: the raw extracted table, question
//! identifiers, reference tables and pipeline options. Polars-backed
//! processing lives in `hsat-transform`.

pub mod metadata;
pub mod options;
pub mod question;
pub mod reference;
pub mod table;

pub use metadata::QuestionMetadata;
pub use options::PipelineOptions;
pub use question::{QuestionCode, is_question_column};
pub use reference::{Hospital, HospitalDirectory, MappedValue, QuestionTexts, ValueMappings};
pub use table::RawTable;
