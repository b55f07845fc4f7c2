//! Survey export ingestion.
//!
//! Reads a delimited export of the survey sheet into a [`RawTable`] without
//! interpreting header names or cell types; both are the transform
//! pipeline's job.
//!
//! [`RawTable`]: hsat_model::RawTable

pub mod csv_table;
pub mod discovery;
pub mod error;

pub use csv_table::{read_survey_table, read_survey_table_with_delimiter};
pub use discovery::list_survey_files;
pub use error::{IngestError, Result};
