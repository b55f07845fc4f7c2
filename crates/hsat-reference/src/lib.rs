#![deny(unsafe_code)]

pub mod csv_utils;
pub mod error;
pub mod loaders;
pub mod paths;

pub use crate::error::{ReferenceError, Result};
pub use crate::loaders::{
    ReferenceData, load_default_reference_data, load_hospitals, load_question_texts,
    load_reference_data, load_value_mappings,
};
pub use crate::paths::{
    HOSPITALS_FILE, QUESTION_TEXTS_FILE, REFERENCE_ENV_VAR, VALUE_MAPPINGS_FILE, reference_root,
};
