//! Reference directory path resolution.

use std::path::PathBuf;

/// Environment variable for overriding the reference directory.
pub const REFERENCE_ENV_VAR: &str = "HSAT_REFERENCE_DIR";

pub const VALUE_MAPPINGS_FILE: &str = "value_mappings.toml";
pub const QUESTION_TEXTS_FILE: &str = "question_texts.csv";
pub const HOSPITALS_FILE: &str = "hospitals.csv";

/// Get the reference root directory.
///
/// Resolution order:
/// 1. `HSAT_REFERENCE_DIR` environment variable
/// 2. `reference/` directory relative to workspace root
pub fn reference_root() -> PathBuf {
    if let Ok(root) = std::env::var(REFERENCE_ENV_VAR) {
        return PathBuf::from(root);
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../reference")
}
