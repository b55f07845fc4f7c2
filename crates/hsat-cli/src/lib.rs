//! CLI library components for the survey pipeline.

pub mod logging;
pub mod pipeline;
pub mod types;
