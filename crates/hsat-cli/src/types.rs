use std::path::PathBuf;

use hsat_model::{HospitalDirectory, PipelineOptions};
use hsat_output::RunManifest;
use hsat_transform::HospitalScores;

/// Inputs for one `hsat run`.
#[derive(Debug, Clone)]
pub struct RunRequest {
    /// A survey export, or a directory holding exactly one.
    pub input: PathBuf,
    pub output_dir: Option<PathBuf>,
    pub reference_dir: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub hospital_column: Option<String>,
    pub dry_run: bool,
}

impl RunRequest {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output_dir: None,
            reference_dir: None,
            config: None,
            hospital_column: None,
            dry_run: false,
        }
    }
}

#[derive(Debug)]
pub struct RunResult {
    /// The survey file actually read.
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub dry_run: bool,
    pub options: PipelineOptions,
    pub scores: HospitalScores,
    pub hospitals: HospitalDirectory,
    pub manifest: RunManifest,
    /// `None` on a dry run.
    pub manifest_path: Option<PathBuf>,
}

/// Aggregate view of the hospitals' overall averages.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverallStats {
    /// Hospitals with an overall average.
    pub hospitals: usize,
    pub mean: f64,
    pub max: f64,
    pub min: f64,
}

impl OverallStats {
    /// `None` when no hospital has an overall average.
    pub fn from_scores(scores: &HospitalScores) -> Option<Self> {
        let averages: Vec<f64> = scores
            .rows
            .iter()
            .filter_map(|row| row.overall_average)
            .collect();
        if averages.is_empty() {
            return None;
        }
        let mean = averages.iter().sum::<f64>() / averages.len() as f64;
        let max = averages.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let min = averages.iter().copied().fold(f64::INFINITY, f64::min);
        Some(Self {
            hospitals: averages.len(),
            mean,
            max,
            min,
        })
    }
}
