//! `hsat run` orchestration: resolve inputs, run the transform stages and
//! persist the results.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use polars::prelude::DataFrame;
use tracing::{info, info_span, warn};

use hsat_ingest::{list_survey_files, read_survey_table};
use hsat_model::{HospitalDirectory, PipelineOptions};
use hsat_output::{CsvTableSink, RunManifest, TableSink, render_readable_view, write_manifest};
use hsat_reference::{load_reference_data, reference_root};
use hsat_transform::{PipelineOutput, SurveyPipeline, canonical_name};

use crate::types::{RunRequest, RunResult};

/// Pipeline options from an optional TOML file, with CLI overrides applied.
///
/// The hospital column is canonicalized the same way dataset headers are,
/// so `Code Hospital` names the `code_hospital` column.
pub fn load_options(config: Option<&Path>, hospital_column: Option<&str>) -> Result<PipelineOptions> {
    let mut options = match config {
        Some(path) => {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("read config {}", path.display()))?;
            toml::from_str::<PipelineOptions>(&contents)
                .with_context(|| format!("parse config {}", path.display()))?
        }
        None => PipelineOptions::default(),
    };
    if let Some(column) = hospital_column {
        options.hospital_column = column.to_string();
    }
    options.hospital_column = canonical_name(&options.hospital_column);
    Ok(options)
}

/// `--reference-dir`, else the environment override, else the bundled data.
pub fn resolve_reference_dir(flag: Option<&Path>) -> PathBuf {
    flag.map_or_else(reference_root, Path::to_path_buf)
}

/// The survey file to read: `input` itself, or the single export in it.
pub fn resolve_input(input: &Path) -> Result<PathBuf> {
    if !input.is_dir() {
        return Ok(input.to_path_buf());
    }
    let files = list_survey_files(input)?;
    match files.as_slice() {
        [] => bail!("no survey files found in {}", input.display()),
        [single] => Ok(single.clone()),
        many => {
            let names: Vec<String> = many.iter().map(|p| p.display().to_string()).collect();
            bail!(
                "{} holds {} survey files; pass one of: {}",
                input.display(),
                many.len(),
                names.join(", ")
            )
        }
    }
}

/// `<input dir>/output` when no output directory was given.
pub fn default_output_dir(input: &Path) -> PathBuf {
    let base = if input.is_dir() {
        input
    } else {
        input.parent().unwrap_or_else(|| Path::new("."))
    };
    base.join("output")
}

pub fn run_pipeline(request: &RunRequest) -> Result<RunResult> {
    let options = load_options(request.config.as_deref(), request.hospital_column.as_deref())?;
    let reference_dir = resolve_reference_dir(request.reference_dir.as_deref());
    let reference = load_reference_data(&reference_dir)
        .with_context(|| format!("load reference data from {}", reference_dir.display()))?;

    let input = resolve_input(&request.input)?;
    let output_dir = request
        .output_dir
        .clone()
        .unwrap_or_else(|| default_output_dir(&request.input));
    let span = info_span!("run", input = %input.display());
    let _guard = span.enter();

    let start = Instant::now();
    let table = read_survey_table(&input).context("read survey export")?;
    let pipeline = SurveyPipeline::new(
        &reference.value_mappings,
        &reference.question_texts,
        &options,
    );
    let mut output = pipeline.run_table(&table).context("transform survey data")?;
    info!(
        duration_ms = start.elapsed().as_millis(),
        hospitals = output.scores.len(),
        "transform complete"
    );
    warn_on_unknown_hospitals(&output, &reference.hospitals);

    let mut manifest = RunManifest::new(
        &input,
        &output.report,
        output.scores.excluded_records,
    );
    let manifest_path = if request.dry_run {
        record_tables(&output, &options, &mut manifest);
        info!("dry run: no files written");
        None
    } else {
        let mut sink = CsvTableSink::new(&output_dir);
        persist_outputs(&mut output, &options, &mut sink, &mut manifest)?;
        Some(write_manifest(&output_dir, &manifest).context("write run manifest")?)
    };

    Ok(RunResult {
        input,
        output_dir,
        dry_run: request.dry_run,
        options,
        scores: output.scores,
        hospitals: reference.hospitals,
        manifest,
        manifest_path,
    })
}

fn warn_on_unknown_hospitals(output: &PipelineOutput, hospitals: &HospitalDirectory) {
    let unknown: Vec<i64> = output
        .scores
        .rows
        .iter()
        .map(|row| row.hospital_code)
        .filter(|code| hospitals.get(*code).is_none())
        .collect();
    if !unknown.is_empty() {
        warn!(codes = ?unknown, "hospital codes missing from the hospital directory");
    }
}

/// The three tables in write order, with their configured names.
fn tables<'a>(
    output: &'a mut PipelineOutput,
    options: &'a PipelineOptions,
) -> [(&'a str, &'a mut DataFrame); 3] {
    [
        (options.dataset_table.as_str(), &mut output.dataset),
        (options.questions_table.as_str(), &mut output.questions_frame),
        (options.scores_table.as_str(), &mut output.scores_frame),
    ]
}

fn record_tables(output: &PipelineOutput, options: &PipelineOptions, manifest: &mut RunManifest) {
    for (name, df) in [
        (&options.dataset_table, &output.dataset),
        (&options.questions_table, &output.questions_frame),
        (&options.scores_table, &output.scores_frame),
    ] {
        manifest.add_table(name, df.height(), df.width(), None);
    }
}

/// Write every table and the readable view through `sink`.
///
/// The first failure stops the run; nothing is retried.
pub fn persist_outputs(
    output: &mut PipelineOutput,
    options: &PipelineOptions,
    sink: &mut dyn TableSink,
    manifest: &mut RunManifest,
) -> Result<()> {
    let ddl = render_readable_view(&options.dataset_table, &options.readable_view, &output.aliases);
    for (name, df) in tables(output, options) {
        let path = sink
            .replace_table(name, df)
            .with_context(|| format!("write table {name}"))?;
        manifest.add_table(name, df.height(), df.width(), Some(path.as_path()));
    }
    sink.replace_view(&options.readable_view, &ddl)
        .with_context(|| format!("write view {}", options.readable_view))?;
    manifest.readable_view = Some(options.readable_view.clone());
    Ok(())
}
