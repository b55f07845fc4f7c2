use std::path::Path;

use anyhow::{Context, Result};
use comfy_table::{Cell, CellAlignment, Table};

use hsat_cli::pipeline::{resolve_reference_dir, run_pipeline};
use hsat_cli::types::{RunRequest, RunResult};
use hsat_reference::{HOSPITALS_FILE, QUESTION_TEXTS_FILE, load_hospitals, load_question_texts};

use crate::cli::RunArgs;
use crate::summary::{apply_table_style, dim_cell, header_cell};

pub fn run_run(args: &RunArgs, reference_dir: Option<&Path>) -> Result<RunResult> {
    let request = RunRequest {
        input: args.input.clone(),
        output_dir: args.output_dir.clone(),
        reference_dir: reference_dir.map(Path::to_path_buf),
        config: args.config.clone(),
        hospital_column: args.hospital_column.clone(),
        dry_run: args.dry_run,
    };
    run_pipeline(&request)
}

pub fn run_questions(reference_dir: Option<&Path>) -> Result<()> {
    let path = resolve_reference_dir(reference_dir).join(QUESTION_TEXTS_FILE);
    let texts = load_question_texts(&path).context("load question texts")?;
    let mut table = Table::new();
    table.set_header(vec![header_cell("No."), header_cell("Question")]);
    apply_table_style(&mut table);
    if let Some(column) = table.column_mut(0) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    for (number, text) in texts.iter() {
        table.add_row(vec![Cell::new(number), Cell::new(text)]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_hospitals(reference_dir: Option<&Path>) -> Result<()> {
    let path = resolve_reference_dir(reference_dir).join(HOSPITALS_FILE);
    let hospitals = load_hospitals(&path).context("load hospital directory")?;
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Code"),
        header_cell("Name"),
        header_cell("District"),
        header_cell("Ownership"),
        header_cell("Size"),
    ]);
    apply_table_style(&mut table);
    let optional = |value: &Option<String>| match value {
        Some(value) => Cell::new(value),
        None => dim_cell("-"),
    };
    for hospital in hospitals.iter() {
        table.add_row(vec![
            Cell::new(hospital.code),
            Cell::new(&hospital.name),
            optional(&hospital.district),
            optional(&hospital.ownership),
            optional(&hospital.size),
        ]);
    }
    println!("{table}");
    Ok(())
}
