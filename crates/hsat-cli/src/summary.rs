use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use hsat_cli::types::{OverallStats, RunResult};
use hsat_model::HospitalDirectory;
use hsat_transform::{HospitalScoreRow, QuestionSummary};

const PODIUM_SIZE: usize = 5;

pub fn print_summary(result: &RunResult) {
    println!("Input: {}", result.input.display());
    if result.dry_run {
        println!("Output: dry run, nothing written");
    } else {
        println!("Output: {}", result.output_dir.display());
    }
    if let Some(path) = &result.manifest_path {
        println!("Manifest: {}", path.display());
    }

    match OverallStats::from_scores(&result.scores) {
        Some(stats) => print_overall(&stats),
        None => println!("No hospital has an overall average."),
    }

    let ranked: Vec<&HospitalScoreRow> = result
        .scores
        .ranked()
        .into_iter()
        .filter(|row| row.overall_average.is_some())
        .collect();
    if !ranked.is_empty() {
        let top: Vec<&HospitalScoreRow> = ranked.iter().take(PODIUM_SIZE).copied().collect();
        let bottom: Vec<&HospitalScoreRow> =
            ranked.iter().rev().take(PODIUM_SIZE).copied().collect();
        println!("Top {} hospitals", top.len());
        print_ranking(&top, &result.hospitals);
        println!("Bottom {} hospitals", bottom.len());
        print_ranking(&bottom, &result.hospitals);
    }

    let summaries = result.scores.question_summaries();
    if !summaries.is_empty() {
        println!("Question analysis");
        print_question_analysis(&summaries);
    }

    print_tables(result);
    if result.scores.excluded_records > 0 {
        eprintln!(
            "Note: {} record(s) without a hospital code were left out of the scores.",
            result.scores.excluded_records
        );
    }
}

fn print_overall(stats: &OverallStats) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Hospitals"),
        header_cell("Mean overall"),
        header_cell("Highest"),
        header_cell("Lowest"),
    ]);
    apply_table_style(&mut table);
    table.add_row(vec![
        Cell::new(stats.hospitals),
        Cell::new(format!("{:.2}", stats.mean)),
        Cell::new(format!("{:.2}", stats.max)).fg(Color::Green),
        Cell::new(format!("{:.2}", stats.min)).fg(Color::Red),
    ]);
    for index in 0..4 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    println!("{table}");
}

fn print_ranking(rows: &[&HospitalScoreRow], hospitals: &HospitalDirectory) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Code"),
        header_cell("Hospital"),
        header_cell("Overall"),
        header_cell("Responses"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for row in rows {
        let name = match hospitals.name_of(row.hospital_code) {
            Some(name) => Cell::new(name),
            None => dim_cell("unknown"),
        };
        let overall = row
            .overall_average
            .map_or_else(|| dim_cell("-"), |value| Cell::new(format!("{value:.2}")));
        table.add_row(vec![
            Cell::new(row.hospital_code),
            name,
            overall,
            Cell::new(row.responses),
        ]);
    }
    println!("{table}");
}

fn print_question_analysis(summaries: &[QuestionSummary]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Question"),
        header_cell("Hospitals"),
        header_cell("Mean"),
        header_cell("Median"),
        header_cell("Std dev"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 1..5 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for summary in summaries {
        let std_dev = summary
            .std_dev
            .map_or_else(|| dim_cell("-"), |value| Cell::new(format!("{value:.2}")));
        table.add_row(vec![
            Cell::new(&summary.question).add_attribute(Attribute::Bold),
            Cell::new(summary.hospitals),
            Cell::new(format!("{:.2}", summary.mean)),
            Cell::new(format!("{:.2}", summary.median)),
            std_dev,
        ]);
    }
    println!("{table}");
}

fn print_tables(result: &RunResult) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Table"),
        header_cell("Rows"),
        header_cell("Columns"),
        header_cell("Path"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for summary in &result.manifest.tables {
        let path = match &summary.path {
            Some(path) => Cell::new(path),
            None => dim_cell("-"),
        };
        table.add_row(vec![
            Cell::new(&summary.name).add_attribute(Attribute::Bold),
            Cell::new(summary.rows),
            Cell::new(summary.columns),
            path,
        ]);
    }
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

pub fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
