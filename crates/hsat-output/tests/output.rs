use std::fs;
use std::path::Path;

use polars::prelude::{DataFrame, NamedFrom, Series};

use hsat_output::{
    CsvTableSink, MANIFEST_FILE, OutputError, RunManifest, TableSink, render_readable_view,
    write_manifest,
};
use hsat_transform::{ColumnAlias, PipelineReport};

fn alias(column: &str, alias: &str) -> ColumnAlias {
    ColumnAlias {
        column: column.to_string(),
        alias: alias.to_string(),
    }
}

#[test]
fn readable_view_ddl() {
    let aliases = vec![
        alias("code_hospital", "code_hospital"),
        alias("q1", "q1__Overall satisfaction"),
        alias("q21r_2016", "q21r_2016__Was the \"room\" clean?"),
        alias("gender", "gender"),
    ];
    let sql = render_readable_view("satisfaction_2016_cleaned", "vw_satisfaction_readable", &aliases);
    insta::assert_snapshot!(sql.trim_end(), @r#"
    DROP VIEW IF EXISTS "vw_satisfaction_readable" CASCADE;
    CREATE VIEW "vw_satisfaction_readable" AS
    SELECT
        "code_hospital",
        "q1" AS "q1__Overall satisfaction",
        "q21r_2016" AS "q21r_2016__Was the ""room"" clean?",
        "gender"
    FROM "satisfaction_2016_cleaned";
    "#);
}

#[test]
fn csv_sink_replaces_existing_table() {
    let dir = tempfile::tempdir().expect("temp dir");
    let mut sink = CsvTableSink::new(dir.path().join("out"));

    let mut first = DataFrame::new(vec![
        Series::new("code_hospital".into(), vec![1i64, 2]).into(),
        Series::new("overall_average".into(), vec![Some(3.5), None]).into(),
    ])
    .expect("frame");
    let path = sink
        .replace_table("hospital_scores", &mut first)
        .expect("write");
    assert_eq!(path, dir.path().join("out").join("hospital_scores.csv"));
    let contents = fs::read_to_string(&path).expect("read");
    assert_eq!(contents, "code_hospital,overall_average\n1,3.5\n2,\n");

    let mut second = DataFrame::new(vec![Series::new("code_hospital".into(), vec![7i64]).into()])
        .expect("frame");
    sink.replace_table("hospital_scores", &mut second)
        .expect("rewrite");
    let contents = fs::read_to_string(&path).expect("read");
    assert_eq!(contents, "code_hospital\n7\n");
}

#[test]
fn csv_sink_writes_view_ddl() {
    let dir = tempfile::tempdir().expect("temp dir");
    let mut sink = CsvTableSink::new(dir.path());
    let path = sink
        .replace_view("vw_satisfaction_readable", "SELECT 1;\n")
        .expect("write view");
    assert_eq!(path.file_name().and_then(|n| n.to_str()), Some("vw_satisfaction_readable.sql"));
    assert_eq!(fs::read_to_string(path).expect("read"), "SELECT 1;\n");
}

#[test]
fn csv_sink_rejects_path_like_names() {
    let dir = tempfile::tempdir().expect("temp dir");
    let mut sink = CsvTableSink::new(dir.path());
    let mut df = DataFrame::new(vec![Series::new("a".into(), vec![1i64]).into()]).expect("frame");
    let error = sink.replace_table("../escape", &mut df).expect_err("invalid name");
    assert!(matches!(error, OutputError::InvalidTableName { .. }));
}

#[test]
fn manifest_records_tables_and_anomalies() {
    let dir = tempfile::tempdir().expect("temp dir");
    let mut report = PipelineReport::default();
    report.normalization.collisions = vec!["q1".to_string()];
    report.mapping.missing_columns = vec!["education".to_string()];
    report.cleaning.duplicates_removed = 3;

    let mut manifest = RunManifest::new(Path::new("data/survey.csv"), &report, 2);
    manifest.add_table("hospital_scores", 12, 40, Some(dir.path().join("hospital_scores.csv").as_path()));
    manifest.add_table("question_texts", 38, 4, None);
    let path = write_manifest(dir.path(), &manifest).expect("write manifest");
    assert_eq!(path, dir.path().join(MANIFEST_FILE));

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).expect("read")).expect("json");
    assert_eq!(value["input"], "data/survey.csv");
    assert_eq!(value["duplicates_removed"], 3);
    assert_eq!(value["records_without_hospital"], 2);
    assert_eq!(value["column_collisions"][0], "q1");
    assert_eq!(value["missing_mapping_columns"][0], "education");
    assert_eq!(value["tables"][0]["rows"], 12);
    assert!(value["tables"][1].get("path").is_none());
    assert!(value["generated_at"].is_string());
}
