use std::fs;

use hsat_model::MappedValue;
use hsat_reference::{
    ReferenceError, load_default_reference_data, load_hospitals, load_question_texts,
    load_reference_data, load_value_mappings,
};

#[test]
fn loads_bundled_reference_data() {
    let data = load_default_reference_data().expect("load reference data");
    assert!(!data.value_mappings.is_empty());
    assert!(data.question_texts.get(1).is_some());
    assert_eq!(data.hospitals.name_of(9), Some("Soroka"));
    let gender = data.value_mappings.column("gender").expect("gender mapping");
    assert_eq!(gender.get("1"), Some(&MappedValue::Text("male".to_string())));
}

#[test]
fn bundled_mappings_keep_raw_and_mapped_domains_disjoint() {
    let data = load_default_reference_data().expect("load reference data");
    for (column, map) in data.value_mappings.columns() {
        for mapped in map.values() {
            assert!(
                !map.contains_key(&mapped.to_string()),
                "{column}: mapped value {mapped} is also a raw key"
            );
        }
    }
}

#[test]
fn question_texts_skip_blank_text() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("question_texts.csv");
    fs::write(
        &path,
        "question_number,question_text\n1,\"First, question\"\n2,\n",
    )
    .expect("write file");
    let texts = load_question_texts(&path).expect("load texts");
    assert_eq!(texts.get(1), Some("First, question"));
    assert_eq!(texts.get(2), None);
}

#[test]
fn question_texts_reject_bad_numbers() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("question_texts.csv");
    fs::write(&path, "question_number,question_text\nabc,Text\n").expect("write file");
    let error = load_question_texts(&path).expect_err("bad number");
    match error {
        ReferenceError::InvalidRow { line, .. } => assert_eq!(line, 2),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn hospitals_require_name_column() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("hospitals.csv");
    fs::write(&path, "code,district\n1,North\n").expect("write file");
    let error = load_hospitals(&path).expect_err("missing column");
    assert!(matches!(error, ReferenceError::MissingColumn { ref column, .. } if column == "name"));
}

#[test]
fn hospitals_optional_fields_are_none_when_blank() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("hospitals.csv");
    fs::write(&path, "code,name,district,ownership,size\n4,Barzilai,,,Medium\n")
        .expect("write file");
    let directory = load_hospitals(&path).expect("load hospitals");
    let hospital = directory.get(4).expect("hospital 4");
    assert_eq!(hospital.district, None);
    assert_eq!(hospital.size.as_deref(), Some("Medium"));
}

#[test]
fn malformed_toml_reports_path() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("value_mappings.toml");
    fs::write(&path, "[gender\n").expect("write file");
    let error = load_value_mappings(&path).expect_err("bad toml");
    assert!(matches!(error, ReferenceError::Toml { .. }));
    assert!(error.to_string().contains("value_mappings.toml"));
}

#[test]
fn missing_directory_is_an_io_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let error = load_reference_data(&dir.path().join("absent")).expect_err("missing dir");
    assert!(matches!(error, ReferenceError::Io { .. }));
}
