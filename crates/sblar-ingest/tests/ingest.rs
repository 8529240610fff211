use std::fs;
use std::path::{Path, PathBuf};

use sblar_ingest::{CsvReferenceData, IngestError, NAICS_COLUMN, load_code_set, read_dataset};
use sblar_model::{CENSUS_GEOIDS, NAICS_CODES, ReferenceData};
use tempfile::TempDir;

fn temp_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write file");
    path
}

#[test]
fn reads_register_verbatim() {
    let dir = TempDir::new().expect("temp dir");
    let path = temp_file(
        &dir,
        "register.csv",
        "\u{feff}uid,action_taken,amount_approved\nLEI00001,1;2, \nLEI00002,3,\n",
    );
    let dataset = read_dataset(&path).expect("read register");
    assert_eq!(dataset.headers(), ["uid", "action_taken", "amount_approved"]);
    assert_eq!(dataset.height(), 2);
    assert_eq!(dataset.value(0, "action_taken"), Some("1;2"));
    assert_eq!(dataset.value(0, "amount_approved"), Some(" "));
    assert_eq!(dataset.value(1, "amount_approved"), Some(""));
}

#[test]
fn short_records_are_padded() {
    let dir = TempDir::new().expect("temp dir");
    let path = temp_file(&dir, "short.csv", "uid,app_date,app_method\nLEI00001,20240101\n");
    let dataset = read_dataset(&path).expect("read register");
    assert_eq!(dataset.value(0, "app_method"), Some(""));
}

#[test]
fn long_records_are_rejected() {
    let dir = TempDir::new().expect("temp dir");
    let path = temp_file(&dir, "long.csv", "uid,app_date\nLEI00001,20240101,extra\n");
    let err = read_dataset(&path).unwrap_err();
    assert!(matches!(err, IngestError::Dataset { .. }), "{err}");
}

#[test]
fn header_only_file_has_no_records() {
    let dir = TempDir::new().expect("temp dir");
    let path = temp_file(&dir, "empty.csv", "uid,app_date\n");
    let dataset = read_dataset(&path).expect("read register");
    assert_eq!(dataset.width(), 2);
    assert_eq!(dataset.height(), 0);
}

#[test]
fn empty_file_is_missing_header() {
    let dir = TempDir::new().expect("temp dir");
    let path = temp_file(&dir, "blank.csv", "");
    assert!(matches!(
        read_dataset(&path),
        Err(IngestError::MissingHeader { .. })
    ));
}

#[test]
fn duplicate_header_is_rejected() {
    let dir = TempDir::new().expect("temp dir");
    let path = temp_file(&dir, "dupe.csv", "uid,uid\nA,B\n");
    assert!(matches!(read_dataset(&path), Err(IngestError::Dataset { .. })));
}

#[test]
fn missing_file_reports_path() {
    let err = read_dataset(Path::new("/nonexistent/register.csv")).unwrap_err();
    assert!(err.to_string().contains("/nonexistent/register.csv"));
}

#[test]
fn loads_code_set_column() {
    let dir = TempDir::new().expect("temp dir");
    let path = temp_file(&dir, "naics.csv", "title,code\nFarming,111\nMining, 212 \nBlank,\n");
    let codes = load_code_set(&path, NAICS_COLUMN).expect("load codes");
    assert_eq!(codes.into_iter().collect::<Vec<_>>(), vec!["111", "212"]);
}

#[test]
fn code_set_requires_column() {
    let dir = TempDir::new().expect("temp dir");
    let path = temp_file(&dir, "naics.csv", "title,naics\nFarming,111\n");
    let err = load_code_set(&path, NAICS_COLUMN).unwrap_err();
    assert!(matches!(err, IngestError::MissingColumn { ref column, .. } if column == "code"));
}

#[test]
fn reference_data_from_files() {
    let dir = TempDir::new().expect("temp dir");
    let naics = temp_file(&dir, "naics.csv", "code,title\n541,Professional services\n");
    let census = temp_file(&dir, "census.csv", "geoid\n01001020100\n");
    let reference = CsvReferenceData::load(Some(&naics), Some(&census)).expect("load reference");
    assert!(reference.is_member(NAICS_CODES, "541"));
    assert!(!reference.is_member(NAICS_CODES, "999"));
    assert!(reference.is_member(CENSUS_GEOIDS, "01001020100"));

    let naics_only = CsvReferenceData::load(Some(&naics), None).expect("load reference");
    assert!(naics_only.all_codes(CENSUS_GEOIDS).is_empty());
}
