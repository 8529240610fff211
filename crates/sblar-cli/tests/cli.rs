//! End-to-end runs of the `sblar` binary.

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

use tempfile::TempDir;

fn sblar(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_sblar"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("run sblar")
}

fn register(dir: &TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("register.csv");
    fs::write(&path, contents).expect("write register");
    path
}

#[test]
fn test_describe_lists_catalog() {
    let output = sblar(&["describe", "--output", "json"]);
    assert!(output.status.success());
    let rows: Vec<serde_json::Value> =
        serde_json::from_slice(&output.stdout).expect("describe json");
    assert_eq!(rows.len(), 182);
    assert_eq!(rows[0]["id"], "E0001");
}

#[test]
fn test_validate_reports_errors_with_exit_code_one() {
    let dir = TempDir::new().expect("temp dir");
    let path = register(&dir, "uid\n\n\"\"\n");
    let output = sblar(&["validate", path.to_str().expect("utf-8 path"), "--output", "csv"]);
    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(",E0001,"), "{stdout}");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("status: FAILURE"), "{stderr}");
    assert!(stderr.contains("Skipped checks"), "{stderr}");
}

#[test]
fn test_strict_config_is_fatal() {
    let dir = TempDir::new().expect("temp dir");
    let path = register(&dir, "uid\n123456789TESTBANK12300001\n");
    let output = sblar(&[
        "validate",
        path.to_str().expect("utf-8 path"),
        "--strict-config",
    ]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error: validate register.csv"), "{stderr}");
}

#[test]
fn test_missing_file_is_fatal() {
    let output = sblar(&["validate", "/nonexistent/register.csv"]);
    assert_eq!(output.status.code(), Some(2));
}
