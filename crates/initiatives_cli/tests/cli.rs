use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

fn sample_catalog() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data/initiatives.sample.json")
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_initiative-catalog"))
        .args(args)
        .env_remove("INITIATIVE_CATALOG_LOG_DIR")
        .env_remove("INITIATIVE_CATALOG_LOG_LEVEL")
        .output()
        .expect("binary should run")
}

fn write_catalog(suffix: &str, content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("temp catalog");
    file.write_all(content.as_bytes()).expect("write catalog");
    file
}

#[test]
fn validate_passes_sample_catalog() {
    let path = sample_catalog();
    let output = run(&["validate", path.to_str().expect("utf-8 path")]);
    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("PASS"));
    assert!(stdout.contains("records: 12"));
}

#[test]
fn validate_reports_missing_fields_with_exit_one() {
    let file = write_catalog(
        ".json",
        r#"[{"title": "T", "category": "education", "impact": "I", "beneficiaries": "B", "icon": "book"}]"#,
    );
    let output = run(&["validate", file.path().to_str().expect("utf-8 path")]);
    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("records: 1"));
    assert!(stdout.contains("  Initiative 0 missing description\n"));
}

#[test]
fn validate_fails_with_exit_two_on_malformed_input() {
    let file = write_catalog(".json", r#"[{"title": "#);
    let output = run(&["validate", file.path().to_str().expect("utf-8 path")]);
    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("malformed json catalog"));
}

#[test]
fn validate_json_output_lists_messages() {
    let file = write_catalog(".yaml", "- title: T\n  category: space\n");
    let output = run(&[
        "validate",
        "--json",
        "--strict-categories",
        file.path().to_str().expect("utf-8 path"),
    ]);
    assert_eq!(output.status.code(), Some(1));
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be json");
    assert_eq!(value["valid"], false);
    assert_eq!(value["record_count"], 1);
    assert_eq!(value["messages"][0], "Initiative 0 missing description");
    assert_eq!(value["diagnostics"][0]["field"], "description");
    assert_eq!(value["advisories"][0]["category"], "space");
}

#[test]
fn validate_reads_stdin_with_explicit_format() {
    let mut child = Command::new(env!("CARGO_BIN_EXE_initiative-catalog"))
        .args(["validate", "--format", "yaml", "-"])
        .env_remove("INITIATIVE_CATALOG_LOG_DIR")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("binary should spawn");
    child
        .stdin
        .take()
        .expect("stdin handle")
        .write_all(b"[]\n")
        .expect("write stdin");
    let output = child.wait_with_output().expect("binary should finish");
    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("records: 0"));
}

#[test]
fn duplicates_reports_repeated_titles() {
    let record = r#"{"title": "Open Gym", "description": "D", "category": "healthcare", "impact": "I", "beneficiaries": "B", "icon": "dumbbell"}"#;
    let file = write_catalog(".json", &format!("[{record}, {record}]"));
    let output = run(&["duplicates", file.path().to_str().expect("utf-8 path")]);
    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("exact: 'Open Gym' appears 2 times at [0, 1]"));
}

#[test]
fn duplicates_rejects_out_of_range_threshold() {
    let path = sample_catalog();
    let output = run(&[
        "duplicates",
        "--threshold",
        "1.5",
        path.to_str().expect("utf-8 path"),
    ]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("similarity threshold"));
}

#[test]
fn log_dir_enables_file_logging() {
    let log_dir = tempfile::tempdir().expect("temp log dir");
    let path = sample_catalog();
    let output = run(&[
        "--log-dir",
        log_dir.path().to_str().expect("utf-8 path"),
        "--log-level",
        "info",
        "validate",
        path.to_str().expect("utf-8 path"),
    ]);
    assert_eq!(output.status.code(), Some(0));
    let has_log_file = std::fs::read_dir(log_dir.path())
        .expect("log dir exists")
        .filter_map(Result::ok)
        .any(|entry| {
            entry
                .file_name()
                .to_string_lossy()
                .starts_with("initiative_catalog")
        });
    assert!(has_log_file);
}

#[test]
fn duplicates_json_reports_incomplete_catalog_as_json() {
    let file = write_catalog(".json", r#"[{"title": "T", "icon": "book"}]"#);
    let output = run(&[
        "duplicates",
        "--json",
        file.path().to_str().expect("utf-8 path"),
    ]);
    assert_eq!(output.status.code(), Some(1));
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be json");
    assert_eq!(value["valid"], false);
    assert_eq!(value["messages"][0], "Initiative 0 missing description");
}

#[test]
fn duplicates_lists_related_groups_with_keep_marker() {
    let file = write_catalog(
        ".yaml",
        "\
- title: Sponsor Hearing Aids
  description: Hearing aids for people with hearing loss
  category: healthcare
  impact: Restored hearing
  beneficiaries: 1M+ elderly
  icon: deaf
- title: Hearing Aids Program
  description: Aids
  category: healthcare
  impact: Restored hearing
  beneficiaries: 1M+ elderly
  icon: deaf
",
    );
    let output = run(&["duplicates", file.path().to_str().expect("utf-8 path")]);
    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("  related group of 2:\n"));
    assert!(stdout.contains("    keep 0 'Sponsor Hearing Aids'\n"));
    assert!(stdout.contains("    drop 1 'Hearing Aids Program'\n"));
    assert!(stdout.contains("removal candidates: 1\n"));
}
