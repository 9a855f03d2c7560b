//! Integration tests for the universe-build binary.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

fn universe_build_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_universe-build"))
}

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn write_ontology(root: &Path) {
    write(
        root,
        "GLOBAL/entity_types/base.yaml",
        "EQUIPMENT:\n  description: Base equipment\n  is_abstract: true\n",
    );
    write(
        root,
        "HVAC/entity_types/vav.yaml",
        "VAV:\n  implements:\n    - EQUIPMENT\n",
    );
}

#[test]
fn test_build_simplified_json_output() {
    let output = Command::new(universe_build_bin())
        .args(["build", "--simplified", "--format", "json"])
        .output()
        .expect("failed to run universe-build");

    assert!(
        output.status.success(),
        "build --simplified failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_json::Value = serde_json::from_str(&stdout)
        .unwrap_or_else(|e| panic!("Invalid JSON output: {e}\n{stdout}"));
    let namespaces = parsed["namespaces"].as_array().unwrap();
    assert!(
        namespaces
            .iter()
            .any(|ns| ns["name"] == "HVAC")
    );
}

#[test]
fn test_build_from_ontology_root() {
    let root = tempfile::TempDir::new().unwrap();
    write_ontology(root.path());

    let output = Command::new(universe_build_bin())
        .args(["build", "--format", "json", "--ontology-root"])
        .arg(root.path())
        .output()
        .expect("failed to run universe-build");

    assert!(
        output.status.success(),
        "build failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let names: Vec<&str> = parsed["namespaces"]
        .as_array()
        .unwrap()
        .iter()
        .map(|ns| ns["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["GLOBAL", "HVAC"]);
}

#[test]
fn test_build_missing_root_prints_diagnostic_and_fails() {
    let output = Command::new(universe_build_bin())
        .args(["build", "--ontology-root", "/nonexistent/ontology/root"])
        .output()
        .expect("failed to run universe-build");

    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("[ERROR]") && stdout.contains("does not exist"),
        "missing diagnostic on stdout: {stdout}"
    );
}

#[test]
fn test_build_invalid_ontology_fails_with_diagnostic() {
    let root = tempfile::TempDir::new().unwrap();
    write_ontology(root.path());
    // Second declaration of VAV in another file.
    write(root.path(), "HVAC/entity_types/extra.yaml", "VAV:\n  description: Duplicate\n");

    let output = Command::new(universe_build_bin())
        .args(["build", "--ontology-root"])
        .arg(root.path())
        .output()
        .expect("failed to run universe-build");

    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("[ERROR]\tOntology is not valid."),
        "missing diagnostic on stdout: {stdout}"
    );
}

#[test]
fn test_check_overlay_reports_consistency() {
    let root = tempfile::TempDir::new().unwrap();
    let overlay = tempfile::TempDir::new().unwrap();
    write_ontology(root.path());
    write(
        overlay.path(),
        "HVAC/entity_types/vav.yaml",
        "VAV:\n  implements:\n    - EQUIPMENT\n",
    );

    let output = Command::new(universe_build_bin())
        .args(["check-overlay", "--changed"])
        .arg(overlay.path())
        .arg("--original")
        .arg(root.path())
        .output()
        .expect("failed to run universe-build");

    assert!(
        output.status.success(),
        "check-overlay failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(String::from_utf8_lossy(&output.stdout).contains("structurally consistent"));
}

#[test]
fn test_list_files_prints_relative_paths() {
    let root = tempfile::TempDir::new().unwrap();
    write_ontology(root.path());

    let output = Command::new(universe_build_bin())
        .args(["list-files", "--root"])
        .arg(root.path())
        .output()
        .expect("failed to run universe-build");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("HVAC/entity_types/vav.yaml"));
    assert!(stdout.contains("2 source file(s)"));
}
