use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const CATEGORIES: &str = r#"
[packages.demo-js]
root_package = "demo"
categories = ["Auth", "Storage"]
sub_categories = ["Hub"]
"#;

#[allow(deprecated)]
fn apiref(workdir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("apiref").expect("binary");
    cmd.current_dir(workdir).env_remove("APIREF_PACKAGE");
    cmd
}

fn setup_workspace() -> tempfile::TempDir {
    let temp = tempdir().unwrap();
    let root = temp.path();
    let docs = root.join("refs/demo-js/docs");
    fs::create_dir_all(&docs).unwrap();
    fs::write(
        docs.join("reference.json"),
        json!({
            "10": {"id": 10, "name": "signIn", "kind": 64, "signatures": [11]},
            "11": {
                "id": 11,
                "name": "signIn",
                "parameters": [{"name": "input", "type": {"type": "reference", "target": 12}}],
                "type": {"type": "reference", "target": 13, "typeArguments": [14]}
            },
            "12": {"id": 12, "name": "SignInInput", "children": [15]},
            "13": {"id": 13, "name": "Promise"},
            "14": {"id": 14, "name": "SignInOutput", "type": {"type": "union", "types": [16, 17]}},
            "15": {"id": 15, "name": "username", "type": {"type": "intrinsic", "name": "string"}},
            "16": {"id": 16, "name": "Done"},
            "17": {"id": 17, "name": "NextStep", "target": 14},
            "20": {"id": 20, "name": "uploadData", "type": 404},
            "30": {"id": 30, "name": "internalOnly"},
            "categories": [
                {"name": "Auth", "children": [10]},
                {"name": "Storage", "children": [20]},
                {"name": "Internal", "children": [30]}
            ]
        })
        .to_string(),
    )
    .unwrap();
    fs::write(root.join("categories.toml"), CATEGORIES).unwrap();
    temp
}

fn read_output(root: &Path) -> Value {
    let bytes = fs::read(root.join("out/demo-js.json")).expect("closure written");
    serde_json::from_slice(&bytes).expect("valid json")
}

#[test]
fn extract_writes_closure_of_configured_categories() {
    let temp = setup_workspace();
    let root = temp.path();

    apiref(root)
        .args(["-p", "demo-js", "--references-root", "refs", "--out-dir", "out"])
        .args(["--categories", "categories.toml"])
        .assert()
        .success();

    let closure = read_output(root);
    let mut keys: Vec<&str> = closure.as_object().unwrap().keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        vec!["10", "11", "12", "13", "14", "15", "16", "17", "20", "categories"]
    );

    let categories = closure["categories"].as_array().unwrap();
    assert_eq!(categories.len(), 2);
    assert_eq!(categories[0]["name"], "Auth");
    assert_eq!(categories[1]["name"], "Storage");

    // inline type objects are kept where they are embedded
    assert_eq!(closure["11"]["parameters"][0]["type"]["target"], 12);
}

#[test]
fn output_is_indented_with_two_spaces() {
    let temp = setup_workspace();
    let root = temp.path();

    apiref(root)
        .args(["-p", "demo-js", "--references-root", "refs", "--out-dir", "out"])
        .args(["--categories", "categories.toml"])
        .assert()
        .success();

    let text = fs::read_to_string(root.join("out/demo-js.json")).unwrap();
    assert!(text.starts_with("{\n  \"10\": {\n    \""), "{text}");
}

#[test]
fn stdout_mode_prints_instead_of_writing() {
    let temp = setup_workspace();
    let root = temp.path();

    let output = apiref(root)
        .args(["-p", "demo-js", "--references-root", "refs", "--out-dir", "out"])
        .args(["--categories", "categories.toml", "--stdout", "--quiet"])
        .output()
        .expect("command run");
    assert!(output.status.success());

    let closure: Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert!(closure.get("20").is_some());
    assert!(closure.get("30").is_none());
    assert!(!root.join("out").exists());
}

#[test]
fn package_can_come_from_environment() {
    let temp = setup_workspace();
    let root = temp.path();

    apiref(root)
        .env("APIREF_PACKAGE", "demo-js")
        .args(["--references-root", "refs", "--out-dir", "out"])
        .args(["--categories", "categories.toml"])
        .assert()
        .success();

    assert!(root.join("out/demo-js.json").exists());
}

#[test]
fn missing_package_is_fatal() {
    let temp = setup_workspace();

    apiref(temp.path())
        .args(["--references-root", "refs", "--out-dir", "out"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No package name provided"));
}

#[test]
fn unknown_package_is_fatal() {
    let temp = setup_workspace();

    apiref(temp.path())
        .args(["-p", "nope", "--categories", "categories.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown package 'nope'"));
}

#[test]
fn missing_reference_document_is_fatal() {
    let temp = setup_workspace();
    let root = temp.path();
    fs::remove_dir_all(root.join("refs/demo-js")).unwrap();

    apiref(root)
        .args(["-p", "demo-js", "--references-root", "refs", "--out-dir", "out"])
        .args(["--categories", "categories.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Reference document not found"));
    assert!(!root.join("out").exists());
}

#[test]
fn write_failure_is_reported_without_failing() {
    let temp = setup_workspace();
    let root = temp.path();
    fs::write(root.join("out"), "occupied").unwrap();

    apiref(root)
        .args(["-p", "demo-js", "--references-root", "refs", "--out-dir", "out"])
        .args(["--categories", "categories.toml"])
        .assert()
        .success()
        .stderr(predicate::str::contains("An error has occurred"));
}
