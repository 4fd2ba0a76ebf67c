//! `adrm config` and `adrm standards` through the binary.

mod common;

use common::{stderr, stdout, Project};

#[test]
fn config_json_lists_locations_with_existence() {
    let project = Project::new();
    project.write_config("aider", &[("out", "out")]);
    project.write("steps.json", "[]");
    std::fs::create_dir_all(project.path("out")).unwrap();

    let output = project.run(&["config", "--json"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let report: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("json report");
    assert_eq!(report["steps_file"]["path"], "steps.json");
    assert_eq!(report["steps_file"]["exists"], true);
    let dirs = report["directories"].as_array().expect("directories");
    let out = dirs
        .iter()
        .find(|entry| entry["role"] == "out")
        .expect("out role");
    assert_eq!(out["exists"], true);
    let standards = dirs
        .iter()
        .find(|entry| entry["role"] == "standards")
        .expect("standards role");
    assert_eq!(standards["exists"], false);
}

#[test]
fn config_without_any_config_file_fails() {
    let project = Project::new();

    let output = project.run(&["config"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("config.json"));
}

#[test]
fn explicit_config_path_is_used() {
    let project = Project::new();
    project.write_config("aider", &[]);
    std::fs::rename(project.path("config.json"), project.path("alt.json")).unwrap();

    let output = project.run(&["config", "--config", "alt.json"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("alt.json"));
}

#[test]
fn standards_from_content_file() {
    let project = Project::new();
    project.write_config("aider", &[]);
    project.write("rust.md", "# Rust implementation standards\n");

    let output = project.run(&[
        "standards",
        "rust",
        "--kind",
        "implementation",
        "--content-file",
        "rust.md",
    ]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        project.read("docs/standards/rust_implementation_standards.md"),
        "# Rust implementation standards\n"
    );
}

#[test]
fn standards_from_stdin() {
    let project = Project::new();
    project.write_config("aider", &[]);

    let output = project.run_with_stdin(
        &["standards", "python", "--kind", "performance"],
        "profile first\n",
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        project.read("docs/standards/python_performance_standards.md"),
        "profile first\n"
    );
}

#[test]
fn standards_rejects_empty_content() {
    let project = Project::new();
    project.write_config("aider", &[]);

    let output = project.run_with_stdin(&["standards", "go", "--kind", "performance"], "  \n");

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("no standards content"));
}
