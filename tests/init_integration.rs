//! End-to-end runs of `adrm init` against a fake engine script.
#![cfg(unix)]

mod common;

use common::{stderr, Project};

#[test]
fn init_creates_directories_and_invokes_engine_per_step() {
    let project = Project::new();
    let engine = project.install_fake_engine(0);
    project.write_config(&engine, &[("out", "out")]);
    project.write("src/a.py", "x = 1\n");
    project.write("src/b.py", "y = 2\n");
    project.write("README.md", "readme\n");
    project.write(
        "steps.json",
        r#"[
            {"prompt": "p1", "files": ["src/*.py"]},
            {"prompt": "p2", "files": ["README.md"], "allow_edits": false}
        ]"#,
    );

    let output = project.run(&["init", "--api-key", "sk-test", "--non-interactive"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(project.path("out").is_dir());
    assert!(project.path("docs/standards").is_dir());

    let log = project.engine_log().expect("engine ran");
    let runs: Vec<Vec<&str>> = log
        .split("---\n")
        .filter(|run| !run.is_empty())
        .map(|run| run.lines().collect())
        .collect();
    assert_eq!(runs.len(), 2);

    let first = &runs[0];
    assert_eq!(&first[..4], &["--model", "gpt-4", "--edit-format", "diff"]);
    assert!(first.contains(&"--no-git"));
    assert!(first.contains(&"p1"));
    assert!(first.contains(&"src/a.py"));
    assert!(first.contains(&"src/b.py"));
    assert_eq!(first.last(), Some(&"key=sk-test"));
    assert!(!first.contains(&"sk-test"));

    let second = &runs[1];
    assert!(second
        .windows(2)
        .any(|pair| pair == ["--read", "README.md"]));
}

#[test]
fn missing_steps_file_fails_after_creating_directories() {
    let project = Project::new();
    let engine = project.install_fake_engine(0);
    project.write_config(&engine, &[("out", "out")]);

    let output = project.run(&["init", "--api-key", "sk-test", "--non-interactive"]);

    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("error: steps file not found"), "stderr: {err}");
    assert!(project.path("out").is_dir());
    assert!(project.engine_log().is_none());
}

#[test]
fn blank_model_override_is_rejected_before_side_effects() {
    let project = Project::new();
    let engine = project.install_fake_engine(0);
    project.write_config(&engine, &[("out", "out")]);

    let output = project.run(&["init", "--model", "bad model", "--non-interactive"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("invalid argument"));
    assert!(!project.path("out").exists());
}

#[test]
fn failing_engine_aborts_remaining_steps() {
    let project = Project::new();
    let engine = project.install_fake_engine(2);
    project.write_config(&engine, &[]);
    project.write("a.py", "x");
    project.write(
        "steps.json",
        r#"[{"prompt": "first", "files": ["a.py"]}, {"prompt": "second", "files": ["a.py"]}]"#,
    );

    let output = project.run(&["init", "--api-key", "sk-test", "--non-interactive"]);

    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("step 1 failed"), "stderr: {err}");
    assert!(err.contains("ENG-"), "stderr: {err}");
    let log = project.engine_log().expect("engine ran once");
    assert!(log.contains("first"));
    assert!(!log.contains("second"));
}

#[test]
fn missing_credential_is_reported_without_running_engine() {
    let project = Project::new();
    let engine = project.install_fake_engine(0);
    project.write_config(&engine, &[]);
    project.write("a.py", "x");
    project.write("steps.json", r#"[{"prompt": "p", "files": ["a.py"]}]"#);

    let output = project.run(&["init", "--non-interactive"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("no API key"));
    assert!(project.engine_log().is_none());
}

#[test]
fn step_without_files_needs_no_credential() {
    let project = Project::new();
    let engine = project.install_fake_engine(0);
    project.write_config(&engine, &[]);
    project.write("steps.json", r#"[{"prompt": "p", "files": ["*.none"]}]"#);

    let output = project.run(&["init", "--non-interactive"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(project.engine_log().is_none());
}

#[test]
fn declined_missing_files_leave_step_without_engine_call() {
    let project = Project::new();
    let engine = project.install_fake_engine(0);
    project.write_config(&engine, &[]);
    project.write("steps.json", r#"[{"prompt": "p", "files": ["new.py"]}]"#);

    let output = project.run(&["init", "--api-key", "sk-test", "--non-interactive"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(!project.path("new.py").exists());
    assert!(project.engine_log().is_none());
}
