//! Shared test infrastructure for integration tests.
#![allow(dead_code)]

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

/// A throwaway project directory with its own config and step list.
pub struct Project {
    dir: TempDir,
}

impl Default for Project {
    fn default() -> Self {
        Self::new()
    }
}

impl Project {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create project dir"),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.root().join(rel)
    }

    pub fn write(&self, rel: &str, contents: &str) {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent directory");
        }
        std::fs::write(path, contents).expect("write project file");
    }

    pub fn read(&self, rel: &str) -> String {
        std::fs::read_to_string(self.path(rel)).expect("read project file")
    }

    /// Install a shell script engine that appends its argv and key to
    /// `engine.log`, then exits with `exit_code`.
    pub fn install_fake_engine(&self, exit_code: i32) -> String {
        let log = self.path("engine.log");
        let script = format!(
            "#!/bin/sh\nfor arg in \"$@\"; do printf '%s\\n' \"$arg\" >> '{log}'; done\nprintf 'key=%s\\n' \"$FAKE_ENGINE_KEY\" >> '{log}'\necho '---' >> '{log}'\nexit {exit_code}\n",
            log = log.display()
        );
        self.write("fake-engine.sh", &script);
        format!("sh {}", self.path("fake-engine.sh").display())
    }

    /// Write a config.json routing the engine to `engine_command`.
    pub fn write_config(&self, engine_command: &str, extra_directories: &[(&str, &str)]) {
        let mut directories = serde_json::Map::new();
        directories.insert("standards".into(), "docs/standards".into());
        for (role, path) in extra_directories {
            directories.insert((*role).into(), (*path).into());
        }
        let config = serde_json::json!({
            "directories": directories,
            "files": {"steps": "steps.json"},
            "model": {"name": "gpt-4"},
            "engine": {
                "command": engine_command,
                "api_key_env": "FAKE_ENGINE_KEY",
                "chat_history_file": null,
                "git_enabled": false
            }
        });
        self.write(
            "config.json",
            &serde_json::to_string_pretty(&config).expect("serialize config"),
        );
    }

    pub fn engine_log(&self) -> Option<String> {
        std::fs::read_to_string(self.path("engine.log")).ok()
    }

    pub fn run(&self, args: &[&str]) -> Output {
        self.run_with_stdin(args, "")
    }

    pub fn run_with_stdin(&self, args: &[&str], stdin: &str) -> Output {
        let mut child = self
            .command()
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("spawn adrm");
        if let Some(mut input) = child.stdin.take() {
            input.write_all(stdin.as_bytes()).expect("write stdin");
        }
        child.wait_with_output().expect("wait for adrm")
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_adrm"));
        cmd.current_dir(self.root())
            .env_remove("ADRM_API_KEY")
            .env_remove("RUST_LOG")
            .env("XDG_CONFIG_HOME", self.path(".xdg"));
        cmd
    }
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
