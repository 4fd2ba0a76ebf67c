//! Interactive boundary used when a step names a file that does not exist.
//!
//! Both capabilities block the calling thread until the user answers.
use crate::util::resolve_command;
use anyhow::{anyhow, Context, Result};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::process::Command;

/// Yes/no confirmation plus free-text content entry.
pub trait Prompter {
    /// Ask a yes/no question; `default` applies to an empty answer.
    fn confirm(&self, message: &str, default: bool) -> Result<bool>;

    /// Let the user author content for `path`, starting from `template`.
    ///
    /// Returns `None` when the user left the template untouched.
    fn edit(&self, path: &str, template: &str) -> Result<Option<String>>;
}

/// Prompts on the terminal and opens `$VISUAL`/`$EDITOR` for content.
#[derive(Debug, Default)]
pub struct ConsolePrompter;

impl Prompter for ConsolePrompter {
    fn confirm(&self, message: &str, default: bool) -> Result<bool> {
        let hint = if default { "[Y/n]" } else { "[y/N]" };
        let stdin = io::stdin();
        loop {
            print!("{message} {hint}: ");
            io::stdout().flush().ok();
            let mut line = String::new();
            let read = stdin
                .lock()
                .read_line(&mut line)
                .context("read confirmation from stdin")?;
            if read == 0 {
                // stdin closed; nobody is there to say yes
                return Ok(false);
            }
            if let Some(answer) = parse_answer(&line, default) {
                return Ok(answer);
            }
            println!("Please answer 'y' or 'n'.");
        }
    }

    fn edit(&self, path: &str, template: &str) -> Result<Option<String>> {
        let suffix = Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| format!(".{ext}"))
            .unwrap_or_default();
        let file = tempfile::Builder::new()
            .prefix("adrm-")
            .suffix(&suffix)
            .tempfile()
            .context("create editor temp file")?;
        fs::write(file.path(), template.as_bytes())
            .with_context(|| format!("write {}", file.path().display()))?;

        let mut cmd = resolve_command(&["VISUAL", "EDITOR"], "vi");
        let program = cmd.remove(0);
        let status = Command::new(&program)
            .args(&cmd)
            .arg(file.path())
            .status()
            .with_context(|| format!("run editor {program}"))?;
        if !status.success() {
            return Err(anyhow!("editor {program} exited with {status}"));
        }

        let content = fs::read_to_string(file.path())
            .with_context(|| format!("read {}", file.path().display()))?;
        if content == template {
            return Ok(None);
        }
        Ok(Some(content))
    }
}

/// Declines every prompt; used for non-interactive runs.
#[derive(Debug, Default)]
pub struct DecliningPrompter;

impl Prompter for DecliningPrompter {
    fn confirm(&self, _message: &str, _default: bool) -> Result<bool> {
        Ok(false)
    }

    fn edit(&self, _path: &str, _template: &str) -> Result<Option<String>> {
        Ok(None)
    }
}

fn parse_answer(line: &str, default: bool) -> Option<bool> {
    match line.trim().to_ascii_lowercase().as_str() {
        "" => Some(default),
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}
