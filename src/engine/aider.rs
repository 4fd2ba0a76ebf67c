//! Subprocess client for the `aider` pair-programming engine.
//!
//! The engine is invoked once per step with the prompt as `--message` and the
//! step's files on the command line. The credential travels through the
//! environment only.
use super::{CoderStrategy, EditEngine, EngineProvider, EngineRequest, FileFilter};
use crate::config::{EngineConfig, API_KEY_ENV};
use crate::error::EngineError;
use crate::files::FileContentMap;
use crate::util::output_excerpt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::Instant;

const OUTPUT_EXCERPT_BYTES: usize = 2000;

/// Builds [`AiderClient`]s from the run's engine settings.
#[derive(Debug, Clone)]
pub struct AiderProvider {
    pub engine: EngineConfig,
    /// Pass `--yes-always` so the engine never waits on the terminal.
    pub auto_confirm: bool,
    pub working_dir: PathBuf,
}

impl AiderProvider {
    pub fn new(engine: EngineConfig, auto_confirm: bool, working_dir: PathBuf) -> Self {
        Self {
            engine,
            auto_confirm,
            working_dir,
        }
    }
}

impl EngineProvider for AiderProvider {
    fn build(&self, request: &EngineRequest<'_>) -> Result<Box<dyn EditEngine>, EngineError> {
        Ok(Box::new(AiderClient::new(self, request)?))
    }
}

#[derive(Debug)]
pub struct AiderClient {
    program: String,
    program_args: Vec<String>,
    model: String,
    strategy: CoderStrategy,
    api_key: String,
    api_key_env: String,
    allow_edits: bool,
    auto_confirm: bool,
    git_enabled: bool,
    pretty: bool,
    stream_output: bool,
    chat_history_file: Option<String>,
    filter: FileFilter,
    working_dir: PathBuf,
}

impl AiderClient {
    pub fn new(settings: &AiderProvider, request: &EngineRequest<'_>) -> Result<Self, EngineError> {
        let engine = &settings.engine;
        let strategy = CoderStrategy::parse(&engine.coder.kind)?;
        let api_key = resolve_credential(request.api_key, engine.api_key.as_deref()).ok_or_else(
            || EngineError::MissingCredential {
                model: request.model.to_string(),
                env_var: API_KEY_ENV.to_string(),
            },
        )?;

        let mut args = shell_words::split(&engine.command)
            .map_err(|err| EngineError::InvalidCommand(format!("{}: {err}", engine.command)))?;
        if args.is_empty() {
            return Err(EngineError::InvalidCommand("command is empty".to_string()));
        }
        let program = args.remove(0);
        let filter = FileFilter::new(
            &engine.coder.include_patterns,
            &engine.coder.exclude_patterns,
        )?;

        tracing::debug!(
            model = request.model,
            strategy = %strategy,
            program = %program,
            allow_edits = request.allow_edits,
            "engine client ready"
        );
        Ok(Self {
            program,
            program_args: args,
            model: request.model.to_string(),
            strategy,
            api_key,
            api_key_env: engine.api_key_env.clone(),
            allow_edits: request.allow_edits,
            auto_confirm: settings.auto_confirm,
            git_enabled: engine.git_enabled,
            pretty: engine.pretty,
            stream_output: engine.stream_output,
            chat_history_file: engine.chat_history_file.clone(),
            filter,
            working_dir: settings.working_dir.clone(),
        })
    }

    #[cfg(test)]
    pub fn strategy(&self) -> CoderStrategy {
        self.strategy
    }

    /// Engine arguments after the program and its configured arguments.
    fn engine_args(&self, prompt: &str, files: &[String]) -> Vec<String> {
        let mut args = vec![
            "--model".to_string(),
            self.model.clone(),
            "--edit-format".to_string(),
            self.strategy.edit_format().to_string(),
        ];
        if self.auto_confirm {
            args.push("--yes-always".to_string());
        }
        if !self.git_enabled {
            args.push("--no-git".to_string());
        }
        if !self.pretty {
            args.push("--no-pretty".to_string());
        }
        if !self.stream_output {
            args.push("--no-stream".to_string());
        }
        if let Some(history) = &self.chat_history_file {
            args.push("--chat-history-file".to_string());
            args.push(history.clone());
        }
        args.push("--message".to_string());
        args.push(prompt.to_string());
        for file in files {
            if !self.allow_edits {
                args.push("--read".to_string());
            }
            args.push(file.clone());
        }
        args
    }

    fn resolve_program(&self) -> Result<PathBuf, EngineError> {
        let program = Path::new(&self.program);
        if program.components().count() > 1 {
            return Ok(self.working_dir.join(program));
        }
        which::which(&self.program).map_err(|err| {
            failure(
                format!("engine command {} not found: {err}", self.program),
                None,
            )
        })
    }
}

impl EditEngine for AiderClient {
    fn execute_prompt(&self, prompt: &str, files: &FileContentMap) -> Result<(), EngineError> {
        let selected = self.filter.apply(files.keys());
        if selected.is_empty() {
            tracing::warn!(
                candidates = files.len(),
                "no files left after include/exclude filters; skipping engine"
            );
            return Ok(());
        }

        let program = self.resolve_program()?;
        let start = Instant::now();
        let output = Command::new(&program)
            .args(&self.program_args)
            .args(self.engine_args(prompt, &selected))
            .current_dir(&self.working_dir)
            .env(&self.api_key_env, &self.api_key)
            .stdin(Stdio::null())
            .output()
            .map_err(|err| {
                failure(
                    format!("spawn engine command {}", program.display()),
                    Some(err),
                )
            })?;
        let elapsed_ms = start.elapsed().as_millis();

        tracing::info!(
            elapsed_ms,
            model = %self.model,
            files = selected.len(),
            prompt_bytes = prompt.len(),
            response_bytes = output.stdout.len(),
            "engine invoke complete"
        );
        tracing::debug!(
            stdout = %output_excerpt(&output.stdout, OUTPUT_EXCERPT_BYTES),
            "engine output"
        );

        if !output.status.success() {
            let stderr = output_excerpt(&output.stderr, OUTPUT_EXCERPT_BYTES);
            return Err(failure(
                format!("engine exited with {}: {}", output.status, stderr),
                None,
            ));
        }
        Ok(())
    }
}

/// Pick the credential: explicit, then configured, then `ADRM_API_KEY`.
///
/// Blank values count as absent.
pub fn resolve_credential(explicit: Option<&str>, configured: Option<&str>) -> Option<String> {
    [
        explicit.map(str::to_string),
        configured.map(str::to_string),
        std::env::var(API_KEY_ENV).ok(),
    ]
    .into_iter()
    .flatten()
    .map(|value| value.trim().to_string())
    .find(|value| !value.is_empty())
}

fn failure(message: String, source: Option<std::io::Error>) -> EngineError {
    let code = format!("ENG-{}", uuid::Uuid::new_v4());
    tracing::error!(code = %code, error = %message, "engine execution failed");
    EngineError::ExecutionFailed {
        code,
        message,
        source,
    }
}

#[cfg(test)]
#[path = "aider_tests.rs"]
mod tests;
