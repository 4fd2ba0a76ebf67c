//! Project initialization: create configured directories, then run the step
//! list through the engine.
use super::context::RunContext;
use super::runner::WorkflowRunner;
use super::state::{InitPhase, PhaseTracker};
use super::step_runner::StepRunner;
use super::steps::load_workflow;
use super::types::StepOverrides;
use crate::cli::InitArgs;
use crate::engine::AiderProvider;
use crate::error::InitError;
use crate::files::{FileContextResolver, LocalFileHandler, RetryPolicy};
use crate::prompt::{ConsolePrompter, DecliningPrompter, Prompter};
use anyhow::{Context, Result};
use std::fs;

/// Run `adrm init` from the process working directory.
pub fn run_init(args: &InitArgs) -> Result<()> {
    let ctx = RunContext::load_from_cwd(args.config.as_deref())?;
    let overrides = StepOverrides {
        model_name: args.model.clone(),
        api_key: args.api_key.clone(),
    };

    let prompter: Box<dyn Prompter> = if args.non_interactive {
        Box::new(DecliningPrompter)
    } else {
        Box::new(ConsolePrompter)
    };
    let handler = LocalFileHandler::new(RetryPolicy::default());
    let resolver = FileContextResolver::new(ctx.working_dir.clone(), prompter.as_ref(), &handler);
    let provider = AiderProvider::new(
        ctx.config.engine.clone(),
        ctx.config.io.auto_confirm,
        ctx.working_dir.clone(),
    );
    let step_runner = StepRunner::new(ctx.config.model.clone(), &provider, resolver);

    ProjectInitializer::new(&ctx, &step_runner).initialize(&overrides)?;
    println!("initialized project in {}", ctx.working_dir.display());
    Ok(())
}

pub struct ProjectInitializer<'r, 'a> {
    ctx: &'r RunContext,
    step_runner: &'r StepRunner<'a>,
}

impl<'r, 'a> ProjectInitializer<'r, 'a> {
    pub fn new(ctx: &'r RunContext, step_runner: &'r StepRunner<'a>) -> Self {
        Self { ctx, step_runner }
    }

    /// Validate overrides, create directories, then run every step in order.
    ///
    /// Directories are created before the steps file is looked up, so they
    /// exist even when the step list is missing.
    pub fn initialize(&self, overrides: &StepOverrides) -> Result<(), InitError> {
        validate_overrides(overrides)?;
        let mut phase = PhaseTracker::default();
        phase.advance(InitPhase::ConfigLoaded)?;

        self.setup_directories()?;
        phase.advance(InitPhase::DirectoriesCreated)?;

        let workflow = load_workflow(&self.ctx.steps_path())?;
        let executed = WorkflowRunner::new(self.step_runner).execute(&workflow, overrides)?;
        phase.advance(InitPhase::StepsExecuted)?;

        phase.advance(InitPhase::Completed)?;
        tracing::info!(workflow = %workflow.name, steps = executed, "project initialized");
        Ok(())
    }

    fn setup_directories(&self) -> Result<()> {
        for (role, path) in self.ctx.config.directory_paths(&self.ctx.working_dir) {
            fs::create_dir_all(&path)
                .with_context(|| format!("create {role} directory {}", path.display()))?;
            tracing::debug!(role = %role, path = %path.display(), "directory ready");
        }
        Ok(())
    }
}

fn validate_overrides(overrides: &StepOverrides) -> Result<(), InitError> {
    check_override("model name", overrides.model_name.as_deref())?;
    check_override("API key", overrides.api_key.as_deref())
}

fn check_override(label: &str, value: Option<&str>) -> Result<(), InitError> {
    let Some(value) = value else {
        return Ok(());
    };
    if value.trim().is_empty() {
        return Err(InitError::InvalidArgument(format!("{label} must not be blank")));
    }
    if value.chars().any(|ch| ch.is_whitespace() || ch.is_control()) {
        return Err(InitError::InvalidArgument(format!(
            "{label} must not contain whitespace or control characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "init_tests.rs"]
mod tests;
