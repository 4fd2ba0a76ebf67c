//! Executes one step: resolve model settings, gather files, build the engine,
//! apply the prompt.
use super::types::{EffectiveStepConfig, Step, StepOverrides};
use crate::config::ModelDefaults;
use crate::engine::{EngineProvider, EngineRequest};
use crate::error::StepError;
use crate::files::FileContextResolver;
use std::time::Instant;

pub struct StepRunner<'a> {
    defaults: ModelDefaults,
    provider: &'a dyn EngineProvider,
    resolver: FileContextResolver<'a>,
}

impl<'a> StepRunner<'a> {
    pub fn new(
        defaults: ModelDefaults,
        provider: &'a dyn EngineProvider,
        resolver: FileContextResolver<'a>,
    ) -> Self {
        Self {
            defaults,
            provider,
            resolver,
        }
    }

    /// Run `step` with run-level `overrides` applied where the step is silent.
    ///
    /// A missing model is reported before any file is touched. The engine is
    /// only built once there are files to hand it.
    pub fn run_step(&self, step: &Step, overrides: &StepOverrides) -> Result<(), StepError> {
        let effective = EffectiveStepConfig::resolve(step, overrides, &self.defaults)
            .inspect_err(|err| tracing::error!(error = %err, "configuration error"))?;
        tracing::debug!(
            working_dir = %self.resolver.working_dir().display(),
            patterns = ?step.files,
            "resolving step files"
        );
        let files = self.resolver.resolve(&step.files).map_err(|source| {
            tracing::error!(error = %format!("{source:#}"), "step execution failed");
            StepError::ExecutionFailed { source }
        })?;
        if files.is_empty() {
            tracing::warn!(patterns = ?step.files, "no files found for step; skipping");
            return Ok(());
        }

        let request = EngineRequest {
            model: &effective.model_name,
            api_key: effective.api_key.as_deref(),
            allow_edits: step.allow_edits,
        };
        let engine = self.provider.build(&request).map_err(|err| {
            tracing::error!(error = %err, model = %effective.model_name, "engine setup failed");
            StepError::EngineSetup(err)
        })?;

        let start = Instant::now();
        engine.execute_prompt(&step.prompt, &files).map_err(|err| {
            tracing::error!(error = %err, "step execution failed");
            StepError::ExecutionFailed { source: err.into() }
        })?;
        tracing::info!(
            elapsed_ms = start.elapsed().as_millis(),
            model = %effective.model_name,
            files = files.len(),
            "step complete"
        );
        Ok(())
    }
}

#[cfg(test)]
#[path = "step_runner_tests.rs"]
mod tests;
