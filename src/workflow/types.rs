//! Step list model and per-step configuration resolution.
use crate::config::ModelDefaults;
use crate::error::StepError;
use serde::{Deserialize, Serialize};

/// One instruction for the engine plus its file context.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct Step {
    pub prompt: String,
    /// Literal paths or glob patterns, relative to the working directory.
    #[serde(default)]
    pub files: Vec<String>,
    #[serde(default = "default_allow_edits")]
    pub allow_edits: bool,
    #[serde(default)]
    pub model_name: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
}

fn default_allow_edits() -> bool {
    true
}

impl Step {
    #[cfg(test)]
    pub fn new(prompt: impl Into<String>, files: Vec<String>) -> Self {
        Self {
            prompt: prompt.into(),
            files,
            allow_edits: true,
            model_name: None,
            api_key: None,
        }
    }
}

/// Ordered steps with metadata.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct Workflow {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub steps: Vec<Step>,
}

impl Workflow {
    /// Check every step has a prompt and at least one file pattern.
    ///
    /// Reports the first offending step (1-based).
    pub fn validate(&self) -> Result<(), String> {
        for (idx, step) in self.steps.iter().enumerate() {
            let index = idx + 1;
            if step.prompt.trim().is_empty() {
                return Err(format!("step {index} has an empty prompt"));
            }
            if step.files.is_empty() {
                return Err(format!("step {index} has no file patterns"));
            }
            if let Some(pattern) = step.files.iter().find(|pattern| pattern.trim().is_empty()) {
                return Err(format!("step {index} has a blank file pattern {pattern:?}"));
            }
        }
        Ok(())
    }
}

/// Run-level model overrides taken from the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepOverrides {
    pub model_name: Option<String>,
    pub api_key: Option<String>,
}

/// Model settings actually used for one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveStepConfig {
    pub model_name: String,
    pub api_key: Option<String>,
}

impl EffectiveStepConfig {
    /// Resolve each value as step, then run override, then config default.
    pub fn resolve(
        step: &Step,
        overrides: &StepOverrides,
        defaults: &ModelDefaults,
    ) -> Result<Self, StepError> {
        let model_name = first_present([
            step.model_name.as_deref(),
            overrides.model_name.as_deref(),
            defaults.name.as_deref(),
        ])
        .ok_or_else(|| StepError::Configuration("missing model configuration".to_string()))?;
        let api_key = first_present([
            step.api_key.as_deref(),
            overrides.api_key.as_deref(),
            defaults.api_key.as_deref(),
        ]);
        Ok(Self {
            model_name,
            api_key,
        })
    }
}

fn first_present<const N: usize>(values: [Option<&str>; N]) -> Option<String> {
    values
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|value| !value.is_empty())
        .map(str::to_string)
}
