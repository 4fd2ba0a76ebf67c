//! Error types for the step pipeline.
//!
//! Each layer owns one enum so callers can tell configuration mistakes apart
//! from failures that happened while an edit was being applied.
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building or invoking the edit engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// No credential from the step, the client config, or `ADRM_API_KEY`.
    #[error("no API key for model {model} (pass --api-key, set engine.api_key, or export {env_var})")]
    MissingCredential { model: String, env_var: String },

    /// Coder type outside the supported set.
    #[error("unsupported coder type: {0}")]
    UnsupportedStrategy(String),

    /// The configured engine command could not be used.
    #[error("invalid engine command: {0}")]
    InvalidCommand(String),

    /// An include/exclude pattern failed to compile.
    #[error("invalid file filter pattern {pattern:?}: {reason}")]
    InvalidFilter { pattern: String, reason: String },

    /// The engine ran and failed, or could not be started.
    #[error("[{code}] engine execution failed: {message}")]
    ExecutionFailed {
        code: String,
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },
}

/// Errors raised by a single step.
#[derive(Debug, Error)]
pub enum StepError {
    /// Missing or invalid model settings at step scope.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The engine client could not be constructed for this step.
    #[error("configuration error")]
    EngineSetup(#[source] EngineError),

    /// Resolving files or applying the edit failed.
    #[error("failed to execute step")]
    ExecutionFailed {
        #[source]
        source: anyhow::Error,
    },
}

impl StepError {
    /// Whether the failure comes from configuration rather than execution.
    ///
    /// Configuration failures are never worth retrying.
    pub fn is_configuration(&self) -> bool {
        matches!(self, StepError::Configuration(_) | StepError::EngineSetup(_))
    }
}

/// Errors surfaced by the project initializer.
#[derive(Debug, Error)]
pub enum InitError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("steps file not found: {}", .0.display())]
    StepsNotFound(PathBuf),

    #[error("invalid workflow: {0}")]
    InvalidWorkflow(String),

    #[error("step {index} failed")]
    StepFailed {
        index: usize,
        #[source]
        source: StepError,
    },

    #[error("project initialization failed")]
    Setup(#[from] anyhow::Error),
}
