//! Boundary to the external code-editing engine.
//!
//! The pipeline only sees [`EditEngine`]: hand it a prompt and the resolved
//! files, and it either applies the edit or fails. [`EngineProvider`] builds
//! one client per step so step-level model overrides take effect.
use crate::error::EngineError;
use crate::files::FileContentMap;
use std::fmt;

mod aider;
mod filter;

pub use aider::AiderProvider;
pub use filter::FileFilter;

/// Applies an instruction to a set of files.
pub trait EditEngine {
    fn execute_prompt(&self, prompt: &str, files: &FileContentMap) -> Result<(), EngineError>;
}

/// Per-step inputs needed to construct an engine client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineRequest<'a> {
    pub model: &'a str,
    /// Explicit credential; takes precedence over client config and env.
    pub api_key: Option<&'a str>,
    /// When false the engine gets the files read-only.
    pub allow_edits: bool,
}

/// Builds engine clients.
pub trait EngineProvider {
    fn build(&self, request: &EngineRequest<'_>) -> Result<Box<dyn EditEngine>, EngineError>;
}

/// Editing mode the engine uses to apply changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoderStrategy {
    /// Search/replace blocks local to the changed region.
    EditBlock,
    /// The engine rewrites whole files.
    WholeFile,
    /// Unified diffs.
    UnifiedDiff,
    /// A planning model proposes changes, an editor model applies them.
    Architect,
}

impl CoderStrategy {
    /// Parse the `engine.coder.type` selector.
    pub fn parse(value: &str) -> Result<Self, EngineError> {
        match value {
            "editblock" => Ok(CoderStrategy::EditBlock),
            "wholefile" => Ok(CoderStrategy::WholeFile),
            "udiff" => Ok(CoderStrategy::UnifiedDiff),
            "architect" => Ok(CoderStrategy::Architect),
            other => Err(EngineError::UnsupportedStrategy(other.to_string())),
        }
    }

    /// Return the stable selector used in config.
    pub fn as_str(&self) -> &'static str {
        match self {
            CoderStrategy::EditBlock => "editblock",
            CoderStrategy::WholeFile => "wholefile",
            CoderStrategy::UnifiedDiff => "udiff",
            CoderStrategy::Architect => "architect",
        }
    }

    /// Engine-side `--edit-format` value.
    pub fn edit_format(&self) -> &'static str {
        match self {
            CoderStrategy::EditBlock => "diff",
            CoderStrategy::WholeFile => "whole",
            CoderStrategy::UnifiedDiff => "udiff",
            CoderStrategy::Architect => "architect",
        }
    }
}

impl fmt::Display for CoderStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
