//! Step list loading.
//!
//! A steps file is either a bare JSON array of steps or a workflow object
//! with `name`, `description` and `steps`.
use super::types::{Step, Workflow};
use crate::error::InitError;
use anyhow::Context;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Load and validate the workflow at `path`.
pub fn load_workflow(path: &Path) -> Result<Workflow, InitError> {
    if !path.is_file() {
        return Err(InitError::StepsNotFound(path.to_path_buf()));
    }
    let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    let value: Value = serde_json::from_slice(&bytes)
        .map_err(|err| InitError::InvalidWorkflow(format!("parse {}: {err}", path.display())))?;

    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut workflow = match value {
        Value::Array(_) => {
            let steps: Vec<Step> = serde_json::from_value(value).map_err(|err| {
                InitError::InvalidWorkflow(format!("parse {}: {err}", path.display()))
            })?;
            Workflow {
                name: String::new(),
                description: String::new(),
                steps,
            }
        }
        Value::Object(_) => serde_json::from_value(value).map_err(|err| {
            InitError::InvalidWorkflow(format!("parse {}: {err}", path.display()))
        })?,
        _ => {
            return Err(InitError::InvalidWorkflow(format!(
                "{}: expected a JSON array of steps or a workflow object",
                path.display()
            )))
        }
    };
    if workflow.name.trim().is_empty() {
        workflow.name = stem;
    }

    workflow.validate().map_err(InitError::InvalidWorkflow)?;
    tracing::debug!(
        path = %path.display(),
        workflow = %workflow.name,
        steps = workflow.steps.len(),
        "loaded workflow"
    );
    Ok(workflow)
}
