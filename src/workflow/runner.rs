use super::step_runner::StepRunner;
use super::types::{StepOverrides, Workflow};
use crate::error::InitError;

/// Runs a workflow's steps in declaration order, stopping at the first failure.
///
/// Completed steps are not rolled back.
pub struct WorkflowRunner<'r, 'a> {
    step_runner: &'r StepRunner<'a>,
}

impl<'r, 'a> WorkflowRunner<'r, 'a> {
    pub fn new(step_runner: &'r StepRunner<'a>) -> Self {
        Self { step_runner }
    }

    /// Returns the number of steps run.
    pub fn execute(
        &self,
        workflow: &Workflow,
        overrides: &StepOverrides,
    ) -> Result<usize, InitError> {
        workflow.validate().map_err(InitError::InvalidWorkflow)?;
        let total = workflow.steps.len();
        for (idx, step) in workflow.steps.iter().enumerate() {
            let index = idx + 1;
            tracing::info!(workflow = %workflow.name, step = index, total, "step start");
            if let Err(source) = self.step_runner.run_step(step, overrides) {
                tracing::error!(
                    step = index,
                    configuration = source.is_configuration(),
                    error = %source,
                    "workflow aborted"
                );
                return Err(InitError::StepFailed { index, source });
            }
        }
        Ok(total)
    }
}
