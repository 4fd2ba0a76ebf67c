//! Initialization phases and their allowed transitions.
use anyhow::{anyhow, Result};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitPhase {
    Idle,
    ConfigLoaded,
    DirectoriesCreated,
    StepsExecuted,
    Completed,
}

impl InitPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            InitPhase::Idle => "idle",
            InitPhase::ConfigLoaded => "config_loaded",
            InitPhase::DirectoriesCreated => "directories_created",
            InitPhase::StepsExecuted => "steps_executed",
            InitPhase::Completed => "completed",
        }
    }

    fn allowed_transitions(&self) -> &'static [InitPhase] {
        match self {
            InitPhase::Idle => &[InitPhase::ConfigLoaded],
            InitPhase::ConfigLoaded => &[InitPhase::DirectoriesCreated],
            InitPhase::DirectoriesCreated => &[InitPhase::StepsExecuted],
            InitPhase::StepsExecuted => &[InitPhase::Completed],
            InitPhase::Completed => &[],
        }
    }

    pub fn can_transition(&self, to: InitPhase) -> bool {
        self.allowed_transitions().contains(&to)
    }
}

impl fmt::Display for InitPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current phase of one initialization run.
#[derive(Debug)]
pub struct PhaseTracker {
    phase: InitPhase,
}

impl Default for PhaseTracker {
    fn default() -> Self {
        Self {
            phase: InitPhase::Idle,
        }
    }
}

impl PhaseTracker {
    #[cfg(test)]
    pub fn phase(&self) -> InitPhase {
        self.phase
    }

    /// Move to `next`, rejecting transitions outside the table.
    pub fn advance(&mut self, next: InitPhase) -> Result<()> {
        if !self.phase.can_transition(next) {
            return Err(anyhow!(
                "invalid phase transition: {} -> {}",
                self.phase,
                next
            ));
        }
        tracing::debug!(from = %self.phase, to = %next, "init phase");
        self.phase = next;
        Ok(())
    }
}
