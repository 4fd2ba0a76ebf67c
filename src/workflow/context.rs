use crate::config::{self, Config};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Loaded configuration plus the directory every relative path resolves against.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub config: Config,
    pub config_path: PathBuf,
    pub working_dir: PathBuf,
}

impl RunContext {
    pub fn load(explicit_config: Option<&Path>, working_dir: PathBuf) -> Result<Self> {
        let config_path = config::resolve_config_path(explicit_config, &working_dir)?;
        let config = config::load_config(&config_path)?;
        tracing::debug!(
            config = %config_path.display(),
            working_dir = %working_dir.display(),
            "loaded config"
        );
        Ok(Self {
            config,
            config_path,
            working_dir,
        })
    }

    /// Load relative to the process working directory.
    pub fn load_from_cwd(explicit_config: Option<&Path>) -> Result<Self> {
        let working_dir = std::env::current_dir().context("resolve working directory")?;
        Self::load(explicit_config, working_dir)
    }

    pub fn steps_path(&self) -> PathBuf {
        self.config.steps_path(&self.working_dir)
    }
}
