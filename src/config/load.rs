//! Config discovery, parsing, and validation.
use super::{Config, DEFAULT_CONFIG_FILE};
use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Locate the config: explicit path, then the working directory, then the
/// per-user config directory.
pub fn resolve_config_path(explicit: Option<&Path>, working_dir: &Path) -> Result<PathBuf> {
    if let Some(path) = explicit {
        let path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            working_dir.join(path)
        };
        if !path.is_file() {
            return Err(anyhow!("config not found at {}", path.display()));
        }
        return Ok(path);
    }

    let local = working_dir.join(DEFAULT_CONFIG_FILE);
    if local.is_file() {
        return Ok(local);
    }
    if let Some(user) = user_config_path().filter(|path| path.is_file()) {
        return Ok(user);
    }
    Err(anyhow!(
        "no {DEFAULT_CONFIG_FILE} in {} (pass --config or create one)",
        working_dir.display()
    ))
}

/// Per-user fallback location, e.g. `~/.config/adrm/config.json`.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("adrm").join(DEFAULT_CONFIG_FILE))
}

/// Read, parse, and validate a config file.
pub fn load_config(path: &Path) -> Result<Config> {
    let bytes = fs::read(path).with_context(|| format!("read config {}", path.display()))?;
    let config: Config = serde_json::from_slice(&bytes)
        .with_context(|| format!("parse config JSON {}", path.display()))?;
    validate_config(&config).with_context(|| format!("validate config {}", path.display()))?;
    Ok(config)
}

/// Reject configs that would leave the pipeline without output locations.
pub fn validate_config(config: &Config) -> Result<()> {
    if config.directories.is_empty() {
        return Err(anyhow!("at least one directory must be specified"));
    }
    if config.files.is_empty() {
        return Err(anyhow!("at least one file must be specified"));
    }
    for (role, path) in &config.directories {
        if path.trim().is_empty() {
            return Err(anyhow!("directory {role:?} has an empty path"));
        }
    }
    for (role, path) in &config.files {
        if path.trim().is_empty() {
            return Err(anyhow!("file {role:?} has an empty path"));
        }
    }
    for (role, ext) in &config.file_extensions {
        if ext.trim().is_empty() {
            return Err(anyhow!("file extension {role:?} must be non-empty"));
        }
    }
    if let Some(name) = config.model.name.as_deref() {
        if name.trim().is_empty() {
            return Err(anyhow!("model.name must be non-empty when set"));
        }
    }
    if config.engine.command.trim().is_empty() {
        return Err(anyhow!("engine.command must be non-empty"));
    }
    if config.engine.api_key_env.trim().is_empty() {
        return Err(anyhow!("engine.api_key_env must be non-empty"));
    }
    Ok(())
}

#[cfg(test)]
#[path = "load_tests.rs"]
mod tests;
