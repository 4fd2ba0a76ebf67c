//! Project configuration schema.
//!
//! The config is loaded once per run and treated as read-only by the step
//! pipeline; every role lookup goes through the helpers here so paths stay
//! relative to the working directory.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

mod load;

pub use load::{load_config, resolve_config_path};

/// File name looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "config.json";
/// Steps file used when the config has no `steps` file role.
pub const DEFAULT_STEPS_FILE: &str = "steps.json";
/// File role naming the step list.
pub const STEPS_FILE_ROLE: &str = "steps";
/// Directory and extension role for standards documents.
pub const STANDARDS_ROLE: &str = "standards";
/// Environment variable consulted last when resolving engine credentials.
pub const API_KEY_ENV: &str = "ADRM_API_KEY";

const DEFAULT_ENGINE_COMMAND: &str = "aider";
const DEFAULT_ENGINE_KEY_ENV: &str = "OPENAI_API_KEY";
const DEFAULT_CHAT_HISTORY_FILE: &str = ".aider.chat.history.md";
const DEFAULT_CODER_TYPE: &str = "editblock";
const DEFAULT_STANDARDS_EXTENSION: &str = ".md";

/// Top-level `config.json` contents.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Config {
    /// Directory role name to path; every entry is created by `init`.
    pub directories: BTreeMap<String, String>,
    /// File role name to path.
    pub files: BTreeMap<String, String>,
    #[serde(default)]
    pub model: ModelDefaults,
    #[serde(default)]
    pub io: IoConfig,
    /// File role name to extension (including the leading dot).
    #[serde(default)]
    pub file_extensions: BTreeMap<String, String>,
    #[serde(default)]
    pub engine: EngineConfig,
}

/// Workflow-level model defaults used when a step has no override.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct ModelDefaults {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct IoConfig {
    /// Answer yes to every engine confirmation.
    pub auto_confirm: bool,
}

impl Default for IoConfig {
    fn default() -> Self {
        Self { auto_confirm: true }
    }
}

/// Settings for the external edit engine.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct EngineConfig {
    /// Engine command line, split with shell-words.
    pub command: String,
    /// Environment variable the engine reads its key from.
    pub api_key_env: String,
    /// Client-level credential, used when a step has none.
    pub api_key: Option<String>,
    pub chat_history_file: Option<String>,
    pub git_enabled: bool,
    pub stream_output: bool,
    pub pretty: bool,
    pub coder: CoderConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            command: DEFAULT_ENGINE_COMMAND.to_string(),
            api_key_env: DEFAULT_ENGINE_KEY_ENV.to_string(),
            api_key: None,
            chat_history_file: Some(DEFAULT_CHAT_HISTORY_FILE.to_string()),
            git_enabled: true,
            stream_output: true,
            pretty: true,
            coder: CoderConfig::default(),
        }
    }
}

/// Coder strategy and the client-side file allow-lists.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct CoderConfig {
    /// Strategy selector; checked when the engine client is built.
    #[serde(rename = "type")]
    pub kind: String,
    pub include_patterns: Vec<String>,
    pub exclude_patterns: Vec<String>,
}

impl Default for CoderConfig {
    fn default() -> Self {
        Self {
            kind: DEFAULT_CODER_TYPE.to_string(),
            include_patterns: Vec::new(),
            exclude_patterns: Vec::new(),
        }
    }
}

impl Config {
    /// Resolve every configured directory against the working directory.
    pub fn directory_paths(&self, working_dir: &Path) -> Vec<(String, PathBuf)> {
        self.directories
            .iter()
            .map(|(role, rel)| (role.clone(), working_dir.join(rel)))
            .collect()
    }

    /// Resolve a directory role, if configured.
    pub fn directory(&self, role: &str, working_dir: &Path) -> Option<PathBuf> {
        self.directories.get(role).map(|rel| working_dir.join(rel))
    }

    /// Resolve the step list path, falling back to `steps.json`.
    pub fn steps_path(&self, working_dir: &Path) -> PathBuf {
        let rel = self
            .files
            .get(STEPS_FILE_ROLE)
            .map(String::as_str)
            .unwrap_or(DEFAULT_STEPS_FILE);
        working_dir.join(rel)
    }

    /// Extension for a file role; standards default to `.md`.
    pub fn extension(&self, role: &str) -> &str {
        match self.file_extensions.get(role) {
            Some(ext) => ext.as_str(),
            None if role == STANDARDS_ROLE => DEFAULT_STANDARDS_EXTENSION,
            None => "",
        }
    }
}
