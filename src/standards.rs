//! Standards documents written under the configured `standards` directory.
//!
//! Files are named `<technology>_<kind>_standards<ext>`.
use crate::config::{Config, STANDARDS_ROLE};
use crate::files::FileHandler;
use anyhow::{anyhow, Context, Result};
use regex::Regex;
use std::path::{Path, PathBuf};

/// Which standards document to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum StandardsKind {
    Implementation,
    Performance,
}

impl StandardsKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StandardsKind::Implementation => "implementation",
            StandardsKind::Performance => "performance",
        }
    }
}

/// Writes standards documents for a technology.
pub trait StandardsGenerator {
    fn create_implementation_standards(&self, technology: &str, content: &str) -> Result<PathBuf>;
    fn create_performance_standards(&self, technology: &str, content: &str) -> Result<PathBuf>;

    fn create(&self, kind: StandardsKind, technology: &str, content: &str) -> Result<PathBuf> {
        match kind {
            StandardsKind::Implementation => {
                self.create_implementation_standards(technology, content)
            }
            StandardsKind::Performance => self.create_performance_standards(technology, content),
        }
    }
}

pub struct FileSystemStandardsGenerator<'a> {
    standards_dir: PathBuf,
    extension: String,
    handler: &'a dyn FileHandler,
}

impl<'a> FileSystemStandardsGenerator<'a> {
    /// Requires a `standards` directory role in `config`.
    pub fn new(config: &Config, working_dir: &Path, handler: &'a dyn FileHandler) -> Result<Self> {
        let standards_dir = config
            .directory(STANDARDS_ROLE, working_dir)
            .ok_or_else(|| anyhow!("config has no '{STANDARDS_ROLE}' directory"))?;
        Ok(Self {
            standards_dir,
            extension: config.extension(STANDARDS_ROLE).to_string(),
            handler,
        })
    }

    /// Target path for one document; rejects names that would leave the directory.
    pub fn path_for(&self, kind: StandardsKind, technology: &str) -> Result<PathBuf> {
        let name = Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._+-]*$").context("compile name regex")?;
        if !name.is_match(technology) {
            return Err(anyhow!(
                "invalid technology name {technology:?} (letters, digits, '.', '_', '+', '-')"
            ));
        }
        Ok(self.standards_dir.join(format!(
            "{technology}_{}_standards{}",
            kind.as_str(),
            self.extension
        )))
    }

    fn write(&self, kind: StandardsKind, technology: &str, content: &str) -> Result<PathBuf> {
        let path = self.path_for(kind, technology)?;
        self.handler
            .write(&path, content)
            .with_context(|| format!("write {} standards for {technology}", kind.as_str()))?;
        tracing::info!(
            technology,
            kind = kind.as_str(),
            path = %path.display(),
            "created standards"
        );
        Ok(path)
    }
}

impl StandardsGenerator for FileSystemStandardsGenerator<'_> {
    fn create_implementation_standards(&self, technology: &str, content: &str) -> Result<PathBuf> {
        self.write(StandardsKind::Implementation, technology, content)
    }

    fn create_performance_standards(&self, technology: &str, content: &str) -> Result<PathBuf> {
        self.write(StandardsKind::Performance, technology, content)
    }
}
