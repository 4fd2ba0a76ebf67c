//! Client-level include/exclude allow-lists.
//!
//! Matching is shell-style on the whole relative path: `*` also crosses `/`.
use crate::error::EngineError;
use globset::{Glob, GlobSet, GlobSetBuilder};

#[derive(Debug, Clone)]
pub struct FileFilter {
    include: Option<GlobSet>,
    exclude: Option<GlobSet>,
}

impl FileFilter {
    pub fn new(include: &[String], exclude: &[String]) -> Result<Self, EngineError> {
        Ok(Self {
            include: build_set(include)?,
            exclude: build_set(exclude)?,
        })
    }

    /// Whether `path` passes both lists.
    pub fn allows(&self, path: &str) -> bool {
        if let Some(include) = &self.include {
            if !include.is_match(path) {
                return false;
            }
        }
        match &self.exclude {
            Some(exclude) => !exclude.is_match(path),
            None => true,
        }
    }

    /// Keep the allowed paths, preserving order.
    pub fn apply<'a, I>(&self, paths: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a String>,
    {
        paths
            .into_iter()
            .filter(|path| self.allows(path))
            .cloned()
            .collect()
    }
}

fn build_set(patterns: &[String]) -> Result<Option<GlobSet>, EngineError> {
    if patterns.is_empty() {
        return Ok(None);
    }
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|err| EngineError::InvalidFilter {
            pattern: pattern.clone(),
            reason: err.to_string(),
        })?;
        builder.add(glob);
    }
    let set = builder.build().map_err(|err| EngineError::InvalidFilter {
        pattern: patterns.join(", "),
        reason: err.to_string(),
    })?;
    Ok(Some(set))
}
