//! Expands step file patterns into the content map handed to the engine.
//!
//! Missing literal paths are offered for creation through the [`Prompter`];
//! existing files are read as-is and never rewritten.
use super::FileHandler;
use crate::prompt::Prompter;
use anyhow::{Context, Result};
use globset::{GlobBuilder, GlobMatcher};
use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Relative path to full file content for one step.
pub type FileContentMap = BTreeMap<String, String>;

const GLOB_CHARS: [char; 3] = ['*', '?', '['];

/// Resolves literal paths and glob patterns relative to a working directory.
pub struct FileContextResolver<'a> {
    working_dir: PathBuf,
    prompter: &'a dyn Prompter,
    handler: &'a dyn FileHandler,
}

impl<'a> FileContextResolver<'a> {
    pub fn new(
        working_dir: PathBuf,
        prompter: &'a dyn Prompter,
        handler: &'a dyn FileHandler,
    ) -> Self {
        Self {
            working_dir,
            prompter,
            handler,
        }
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Build a fresh content map for `patterns`, in order.
    ///
    /// Unmatched globs and declined creations are skipped, so the result may
    /// be empty without being an error.
    pub fn resolve(&self, patterns: &[String]) -> Result<FileContentMap> {
        let mut files = FileContentMap::new();
        for pattern in patterns {
            if is_glob(pattern) && !self.working_dir.join(pattern).exists() {
                let matches = self.expand_glob(pattern)?;
                if matches.is_empty() {
                    tracing::warn!(pattern = %pattern, "no files matched pattern");
                    continue;
                }
                for path in matches {
                    self.add_file(&path, &mut files)?;
                }
            } else {
                self.add_file(pattern, &mut files)?;
            }
        }
        Ok(files)
    }

    fn add_file(&self, rel: &str, files: &mut FileContentMap) -> Result<()> {
        if files.contains_key(rel) {
            return Ok(());
        }
        let full = self.working_dir.join(rel);
        if full.is_dir() {
            tracing::warn!(path = %rel, "path is a directory; skipping");
            return Ok(());
        }
        if full.exists() {
            let content = self.handler.read(&full)?;
            files.insert(rel.to_string(), content);
            return Ok(());
        }
        if let Some(content) = self.prompt_for_content(rel)? {
            self.handler
                .write(&full, &content)
                .with_context(|| format!("create {rel}"))?;
            tracing::info!(path = %rel, bytes = content.len(), "created file");
            files.insert(rel.to_string(), content);
        }
        Ok(())
    }

    fn prompt_for_content(&self, rel: &str) -> Result<Option<String>> {
        let create = self.prompter.confirm(
            &format!("File '{rel}' does not exist. Would you like to create it?"),
            true,
        )?;
        if !create {
            tracing::debug!(path = %rel, "creation declined");
            return Ok(None);
        }
        let content = self
            .prompter
            .edit(rel, &format!("# Enter content for {rel}\n"))?;
        Ok(content.filter(|text| !text.is_empty()))
    }

    /// Expand a glob into sorted paths relative to the working directory.
    ///
    /// `*` and `?` stay within one path component; `**` spans directories.
    /// A dot-prefixed entry is only walked when some dot-prefixed pattern
    /// component matches its name. Paths keep the pattern's literal prefix,
    /// so `../lib/*.py` yields `../lib/a.py`.
    fn expand_glob(&self, pattern: &str) -> Result<Vec<String>> {
        let pattern = pattern.strip_prefix("./").unwrap_or(pattern);
        let matcher = compile_glob(pattern)?;
        let dotted = dotted_components(pattern)?;
        let prefix = literal_prefix(pattern);
        let base = self.working_dir.join(&prefix);
        if !base.is_dir() {
            return Ok(Vec::new());
        }

        let mut matches = Vec::new();
        let walker = WalkDir::new(&base)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                entry.depth() == 0
                    || !is_hidden(entry)
                    || dotted.iter().any(|part| part.is_match(entry.file_name()))
            });
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::warn!(pattern = %pattern, error = %err, "skipping unreadable path");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let Ok(rel) = entry.path().strip_prefix(&base) else {
                continue;
            };
            let candidate = join_prefix(&prefix, &slash_path(rel));
            if matcher.is_match(&candidate) {
                matches.push(candidate);
            }
        }
        matches.sort();
        matches.dedup();
        Ok(matches)
    }
}

fn is_glob(pattern: &str) -> bool {
    pattern.contains(GLOB_CHARS)
}

fn compile_glob(pattern: &str) -> Result<GlobMatcher> {
    let glob = GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .with_context(|| format!("invalid glob pattern {pattern:?}"))?;
    Ok(glob.compile_matcher())
}

/// Matchers for the dot-prefixed components from the first wildcard on.
fn dotted_components(pattern: &str) -> Result<Vec<GlobMatcher>> {
    pattern
        .split('/')
        .skip_while(|part| !part.contains(GLOB_CHARS))
        .filter(|part| part.starts_with('.') && *part != "." && *part != "..")
        .map(compile_glob)
        .collect()
}

/// Leading directory components that contain no glob characters, as written.
fn literal_prefix(pattern: &str) -> String {
    let mut parts: Vec<&str> = pattern.split('/').collect();
    parts.pop();
    let prefix = parts
        .into_iter()
        .take_while(|part| !part.contains(GLOB_CHARS))
        .collect::<Vec<_>>()
        .join("/");
    if prefix.is_empty() && pattern.starts_with('/') {
        "/".to_string()
    } else {
        prefix
    }
}

fn join_prefix(prefix: &str, rel: &str) -> String {
    if prefix.is_empty() {
        rel.to_string()
    } else if prefix.ends_with('/') {
        format!("{prefix}{rel}")
    } else {
        format!("{prefix}/{rel}")
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

fn slash_path(path: &Path) -> String {
    path.components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
