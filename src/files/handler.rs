//! Local file persistence with change detection and retried writes.
use anyhow::{anyhow, Context, Result};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

/// Read/write capability for generated files.
pub trait FileHandler {
    /// Write `content`, creating parent directories as needed.
    fn write(&self, path: &Path, content: &str) -> Result<()>;

    /// Read the full UTF-8 content of `path`.
    fn read(&self, path: &Path) -> Result<String>;
}

/// Exponential backoff schedule for transient write failures.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, including the first one.
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub multiplier: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_secs(4),
            max_delay: Duration::from_secs(10),
            multiplier: 2,
        }
    }
}

impl RetryPolicy {
    /// Retry without sleeping between attempts.
    #[cfg(test)]
    pub fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            initial_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
            multiplier: 1,
        }
    }

    /// Delay to wait after the given failed attempt (1-based).
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let factor = self
            .multiplier
            .saturating_pow(attempt.saturating_sub(1));
        self.initial_delay
            .saturating_mul(factor)
            .min(self.max_delay)
    }
}

/// Writes files under the local filesystem.
///
/// Remembers the last content written per path and skips identical rewrites.
#[derive(Debug, Default)]
pub struct LocalFileHandler {
    retry: RetryPolicy,
    written: RefCell<HashMap<PathBuf, String>>,
}

impl LocalFileHandler {
    pub fn new(retry: RetryPolicy) -> Self {
        Self {
            retry,
            written: RefCell::new(HashMap::new()),
        }
    }

    fn write_once(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
        }
        fs::write(path, content.as_bytes()).with_context(|| format!("write {}", path.display()))
    }
}

impl FileHandler for LocalFileHandler {
    fn write(&self, path: &Path, content: &str) -> Result<()> {
        if self.written.borrow().get(path).map(String::as_str) == Some(content) {
            tracing::debug!(path = %path.display(), "content unchanged; skipping write");
            return Ok(());
        }

        let attempts = self.retry.max_attempts.max(1);
        let mut last_err = None;
        for attempt in 1..=attempts {
            match Self::write_once(path, content) {
                Ok(()) => {
                    self.written
                        .borrow_mut()
                        .insert(path.to_path_buf(), content.to_string());
                    return Ok(());
                }
                Err(err) => {
                    tracing::warn!(
                        path = %path.display(),
                        attempt,
                        max_attempts = attempts,
                        error = %format!("{err:#}"),
                        "file write failed"
                    );
                    if attempt < attempts {
                        thread::sleep(self.retry.delay_after(attempt));
                    }
                    last_err = Some(err);
                }
            }
        }
        Err(last_err.unwrap_or_else(|| anyhow!("write {}", path.display())))
    }

    fn read(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).with_context(|| format!("read {}", path.display()))
    }
}
