//! File access for step context: pattern resolution and persistence.
mod context;
mod handler;

pub use context::{FileContentMap, FileContextResolver};
pub use handler::{FileHandler, LocalFileHandler, RetryPolicy};
