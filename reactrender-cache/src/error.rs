//! Error types for reactrender-cache.

use std::path::PathBuf;

use thiserror::Error;

use reactrender_core::RenderError;

/// Failures of the cache backends themselves. Surfaced to the coordinator as
/// [`RenderError::Cache`].
#[derive(Debug, Error)]
pub enum CacheError {
    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A cache entry could not be serialized or parsed.
    #[error("cache entry JSON error at {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// An entry file exists but was written for a different key.
    #[error("cache entry at {path} belongs to key '{found}'")]
    KeyMismatch { path: PathBuf, found: String },

    /// The in-memory map's lock was poisoned by a panicking writer.
    #[error("cache lock poisoned")]
    Poisoned,
}

impl CacheError {
    pub(crate) fn into_render(self, key: &str) -> RenderError {
        RenderError::cache(key, self)
    }
}

pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> CacheError {
    CacheError::Io {
        path: path.into(),
        source,
    }
}
