//! Error types for reactrender-core.

use std::path::PathBuf;

use thiserror::Error;

/// Boxed source error carried by backend failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// All errors that can abort a single render call.
///
/// Errors *reported* by the external renderer (`hasErrors` on a
/// [`RenderResult`](crate::types::RenderResult)) are not represented here;
/// they are embedded in the markup instead.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Structured props could not be serialized to JSON.
    #[error("JSON could not be encoded, error message was: {0}")]
    PropsEncode(#[source] serde_json::Error),

    /// Serialized props could not be parsed into a props map.
    #[error("JSON could not be decoded, error message was: {0}")]
    PropsDecode(#[source] serde_json::Error),

    /// The external renderer could not produce a result.
    #[error("renderer failed for component '{component}': {source}")]
    Renderer {
        component: String,
        #[source]
        source: BoxError,
    },

    /// The cache backend failed while reading or writing `key`.
    #[error("cache backend failed for key '{key}': {source}")]
    Cache {
        key: String,
        #[source]
        source: BoxError,
    },

    /// Server-side rendering was requested but no renderer is configured.
    #[error("server-side rendering requested but no renderer is configured")]
    NoRenderer,
}

impl RenderError {
    /// Convenience constructor for [`RenderError::Renderer`].
    pub fn renderer(component: impl Into<String>, source: impl Into<BoxError>) -> Self {
        RenderError::Renderer {
            component: component.into(),
            source: source.into(),
        }
    }

    /// Convenience constructor for [`RenderError::Cache`].
    pub fn cache(key: impl Into<String>, source: impl Into<BoxError>) -> Self {
        RenderError::Cache {
            key: key.into(),
            source: source.into(),
        }
    }
}

/// Errors raised while loading or saving the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Filesystem error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parse error on load.
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// YAML serialization error (save path).
    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// `dirs::home_dir()` returned `None`.
    #[error("cannot determine home directory; set $HOME or equivalent")]
    HomeNotFound,
}

pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> ConfigError {
    ConfigError::Io {
        path: path.into(),
        source,
    }
}
