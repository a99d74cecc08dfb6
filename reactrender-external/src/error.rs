use std::path::PathBuf;

use thiserror::Error;

/// Error surface of the external rendering server client.
#[derive(Debug, Error)]
pub enum ExternalError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("rendering server is not running (socket missing: {socket})")]
    ServerNotRunning { socket: PathBuf },

    #[error("rendering server protocol error: {0}")]
    Protocol(String),

    /// The server answered but could not render at all.
    #[error("rendering server error: {0}")]
    Server(String),

    /// The render reported errors and the renderer is configured to fail loud.
    #[error("component '{component}' rendered with errors: {console_replay}")]
    FailLoud {
        component: String,
        console_replay: String,
    },
}

pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> ExternalError {
    ExternalError::Io {
        path: path.into(),
        source,
    }
}
