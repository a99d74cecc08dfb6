//! YAML configuration file.
//!
//! # Storage layout
//!
//! ```text
//! ~/.reactrender/
//!   config.yaml
//! ```
//!
//! # API pattern
//!
//! - `fn_at(home: &Path, …)` — explicit home; used in tests with `TempDir`
//! - `fn(…)` — derives home from `dirs::home_dir()`, delegates to `_at`

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{io_err, ConfigError};
use crate::types::Rendering;

/// Process-wide rendering defaults and collaborator settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ReactRenderConfig {
    /// `server_side`, `client_side` or `both`.
    pub default_rendering: Rendering,
    /// Ask the renderer to trace every call unless a call overrides it.
    pub trace: bool,
    pub renderer: RendererConfig,
    pub cache: CacheConfig,
    /// Directory of templates for the CLI.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub templates_dir: Option<PathBuf>,
}

/// External rendering server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RendererConfig {
    /// Unix socket of the rendering server; no server-side rendering when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub socket: Option<PathBuf>,
    /// Turn renderer-reported errors into hard failures.
    pub fail_loud: bool,
}

/// Render cache settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CacheConfig {
    pub enabled: bool,
    /// On-disk cache directory; in-memory cache when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

/// `<home>/.reactrender/config.yaml` — pure, no I/O.
pub fn config_path_at(home: &Path) -> PathBuf {
    home.join(".reactrender").join("config.yaml")
}

/// Load the config, falling back to defaults when the file does not exist.
pub fn load_at(home: &Path) -> Result<ReactRenderConfig, ConfigError> {
    let path = config_path_at(home);
    if !path.exists() {
        return Ok(ReactRenderConfig::default());
    }
    let contents = std::fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;
    serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse { path, source })
}

/// `load_at` convenience wrapper.
pub fn load() -> Result<ReactRenderConfig, ConfigError> {
    load_at(&home()?)
}

/// Save the config atomically (`.tmp` + rename). Returns the written path.
pub fn save_at(home: &Path, config: &ReactRenderConfig) -> Result<PathBuf, ConfigError> {
    let path = config_path_at(home);
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| io_err(dir, e))?;
    }
    let yaml = serde_yaml::to_string(config)?;
    let tmp = path.with_extension("yaml.tmp");
    std::fs::write(&tmp, yaml).map_err(|e| io_err(&tmp, e))?;
    std::fs::rename(&tmp, &path).map_err(|e| io_err(&path, e))?;
    Ok(path)
}

/// `save_at` convenience wrapper.
pub fn save(config: &ReactRenderConfig) -> Result<PathBuf, ConfigError> {
    save_at(&home()?, config)
}

fn home() -> Result<PathBuf, ConfigError> {
    dirs::home_dir().ok_or(ConfigError::HomeNotFound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let home = TempDir::new().unwrap();
        let cfg = load_at(home.path()).unwrap();
        assert_eq!(cfg, ReactRenderConfig::default());
        assert_eq!(cfg.default_rendering, Rendering::Both);
    }

    #[test]
    fn save_then_load() {
        let home = TempDir::new().unwrap();
        let cfg = ReactRenderConfig {
            default_rendering: Rendering::ServerSide,
            trace: true,
            renderer: RendererConfig {
                socket: Some(PathBuf::from("/tmp/node-render.sock")),
                fail_loud: true,
            },
            cache: CacheConfig {
                enabled: true,
                dir: None,
            },
            templates_dir: Some(PathBuf::from("templates")),
        };
        let path = save_at(home.path(), &cfg).unwrap();
        assert!(!path.with_extension("yaml.tmp").exists());
        assert_eq!(load_at(home.path()).unwrap(), cfg);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let home = TempDir::new().unwrap();
        let path = config_path_at(home.path());
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "default_rendering: client_side\n").unwrap();

        let cfg = load_at(home.path()).unwrap();
        assert_eq!(cfg.default_rendering, Rendering::ClientSide);
        assert!(!cfg.trace);
        assert!(cfg.renderer.socket.is_none());
    }

    #[test]
    fn corrupt_file_reports_path() {
        let home = TempDir::new().unwrap();
        let path = config_path_at(home.path());
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "- not\n- a mapping\n").unwrap();

        let err = load_at(home.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }), "got: {err}");
        assert!(err.to_string().contains("config.yaml"));
    }
}
