//! [`TemplateEngine`] — Tera templates with the component helpers bound per pass.
//!
//! The loaded templates are shared; each render clones the Tera instance and
//! registers the helpers against that pass's coordinator, so concurrent
//! requests never see each other's stores, buffer or context flag.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tera::{Context, Tera};

use reactrender_core::{RenderCoordinator, RenderEnvironment};

use crate::error::{io_err, TemplateError};
use crate::functions::{register_functions, SharedCoordinator};

/// File extensions picked up when loading a template directory.
const TEMPLATE_EXTENSIONS: &[&str] = &["html", "htm", "tera", "xml"];

// ---------------------------------------------------------------------------
// Template loading helpers
// ---------------------------------------------------------------------------

fn normalize_template_name(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

fn collect_template_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), TemplateError> {
    let entries = std::fs::read_dir(dir).map_err(|e| io_err(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| io_err(dir, e))?;
        let path = entry.path();
        let meta = entry.metadata().map_err(|e| io_err(&path, e))?;
        if meta.is_dir() {
            collect_template_files(&path, out)?;
        } else if meta.is_file() {
            out.push(path);
        }
    }
    Ok(())
}

fn load_templates(dir: &Path) -> Result<Vec<(String, String)>, TemplateError> {
    let mut files = Vec::new();
    collect_template_files(dir, &mut files)?;
    files.sort();
    let mut templates = Vec::new();
    for path in files {
        let supported = path
            .extension()
            .and_then(|s| s.to_str())
            .is_some_and(|ext| TEMPLATE_EXTENSIONS.contains(&ext));
        if !supported {
            continue;
        }
        let rel = path.strip_prefix(dir).unwrap_or(path.as_path());
        let name = normalize_template_name(rel);
        let contents = std::fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;
        templates.push((name, contents));
    }
    Ok(templates)
}

// ---------------------------------------------------------------------------
// TemplateEngine
// ---------------------------------------------------------------------------

/// Tera templates plus the component helpers.
///
/// Template names are paths relative to the template directory, with `/`
/// separators. Build once and reuse across requests.
#[derive(Clone, Default)]
pub struct TemplateEngine {
    tera: Tera,
}

impl TemplateEngine {
    /// Load every template under `template_dir` (recursively).
    pub fn new(template_dir: &Path) -> Result<Self, TemplateError> {
        let mut tera = Tera::default();
        tera.add_raw_templates(load_templates(template_dir)?)?;
        Ok(TemplateEngine { tera })
    }

    /// Add (or replace) a template from a string.
    pub fn add_raw_template(&mut self, name: &str, content: &str) -> Result<(), TemplateError> {
        self.tera.add_raw_template(name, content)?;
        Ok(())
    }

    /// Names of all loaded templates, sorted.
    pub fn template_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tera.get_template_names().map(str::to_owned).collect();
        names.sort();
        names
    }

    /// Render `name` within an existing pass.
    ///
    /// Use this to render several templates (layout, fragments) into one
    /// document: they share stores, buffer and context flag.
    pub fn render_with(
        &self,
        name: &str,
        ctx: &Context,
        coordinator: &SharedCoordinator,
    ) -> Result<String, TemplateError> {
        let mut tera = self.tera.clone();
        register_functions(&mut tera, coordinator);
        Ok(tera.render(name, ctx)?)
    }

    /// Render `name` as a complete document with its own coordinator.
    ///
    /// Bootstrap markup still buffered when the template finishes was never
    /// flushed by the template; it is dropped with a warning.
    pub fn render(
        &self,
        name: &str,
        ctx: &Context,
        coordinator: RenderCoordinator,
    ) -> Result<String, TemplateError> {
        let shared = Arc::new(Mutex::new(coordinator));
        let html = self.render_with(name, ctx, &shared)?;
        if let Ok(coordinator) = shared.lock() {
            let pending = coordinator.buffered_len();
            if pending > 0 {
                tracing::warn!(
                    template = name,
                    pending,
                    "template finished without react_flush_buffer(); buffered components will not mount"
                );
            }
        }
        Ok(html)
    }

    /// Render `name` in a fresh pass of `env`.
    pub fn render_pass(
        &self,
        name: &str,
        ctx: &Context,
        env: &RenderEnvironment,
    ) -> Result<String, TemplateError> {
        self.render(name, ctx, env.begin_pass())
    }
}
