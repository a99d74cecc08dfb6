//! `reactrender render` — render one template with the component helpers.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use reactrender_cache::{FileCache, MemoryCache};
use reactrender_core::config::{self, ReactRenderConfig};
use reactrender_core::{RenderCache, RenderEnvironment, Rendering, RequestContext};
use reactrender_external::ExternalServerRenderer;
use reactrender_tera::TemplateEngine;

/// Arguments for `reactrender render`.
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Template name, relative to the templates directory.
    pub template: String,

    /// Directory holding the templates (overrides `templates_dir` in config).
    #[arg(long)]
    pub templates_dir: Option<PathBuf>,

    /// JSON object file used as the template context.
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Default rendering mode: server_side, client_side or both.
    #[arg(long, value_parser = parse_rendering)]
    pub rendering: Option<Rendering>,

    /// Unix socket of the rendering server.
    #[arg(long)]
    pub socket: Option<PathBuf>,

    /// Cache server-rendered output on disk in this directory.
    #[arg(long)]
    pub cache_dir: Option<PathBuf>,

    /// Ask the renderer to trace every component.
    #[arg(long)]
    pub trace: bool,

    /// Request path reported to the browser through the page context.
    #[arg(long, default_value = "/")]
    pub path: String,
}

fn parse_rendering(s: &str) -> std::result::Result<Rendering, String> {
    match Rendering::from_setting(s) {
        Rendering::Disabled => Err(format!(
            "unknown rendering mode '{s}'; expected: server_side, client_side, both"
        )),
        rendering => Ok(rendering),
    }
}

impl RenderArgs {
    pub fn run(self) -> Result<()> {
        let home = dirs::home_dir().context("could not determine home directory")?;
        let mut cfg = config::load_at(&home).context("failed to load config")?;
        self.apply_overrides(&mut cfg);

        let templates_dir = cfg
            .templates_dir
            .clone()
            .context("no templates directory; pass --templates-dir or set templates_dir in config")?;
        let engine = TemplateEngine::new(&templates_dir).with_context(|| {
            format!("failed to load templates from {}", templates_dir.display())
        })?;

        let ctx = match &self.data {
            Some(path) => load_context(path)?,
            None => tera::Context::new(),
        };

        let (pathname, search) = match self.path.split_once('?') {
            Some((pathname, search)) => (pathname.to_string(), Some(search)),
            None => (self.path.clone(), None),
        };
        let request = RequestContext::default().with_path(pathname, search);
        let env = build_environment(&cfg, request);

        let html = engine
            .render_pass(&self.template, &ctx, &env)
            .with_context(|| format!("failed to render '{}'", self.template))?;
        print!("{html}");
        Ok(())
    }

    fn apply_overrides(&self, cfg: &mut ReactRenderConfig) {
        if let Some(dir) = &self.templates_dir {
            cfg.templates_dir = Some(dir.clone());
        }
        if let Some(rendering) = self.rendering {
            cfg.default_rendering = rendering;
        }
        if let Some(socket) = &self.socket {
            cfg.renderer.socket = Some(socket.clone());
        }
        if let Some(dir) = &self.cache_dir {
            cfg.cache.enabled = true;
            cfg.cache.dir = Some(dir.clone());
        }
        if self.trace {
            cfg.trace = true;
        }
    }
}

fn load_context(path: &Path) -> Result<tera::Context> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;
    tera::Context::from_value(value)
        .with_context(|| format!("{} must contain a JSON object", path.display()))
}

/// Wire the configured collaborators into a render environment.
fn build_environment(cfg: &ReactRenderConfig, request: RequestContext) -> RenderEnvironment {
    let mut env = RenderEnvironment::from_config(cfg, Arc::new(request));

    match ExternalServerRenderer::from_config(&cfg.renderer) {
        Some(renderer) => {
            tracing::debug!(socket = %renderer.socket().display(), "using external rendering server");
            env = env
                .with_static_renderer(Arc::new(renderer.static_markup()))
                .with_renderer(Arc::new(renderer));
        }
        None => tracing::debug!("no rendering server configured"),
    }

    if cfg.cache.enabled {
        let cache: Arc<dyn RenderCache> = match &cfg.cache.dir {
            Some(dir) => Arc::new(FileCache::new(dir)),
            None => Arc::new(MemoryCache::new()),
        };
        env = env.with_cache(cache);
    }

    env
}
