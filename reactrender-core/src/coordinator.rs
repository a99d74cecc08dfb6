//! Render dispatch and per-pass state.
//!
//! [`RenderEnvironment`] is the process-wide part: collaborators and defaults,
//! cheap to clone. [`RenderCoordinator`] is created per document render pass
//! (one per request) and owns everything that must not leak between passes:
//! registered stores, the bootstrap buffer and the context-emitted flag.
//!
//! # Call flow
//!
//! ```text
//! props -> RenderRequest -> mode flags
//!   client: [context] + bootstrap tag  -> inline | buffer
//!   <div id=dom_id>
//!   server: cached? -> cache get | renderer -> cache set
//!           evaluated html + console replay
//!   </div>
//! ```

use std::fmt;
use std::sync::Arc;

use crate::backend::{ContextProvider, ReactRenderer, RenderCache, RenderCall, RequestContext};
use crate::buffer::Buffer;
use crate::config::ReactRenderConfig;
use crate::context::ContextEmitter;
use crate::error::RenderError;
use crate::markup;
use crate::mode;
use crate::props;
use crate::stores;
use crate::types::{
    Evaluated, EvaluatedComponent, Props, RegisteredStores, RenderFlags, RenderOptions,
    RenderRequest, RenderResult, Rendering,
};

// ---------------------------------------------------------------------------
// RenderEnvironment
// ---------------------------------------------------------------------------

/// Process-scoped collaborators and defaults shared by every pass.
#[derive(Clone)]
pub struct RenderEnvironment {
    renderer: Option<Arc<dyn ReactRenderer>>,
    static_renderer: Option<Arc<dyn ReactRenderer>>,
    context_provider: Arc<dyn ContextProvider>,
    cache: Option<Arc<dyn RenderCache>>,
    defaults: RenderFlags,
    trace: bool,
}

impl RenderEnvironment {
    /// Environment with no renderer, no cache and tracing off.
    pub fn new(context_provider: Arc<dyn ContextProvider>, default_rendering: Rendering) -> Self {
        RenderEnvironment {
            renderer: None,
            static_renderer: None,
            context_provider,
            cache: None,
            defaults: default_rendering.flags(),
            trace: false,
        }
    }

    /// Environment seeded from the config's default rendering mode and trace flag.
    pub fn from_config(config: &ReactRenderConfig, context_provider: Arc<dyn ContextProvider>) -> Self {
        RenderEnvironment::new(context_provider, config.default_rendering).with_trace(config.trace)
    }

    pub fn with_renderer(mut self, renderer: Arc<dyn ReactRenderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// Renderer used by the `*_static` entry points.
    pub fn with_static_renderer(mut self, renderer: Arc<dyn ReactRenderer>) -> Self {
        self.static_renderer = Some(renderer);
        self
    }

    pub fn with_cache(mut self, cache: Arc<dyn RenderCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    pub fn defaults(&self) -> RenderFlags {
        self.defaults
    }

    pub fn trace(&self) -> bool {
        self.trace
    }

    pub fn has_cache(&self) -> bool {
        self.cache.is_some()
    }

    /// Start a new render pass.
    pub fn begin_pass(&self) -> RenderCoordinator {
        RenderCoordinator::new(self.clone())
    }
}

impl Default for RenderEnvironment {
    fn default() -> Self {
        RenderEnvironment::new(Arc::new(RequestContext::default()), Rendering::default())
    }
}

impl fmt::Debug for RenderEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderEnvironment")
            .field("renderer", &self.renderer.is_some())
            .field("static_renderer", &self.static_renderer.is_some())
            .field("cache", &self.cache.is_some())
            .field("defaults", &self.defaults)
            .field("trace", &self.trace)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Pass state
// ---------------------------------------------------------------------------

/// Mutable state scoped to one document render pass.
#[derive(Debug, Default)]
pub struct PassState {
    stores: RegisteredStores,
    buffer: Buffer,
    context: ContextEmitter,
}

/// Markup assembled for one component, plus the renderer's `evaluated`
/// output when server rendering ran.
struct Assembled {
    markup: String,
    evaluated: Option<Evaluated>,
}

impl Assembled {
    fn into_component(self) -> EvaluatedComponent {
        let mut component = match self.evaluated {
            Some(Evaluated::Component(component)) => component,
            _ => EvaluatedComponent::default(),
        };
        component.component_html = self.markup;
        component
    }
}

// ---------------------------------------------------------------------------
// RenderCoordinator
// ---------------------------------------------------------------------------

/// Per-pass render coordinator backing the template helpers.
#[derive(Debug)]
pub struct RenderCoordinator {
    env: RenderEnvironment,
    pass: PassState,
}

impl RenderCoordinator {
    pub fn new(env: RenderEnvironment) -> Self {
        RenderCoordinator {
            env,
            pass: PassState::default(),
        }
    }

    pub fn environment(&self) -> &RenderEnvironment {
        &self.env
    }

    /// Stores registered so far in this pass.
    pub fn registered_stores(&self) -> &RegisteredStores {
        &self.pass.stores
    }

    /// Number of bootstrap fragments waiting for [`flush_buffer`](Self::flush_buffer).
    pub fn buffered_len(&self) -> usize {
        self.pass.buffer.len()
    }

    /// Drop all pass state and start a fresh pass with the same environment.
    pub fn reset(&mut self) {
        self.pass = PassState::default();
    }

    /// Render a component to markup using the configured renderer.
    pub fn render_component(
        &mut self,
        component_name: &str,
        options: &RenderOptions,
    ) -> Result<String, RenderError> {
        let renderer = self.env.renderer.clone();
        Ok(self.assemble(renderer.as_deref(), component_name, options)?.markup)
    }

    /// Like [`render_component`](Self::render_component), returning the
    /// renderer's structured output with `componentHtml` replaced by the
    /// assembled markup.
    pub fn render_component_array(
        &mut self,
        component_name: &str,
        options: &RenderOptions,
    ) -> Result<EvaluatedComponent, RenderError> {
        let renderer = self.env.renderer.clone();
        Ok(self
            .assemble(renderer.as_deref(), component_name, options)?
            .into_component())
    }

    /// [`render_component`](Self::render_component) with the static-markup renderer.
    pub fn render_component_static(
        &mut self,
        component_name: &str,
        options: &RenderOptions,
    ) -> Result<String, RenderError> {
        let renderer = self.env.static_renderer.clone();
        Ok(self.assemble(renderer.as_deref(), component_name, options)?.markup)
    }

    /// [`render_component_array`](Self::render_component_array) with the
    /// static-markup renderer.
    pub fn render_component_array_static(
        &mut self,
        component_name: &str,
        options: &RenderOptions,
    ) -> Result<EvaluatedComponent, RenderError> {
        let renderer = self.env.static_renderer.clone();
        Ok(self
            .assemble(renderer.as_deref(), component_name, options)?
            .into_component())
    }

    /// Render a component with an explicitly supplied renderer.
    pub fn render_component_with(
        &mut self,
        renderer: &dyn ReactRenderer,
        component_name: &str,
        options: &RenderOptions,
    ) -> Result<String, RenderError> {
        Ok(self.assemble(Some(renderer), component_name, options)?.markup)
    }

    /// Register a store for this pass and return its script block, preceded
    /// by the context block if it has not been emitted yet.
    ///
    /// Components rendered afterwards see the store; earlier ones do not.
    pub fn register_store(&mut self, store_name: &str, props: &Props) -> Result<String, RenderError> {
        let serialized = stores::register(&mut self.pass.stores, store_name, props)?;
        tracing::debug!(store = store_name, "registered store");
        let mut out = self.emit_context()?;
        out.push_str(&markup::store_tag(store_name, &serialized));
        Ok(out)
    }

    /// Return every buffered bootstrap fragment in call order and empty the buffer.
    pub fn flush_buffer(&mut self) -> String {
        self.pass.buffer.flush()
    }

    /// The context script block, once per pass.
    pub fn emit_context(&mut self) -> Result<String, RenderError> {
        self.pass.context.maybe_emit(self.env.context_provider.as_ref())
    }

    // -----------------------------------------------------------------------
    // Shared dispatch path
    // -----------------------------------------------------------------------

    fn assemble(
        &mut self,
        renderer: Option<&dyn ReactRenderer>,
        component_name: &str,
        options: &RenderOptions,
    ) -> Result<Assembled, RenderError> {
        let props = props::resolve(options.props.as_ref())?;
        let request = RenderRequest::new(
            component_name,
            props,
            options.trace.unwrap_or(self.env.trace),
        );
        let flags = mode::resolve(options, self.env.defaults);
        tracing::debug!(
            component = component_name,
            dom_id = %request.dom_id,
            server = flags.server,
            client = flags.client,
            "rendering component"
        );

        let bootstrap = if flags.client {
            Some(markup::bootstrap_tag(
                &request.component_name,
                &request.dom_id,
                &props::encode(&request.props)?,
            ))
        } else {
            None
        };

        let rendered = if flags.server {
            let renderer = renderer.ok_or(RenderError::NoRenderer)?;
            Some(self.server_render(renderer, &request, options)?)
        } else {
            None
        };

        // Pass state (context flag, buffer) changes only after every fallible
        // step above succeeded; a failed call leaves the pass untouched.
        let mut out = String::new();

        if let Some(tag) = bootstrap {
            let mut fragment = self.emit_context()?;
            fragment.push_str(&tag);
            if options.buffered {
                self.pass.buffer.push(fragment);
            } else {
                out.push_str(&fragment);
            }
        }

        out.push_str(&markup::container_open(&request.dom_id));

        let mut evaluated = None;
        if let Some(rendered) = rendered {
            if rendered.has_errors {
                tracing::warn!(component = component_name, "server render reported errors");
            }
            out.push_str(rendered.evaluated.html());
            out.push_str(&rendered.console_replay);
            evaluated = Some(rendered.evaluated);
        }

        out.push_str(markup::CONTAINER_CLOSE);

        Ok(Assembled { markup: out, evaluated })
    }

    fn server_render(
        &self,
        renderer: &dyn ReactRenderer,
        request: &RenderRequest,
        options: &RenderOptions,
    ) -> Result<RenderResult, RenderError> {
        if !options.cached {
            return self.direct_render(renderer, request);
        }
        let Some(cache) = self.env.cache.as_deref() else {
            tracing::debug!(
                component = %request.component_name,
                "cached render requested without a cache backend"
            );
            return self.direct_render(renderer, request);
        };

        let key = cache_key(&request.component_name, options.explicit_cache_key());
        if let Some(hit) = cache.get(&key)? {
            tracing::debug!(key = %key, "render cache hit");
            return Ok(hit);
        }
        tracing::debug!(key = %key, "render cache miss");

        let rendered = self.direct_render(renderer, request)?;
        cache.set(&key, &rendered)?;
        Ok(rendered)
    }

    fn direct_render(
        &self,
        renderer: &dyn ReactRenderer,
        request: &RenderRequest,
    ) -> Result<RenderResult, RenderError> {
        let props_json = props::encode(&request.props)?;
        renderer.render(&RenderCall {
            component_name: &request.component_name,
            props_json: &props_json,
            dom_id: &request.dom_id,
            registered_stores: &self.pass.stores,
            trace: request.trace,
        })
    }
}

/// Cache key for a component: the component name followed by the explicit
/// key, or by `<component>.rendered` when none is given.
pub fn cache_key(component_name: &str, explicit_key: Option<&str>) -> String {
    match explicit_key {
        Some(key) => format!("{component_name}{key}"),
        None => format!("{component_name}{component_name}.rendered"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_key_defaults_to_component_rendered() {
        assert_eq!(cache_key("Greeter", None), "GreeterGreeter.rendered");
        assert_eq!(cache_key("Greeter", Some("v2")), "Greeterv2");
        assert_ne!(cache_key("A", None), cache_key("B", None));
    }

    #[test]
    fn reset_clears_pass_state() {
        let env = RenderEnvironment::default();
        let mut coordinator = env.begin_pass();
        coordinator
            .register_store("s1", &Props::from(r#"{"x":1}"#))
            .unwrap();
        coordinator
            .render_component(
                "Widget",
                &RenderOptions::default()
                    .with_rendering(Rendering::ClientSide)
                    .buffered(),
            )
            .unwrap();
        assert_eq!(coordinator.buffered_len(), 1);

        coordinator.reset();
        assert!(coordinator.registered_stores().is_empty());
        assert_eq!(coordinator.buffered_len(), 0);
        assert!(!coordinator.emit_context().unwrap().is_empty());
    }

    #[test]
    fn server_render_without_renderer_fails() {
        let env = RenderEnvironment::default();
        let err = env
            .begin_pass()
            .render_component("Widget", &RenderOptions::default())
            .unwrap_err();
        assert!(matches!(err, RenderError::NoRenderer), "got: {err}");
    }

    #[test]
    fn disabled_rendering_yields_empty_container() {
        let env = RenderEnvironment::default();
        let mut coordinator = env.begin_pass();
        let component = coordinator
            .render_component_array(
                "Widget",
                &RenderOptions::default().with_rendering(Rendering::from("nowhere")),
            )
            .unwrap();
        assert!(component.component_html.starts_with("<div id=\"sfreact-"));
        assert!(component.component_html.ends_with("\"></div>"));
        assert!(component.extra.is_empty());
    }
}
