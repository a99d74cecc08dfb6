//! Collaborator contracts: external renderer, cache backend, context provider.
//!
//! All three are `Send + Sync` so one process-wide instance can be shared by
//! every per-request [`RenderCoordinator`](crate::coordinator::RenderCoordinator).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::RenderError;
use crate::types::{PropsMap, RegisteredStores, RenderResult};

// ---------------------------------------------------------------------------
// External renderer
// ---------------------------------------------------------------------------

/// Arguments of one synchronous server-side render.
#[derive(Debug, Clone, Copy)]
pub struct RenderCall<'a> {
    pub component_name: &'a str,
    /// JSON-encoded props.
    pub props_json: &'a str,
    pub dom_id: &'a str,
    /// Every store registered so far in the pass.
    pub registered_stores: &'a RegisteredStores,
    pub trace: bool,
}

/// Performs server-side rendering of a component.
///
/// Component-level failures are reported through
/// [`RenderResult::has_errors`]; `Err` is reserved for failures that leave
/// no result at all (transport errors, fail-loud renderers).
pub trait ReactRenderer: Send + Sync {
    fn render(&self, call: &RenderCall<'_>) -> Result<RenderResult, RenderError>;
}

// ---------------------------------------------------------------------------
// Cache backend
// ---------------------------------------------------------------------------

/// Get/set store for server-rendered results. Storage and eviction are the
/// backend's business.
pub trait RenderCache: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<RenderResult>, RenderError>;
    fn set(&self, key: &str, value: &RenderResult) -> Result<(), RenderError>;
}

// ---------------------------------------------------------------------------
// Context provider
// ---------------------------------------------------------------------------

/// Produces the page context shipped to the browser bootstrap.
pub trait ContextProvider: Send + Sync {
    fn get_context(&self, server_side: bool) -> PropsMap;
}

impl ContextProvider for PropsMap {
    fn get_context(&self, server_side: bool) -> PropsMap {
        let mut ctx = self.clone();
        ctx.insert("serverSide".to_owned(), Value::Bool(server_side));
        ctx
    }
}

/// Context provider describing the request being rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestContext {
    pub scheme: String,
    pub host: String,
    pub port: u16,
    /// Base URL the application is mounted under (may be empty).
    pub base: String,
    /// Path below `base`.
    pub pathname: String,
    /// Query string without the leading `?`.
    pub search: Option<String>,
}

impl Default for RequestContext {
    fn default() -> Self {
        RequestContext::new("http", "localhost", 80)
    }
}

impl RequestContext {
    pub fn new(scheme: impl Into<String>, host: impl Into<String>, port: u16) -> Self {
        RequestContext {
            scheme: scheme.into(),
            host: host.into(),
            port,
            base: String::new(),
            pathname: "/".to_owned(),
            search: None,
        }
    }

    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base = base.into();
        self
    }

    pub fn with_path(mut self, pathname: impl Into<String>, search: Option<&str>) -> Self {
        self.pathname = pathname.into();
        self.search = search.filter(|s| !s.is_empty()).map(str::to_owned);
        self
    }

    /// Request URI: base, path and query string.
    pub fn location(&self) -> String {
        match &self.search {
            Some(search) => format!("{}{}?{}", self.base, self.pathname, search),
            None => format!("{}{}", self.base, self.pathname),
        }
    }

    /// Absolute URL; the port is omitted when it is the scheme's default.
    pub fn href(&self) -> String {
        let default_port = matches!(
            (self.scheme.as_str(), self.port),
            ("http", 80) | ("https", 443)
        );
        if default_port {
            format!("{}://{}{}", self.scheme, self.host, self.location())
        } else {
            format!("{}://{}:{}{}", self.scheme, self.host, self.port, self.location())
        }
    }
}

impl ContextProvider for RequestContext {
    fn get_context(&self, server_side: bool) -> PropsMap {
        let mut ctx = PropsMap::new();
        ctx.insert("serverSide".into(), Value::Bool(server_side));
        ctx.insert("href".into(), Value::String(self.href()));
        ctx.insert("location".into(), Value::String(self.location()));
        ctx.insert("scheme".into(), Value::String(self.scheme.clone()));
        ctx.insert("host".into(), Value::String(self.host.clone()));
        ctx.insert("port".into(), Value::from(self.port));
        ctx.insert("base".into(), Value::String(self.base.clone()));
        ctx.insert("pathname".into(), Value::String(self.pathname.clone()));
        ctx.insert(
            "search".into(),
            self.search.clone().map(Value::String).unwrap_or(Value::Null),
        );
        ctx
    }
}
