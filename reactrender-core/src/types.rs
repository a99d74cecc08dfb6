//! Data model shared by the coordinator and its collaborators.
//!
//! JSON-facing types use the camelCase field names the browser bootstrap and
//! rendering servers expect (`hasErrors`, `componentHtml`, ...).

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Structured component props: a JSON object.
pub type PropsMap = Map<String, Value>;

/// Store name -> serialized store props, as registered during one pass.
pub type RegisteredStores = BTreeMap<String, String>;

/// Prefix of every generated mount point id.
pub const DOM_ID_PREFIX: &str = "sfreact-reactRenderer";

// ---------------------------------------------------------------------------
// Rendering mode
// ---------------------------------------------------------------------------

/// Where a component is rendered.
///
/// Parsed from `server_side`, `client_side` or `both`. Any other setting maps
/// to [`Rendering::Disabled`], which renders neither side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Rendering {
    ServerSide,
    ClientSide,
    #[default]
    Both,
    Disabled,
}

impl Rendering {
    /// Parse a rendering setting; unrecognized values are [`Rendering::Disabled`].
    pub fn from_setting(setting: &str) -> Self {
        match setting {
            "server_side" => Rendering::ServerSide,
            "client_side" => Rendering::ClientSide,
            "both" => Rendering::Both,
            _ => Rendering::Disabled,
        }
    }

    /// Canonical setting string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Rendering::ServerSide => "server_side",
            Rendering::ClientSide => "client_side",
            Rendering::Both => "both",
            Rendering::Disabled => "none",
        }
    }

    /// Server/client flags for this mode.
    pub fn flags(self) -> RenderFlags {
        match self {
            Rendering::ServerSide => RenderFlags { server: true, client: false },
            Rendering::ClientSide => RenderFlags { server: false, client: true },
            Rendering::Both => RenderFlags { server: true, client: true },
            Rendering::Disabled => RenderFlags::default(),
        }
    }
}

impl fmt::Display for Rendering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Rendering {
    fn from(s: &str) -> Self {
        Rendering::from_setting(s)
    }
}

impl From<String> for Rendering {
    fn from(s: String) -> Self {
        Rendering::from_setting(&s)
    }
}

impl From<Rendering> for String {
    fn from(r: Rendering) -> Self {
        r.as_str().to_owned()
    }
}

/// Resolved server/client rendering flags for one call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderFlags {
    pub server: bool,
    pub client: bool,
}

impl From<Rendering> for RenderFlags {
    fn from(r: Rendering) -> Self {
        r.flags()
    }
}

// ---------------------------------------------------------------------------
// Props and options
// ---------------------------------------------------------------------------

/// Props as supplied by the caller: either a structured map or its JSON text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Props {
    Serialized(String),
    Structured(PropsMap),
}

impl Default for Props {
    fn default() -> Self {
        Props::Structured(PropsMap::new())
    }
}

impl From<PropsMap> for Props {
    fn from(map: PropsMap) -> Self {
        Props::Structured(map)
    }
}

impl From<String> for Props {
    fn from(s: String) -> Self {
        Props::Serialized(s)
    }
}

impl From<&str> for Props {
    fn from(s: &str) -> Self {
        Props::Serialized(s.to_owned())
    }
}

/// Per-call options. Every field is optional; unknown keys are ignored when
/// deserializing from a JSON object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Component props; an empty map when absent.
    pub props: Option<Props>,
    /// Overrides the process default rendering mode entirely.
    pub rendering: Option<Rendering>,
    /// Overrides the process default trace flag.
    pub trace: Option<bool>,
    /// Memoize the server-side result in the cache backend.
    pub cached: bool,
    /// Cache key suffix; defaults to `<component>.rendered`.
    pub cache_key: Option<String>,
    /// Hold client bootstrap markup until the buffer is flushed.
    pub buffered: bool,
}

impl RenderOptions {
    /// Build options from a loosely-typed JSON object (template keyword args).
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    pub fn with_props(mut self, props: impl Into<Props>) -> Self {
        self.props = Some(props.into());
        self
    }

    pub fn with_rendering(mut self, rendering: Rendering) -> Self {
        self.rendering = Some(rendering);
        self
    }

    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = Some(trace);
        self
    }

    pub fn cached(mut self, cache_key: Option<&str>) -> Self {
        self.cached = true;
        self.cache_key = cache_key.map(str::to_owned);
        self
    }

    pub fn buffered(mut self) -> Self {
        self.buffered = true;
        self
    }

    /// Explicit cache key, treating an empty string as absent.
    pub fn explicit_cache_key(&self) -> Option<&str> {
        self.cache_key.as_deref().filter(|k| !k.is_empty())
    }
}

// ---------------------------------------------------------------------------
// Requests and results
// ---------------------------------------------------------------------------

/// One component render, created fresh per helper invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderRequest {
    pub component_name: String,
    pub props: PropsMap,
    pub dom_id: String,
    pub trace: bool,
}

impl RenderRequest {
    /// Build a request with a freshly generated mount point id.
    pub fn new(component_name: impl Into<String>, props: PropsMap, trace: bool) -> Self {
        RenderRequest {
            component_name: component_name.into(),
            props,
            dom_id: generate_dom_id(),
            trace,
        }
    }
}

/// `sfreact-reactRenderer<uuid>`; unique per call.
pub fn generate_dom_id() -> String {
    format!("{DOM_ID_PREFIX}{}", Uuid::new_v4().simple())
}

/// Output of the external renderer. Cached verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderResult {
    pub has_errors: bool,
    pub evaluated: Evaluated,
    #[serde(default)]
    pub console_replay: String,
}

impl RenderResult {
    /// A successful result carrying plain markup.
    pub fn markup(html: impl Into<String>) -> Self {
        RenderResult {
            has_errors: false,
            evaluated: Evaluated::Markup(html.into()),
            console_replay: String::new(),
        }
    }

    /// A result flagged as failed, carrying error markup and console output.
    pub fn failed(error_html: impl Into<String>, console_replay: impl Into<String>) -> Self {
        RenderResult {
            has_errors: true,
            evaluated: Evaluated::Markup(error_html.into()),
            console_replay: console_replay.into(),
        }
    }
}

/// The `evaluated` field: bare markup, or an object with `componentHtml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Evaluated {
    Markup(String),
    Component(EvaluatedComponent),
}

impl Evaluated {
    /// The markup to embed in the mount point container.
    pub fn html(&self) -> &str {
        match self {
            Evaluated::Markup(html) => html,
            Evaluated::Component(c) => &c.component_html,
        }
    }
}

/// Structured evaluation output. Keys other than `componentHtml` are
/// preserved as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaluatedComponent {
    #[serde(rename = "componentHtml", default)]
    pub component_html: String,
    #[serde(flatten)]
    pub extra: PropsMap,
}
