//! # reactrender-core
//!
//! Render dispatch and caching core behind the component-rendering template
//! helpers: decides where a component renders, serializes its props, memoizes
//! server-side output and buffers client bootstrap markup for one document
//! render pass.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use reactrender_core::{RenderEnvironment, RenderOptions, Rendering, RequestContext};
//!
//! let env = RenderEnvironment::new(Arc::new(RequestContext::default()), Rendering::ClientSide);
//! let mut pass = env.begin_pass();
//! let markup = pass
//!     .render_component("Greeter", &RenderOptions::default().with_props(r#"{"name":"Ada"}"#))
//!     .unwrap();
//! assert!(markup.contains("data-component-name=\"Greeter\""));
//! ```

pub mod backend;
pub mod buffer;
pub mod config;
pub mod context;
pub mod coordinator;
pub mod error;
pub mod markup;
pub mod mode;
pub mod props;
pub mod stores;
pub mod types;

pub use backend::{ContextProvider, ReactRenderer, RenderCache, RenderCall, RequestContext};
pub use config::ReactRenderConfig;
pub use coordinator::{RenderCoordinator, RenderEnvironment};
pub use error::{BoxError, ConfigError, RenderError};
pub use types::{
    Evaluated, EvaluatedComponent, Props, PropsMap, RegisteredStores, RenderFlags, RenderOptions,
    RenderRequest, RenderResult, Rendering,
};
