//! # reactrender-tera
//!
//! Exposes the component-rendering helpers to Tera templates.
//!
//! | Function                 | Returns                                          |
//! |--------------------------|--------------------------------------------------|
//! | `react_component`        | component markup                                 |
//! | `react_component_array`  | object with `componentHtml` plus renderer extras |
//! | `redux_store`            | store script block                               |
//! | `react_flush_buffer`     | buffered bootstrap markup                        |
//!
//! All four are marked safe, so their markup is never HTML-escaped.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use reactrender_core::{RenderEnvironment, Rendering, RequestContext};
//! use reactrender_tera::TemplateEngine;
//!
//! fn page(engine: &TemplateEngine, env: &RenderEnvironment) -> String {
//!     let ctx = tera::Context::new();
//!     engine.render_pass("index.html", &ctx, env).unwrap_or_default()
//! }
//! ```

pub mod engine;
pub mod error;
pub mod functions;

pub use engine::TemplateEngine;
pub use error::TemplateError;
pub use functions::{register_functions, SharedCoordinator};
