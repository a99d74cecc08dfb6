//! # reactrender-external
//!
//! [`ReactRenderer`](reactrender_core::ReactRenderer) that delegates
//! server-side rendering to an external rendering server over a Unix socket.
//!
//! One connection per render: the client writes a single JSON line
//! ([`RenderMessage`]) and reads a single JSON line ([`RenderReply`]).

pub mod error;
pub mod protocol;
pub mod renderer;

pub use error::ExternalError;
pub use protocol::{RenderMessage, RenderReply};
pub use renderer::ExternalServerRenderer;
