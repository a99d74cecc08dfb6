//! [`ExternalServerRenderer`] — the socket-backed [`ReactRenderer`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use reactrender_core::config::RendererConfig;
use reactrender_core::{ReactRenderer, RenderCall, RenderError, RenderResult};

use crate::error::ExternalError;
use crate::protocol::{send_request, RenderMessage};

/// Renders components by asking an external rendering server.
///
/// Renders that report errors are logged with their console replay. With
/// `fail_loud` set they fail the call instead of being embedded.
#[derive(Debug, Clone)]
pub struct ExternalServerRenderer {
    socket: PathBuf,
    fail_loud: bool,
    static_markup: bool,
    timeout: Option<Duration>,
}

impl ExternalServerRenderer {
    pub fn new(socket: impl Into<PathBuf>) -> Self {
        ExternalServerRenderer {
            socket: socket.into(),
            fail_loud: false,
            static_markup: false,
            timeout: None,
        }
    }

    /// Renderer configured from the `renderer` config section, if a socket is set.
    pub fn from_config(config: &RendererConfig) -> Option<Self> {
        config
            .socket
            .as_ref()
            .map(|socket| ExternalServerRenderer::new(socket).with_fail_loud(config.fail_loud))
    }

    pub fn with_fail_loud(mut self, fail_loud: bool) -> Self {
        self.fail_loud = fail_loud;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// A copy of this renderer that requests static (non-hydratable) markup.
    pub fn static_markup(&self) -> Self {
        ExternalServerRenderer {
            static_markup: true,
            ..self.clone()
        }
    }

    pub fn socket(&self) -> &Path {
        &self.socket
    }

    pub fn is_static(&self) -> bool {
        self.static_markup
    }

    fn request(&self, call: &RenderCall<'_>) -> Result<RenderResult, ExternalError> {
        let message = RenderMessage::from_call(call, self.static_markup);
        let result = send_request(&self.socket, &message, self.timeout)?.into_result()?;

        if result.has_errors {
            tracing::error!(
                component = call.component_name,
                dom_id = call.dom_id,
                console_replay = %result.console_replay,
                "server-side render reported errors"
            );
            if self.fail_loud {
                return Err(ExternalError::FailLoud {
                    component: call.component_name.to_owned(),
                    console_replay: result.console_replay,
                });
            }
        }
        Ok(result)
    }
}

impl ReactRenderer for ExternalServerRenderer {
    fn render(&self, call: &RenderCall<'_>) -> Result<RenderResult, RenderError> {
        self.request(call)
            .map_err(|err| RenderError::renderer(call.component_name, err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_config_requires_socket() {
        assert!(ExternalServerRenderer::from_config(&RendererConfig::default()).is_none());

        let config = RendererConfig {
            socket: Some(PathBuf::from("/run/render.sock")),
            fail_loud: true,
        };
        let renderer = ExternalServerRenderer::from_config(&config).unwrap();
        assert_eq!(renderer.socket(), Path::new("/run/render.sock"));
        assert!(renderer.fail_loud);
        assert!(!renderer.is_static());
        assert!(renderer.static_markup().is_static());
    }
}
