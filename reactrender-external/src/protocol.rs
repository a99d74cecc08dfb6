//! Newline-delimited JSON protocol spoken with the rendering server.

use std::io::{BufRead, BufReader, Write};
use std::os::unix::net::UnixStream;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use reactrender_core::{RegisteredStores, RenderCall, RenderResult};

use crate::error::{io_err, ExternalError};

/// One render request. Props and store payloads travel as JSON text, exactly
/// as the coordinator serialized them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderMessage {
    pub component_name: String,
    pub props: String,
    pub dom_id: String,
    pub registered_stores: RegisteredStores,
    pub trace: bool,
    /// Ask for non-interactive static markup instead of hydratable markup.
    pub static_markup: bool,
}

impl RenderMessage {
    pub fn from_call(call: &RenderCall<'_>, static_markup: bool) -> Self {
        RenderMessage {
            component_name: call.component_name.to_owned(),
            props: call.props_json.to_owned(),
            dom_id: call.dom_id.to_owned(),
            registered_stores: call.registered_stores.clone(),
            trace: call.trace,
            static_markup,
        }
    }
}

/// One render reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderReply {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<RenderResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RenderReply {
    pub fn ok(result: RenderResult) -> Self {
        Self {
            ok: true,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            result: None,
            error: Some(message.into()),
        }
    }

    /// The render result, or the server's error.
    pub fn into_result(self) -> Result<RenderResult, ExternalError> {
        match (self.ok, self.result) {
            (true, Some(result)) => Ok(result),
            (true, None) => Err(ExternalError::Protocol(
                "reply marked ok but carries no result".to_string(),
            )),
            (false, _) => Err(ExternalError::Server(
                self.error
                    .unwrap_or_else(|| "unknown rendering server error".to_string()),
            )),
        }
    }
}

/// Send one message to the server at `socket` and read one reply.
pub fn send_request(
    socket: &Path,
    message: &RenderMessage,
    timeout: Option<Duration>,
) -> Result<RenderReply, ExternalError> {
    if !socket.exists() {
        return Err(ExternalError::ServerNotRunning {
            socket: socket.to_path_buf(),
        });
    }

    let mut stream = UnixStream::connect(socket).map_err(|err| {
        if matches!(
            err.kind(),
            std::io::ErrorKind::NotFound
                | std::io::ErrorKind::ConnectionRefused
                | std::io::ErrorKind::ConnectionReset
        ) {
            ExternalError::ServerNotRunning {
                socket: socket.to_path_buf(),
            }
        } else {
            io_err(socket, err)
        }
    })?;
    stream
        .set_read_timeout(timeout)
        .map_err(|e| io_err(socket, e))?;
    stream
        .set_write_timeout(timeout)
        .map_err(|e| io_err(socket, e))?;

    let payload = serde_json::to_string(message)?;
    stream
        .write_all(payload.as_bytes())
        .map_err(|e| io_err(socket, e))?;
    stream.write_all(b"\n").map_err(|e| io_err(socket, e))?;
    stream.flush().map_err(|e| io_err(socket, e))?;

    let mut reader = BufReader::new(stream);
    let mut line = String::new();
    let read = reader
        .read_line(&mut line)
        .map_err(|e| io_err(socket, e))?;
    if read == 0 {
        return Err(ExternalError::Protocol(
            "rendering server closed connection before responding".to_string(),
        ));
    }

    let reply: RenderReply = serde_json::from_str(line.trim_end())?;
    Ok(reply)
}
