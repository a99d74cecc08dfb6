//! Props codec: structured props map <-> JSON text.
//!
//! Encoded JSON escapes `/` as `\/` so a `</script>` inside a string value
//! can never terminate the surrounding script block.

use serde::Serialize;
use serde_json::Value;

use crate::error::RenderError;
use crate::types::{Props, PropsMap};

/// Serialize props to JSON text.
pub fn encode<T: Serialize + ?Sized>(props: &T) -> Result<String, RenderError> {
    let json = serde_json::to_string(props).map_err(RenderError::PropsEncode)?;
    Ok(json.replace('/', "\\/"))
}

/// Parse JSON text into a props map.
///
/// An empty JSON array (`[]`, how PHP encodes an empty props array) decodes
/// to an empty map; any other non-object is an error.
pub fn decode(json: &str) -> Result<PropsMap, RenderError> {
    match serde_json::from_str::<PropsMap>(json) {
        Ok(map) => Ok(map),
        Err(err) => match serde_json::from_str::<Value>(json) {
            Ok(Value::Array(items)) if items.is_empty() => Ok(PropsMap::new()),
            _ => Err(RenderError::PropsDecode(err)),
        },
    }
}

/// Structured props for a call: decoded when serialized, empty when absent.
pub fn resolve(props: Option<&Props>) -> Result<PropsMap, RenderError> {
    match props {
        None => Ok(PropsMap::new()),
        Some(Props::Structured(map)) => Ok(map.clone()),
        Some(Props::Serialized(json)) => decode(json),
    }
}
