//! Store registrar: named shared-state payloads for the current pass.

use crate::error::RenderError;
use crate::props;
use crate::types::{Props, RegisteredStores};

/// Serialize `props` if structured and record it under `name`, replacing
/// any earlier registration. Returns the serialized payload.
///
/// Already-serialized props are stored verbatim.
pub fn register(
    stores: &mut RegisteredStores,
    name: &str,
    props: &Props,
) -> Result<String, RenderError> {
    let serialized = match props {
        Props::Structured(map) => props::encode(map)?,
        Props::Serialized(json) => json.clone(),
    };
    stores.insert(name.to_owned(), serialized.clone());
    Ok(serialized)
}
