//! Mode resolver: which sides render a given call.

use crate::types::{RenderFlags, RenderOptions};

/// Resolve the server/client flags for one call.
///
/// A call-level `rendering` option is normative and replaces the process
/// defaults entirely; otherwise the defaults apply unchanged.
pub fn resolve(options: &RenderOptions, defaults: RenderFlags) -> RenderFlags {
    match options.rendering {
        Some(rendering) => rendering.flags(),
        None => defaults,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Rendering;
    use rstest::rstest;

    #[rstest]
    #[case("server_side", true, false)]
    #[case("client_side", false, true)]
    #[case("both", true, true)]
    #[case("server", false, false)]
    #[case("", false, false)]
    fn call_override_table(#[case] setting: &str, #[case] server: bool, #[case] client: bool) {
        let options = RenderOptions::default().with_rendering(Rendering::from(setting));
        for defaults in [Rendering::Both.flags(), RenderFlags::default()] {
            assert_eq!(resolve(&options, defaults), RenderFlags { server, client }, "[{setting}]");
        }
    }

    #[rstest]
    #[case(Rendering::ServerSide)]
    #[case(Rendering::ClientSide)]
    #[case(Rendering::Both)]
    #[case(Rendering::Disabled)]
    fn absent_override_uses_defaults(#[case] default: Rendering) {
        assert_eq!(resolve(&RenderOptions::default(), default.flags()), default.flags());
    }
}
