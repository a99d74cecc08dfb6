//! Context emitter: the one-per-pass context script block.

use crate::backend::ContextProvider;
use crate::error::RenderError;
use crate::markup;
use crate::props;

/// Emits the context provider payload exactly once per render pass.
#[derive(Debug, Clone)]
pub struct ContextEmitter {
    pending: bool,
}

impl Default for ContextEmitter {
    fn default() -> Self {
        ContextEmitter { pending: true }
    }
}

impl ContextEmitter {
    /// The context script block on the first call of the pass, `""` afterwards.
    ///
    /// The flag is consumed before encoding, so a failed encode does not
    /// cause a second emission later in the pass.
    pub fn maybe_emit(&mut self, provider: &dyn ContextProvider) -> Result<String, RenderError> {
        if !self.pending {
            return Ok(String::new());
        }
        self.pending = false;
        let payload = props::encode(&provider.get_context(false))?;
        Ok(markup::context_tag(&payload))
    }

    /// Whether the next [`maybe_emit`](Self::maybe_emit) call will emit.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn reset(&mut self) {
        self.pending = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::RequestContext;

    #[test]
    fn emits_once_until_reset() {
        let provider = RequestContext::new("https", "example.com", 443).with_path("/about", None);
        let mut emitter = ContextEmitter::default();

        let first = emitter.maybe_emit(&provider).unwrap();
        assert!(first.starts_with(r#"<script type="application/json" id="js-react-on-rails-context">"#));
        assert!(first.contains(r#""serverSide":false"#));
        assert!(first.contains(r#""pathname":"\/about""#));

        assert_eq!(emitter.maybe_emit(&provider).unwrap(), "");
        assert!(!emitter.is_pending());

        emitter.reset();
        assert_eq!(emitter.maybe_emit(&provider).unwrap(), first);
    }
}
