//! Buffer of pending client bootstrap fragments.

/// Ordered, append-only fragment list, emptied by [`Buffer::flush`].
#[derive(Debug, Clone, Default)]
pub struct Buffer {
    fragments: Vec<String>,
}

impl Buffer {
    pub fn push(&mut self, fragment: String) {
        self.fragments.push(fragment);
    }

    /// Concatenate all fragments in insertion order and empty the buffer.
    pub fn flush(&mut self) -> String {
        std::mem::take(&mut self.fragments).concat()
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flush_joins_in_order_then_empties() {
        let mut buffer = Buffer::default();
        buffer.push("<a>".into());
        buffer.push("<b>".into());
        assert_eq!(buffer.len(), 2);
        assert_eq!(buffer.flush(), "<a><b>");
        assert!(buffer.is_empty());
        assert_eq!(buffer.flush(), "");
    }
}
