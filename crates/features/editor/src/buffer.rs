use lpad_domain::FragmentKind;

/// One editable source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceBuffer {
    kind: FragmentKind,
    text: String,
    revision: u64,
}

impl SourceBuffer {
    #[must_use]
    pub const fn new(kind: FragmentKind) -> Self {
        Self { kind, text: String::new(), revision: 0 }
    }

    #[must_use]
    pub const fn kind(&self) -> FragmentKind {
        self.kind
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Bumped on every write that changed the text.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Returns `true` if the text changed.
    pub fn set(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        if text == self.text {
            return false;
        }
        self.text = text;
        self.revision += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_writes_keep_the_revision() {
        let mut buffer = SourceBuffer::new(FragmentKind::Style);

        assert!(buffer.set("p{}"));
        assert!(!buffer.set("p{}"));
        assert!(buffer.set(""));

        assert_eq!(buffer.revision(), 2);
        assert_eq!(buffer.text(), "");
        assert_eq!(buffer.kind(), FragmentKind::Style);
    }
}
