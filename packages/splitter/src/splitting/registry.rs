//! Classification table mapping boundary tags to structural kinds.

use std::collections::HashMap;

use super::types::StructuralKind;

/// Registry of structural kinds per tag name.
///
/// Tags without an entry are treated as sibling kinds: headings, rules and
/// paragraphs only mark where a segment starts.
pub struct KindRegistry {
    kinds: HashMap<String, StructuralKind>,
}

impl KindRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            kinds: HashMap::new(),
        }
    }

    /// Register the structural kind of a tag.
    pub fn register(&mut self, tag: impl Into<String>, kind: StructuralKind) {
        self.kinds.insert(tag.into().to_lowercase(), kind);
    }

    /// Get the structural kind of a tag.
    #[must_use]
    pub fn kind_of(&self, tag: &str) -> StructuralKind {
        self.kinds
            .get(&tag.to_lowercase())
            .copied()
            .unwrap_or(StructuralKind::Sibling)
    }

    /// Check if a tag wraps its whole segment.
    #[must_use]
    pub fn is_container(&self, tag: &str) -> bool {
        self.kind_of(tag) == StructuralKind::Container
    }
}

impl Default for KindRegistry {
    fn default() -> Self {
        Self::new()
    }
}
