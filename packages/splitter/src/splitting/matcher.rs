//! Boundary matching: which elements start a new segment.

use std::collections::BTreeSet;

use scraper::Html;

use super::registry::KindRegistry;
use super::types::StructuralKind;
use crate::html::{attribute_values, tag_name, HtmlNode};

/// Criteria that select boundary elements.
///
/// A node matches when its tag equals [`tag`](Self::tag), it carries the
/// attribute filter value (if one is set), and none of its attribute values
/// is excluded. Matching is pure: the same tree always gives the same
/// candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundaryMatcher {
    tag: String,
    attr_filter: Option<String>,
    excluded_values: BTreeSet<String>,
    kind: StructuralKind,
}

impl BoundaryMatcher {
    /// Create a matcher for a tag, classifying it with the registry.
    #[must_use]
    pub fn new(tag: impl Into<String>, registry: &KindRegistry) -> Self {
        let tag = tag.into().trim().to_lowercase();
        let kind = registry.kind_of(&tag);
        Self {
            tag,
            attr_filter: None,
            excluded_values: BTreeSet::new(),
            kind,
        }
    }

    /// Require boundaries to carry an attribute with this value.
    ///
    /// An empty filter means no filtering.
    #[must_use]
    pub fn with_attr_filter(mut self, value: impl Into<String>) -> Self {
        let value = value.into();
        self.attr_filter = if value.is_empty() { None } else { Some(value) };
        self
    }

    /// Set attribute values that disqualify an element from being a boundary.
    #[must_use]
    pub fn with_excluded_values(
        mut self,
        values: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.excluded_values = values
            .into_iter()
            .map(Into::into)
            .filter(|v: &String| !v.is_empty())
            .collect();
        self
    }

    /// Override the structural kind from the classification table.
    #[must_use]
    pub fn with_kind(mut self, kind: StructuralKind) -> Self {
        self.kind = kind;
        self
    }

    /// Boundary tag name (lowercase).
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Attribute filter value, if any.
    #[must_use]
    pub fn attr_filter(&self) -> Option<&str> {
        self.attr_filter.as_deref()
    }

    /// Excluded attribute values.
    #[must_use]
    pub fn excluded_values(&self) -> &BTreeSet<String> {
        &self.excluded_values
    }

    /// Structural kind of the boundary tag.
    #[must_use]
    pub fn kind(&self) -> StructuralKind {
        self.kind
    }

    /// Check if a node is a boundary candidate.
    pub fn matches(&self, node: HtmlNode<'_>) -> bool {
        if tag_name(node) != Some(self.tag.as_str()) {
            return false;
        }

        let values = attribute_values(node);
        if let Some(filter) = &self.attr_filter {
            if !values.iter().any(|v| v == filter) {
                return false;
            }
        }

        !self.has_excluded_value(&values)
    }

    /// Check if a node carries the boundary tag and is not excluded.
    ///
    /// The attribute filter is ignored here: any same-tag element ends a
    /// sibling segment, unless an excluded value folds it into the content.
    pub fn is_boundary_tag(&self, node: HtmlNode<'_>) -> bool {
        tag_name(node) == Some(self.tag.as_str())
            && !self.has_excluded_value(&attribute_values(node))
    }

    fn has_excluded_value(&self, values: &[&str]) -> bool {
        values.iter().any(|v| self.excluded_values.contains(*v))
    }
}

/// Find all boundary candidates in document order.
///
/// An empty result is valid and produces zero segments.
pub fn find_candidates<'a>(document: &'a Html, matcher: &BoundaryMatcher) -> Vec<HtmlNode<'a>> {
    document
        .tree
        .root()
        .descendants()
        .filter(|node| matcher.matches(*node))
        .collect()
}
