//! Segmentation strategies: how much of the tree belongs to one candidate.

use super::matcher::BoundaryMatcher;
use super::types::StructuralKind;
use crate::html::{next_in_document_order, node_text, HtmlNode};

/// Result of extracting the content of one boundary candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// A complete segment; segmentation continues with the next candidate.
    Segment(String),

    /// The last segment: it contains the end marker and nothing after it is
    /// processed.
    Final(String),

    /// The end marker was reached before this candidate produced content.
    EndOfContent,
}

/// Trait for structural segmentation strategies.
///
/// Implementations decide which text belongs to a candidate and whether the
/// end marker terminates segmentation.
pub trait SegmentStrategy {
    /// Extract the content owned by a boundary candidate.
    fn extract(
        &self,
        candidate: HtmlNode<'_>,
        matcher: &BoundaryMatcher,
        end_marker: &str,
    ) -> Extraction;
}

/// Get the strategy for a structural kind.
#[must_use]
pub fn strategy_for(kind: StructuralKind) -> &'static dyn SegmentStrategy {
    match kind {
        StructuralKind::Container => &ContainerStrategy,
        StructuralKind::Sibling => &SiblingStrategy,
    }
}

/// Check if text contains the end marker. An empty marker never matches.
fn contains_end_marker(text: &str, end_marker: &str) -> bool {
    !end_marker.is_empty() && text.contains(end_marker)
}

/// Strategy for boundaries that wrap their whole segment.
///
/// The segment is the candidate's subtree text up to the first nested
/// element that is itself a candidate. Nested same-tag elements carrying an
/// excluded value are not candidates, so their text stays in the segment. A
/// segment whose text contains the end marker is discarded and ends
/// segmentation.
pub struct ContainerStrategy;

impl ContainerStrategy {
    /// Append the text owned by `node` to `text`.
    ///
    /// Returns `true` once a nested candidate is reached; nothing after it
    /// belongs to the segment.
    fn collect_owned_text(
        node: HtmlNode<'_>,
        matcher: &BoundaryMatcher,
        text: &mut String,
    ) -> bool {
        for child in node.children() {
            if let Some(run) = child.value().as_text() {
                text.push_str(run);
            } else if matcher.matches(child) || Self::collect_owned_text(child, matcher, text) {
                return true;
            }
        }
        false
    }
}

impl SegmentStrategy for ContainerStrategy {
    fn extract(
        &self,
        candidate: HtmlNode<'_>,
        matcher: &BoundaryMatcher,
        end_marker: &str,
    ) -> Extraction {
        let mut text = String::new();
        Self::collect_owned_text(candidate, matcher, &mut text);

        if contains_end_marker(&text, end_marker) {
            return Extraction::EndOfContent;
        }
        Extraction::Segment(text)
    }
}

/// Strategy for boundaries that only start their segment.
///
/// The segment is the candidate's own text followed by the text of its
/// following siblings, up to (not including) the sibling that is, or leads
/// directly into, the next same-tag boundary. A sibling containing the end
/// marker is kept in the segment and ends segmentation.
pub struct SiblingStrategy;

impl SiblingStrategy {
    /// Check if accumulation must stop before this sibling.
    fn starts_next_segment(sibling: HtmlNode<'_>, matcher: &BoundaryMatcher) -> bool {
        matcher.is_boundary_tag(sibling)
            || next_in_document_order(sibling).is_some_and(|next| matcher.is_boundary_tag(next))
    }
}

impl SegmentStrategy for SiblingStrategy {
    fn extract(
        &self,
        candidate: HtmlNode<'_>,
        matcher: &BoundaryMatcher,
        end_marker: &str,
    ) -> Extraction {
        let mut text = node_text(candidate);

        for sibling in candidate.next_siblings() {
            let sibling_text = node_text(sibling);

            if contains_end_marker(&sibling_text, end_marker) {
                text.push_str(&sibling_text);
                return Extraction::Final(text);
            }

            if Self::starts_next_segment(sibling, matcher) {
                return Extraction::Segment(text);
            }

            text.push_str(&sibling_text);
        }

        Extraction::Segment(text)
    }
}
