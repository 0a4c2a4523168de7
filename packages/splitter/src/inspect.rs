//! Document inspection: helps choose the boundary element and attribute.

use std::collections::HashMap;
use std::iter;

use scraper::Html;

use crate::html::{next_in_document_order, node_text, tag_name, HtmlNode};
use crate::splitting::{find_candidates, BoundaryMatcher, StructuralKind};

/// Maximum number of candidates shown by [`preview_candidates`].
pub const PREVIEW_LIMIT: usize = 10;

/// Container previews are cut off after this many characters.
const CONTAINER_PREVIEW_CHARS: usize = 100;

/// Nodes searched after an empty heading for preview text.
const FALLBACK_SEARCH_DEPTH: usize = 16;

/// Number of occurrences of one value in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Count {
    pub value: String,
    pub count: usize,
}

/// Class and id usage of one tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeInventory {
    pub classes: Vec<Count>,
    pub ids: Vec<Count>,
}

/// One boundary candidate shown in a preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    /// 1-based candidate position, usable as an offset.
    pub index: usize,
    pub text: String,
}

/// Count every element tag in a document.
///
/// Sorted by count descending, ties by tag name.
pub fn element_inventory(document: &Html) -> Vec<Count> {
    tally(document.tree.root().descendants().filter_map(tag_name))
}

/// Count the class names and ids used by elements with the given tag.
pub fn attribute_inventory(document: &Html, tag: &str) -> AttributeInventory {
    let tag = tag.to_lowercase();
    let elements: Vec<_> = document
        .tree
        .root()
        .descendants()
        .filter_map(|n| n.value().as_element().filter(|e| e.name() == tag))
        .collect();

    AttributeInventory {
        classes: tally(elements.iter().flat_map(|e| e.classes())),
        ids: tally(elements.iter().filter_map(|e| e.id())),
    }
}

fn tally<'a>(values: impl Iterator<Item = &'a str>) -> Vec<Count> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for value in values {
        *counts.entry(value).or_default() += 1;
    }

    let mut counts: Vec<Count> = counts
        .into_iter()
        .map(|(value, count)| Count {
            value: value.to_string(),
            count,
        })
        .collect();
    counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value)));
    counts
}

/// Show the text of the first boundary candidates.
///
/// Whitespace is collapsed. Container candidates are truncated; a sibling
/// candidate without text (e.g. an empty anchor heading) shows the first
/// text that follows it instead.
pub fn preview_candidates(document: &Html, matcher: &BoundaryMatcher, limit: usize) -> Vec<Sample> {
    find_candidates(document, matcher)
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(i, candidate)| Sample {
            index: i + 1,
            text: match matcher.kind() {
                StructuralKind::Container => {
                    truncate(&collapse_whitespace(&node_text(candidate)), CONTAINER_PREVIEW_CHARS)
                }
                StructuralKind::Sibling => heading_text(candidate),
            },
        })
        .collect()
}

fn heading_text(candidate: HtmlNode<'_>) -> String {
    let own = collapse_whitespace(&node_text(candidate));
    if !own.is_empty() {
        return own;
    }

    iter::successors(next_in_document_order(candidate), |n| next_in_document_order(*n))
        .take(FALLBACK_SEARCH_DEPTH)
        .map(|n| collapse_whitespace(&node_text(n)))
        .find(|text| !text.is_empty())
        .unwrap_or_default()
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => format!("{}…", &text[..end]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::html::parse_document;
    use crate::splitting::create_html_kind_registry;
    use pretty_assertions::assert_eq;

    fn count(value: &str, count: usize) -> Count {
        Count {
            value: value.to_string(),
            count,
        }
    }

    #[test]
    fn test_element_inventory_sorted() {
        let doc = parse_document("<h3>a</h3><p>x</p><p>y</p><h3>b</h3><hr><p>z</p>");
        let inventory = element_inventory(&doc);

        assert_eq!(inventory[0], count("p", 3));
        assert_eq!(inventory[1], count("h3", 2));
        // Ties sorted by name.
        let singles: Vec<&str> = inventory[2..].iter().map(|c| c.value.as_str()).collect();
        assert_eq!(singles, vec!["body", "head", "hr", "html"]);
    }

    #[test]
    fn test_attribute_inventory() {
        let doc = parse_document(
            r#"<div class="chapter" id="c1">a</div><div class="chapter figure" id="c2">b</div><div>c</div><p class="chapter">d</p>"#,
        );
        let inventory = attribute_inventory(&doc, "DIV");

        assert_eq!(inventory.classes, vec![count("chapter", 2), count("figure", 1)]);
        assert_eq!(inventory.ids, vec![count("c1", 1), count("c2", 1)]);
    }

    #[test]
    fn test_preview_container_truncates() {
        let long = "word ".repeat(40);
        let html = format!(r#"<div class="chapter">{long}</div><div class="chapter">short</div>"#);
        let doc = parse_document(&html);
        let matcher =
            BoundaryMatcher::new("div", &create_html_kind_registry()).with_attr_filter("chapter");

        let samples = preview_candidates(&doc, &matcher, PREVIEW_LIMIT);

        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].index, 1);
        assert_eq!(samples[0].text.chars().count(), CONTAINER_PREVIEW_CHARS + 1);
        assert!(samples[0].text.ends_with('…'));
        assert_eq!(samples[1], Sample { index: 2, text: "short".to_string() });
    }

    #[test]
    fn test_preview_sibling_falls_back_for_empty_heading() {
        let doc = parse_document("<h2><a id=\"ch1\"></a></h2><p>\n  It was   dark.</p><h2>II</h2>");
        let matcher = BoundaryMatcher::new("h2", &create_html_kind_registry());

        let samples = preview_candidates(&doc, &matcher, PREVIEW_LIMIT);

        assert_eq!(samples[0].text, "It was dark.");
        assert_eq!(samples[1].text, "II");
    }

    #[test]
    fn test_preview_respects_limit() {
        let html = "<h3>x</h3>".repeat(15);
        let doc = parse_document(&html);
        let matcher = BoundaryMatcher::new("h3", &create_html_kind_registry());

        assert_eq!(preview_candidates(&doc, &matcher, PREVIEW_LIMIT).len(), 10);
    }
}
