//! Utility functions for navigating and extracting data from HTML trees.

use ego_tree::NodeRef;
use scraper::{Html, Node};

/// A node in a parsed HTML document: element, text run, comment, etc.
pub type HtmlNode<'a> = NodeRef<'a, Node>;

/// Parse an HTML document.
///
/// Malformed markup is repaired the way browsers repair it; parsing never
/// fails.
pub fn parse_document(html: &str) -> Html {
    Html::parse_document(html)
}

/// Get the local tag name of an element node.
///
/// # Returns
/// Tag name (e.g., "h3"), or `None` for text, comment and document nodes
///
/// # Examples
/// ```
/// use gutenberg_splitter::html::{parse_document, tag_name};
///
/// let doc = parse_document("<h3>Chapter I</h3>");
/// let names: Vec<_> = doc.tree.root().descendants().filter_map(tag_name).collect();
/// assert_eq!(names, vec!["html", "head", "body", "h3"]);
/// ```
pub fn tag_name<'a>(node: HtmlNode<'a>) -> Option<&'a str> {
    node.value().as_element().map(|element| element.name())
}

/// Check if a node is an element with the given tag name.
pub fn has_tag(node: HtmlNode<'_>, tag: &str) -> bool {
    tag_name(node) == Some(tag)
}

/// Get every attribute value carried by an element.
///
/// The `class` attribute is split into its individual class names, so
/// `class="chapter first"` contributes both `chapter` and `first`.
///
/// # Returns
/// Attribute values (order unspecified), empty for non-elements
pub fn attribute_values<'a>(node: HtmlNode<'a>) -> Vec<&'a str> {
    let Some(element) = node.value().as_element() else {
        return Vec::new();
    };

    let mut values = Vec::new();
    for (name, value) in element.attrs() {
        if name == "class" {
            values.extend(value.split_whitespace());
        } else {
            values.push(value);
        }
    }
    values
}

/// Get the text of a node: all descendant text runs concatenated in
/// document order.
///
/// Never fails. Comments, doctypes and empty elements yield an empty string.
///
/// # Examples
/// ```
/// use gutenberg_splitter::html::{node_text, parse_document};
///
/// let doc = parse_document("<p>Hello <i>world</i>!<!-- note --></p>");
/// assert_eq!(node_text(doc.tree.root()), "Hello world!");
/// ```
pub fn node_text(node: HtmlNode<'_>) -> String {
    let mut text = String::new();
    for descendant in node.descendants() {
        if let Some(run) = descendant.value().as_text() {
            text.push_str(run);
        }
    }
    text
}

/// Get the node that follows `node` in document order.
///
/// That is the first child if there is one, otherwise the next sibling,
/// otherwise the next sibling of the closest ancestor that has one.
pub fn next_in_document_order<'a>(node: HtmlNode<'a>) -> Option<HtmlNode<'a>> {
    if let Some(child) = node.first_child() {
        return Some(child);
    }

    let mut current = Some(node);
    while let Some(candidate) = current {
        if let Some(sibling) = candidate.next_sibling() {
            return Some(sibling);
        }
        current = candidate.parent();
    }
    None
}
