//! HTML document tree access.
//!
//! Documents are parsed with `scraper` (html5ever), which never fails: any
//! input, however malformed, yields a best-effort tree. The helpers in
//! [`utils`] expose the read-only node interface the segmentation engine
//! works against.

mod utils;

pub use utils::{
    attribute_values, has_tag, next_in_document_order, node_text, parse_document, tag_name,
    HtmlNode,
};
