//! Default structural classification for HTML boundary tags.

use super::registry::KindRegistry;
use super::types::StructuralKind;

/// Create the classification table for HTML ebook markup.
///
/// Container kinds wrap an entire chapter:
///
/// ```text
/// <div class="chapter">      <- boundary, segment = whole subtree
///   <h2>Chapter I</h2>
///   <p>...</p>
/// </div>
/// ```
///
/// Everything else is a sibling kind that starts a chapter running up to
/// the next boundary:
///
/// ```text
/// <h3>Letter 1</h3>          <- boundary
/// <p>...</p>                 <- same segment
/// <h3>Letter 2</h3>          <- next boundary
/// ```
#[must_use]
pub fn create_html_kind_registry() -> KindRegistry {
    let mut registry = KindRegistry::new();

    for tag in ["div", "section", "article"] {
        registry.register(tag, StructuralKind::Container);
    }

    for tag in ["h1", "h2", "h3", "h4", "h5", "h6", "hr", "p", "a", "span"] {
        registry.register(tag, StructuralKind::Sibling);
    }

    registry
}
