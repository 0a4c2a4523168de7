//! TEI Simple wrapper for segment files.
//!
//! Values are interpolated as-is, without XML escaping.

use crate::splitting::Segment;
use crate::types::TeiMetadata;

/// RELAX NG schema reference for TEI Simple.
const TEI_SIMPLE_SCHEMA: &str =
    "https://raw.githubusercontent.com/TEIC/TEI-Simple/master/teisimple.rng";

/// Closes the `div`, `body`, `text` and `TEI` elements opened by [`tei_header`].
pub const TEI_FOOTER: &str = "\n</div></body></text></TEI>";

/// Build the TEI header that precedes a segment's text.
///
/// Ends with the opening `<div type="…" n="…">` for the segment.
pub fn tei_header(meta: &TeiMetadata, segment: &Segment) -> String {
    format!(
        concat!(
            r#"<?xml-model href="{schema}" type="application/xml" schematypens="http://relaxng.org/ns/structure/1.0"?>"#,
            "\n",
            r#"<TEI xmlns="http://www.tei-c.org/ns/1.0"><teiHeader><fileDesc><titleStmt>"#,
            "\n",
            "<title>{title}</title><author>{author}</author></titleStmt>\n",
            "<publicationStmt><publisher>{publisher}</publisher><pubPlace>{location}</pubPlace><date>{year}</date></publicationStmt>\n",
            "<sourceDesc><p>Produced from a Project Gutenberg HTML source using gutenberg-text-splitter.</p></sourceDesc>\n",
            r#"</fileDesc></teiHeader><text><body><div type="{div_type}" n="{position}">"#,
            "\n",
        ),
        schema = TEI_SIMPLE_SCHEMA,
        title = meta.title,
        author = meta.author,
        publisher = meta.publisher,
        location = meta.location,
        year = meta.year,
        div_type = segment.div_type,
        position = segment.position,
    )
}
