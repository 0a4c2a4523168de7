//! Segment rendering and file output.

mod tei;
mod writer;

pub use tei::{tei_header, TEI_FOOTER};
pub use writer::{output_directory, output_filename, render, SegmentWriter};
