//! Segment file writer.

use std::fs;
use std::path::{Path, PathBuf};

use super::tei::{tei_header, TEI_FOOTER};
use crate::error::Result;
use crate::splitting::Segment;
use crate::types::{OutputFormat, RenderConfig};

/// Render a segment to the bytes of its output file.
///
/// Plain output is exactly the segment text. TEI output wraps the text in
/// the TEI header and footer.
pub fn render(segment: &Segment, config: &RenderConfig) -> Vec<u8> {
    match config.format {
        OutputFormat::Plain => segment.text.clone().into_bytes(),
        OutputFormat::Tei => {
            let header = tei_header(&config.tei, segment);
            let mut out =
                String::with_capacity(header.len() + segment.text.len() + TEI_FOOTER.len());
            out.push_str(&header);
            out.push_str(&segment.text);
            out.push_str(TEI_FOOTER);
            out.into_bytes()
        }
    }
}

/// Build the filename of a segment: `{prefix}{tei_?}{div_type}_{position}`.
///
/// # Examples
/// ```
/// use gutenberg_splitter::render::output_filename;
/// use gutenberg_splitter::splitting::Segment;
/// use gutenberg_splitter::types::{OutputFormat, RenderConfig};
///
/// let segment = Segment::new(1, "text", "poem");
/// assert_eq!(output_filename(&segment, &RenderConfig::new(OutputFormat::Tei)), "tei_poem_1");
/// assert_eq!(output_filename(&segment, &RenderConfig::new(OutputFormat::Plain)), "poem_1");
/// ```
pub fn output_filename(segment: &Segment, config: &RenderConfig) -> String {
    let infix = match config.format {
        OutputFormat::Plain => "",
        OutputFormat::Tei => "tei_",
    };
    format!(
        "{}{infix}{}_{}",
        config.prefix, segment.div_type, segment.position
    )
}

/// Build the output directory for a source file: `{base}/{year-}{file_stem}`.
///
/// # Examples
/// ```
/// use std::path::Path;
/// use gutenberg_splitter::render::output_directory;
///
/// let dir = output_directory(Path::new("output"), Path::new("input/frankenstein.html"), "1818");
/// assert_eq!(dir, Path::new("output/1818-frankenstein"));
///
/// let dir = output_directory(Path::new("output"), Path::new("input/frankenstein.html"), "");
/// assert_eq!(dir, Path::new("output/frankenstein"));
/// ```
pub fn output_directory(base: &Path, source: &Path, year: &str) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let dir_name = if year.is_empty() {
        stem
    } else {
        format!("{year}-{stem}")
    };
    base.join(dir_name)
}

/// Writes rendered segments into one output directory.
///
/// Each segment becomes exactly one file. Existing files with the same name
/// are overwritten.
#[derive(Debug)]
pub struct SegmentWriter {
    dir: PathBuf,
    config: RenderConfig,
}

impl SegmentWriter {
    /// Create a writer, creating the output directory if needed.
    pub fn create(dir: impl Into<PathBuf>, config: RenderConfig) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir, config })
    }

    /// Output directory of this writer.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Render and write one segment.
    ///
    /// # Returns
    /// Path of the written file
    pub fn write(&self, segment: &Segment) -> Result<PathBuf> {
        let path = self.dir.join(output_filename(segment, &self.config));
        fs::write(&path, render(segment, &self.config))?;
        tracing::debug!(path = %path.display(), "Wrote segment");
        Ok(path)
    }
}
