//! Main splitter service that ties all components together.

use std::fs;
use std::path::{Path, PathBuf};

use scraper::Html;

use crate::error::{Result, SplitterError};
use crate::html::parse_document;
use crate::job::JobConfig;
use crate::render::SegmentWriter;
use crate::splitting::{create_html_kind_registry, SplitEngine};
use crate::types::OutputFormat;

/// Outcome of splitting one source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub source: PathBuf,

    /// Directory the segment files were written to.
    pub output_dir: PathBuf,

    /// Number of segment files written.
    pub sections: usize,

    pub format: OutputFormat,

    pub div_type: String,
}

/// Split one source file and write its segments.
///
/// Validates the job, parses the source, runs the split engine and writes
/// one file per segment into [`JobConfig::target_dir`].
///
/// # Returns
/// A [`FileReport`] with the number of segments written
pub fn split_file(job: &JobConfig) -> Result<FileReport> {
    job.validate()?;

    let engine = job.engine(&create_html_kind_registry())?;
    let html = read_source(job.source())?;
    let document = parse_document(&html);

    let output_dir = job.target_dir();
    let sections = write_segments(&engine, &document, job, &output_dir)?;

    tracing::info!(
        source = %job.source().display(),
        output = %output_dir.display(),
        sections,
        format = %job.render.format,
        "Split source file"
    );

    Ok(FileReport {
        source: job.source.clone(),
        output_dir,
        sections,
        format: job.render.format,
        div_type: job.segmentation.div_type.clone(),
    })
}

/// Write every segment of a parsed document.
fn write_segments(
    engine: &SplitEngine,
    document: &Html,
    job: &JobConfig,
    output_dir: &Path,
) -> Result<usize> {
    let writer = SegmentWriter::create(output_dir, job.render.clone())?;

    let mut sections = 0;
    for segment in engine.segments(document) {
        writer.write(&segment)?;
        sections += 1;
    }
    Ok(sections)
}

/// Read a source file as text.
///
/// Invalid UTF-8 is replaced rather than rejected; Gutenberg sources are
/// occasionally mis-encoded but otherwise fine.
pub fn read_source(path: &Path) -> Result<String> {
    if !path.is_file() {
        return Err(SplitterError::SourceNotFound(path.to_path_buf()));
    }

    let bytes = fs::read(path)?;
    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(e) => {
            tracing::warn!(
                source = %path.display(),
                valid_up_to = e.utf8_error().valid_up_to(),
                "Source is not valid UTF-8, replacing invalid bytes"
            );
            Ok(String::from_utf8_lossy(e.as_bytes()).into_owned())
        }
    }
}

/// Result of one job in a batch run.
#[derive(Debug)]
pub struct JobResult {
    pub source: PathBuf,
    pub outcome: Result<FileReport>,
}

impl JobResult {
    /// Whether the job completed.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Split a batch of jobs in order, continuing past failures.
///
/// `on_done` is called after each job, e.g. to advance a progress bar.
pub fn split_all<F>(jobs: &[JobConfig], mut on_done: F) -> Vec<JobResult>
where
    F: FnMut(&JobConfig, &Result<FileReport>),
{
    jobs.iter()
        .map(|job| {
            let outcome = split_file(job);
            if let Err(e) = &outcome {
                tracing::warn!(source = %job.source().display(), error = %e, "Failed to split");
            }
            on_done(job, &outcome);
            JobResult {
                source: job.source.clone(),
                outcome,
            }
        })
        .collect()
}
