//! Immutable description of one source file to split.

use std::path::{Path, PathBuf};

use crate::config::{validate_element, validate_year, DEFAULT_OUTPUT_DIR};
use crate::error::Result;
use crate::render::output_directory;
use crate::splitting::{BoundaryMatcher, KindRegistry, SegmentationConfig, SplitEngine, StructuralKind};
use crate::types::RenderConfig;

/// Everything needed to split and render one source file.
///
/// Built once per file by the CLI or the corpus loader and never mutated
/// while the file is processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobConfig {
    /// Source HTML file.
    pub source: PathBuf,

    /// Project Gutenberg ID to download the source from when it is missing.
    pub gutenberg_id: Option<u32>,

    /// Boundary element tag.
    pub element: String,

    /// Attribute value boundaries must carry (empty for none).
    pub attr: String,

    /// Structural kind override; `None` uses the classification table.
    pub kind: Option<StructuralKind>,

    /// Attribute values that disqualify same-tag elements as boundaries.
    pub excluded_values: Vec<String>,

    pub segmentation: SegmentationConfig,

    pub render: RenderConfig,

    /// Base output directory; each source gets its own subdirectory.
    pub output_dir: PathBuf,
}

impl JobConfig {
    /// Create a job with default settings.
    #[must_use]
    pub fn new(source: impl Into<PathBuf>, element: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            gutenberg_id: None,
            element: element.into(),
            attr: String::new(),
            kind: None,
            excluded_values: Vec::new(),
            segmentation: SegmentationConfig::new(),
            render: RenderConfig::default(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }

    /// Set the attribute filter.
    #[must_use]
    pub fn with_attr(mut self, attr: impl Into<String>) -> Self {
        self.attr = attr.into();
        self
    }

    /// Override the structural kind.
    #[must_use]
    pub fn with_kind(mut self, kind: Option<StructuralKind>) -> Self {
        self.kind = kind;
        self
    }

    /// Set the excluded attribute values.
    #[must_use]
    pub fn with_excluded_values(
        mut self,
        values: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.excluded_values = values.into_iter().map(Into::into).collect();
        self
    }

    /// Set the segmentation settings.
    #[must_use]
    pub fn with_segmentation(mut self, segmentation: SegmentationConfig) -> Self {
        self.segmentation = segmentation;
        self
    }

    /// Set the render settings.
    #[must_use]
    pub fn with_render(mut self, render: RenderConfig) -> Self {
        self.render = render;
        self
    }

    /// Set the base output directory.
    #[must_use]
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    /// Set the Gutenberg ID.
    #[must_use]
    pub fn with_gutenberg_id(mut self, gutenberg_id: Option<u32>) -> Self {
        self.gutenberg_id = gutenberg_id;
        self
    }

    /// Publication year, used for the output directory name.
    #[must_use]
    pub fn year(&self) -> &str {
        &self.render.tei.year
    }

    /// Check the job before any file is touched.
    pub fn validate(&self) -> Result<()> {
        validate_element(&self.element)?;
        validate_year(self.year())?;
        self.segmentation.validate()
    }

    /// Build the boundary matcher for this job.
    #[must_use]
    pub fn matcher(&self, registry: &KindRegistry) -> BoundaryMatcher {
        let matcher = BoundaryMatcher::new(self.element.as_str(), registry)
            .with_attr_filter(self.attr.as_str())
            .with_excluded_values(self.excluded_values.iter().cloned());

        match self.kind {
            Some(kind) => matcher.with_kind(kind),
            None => matcher,
        }
    }

    /// Build the split engine for this job.
    pub fn engine(&self, registry: &KindRegistry) -> Result<SplitEngine> {
        SplitEngine::new(self.matcher(registry), self.segmentation.clone())
    }

    /// Directory this job writes its segment files to.
    #[must_use]
    pub fn target_dir(&self) -> PathBuf {
        output_directory(&self.output_dir, &self.source, self.year())
    }

    /// Source path as shown in reports.
    #[must_use]
    pub fn source(&self) -> &Path {
        &self.source
    }
}
