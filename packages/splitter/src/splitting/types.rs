//! Types for the segmentation system.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::config::{validate_offset, DEFAULT_DIV_TYPE, DEFAULT_END_MARKER};
use crate::error::{Result, SplitterError};

/// How a boundary element relates to the content of its segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StructuralKind {
    /// The boundary element wraps the whole segment (e.g. `<div class="chapter">`).
    Container,

    /// The boundary element only starts the segment; its content runs on
    /// through the following siblings up to the next boundary (e.g. `<h3>`).
    Sibling,
}

impl StructuralKind {
    /// Get the configuration name of this kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Container => "container",
            Self::Sibling => "sibling",
        }
    }
}

impl FromStr for StructuralKind {
    type Err = SplitterError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "container" => Ok(Self::Container),
            "sibling" => Ok(Self::Sibling),
            _ => Err(SplitterError::InvalidStructuralKind(s.to_string())),
        }
    }
}

impl fmt::Display for StructuralKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Settings that control which candidates become segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentationConfig {
    /// 1-based position of the first candidate whose segment is kept.
    ///
    /// Earlier candidates are still counted but produce no output.
    pub offset: u32,

    /// Text that marks the end of meaningful content. Empty disables
    /// truncation.
    pub end_marker: String,

    /// Division type stamped on every produced segment.
    pub div_type: String,
}

impl SegmentationConfig {
    /// Create a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            offset: 1,
            end_marker: DEFAULT_END_MARKER.to_string(),
            div_type: DEFAULT_DIV_TYPE.to_string(),
        }
    }

    /// Set the offset.
    #[must_use]
    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }

    /// Set the end marker.
    #[must_use]
    pub fn with_end_marker(mut self, end_marker: impl Into<String>) -> Self {
        self.end_marker = end_marker.into();
        self
    }

    /// Set the division type.
    #[must_use]
    pub fn with_div_type(mut self, div_type: impl Into<String>) -> Self {
        self.div_type = div_type.into();
        self
    }

    /// Check the configuration before any segmentation starts.
    pub fn validate(&self) -> Result<()> {
        validate_offset(self.offset)?;
        if self.div_type.trim().is_empty() {
            return Err(SplitterError::InvalidConfig(
                "div type must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// One produced unit of output content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Output position, consecutive from 1 over retained segments.
    pub position: u32,

    /// Concatenated text of the segment.
    pub text: String,

    /// Division type (e.g., "chapter", "poem", "letter").
    pub div_type: String,
}

impl Segment {
    /// Create a new segment.
    #[must_use]
    pub fn new(position: u32, text: impl Into<String>, div_type: impl Into<String>) -> Self {
        Self {
            position,
            text: text.into(),
            div_type: div_type.into(),
        }
    }
}
