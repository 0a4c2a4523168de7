//! Core data types shared by the renderer, the orchestrator and the CLI.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::{Result, SplitterError};

/// Output format of segment files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Segment text as-is.
    #[default]
    Plain,

    /// Segment text wrapped in a TEI Simple document.
    Tei,
}

impl OutputFormat {
    /// Get the configuration name of this format.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Tei => "tei",
        }
    }

    /// Human-readable label for reports.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Plain => "plain text",
            Self::Tei => "TEI",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = SplitterError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "plain" => Ok(Self::Plain),
            "tei" => Ok(Self::Tei),
            _ => Err(SplitterError::InvalidOutputFormat(s.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bibliographic metadata for the TEI header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeiMetadata {
    pub title: String,
    pub author: String,
    pub publisher: String,
    /// Place of publication.
    pub location: String,
    pub year: String,
}

/// How segments are rendered and named.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderConfig {
    pub format: OutputFormat,

    /// Prepended to every output filename.
    pub prefix: String,

    pub tei: TeiMetadata,
}

impl RenderConfig {
    /// Create a render configuration for a format.
    #[must_use]
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            ..Self::default()
        }
    }

    /// Set the filename prefix.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Set the TEI metadata.
    #[must_use]
    pub fn with_tei(mut self, tei: TeiMetadata) -> Self {
        self.tei = tei;
        self
    }
}
