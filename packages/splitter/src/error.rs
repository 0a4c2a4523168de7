//! Error types for the splitter.
//!
//! Configuration problems surface before any segmentation starts; the
//! segmentation engine itself never fails. I/O, YAML and HTTP failures are
//! reported per source file so a corpus run can continue past them.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the splitter library.
#[derive(Debug, Error)]
pub enum SplitterError {
    /// Source HTML file does not exist or is not a regular file.
    #[error("File not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    /// Invalid boundary or output configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Unknown structural kind name.
    #[error("Invalid structural kind: '{0}'. Expected 'container' or 'sibling'")]
    InvalidStructuralKind(String),

    /// Unknown output format name.
    #[error("Invalid output format: '{0}'. Expected 'plain' or 'tei'")]
    InvalidOutputFormat(String),

    /// Invalid publication year.
    #[error("Invalid year: '{0}'. A year must not contain '/' or '\\'")]
    InvalidYear(String),

    /// Invalid Project Gutenberg book ID.
    #[error("Invalid Gutenberg ID: '{0}'. Expected a positive number (e.g., 84)")]
    InvalidGutenbergId(String),

    /// Gutenberg server answered with a non-success status.
    #[error("No HTML version available for PG #{book_id} (HTTP {status})")]
    Download { book_id: u32, status: u16 },

    /// Gutenberg server did not serve the catalog.
    #[error("Could not download the Project Gutenberg catalog (HTTP {status})")]
    CatalogDownload { status: u16 },

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Corpus YAML could not be parsed.
    #[error("YAML parsing failed: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// Catalog CSV could not be parsed.
    #[error("CSV parsing failed: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type alias for splitter operations.
pub type Result<T> = std::result::Result<T, SplitterError>;
