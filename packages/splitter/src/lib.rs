//! Gutenberg Splitter - Split Project Gutenberg HTML texts into chapter files.
//!
//! A source HTML document is cut at boundary elements (a heading such as
//! `<h3>`, or a wrapper such as `<div class="chapter">`) and every segment is
//! written to its own file, either as plain text or wrapped in a TEI Simple
//! document.
//!
//! # Example
//!
//! ```
//! use gutenberg_splitter::html::parse_document;
//! use gutenberg_splitter::splitting::{
//!     create_html_kind_registry, BoundaryMatcher, SegmentationConfig, SplitEngine,
//! };
//!
//! let doc = parse_document("<h3>I</h3><p>One.</p><h3>II</h3><p>Two.</p>");
//! let matcher = BoundaryMatcher::new("h3", &create_html_kind_registry());
//! let engine = SplitEngine::new(matcher, SegmentationConfig::new()).unwrap();
//!
//! let texts: Vec<String> = engine.segments(&doc).map(|s| s.text).collect();
//! assert_eq!(texts, vec!["IOne.", "IITwo."]);
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Configuration constants and validation
//! - [`types`]: Output format and render settings
//! - [`error`]: Error types and Result alias
//! - [`html`]: HTML tree helpers
//! - [`splitting`]: Boundary matching and segmentation
//! - [`render`]: Plain and TEI output files
//! - [`job`]: Per-file job description
//! - [`corpus`]: YAML corpus loading
//! - [`splitter`]: Main splitter service
//! - [`http`]: Project Gutenberg downloads
//! - [`catalog`]: Project Gutenberg catalog search
//! - [`inspect`]: Element inventory and candidate previews
//! - [`cli`]: Command-line interface

pub mod catalog;
pub mod cli;
pub mod config;
pub mod corpus;
pub mod error;
pub mod html;
pub mod http;
pub mod inspect;
pub mod job;
pub mod render;
pub mod splitter;
pub mod splitting;
pub mod types;

// Re-export main functions
pub use splitter::{split_all, split_file};

// Re-export commonly used items
pub use corpus::Corpus;
pub use error::{Result, SplitterError};
pub use job::JobConfig;
pub use splitter::{FileReport, JobResult};
pub use types::{OutputFormat, RenderConfig, TeiMetadata};
