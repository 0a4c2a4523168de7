//! Segmentation of HTML documents into chapters.
//!
//! A [`BoundaryMatcher`] selects the elements that start a segment. Its
//! [`StructuralKind`], taken from a [`KindRegistry`], decides whether a
//! boundary wraps its segment (container) or merely opens it (sibling), and
//! the [`SplitEngine`] turns the matches into numbered [`Segment`]s.

mod config;
mod engine;
mod matcher;
mod registry;
mod strategy;
mod types;

pub use config::create_html_kind_registry;
pub use engine::{Segments, SplitEngine};
pub use matcher::{find_candidates, BoundaryMatcher};
pub use registry::KindRegistry;
pub use strategy::{strategy_for, ContainerStrategy, Extraction, SegmentStrategy, SiblingStrategy};
pub use types::{Segment, SegmentationConfig, StructuralKind};
