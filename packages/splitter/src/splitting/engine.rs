//! Split engine that turns a document into an ordered sequence of segments.

use std::iter::FusedIterator;
use std::vec;

use scraper::Html;

use super::matcher::{find_candidates, BoundaryMatcher};
use super::strategy::{strategy_for, Extraction, SegmentStrategy};
use super::types::{Segment, SegmentationConfig};
use crate::error::Result;
use crate::html::HtmlNode;

/// Engine for splitting a document at boundary elements.
///
/// Candidates are visited in document order. Every visited candidate
/// advances the position counter; only candidates at or past the configured
/// offset produce a segment, and produced segments are numbered 1, 2, 3, …
/// regardless of how many candidates were skipped.
pub struct SplitEngine {
    matcher: BoundaryMatcher,
    config: SegmentationConfig,
}

impl SplitEngine {
    /// Create a new split engine.
    ///
    /// Fails if the configuration is invalid; once constructed, segmentation
    /// itself cannot fail.
    pub fn new(matcher: BoundaryMatcher, config: SegmentationConfig) -> Result<Self> {
        crate::config::validate_element(matcher.tag())?;
        config.validate()?;
        Ok(Self { matcher, config })
    }

    /// The boundary matcher.
    #[must_use]
    pub fn matcher(&self) -> &BoundaryMatcher {
        &self.matcher
    }

    /// The segmentation settings.
    #[must_use]
    pub fn config(&self) -> &SegmentationConfig {
        &self.config
    }

    /// Lazily split a document into segments.
    ///
    /// The returned iterator is finite and cannot be restarted; call this
    /// again on the same document to get an identical sequence.
    pub fn segments<'a>(&'a self, document: &'a Html) -> Segments<'a> {
        let candidates = find_candidates(document, &self.matcher);
        tracing::debug!(
            tag = %self.matcher.tag(),
            kind = %self.matcher.kind(),
            candidates = candidates.len(),
            offset = self.config.offset,
            "Starting segmentation"
        );

        if candidates.is_empty() {
            tracing::warn!(
                tag = %self.matcher.tag(),
                attr = self.matcher.attr_filter().unwrap_or(""),
                "No boundary candidates found"
            );
        }

        Segments {
            candidates: candidates.into_iter(),
            engine: self,
            strategy: strategy_for(self.matcher.kind()),
            counter: 1,
            emitted: 0,
            finished: false,
        }
    }
}

/// Lazy sequence of segments produced by [`SplitEngine::segments`].
pub struct Segments<'a> {
    candidates: vec::IntoIter<HtmlNode<'a>>,
    engine: &'a SplitEngine,
    strategy: &'static dyn SegmentStrategy,
    /// Position of the next candidate among all candidates, starting at 1.
    counter: u32,
    /// Number of segments produced so far.
    emitted: u32,
    finished: bool,
}

impl Segments<'_> {
    fn is_retained(&self) -> bool {
        self.counter >= self.engine.config.offset
    }

    fn emit(&mut self, text: String) -> Segment {
        self.emitted += 1;
        tracing::debug!(
            position = self.emitted,
            candidate = self.counter,
            chars = text.len(),
            "Produced segment"
        );
        Segment::new(self.emitted, text, self.engine.config.div_type.clone())
    }
}

impl Iterator for Segments<'_> {
    type Item = Segment;

    fn next(&mut self) -> Option<Segment> {
        if self.finished {
            return None;
        }

        while let Some(candidate) = self.candidates.next() {
            let retained = self.is_retained();
            let extraction = self.strategy.extract(
                candidate,
                &self.engine.matcher,
                &self.engine.config.end_marker,
            );

            match extraction {
                Extraction::EndOfContent => {
                    tracing::debug!(candidate = self.counter, "End marker reached, discarding");
                    break;
                }
                Extraction::Final(text) => {
                    tracing::debug!(candidate = self.counter, "End marker reached, keeping");
                    let segment = retained.then(|| self.emit(text));
                    self.counter += 1;
                    self.finished = true;
                    return segment;
                }
                Extraction::Segment(text) => {
                    let segment = retained.then(|| self.emit(text));
                    self.counter += 1;
                    if segment.is_some() {
                        return segment;
                    }
                }
            }
        }

        self.finished = true;
        None
    }
}

impl FusedIterator for Segments<'_> {}
