//! Project Gutenberg catalog search.
//!
//! The catalog is the CSV feed Gutenberg publishes of every book it holds.
//! It is kept on disk and downloaded again once it is more than a week old.

use std::fs::{self, File};
use std::io::Read;
use std::path::Path;
use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;

use crate::error::Result;
use crate::http::download_catalog;

/// Catalog `Type` of books that have a text edition.
const TEXT_TYPE: &str = "Text";

/// One row of the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CatalogEntry {
    #[serde(rename = "Text#")]
    pub id: u32,

    /// `Text`, `Sound`, `Image`, ...
    #[serde(rename = "Type", default)]
    pub kind: String,

    #[serde(rename = "Issued", default)]
    pub issued: String,

    #[serde(rename = "Title", default)]
    pub title: String,

    #[serde(rename = "Language", default)]
    pub language: String,

    #[serde(rename = "Authors", default)]
    pub authors: String,

    #[serde(rename = "Subjects", default)]
    pub subjects: String,

    #[serde(rename = "LoCC", default)]
    pub locc: String,

    #[serde(rename = "Bookshelves", default)]
    pub bookshelves: String,
}

/// Filters for a catalog search.
///
/// Text filters are case-insensitive substring matches. All given filters
/// must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    author: Option<String>,
    title: Option<String>,
    subject: Option<String>,
    book_id: Option<u32>,
}

impl SearchQuery {
    /// Create a query without filters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Require the authors field to contain `author`.
    pub fn with_author(mut self, author: impl AsRef<str>) -> Self {
        self.author = normalize(author.as_ref());
        self
    }

    /// Require the title to contain `title`.
    pub fn with_title(mut self, title: impl AsRef<str>) -> Self {
        self.title = normalize(title.as_ref());
        self
    }

    /// Require the subjects field to contain `subject`.
    pub fn with_subject(mut self, subject: impl AsRef<str>) -> Self {
        self.subject = normalize(subject.as_ref());
        self
    }

    /// Require this book ID.
    pub fn with_book_id(mut self, book_id: Option<u32>) -> Self {
        self.book_id = book_id;
        self
    }

    /// Whether no filter is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.author.is_none()
            && self.title.is_none()
            && self.subject.is_none()
            && self.book_id.is_none()
    }

    /// Check whether a catalog entry is a text that passes every filter.
    pub fn matches(&self, entry: &CatalogEntry) -> bool {
        entry.kind == TEXT_TYPE
            && self.book_id.is_none_or(|id| id == entry.id)
            && contains_filter(&entry.authors, self.author.as_deref())
            && contains_filter(&entry.title, self.title.as_deref())
            && contains_filter(&entry.subjects, self.subject.as_deref())
    }
}

/// Lowercased filter text, or `None` for a blank filter.
fn normalize(filter: &str) -> Option<String> {
    let filter = filter.trim();
    (!filter.is_empty()).then(|| filter.to_lowercase())
}

fn contains_filter(field: &str, filter: Option<&str>) -> bool {
    filter.is_none_or(|needle| field.to_lowercase().contains(needle))
}

/// The parsed catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Load a catalog CSV file.
    pub fn load(path: &Path) -> Result<Self> {
        Self::from_reader(File::open(path)?)
    }

    /// Parse catalog CSV with a header row.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let entries = csv::Reader::from_reader(reader)
            .deserialize()
            .collect::<std::result::Result<Vec<CatalogEntry>, _>>()?;

        tracing::debug!(entries = entries.len(), "Loaded catalog");
        Ok(Self { entries })
    }

    /// Number of rows in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All texts matching the query, in catalog order.
    pub fn search(&self, query: &SearchQuery) -> Vec<&CatalogEntry> {
        self.entries.iter().filter(|e| query.matches(e)).collect()
    }
}

/// Check whether the catalog at `path` must be downloaded.
///
/// A missing file is stale. A modification time in the future counts as
/// fresh.
pub fn is_stale(path: &Path, max_age: Duration) -> Result<bool> {
    if !path.is_file() {
        return Ok(true);
    }
    let modified = fs::metadata(path)?.modified()?;
    Ok(modified.elapsed().is_ok_and(|age| age > max_age))
}

/// Make sure a current catalog exists at `path`, downloading it from `url`
/// when it is missing or older than `max_age`.
///
/// # Returns
/// `true` if the catalog was downloaded
pub fn ensure_catalog(
    client: &Client,
    url: &str,
    path: &Path,
    max_age: Duration,
) -> Result<bool> {
    if !is_stale(path, max_age)? {
        tracing::debug!(path = %path.display(), "Catalog is current");
        return Ok(false);
    }

    download_catalog(client, url, path)?;
    Ok(true)
}
