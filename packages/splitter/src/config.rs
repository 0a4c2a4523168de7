//! Configuration constants and validation functions for the splitter.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{Result, SplitterError};

/// Text that marks the end of the book proper in Project Gutenberg files.
///
/// Everything from the license boilerplate onwards is not part of the text.
pub const DEFAULT_END_MARKER: &str = "PROJECT GUTENBERG EBOOK";

/// Default TEI `div` type and filename stem for segments.
pub const DEFAULT_DIV_TYPE: &str = "chapter";

/// Default base directory for split output.
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Default directory downloaded source files are saved to.
pub const DEFAULT_INPUT_DIR: &str = "input";

/// Default corpus name when the YAML file does not give one.
pub const DEFAULT_CORPUS_NAME: &str = "corpus";

/// Base URL for Project Gutenberg's ebook cache.
pub const GUTENBERG_CACHE_URL: &str = "https://www.gutenberg.org/cache/epub";

/// URL of the Project Gutenberg catalog in CSV form.
pub const GUTENBERG_CATALOG_URL: &str = "https://www.gutenberg.org/cache/epub/feeds/pg_catalog.csv";

/// Default location of the downloaded catalog.
pub const DEFAULT_CATALOG_PATH: &str = "meta/pg_catalog.csv";

/// A catalog older than this many days is downloaded again.
pub const CATALOG_MAX_AGE_DAYS: u64 = 7;

/// Maximum number of catalog search results shown.
pub const SEARCH_RESULT_LIMIT: usize = 30;

/// HTTP timeout in seconds.
pub const HTTP_TIMEOUT_SECS: u64 = 30;

/// Gutenberg ID pattern: digits without a leading zero.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static GUTENBERG_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[1-9]\d*$").expect("valid regex"));

/// Validate a publication year.
///
/// The year is free text ("1818", "c. 1818", "1818-1819") written into the
/// TEI `<date>` and prefixed to the output directory name, so it must not
/// contain a path separator. An empty year means "no year": the output
/// directory then carries no year prefix.
///
/// # Examples
/// ```
/// use gutenberg_splitter::config::validate_year;
///
/// assert!(validate_year("1818").is_ok());
/// assert!(validate_year("c. 1818").is_ok());
/// assert!(validate_year("").is_ok());
/// assert!(validate_year("1818/1819").is_err());
/// ```
pub fn validate_year(year: &str) -> Result<()> {
    if year.contains(['/', '\\']) {
        return Err(SplitterError::InvalidYear(year.to_string()));
    }
    Ok(())
}

/// Parse and validate a Project Gutenberg book ID.
///
/// # Examples
/// ```
/// use gutenberg_splitter::config::validate_gutenberg_id;
///
/// assert_eq!(validate_gutenberg_id("84").unwrap(), 84);
/// assert!(validate_gutenberg_id("0").is_err());
/// assert!(validate_gutenberg_id("pg84").is_err());
/// ```
pub fn validate_gutenberg_id(book_id: &str) -> Result<u32> {
    let trimmed = book_id.trim();
    if !GUTENBERG_ID_PATTERN.is_match(trimmed) {
        return Err(SplitterError::InvalidGutenbergId(book_id.to_string()));
    }
    trimmed
        .parse()
        .map_err(|_| SplitterError::InvalidGutenbergId(book_id.to_string()))
}

/// Validate a segmentation offset.
///
/// The offset is the 1-based position of the first retained candidate, so
/// zero is meaningless.
pub fn validate_offset(offset: u32) -> Result<()> {
    if offset == 0 {
        return Err(SplitterError::InvalidConfig(
            "offset must be at least 1 (1 keeps every candidate)".to_string(),
        ));
    }
    Ok(())
}

/// Validate a boundary element name.
pub fn validate_element(element: &str) -> Result<()> {
    if element.trim().is_empty() {
        return Err(SplitterError::InvalidConfig(
            "boundary element must not be empty".to_string(),
        ));
    }
    if element.chars().any(char::is_whitespace) {
        return Err(SplitterError::InvalidConfig(format!(
            "boundary element '{element}' must be a single tag name"
        )));
    }
    Ok(())
}

/// Build the URL of a book's HTML5 edition under an ebook cache base URL.
///
/// A trailing slash on `base_url` is ignored.
///
/// # Examples
/// ```
/// use gutenberg_splitter::config::{book_html_url, GUTENBERG_CACHE_URL};
///
/// assert_eq!(
///     book_html_url(GUTENBERG_CACHE_URL, 84),
///     "https://www.gutenberg.org/cache/epub/84/pg84-images.html.utf8"
/// );
/// ```
pub fn book_html_url(base_url: &str, book_id: u32) -> String {
    let base = base_url.trim_end_matches('/');
    format!("{base}/{book_id}/pg{book_id}-images.html.utf8")
}
