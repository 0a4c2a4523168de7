//! HTTP client for downloading books and the catalog from Project Gutenberg.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::redirect::Policy;
use reqwest::StatusCode;

use crate::config::{book_html_url, GUTENBERG_CACHE_URL, HTTP_TIMEOUT_SECS};
use crate::error::{Result, SplitterError};

/// User agent string identifying this splitter.
const USER_AGENT: &str = concat!("gutenberg-splitter/", env!("CARGO_PKG_VERSION"));

/// Create a configured HTTP client.
///
/// Redirects are not followed: Gutenberg redirects missing HTML editions to
/// a landing page, which must count as "not available".
pub fn create_client() -> Result<Client> {
    let client = Client::builder()
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .user_agent(USER_AGENT)
        .redirect(Policy::none())
        .build()?;
    Ok(client)
}

/// Path a downloaded book is saved to.
///
/// `name` may be given with or without a `.html` extension; without a name
/// the book is saved as `pg{book_id}.html`.
///
/// # Examples
/// ```
/// use std::path::Path;
/// use gutenberg_splitter::http::download_path;
///
/// assert_eq!(download_path(Path::new("input"), 84, None), Path::new("input/pg84.html"));
/// assert_eq!(
///     download_path(Path::new("input"), 84, Some("frankenstein.html")),
///     Path::new("input/frankenstein.html")
/// );
/// ```
pub fn download_path(input_dir: &Path, book_id: u32, name: Option<&str>) -> PathBuf {
    let stem = match name.map(str::trim).filter(|n| !n.is_empty()) {
        Some(name) => name.strip_suffix(".html").unwrap_or(name).to_string(),
        None => format!("pg{book_id}"),
    };
    input_dir.join(format!("{stem}.html"))
}

/// Download the HTML edition of a Gutenberg book into `input_dir`.
///
/// The file name comes from [`download_path`]. See [`download_book`] for how
/// the request is made.
///
/// # Returns
/// Path of the saved (or already present) file
pub fn download_gutenberg(
    client: &Client,
    book_id: u32,
    name: Option<&str>,
    input_dir: &Path,
) -> Result<PathBuf> {
    let path = download_path(input_dir, book_id, name);
    download_book(client, GUTENBERG_CACHE_URL, book_id, &path)
}

/// Download the HTML edition of a book from an ebook cache to `path`.
///
/// An existing file at `path` is kept and no request is made. A single
/// attempt is made; any non-200 status is reported as
/// [`SplitterError::Download`]. Missing parent directories are created.
///
/// # Returns
/// `path`, now holding the book
pub fn download_book(
    client: &Client,
    base_url: &str,
    book_id: u32,
    path: &Path,
) -> Result<PathBuf> {
    if path.exists() {
        tracing::info!(path = %path.display(), "Source already present, skipping download");
        return Ok(path.to_path_buf());
    }

    let url = book_html_url(base_url, book_id);
    tracing::debug!(book_id, url = %url, "Downloading");

    let bytes = fetch(client, &url).map_err(|e| match e {
        FetchError::Status(status) => SplitterError::Download { book_id, status },
        FetchError::Http(e) => SplitterError::Http(e),
    })?;
    save(path, &bytes)?;

    tracing::info!(book_id, path = %path.display(), bytes = bytes.len(), "Downloaded");
    Ok(path.to_path_buf())
}

/// Download the Project Gutenberg catalog CSV from `url` to `path`.
///
/// Unlike [`download_book`] an existing file is replaced; callers decide
/// when the catalog is stale.
pub fn download_catalog(client: &Client, url: &str, path: &Path) -> Result<()> {
    tracing::debug!(url = %url, "Downloading catalog");

    let bytes = fetch(client, url).map_err(|e| match e {
        FetchError::Status(status) => SplitterError::CatalogDownload { status },
        FetchError::Http(e) => SplitterError::Http(e),
    })?;
    save(path, &bytes)?;

    tracing::info!(path = %path.display(), bytes = bytes.len(), "Downloaded catalog");
    Ok(())
}

/// Failure of a single GET request.
enum FetchError {
    Status(u16),
    Http(reqwest::Error),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e)
    }
}

/// GET a URL and return the body of a 200 response.
fn fetch(client: &Client, url: &str) -> std::result::Result<Vec<u8>, FetchError> {
    let response = client.get(url).send()?;
    let status = response.status();
    if status != StatusCode::OK {
        return Err(FetchError::Status(status.as_u16()));
    }
    Ok(response.bytes()?.to_vec())
}

/// Write downloaded bytes, creating the parent directory first.
fn save(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, bytes)?;
    Ok(())
}
