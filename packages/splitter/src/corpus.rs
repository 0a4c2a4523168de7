//! Corpus configuration: many source files described in one YAML document.
//!
//! Every text entry becomes one [`JobConfig`]. Corpus-level `output_format`
//! and `output_dir` apply to every entry that does not override them.

use std::fs;
use std::path::{Path, PathBuf};

use reqwest::blocking::Client;
use serde::{Deserialize, Deserializer};

use crate::config::{
    DEFAULT_CORPUS_NAME, DEFAULT_DIV_TYPE, DEFAULT_END_MARKER, DEFAULT_OUTPUT_DIR,
};
use crate::error::{Result, SplitterError};
use crate::http::download_book;
use crate::job::JobConfig;
use crate::splitting::{SegmentationConfig, StructuralKind};
use crate::types::{OutputFormat, RenderConfig, TeiMetadata};

/// Top-level layout of a corpus YAML file.
#[derive(Debug, Deserialize)]
struct CorpusFile {
    #[serde(default = "default_corpus_name")]
    corpus_name: String,

    #[serde(default)]
    output_format: OutputFormat,

    #[serde(default = "default_output_dir")]
    output_dir: PathBuf,

    #[serde(default)]
    texts: Vec<TextEntry>,
}

/// One text in the corpus.
#[derive(Debug, Deserialize)]
struct TextEntry {
    file: Option<PathBuf>,

    gutenberg_id: Option<u32>,

    elem: String,

    #[serde(default)]
    attr: String,

    kind: Option<StructuralKind>,

    #[serde(default = "default_offset")]
    offset: u32,

    #[serde(default, deserialize_with = "deserialize_year")]
    year: String,

    #[serde(default)]
    prefix: String,

    #[serde(default = "default_end_marker")]
    end_marker: String,

    #[serde(default)]
    excluded_attrs: Vec<String>,

    div_type: Option<String>,

    output_format: Option<OutputFormat>,

    output_dir: Option<PathBuf>,

    #[serde(default)]
    tei: TeiEntry,
}

#[derive(Debug, Default, Deserialize)]
struct TeiEntry {
    #[serde(default)]
    title: String,
    #[serde(default)]
    author: String,
    #[serde(default)]
    publisher: String,
    #[serde(default)]
    location: String,
    div_type: Option<String>,
}

fn default_corpus_name() -> String {
    DEFAULT_CORPUS_NAME.to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIR)
}

fn default_offset() -> u32 {
    1
}

fn default_end_marker() -> String {
    DEFAULT_END_MARKER.to_string()
}

/// Accept a year written either as a number (`1818`) or a string (`"1818"`).
fn deserialize_year<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Year {
        Number(u64),
        Text(String),
    }

    Ok(match Option::<Year>::deserialize(deserializer)? {
        Some(Year::Number(n)) => n.to_string(),
        Some(Year::Text(s)) => s.trim().to_string(),
        None => String::new(),
    })
}

/// A loaded corpus: a name and one job per text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Corpus {
    pub name: String,
    pub jobs: Vec<JobConfig>,
}

impl Corpus {
    /// Load a corpus from a YAML file.
    ///
    /// `input_dir` is where sources given only by Gutenberg ID are expected
    /// (and downloaded to).
    pub fn load(path: &Path, input_dir: &Path) -> Result<Self> {
        let yaml = fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml, input_dir)
    }

    /// Parse a corpus from YAML text.
    pub fn from_yaml_str(yaml: &str, input_dir: &Path) -> Result<Self> {
        let file: CorpusFile = serde_yaml_ng::from_str(yaml)?;

        let jobs = file
            .texts
            .into_iter()
            .enumerate()
            .map(|(i, entry)| entry.into_job(i + 1, file.output_format, &file.output_dir, input_dir))
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(corpus = %file.corpus_name, texts = jobs.len(), "Loaded corpus");

        Ok(Self {
            name: file.corpus_name,
            jobs,
        })
    }

    /// Jobs whose source is missing but can be downloaded by Gutenberg ID.
    pub fn missing_downloads(&self) -> impl Iterator<Item = (&JobConfig, u32)> {
        self.jobs
            .iter()
            .filter(|job| !job.source.exists())
            .filter_map(|job| job.gutenberg_id.map(|id| (job, id)))
    }

    /// Download every missing source that has a Gutenberg ID.
    ///
    /// Each book is saved at exactly its job's source path, whatever its
    /// extension, so the split that follows finds it. A failed download is
    /// passed to `on_done` and the remaining books are still fetched; the
    /// text itself then fails with [`SplitterError::SourceNotFound`].
    pub fn download_missing<F>(&self, client: &Client, base_url: &str, mut on_done: F)
    where
        F: FnMut(u32, &Result<PathBuf>),
    {
        for (job, book_id) in self.missing_downloads() {
            let result = download_book(client, base_url, book_id, job.source());
            if let Err(e) = &result {
                tracing::warn!(
                    book_id,
                    source = %job.source().display(),
                    error = %e,
                    "Download failed"
                );
            }
            on_done(book_id, &result);
        }
    }
}

impl TextEntry {
    fn into_job(
        self,
        index: usize,
        corpus_format: OutputFormat,
        corpus_output_dir: &Path,
        input_dir: &Path,
    ) -> Result<JobConfig> {
        let source = match (self.file, self.gutenberg_id) {
            (Some(file), _) => file,
            (None, Some(id)) => input_dir.join(format!("pg{id}.html")),
            (None, None) => {
                return Err(SplitterError::InvalidConfig(format!(
                    "text #{index} needs a 'file' or a 'gutenberg_id'"
                )));
            }
        };

        let div_type = self
            .tei
            .div_type
            .or(self.div_type)
            .unwrap_or_else(|| DEFAULT_DIV_TYPE.to_string());

        let segmentation = SegmentationConfig::new()
            .with_offset(self.offset)
            .with_end_marker(self.end_marker)
            .with_div_type(div_type);

        let render = RenderConfig::new(self.output_format.unwrap_or(corpus_format))
            .with_prefix(self.prefix)
            .with_tei(TeiMetadata {
                title: self.tei.title,
                author: self.tei.author,
                publisher: self.tei.publisher,
                location: self.tei.location,
                year: self.year,
            });

        let job = JobConfig::new(source, self.elem)
            .with_gutenberg_id(self.gutenberg_id)
            .with_attr(self.attr)
            .with_kind(self.kind)
            .with_excluded_values(self.excluded_attrs)
            .with_segmentation(segmentation)
            .with_render(render)
            .with_output_dir(self.output_dir.unwrap_or_else(|| corpus_output_dir.to_path_buf()));

        job.validate()?;
        Ok(job)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const ROMANTICS: &str = r#"
corpus_name: romantics
output_format: tei
output_dir: corpus_out
texts:
  - file: input/frankenstein.html
    elem: h3
    year: 1818
    excluded_attrs: [figure]
    tei:
      title: Frankenstein
      author: Mary Shelley
      div_type: letter
  - gutenberg_id: 1342
    elem: div
    attr: chapter
    kind: container
    offset: 2
    year: "1813"
    div_type: novel_chapter
    output_format: plain
    output_dir: elsewhere
"#;

    fn load() -> Corpus {
        Corpus::from_yaml_str(ROMANTICS, Path::new("downloads")).unwrap()
    }

    #[test]
    fn test_corpus_defaults_applied() {
        let corpus = load();
        assert_eq!(corpus.name, "romantics");
        assert_eq!(corpus.jobs.len(), 2);

        let first = &corpus.jobs[0];
        assert_eq!(first.source, PathBuf::from("input/frankenstein.html"));
        assert_eq!(first.render.format, OutputFormat::Tei);
        assert_eq!(first.output_dir, PathBuf::from("corpus_out"));
        assert_eq!(first.segmentation.offset, 1);
        assert_eq!(first.segmentation.end_marker, "PROJECT GUTENBERG EBOOK");
        assert_eq!(first.year(), "1818");
        assert_eq!(first.excluded_values, vec!["figure".to_string()]);
        assert_eq!(first.kind, None);
    }

    #[test]
    fn test_tei_div_type_takes_precedence() {
        let corpus = load();
        assert_eq!(corpus.jobs[0].segmentation.div_type, "letter");
        assert_eq!(corpus.jobs[1].segmentation.div_type, "novel_chapter");
    }

    #[test]
    fn test_per_text_overrides() {
        let second = &load().jobs[1];
        assert_eq!(second.source, PathBuf::from("downloads/pg1342.html"));
        assert_eq!(second.gutenberg_id, Some(1342));
        assert_eq!(second.kind, Some(StructuralKind::Container));
        assert_eq!(second.segmentation.offset, 2);
        assert_eq!(second.render.format, OutputFormat::Plain);
        assert_eq!(second.output_dir, PathBuf::from("elsewhere"));
        assert_eq!(second.year(), "1813");
    }

    #[test]
    fn test_minimal_corpus() {
        let corpus =
            Corpus::from_yaml_str("texts:\n  - file: a.html\n    elem: h2\n", Path::new("input"))
                .unwrap();
        assert_eq!(corpus.name, "corpus");
        assert_eq!(corpus.jobs[0].render.format, OutputFormat::Plain);
        assert_eq!(corpus.jobs[0].output_dir, PathBuf::from("output"));
        assert_eq!(corpus.jobs[0].segmentation.div_type, "chapter");
    }

    #[test]
    fn test_entry_without_source_rejected() {
        let err = Corpus::from_yaml_str("texts:\n  - elem: h2\n", Path::new("input")).unwrap_err();
        assert!(matches!(err, SplitterError::InvalidConfig(_)));
        assert!(err.to_string().contains("#1"));
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let yaml = "texts:\n  - file: a.html\n    elem: h2\n    kind: wrapper\n";
        assert!(matches!(
            Corpus::from_yaml_str(yaml, Path::new("input")),
            Err(SplitterError::Yaml(_))
        ));
    }

    #[test]
    fn test_zero_offset_rejected() {
        let yaml = "texts:\n  - file: a.html\n    elem: h2\n    offset: 0\n";
        assert!(Corpus::from_yaml_str(yaml, Path::new("input")).is_err());
    }

    #[test]
    fn test_missing_downloads() {
        let corpus = load();
        let missing: Vec<u32> = corpus.missing_downloads().map(|(_, id)| id).collect();
        assert_eq!(missing, vec![1342]);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_download_missing_saves_at_source_path() {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/84/pg84-images.html.utf8"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<h3>Letter 1</h3>"))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/1342/pg1342-images.html.utf8"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let tmp = tempfile::TempDir::new().unwrap();
        let yaml = format!(
            "texts:\n  - file: {}\n    gutenberg_id: 84\n    elem: h3\n  - gutenberg_id: 1342\n    elem: div\n",
            tmp.path().join("frankenstein.htm").display()
        );
        let corpus = Corpus::from_yaml_str(&yaml, tmp.path()).unwrap();
        let base_url = mock_server.uri();

        let (corpus, outcomes) = tokio::task::spawn_blocking(move || {
            let client = crate::http::create_client().unwrap();
            let mut outcomes = Vec::new();
            corpus.download_missing(&client, &base_url, |id, result| {
                outcomes.push((id, result.is_ok()));
            });
            (corpus, outcomes)
        })
        .await
        .unwrap();

        assert_eq!(outcomes, vec![(84, true), (1342, false)]);
        let source = &corpus.jobs[0].source;
        assert_eq!(source, &tmp.path().join("frankenstein.htm"));
        assert_eq!(fs::read_to_string(source).unwrap(), "<h3>Letter 1</h3>");
        let missing: Vec<u32> = corpus.missing_downloads().map(|(_, id)| id).collect();
        assert_eq!(missing, vec![1342]);
    }
}
