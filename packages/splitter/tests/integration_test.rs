//! End-to-end integration tests for the splitter pipeline.
//!
//! Splits the HTML fixtures under `tests/fixtures/` into temporary output
//! directories and checks the files written.

use std::fs;
use std::path::{Path, PathBuf};

use gutenberg_splitter::splitting::{SegmentationConfig, StructuralKind};
use gutenberg_splitter::{
    split_all, split_file, Corpus, JobConfig, OutputFormat, RenderConfig, SplitterError,
    TeiMetadata,
};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

const LETTER_1: &str = "Letter 1\nTo Mrs. Saville, England.\nYou will rejoice to hear that no disaster has accompanied the commencement of an enterprise.";
const LETTER_2: &str = "Letter 2\nTo Mrs. Saville, England.\nHow slowly the time passes here, encompassed as I am by frost and snow!";
const LETTER_3: &str = "Letter 3\nMy dear Sister,\nI write a few lines in haste to say that I am safe.\n*** END OF THE PROJECT GUTENBERG EBOOK FRANKENSTEIN ***";

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e))
}

/// Sorted names of the files in a directory.
fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

fn tei_metadata() -> TeiMetadata {
    TeiMetadata {
        title: "Frankenstein".to_string(),
        author: "Mary Wollstonecraft Shelley".to_string(),
        publisher: "Lackington, Hughes, Harding, Mavor and Jones".to_string(),
        location: "London".to_string(),
        year: "1818".to_string(),
    }
}

#[test]
fn test_sibling_split_keeps_every_letter() {
    let tmp = TempDir::new().unwrap();
    let job = JobConfig::new(fixture("letters.html"), "h3").with_output_dir(tmp.path());

    let report = split_file(&job).unwrap();

    assert_eq!(report.sections, 3);
    assert_eq!(report.output_dir, tmp.path().join("letters"));
    assert_eq!(
        file_names(&report.output_dir),
        vec!["chapter_1", "chapter_2", "chapter_3"]
    );
    assert_eq!(read(&report.output_dir.join("chapter_1")), LETTER_1);
    assert_eq!(read(&report.output_dir.join("chapter_2")), LETTER_2);
    assert_eq!(read(&report.output_dir.join("chapter_3")), LETTER_3);
}

#[test]
fn test_sibling_split_with_offset_renumbers() {
    let tmp = TempDir::new().unwrap();
    let job = JobConfig::new(fixture("letters.html"), "h3")
        .with_segmentation(SegmentationConfig::new().with_offset(2))
        .with_output_dir(tmp.path());

    let report = split_file(&job).unwrap();

    assert_eq!(report.sections, 2);
    assert_eq!(read(&report.output_dir.join("chapter_1")), LETTER_2);
    assert_eq!(read(&report.output_dir.join("chapter_2")), LETTER_3);
    assert!(!report.output_dir.join("chapter_3").exists());
}

#[test]
fn test_end_marker_stops_before_license() {
    let tmp = TempDir::new().unwrap();
    let job = JobConfig::new(fixture("letters.html"), "h2").with_output_dir(tmp.path());

    let report = split_file(&job).unwrap();

    // The single <h2> owns every following sibling up to the marker paragraph.
    assert_eq!(report.sections, 1);
    let text = read(&report.output_dir.join("chapter_1"));
    assert!(text.starts_with("Contents\n"));
    assert!(text.contains("Letter 2\n"));
    assert!(text.ends_with("*** END OF THE PROJECT GUTENBERG EBOOK FRANKENSTEIN ***"));
    assert!(!text.contains("Updated editions"));
}

#[test]
fn test_container_split_folds_excluded_figures() {
    let tmp = TempDir::new().unwrap();
    let job = JobConfig::new(fixture("chapters.html"), "div")
        .with_attr("chapter")
        .with_excluded_values(["figure"])
        .with_output_dir(tmp.path());

    let report = split_file(&job).unwrap();

    // The marker chapter is discarded.
    assert_eq!(report.sections, 2);
    let first = read(&report.output_dir.join("chapter_1"));
    assert!(first.contains("Chapter 1"));
    assert!(first.contains("[Illustration]"));
    let second = read(&report.output_dir.join("chapter_2"));
    assert!(second.contains("Mr. Bennet"));
    assert!(!second.contains("END OF THE PROJECT GUTENBERG EBOOK"));
}

#[test]
fn test_container_split_without_exclusion_cuts_at_figures() {
    let tmp = TempDir::new().unwrap();
    let job = JobConfig::new(fixture("chapters.html"), "div")
        .with_attr("chapter")
        .with_output_dir(tmp.path());

    let report = split_file(&job).unwrap();

    // The nested figure is its own chapter and cuts the first one short.
    assert_eq!(report.sections, 3);
    let first = read(&report.output_dir.join("chapter_1"));
    assert!(first.contains("It is a truth universally acknowledged."));
    assert!(!first.contains("[Illustration]"));
    assert_eq!(
        read(&report.output_dir.join("chapter_2")),
        "[Illustration]"
    );
    assert!(read(&report.output_dir.join("chapter_3")).contains("Mr. Bennet"));
}

#[test]
fn test_heading_split_as_container() {
    let tmp = TempDir::new().unwrap();
    let job = JobConfig::new(fixture("letters.html"), "h3")
        .with_kind(Some(StructuralKind::Container))
        .with_output_dir(tmp.path());

    let report = split_file(&job).unwrap();

    assert_eq!(report.sections, 3);
    assert_eq!(read(&report.output_dir.join("chapter_3")), "Letter 3");
}

#[test]
fn test_tei_output_layout() {
    let tmp = TempDir::new().unwrap();
    let job = JobConfig::new(fixture("letters.html"), "h3")
        .with_segmentation(SegmentationConfig::new().with_div_type("poem"))
        .with_render(RenderConfig::new(OutputFormat::Tei).with_tei(tei_metadata()))
        .with_output_dir(tmp.path());

    let report = split_file(&job).unwrap();

    let dir = tmp.path().join("1818-letters");
    assert_eq!(report.output_dir, dir);
    assert_eq!(
        file_names(&dir),
        vec!["tei_poem_1", "tei_poem_2", "tei_poem_3"]
    );

    let tei = read(&dir.join("tei_poem_1"));
    assert!(tei.contains("<title>Frankenstein</title><author>Mary Wollstonecraft Shelley</author>"));
    assert!(tei.contains("<pubPlace>London</pubPlace><date>1818</date>"));
    assert!(tei.ends_with(&format!(
        "<div type=\"poem\" n=\"1\">\n{LETTER_1}\n</div></body></text></TEI>"
    )));
}

#[test]
fn test_tei_round_trip() {
    let tmp = TempDir::new().unwrap();
    let job = JobConfig::new(fixture("letters.html"), "h3")
        .with_render(RenderConfig::new(OutputFormat::Tei).with_tei(tei_metadata()))
        .with_output_dir(tmp.path());

    let report = split_file(&job).unwrap();

    for (position, expected) in [(1, LETTER_1), (2, LETTER_2), (3, LETTER_3)] {
        let xml = read(&report.output_dir.join(format!("tei_chapter_{position}")));
        let doc = roxmltree::Document::parse(&xml).expect("TEI output is well-formed XML");

        let root = doc.root_element();
        assert_eq!(root.tag_name().name(), "TEI");
        assert_eq!(root.tag_name().namespace(), Some("http://www.tei-c.org/ns/1.0"));

        let div = doc
            .descendants()
            .find(|n| n.has_tag_name("div"))
            .expect("div element");
        assert_eq!(div.attribute("type"), Some("chapter"));
        assert_eq!(div.attribute("n"), Some(position.to_string().as_str()));
        assert_eq!(div.text(), Some(format!("\n{expected}\n").as_str()));
    }
}

#[test]
fn test_prefix_applies_to_filenames() {
    let tmp = TempDir::new().unwrap();
    let job = JobConfig::new(fixture("letters.html"), "h3")
        .with_render(RenderConfig::new(OutputFormat::Plain).with_prefix("walton_"))
        .with_output_dir(tmp.path());

    let report = split_file(&job).unwrap();

    assert_eq!(
        file_names(&report.output_dir),
        vec!["walton_chapter_1", "walton_chapter_2", "walton_chapter_3"]
    );
}

#[test]
fn test_no_candidates_completes_with_zero_sections() {
    let tmp = TempDir::new().unwrap();
    let job = JobConfig::new(fixture("letters.html"), "h5").with_output_dir(tmp.path());

    let report = split_file(&job).unwrap();

    assert_eq!(report.sections, 0);
    assert!(file_names(&report.output_dir).is_empty());
}

#[test]
fn test_rerun_overwrites_identically() {
    let tmp = TempDir::new().unwrap();
    let job = JobConfig::new(fixture("letters.html"), "h3").with_output_dir(tmp.path());

    let first = split_file(&job).unwrap();
    let before = read(&first.output_dir.join("chapter_2"));
    let second = split_file(&job).unwrap();

    assert_eq!(first, second);
    assert_eq!(read(&second.output_dir.join("chapter_2")), before);
}

#[test]
fn test_corpus_run_continues_past_missing_file() {
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("out");
    let yaml = format!(
        r#"
corpus_name: test
output_format: tei
output_dir: {out}
texts:
  - file: {missing}
    elem: h3
  - file: {letters}
    elem: h3
    year: 1818
    offset: 3
  - file: {chapters}
    elem: div
    attr: chapter
    excluded_attrs: [figure]
    output_format: plain
"#,
        out = out.display(),
        missing = tmp.path().join("missing.html").display(),
        letters = fixture("letters.html").display(),
        chapters = fixture("chapters.html").display(),
    );
    let config = tmp.path().join("corpus.yaml");
    fs::write(&config, yaml).unwrap();

    let corpus = Corpus::load(&config, tmp.path()).unwrap();
    let results = split_all(&corpus.jobs, |_, _| {});

    assert_eq!(results.len(), 3);
    assert!(matches!(
        results[0].outcome,
        Err(SplitterError::SourceNotFound(_))
    ));
    assert_eq!(results.iter().filter(|r| r.is_success()).count(), 2);

    let letters = results[1].outcome.as_ref().unwrap();
    assert_eq!(letters.sections, 1);
    assert_eq!(letters.format, OutputFormat::Tei);
    assert!(out.join("1818-letters/tei_chapter_1").is_file());

    let chapters = results[2].outcome.as_ref().unwrap();
    assert_eq!(chapters.sections, 2);
    assert!(out.join("chapters/chapter_2").is_file());
}
