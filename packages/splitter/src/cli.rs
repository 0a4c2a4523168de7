//! Command-line interface for the splitter.

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use console::{pad_str, style, Alignment};
use indicatif::{ProgressBar, ProgressStyle};
use textwrap::{fill, Options};

use crate::catalog::{ensure_catalog, Catalog, CatalogEntry, SearchQuery};
use crate::config::{
    validate_element, validate_gutenberg_id, CATALOG_MAX_AGE_DAYS, DEFAULT_CATALOG_PATH,
    DEFAULT_DIV_TYPE, DEFAULT_END_MARKER, DEFAULT_INPUT_DIR, DEFAULT_OUTPUT_DIR,
    GUTENBERG_CACHE_URL, GUTENBERG_CATALOG_URL, SEARCH_RESULT_LIMIT,
};
use crate::corpus::Corpus;
use crate::error::{Result, SplitterError};
use crate::html::parse_document;
use crate::http::{create_client, download_gutenberg};
use crate::inspect::{attribute_inventory, element_inventory, preview_candidates, PREVIEW_LIMIT};
use crate::job::JobConfig;
use crate::splitter::{read_source, split_all, split_file, FileReport, JobResult};
use crate::splitting::{create_html_kind_registry, BoundaryMatcher, SegmentationConfig, StructuralKind};
use crate::types::{OutputFormat, RenderConfig, TeiMetadata};

/// Width preview text is wrapped at.
const PREVIEW_WRAP_WIDTH: usize = 76;

/// Number of tags listed by `inspect`.
const INSPECT_TOP_TAGS: usize = 20;

/// Gutenberg Splitter - Split Project Gutenberg HTML texts into chapter files.
#[derive(Parser)]
#[command(name = "gutenberg-splitter")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Split one HTML file at a boundary element.
    Split(SplitArgs),

    /// Split every text described in a corpus YAML file.
    Corpus {
        /// Corpus YAML file
        config: PathBuf,

        /// Directory sources given by Gutenberg ID are read from and downloaded to
        #[arg(short, long, default_value = DEFAULT_INPUT_DIR)]
        input_dir: PathBuf,
    },

    /// Download the HTML edition of a Project Gutenberg book.
    Download {
        /// Project Gutenberg book ID (e.g., 84)
        gutenberg_id: String,

        /// Save as this name instead of pg{ID}.html
        #[arg(short, long)]
        name: Option<String>,

        /// Directory to save the book in
        #[arg(short, long, default_value = DEFAULT_INPUT_DIR)]
        input_dir: PathBuf,
    },

    /// Search the Project Gutenberg catalog by author, title or subject.
    Search {
        /// Author name or part of it
        #[arg(short, long)]
        author: Option<String>,

        /// Title or part of it
        #[arg(short, long)]
        title: Option<String>,

        /// Subject or part of it
        #[arg(short, long)]
        subject: Option<String>,

        /// Project Gutenberg book ID
        #[arg(long)]
        id: Option<String>,

        /// Catalog CSV file; downloaded when missing or over a week old
        #[arg(long, default_value = DEFAULT_CATALOG_PATH)]
        catalog: PathBuf,
    },

    /// List the elements of an HTML file, and the classes and ids of one tag.
    Inspect {
        /// HTML file
        file: PathBuf,

        /// Tag to list classes and ids for
        #[arg(short, long)]
        elem: Option<String>,
    },

    /// Show the first boundary candidates for an element.
    Preview {
        /// HTML file
        file: PathBuf,

        /// Boundary element tag (e.g., h3, div)
        #[arg(short, long)]
        elem: String,

        /// Attribute value boundaries must carry
        #[arg(short, long, default_value = "")]
        attr: String,

        /// Structural kind override: container or sibling
        #[arg(short, long)]
        kind: Option<String>,

        /// Maximum number of candidates to show
        #[arg(short, long, default_value_t = PREVIEW_LIMIT)]
        limit: usize,
    },
}

/// Options of the `split` command.
#[derive(Args)]
pub struct SplitArgs {
    /// HTML file to split
    pub file: PathBuf,

    /// Boundary element tag (e.g., h3, div)
    #[arg(short, long)]
    pub elem: String,

    /// Attribute value boundaries must carry (e.g., chapter)
    #[arg(short, long, default_value = "")]
    pub attr: String,

    /// Structural kind override: container or sibling
    #[arg(short, long)]
    pub kind: Option<String>,

    /// Position of the first candidate to keep (1 keeps all)
    #[arg(long, default_value_t = 1)]
    pub offset: u32,

    /// Attribute value that disqualifies a same-tag element as a boundary (repeatable)
    #[arg(short = 'x', long = "exclude")]
    pub exclude: Vec<String>,

    /// Text marking the end of the book proper (empty disables)
    #[arg(long, default_value = DEFAULT_END_MARKER)]
    pub end_marker: String,

    /// Division type used in TEI and filenames
    #[arg(long, default_value = DEFAULT_DIV_TYPE)]
    pub div_type: String,

    /// Output format: plain or tei
    #[arg(short, long, default_value = "plain")]
    pub format: String,

    /// Prefix for every output filename
    #[arg(long, default_value = "")]
    pub prefix: String,

    /// Base output directory
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output: PathBuf,

    /// Publication year (also prefixes the output directory)
    #[arg(long, default_value = "")]
    pub year: String,

    /// TEI title
    #[arg(long, default_value = "")]
    pub title: String,

    /// TEI author
    #[arg(long, default_value = "")]
    pub author: String,

    /// TEI publisher
    #[arg(long, default_value = "")]
    pub publisher: String,

    /// TEI place of publication
    #[arg(long, default_value = "")]
    pub location: String,
}

impl SplitArgs {
    /// Build the job described by these options.
    pub fn to_job(&self) -> Result<JobConfig> {
        let format: OutputFormat = self.format.parse()?;
        let kind = parse_kind(self.kind.as_deref())?;

        let job = JobConfig::new(&self.file, self.elem.as_str())
            .with_attr(self.attr.as_str())
            .with_kind(kind)
            .with_excluded_values(self.exclude.iter().cloned())
            .with_segmentation(
                SegmentationConfig::new()
                    .with_offset(self.offset)
                    .with_end_marker(self.end_marker.as_str())
                    .with_div_type(self.div_type.as_str()),
            )
            .with_render(
                RenderConfig::new(format)
                    .with_prefix(self.prefix.as_str())
                    .with_tei(TeiMetadata {
                        title: self.title.clone(),
                        author: self.author.clone(),
                        publisher: self.publisher.clone(),
                        location: self.location.clone(),
                        year: self.year.trim().to_string(),
                    }),
            )
            .with_output_dir(&self.output);

        job.validate()?;
        Ok(job)
    }
}

fn parse_kind(kind: Option<&str>) -> Result<Option<StructuralKind>> {
    kind.map(str::parse).transpose()
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Split(args) => split_command(&args),
        Commands::Corpus { config, input_dir } => corpus_command(&config, &input_dir),
        Commands::Download {
            gutenberg_id,
            name,
            input_dir,
        } => download_command(&gutenberg_id, name.as_deref(), &input_dir),
        Commands::Search {
            author,
            title,
            subject,
            id,
            catalog,
        } => {
            let book_id = id.as_deref().map(validate_gutenberg_id).transpose()?;
            let query = SearchQuery::new()
                .with_author(author.unwrap_or_default())
                .with_title(title.unwrap_or_default())
                .with_subject(subject.unwrap_or_default())
                .with_book_id(book_id);
            search_command(&query, &catalog)
        }
        Commands::Inspect { file, elem } => inspect_command(&file, elem.as_deref()),
        Commands::Preview {
            file,
            elem,
            attr,
            kind,
            limit,
        } => preview_command(&file, &elem, &attr, kind.as_deref(), limit),
    }
}

fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Execute the split command.
fn split_command(args: &SplitArgs) -> Result<()> {
    // Validate before touching the file system
    let job = args.to_job()?;

    println!(
        "{} {} at <{}>",
        style("Splitting").bold(),
        style(job.source().display()).cyan(),
        style(&job.element).green()
    );
    println!();

    let pb = spinner("Splitting...");
    let result = split_file(&job);
    pb.finish_and_clear();

    print_report(&result?);
    Ok(())
}

fn print_report(report: &FileReport) {
    println!("  Format: {}", report.format.label());
    println!("  Division type: {}", report.div_type);
    if report.sections == 0 {
        println!(
            "  Sections: {} (no boundary elements matched)",
            style(0).yellow().bold()
        );
    } else {
        println!("  Sections: {}", style(report.sections).green());
    }
    println!();
    println!(
        "{} {}",
        style("Saved to:").green().bold(),
        report.output_dir.display()
    );
}

/// Execute the corpus command.
fn corpus_command(config: &Path, input_dir: &Path) -> Result<()> {
    let corpus = Corpus::load(config, input_dir)?;

    println!(
        "{} corpus {} ({} texts)",
        style("Processing").bold(),
        style(&corpus.name).cyan(),
        corpus.jobs.len()
    );
    println!();

    download_missing(&corpus)?;

    let pb = ProgressBar::new(corpus.jobs.len() as u64);
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{bar:40.green} {pos}/{len} {msg}")
            .expect("valid template"),
    );
    let results = split_all(&corpus.jobs, |job, _| {
        pb.set_message(job.source().display().to_string());
        pb.inc(1);
    });
    pb.finish_and_clear();

    print_results(&results);
    Ok(())
}

/// Download sources that are missing but have a Gutenberg ID.
///
/// A failed download is reported and the text is left to fail when split.
fn download_missing(corpus: &Corpus) -> Result<()> {
    if corpus.missing_downloads().next().is_none() {
        return Ok(());
    }

    let client = create_client()?;
    let pb = spinner("Downloading missing sources...");
    corpus.download_missing(&client, GUTENBERG_CACHE_URL, |book_id, result| match result {
        Ok(path) => pb.println(format!(
            "  {} PG #{book_id} to {}",
            style("Downloaded").green(),
            path.display()
        )),
        Err(e) => pb.println(format!("  {} {e}", style("Download failed:").red())),
    });
    pb.finish_and_clear();
    println!();
    Ok(())
}

fn print_results(results: &[JobResult]) {
    println!("{}", style("Results").bold().underlined());
    for result in results {
        match &result.outcome {
            Ok(report) => println!(
                "  {} {}  {} sections  {}",
                style("✓").green(),
                result.source.display(),
                report.sections,
                style(report.output_dir.display()).dim()
            ),
            Err(e) => println!(
                "  {} {}  {}",
                style("✗").red(),
                result.source.display(),
                style(e).red()
            ),
        }
    }

    let succeeded = results.iter().filter(|r| r.is_success()).count();
    println!();
    let summary = format!(
        "{succeeded}/{} texts processed successfully",
        results.len()
    );
    if succeeded == results.len() {
        println!("{}", style(summary).green().bold());
    } else {
        println!("{}", style(summary).yellow().bold());
    }
}

/// Execute the download command.
fn download_command(gutenberg_id: &str, name: Option<&str>, input_dir: &Path) -> Result<()> {
    let book_id = validate_gutenberg_id(gutenberg_id)?;

    println!(
        "{} PG #{}",
        style("Downloading").bold(),
        style(book_id).cyan()
    );

    let client = create_client()?;
    let pb = spinner("Downloading...");
    let result = download_gutenberg(&client, book_id, name, input_dir);
    pb.finish_and_clear();

    let path = result?;
    println!("{} {}", style("Saved to:").green().bold(), path.display());
    Ok(())
}

/// Execute the search command.
fn search_command(query: &SearchQuery, catalog_path: &Path) -> Result<()> {
    if query.is_empty() {
        return Err(SplitterError::InvalidConfig(
            "search needs at least one of --author, --title, --subject or --id".to_string(),
        ));
    }

    let client = create_client()?;
    let pb = spinner("Checking catalog...");
    let max_age = Duration::from_secs(CATALOG_MAX_AGE_DAYS * 24 * 60 * 60);
    let downloaded = ensure_catalog(&client, GUTENBERG_CATALOG_URL, catalog_path, max_age);
    pb.finish_and_clear();
    if downloaded? {
        println!(
            "{} {}",
            style("Catalog updated:").green(),
            catalog_path.display()
        );
    }

    let catalog = Catalog::load(catalog_path)?;
    print_search_results(&catalog.search(query));
    Ok(())
}

fn print_search_results(results: &[&CatalogEntry]) {
    if results.is_empty() {
        println!("{}", style("No results found.").yellow());
        return;
    }

    println!(
        "{}",
        style(format!("Search Results ({} found)", results.len()))
            .bold()
            .underlined()
    );
    for entry in results.iter().take(SEARCH_RESULT_LIMIT) {
        println!(
            "  {}  {}  {}  {}",
            style(pad_str(&entry.id.to_string(), 6, Alignment::Right, None)).cyan(),
            style(pad_str(&entry.authors, 30, Alignment::Left, Some("…"))).magenta(),
            style(pad_str(&entry.title, 50, Alignment::Left, Some("…"))).green(),
            style(&entry.language).blue()
        );
    }

    if results.len() > SEARCH_RESULT_LIMIT {
        println!(
            "{}",
            style(format!(
                "({} more results not shown. Narrow your search.)",
                results.len() - SEARCH_RESULT_LIMIT
            ))
            .dim()
        );
    }
}

/// Execute the inspect command.
fn inspect_command(file: &Path, elem: Option<&str>) -> Result<()> {
    let document = parse_document(&read_source(file)?);

    println!("{}", style("Elements").bold().underlined());
    for count in element_inventory(&document).iter().take(INSPECT_TOP_TAGS) {
        println!("  {:>6}  {}", count.count, style(&count.value).cyan());
    }

    if let Some(tag) = elem {
        let inventory = attribute_inventory(&document, tag);
        for (label, counts) in [("Classes", &inventory.classes), ("Ids", &inventory.ids)] {
            println!();
            println!("{} of <{tag}>", style(label).bold().underlined());
            if counts.is_empty() {
                println!("  {}", style("(none)").dim());
            }
            for count in counts {
                println!("  {:>6}  {}", count.count, style(&count.value).cyan());
            }
        }
    }
    Ok(())
}

/// Execute the preview command.
fn preview_command(
    file: &Path,
    elem: &str,
    attr: &str,
    kind: Option<&str>,
    limit: usize,
) -> Result<()> {
    validate_element(elem)?;
    let kind = parse_kind(kind)?;
    let document = parse_document(&read_source(file)?);

    let matcher = BoundaryMatcher::new(elem, &create_html_kind_registry()).with_attr_filter(attr);
    let matcher = match kind {
        Some(kind) => matcher.with_kind(kind),
        None => matcher,
    };

    let samples = preview_candidates(&document, &matcher, limit);
    if samples.is_empty() {
        println!("{}", style("No boundary candidates found").yellow().bold());
        return Ok(());
    }

    let options = Options::new(PREVIEW_WRAP_WIDTH)
        .initial_indent("      ")
        .subsequent_indent("      ");
    for sample in samples {
        println!("{}", style(format!("[{}]", sample.index)).cyan().bold());
        println!("{}", fill(&sample.text, &options));
    }
    Ok(())
}
