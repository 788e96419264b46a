//! glyphmark CLI - glyph stream structure and annotation tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use serde::Deserialize;

use glyphmark::markup::to_json;
use glyphmark::{
    AnnotationMapper, BuildOptions, Document, Finding, JsonFormat, MapperOptions, Span,
    StructureReader, StyleTable, TextCategory, TextFinding,
};

#[derive(Parser)]
#[command(name = "glyphmark")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Rebuild text structure from glyph events and export markup annotations", long_about = None)]
struct Cli {
    /// Number given to the first page
    #[arg(long, global = true, default_value = "1", env = "GLYPHMARK_START_PAGE")]
    start_page: u32,

    /// Recover from misplaced page events instead of failing
    #[arg(long, global = true)]
    lenient: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the document tree and statistics
    Inspect {
        /// Glyph event file (JSON Lines)
        #[arg(value_name = "EVENTS")]
        input: PathBuf,

        /// Print every line with its text
        #[arg(short, long)]
        verbose: bool,
    },

    /// Print the reconstructed plain text
    Text {
        /// Glyph event file (JSON Lines)
        #[arg(value_name = "EVENTS")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Map findings to annotations and print them as JSON
    Annotate {
        /// Glyph event file (JSON Lines)
        #[arg(value_name = "EVENTS")]
        input: PathBuf,

        /// Findings file (JSON array)
        #[arg(value_name = "FINDINGS")]
        findings: PathBuf,

        /// Style override table (JSON)
        #[arg(long, value_name = "FILE")]
        styles: Option<PathBuf>,

        /// Annotation opacity (0.0 - 1.0)
        #[arg(long, default_value = "1.0")]
        opacity: f32,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show version information
    Version,
}

/// One entry of a findings file.
///
/// `start` and `end` are inclusive glyph-run indices. Entries without them
/// are findings the analyzer could not locate.
#[derive(Debug, Deserialize)]
struct FindingEntry {
    #[serde(default)]
    category: Option<TextCategory>,
    #[serde(default)]
    start: Option<usize>,
    #[serde(default)]
    end: Option<usize>,
}

impl FindingEntry {
    fn resolve(&self, doc: &Document) -> glyphmark::Result<Finding> {
        let finding = match (self.start, self.end) {
            (Some(start), end) => {
                let span = Span::new(doc.buffer().clone(), start, end.unwrap_or(start))?;
                TextFinding::new(self.category, span)
            }
            (None, _) => TextFinding::not_found(self.category),
        };
        Ok(finding.into())
    }
}

/// Resolve every entry against the document.
///
/// Entries that do not resolve are reported by index and left out, so the
/// rest of the batch is still mapped.
fn resolve_findings(entries: &[FindingEntry], doc: &Document) -> (Vec<Finding>, Vec<String>) {
    let mut findings = Vec::with_capacity(entries.len());
    let mut unresolved = Vec::new();
    for (i, entry) in entries.iter().enumerate() {
        match entry.resolve(doc) {
            Ok(finding) => findings.push(finding),
            Err(e) => unresolved.push(format!("finding {}: {}", i, e)),
        }
    }
    (findings, unresolved)
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let mut options = BuildOptions::new().with_start_page(cli.start_page);
    if cli.lenient {
        options = options.lenient();
    }
    let reader = StructureReader::new(options);

    let result = match cli.command {
        Commands::Inspect { input, verbose } => cmd_inspect(&reader, &input, verbose),
        Commands::Text { input, output } => cmd_text(&reader, &input, output.as_deref()),
        Commands::Annotate {
            input,
            findings,
            styles,
            opacity,
            output,
            compact,
        } => cmd_annotate(
            &reader,
            &input,
            &findings,
            styles.as_deref(),
            opacity,
            output.as_deref(),
            compact,
        ),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_inspect(
    reader: &StructureReader,
    input: &Path,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = reader.read_file(input)?;
    let stats = doc.stats();

    println!("{}", "Document Structure".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Glyph runs".bold(), doc.buffer().len());

    for page in doc.pages() {
        println!(
            "{} {} ({} articles)",
            "Page".bold(),
            page.number(),
            page.articles().len()
        );
        for (a, article) in page.articles().iter().enumerate() {
            for (p, paragraph) in article.paragraphs().iter().enumerate() {
                println!(
                    "  {} {}.{}: {} lines, {} words",
                    "Paragraph".dimmed(),
                    a + 1,
                    p + 1,
                    paragraph.lines().len(),
                    paragraph.word_count()
                );
                if verbose {
                    for line in paragraph.lines() {
                        println!("    {}", line.text());
                    }
                }
            }
        }
    }

    println!();
    println!("{}", "Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Pages".bold(), stats.page_count);
    println!("{}: {}", "Articles".bold(), stats.article_count);
    println!("{}: {}", "Paragraphs".bold(), stats.paragraph_count);
    println!("{}: {}", "Lines".bold(), stats.line_count);
    println!("{}: {}", "Words".bold(), stats.word_count);
    println!("{}: {}", "Glyphs".bold(), stats.glyph_count);
    println!("{}: {:.1}", "Words per page".bold(), stats.words_per_page());

    Ok(())
}

fn cmd_text(
    reader: &StructureReader,
    input: &Path,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = reader.read_file(input)?;
    let text = doc.plain_text();

    if let Some(path) = output {
        fs::write(path, &text)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", text);
    }

    Ok(())
}

fn cmd_annotate(
    reader: &StructureReader,
    input: &Path,
    findings_path: &Path,
    styles: Option<&Path>,
    opacity: f32,
    output: Option<&Path>,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut doc = reader.read_file(input)?;

    let entries: Vec<FindingEntry> = serde_json::from_str(&fs::read_to_string(findings_path)?)?;
    let (findings, unresolved) = resolve_findings(&entries, &doc);
    log::debug!("Resolved {} of {} findings", findings.len(), entries.len());
    for message in &unresolved {
        eprintln!("{}: {}", "Skipped".yellow(), message);
    }

    let style_table = styles
        .map(StyleTable::load_or_default)
        .unwrap_or_default();
    let mapper = AnnotationMapper::new(
        MapperOptions::new()
            .with_opacity(opacity)
            .with_style_table(style_table),
    );
    let report = mapper.map_all(&mut doc, &findings);

    for rejected in &report.rejected {
        eprintln!("{}: {}", "Skipped".yellow(), rejected);
    }
    eprintln!(
        "{} {} annotations ({} unlocated, {} rejected)",
        "Mapped".green(),
        report.applied,
        report.unlocated,
        report.rejected.len() + unresolved.len()
    );

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    let json = to_json(&doc, format)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "glyphmark".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Glyph stream structure and annotation tool");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/glyphmark".dimmed());
    println!("License: MIT");
}
