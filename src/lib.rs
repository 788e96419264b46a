//! # glyphmark
//!
//! Rebuild document structure from positioned glyph streams and place
//! markup annotations for analysis findings.
//!
//! An external page-content walker emits glyph runs and boundary events in
//! reading order. glyphmark folds them into a
//! page → article → paragraph → line → word tree in a single pass, where
//! every word is a zero-copy [`Span`] over one shared glyph buffer.
//! Analyzers read the tree and return findings; the annotation mapper turns
//! located findings into colored highlight, underline and strike-out
//! annotations on the right page.
//!
//! ## Quick Start
//!
//! ```
//! use glyphmark::{build_document, GlyphEvent, GlyphRun};
//!
//! fn main() -> glyphmark::Result<()> {
//!     let word = |text: &str, x: f32| GlyphEvent::Glyph(GlyphRun::new(text, x, 700.0, 20.0, 12.0, 842.0));
//!
//!     let doc = build_document(vec![
//!         GlyphEvent::PageStart,
//!         word("The", 72.0),
//!         GlyphEvent::WordSeparator,
//!         word("cat", 96.0),
//!         GlyphEvent::LineBreak,
//!         GlyphEvent::PageEnd,
//!         GlyphEvent::EndOfDocument,
//!     ])?;
//!
//!     assert_eq!(doc.plain_text(), "The cat");
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Single-pass building**: events are consumed once, in order
//! - **Zero-copy spans**: words, lines and findings share one glyph buffer
//! - **Geometry**: top-left page coordinates and padded heights for markup
//! - **Annotation mapping**: category-driven colors with JSON style overrides
//! - **Analyzer registry**: named analyzers selected at run time

pub mod analysis;
pub mod error;
pub mod markup;
pub mod model;
pub mod parser;
pub mod session;

// Re-export commonly used types
pub use analysis::{AnalyzerRegistry, DocumentVisitor, TextAnalyzer, VisitorAction};
pub use error::{Error, Result};
pub use markup::{AnnotationMapper, JsonFormat, MapperOptions, MappingReport, Style, StyleTable};
pub use model::{
    Annotation, Article, Color, Document, Finding, GlyphBuffer, GlyphRun, Line, MarkupKind, Page,
    Paragraph, Rect, Span, StructureStats, TextCategory, TextFinding,
};
pub use parser::{BuildOptions, ErrorMode, GlyphEvent, JsonLinesSource, StructureBuilder, StructureReader};
pub use session::{AnalysisOutcome, Session};

use std::path::Path;

/// Build a document from in-memory events with default options.
///
/// # Example
///
/// ```
/// use glyphmark::{build_document, GlyphEvent};
///
/// let doc = build_document(vec![GlyphEvent::PageStart, GlyphEvent::PageEnd]).unwrap();
/// assert_eq!(doc.page_count(), 1);
/// ```
pub fn build_document<I>(events: I) -> Result<Document>
where
    I: IntoIterator<Item = GlyphEvent>,
{
    StructureReader::default().read_events(events)
}

/// Build a document from in-memory events with custom options.
pub fn build_document_with_options<I>(events: I, options: BuildOptions) -> Result<Document>
where
    I: IntoIterator<Item = GlyphEvent>,
{
    StructureReader::new(options).read_events(events)
}

/// Build a document from a JSON Lines event file.
///
/// # Example
///
/// ```no_run
/// use glyphmark::read_file;
///
/// let doc = read_file("thesis.events.jsonl").unwrap();
/// println!("Pages: {}", doc.page_count());
/// ```
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    StructureReader::default().read_file(path)
}

/// Build a document from a JSON Lines event file with custom options.
pub fn read_file_with_options<P: AsRef<Path>>(path: P, options: BuildOptions) -> Result<Document> {
    StructureReader::new(options).read_file(path)
}

/// Extract plain text from a JSON Lines event file.
pub fn extract_text<P: AsRef<Path>>(path: P) -> Result<String> {
    Ok(read_file(path)?.plain_text())
}
