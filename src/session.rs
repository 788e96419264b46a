//! The load → analyze → annotate cycle for one document at a time.

use std::io;
use std::path::Path;

use crate::analysis::AnalyzerRegistry;
use crate::error::{Error, Result};
use crate::markup::{AnnotationMapper, MappingReport};
use crate::model::{Document, Finding};
use crate::parser::{BuildOptions, GlyphEvent, StructureReader};

/// Findings of one analysis run and how they were placed.
#[derive(Debug)]
pub struct AnalysisOutcome {
    /// Every finding the selected analyzers produced
    pub findings: Vec<Finding>,
    /// Placement of the text findings
    pub report: MappingReport,
}

/// Holds the current document together with its analyzers and mapper.
///
/// At most one document is open. Opening a new one replaces the previous
/// document only after the new build succeeded.
pub struct Session {
    reader: StructureReader,
    registry: AnalyzerRegistry,
    mapper: AnnotationMapper,
    document: Option<Document>,
}

impl Session {
    /// Create a session with no open document.
    pub fn new(registry: AnalyzerRegistry, mapper: AnnotationMapper) -> Self {
        Self {
            reader: StructureReader::default(),
            registry,
            mapper,
            document: None,
        }
    }

    /// Set the build options used by later opens.
    pub fn with_build_options(mut self, options: BuildOptions) -> Self {
        self.reader = StructureReader::new(options);
        self
    }

    /// Change the number given to the first page of the next document.
    pub fn set_start_page(&mut self, page: u32) {
        self.reader.set_start_page(page);
    }

    /// The analyzer registry.
    pub fn registry(&self) -> &AnalyzerRegistry {
        &self.registry
    }

    /// Mutable access to the analyzer registry.
    pub fn registry_mut(&mut self) -> &mut AnalyzerRegistry {
        &mut self.registry
    }

    /// The open document, if any.
    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    /// Build a document from `source` and make it current.
    ///
    /// On failure the previously open document stays open and unchanged.
    pub fn open<I>(&mut self, source: I) -> Result<&Document>
    where
        I: IntoIterator<Item = io::Result<GlyphEvent>>,
    {
        let document = self.reader.read(source)?;
        Ok(self.replace(document))
    }

    /// Build a document from a JSON Lines event file and make it current.
    pub fn open_file<P: AsRef<Path>>(&mut self, path: P) -> Result<&Document> {
        let document = self.reader.read_file(path)?;
        Ok(self.replace(document))
    }

    /// Close the open document and hand it back.
    pub fn close(&mut self) -> Option<Document> {
        self.document.take()
    }

    /// Run the named analyzers, then replace all annotations with the
    /// annotations of their text findings.
    pub fn analyze<S: AsRef<str>>(&mut self, names: &[S]) -> Result<AnalysisOutcome> {
        let document = self.document.as_mut().ok_or_else(no_document)?;
        let findings = self.registry.run_selected(document, names)?;

        AnnotationMapper::clear_all(document);
        let report = self.mapper.map_all(document, &findings);
        Ok(AnalysisOutcome { findings, report })
    }

    /// Replace all annotations with those of externally produced findings.
    pub fn annotate(&mut self, findings: &[Finding]) -> Result<MappingReport> {
        let document = self.document.as_mut().ok_or_else(no_document)?;
        AnnotationMapper::clear_all(document);
        Ok(self.mapper.map_all(document, findings))
    }

    /// Remove every annotation from the open document.
    pub fn clear(&mut self) {
        if let Some(document) = self.document.as_mut() {
            AnnotationMapper::clear_all(document);
        }
    }

    fn replace(&mut self, document: Document) -> &Document {
        if let Some(previous) = &self.document {
            log::debug!(
                "Closing document with {} pages",
                previous.page_count()
            );
        }
        self.document.insert(document)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(AnalyzerRegistry::new(), AnnotationMapper::default())
    }
}

fn no_document() -> Error {
    Error::Other("No document open".into())
}
