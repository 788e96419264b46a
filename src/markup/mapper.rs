//! Turning located findings into page annotations.

use crate::error::{Error, Result};
use crate::model::{Annotation, Document, Finding, TextFinding};

use super::style::StyleTable;

/// Options for the annotation mapper.
#[derive(Debug, Clone)]
pub struct MapperOptions {
    /// Constant opacity of every annotation
    pub opacity: f32,

    /// Category styles
    pub style_table: StyleTable,
}

impl MapperOptions {
    /// Create mapper options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the annotation opacity (clamped to `0.0..=1.0`).
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    /// Set the style table.
    pub fn with_style_table(mut self, table: StyleTable) -> Self {
        self.style_table = table;
        self
    }
}

impl Default for MapperOptions {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            style_table: StyleTable::default(),
        }
    }
}

/// Outcome of one [`AnnotationMapper::map_all`] batch.
#[derive(Debug, Default)]
pub struct MappingReport {
    /// Annotations added
    pub applied: usize,
    /// Text findings skipped because they carry no location
    pub unlocated: usize,
    /// Text findings that could not be placed
    pub rejected: Vec<Error>,
}

impl MappingReport {
    /// Check if every located finding was placed.
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }

    /// Number of text findings seen.
    pub fn total(&self) -> usize {
        self.applied + self.unlocated + self.rejected.len()
    }
}

/// Places markup annotations on document pages.
#[derive(Debug, Clone, Default)]
pub struct AnnotationMapper {
    options: MapperOptions,
}

impl AnnotationMapper {
    /// Create a mapper.
    pub fn new(options: MapperOptions) -> Self {
        Self { options }
    }

    /// Current options.
    pub fn options(&self) -> &MapperOptions {
        &self.options
    }

    /// Annotate every located text finding.
    ///
    /// Statistic and commentary findings are ignored. A finding that
    /// targets a missing page is recorded in the report and the rest of
    /// the batch still runs.
    pub fn map_all(&self, doc: &mut Document, findings: &[Finding]) -> MappingReport {
        let mut report = MappingReport::default();

        for finding in findings.iter().filter_map(Finding::as_text) {
            match self.map_one(doc, finding) {
                Ok(true) => report.applied += 1,
                Ok(false) => report.unlocated += 1,
                Err(e) => {
                    log::warn!("Skipping finding: {}", e);
                    report.rejected.push(e);
                }
            }
        }

        log::debug!(
            "Mapped findings: {} applied, {} unlocated, {} rejected",
            report.applied,
            report.unlocated,
            report.rejected.len()
        );
        report
    }

    /// Annotate one finding. Returns `Ok(false)` when it has no location.
    pub fn map_one(&self, doc: &mut Document, finding: &TextFinding) -> Result<bool> {
        let Some((page_number, span)) = finding.location() else {
            return Ok(false);
        };

        let page_count = doc.page_count();
        let page = doc
            .page_mut(page_number)
            .ok_or(Error::AnnotationTargetInvalid {
                page: page_number,
                page_count,
            })?;

        let style = self.options.style_table.style_for(finding.category);
        let annotation = Annotation::new(span.bounding_rect(), style.color, style.kind)
            .with_opacity(self.options.opacity)
            .with_category(finding.category);
        page.push_annotation(annotation);
        Ok(true)
    }

    /// Remove every annotation from every page.
    pub fn clear_all(doc: &mut Document) {
        for page in doc.pages_mut() {
            page.clear_annotations();
        }
    }
}
