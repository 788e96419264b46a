//! JSON export of the annotation layer.

use serde::Serialize;

use crate::error::Result;
use crate::model::{Annotation, Document};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

#[derive(Serialize)]
struct AnnotationLayer<'a> {
    page_count: u32,
    annotation_count: usize,
    pages: Vec<PageAnnotations<'a>>,
}

#[derive(Serialize)]
struct PageAnnotations<'a> {
    number: u32,
    annotations: &'a [Annotation],
}

/// Export every page's annotations as JSON.
///
/// Pages without annotations are left out.
pub fn to_json(doc: &Document, format: JsonFormat) -> Result<String> {
    let layer = AnnotationLayer {
        page_count: doc.page_count(),
        annotation_count: doc.annotation_count(),
        pages: doc
            .pages()
            .iter()
            .filter(|page| !page.annotations().is_empty())
            .map(|page| PageAnnotations {
                number: page.number(),
                annotations: page.annotations(),
            })
            .collect(),
    };

    let json = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(&layer)?,
        JsonFormat::Compact => serde_json::to_string(&layer)?,
    };
    Ok(json)
}
