//! Error types for glyphmark.

use std::io;
use thiserror::Error;

/// Result type alias for glyphmark operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while building or annotating a document.
#[derive(Error, Debug)]
pub enum Error {
    /// The glyph event source failed or produced a malformed stream.
    #[error("Document unreadable: {0}")]
    DocumentUnreadable(String),

    /// A right-to-left article was encountered.
    #[error("Unsupported layout on page {page}: right-to-left articles are not supported")]
    LayoutUnsupported {
        /// Page the article started on
        page: u32,
    },

    /// A finding references a page the document does not have.
    #[error("Annotation target page {page} is invalid (document has {page_count} pages)")]
    AnnotationTargetInvalid {
        /// Requested 1-based page number
        page: u32,
        /// Number of pages in the document
        page_count: u32,
    },

    /// An external style or hint table could not be loaded.
    #[error("Configuration degraded: {0}")]
    ConfigurationDegraded(String),

    /// Span indices fall outside the glyph buffer or the parent span.
    #[error("Span {start}..={end} is out of range (limit {len})")]
    SpanOutOfRange {
        /// Requested start index
        start: usize,
        /// Requested end index (inclusive)
        end: usize,
        /// Length of the range it had to fit in
        len: usize,
    },

    /// Span runs belong to more than one page.
    #[error("Span {start}..={end} crosses a page boundary")]
    SpanCrossesPages {
        /// Requested start index
        start: usize,
        /// Requested end index (inclusive)
        end: usize,
    },

    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Whether this error aborts a document build.
    ///
    /// Annotation and configuration errors are per-item and leave the
    /// surrounding batch running.
    pub fn is_fatal_to_build(&self) -> bool {
        matches!(
            self,
            Error::DocumentUnreadable(_) | Error::LayoutUnsupported { .. } | Error::Io(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::LayoutUnsupported { page: 3 };
        assert_eq!(
            err.to_string(),
            "Unsupported layout on page 3: right-to-left articles are not supported"
        );

        let err = Error::AnnotationTargetInvalid {
            page: 10,
            page_count: 5,
        };
        assert_eq!(
            err.to_string(),
            "Annotation target page 10 is invalid (document has 5 pages)"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::UnexpectedEof, "stream closed");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.is_fatal_to_build());
    }

    #[test]
    fn test_annotation_errors_are_not_fatal() {
        let err = Error::AnnotationTargetInvalid {
            page: 2,
            page_count: 1,
        };
        assert!(!err.is_fatal_to_build());
        assert!(!Error::ConfigurationDegraded("missing".into()).is_fatal_to_build());
    }
}
