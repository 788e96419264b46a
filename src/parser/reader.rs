//! Drives a [`StructureBuilder`] from an event source.

use std::io;
use std::path::Path;

use crate::error::{Error, Result};
use crate::model::Document;

use super::builder::StructureBuilder;
use super::event::{GlyphEvent, JsonLinesSource};
use super::options::BuildOptions;

/// Builds documents from glyph event sources.
///
/// Every read starts a fresh builder, so page numbering restarts at the
/// configured start page and nothing leaks between documents.
#[derive(Debug, Clone, Default)]
pub struct StructureReader {
    options: BuildOptions,
}

impl StructureReader {
    /// Create a reader with the given options.
    pub fn new(options: BuildOptions) -> Self {
        Self { options }
    }

    /// Current build options.
    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Change the number given to the first page of the next read.
    pub fn set_start_page(&mut self, page: u32) {
        self.options.start_page = page.max(1);
    }

    /// Build a document from a fallible event source.
    ///
    /// A source error aborts the build with [`Error::DocumentUnreadable`];
    /// no partial document is returned. Events after
    /// [`GlyphEvent::EndOfDocument`] are not consumed.
    pub fn read<I>(&self, source: I) -> Result<Document>
    where
        I: IntoIterator<Item = io::Result<GlyphEvent>>,
    {
        let mut builder = StructureBuilder::new(self.options.clone());

        for event in source {
            let event = event.map_err(|e| {
                Error::DocumentUnreadable(format!(
                    "event source failed after {} glyph runs: {}",
                    builder.run_count(),
                    e
                ))
            })?;
            if !builder.apply(event)? {
                break;
            }
        }

        Ok(builder.finish())
    }

    /// Build a document from events that cannot fail.
    pub fn read_events<I>(&self, events: I) -> Result<Document>
    where
        I: IntoIterator<Item = GlyphEvent>,
    {
        self.read(events.into_iter().map(Ok))
    }

    /// Build a document from JSON Lines text.
    pub fn read_json_lines<R: io::BufRead>(&self, reader: R) -> Result<Document> {
        self.read(JsonLinesSource::new(reader))
    }

    /// Build a document from a JSON Lines event file.
    pub fn read_file<P: AsRef<Path>>(&self, path: P) -> Result<Document> {
        let path = path.as_ref();
        log::debug!("Reading glyph events from {}", path.display());
        let source = JsonLinesSource::open(path).map_err(|e| {
            Error::DocumentUnreadable(format!("cannot open {}: {}", path.display(), e))
        })?;
        self.read(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GlyphRun;

    fn word(text: &str) -> GlyphEvent {
        GlyphEvent::Glyph(GlyphRun::new(text, 0.0, 0.0, 5.0, 10.0, 800.0))
    }

    #[test]
    fn test_read_events() {
        let reader = StructureReader::default();
        let doc = reader
            .read_events(vec![
                GlyphEvent::PageStart,
                word("hello"),
                GlyphEvent::LineBreak,
                GlyphEvent::PageEnd,
                GlyphEvent::EndOfDocument,
            ])
            .unwrap();
        assert_eq!(doc.plain_text(), "hello");
    }

    #[test]
    fn test_events_after_end_are_ignored() {
        let reader = StructureReader::default();
        let doc = reader
            .read_events(vec![
                GlyphEvent::PageStart,
                word("kept"),
                GlyphEvent::EndOfDocument,
                GlyphEvent::PageStart,
                word("dropped"),
            ])
            .unwrap();
        assert_eq!(doc.page_count(), 1);
        assert_eq!(doc.buffer().len(), 1);
    }

    #[test]
    fn test_source_error_is_unreadable() {
        let reader = StructureReader::default();
        let events = vec![
            Ok(GlyphEvent::PageStart),
            Ok(word("a")),
            Err(io::Error::new(io::ErrorKind::UnexpectedEof, "truncated")),
        ];
        let err = reader.read(events).unwrap_err();
        assert!(matches!(err, Error::DocumentUnreadable(_)));
        assert!(err.to_string().contains("truncated"));
    }

    #[test]
    fn test_set_start_page() {
        let mut reader = StructureReader::default();
        reader.set_start_page(0);
        assert_eq!(reader.options().start_page, 1);
        reader.set_start_page(9);
        let doc = reader.read_events(vec![GlyphEvent::PageStart]).unwrap();
        assert_eq!(doc.pages()[0].number(), 9);
    }

    #[test]
    fn test_missing_file() {
        let reader = StructureReader::default();
        let err = reader.read_file("/nonexistent/events.jsonl").unwrap_err();
        assert!(matches!(err, Error::DocumentUnreadable(_)));
    }
}
