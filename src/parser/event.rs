//! Glyph events and the sources that deliver them.
//!
//! The page-content walker is external. Anything that yields
//! `io::Result<GlyphEvent>` in document order can feed the builder; the
//! JSON Lines reader here covers walkers that run out of process.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::GlyphRun;

/// One event of the ordered glyph stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GlyphEvent {
    /// A single positioned glyph run; becomes a one-run word
    Glyph(GlyphRun),
    /// Several runs emitted together; become one word
    Text {
        /// Runs in reading order
        runs: Vec<GlyphRun>,
    },
    /// Whitespace followed the last word
    WordSeparator,
    /// End of a line
    LineBreak,
    /// End of a paragraph
    ParagraphBreak,
    /// Boundary between articles (text flows)
    ArticleBreak {
        /// Reading direction of the article
        #[serde(default = "default_left_to_right")]
        left_to_right: bool,
    },
    /// A page begins
    PageStart,
    /// A page ends
    PageEnd,
    /// No more events follow
    EndOfDocument,
}

fn default_left_to_right() -> bool {
    true
}

impl GlyphEvent {
    /// Shorthand for a left-to-right article break.
    pub fn article_break() -> Self {
        GlyphEvent::ArticleBreak {
            left_to_right: true,
        }
    }

    /// Number of glyph runs carried by the event.
    pub fn run_count(&self) -> usize {
        match self {
            GlyphEvent::Glyph(_) => 1,
            GlyphEvent::Text { runs } => runs.len(),
            _ => 0,
        }
    }

    /// Check if this is a structural boundary (anything but glyph data).
    pub fn is_boundary(&self) -> bool {
        !matches!(self, GlyphEvent::Glyph(_) | GlyphEvent::Text { .. })
    }
}

/// Reads one JSON-encoded [`GlyphEvent`] per line.
///
/// Blank lines are skipped. A line that fails to parse is reported as
/// `io::ErrorKind::InvalidData` carrying the line number.
pub struct JsonLinesSource<R> {
    lines: io::Lines<R>,
    line_number: usize,
}

impl<R: BufRead> JsonLinesSource<R> {
    /// Wrap a buffered reader.
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_number: 0,
        }
    }
}

impl JsonLinesSource<BufReader<File>> {
    /// Open a JSON Lines event file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> Iterator for JsonLinesSource<R> {
    type Item = io::Result<GlyphEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(e)),
            };
            self.line_number += 1;

            if line.trim().is_empty() {
                continue;
            }

            return Some(serde_json::from_str(&line).map_err(|e| {
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("line {}: {}", self.line_number, e),
                )
            }));
        }
    }
}

/// Write events as JSON Lines, the format [`JsonLinesSource`] reads.
pub fn write_json_lines<'a, W, I>(events: I, mut writer: W) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a GlyphEvent>,
{
    for event in events {
        serde_json::to_writer(&mut writer, event)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_json_shape() {
        let json = serde_json::to_string(&GlyphEvent::LineBreak).unwrap();
        assert_eq!(json, r#"{"event":"line_break"}"#);

        let event: GlyphEvent = serde_json::from_str(r#"{"event":"article_break"}"#).unwrap();
        assert_eq!(event, GlyphEvent::article_break());

        let event: GlyphEvent = serde_json::from_str(
            r#"{"event":"glyph","text":"a","x":1,"y":2,"width":3,"height":4,"page_height":5}"#,
        )
        .unwrap();
        assert_eq!(event.run_count(), 1);
        assert!(!event.is_boundary());
    }

    #[test]
    fn test_json_lines_round_trip() {
        let events = vec![
            GlyphEvent::PageStart,
            GlyphEvent::Text {
                runs: vec![
                    GlyphRun::new("H", 0.0, 0.0, 1.0, 1.0, 10.0),
                    GlyphRun::new("i", 1.0, 0.0, 1.0, 1.0, 10.0),
                ],
            },
            GlyphEvent::PageEnd,
        ];
        let mut out = Vec::new();
        write_json_lines(&events, &mut out).unwrap();

        let parsed: Vec<GlyphEvent> = JsonLinesSource::new(&out[..])
            .collect::<io::Result<_>>()
            .unwrap();
        assert_eq!(parsed, events);
    }

    #[test]
    fn test_json_lines_skips_blank_and_reports_line() {
        let input = "{\"event\":\"page_start\"}\n\n   \n{\"event\":\"bogus\"}\n";
        let mut source = JsonLinesSource::new(input.as_bytes());

        assert!(matches!(source.next(), Some(Ok(GlyphEvent::PageStart))));
        let err = source.next().unwrap().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        assert!(err.to_string().starts_with("line 4:"));
        assert!(source.next().is_none());
    }
}
