//! Zero-copy views over contiguous glyph runs.
//!
//! A [`Span`] is the unit everything else is built from: every word in the
//! document tree is a span, lines derive one, and findings point at one to
//! say where on the page they apply.
//!
//! Index convention: `start` and `end` are both inclusive. `length()` is
//! `end - start`, so a single-run span has length 0 and a glyph count of 1.

use std::fmt;

use serde::ser::{Serialize, SerializeStruct, Serializer};

use super::{GlyphBuffer, GlyphRun, Rect};
use crate::error::{Error, Result};

/// Visual padding applied to the glyph height of the last run.
///
/// Not a layout measurement; it keeps markup from clipping descenders.
pub const HEIGHT_PADDING: f32 = 1.1;

/// Characters that make up a punctuation-only span.
const PUNCTUATION_MARKS: &[char] = &[
    '.', ',', ';', ':', '!', '?', '¿', '¡', '-', '\u{2010}', '\u{2013}', '\u{2014}', '(', ')',
    '[', ']', '{', '}', '"', '\'', '\u{201E}', '\u{201C}', '\u{201D}', '\u{201A}', '\u{2018}',
    '\u{2019}', '«', '»', '\u{2026}', '/',
];

/// Glyphs used as list bullets, including the Symbol-font private-use bullet.
const BULLET_POINTS: &[char] = &[
    '\u{2022}', '\u{25E6}', '\u{25AA}', '\u{25AB}', '\u{25A0}', '\u{25A1}', '\u{25CF}',
    '\u{25CB}', '\u{2023}', '\u{2043}', '\u{2219}', '\u{00B7}', '\u{2013}', '-', '*', '\u{27A2}',
    '\u{27A4}', '\u{25BA}', '\u{25B6}', '\u{2713}', '\u{2714}', '\u{F0B7}', '\u{F0A7}',
];

/// Check whether a character is in the punctuation table.
pub fn is_punctuation_char(c: char) -> bool {
    PUNCTUATION_MARKS.contains(&c)
}

/// Check whether a character is in the bullet table.
pub fn is_bullet_char(c: char) -> bool {
    BULLET_POINTS.contains(&c)
}

/// A view of runs `start..=end` of a shared [`GlyphBuffer`].
#[derive(Clone)]
pub struct Span {
    buffer: GlyphBuffer,
    start: usize,
    end: usize,
    page_index: u32,
    has_trailing_separator: bool,
}

impl Span {
    /// Create a span over `start..=end`, validating it against the buffer.
    ///
    /// The page index is taken from the first run.
    pub fn new(buffer: GlyphBuffer, start: usize, end: usize) -> Result<Self> {
        if start > end || end >= buffer.len() {
            return Err(Error::SpanOutOfRange {
                start,
                end,
                len: buffer.len(),
            });
        }

        let page_index = buffer[start].page;
        if buffer.as_slice()[start..=end]
            .iter()
            .any(|run| run.page != page_index)
        {
            return Err(Error::SpanCrossesPages { start, end });
        }

        Ok(Self::from_parts(buffer, start, end, page_index, false))
    }

    /// Build a span without validation. Callers uphold the invariants.
    pub(crate) fn from_parts(
        buffer: GlyphBuffer,
        start: usize,
        end: usize,
        page_index: u32,
        has_trailing_separator: bool,
    ) -> Self {
        debug_assert!(start <= end && end < buffer.len());
        Self {
            buffer,
            start,
            end,
            page_index,
            has_trailing_separator,
        }
    }

    /// Span covering `first` through `last`, both on the same page.
    pub(crate) fn covering(first: &Span, last: &Span) -> Self {
        Self::from_parts(
            first.buffer.clone(),
            first.start,
            last.end,
            first.page_index,
            false,
        )
    }

    /// Index of the first run in the buffer.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Index of the last run in the buffer (inclusive).
    pub fn end(&self) -> usize {
        self.end
    }

    /// 1-based page number the span lies on (0 = not located).
    pub fn page_index(&self) -> u32 {
        self.page_index
    }

    /// Whether a word separator followed this exact run range.
    pub fn has_trailing_separator(&self) -> bool {
        self.has_trailing_separator
    }

    /// The shared buffer this span views.
    pub fn buffer(&self) -> &GlyphBuffer {
        &self.buffer
    }

    /// `end - start`: the count of run indices spanned past the first.
    pub fn length(&self) -> usize {
        self.end - self.start
    }

    /// Number of runs covered (`length() + 1`).
    pub fn glyph_count(&self) -> usize {
        self.end - self.start + 1
    }

    /// First run of the span.
    pub fn first_run(&self) -> &GlyphRun {
        &self.buffer[self.start]
    }

    /// Last run of the span.
    pub fn last_run(&self) -> &GlyphRun {
        &self.buffer[self.end]
    }

    /// Run at a span-relative index (`0..=length()`).
    pub fn run_at(&self, index: usize) -> Option<&GlyphRun> {
        if index > self.length() {
            return None;
        }
        self.buffer.get(self.start + index)
    }

    /// Iterate over the runs of the span.
    pub fn runs(&self) -> impl Iterator<Item = &GlyphRun> + '_ {
        self.buffer.as_slice()[self.start..=self.end].iter()
    }

    /// Concatenated text of every run in the span.
    pub fn materialize(&self) -> String {
        self.runs().map(|run| run.text.as_str()).collect()
    }

    /// Check if the materialized text contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.materialize().contains(needle)
    }

    /// X of the first run.
    pub fn x(&self) -> f32 {
        self.first_run().x
    }

    /// Y of the first run, flipped from bottom-left to top-left origin.
    pub fn y(&self) -> f32 {
        let first = self.first_run();
        first.page_height - first.y
    }

    /// Horizontal extent from the first run's left edge to the last run's right edge.
    ///
    /// Assumes left-to-right layout inside the span. Reversed or wrapped
    /// spans yield a width that does not describe the visual extent, and
    /// can be negative.
    pub fn width(&self) -> f32 {
        self.last_run().right() - self.first_run().x
    }

    /// Padded glyph height plus the vertical drift between first and last run.
    pub fn height(&self) -> f32 {
        let first = self.first_run();
        let last = self.last_run();
        HEIGHT_PADDING * last.height + (first.y - last.y)
    }

    /// Rectangle built from `x`, `y`, `width` and `height`.
    pub fn bounding_rect(&self) -> Rect {
        Rect::new(self.x(), self.y(), self.width(), self.height())
    }

    /// Sub-span over relative indices `a..=b`, sharing the same buffer.
    ///
    /// The result never carries the trailing separator flag.
    pub fn sub_span(&self, a: usize, b: usize) -> Result<Span> {
        if a > b || b > self.length() {
            return Err(Error::SpanOutOfRange {
                start: a,
                end: b,
                len: self.length(),
            });
        }
        Ok(Self::from_parts(
            self.buffer.clone(),
            self.start + a,
            self.start + b,
            self.page_index,
            false,
        ))
    }

    /// Whether the span consists only of punctuation characters.
    pub fn is_punctuation_mark(&self) -> bool {
        let text = self.materialize();
        let trimmed = text.trim();
        !trimmed.is_empty() && trimmed.chars().all(is_punctuation_char)
    }

    /// Whether the span is a single bullet glyph.
    pub fn is_bullet_point(&self) -> bool {
        let text = self.materialize();
        let mut chars = text.trim().chars();
        matches!((chars.next(), chars.next()), (Some(c), None) if is_bullet_char(c))
    }
}

impl PartialEq for Span {
    fn eq(&self, other: &Self) -> bool {
        self.buffer.same_buffer(&other.buffer)
            && self.start == other.start
            && self.end == other.end
            && self.page_index == other.page_index
            && self.has_trailing_separator == other.has_trailing_separator
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Span")
            .field("start", &self.start)
            .field("end", &self.end)
            .field("page_index", &self.page_index)
            .field("has_trailing_separator", &self.has_trailing_separator)
            .field("text", &self.materialize())
            .finish()
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for run in self.runs() {
            f.write_str(&run.text)?;
        }
        Ok(())
    }
}

impl Serialize for Span {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Span", 5)?;
        state.serialize_field("start", &self.start)?;
        state.serialize_field("end", &self.end)?;
        state.serialize_field("page_index", &self.page_index)?;
        state.serialize_field("has_trailing_separator", &self.has_trailing_separator)?;
        state.serialize_field("text", &self.materialize())?;
        state.end()
    }
}
