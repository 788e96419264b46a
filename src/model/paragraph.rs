//! Line and paragraph types.

use serde::Serialize;

use super::Span;

/// An ordered sequence of words.
///
/// A line may be empty: a line break with nothing pending still produces
/// one, so line indexes line up with line-break events.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Line {
    words: Vec<Span>,
}

impl Line {
    /// Create a line from words in reading order.
    pub fn new(words: Vec<Span>) -> Self {
        Self { words }
    }

    /// Words in insertion order.
    pub fn words(&self) -> &[Span] {
        &self.words
    }

    /// First word, if any.
    pub fn first_word(&self) -> Option<&Span> {
        self.words.first()
    }

    /// Last word, if any.
    pub fn last_word(&self) -> Option<&Span> {
        self.words.last()
    }

    /// Span from the first word's first run to the last word's last run.
    ///
    /// `None` for an empty line.
    pub fn span(&self) -> Option<Span> {
        match (self.first_word(), self.last_word()) {
            (Some(first), Some(last)) => Some(Span::covering(first, last)),
            _ => None,
        }
    }

    /// Words joined with single spaces.
    ///
    /// Every word boundary becomes one space, whether or not the word carries
    /// a trailing separator. Use [`span`](Self::span) and
    /// [`Span::materialize`] for the runs exactly as delivered.
    pub fn text(&self) -> String {
        self.words
            .iter()
            .map(Span::materialize)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Check if the line has no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Number of words on the line.
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Number of glyph runs across all words.
    pub fn glyph_count(&self) -> usize {
        self.words.iter().map(Span::glyph_count).sum()
    }
}

/// An ordered sequence of lines.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Paragraph {
    lines: Vec<Line>,
}

impl Paragraph {
    /// Create a paragraph from lines in reading order.
    pub fn new(lines: Vec<Line>) -> Self {
        Self { lines }
    }

    /// Lines of the paragraph.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// First line, if any.
    pub fn first_line(&self) -> Option<&Line> {
        self.lines.first()
    }

    /// All words of the paragraph in reading order.
    pub fn words(&self) -> impl Iterator<Item = &Span> + '_ {
        self.lines.iter().flat_map(|line| line.words().iter())
    }

    /// Lines joined with newlines.
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(Line::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Check if the paragraph has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of words across all lines.
    pub fn word_count(&self) -> usize {
        self.lines.iter().map(Line::word_count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GlyphBuffer, GlyphRun};

    fn words(texts: &[&str]) -> Vec<Span> {
        let runs = texts
            .iter()
            .enumerate()
            .map(|(i, t)| GlyphRun::new(*t, i as f32 * 30.0, 100.0, 20.0, 10.0, 800.0).on_page(1))
            .collect::<Vec<_>>();
        let buffer = GlyphBuffer::new(runs);
        (0..texts.len())
            .map(|i| Span::new(buffer.clone(), i, i).unwrap())
            .collect()
    }

    #[test]
    fn test_line_text_and_span() {
        let line = Line::new(words(&["The", "cat", "sat"]));
        assert_eq!(line.text(), "The cat sat");
        assert_eq!(line.word_count(), 3);
        assert_eq!(line.glyph_count(), 3);

        let span = line.span().unwrap();
        assert_eq!(span.start(), 0);
        assert_eq!(span.end(), 2);
        assert_eq!(span.materialize(), "Thecatsat");
        assert_eq!(span.width(), 80.0);
    }

    #[test]
    fn test_line_text_ignores_separator_flags() {
        let line = Line::new(words(&["w0", "w1"]));
        assert!(line.words().iter().all(|w| !w.has_trailing_separator()));
        assert_eq!(line.text(), "w0 w1");
        assert_eq!(line.span().unwrap().materialize(), "w0w1");
    }

    #[test]
    fn test_empty_line() {
        let line = Line::default();
        assert!(line.is_empty());
        assert!(line.span().is_none());
        assert_eq!(line.text(), "");
    }

    #[test]
    fn test_paragraph_text() {
        let mut ws = words(&["a", "b", "c"]);
        let last = ws.split_off(2);
        let paragraph = Paragraph::new(vec![Line::new(ws), Line::new(last)]);
        assert_eq!(paragraph.text(), "a b\nc");
        assert_eq!(paragraph.word_count(), 3);
        assert_eq!(paragraph.words().count(), 3);
    }
}
