//! Single-pass structure builder.
//!
//! The builder consumes glyph and boundary events in document order and
//! keeps one open frame per tree level: pending words, paragraph, article
//! and page. A boundary event hands the finished frame to its parent with
//! `mem::take`, so a node is owned by exactly one frame at any time.
//!
//! Frames hold run indices only. The glyph buffer is still growing while
//! events arrive, so spans are materialized once, in [`StructureBuilder::finish`],
//! after the buffer has been frozen.
//!
//! Precondition: events come from a single producer in strict document
//! order. Word separators mark whichever word was appended last, which is
//! only meaningful under that ordering.

use std::mem;

use crate::error::{Error, Result};
use crate::model::{Article, Document, GlyphBuffer, GlyphRun, Line, Page, Paragraph, Span};

use super::event::GlyphEvent;
use super::options::{BuildOptions, ErrorMode};

/// Run range of a word that has not been frozen into a [`Span`] yet.
#[derive(Debug, Clone, Copy)]
struct WordRange {
    start: usize,
    end: usize,
    page: u32,
    trailing_separator: bool,
}

impl WordRange {
    fn freeze(self, buffer: &GlyphBuffer) -> Span {
        Span::from_parts(
            buffer.clone(),
            self.start,
            self.end,
            self.page,
            self.trailing_separator,
        )
    }
}

type LineDraft = Vec<WordRange>;
type ParagraphDraft = Vec<LineDraft>;
type ArticleDraft = Vec<ParagraphDraft>;

#[derive(Debug)]
struct PageDraft {
    number: u32,
    articles: Vec<ArticleDraft>,
}

impl PageDraft {
    fn freeze(self, buffer: &GlyphBuffer) -> Page {
        let articles = self
            .articles
            .into_iter()
            .map(|article| Article::new(article.into_iter().map(|p| freeze_paragraph(p, buffer)).collect()))
            .collect();
        Page::new(self.number, articles)
    }
}

fn freeze_paragraph(paragraph: ParagraphDraft, buffer: &GlyphBuffer) -> Paragraph {
    Paragraph::new(
        paragraph
            .into_iter()
            .map(|line| Line::new(line.into_iter().map(|w| w.freeze(buffer)).collect()))
            .collect(),
    )
}

/// Rebuilds the page → article → paragraph → line → word tree from events.
///
/// A builder produces exactly one document: [`finish`](Self::finish)
/// consumes it. Build a fresh one per load so page numbering restarts from
/// the configured start page.
#[derive(Debug)]
pub struct StructureBuilder {
    options: BuildOptions,
    runs: Vec<GlyphRun>,
    current_page_number: u32,
    pending_page: Option<PageDraft>,
    pending_article: ArticleDraft,
    pending_paragraph: ParagraphDraft,
    pending_words: LineDraft,
    pages: Vec<PageDraft>,
}

impl StructureBuilder {
    /// Create a builder for one document.
    pub fn new(options: BuildOptions) -> Self {
        let current_page_number = options.initial_page_counter();
        Self {
            options,
            runs: Vec::new(),
            current_page_number,
            pending_page: None,
            pending_article: Vec::new(),
            pending_paragraph: Vec::new(),
            pending_words: Vec::new(),
            pages: Vec::new(),
        }
    }

    /// Number of the most recently started page.
    pub fn current_page_number(&self) -> u32 {
        self.current_page_number
    }

    /// Number of glyph runs recorded so far.
    pub fn run_count(&self) -> usize {
        self.runs.len()
    }

    /// Dispatch one event. Returns `false` once the document has ended.
    pub fn apply(&mut self, event: GlyphEvent) -> Result<bool> {
        match event {
            GlyphEvent::Glyph(run) => self.on_glyph_run(run)?,
            GlyphEvent::Text { runs } => self.on_text(runs)?,
            GlyphEvent::WordSeparator => self.on_word_separator(),
            GlyphEvent::LineBreak => self.on_line_break()?,
            GlyphEvent::ParagraphBreak => self.on_paragraph_break(),
            GlyphEvent::ArticleBreak { left_to_right } => self.on_article_break(left_to_right)?,
            GlyphEvent::PageStart => self.on_page_start()?,
            GlyphEvent::PageEnd => self.on_page_end()?,
            GlyphEvent::EndOfDocument => return Ok(false),
        }
        Ok(true)
    }

    /// Record a run and append it as a new single-run word.
    pub fn on_glyph_run(&mut self, run: GlyphRun) -> Result<()> {
        self.on_text(vec![run])
    }

    /// Record several runs and append them as one word.
    pub fn on_text(&mut self, runs: Vec<GlyphRun>) -> Result<()> {
        if runs.is_empty() {
            return Ok(());
        }
        self.ensure_page("glyph run")?;

        let page = self.current_page_number;
        let start = self.runs.len();
        self.runs
            .extend(runs.into_iter().map(|run| run.on_page(page)));

        self.pending_words.push(WordRange {
            start,
            end: self.runs.len() - 1,
            page,
            trailing_separator: false,
        });
        Ok(())
    }

    /// Mark the last pending word as followed by a separator.
    pub fn on_word_separator(&mut self) {
        if let Some(word) = self.pending_words.last_mut() {
            word.trailing_separator = true;
        }
    }

    /// Close the pending words into a line, even when there are none.
    ///
    /// In lenient mode a line break between pages is dropped rather than
    /// opening a page, since it carries no content.
    pub fn on_line_break(&mut self) -> Result<()> {
        if self.pending_page.is_none() && self.options.error_mode == ErrorMode::Lenient {
            log::warn!(
                "line break outside of a page (after page {}); ignoring",
                self.current_page_number
            );
            return Ok(());
        }
        self.ensure_page("line break")?;
        let words = mem::take(&mut self.pending_words);
        self.pending_paragraph.push(words);
        Ok(())
    }

    /// Close the open paragraph into the current article.
    pub fn on_paragraph_break(&mut self) {
        if !self.pending_words.is_empty() {
            let words = mem::take(&mut self.pending_words);
            self.pending_paragraph.push(words);
        }
        if !self.pending_paragraph.is_empty() {
            let paragraph = mem::take(&mut self.pending_paragraph);
            self.pending_article.push(paragraph);
        }
    }

    /// Close the open article into the current page.
    ///
    /// Right-to-left articles are rejected.
    pub fn on_article_break(&mut self, left_to_right: bool) -> Result<()> {
        if !left_to_right {
            return Err(Error::LayoutUnsupported {
                page: self.current_page_number,
            });
        }
        self.close_article();
        Ok(())
    }

    /// Start the next page.
    pub fn on_page_start(&mut self) -> Result<()> {
        let number = self.next_page_number()?;
        if self.pending_page.is_some() {
            let message = format!(
                "page {} started before page {} ended",
                number, self.current_page_number
            );
            match self.options.error_mode {
                ErrorMode::Strict => return Err(Error::DocumentUnreadable(message)),
                ErrorMode::Lenient => {
                    log::warn!("{}; closing it", message);
                    self.close_page();
                }
            }
        }

        self.current_page_number = number;
        self.pending_page = Some(PageDraft {
            number,
            articles: Vec::new(),
        });
        Ok(())
    }

    /// Close the current page into the document.
    pub fn on_page_end(&mut self) -> Result<()> {
        if self.pending_page.is_none() {
            let message = format!(
                "page end without an open page (last page {})",
                self.current_page_number
            );
            return match self.options.error_mode {
                ErrorMode::Strict => Err(Error::DocumentUnreadable(message)),
                ErrorMode::Lenient => {
                    log::warn!("{}; ignoring", message);
                    Ok(())
                }
            };
        }
        self.close_page();
        Ok(())
    }

    /// Force-flush everything still open and return the document.
    pub fn finish(mut self) -> Document {
        self.close_page();

        let buffer = GlyphBuffer::new(self.runs);
        let pages = self
            .pages
            .into_iter()
            .map(|page| page.freeze(&buffer))
            .collect::<Vec<_>>();

        log::debug!(
            "Built document: {} pages, {} glyph runs",
            pages.len(),
            buffer.len()
        );
        Document::new(pages, buffer)
    }

    fn ensure_page(&mut self, what: &str) -> Result<()> {
        if self.pending_page.is_some() {
            return Ok(());
        }
        match self.options.error_mode {
            ErrorMode::Strict => Err(Error::DocumentUnreadable(format!(
                "{} outside of a page (after page {})",
                what, self.current_page_number
            ))),
            ErrorMode::Lenient => {
                log::warn!(
                    "{} outside of a page; opening page {}",
                    what,
                    self.next_page_number()?
                );
                self.on_page_start()
            }
        }
    }

    fn next_page_number(&self) -> Result<u32> {
        self.current_page_number.checked_add(1).ok_or_else(|| {
            Error::DocumentUnreadable(format!(
                "page number overflow after page {}",
                self.current_page_number
            ))
        })
    }

    fn close_article(&mut self) {
        self.on_paragraph_break();
        if self.pending_article.is_empty() {
            return;
        }
        let article = mem::take(&mut self.pending_article);
        if let Some(page) = self.pending_page.as_mut() {
            page.articles.push(article);
        }
    }

    fn close_page(&mut self) {
        self.close_article();
        if let Some(page) = self.pending_page.take() {
            log::debug!(
                "Closed page {} with {} articles",
                page.number,
                page.articles.len()
            );
            self.pages.push(page);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glyph(text: &str) -> GlyphRun {
        GlyphRun::new(text, 0.0, 100.0, 5.0, 10.0, 800.0)
    }

    #[test]
    fn test_initial_counter_uses_start_page() {
        let builder = StructureBuilder::new(BuildOptions::new().with_start_page(3));
        assert_eq!(builder.current_page_number(), 2);
    }

    #[test]
    fn test_glyph_runs_get_page_numbers() {
        let mut builder = StructureBuilder::new(BuildOptions::new().with_start_page(7));
        builder.on_page_start().unwrap();
        builder.on_glyph_run(glyph("a")).unwrap();
        let doc = builder.finish();

        assert_eq!(doc.buffer()[0].page, 7);
        assert_eq!(doc.pages()[0].number(), 7);
    }

    #[test]
    fn test_word_separator_without_words_is_noop() {
        let mut builder = StructureBuilder::new(BuildOptions::default());
        builder.on_page_start().unwrap();
        builder.on_word_separator();
        builder.on_glyph_run(glyph("a")).unwrap();
        builder.on_line_break().unwrap();
        let doc = builder.finish();

        let word = doc.words().next().unwrap();
        assert!(!word.has_trailing_separator());
    }

    #[test]
    fn test_on_text_creates_one_word() {
        let mut builder = StructureBuilder::new(BuildOptions::default());
        builder.on_page_start().unwrap();
        builder
            .on_text(vec![glyph("c"), glyph("a"), glyph("t")])
            .unwrap();
        builder.on_text(Vec::new()).unwrap();
        let doc = builder.finish();

        let words: Vec<_> = doc.words().collect();
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].materialize(), "cat");
        assert_eq!(words[0].glyph_count(), 3);
    }

    #[test]
    fn test_rtl_article_rejected() {
        let mut builder = StructureBuilder::new(BuildOptions::default());
        builder.on_page_start().unwrap();
        let err = builder.on_article_break(false).unwrap_err();
        assert!(matches!(err, Error::LayoutUnsupported { page: 1 }));
    }

    #[test]
    fn test_strict_mode_rejects_glyph_outside_page() {
        let mut builder = StructureBuilder::new(BuildOptions::default());
        let err = builder.on_glyph_run(glyph("a")).unwrap_err();
        assert!(matches!(err, Error::DocumentUnreadable(_)));
        assert_eq!(builder.run_count(), 0);
    }

    #[test]
    fn test_lenient_mode_opens_implicit_page() {
        let mut builder = StructureBuilder::new(BuildOptions::new().lenient());
        builder.on_glyph_run(glyph("a")).unwrap();
        builder.on_page_start().unwrap();
        builder.on_glyph_run(glyph("b")).unwrap();
        builder.on_page_end().unwrap();
        builder.on_page_end().unwrap();
        let doc = builder.finish();

        assert_eq!(doc.page_count(), 2);
        assert_eq!(doc.pages()[0].plain_text(), "a");
        assert_eq!(doc.pages()[1].plain_text(), "b");
    }

    #[test]
    fn test_strict_mode_rejects_nested_page_start() {
        let mut builder = StructureBuilder::new(BuildOptions::default());
        builder.on_page_start().unwrap();
        assert!(builder.on_page_start().is_err());
        assert!(StructureBuilder::new(BuildOptions::default())
            .on_page_end()
            .is_err());
    }

    #[test]
    fn test_paragraph_break_does_not_add_empty_line() {
        let mut builder = StructureBuilder::new(BuildOptions::default());
        builder.on_page_start().unwrap();
        builder.on_glyph_run(glyph("a")).unwrap();
        builder.on_line_break().unwrap();
        builder.on_paragraph_break();
        builder.on_paragraph_break();
        let doc = builder.finish();

        let stats = doc.stats();
        assert_eq!(stats.paragraph_count, 1);
        assert_eq!(stats.line_count, 1);
    }

    #[test]
    fn test_finish_flushes_open_frames() {
        let mut builder = StructureBuilder::new(BuildOptions::default());
        builder.on_page_start().unwrap();
        builder.on_glyph_run(glyph("open")).unwrap();
        let doc = builder.finish();

        let stats = doc.stats();
        assert_eq!(stats.page_count, 1);
        assert_eq!(stats.article_count, 1);
        assert_eq!(stats.paragraph_count, 1);
        assert_eq!(stats.line_count, 1);
        assert_eq!(stats.word_count, 1);
    }

    #[test]
    fn test_page_number_overflow_is_unreadable() {
        let mut builder = StructureBuilder::new(BuildOptions::new().with_start_page(u32::MAX));
        builder.on_page_start().unwrap();
        assert_eq!(builder.current_page_number(), u32::MAX);
        builder.on_page_end().unwrap();

        let err = builder.on_page_start().unwrap_err();
        assert!(matches!(err, Error::DocumentUnreadable(_)));
        assert_eq!(builder.current_page_number(), u32::MAX);
    }

    #[test]
    fn test_lenient_line_break_between_pages_is_dropped() {
        let mut builder = StructureBuilder::new(BuildOptions::new().lenient());
        builder.on_page_start().unwrap();
        builder.on_page_end().unwrap();
        builder.on_line_break().unwrap();
        assert_eq!(builder.current_page_number(), 1);

        let mut strict = StructureBuilder::new(BuildOptions::default());
        assert!(strict.on_line_break().is_err());
    }

    #[test]
    fn test_apply_stops_at_end_of_document() {
        let mut builder = StructureBuilder::new(BuildOptions::default());
        assert!(builder.apply(GlyphEvent::PageStart).unwrap());
        assert!(!builder.apply(GlyphEvent::EndOfDocument).unwrap());
    }
}
