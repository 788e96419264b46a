//! Document-level types.

use serde::{Deserialize, Serialize};

use super::{GlyphBuffer, Line, Page, Span};

/// A reconstructed document: pages plus the glyph buffer every span views.
#[derive(Debug, Clone, Default)]
pub struct Document {
    pages: Vec<Page>,
    buffer: GlyphBuffer,
}

impl Document {
    /// Assemble a document from finished pages and the frozen buffer.
    pub fn new(pages: Vec<Page>, buffer: GlyphBuffer) -> Self {
        Self { pages, buffer }
    }

    /// Get the number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Pages in reading order.
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// The shared glyph buffer.
    pub fn buffer(&self) -> &GlyphBuffer {
        &self.buffer
    }

    /// Get a page by its number (1-indexed).
    pub fn get_page(&self, number: u32) -> Option<&Page> {
        self.page_position(number).map(|i| &self.pages[i])
    }

    pub(crate) fn page_mut(&mut self, number: u32) -> Option<&mut Page> {
        self.page_position(number).map(move |i| &mut self.pages[i])
    }

    pub(crate) fn pages_mut(&mut self) -> impl Iterator<Item = &mut Page> + '_ {
        self.pages.iter_mut()
    }

    fn page_position(&self, number: u32) -> Option<usize> {
        if number == 0 {
            return None;
        }
        self.pages
            .binary_search_by_key(&number, Page::number)
            .ok()
    }

    /// Check if the document has any pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Every word in reading order.
    pub fn words(&self) -> impl Iterator<Item = &Span> + '_ {
        self.pages.iter().flat_map(Page::words)
    }

    /// Every line in reading order.
    pub fn lines(&self) -> impl Iterator<Item = &Line> + '_ {
        self.pages
            .iter()
            .flat_map(|page| page.articles().iter())
            .flat_map(|article| article.paragraphs().iter())
            .flat_map(|paragraph| paragraph.lines().iter())
    }

    /// Pages a consumer classified as primary content.
    pub fn content_pages(&self) -> impl Iterator<Item = &Page> + '_ {
        self.pages.iter().filter(|page| page.is_content_page())
    }

    /// Classify every page with a consumer-supplied policy.
    pub fn apply_content_policy<F>(&mut self, mut policy: F)
    where
        F: FnMut(&Page) -> bool,
    {
        for page in &mut self.pages {
            let is_content = policy(page);
            page.set_content_page(is_content);
        }
    }

    /// Total number of annotations across all pages.
    pub fn annotation_count(&self) -> usize {
        self.pages.iter().map(|page| page.annotations().len()).sum()
    }

    /// Get plain text content of the entire document.
    pub fn plain_text(&self) -> String {
        self.pages
            .iter()
            .map(Page::plain_text)
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Count the nodes at each level of the tree.
    pub fn stats(&self) -> StructureStats {
        let mut stats = StructureStats {
            page_count: self.page_count(),
            ..Default::default()
        };

        for page in &self.pages {
            stats.article_count += page.articles().len() as u32;
            for article in page.articles() {
                stats.paragraph_count += article.paragraphs().len() as u32;
                for paragraph in article.paragraphs() {
                    stats.line_count += paragraph.lines().len() as u32;
                    for line in paragraph.lines() {
                        stats.word_count += line.word_count() as u32;
                        stats.glyph_count += line.glyph_count() as u32;
                    }
                }
            }
        }

        stats
    }
}

/// Node counts of a reconstructed document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureStats {
    /// Number of pages
    pub page_count: u32,
    /// Number of articles
    pub article_count: u32,
    /// Number of paragraphs
    pub paragraph_count: u32,
    /// Number of lines, empty ones included
    pub line_count: u32,
    /// Number of words
    pub word_count: u32,
    /// Number of glyph runs covered by words
    pub glyph_count: u32,
}

impl StructureStats {
    /// Average words per page.
    pub fn words_per_page(&self) -> f32 {
        if self.page_count == 0 {
            return 0.0;
        }
        self.word_count as f32 / self.page_count as f32
    }
}
