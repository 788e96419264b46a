//! Page and article types.

use serde::Serialize;

use super::{Annotation, Paragraph, Span};

/// An ordered sequence of paragraphs forming one text flow.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Article {
    paragraphs: Vec<Paragraph>,
}

impl Article {
    /// Create an article from paragraphs in reading order.
    pub fn new(paragraphs: Vec<Paragraph>) -> Self {
        Self { paragraphs }
    }

    /// Paragraphs of the article.
    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    /// Paragraphs joined with blank lines.
    pub fn text(&self) -> String {
        self.paragraphs
            .iter()
            .map(Paragraph::text)
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Check if the article has no paragraphs.
    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }
}

/// A single page in the document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    number: u32,
    articles: Vec<Article>,
    content_page: bool,
    annotations: Vec<Annotation>,
}

impl Page {
    /// Create a page (1-indexed number) with its articles.
    pub fn new(number: u32, articles: Vec<Article>) -> Self {
        Self {
            number,
            articles,
            content_page: true,
            annotations: Vec::new(),
        }
    }

    /// Page number (1-indexed).
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Articles on the page.
    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    /// Whether a consumer classified this as a primary content page.
    ///
    /// Defaults to `true` until a policy is applied with
    /// [`Document::apply_content_policy`](super::Document::apply_content_policy).
    pub fn is_content_page(&self) -> bool {
        self.content_page
    }

    /// Overlay annotations currently attached to the page.
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// All words on the page in reading order.
    pub fn words(&self) -> impl Iterator<Item = &Span> + '_ {
        self.articles
            .iter()
            .flat_map(|article| article.paragraphs().iter())
            .flat_map(|paragraph| paragraph.words())
    }

    /// Get plain text content of the page.
    pub fn plain_text(&self) -> String {
        self.articles
            .iter()
            .map(Article::text)
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Check if the page has no articles.
    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    pub(crate) fn set_content_page(&mut self, content_page: bool) {
        self.content_page = content_page;
    }

    pub(crate) fn push_annotation(&mut self, annotation: Annotation) {
        self.annotations.push(annotation);
    }

    pub(crate) fn clear_annotations(&mut self) {
        self.annotations.clear();
    }
}
