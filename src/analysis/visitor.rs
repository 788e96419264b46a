//! Visitor pattern for walking the document tree.
//!
//! Analyzers that only need to look at each node once implement
//! [`DocumentVisitor`] and hand themselves to [`walk`].
//!
//! # Example
//!
//! ```
//! use glyphmark::analysis::{walk, DocumentVisitor};
//! use glyphmark::model::{Document, Span};
//!
//! #[derive(Default)]
//! struct WordCounter(usize);
//!
//! impl DocumentVisitor for WordCounter {
//!     fn visit_word(&mut self, _word: &Span) {
//!         self.0 += 1;
//!     }
//! }
//!
//! let mut counter = WordCounter::default();
//! walk(&Document::default(), &mut counter);
//! assert_eq!(counter.0, 0);
//! ```

use crate::model::{Article, Document, Line, Page, Paragraph, Span};

/// Action returned by visitor methods to control traversal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VisitorAction {
    /// Descend into the node's children.
    #[default]
    Continue,

    /// Do not visit the node's children.
    SkipChildren,
}

impl VisitorAction {
    /// Check if this action indicates the children should be skipped.
    pub fn should_skip(&self) -> bool {
        matches!(self, VisitorAction::SkipChildren)
    }
}

/// Trait for visiting document nodes in reading order.
///
/// Every method has a default that continues, so implementors override
/// only the levels they care about.
pub trait DocumentVisitor: Send + Sync {
    /// Visit a page before its articles.
    fn visit_page(&mut self, _page: &Page) -> VisitorAction {
        VisitorAction::Continue
    }

    /// Visit an article before its paragraphs.
    fn visit_article(&mut self, _article: &Article) -> VisitorAction {
        VisitorAction::Continue
    }

    /// Visit a paragraph before its lines.
    fn visit_paragraph(&mut self, _paragraph: &Paragraph) -> VisitorAction {
        VisitorAction::Continue
    }

    /// Visit a line before its words.
    fn visit_line(&mut self, _line: &Line) -> VisitorAction {
        VisitorAction::Continue
    }

    /// Visit a word.
    fn visit_word(&mut self, _word: &Span) {}

    /// Called after a page's children, or right after a skipped page.
    fn on_page_end(&mut self, _page_number: u32) {}
}

/// Walk the whole document depth-first in reading order.
pub fn walk<V: DocumentVisitor + ?Sized>(doc: &Document, visitor: &mut V) {
    for page in doc.pages() {
        if !visitor.visit_page(page).should_skip() {
            walk_page(page, visitor);
        }
        visitor.on_page_end(page.number());
    }
}

fn walk_page<V: DocumentVisitor + ?Sized>(page: &Page, visitor: &mut V) {
    for article in page.articles() {
        if visitor.visit_article(article).should_skip() {
            continue;
        }
        for paragraph in article.paragraphs() {
            if visitor.visit_paragraph(paragraph).should_skip() {
                continue;
            }
            for line in paragraph.lines() {
                if visitor.visit_line(line).should_skip() {
                    continue;
                }
                for word in line.words() {
                    visitor.visit_word(word);
                }
            }
        }
    }
}

/// Visitor that skips pages not classified as content pages.
///
/// Put it first in a [`CompositeVisitor`] to restrict the rest of the
/// chain to content pages.
#[derive(Debug, Default)]
pub struct ContentPagesOnly;

impl DocumentVisitor for ContentPagesOnly {
    fn visit_page(&mut self, page: &Page) -> VisitorAction {
        if page.is_content_page() {
            VisitorAction::Continue
        } else {
            VisitorAction::SkipChildren
        }
    }
}

/// Composite visitor that chains multiple visitors.
///
/// Visitors are called in order. The first visitor that returns
/// `SkipChildren` for a node skips its children for the whole chain;
/// later visitors do not see that node.
pub struct CompositeVisitor {
    visitors: Vec<Box<dyn DocumentVisitor>>,
}

impl CompositeVisitor {
    /// Create a new composite visitor.
    pub fn new() -> Self {
        Self {
            visitors: Vec::new(),
        }
    }

    /// Add a visitor to the chain.
    pub fn with_visitor<V: DocumentVisitor + 'static>(mut self, visitor: V) -> Self {
        self.visitors.push(Box::new(visitor));
        self
    }

    /// Number of chained visitors.
    pub fn len(&self) -> usize {
        self.visitors.len()
    }

    /// Check if the chain is empty.
    pub fn is_empty(&self) -> bool {
        self.visitors.is_empty()
    }

    fn first_skip<F>(&mut self, mut visit: F) -> VisitorAction
    where
        F: FnMut(&mut dyn DocumentVisitor) -> VisitorAction,
    {
        for visitor in &mut self.visitors {
            let action = visit(visitor.as_mut());
            if action.should_skip() {
                return action;
            }
        }
        VisitorAction::Continue
    }
}

impl Default for CompositeVisitor {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentVisitor for CompositeVisitor {
    fn visit_page(&mut self, page: &Page) -> VisitorAction {
        self.first_skip(|v| v.visit_page(page))
    }

    fn visit_article(&mut self, article: &Article) -> VisitorAction {
        self.first_skip(|v| v.visit_article(article))
    }

    fn visit_paragraph(&mut self, paragraph: &Paragraph) -> VisitorAction {
        self.first_skip(|v| v.visit_paragraph(paragraph))
    }

    fn visit_line(&mut self, line: &Line) -> VisitorAction {
        self.first_skip(|v| v.visit_line(line))
    }

    fn visit_word(&mut self, word: &Span) {
        for visitor in &mut self.visitors {
            visitor.visit_word(word);
        }
    }

    fn on_page_end(&mut self, page_number: u32) {
        for visitor in &mut self.visitors {
            visitor.on_page_end(page_number);
        }
    }
}
