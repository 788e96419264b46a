//! Document model types for reconstructed text.
//!
//! Every word in the tree is a [`Span`] over one shared [`GlyphBuffer`];
//! lines, paragraphs, articles and pages only group spans. Findings point
//! back into the same buffer, and annotations hang off the pages.

mod annotation;
mod document;
mod finding;
mod geometry;
mod glyph;
mod page;
mod paragraph;
mod span;

pub use annotation::{Annotation, Color, MarkupKind};
pub use document::{Document, StructureStats};
pub use finding::{
    CommentaryFinding, Finding, StatisticDatum, StatisticFinding, StatisticKind, TextCategory,
    TextFinding,
};
pub use geometry::Rect;
pub use glyph::{GlyphBuffer, GlyphRun};
pub use page::{Article, Page};
pub use paragraph::{Line, Paragraph};
pub use span::{is_bullet_char, is_punctuation_char, Span, HEIGHT_PADDING};
