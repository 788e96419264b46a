//! Glyph runs and the shared glyph buffer.

use std::ops::Index;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// One positioned text fragment as emitted by the page-content walker.
///
/// Coordinates are in PDF user space: `y` grows upwards from the bottom
/// edge of the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlyphRun {
    /// Unicode text of the fragment
    pub text: String,
    /// X position (left edge)
    pub x: f32,
    /// Y position, measured from the bottom of the page
    pub y: f32,
    /// Advance width of the fragment
    pub width: f32,
    /// Glyph height
    pub height: f32,
    /// Height of the page the fragment was rendered on
    pub page_height: f32,
    /// Owning page number (1-indexed, 0 until the builder records the run)
    #[serde(default)]
    pub page: u32,
}

impl GlyphRun {
    /// Create a new glyph run without a page assignment.
    pub fn new(
        text: impl Into<String>,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        page_height: f32,
    ) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            width,
            height,
            page_height,
            page: 0,
        }
    }

    /// Set the owning page number.
    pub fn on_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Right edge of the fragment.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Number of unicode scalar values in the fragment.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// Immutable, ordered sequence of every glyph run in a document.
///
/// Cloning is cheap: all clones share the same allocation, which is what
/// lets every [`Span`](super::Span) reference the buffer without copying
/// glyph data.
#[derive(Debug, Clone)]
pub struct GlyphBuffer {
    runs: Arc<[GlyphRun]>,
}

impl GlyphBuffer {
    /// Freeze a run list into a shared buffer.
    pub fn new(runs: Vec<GlyphRun>) -> Self {
        Self { runs: runs.into() }
    }

    /// Number of runs in the buffer.
    pub fn len(&self) -> usize {
        self.runs.len()
    }

    /// Check if the buffer holds no runs.
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Get a run by index.
    pub fn get(&self, index: usize) -> Option<&GlyphRun> {
        self.runs.get(index)
    }

    /// All runs as a slice.
    pub fn as_slice(&self) -> &[GlyphRun] {
        &self.runs
    }

    /// Iterate over the runs in reading order.
    pub fn iter(&self) -> std::slice::Iter<'_, GlyphRun> {
        self.runs.iter()
    }

    /// Whether two handles point at the same underlying buffer.
    pub fn same_buffer(&self, other: &GlyphBuffer) -> bool {
        Arc::ptr_eq(&self.runs, &other.runs)
    }
}

impl Default for GlyphBuffer {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl From<Vec<GlyphRun>> for GlyphBuffer {
    fn from(runs: Vec<GlyphRun>) -> Self {
        Self::new(runs)
    }
}

impl Index<usize> for GlyphBuffer {
    type Output = GlyphRun;

    fn index(&self, index: usize) -> &GlyphRun {
        &self.runs[index]
    }
}
