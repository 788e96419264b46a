//! Overlay annotations attached to pages.

use serde::{Deserialize, Serialize};

use super::{Rect, TextCategory};

/// RGB color with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red component
    pub r: f32,
    /// Green component
    pub g: f32,
    /// Blue component
    pub b: f32,
}

impl Color {
    /// Red
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    /// Magenta
    pub const MAGENTA: Color = Color::rgb(1.0, 0.0, 1.0);
    /// Orange (CSS orange)
    pub const ORANGE: Color = Color::rgb(1.0, 0.647, 0.0);
    /// Violet (CSS violet)
    pub const VIOLET: Color = Color::rgb(0.933, 0.51, 0.933);
    /// Grey
    pub const GREY: Color = Color::rgb(0.5, 0.5, 0.5);
    /// Deep pink (CSS deeppink)
    pub const DEEP_PINK: Color = Color::rgb(1.0, 0.078, 0.576);
    /// Yellow
    pub const YELLOW: Color = Color::rgb(1.0, 1.0, 0.0);

    /// Create a color from RGB components.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Components as a PDF `/C` array.
    pub fn components(&self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// Hex representation, e.g. `#FFA500`.
    pub fn to_hex(&self) -> String {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02X}{:02X}{:02X}",
            channel(self.r),
            channel(self.g),
            channel(self.b)
        )
    }
}

/// Text markup subtype of an annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkupKind {
    /// Marker-style background
    #[default]
    Highlight,
    /// Line under the text
    Underline,
    /// Line through the text
    StrikeOut,
}

impl MarkupKind {
    /// PDF `/Subtype` name for this markup.
    pub fn pdf_name(&self) -> &'static str {
        match self {
            MarkupKind::Highlight => "Highlight",
            MarkupKind::Underline => "Underline",
            MarkupKind::StrikeOut => "StrikeOut",
        }
    }
}

/// A markup annotation placed on a page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotation {
    /// Bounding rectangle computed from the finding's span
    pub rect: Rect,
    /// Quad points covering `rect`
    pub quad_points: [f32; 8],
    /// Markup color
    pub color: Color,
    /// Markup subtype
    pub kind: MarkupKind,
    /// Constant opacity (1.0 = opaque)
    pub opacity: f32,
    /// Category of the finding that produced the annotation
    pub category: Option<TextCategory>,
}

impl Annotation {
    /// Create an opaque annotation covering `rect`.
    pub fn new(rect: Rect, color: Color, kind: MarkupKind) -> Self {
        Self {
            rect,
            quad_points: rect.quad_points(),
            color,
            kind,
            opacity: 1.0,
            category: None,
        }
    }

    /// Set the opacity.
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    /// Record the originating category.
    pub fn with_category(mut self, category: Option<TextCategory>) -> Self {
        self.category = category;
        self
    }
}
