//! Category to markup style mapping.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{Color, MarkupKind, TextCategory};

/// Color and markup subtype used for one category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Style {
    /// Markup color
    pub color: Color,
    /// Markup subtype
    #[serde(default)]
    pub kind: MarkupKind,
}

impl Style {
    /// Style used for categories without a dedicated entry.
    pub const DEFAULT: Style = Style::new(Color::YELLOW, MarkupKind::Highlight);

    /// Create a style.
    pub const fn new(color: Color, kind: MarkupKind) -> Self {
        Self { color, kind }
    }

    /// Built-in style of a category. Total: every input has a style.
    pub fn for_category(category: Option<TextCategory>) -> Style {
        let Some(category) = category else {
            return Style::DEFAULT;
        };
        match category {
            TextCategory::PoorWording => Style::new(Color::RED, MarkupKind::StrikeOut),
            TextCategory::SentenceComplexity => Style::new(Color::MAGENTA, MarkupKind::Underline),
            TextCategory::RepetitiveWording => Style::new(Color::ORANGE, MarkupKind::Highlight),
            TextCategory::Pagination => Style::new(Color::VIOLET, MarkupKind::Highlight),
            TextCategory::TableOfContent => Style::new(Color::ORANGE, MarkupKind::Highlight),
            TextCategory::ListOfAbbreviations => Style::new(Color::GREY, MarkupKind::Underline),
            TextCategory::TableOfFigures => Style::new(Color::DEEP_PINK, MarkupKind::Underline),
            TextCategory::Other => Style::DEFAULT,
        }
    }

    fn validate(&self) -> std::result::Result<(), String> {
        let in_range = |v: f32| (0.0..=1.0).contains(&v);
        if self.color.components().iter().all(|&v| in_range(v)) {
            Ok(())
        } else {
            Err(format!(
                "color ({}, {}, {}) has components outside 0..=1",
                self.color.r, self.color.g, self.color.b
            ))
        }
    }
}

impl Default for Style {
    fn default() -> Self {
        Style::DEFAULT
    }
}

/// Style lookup with optional per-category overrides.
///
/// Overrides are read from JSON keyed by category name:
///
/// ```json
/// {
///   "overrides": {
///     "POOR_WORDING": { "color": { "r": 0.0, "g": 0.0, "b": 1.0 }, "kind": "underline" }
///   },
///   "fallback": { "color": { "r": 0.0, "g": 1.0, "b": 0.0 } }
/// }
/// ```
///
/// Categories without an override use the built-in table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleTable {
    #[serde(default)]
    overrides: HashMap<TextCategory, Style>,
    #[serde(default)]
    fallback: Style,
}

impl StyleTable {
    /// Built-in table with no overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the style of one category.
    pub fn with_override(mut self, category: TextCategory, style: Style) -> Self {
        self.overrides.insert(category, style);
        self
    }

    /// Set the style for findings without a category.
    pub fn with_fallback(mut self, style: Style) -> Self {
        self.fallback = style;
        self
    }

    /// Number of overridden categories.
    pub fn override_count(&self) -> usize {
        self.overrides.len()
    }

    /// Resolve the style of a category.
    pub fn style_for(&self, category: Option<TextCategory>) -> Style {
        match category {
            Some(category) => self
                .overrides
                .get(&category)
                .copied()
                .unwrap_or_else(|| match category {
                    TextCategory::Other => self.fallback,
                    _ => Style::for_category(Some(category)),
                }),
            None => self.fallback,
        }
    }

    /// Parse a table from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let table: StyleTable = serde_json::from_str(json)
            .map_err(|e| Error::ConfigurationDegraded(format!("invalid style table: {}", e)))?;
        table.validate()?;
        Ok(table)
    }

    /// Load a table from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            Error::ConfigurationDegraded(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&json)
    }

    /// Load a table, falling back to the built-in one when loading fails.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::from_json_file(path) {
            Ok(table) => {
                log::debug!("Loaded {} style overrides", table.override_count());
                table
            }
            Err(e) => {
                log::warn!("{}; using built-in styles", e);
                Self::default()
            }
        }
    }

    fn validate(&self) -> Result<()> {
        let overrides = self.overrides.iter().map(|(category, style)| (format!("{:?}", category), style));
        let fallback = std::iter::once(("fallback".to_string(), &self.fallback));
        for (name, style) in overrides.chain(fallback) {
            style
                .validate()
                .map_err(|e| Error::ConfigurationDegraded(format!("style {}: {}", name, e)))?;
        }
        Ok(())
    }
}
