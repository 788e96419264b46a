//! Analysis findings produced by consumers of the document tree.
//!
//! Findings come in three kinds, each with its own payload. Only
//! [`TextFinding`]s carry a location and become overlay annotations; the
//! other kinds pass through to whoever charts or displays them.

use serde::{Deserialize, Serialize};

use super::Span;

/// Category of a located text finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TextCategory {
    /// Wording that should be avoided
    PoorWording,
    /// Overly complex sentence
    SentenceComplexity,
    /// Same wording used repeatedly
    RepetitiveWording,
    /// Page numbering problem
    Pagination,
    /// Table of contents entry
    TableOfContent,
    /// List of abbreviations entry
    ListOfAbbreviations,
    /// Table of figures entry
    TableOfFigures,
    /// Any category without a dedicated style
    #[serde(other)]
    Other,
}

impl TextCategory {
    /// Every category, in declaration order.
    pub const ALL: [TextCategory; 8] = [
        TextCategory::PoorWording,
        TextCategory::SentenceComplexity,
        TextCategory::RepetitiveWording,
        TextCategory::Pagination,
        TextCategory::TableOfContent,
        TextCategory::ListOfAbbreviations,
        TextCategory::TableOfFigures,
        TextCategory::Other,
    ];
}

/// A finding that points at a region of text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextFinding {
    /// Finding category (`None` when the analyzer gave none)
    pub category: Option<TextCategory>,
    /// 1-based page number, 0 when not located
    pub page_index: u32,
    /// Text region, when located
    pub span: Option<Span>,
}

impl TextFinding {
    /// Create a finding located at `span`.
    pub fn new(category: impl Into<Option<TextCategory>>, span: Span) -> Self {
        Self {
            category: category.into(),
            page_index: span.page_index(),
            span: Some(span),
        }
    }

    /// Create a finding with no location.
    pub fn not_found(category: impl Into<Option<TextCategory>>) -> Self {
        Self {
            category: category.into(),
            page_index: 0,
            span: None,
        }
    }

    /// Page and span, or `None` for the "not located" sentinel.
    pub fn location(&self) -> Option<(u32, &Span)> {
        match &self.span {
            Some(span) if self.page_index > 0 => Some((self.page_index, span)),
            _ => None,
        }
    }
}

/// Kind of statistical analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatisticKind {
    /// Foreign words found in the text
    ForeignWords,
    /// Word frequency histogram
    VocabularyDistribution,
    /// Punctuation frequency histogram
    PunctuationDistribution,
    /// Frequently used abbreviations
    CommonAbbreviation,
    /// Frequently used foreign words
    CommonForeignWord,
    /// Flagged wording counts
    Wording,
    /// Sentence length distribution
    SentenceComplexity,
}

impl StatisticKind {
    /// Chart title for the histogram.
    pub fn chart_title(&self) -> &'static str {
        match self {
            StatisticKind::ForeignWords | StatisticKind::CommonForeignWord => "Foreign words",
            StatisticKind::VocabularyDistribution => "Vocabulary distribution",
            StatisticKind::PunctuationDistribution => "Punctuation distribution",
            StatisticKind::CommonAbbreviation => "Common abbreviations",
            StatisticKind::Wording => "Wording",
            StatisticKind::SentenceComplexity => "Sentence complexity",
        }
    }

    /// `(x, y)` axis labels for the histogram.
    pub fn axis_labels(&self) -> (&'static str, &'static str) {
        match self {
            StatisticKind::ForeignWords | StatisticKind::CommonForeignWord => {
                ("Foreign word", "Occurrences")
            }
            StatisticKind::VocabularyDistribution => ("Word", "Occurrences"),
            StatisticKind::PunctuationDistribution => ("Punctuation mark", "Occurrences"),
            StatisticKind::CommonAbbreviation => ("Abbreviation", "Occurrences"),
            StatisticKind::Wording => ("Wording", "Occurrences"),
            StatisticKind::SentenceComplexity => ("Words per sentence", "Sentences"),
        }
    }
}

/// One bar of a histogram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticDatum {
    /// Bar label
    pub label: String,
    /// Bar value
    pub value: f64,
}

/// Result of a statistical analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticFinding {
    /// Kind of statistic
    pub kind: StatisticKind,
    /// Data points in insertion order
    pub data: Vec<StatisticDatum>,
    /// Whether consumers should sort by value before charting
    pub sort: bool,
}

impl StatisticFinding {
    /// Create an empty, sorted statistic.
    pub fn new(kind: StatisticKind) -> Self {
        Self {
            kind,
            data: Vec::new(),
            sort: true,
        }
    }

    /// Append a data point.
    pub fn push(&mut self, label: impl Into<String>, value: f64) {
        self.data.push(StatisticDatum {
            label: label.into(),
            value,
        });
    }

    /// Data in chart order: descending by value when `sort` is set.
    pub fn chart_data(&self) -> Vec<&StatisticDatum> {
        let mut data: Vec<&StatisticDatum> = self.data.iter().collect();
        if self.sort {
            data.sort_by(|a, b| b.value.total_cmp(&a.value));
        }
        data
    }
}

/// A free-form remark about the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentaryFinding {
    /// Message shown to the user
    pub message: String,
    /// Machine-readable kind, e.g. `DeclarationOfSincerity`
    pub kind: String,
    /// 1-based page number, 0 when not located
    pub page: u32,
    /// Line on the page, 0 when not located
    pub line: u32,
}

impl CommentaryFinding {
    /// Create a commentary finding.
    pub fn new(message: impl Into<String>, kind: impl Into<String>, page: u32, line: u32) -> Self {
        Self {
            message: message.into(),
            kind: kind.into(),
            page,
            line,
        }
    }
}

/// Any result produced by an analyzer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Finding {
    /// Located text region
    Text(TextFinding),
    /// Histogram data
    Statistic(StatisticFinding),
    /// Free-form remark
    Commentary(CommentaryFinding),
}

impl Finding {
    /// The text payload, if this is a text finding.
    pub fn as_text(&self) -> Option<&TextFinding> {
        match self {
            Finding::Text(finding) => Some(finding),
            _ => None,
        }
    }

    /// Check if this is a text finding.
    pub fn is_text(&self) -> bool {
        matches!(self, Finding::Text(_))
    }
}

impl From<TextFinding> for Finding {
    fn from(finding: TextFinding) -> Self {
        Finding::Text(finding)
    }
}

impl From<StatisticFinding> for Finding {
    fn from(finding: StatisticFinding) -> Self {
        Finding::Statistic(finding)
    }
}

impl From<CommentaryFinding> for Finding {
    fn from(finding: CommentaryFinding) -> Self {
        Finding::Commentary(finding)
    }
}
