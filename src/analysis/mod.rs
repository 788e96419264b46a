//! Analyzer plumbing.
//!
//! Analyzers read a finished [`Document`] and return [`Finding`]s. They are
//! registered by name in an [`AnalyzerRegistry`] built by the caller, and
//! selected by name at run time.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use glyphmark::analysis::{AnalyzerRegistry, TextAnalyzer};
//! use glyphmark::model::{Document, Finding, TextCategory, TextFinding};
//!
//! struct LongWords;
//!
//! impl TextAnalyzer for LongWords {
//!     fn name(&self) -> &str {
//!         "Long words"
//!     }
//!
//!     fn run(&self, doc: &Document) -> Vec<Finding> {
//!         doc.words()
//!             .filter(|word| word.glyph_count() > 12)
//!             .map(|word| TextFinding::new(TextCategory::SentenceComplexity, word.clone()).into())
//!             .collect()
//!     }
//! }
//!
//! let mut registry = AnalyzerRegistry::new();
//! registry.register(Arc::new(LongWords));
//! let findings = registry.run_selected(&Document::default(), &["long words"]).unwrap();
//! assert!(findings.is_empty());
//! ```

mod visitor;

pub use visitor::{walk, CompositeVisitor, ContentPagesOnly, DocumentVisitor, VisitorAction};

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::model::{Document, Finding};

/// A named analysis over a finished document.
pub trait TextAnalyzer: Send + Sync {
    /// Name used to select the analyzer.
    fn name(&self) -> &str;

    /// Run the analysis.
    fn run(&self, doc: &Document) -> Vec<Finding>;
}

/// Registry for text analyzers.
///
/// Lookup by name is case-insensitive. Analyzers run in registration order.
#[derive(Default)]
pub struct AnalyzerRegistry {
    analyzers: Vec<Arc<dyn TextAnalyzer>>,
    by_name: HashMap<String, usize>,
}

impl AnalyzerRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an analyzer.
    ///
    /// An analyzer with the same name replaces the earlier one in place.
    pub fn register(&mut self, analyzer: Arc<dyn TextAnalyzer>) {
        let key = analyzer.name().to_lowercase();
        match self.by_name.get(&key) {
            Some(&index) => {
                log::debug!("Replacing analyzer '{}'", analyzer.name());
                self.analyzers[index] = analyzer;
            }
            None => {
                self.by_name.insert(key, self.analyzers.len());
                self.analyzers.push(analyzer);
            }
        }
    }

    /// Get an analyzer by name.
    pub fn get_by_name(&self, name: &str) -> Option<Arc<dyn TextAnalyzer>> {
        self.by_name
            .get(&name.to_lowercase())
            .map(|&index| Arc::clone(&self.analyzers[index]))
    }

    /// Names of all analyzers in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.analyzers.iter().map(|a| a.name()).collect()
    }

    /// Number of registered analyzers.
    pub fn len(&self) -> usize {
        self.analyzers.len()
    }

    /// Check if no analyzer is registered.
    pub fn is_empty(&self) -> bool {
        self.analyzers.is_empty()
    }

    /// Run the named analyzers and collect their findings.
    ///
    /// Analyzers run in registration order regardless of the order of
    /// `names`. An unknown name fails before anything runs.
    pub fn run_selected<S: AsRef<str>>(&self, doc: &Document, names: &[S]) -> Result<Vec<Finding>> {
        let mut selected = vec![false; self.analyzers.len()];
        for name in names {
            let name = name.as_ref();
            let index = self
                .by_name
                .get(&name.to_lowercase())
                .ok_or_else(|| Error::Other(format!("No analyzer named: {}", name)))?;
            selected[*index] = true;
        }

        let mut findings = Vec::new();
        for (analyzer, on) in self.analyzers.iter().zip(selected) {
            if !on {
                continue;
            }
            let produced = analyzer.run(doc);
            log::debug!("Analyzer '{}' produced {} findings", analyzer.name(), produced.len());
            findings.extend(produced);
        }
        Ok(findings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CommentaryFinding, TextCategory, TextFinding};

    struct Fixed(&'static str, usize);

    impl TextAnalyzer for Fixed {
        fn name(&self) -> &str {
            self.0
        }

        fn run(&self, _doc: &Document) -> Vec<Finding> {
            (0..self.1)
                .map(|_| CommentaryFinding::new(self.0, "Fixed", 0, 0).into())
                .collect()
        }
    }

    fn registry() -> AnalyzerRegistry {
        let mut registry = AnalyzerRegistry::new();
        registry.register(Arc::new(Fixed("Wording", 1)));
        registry.register(Arc::new(Fixed("Pagination", 2)));
        registry
    }

    #[test]
    fn test_registry_get_by_name() {
        let registry = registry();
        assert!(registry.get_by_name("WORDING").is_some());
        assert!(registry.get_by_name("pagination").is_some());
        assert!(registry.get_by_name("missing").is_none());
        assert_eq!(registry.names(), vec!["Wording", "Pagination"]);
    }

    #[test]
    fn test_run_selected_keeps_registration_order() {
        let registry = registry();
        let findings = registry
            .run_selected(&Document::default(), &["pagination", "wording"])
            .unwrap();
        let messages: Vec<&str> = findings
            .iter()
            .map(|f| match f {
                Finding::Commentary(c) => c.message.as_str(),
                _ => "",
            })
            .collect();
        assert_eq!(messages, vec!["Wording", "Pagination", "Pagination"]);
    }

    #[test]
    fn test_run_selected_unknown_name() {
        let registry = registry();
        let err = registry
            .run_selected(&Document::default(), &["Wording", "Nope"])
            .unwrap_err();
        assert!(err.to_string().contains("Nope"));
    }

    #[test]
    fn test_register_replaces_same_name() {
        let mut registry = registry();
        registry.register(Arc::new(Fixed("wording", 0)));
        assert_eq!(registry.len(), 2);
        let findings = registry
            .run_selected(&Document::default(), &["Wording"])
            .unwrap();
        assert!(findings.is_empty());
    }

    #[test]
    fn test_text_findings_pass_through() {
        struct NotFound;
        impl TextAnalyzer for NotFound {
            fn name(&self) -> &str {
                "not found"
            }
            fn run(&self, _doc: &Document) -> Vec<Finding> {
                vec![TextFinding::not_found(TextCategory::TableOfContent).into()]
            }
        }

        let mut registry = AnalyzerRegistry::new();
        registry.register(Arc::new(NotFound));
        let findings = registry
            .run_selected(&Document::default(), &["Not Found"])
            .unwrap();
        assert!(findings[0].is_text());
    }
}
