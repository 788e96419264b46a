//! Build options and configuration.

/// Options for rebuilding a document from a glyph event stream.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Number given to the first page (1-indexed)
    pub start_page: u32,

    /// How to treat events that arrive out of place
    pub error_mode: ErrorMode,
}

impl BuildOptions {
    /// Create new build options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of the first page. Values below 1 are raised to 1.
    pub fn with_start_page(mut self, page: u32) -> Self {
        self.start_page = page.max(1);
        self
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (recover from misplaced events).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Page counter value before the first page starts.
    pub(crate) fn initial_page_counter(&self) -> u32 {
        self.start_page.max(1) - 1
    }
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            start_page: 1,
            error_mode: ErrorMode::Strict,
        }
    }
}

/// Error handling mode while consuming events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Reject glyphs outside a page, nested page starts and stray page ends
    #[default]
    Strict,
    /// Open, close or ignore pages as needed and keep going
    Lenient,
}
