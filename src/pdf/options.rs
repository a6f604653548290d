//! PDF loading options.

/// Options for loading PDF documents.
#[derive(Debug, Clone, Default)]
pub struct PdfOptions {
    /// How page-level text extraction failures are handled
    pub error_mode: ErrorMode,
}

impl PdfOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Fail the whole load when a page's text cannot be extracted.
    pub fn strict(mut self) -> Self {
        self.error_mode = ErrorMode::Strict;
        self
    }

    /// Substitute an empty string for pages whose text cannot be extracted.
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }
}

/// Error handling mode for per-page text extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on the first page that cannot be extracted
    Strict,
    /// Log the failure and keep an empty page text
    #[default]
    Lenient,
}
