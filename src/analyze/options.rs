//! Parameters supplied with an analysis request.

use crate::pdf::{ErrorMode, PageSelection, PdfOptions};
use crate::raster::{Effect, ImageParams};

/// Default number of entries in a word-frequency table.
pub const DEFAULT_TOP_WORDS: usize = 10;

/// Text-side parameters shared by the DOCX and PDF analyzers.
#[derive(Debug, Clone, PartialEq)]
pub struct TextQuery {
    /// Term to search for; no search when `None` or empty
    pub search_term: Option<String>,

    /// Size of the word-frequency table
    pub top_words: usize,

    /// Paragraph or page to view (1-indexed)
    pub selected: Option<usize>,

    /// Several pages to view at once
    pub pages: Option<PageSelection>,

    /// Include the whole document text
    pub full_text: bool,
}

impl Default for TextQuery {
    fn default() -> Self {
        Self {
            search_term: None,
            top_words: DEFAULT_TOP_WORDS,
            selected: None,
            pages: None,
            full_text: false,
        }
    }
}

impl TextQuery {
    /// The search term, if one was given and is non-empty.
    pub fn term(&self) -> Option<&str> {
        self.search_term.as_deref().filter(|t| !t.is_empty())
    }
}

/// Options for one analysis request.
#[derive(Debug, Clone, Default)]
pub struct AnalyzeOptions {
    /// Search, frequency and navigation parameters
    pub text: TextQuery,

    /// Effect, intensity and zoom
    pub image: ImageParams,

    /// PDF page extraction behavior
    pub pdf: PdfOptions,
}

impl AnalyzeOptions {
    /// Create default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Search for a term.
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.text.search_term = Some(term.into());
        self
    }

    /// Set the word-frequency table size.
    pub fn with_top_words(mut self, n: usize) -> Self {
        self.text.top_words = n;
        self
    }

    /// View one paragraph or page.
    pub fn with_selected(mut self, index: usize) -> Self {
        self.text.selected = Some(index);
        self
    }

    /// View several PDF pages.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.text.pages = Some(pages);
        self
    }

    /// Include the full document text.
    pub fn with_full_text(mut self, full: bool) -> Self {
        self.text.full_text = full;
        self
    }

    /// Replace the image parameters.
    pub fn with_image_params(mut self, params: ImageParams) -> Self {
        self.image = params;
        self
    }

    /// Select an image effect.
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.image.effect = effect;
        self
    }

    /// Set the effect intensity.
    pub fn with_intensity(mut self, intensity: u8) -> Self {
        self.image.intensity = intensity;
        self
    }

    /// Set the image zoom.
    pub fn with_zoom(mut self, zoom: f64) -> Self {
        self.image.zoom = zoom;
        self
    }

    /// Fail on PDF pages whose text cannot be extracted.
    pub fn strict_pdf(mut self) -> Self {
        self.pdf = self.pdf.with_error_mode(ErrorMode::Strict);
        self
    }
}
