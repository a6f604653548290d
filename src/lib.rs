//! # docscope
//!
//! Quick analysis of Word documents, PDFs and images.
//!
//! Each input type has its own stateless pipeline. Bytes go in, typed
//! results come out: paragraph and page statistics, case-insensitive search,
//! word frequencies, image metadata and a small set of image effects.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docscope::{analyze_file, render, AnalyzeOptions};
//!
//! fn main() -> docscope::Result<()> {
//!     let options = AnalyzeOptions::new().with_search("budget").with_top_words(5);
//!     let report = analyze_file("minutes.docx", &options)?;
//!     println!("{}", render::to_text(&report));
//!     Ok(())
//! }
//! ```
//!
//! ## Pipelines
//!
//! - [`docx`]: paragraphs, statistics, search, word frequency, navigation
//! - [`pdf`]: per-page text, statistics, page search, navigation
//! - [`raster`]: metadata, grayscale, histogram, edges, blur, zoom, download

pub mod analyze;
pub mod detect;
pub mod docx;
pub mod error;
pub mod pdf;
pub mod raster;
pub mod render;
pub mod text;

// Re-export commonly used types
pub use analyze::{
    AnalysisReport, AnalyzeOptions, Analyzer, AnalyzerRegistry, DocxAnalyzer, ImageAnalyzer,
    PdfAnalyzer, TextQuery,
};
pub use detect::{detect_kind_from_bytes, detect_kind_from_path, InputKind};
pub use docx::{DocxDocument, DocxMetadata, DocxStats};
pub use error::{Error, ErrorKind, Result};
pub use pdf::{ErrorMode, PageSelection, PdfDocument, PdfMetadata, PdfOptions, PdfStats};
pub use raster::{
    DownloadArtifact, Effect, EffectOutcome, Histogram, ImageInfo, ImageParams, PixelMode, Raster,
};
pub use render::JsonFormat;

use std::path::Path;

/// Load a Word document from a file.
///
/// # Example
///
/// ```no_run
/// let doc = docscope::load_docx("notes.docx").unwrap();
/// println!("{:?}", doc.statistics());
/// ```
pub fn load_docx<P: AsRef<Path>>(path: P) -> Result<DocxDocument> {
    docx::DocxReader::open(path)?.read()
}

/// Load a PDF from a file with lenient page extraction.
///
/// # Example
///
/// ```no_run
/// let doc = docscope::load_pdf("paper.pdf").unwrap();
/// println!("{} pages", doc.page_count());
/// ```
pub fn load_pdf<P: AsRef<Path>>(path: P) -> Result<PdfDocument> {
    pdf::PdfParser::open(path)?.parse()
}

/// Load a PDF from a file with custom options.
pub fn load_pdf_with_options<P: AsRef<Path>>(path: P, options: PdfOptions) -> Result<PdfDocument> {
    pdf::PdfParser::open_with_options(path, options)?.parse()
}

/// Decode an image file.
///
/// # Example
///
/// ```no_run
/// let image = docscope::load_image("photo.jpg").unwrap();
/// println!("{}x{}", image.width(), image.height());
/// ```
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<Raster> {
    let data = std::fs::read(path)?;
    raster::load(&data)
}

/// Analyze a file, choosing the pipeline by its extension.
pub fn analyze_file<P: AsRef<Path>>(path: P, options: &AnalyzeOptions) -> Result<AnalysisReport> {
    AnalyzerRegistry::with_defaults().analyze(path.as_ref(), options)
}

/// Analyze bytes, choosing the pipeline by their content.
///
/// # Example
///
/// ```no_run
/// use docscope::{analyze_bytes, AnalyzeOptions};
///
/// let data = std::fs::read("upload.bin").unwrap();
/// let report = analyze_bytes(&data, "upload.bin", &AnalyzeOptions::default()).unwrap();
/// println!("{}", report.file_name());
/// ```
pub fn analyze_bytes(
    data: &[u8],
    file_name: &str,
    options: &AnalyzeOptions,
) -> Result<AnalysisReport> {
    AnalyzerRegistry::with_defaults().analyze_detected(data, file_name, options)
}

/// Builder for analyzing inputs.
///
/// # Example
///
/// ```no_run
/// use docscope::{Docscope, Effect};
///
/// let summary = Docscope::new()
///     .with_effect(Effect::Grayscale)
///     .analyze("photo.png")?
///     .to_text();
/// # Ok::<(), docscope::Error>(())
/// ```
pub struct Docscope {
    registry: AnalyzerRegistry,
    options: AnalyzeOptions,
}

impl Docscope {
    /// Create a builder with the default analyzers.
    pub fn new() -> Self {
        Self {
            registry: AnalyzerRegistry::with_defaults(),
            options: AnalyzeOptions::default(),
        }
    }

    /// Search for a term.
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.options = self.options.with_search(term);
        self
    }

    /// Set the word-frequency table size.
    pub fn with_top_words(mut self, n: usize) -> Self {
        self.options = self.options.with_top_words(n);
        self
    }

    /// View one paragraph or page.
    pub fn with_selected(mut self, index: usize) -> Self {
        self.options = self.options.with_selected(index);
        self
    }

    /// Select an image effect.
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.options = self.options.with_effect(effect);
        self
    }

    /// Set the effect intensity.
    pub fn with_intensity(mut self, intensity: u8) -> Self {
        self.options = self.options.with_intensity(intensity);
        self
    }

    /// Set the image zoom.
    pub fn with_zoom(mut self, zoom: f64) -> Self {
        self.options = self.options.with_zoom(zoom);
        self
    }

    /// Fail on PDF pages whose text cannot be extracted.
    pub fn strict(mut self) -> Self {
        self.options = self.options.strict_pdf();
        self
    }

    /// Register an additional analyzer.
    pub fn with_analyzer(mut self, analyzer: std::sync::Arc<dyn Analyzer>) -> Self {
        self.registry.register(analyzer);
        self
    }

    /// The options built so far.
    pub fn options(&self) -> &AnalyzeOptions {
        &self.options
    }

    /// Analyze a file by extension.
    pub fn analyze<P: AsRef<Path>>(&self, path: P) -> Result<Analysis> {
        let report = self.registry.analyze(path.as_ref(), &self.options)?;
        Ok(Analysis { report })
    }

    /// Analyze bytes by content.
    pub fn analyze_bytes(&self, data: &[u8], file_name: &str) -> Result<Analysis> {
        let report = self
            .registry
            .analyze_detected(data, file_name, &self.options)?;
        Ok(Analysis { report })
    }
}

impl Default for Docscope {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of an analysis.
pub struct Analysis {
    /// The report
    pub report: AnalysisReport,
}

impl Analysis {
    /// Render a human-readable summary.
    pub fn to_text(&self) -> String {
        render::to_text(&self.report)
    }

    /// Render as JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.report, format)
    }

    /// Get the report.
    pub fn report(&self) -> &AnalysisReport {
        &self.report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let builder = Docscope::new()
            .with_search("rust")
            .with_top_words(3)
            .with_effect(Effect::Blur)
            .with_intensity(2)
            .strict();

        assert_eq!(builder.options().text.term(), Some("rust"));
        assert_eq!(builder.options().text.top_words, 3);
        assert_eq!(builder.options().image.effect, Effect::Blur);
        assert_eq!(builder.options().pdf.error_mode, ErrorMode::Strict);
    }

    // ==================== Edge Case Tests ====================

    #[test]
    fn test_analyze_bytes_empty_data() {
        let result = analyze_bytes(&[], "empty", &AnalyzeOptions::default());
        assert!(matches!(result, Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_analyze_bytes_truncated_pdf_header() {
        let result = analyze_bytes(b"%PDF", "x.pdf", &AnalyzeOptions::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_analyze_bytes_html() {
        let data = b"<!DOCTYPE html><html></html>";
        let result = Docscope::new().analyze_bytes(data, "page.html");
        assert!(matches!(result, Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_analyze_bytes_zip_without_document() {
        let result = analyze_bytes(b"PK\x03\x04garbage", "x.zip", &AnalyzeOptions::default());
        assert!(matches!(result, Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_pdf("/nonexistent/file.pdf").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
        assert!(load_image("/nonexistent/file.png").is_err());
    }
}
