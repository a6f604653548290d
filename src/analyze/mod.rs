//! Analyzer registry dispatching inputs to the DOCX, PDF and image pipelines.
//!
//! # Example
//!
//! ```no_run
//! use docscope::analyze::{AnalyzeOptions, AnalyzerRegistry};
//! use std::path::Path;
//!
//! fn main() -> docscope::Result<()> {
//!     let registry = AnalyzerRegistry::with_defaults();
//!     let options = AnalyzeOptions::new().with_search("revenue");
//!
//!     let report = registry.analyze(Path::new("report.pdf"), &options)?;
//!     println!("{}", docscope::render::to_text(&report));
//!     Ok(())
//! }
//! ```

mod docx;
mod image;
mod options;
mod pdf;
mod report;

pub use self::docx::DocxAnalyzer;
pub use self::image::ImageAnalyzer;
pub use self::pdf::PdfAnalyzer;
pub use options::{AnalyzeOptions, TextQuery, DEFAULT_TOP_WORDS};
pub use report::{
    AnalysisReport, Dimensions, DocxReport, Excerpt, ImageReport, PdfReport, SearchHit, WordCount,
};

use crate::detect::detect_kind_from_bytes;
use crate::error::{Error, Result};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Trait for input analyzers.
///
/// Implement this trait to add support for a new input type.
pub trait Analyzer: Send + Sync {
    /// Get the supported file extensions for this analyzer.
    ///
    /// Extensions should be lowercase without the leading dot (e.g., `["pdf"]`).
    fn supported_extensions(&self) -> &[&str];

    /// Get the name of this analyzer.
    fn name(&self) -> &str;

    /// Analyze a file at the given path.
    fn analyze(&self, path: &Path, options: &AnalyzeOptions) -> Result<AnalysisReport> {
        let bytes = std::fs::read(path)?;
        self.analyze_bytes(&bytes, &display_name(path), options)
    }

    /// Analyze in-memory bytes. `file_name` names the input in the report.
    fn analyze_bytes(
        &self,
        bytes: &[u8],
        file_name: &str,
        options: &AnalyzeOptions,
    ) -> Result<AnalysisReport>;

    /// Check if this analyzer supports the given extension.
    fn supports_extension(&self, ext: &str) -> bool {
        let ext_lower = ext.to_lowercase();
        self.supported_extensions().iter().any(|e| *e == ext_lower)
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Registry for analyzers.
///
/// The registry maps file extensions and analyzer names to analyzers.
pub struct AnalyzerRegistry {
    analyzers: HashMap<String, Arc<dyn Analyzer>>,
    by_name: HashMap<String, Arc<dyn Analyzer>>,
}

impl AnalyzerRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            analyzers: HashMap::new(),
            by_name: HashMap::new(),
        }
    }

    /// Create a registry with the DOCX, PDF and image analyzers.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(DocxAnalyzer::new()));
        registry.register(Arc::new(PdfAnalyzer::new()));
        registry.register(Arc::new(ImageAnalyzer::new()));
        registry
    }

    /// Register an analyzer.
    ///
    /// The analyzer will be registered for all its supported extensions.
    pub fn register(&mut self, analyzer: Arc<dyn Analyzer>) {
        for ext in analyzer.supported_extensions() {
            self.analyzers.insert(ext.to_lowercase(), analyzer.clone());
        }
        self.by_name.insert(analyzer.name().to_lowercase(), analyzer);
    }

    /// Get an analyzer by file extension.
    pub fn get_by_extension(&self, ext: &str) -> Option<Arc<dyn Analyzer>> {
        self.analyzers.get(&ext.to_lowercase()).cloned()
    }

    /// Get an analyzer by name.
    pub fn get_by_name(&self, name: &str) -> Option<Arc<dyn Analyzer>> {
        self.by_name.get(&name.to_lowercase()).cloned()
    }

    /// Check if an extension is supported.
    pub fn supports(&self, ext: &str) -> bool {
        self.analyzers.contains_key(&ext.to_lowercase())
    }

    /// Get all supported extensions, sorted.
    pub fn supported_extensions(&self) -> Vec<&str> {
        let mut exts: Vec<&str> = self.analyzers.keys().map(|s| s.as_str()).collect();
        exts.sort_unstable();
        exts
    }

    /// Analyze a file using the analyzer for its extension.
    pub fn analyze(&self, path: &Path, options: &AnalyzeOptions) -> Result<AnalysisReport> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or(Error::UnknownFormat)?;

        let analyzer = self.get_by_extension(ext).ok_or(Error::UnknownFormat)?;
        log::debug!("Analyzing {} with the {} analyzer", path.display(), analyzer.name());
        analyzer.analyze(path, options)
    }

    /// Analyze bytes using `ext` to pick the analyzer.
    pub fn analyze_bytes(
        &self,
        bytes: &[u8],
        ext: &str,
        file_name: &str,
        options: &AnalyzeOptions,
    ) -> Result<AnalysisReport> {
        let analyzer = self.get_by_extension(ext).ok_or(Error::UnknownFormat)?;
        analyzer.analyze_bytes(bytes, file_name, options)
    }

    /// Analyze bytes, picking the analyzer from their content.
    pub fn analyze_detected(
        &self,
        bytes: &[u8],
        file_name: &str,
        options: &AnalyzeOptions,
    ) -> Result<AnalysisReport> {
        let kind = detect_kind_from_bytes(bytes)?;
        let analyzer = self
            .get_by_name(kind.analyzer_name())
            .ok_or(Error::UnknownFormat)?;
        log::debug!("Detected {} in {}", kind, file_name);
        analyzer.analyze_bytes(bytes, file_name, options)
    }
}

impl Default for AnalyzerRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
