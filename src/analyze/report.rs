//! Serializable analysis reports.

use serde::Serialize;

use crate::docx::{DocxMetadata, DocxStats};
use crate::pdf::{PdfMetadata, PdfStats};
use crate::raster::{DownloadArtifact, Effect, Histogram, ImageInfo};

/// Output of one analyzer run.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum AnalysisReport {
    /// Word document report
    Docx(DocxReport),
    /// PDF report
    Pdf(PdfReport),
    /// Image report
    Image(ImageReport),
}

impl AnalysisReport {
    /// Name of the input the report was built from.
    pub fn file_name(&self) -> &str {
        match self {
            AnalysisReport::Docx(r) => &r.file_name,
            AnalysisReport::Pdf(r) => &r.file_name,
            AnalysisReport::Image(r) => &r.file_name,
        }
    }

    /// The DOCX report, if this is one.
    pub fn as_docx(&self) -> Option<&DocxReport> {
        match self {
            AnalysisReport::Docx(r) => Some(r),
            _ => None,
        }
    }

    /// The PDF report, if this is one.
    pub fn as_pdf(&self) -> Option<&PdfReport> {
        match self {
            AnalysisReport::Pdf(r) => Some(r),
            _ => None,
        }
    }

    /// The image report, if this is one.
    pub fn as_image(&self) -> Option<&ImageReport> {
        match self {
            AnalysisReport::Image(r) => Some(r),
            _ => None,
        }
    }
}

/// A search term and what it matched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit<T> {
    /// The term searched for
    pub term: String,

    /// Occurrence count or matching page numbers
    pub result: T,
}

/// One word-frequency entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordCount {
    /// The token
    pub word: String,

    /// Number of occurrences
    pub count: usize,
}

/// A numbered paragraph or page text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Excerpt {
    /// 1-indexed paragraph or page number
    pub number: usize,

    /// Its text
    pub text: String,
}

/// Report for a Word document.
#[derive(Debug, Clone, Serialize)]
pub struct DocxReport {
    /// Input file name
    pub file_name: String,

    /// Core properties
    pub metadata: DocxMetadata,

    /// Counts over every paragraph
    pub statistics: DocxStats,

    /// Search result, when a term was given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<SearchHit<usize>>,

    /// Most frequent words
    pub top_words: Vec<WordCount>,

    /// The selected paragraph
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paragraph: Option<Excerpt>,

    /// Every paragraph joined by newlines
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_text: Option<String>,
}

/// Report for a PDF.
#[derive(Debug, Clone, Serialize)]
pub struct PdfReport {
    /// Input file name
    pub file_name: String,

    /// Info dictionary and header data
    pub metadata: PdfMetadata,

    /// Counts over every page
    pub statistics: PdfStats,

    /// Pages containing the term, when a term was given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<SearchHit<Vec<usize>>>,

    /// Selected page texts
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub pages: Vec<Excerpt>,
}

/// Width and height in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dimensions {
    /// Width in pixels
    pub width: u32,

    /// Height in pixels
    pub height: u32,
}

/// Report for an image.
#[derive(Debug, Clone, Serialize)]
pub struct ImageReport {
    /// Input file name
    pub file_name: String,

    /// Metadata of the decoded image
    pub info: ImageInfo,

    /// Effect that was applied
    pub effect: Effect,

    /// Intensity used by the effect
    pub intensity: u8,

    /// Zoom factor
    pub zoom: f64,

    /// Size of the zoomed view
    pub display: Dimensions,

    /// Channel counts for the histogram effect
    #[serde(skip_serializing_if = "Option::is_none")]
    pub histogram: Option<Histogram>,

    /// Encoded processed image, when the effect produced one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download: Option<DownloadArtifact>,
}
