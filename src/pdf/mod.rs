//! PDF analysis: per-page text, statistics, page search and navigation.

mod document;
mod options;
mod parser;
mod selection;

pub use document::{PdfDocument, PdfMetadata, PdfStats};
pub use options::{ErrorMode, PdfOptions};
pub use parser::PdfParser;
pub use selection::PageSelection;

use crate::error::Result;

/// Load a PDF from bytes with lenient page extraction.
pub fn load(data: &[u8]) -> Result<PdfDocument> {
    PdfParser::from_bytes(data)?.parse()
}

/// Load a PDF from bytes with custom options.
pub fn load_with_options(data: &[u8], options: PdfOptions) -> Result<PdfDocument> {
    PdfParser::from_bytes_with_options(data, options)?.parse()
}
