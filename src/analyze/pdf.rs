//! PDF analyzer.

use crate::error::Result;
use crate::pdf::{self, PdfDocument};

use super::report::{AnalysisReport, Excerpt, PdfReport, SearchHit};
use super::{AnalyzeOptions, Analyzer};

/// Analyzer for `.pdf` files.
#[derive(Debug, Clone, Default)]
pub struct PdfAnalyzer {
    _private: (),
}

impl PdfAnalyzer {
    /// Create a new PDF analyzer.
    pub fn new() -> Self {
        Self { _private: () }
    }

    /// Build a report for an already loaded document.
    ///
    /// A single selected page takes precedence over a page selection.
    pub fn report(
        &self,
        doc: &PdfDocument,
        file_name: &str,
        options: &AnalyzeOptions,
    ) -> Result<PdfReport> {
        let query = &options.text;

        let search = match query.term() {
            Some(term) => doc.search(term)?.map(|pages| SearchHit {
                term: term.to_string(),
                result: pages,
            }),
            None => None,
        };

        let pages = match (query.selected, &query.pages) {
            (Some(number), _) => vec![Excerpt {
                number,
                text: doc.page_at(number)?.to_string(),
            }],
            (None, Some(selection)) => doc
                .pages_in(selection)?
                .into_iter()
                .map(|(number, text)| Excerpt {
                    number,
                    text: text.to_string(),
                })
                .collect(),
            (None, None) => Vec::new(),
        };

        Ok(PdfReport {
            file_name: file_name.to_string(),
            metadata: doc.metadata.clone(),
            statistics: doc.statistics()?,
            search,
            pages,
        })
    }
}

impl Analyzer for PdfAnalyzer {
    fn supported_extensions(&self) -> &[&str] {
        &["pdf"]
    }

    fn name(&self) -> &str {
        "pdf"
    }

    fn analyze_bytes(
        &self,
        bytes: &[u8],
        file_name: &str,
        options: &AnalyzeOptions,
    ) -> Result<AnalysisReport> {
        let doc = pdf::load_with_options(bytes, options.pdf.clone())?;
        log::debug!("Loaded {} with {} pages", file_name, doc.page_count());
        self.report(&doc, file_name, options).map(AnalysisReport::Pdf)
    }
}
