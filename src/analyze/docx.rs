//! Word document analyzer.

use crate::docx::{self, DocxDocument};
use crate::error::Result;

use super::report::{AnalysisReport, DocxReport, Excerpt, SearchHit, WordCount};
use super::{AnalyzeOptions, Analyzer};

/// Analyzer for `.docx` files.
#[derive(Debug, Clone, Default)]
pub struct DocxAnalyzer {
    _private: (),
}

impl DocxAnalyzer {
    /// Create a new DOCX analyzer.
    pub fn new() -> Self {
        Self { _private: () }
    }

    /// Build a report for an already loaded document.
    pub fn report(
        &self,
        doc: &DocxDocument,
        file_name: &str,
        options: &AnalyzeOptions,
    ) -> Result<DocxReport> {
        let query = &options.text;

        let search = match query.term() {
            Some(term) => doc.search(term)?.map(|count| SearchHit {
                term: term.to_string(),
                result: count,
            }),
            None => None,
        };

        let paragraph = match query.selected {
            Some(number) => Some(Excerpt {
                number,
                text: doc.paragraph_at(number)?.to_string(),
            }),
            None => None,
        };

        Ok(DocxReport {
            file_name: file_name.to_string(),
            metadata: doc.metadata.clone(),
            statistics: doc.statistics()?,
            search,
            top_words: doc
                .word_frequency(query.top_words)
                .into_iter()
                .map(|(word, count)| WordCount { word, count })
                .collect(),
            paragraph,
            full_text: query.full_text.then(|| doc.full_text()),
        })
    }
}

impl Analyzer for DocxAnalyzer {
    fn supported_extensions(&self) -> &[&str] {
        &["docx"]
    }

    fn name(&self) -> &str {
        "docx"
    }

    fn analyze_bytes(
        &self,
        bytes: &[u8],
        file_name: &str,
        options: &AnalyzeOptions,
    ) -> Result<AnalysisReport> {
        let doc = docx::load(bytes)?;
        log::debug!("Loaded {} with {} paragraphs", file_name, doc.paragraph_count());
        self.report(&doc, file_name, options).map(AnalysisReport::Docx)
    }
}
