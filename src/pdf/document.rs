//! PDF document model and page statistics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::text::{self, TermMatcher};

use super::PageSelection;

/// A loaded PDF: extracted text per page, in page order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PdfDocument {
    /// Document metadata (title, author, etc.)
    pub metadata: PdfMetadata,

    /// Best-effort text of each page; empty when nothing was extracted
    pub pages: Vec<String>,
}

impl PdfDocument {
    /// Create a document from page texts.
    pub fn new<I, S>(pages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            metadata: PdfMetadata::default(),
            pages: pages.into_iter().map(Into::into).collect(),
        }
    }

    /// Get the number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Check if the document has any pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Statistics over all pages.
    ///
    /// Words are counted over the page texts concatenated without a
    /// separator.
    pub fn statistics(&self) -> Result<PdfStats> {
        let word_count = text::word_count(&self.pages.concat());
        let avg_words_per_page = text::average(word_count, self.pages.len(), "PDF")?;

        Ok(PdfStats {
            page_count: self.pages.len(),
            word_count,
            avg_words_per_page,
        })
    }

    /// Page numbers (1-indexed) whose text contains `term`, ignoring case.
    ///
    /// Returns `None` for an empty term and `Some(vec![])` when no page
    /// matches.
    pub fn search(&self, term: &str) -> Result<Option<Vec<usize>>> {
        let Some(matcher) = TermMatcher::new(term)? else {
            return Ok(None);
        };
        let pages = self
            .pages
            .iter()
            .enumerate()
            .filter(|(_, page)| matcher.is_match(page))
            .map(|(i, _)| i + 1)
            .collect();
        Ok(Some(pages))
    }

    /// Get a page's text by number (1-indexed).
    pub fn page_at(&self, page_num: usize) -> Result<&str> {
        if page_num == 0 || page_num > self.pages.len() {
            return Err(Error::PageOutOfRange(page_num, self.pages.len()));
        }
        Ok(&self.pages[page_num - 1])
    }

    /// Selected pages as `(page_number, text)` pairs.
    pub fn pages_in(&self, selection: &PageSelection) -> Result<Vec<(usize, &str)>> {
        selection
            .resolve(self.pages.len())?
            .into_iter()
            .map(|n| self.page_at(n).map(|text| (n, text)))
            .collect()
    }

    /// Get plain text content of the entire document.
    pub fn plain_text(&self) -> String {
        self.pages.join("\n\n")
    }
}

/// Document metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PdfMetadata {
    /// Document title
    pub title: Option<String>,

    /// Document author
    pub author: Option<String>,

    /// Document subject
    pub subject: Option<String>,

    /// Keywords
    pub keywords: Option<String>,

    /// Creator application
    pub creator: Option<String>,

    /// PDF producer
    pub producer: Option<String>,

    /// Creation date
    pub created: Option<DateTime<Utc>>,

    /// Last modification date
    pub modified: Option<DateTime<Utc>>,

    /// PDF version (e.g., "1.7")
    pub pdf_version: String,

    /// Whether the document is encrypted
    pub encrypted: bool,
}

/// Page statistics for a PDF document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PdfStats {
    /// Number of pages
    pub page_count: usize,

    /// Whitespace-separated tokens over all pages
    pub word_count: usize,

    /// Words per page, two decimals
    pub avg_words_per_page: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PdfDocument {
        PdfDocument::new(["Intro to Rust\n", "", "rust ownership and RUST traits\n"])
    }

    #[test]
    fn test_statistics() {
        let stats = sample().statistics().unwrap();
        assert_eq!(stats.page_count, 3);
        assert_eq!(stats.word_count, 8);
        assert_eq!(stats.avg_words_per_page, 2.67);
    }

    #[test]
    fn test_statistics_joins_without_separator() {
        let doc = PdfDocument::new(["foo", "bar"]);
        assert_eq!(doc.statistics().unwrap().word_count, 1);
    }

    #[test]
    fn test_statistics_empty() {
        assert!(matches!(
            PdfDocument::default().statistics(),
            Err(Error::EmptyContent(_))
        ));
    }

    #[test]
    fn test_search_pages() {
        let doc = sample();
        assert_eq!(doc.search("rust").unwrap(), Some(vec![1, 3]));
        assert_eq!(doc.search("traits").unwrap(), Some(vec![3]));
        assert_eq!(doc.search("python").unwrap(), Some(vec![]));
        assert_eq!(doc.search("").unwrap(), None);
    }

    #[test]
    fn test_page_at() {
        let doc = sample();
        assert_eq!(doc.page_at(1).unwrap(), "Intro to Rust\n");
        assert_eq!(doc.page_at(2).unwrap(), "");
        assert!(matches!(doc.page_at(0), Err(Error::PageOutOfRange(0, 3))));
        assert!(matches!(doc.page_at(4), Err(Error::PageOutOfRange(4, 3))));
    }

    #[test]
    fn test_pages_in() {
        let doc = sample();
        let pages = doc.pages_in(&PageSelection::Pages(vec![1, 3])).unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[1].0, 3);
        assert!(doc.pages_in(&PageSelection::Range(2..=5)).is_err());
    }
}
