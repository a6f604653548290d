//! DOCX document model and text statistics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::text::{self, TermMatcher};

/// A loaded Word document: its paragraph texts in document order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocxDocument {
    /// Core properties
    pub metadata: DocxMetadata,

    /// Body-level paragraph texts
    pub paragraphs: Vec<String>,
}

impl DocxDocument {
    /// Create a document from paragraph texts.
    pub fn new<I, S>(paragraphs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            metadata: DocxMetadata::default(),
            paragraphs: paragraphs.into_iter().map(Into::into).collect(),
        }
    }

    pub(crate) fn with_metadata(paragraphs: Vec<String>, metadata: DocxMetadata) -> Self {
        Self {
            metadata,
            paragraphs,
        }
    }

    /// Number of paragraphs.
    pub fn paragraph_count(&self) -> usize {
        self.paragraphs.len()
    }

    /// Check if the document has no paragraphs.
    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }

    /// Statistics over all paragraphs.
    ///
    /// Fails with [`Error::EmptyContent`] when the document has no paragraphs,
    /// since the per-paragraph average is undefined.
    pub fn statistics(&self) -> Result<DocxStats> {
        let word_count: usize = self.paragraphs.iter().map(|p| text::word_count(p)).sum();
        let char_count: usize = self.paragraphs.iter().map(|p| text::char_count(p)).sum();
        let avg_words_per_paragraph =
            text::average(word_count, self.paragraphs.len(), "document")?;

        Ok(DocxStats {
            paragraph_count: self.paragraphs.len(),
            word_count,
            char_count,
            avg_words_per_paragraph,
        })
    }

    /// Count case-insensitive occurrences of `term` across all paragraphs.
    ///
    /// Returns `None` for an empty term (no search performed).
    pub fn search(&self, term: &str) -> Result<Option<usize>> {
        let Some(matcher) = TermMatcher::new(term)? else {
            return Ok(None);
        };
        let occurrences = self.paragraphs.iter().map(|p| matcher.count_in(p)).sum();
        Ok(Some(occurrences))
    }

    /// The `top_n` most frequent whitespace tokens of the full text.
    pub fn word_frequency(&self, top_n: usize) -> Vec<(String, usize)> {
        text::word_frequency(self.paragraphs.iter().map(String::as_str), top_n)
    }

    /// Get a paragraph by number (1-indexed).
    pub fn paragraph_at(&self, index: usize) -> Result<&str> {
        if index == 0 || index > self.paragraphs.len() {
            return Err(Error::ParagraphOutOfRange(index, self.paragraphs.len()));
        }
        Ok(&self.paragraphs[index - 1])
    }

    /// All paragraphs joined by newlines.
    pub fn full_text(&self) -> String {
        self.paragraphs.join("\n")
    }
}

/// Document core properties from `docProps/core.xml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocxMetadata {
    /// Document title
    pub title: Option<String>,

    /// Document author
    pub author: Option<String>,

    /// Subject
    pub subject: Option<String>,

    /// Description
    pub description: Option<String>,

    /// Last editor
    pub last_modified_by: Option<String>,

    /// Creation date
    pub created: Option<DateTime<Utc>>,

    /// Last modification date
    pub modified: Option<DateTime<Utc>>,
}

/// Paragraph statistics for a DOCX document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocxStats {
    /// Number of paragraphs
    pub paragraph_count: usize,

    /// Whitespace-separated tokens over all paragraphs
    pub word_count: usize,

    /// Characters over all paragraphs, including spaces
    pub char_count: usize,

    /// Words per paragraph, two decimals
    pub avg_words_per_paragraph: f64,
}
