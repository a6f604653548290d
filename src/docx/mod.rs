//! DOCX analysis: paragraph extraction, statistics, search and word frequency.

mod document;
mod reader;

pub use document::{DocxDocument, DocxMetadata, DocxStats};
pub use reader::DocxReader;

use crate::error::Result;

/// Load a Word document from bytes.
///
/// # Example
///
/// ```no_run
/// let data = std::fs::read("notes.docx").unwrap();
/// let doc = docscope::docx::load(&data).unwrap();
/// println!("{} paragraphs", doc.paragraph_count());
/// ```
pub fn load(data: &[u8]) -> Result<DocxDocument> {
    DocxReader::from_bytes(data)?.read()
}
