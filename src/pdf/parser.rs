//! PDF page text extraction using lopdf.

use std::io::Read;
use std::path::Path;

use lopdf::{Dictionary, Document as LopdfDocument, Object};

use crate::detect::detect_pdf_version;
use crate::error::{Error, Result};

use super::document::{PdfDocument, PdfMetadata};
use super::options::{ErrorMode, PdfOptions};

/// PDF document parser.
pub struct PdfParser {
    doc: LopdfDocument,
    options: PdfOptions,
}

impl PdfParser {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, PdfOptions::default())
    }

    /// Open a PDF file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: PdfOptions) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_bytes_with_options(&data, options)
    }

    /// Parse a PDF from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, PdfOptions::default())
    }

    /// Parse a PDF from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: PdfOptions) -> Result<Self> {
        detect_pdf_version(data).map_err(|e| match e {
            Error::UnknownFormat => Error::Pdf("missing %PDF- header".into()),
            other => other,
        })?;

        let doc = LopdfDocument::load_mem(data)?;

        if doc.is_encrypted() {
            log::warn!("PDF is encrypted; extracted text may be incomplete");
        }

        Ok(Self { doc, options })
    }

    /// Parse a PDF from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_reader_with_options(reader, PdfOptions::default())
    }

    /// Parse a PDF from a reader with custom options.
    pub fn from_reader_with_options<R: Read>(mut reader: R, options: PdfOptions) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes_with_options(&data, options)
    }

    /// Extract metadata and the text of every page.
    pub fn parse(&self) -> Result<PdfDocument> {
        let page_ids = self.doc.get_pages();
        let mut pages = Vec::with_capacity(page_ids.len());

        for page_num in page_ids.keys() {
            pages.push(self.extract_page_text(*page_num)?);
        }

        log::debug!("Extracted text from {} PDF pages", pages.len());
        Ok(PdfDocument {
            metadata: self.extract_metadata(),
            pages,
        })
    }

    /// Extract document metadata.
    fn extract_metadata(&self) -> PdfMetadata {
        let mut metadata = PdfMetadata {
            pdf_version: self.doc.version.to_string(),
            encrypted: self.doc.is_encrypted(),
            ..Default::default()
        };

        if let Some(info) = self.info_dictionary() {
            metadata.title = get_string_from_dict(info, b"Title");
            metadata.author = get_string_from_dict(info, b"Author");
            metadata.subject = get_string_from_dict(info, b"Subject");
            metadata.keywords = get_string_from_dict(info, b"Keywords");
            metadata.creator = get_string_from_dict(info, b"Creator");
            metadata.producer = get_string_from_dict(info, b"Producer");

            if let Some(date_str) = get_string_from_dict(info, b"CreationDate") {
                metadata.created = parse_pdf_date(&date_str);
            }
            if let Some(date_str) = get_string_from_dict(info, b"ModDate") {
                metadata.modified = parse_pdf_date(&date_str);
            }
        }

        metadata
    }

    /// The trailer's Info dictionary, direct or referenced.
    fn info_dictionary(&self) -> Option<&Dictionary> {
        match self.doc.trailer.get(b"Info").ok()? {
            Object::Reference(id) => self.doc.get_dictionary(*id).ok(),
            Object::Dictionary(dict) => Some(dict),
            _ => None,
        }
    }

    /// Extract text from a page, honouring the error mode.
    fn extract_page_text(&self, page_num: u32) -> Result<String> {
        match self.doc.extract_text(&[page_num]) {
            Ok(text) => Ok(text),
            Err(e) => match self.options.error_mode {
                ErrorMode::Strict => Err(Error::Pdf(format!("page {}: {}", page_num, e))),
                ErrorMode::Lenient => {
                    log::warn!("Failed to extract text from page {}: {}", page_num, e);
                    Ok(String::new())
                }
            },
        }
    }
}

/// Helper to get a string from a PDF dictionary.
fn get_string_from_dict(dict: &Dictionary, key: &[u8]) -> Option<String> {
    match dict.get(key).ok()? {
        Object::String(bytes, _) => {
            // Try UTF-16BE first (PDF standard for Unicode)
            if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
                let utf16: Vec<u16> = bytes[2..]
                    .chunks_exact(2)
                    .map(|c| u16::from_be_bytes([c[0], c[1]]))
                    .collect();
                String::from_utf16(&utf16).ok()
            } else {
                // Try as UTF-8, then Latin-1
                String::from_utf8(bytes.clone())
                    .ok()
                    .or_else(|| Some(bytes.iter().map(|&b| b as char).collect()))
            }
        }
        Object::Name(bytes) => String::from_utf8(bytes.clone()).ok(),
        _ => None,
    }
}

/// Parse a PDF date string (D:YYYYMMDDHHmmSSOHH'mm').
fn parse_pdf_date(s: &str) -> Option<chrono::DateTime<chrono::Utc>> {
    let s = s.strip_prefix("D:").unwrap_or(s);

    // At minimum we need YYYY
    if s.len() < 4 {
        return None;
    }

    let year: i32 = s.get(0..4)?.parse().ok()?;
    let month: u32 = s.get(4..6).and_then(|m| m.parse().ok()).unwrap_or(1);
    let day: u32 = s.get(6..8).and_then(|d| d.parse().ok()).unwrap_or(1);
    let hour: u32 = s.get(8..10).and_then(|h| h.parse().ok()).unwrap_or(0);
    let minute: u32 = s.get(10..12).and_then(|m| m.parse().ok()).unwrap_or(0);
    let second: u32 = s.get(12..14).and_then(|s| s.parse().ok()).unwrap_or(0);

    chrono::NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, second))
        .map(|dt| chrono::DateTime::from_naive_utc_and_offset(dt, chrono::Utc))
}
