//! DOCX container reader using zip and quick-xml.

use std::io::{Cursor, Read};
use std::path::Path;

use chrono::{DateTime, Utc};
use quick_xml::events::Event;
use quick_xml::Reader;
use zip::ZipArchive;

use crate::detect::DOCX_MAIN_PART;
use crate::error::{Error, Result};

use super::document::{DocxDocument, DocxMetadata};

/// Core properties part (title, author, dates).
const CORE_PROPERTIES_PART: &str = "docProps/core.xml";

/// DOCX document reader.
pub struct DocxReader {
    archive: ZipArchive<Cursor<Vec<u8>>>,
}

impl DocxReader {
    /// Open a DOCX file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_vec(data)
    }

    /// Read a DOCX from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_vec(data.to_vec())
    }

    /// Read a DOCX from a reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_vec(data)
    }

    fn from_vec(data: Vec<u8>) -> Result<Self> {
        let archive = ZipArchive::new(Cursor::new(data))?;
        Ok(Self { archive })
    }

    /// Extract paragraphs and metadata.
    pub fn read(mut self) -> Result<DocxDocument> {
        let body = self.read_part(DOCX_MAIN_PART)?.ok_or_else(|| {
            Error::Docx(format!("missing main document part {}", DOCX_MAIN_PART))
        })?;
        let paragraphs = parse_paragraphs(&body)?;

        let metadata = match self.read_part(CORE_PROPERTIES_PART) {
            Ok(Some(xml)) => parse_core_properties(&xml).unwrap_or_else(|e| {
                log::warn!("Ignoring unreadable core properties: {}", e);
                DocxMetadata::default()
            }),
            Ok(None) => DocxMetadata::default(),
            Err(e) => {
                log::warn!("Ignoring unreadable core properties: {}", e);
                DocxMetadata::default()
            }
        };

        log::debug!("Read DOCX with {} paragraphs", paragraphs.len());
        Ok(DocxDocument::with_metadata(paragraphs, metadata))
    }

    /// Read a package part as UTF-8, `None` if the part does not exist.
    fn read_part(&mut self, name: &str) -> Result<Option<String>> {
        let file = match self.archive.by_name(name) {
            Ok(file) => file,
            Err(zip::result::ZipError::FileNotFound) => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let content = std::io::read_to_string(file)
            .map_err(|e| Error::Docx(format!("{}: {}", name, e)))?;
        Ok(Some(content))
    }
}

/// Extract the text of every body-level paragraph.
///
/// Only `w:p` elements directly under `w:body` count; paragraphs nested in
/// tables, content controls or text boxes are not part of the sequence.
fn parse_paragraphs(xml: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();

    let mut stack: Vec<Vec<u8>> = Vec::new();
    let mut paragraphs = Vec::new();
    let mut current: Option<String> = None;
    let mut paragraph_depth = 0;
    let mut in_text = false;
    let mut text_box_depth = 0usize;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                let name = e.name().as_ref().to_vec();
                let parent = stack.last().map(Vec::as_slice);

                match name.as_slice() {
                    b"w:p" if parent == Some(b"w:body".as_slice()) => {
                        current = Some(String::new());
                        paragraph_depth = stack.len();
                    }
                    b"w:t" if current.is_some() && text_box_depth == 0 => in_text = true,
                    b"w:txbxContent" if current.is_some() => text_box_depth += 1,
                    _ => {}
                }
                stack.push(name);
            }
            Event::Empty(e) => {
                let parent = stack.last().map(Vec::as_slice);
                let in_run = parent == Some(b"w:r".as_slice()) && text_box_depth == 0;

                match e.name().as_ref() {
                    b"w:p" if parent == Some(b"w:body".as_slice()) => {
                        paragraphs.push(String::new());
                    }
                    b"w:tab" if in_run => push_text(&mut current, "\t"),
                    b"w:br" | b"w:cr" if in_run => push_text(&mut current, "\n"),
                    _ => {}
                }
            }
            Event::End(e) => {
                stack.pop();
                match e.name().as_ref() {
                    b"w:t" => in_text = false,
                    b"w:txbxContent" if text_box_depth > 0 => text_box_depth -= 1,
                    b"w:p" if stack.len() == paragraph_depth => {
                        if let Some(text) = current.take() {
                            paragraphs.push(text);
                        }
                    }
                    _ => {}
                }
            }
            Event::Text(e) if in_text => {
                let text = e.unescape()?;
                push_text(&mut current, &text);
            }
            Event::CData(e) if in_text => {
                let text = String::from_utf8_lossy(&e.into_inner()).into_owned();
                push_text(&mut current, &text);
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(paragraphs)
}

fn push_text(current: &mut Option<String>, text: &str) {
    if let Some(paragraph) = current.as_mut() {
        paragraph.push_str(text);
    }
}

/// Parse `docProps/core.xml`.
fn parse_core_properties(xml: &str) -> Result<DocxMetadata> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();
    let mut metadata = DocxMetadata::default();
    let mut current_element = String::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                current_element = String::from_utf8_lossy(e.name().as_ref()).to_string();
            }
            Event::End(_) => current_element.clear(),
            Event::Text(e) => {
                let text = e.unescape()?.trim().to_string();
                if text.is_empty() {
                    buf.clear();
                    continue;
                }
                match current_element.as_str() {
                    "dc:title" => metadata.title = Some(text),
                    "dc:creator" => metadata.author = Some(text),
                    "dc:subject" => metadata.subject = Some(text),
                    "dc:description" => metadata.description = Some(text),
                    "cp:lastModifiedBy" => metadata.last_modified_by = Some(text),
                    "dcterms:created" => metadata.created = parse_w3c_date(&text),
                    "dcterms:modified" => metadata.modified = parse_w3c_date(&text),
                    _ => {}
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(metadata)
}

/// Parse a W3CDTF timestamp such as `2024-01-15T10:30:45Z`.
fn parse_w3c_date(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
}
