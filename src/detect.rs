//! Input kind detection from magic bytes.

use crate::error::{Error, Result};
use std::io::Cursor;
use std::path::Path;

/// The kind of input a byte buffer holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputKind {
    /// A Word document (OOXML container)
    Docx,
    /// A PDF document with its header version (e.g., "1.7")
    Pdf {
        /// PDF version from the `%PDF-x.y` header
        version: String,
    },
    /// A raster image in the given encoding
    Image(image::ImageFormat),
}

impl InputKind {
    /// Name of the analyzer that handles this kind.
    pub fn analyzer_name(&self) -> &'static str {
        match self {
            InputKind::Docx => "docx",
            InputKind::Pdf { .. } => "pdf",
            InputKind::Image(_) => "image",
        }
    }
}

impl std::fmt::Display for InputKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputKind::Docx => write!(f, "DOCX"),
            InputKind::Pdf { version } => write!(f, "PDF {}", version),
            InputKind::Image(format) => write!(f, "{:?} image", format),
        }
    }
}

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";
const PDF_MAGIC_LEN: usize = 5;
const VERSION_LEN: usize = 3; // e.g., "1.7"

/// ZIP local file header signature.
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// Main part of a WordprocessingML package.
pub(crate) const DOCX_MAIN_PART: &str = "word/document.xml";

/// Detect the input kind of a file.
///
/// # Example
/// ```no_run
/// use docscope::detect::detect_kind_from_path;
///
/// let kind = detect_kind_from_path("report.docx").unwrap();
/// println!("{}", kind);
/// ```
pub fn detect_kind_from_path<P: AsRef<Path>>(path: P) -> Result<InputKind> {
    let data = std::fs::read(path)?;
    detect_kind_from_bytes(&data)
}

/// Detect the input kind of a byte buffer.
///
/// DOCX detection needs the whole buffer, since the ZIP central directory
/// sits at the end of the file.
///
/// # Returns
/// * `Err(Error::UnknownFormat)` if no supported signature matches
pub fn detect_kind_from_bytes(data: &[u8]) -> Result<InputKind> {
    if data.starts_with(PDF_MAGIC) {
        let version = detect_pdf_version(data)?;
        return Ok(InputKind::Pdf { version });
    }

    if data.starts_with(ZIP_MAGIC) {
        return if is_docx_bytes(data) {
            Ok(InputKind::Docx)
        } else {
            Err(Error::UnknownFormat)
        };
    }

    crate::raster::guess_format(data)
        .map(InputKind::Image)
        .ok_or(Error::UnknownFormat)
}

/// Read the version string from a PDF header.
///
/// # Returns
/// * `Err(Error::UnknownFormat)` if the data is not a PDF
/// * `Err(Error::Pdf)` if the header version is malformed
pub fn detect_pdf_version(data: &[u8]) -> Result<String> {
    if data.len() < PDF_MAGIC_LEN + VERSION_LEN {
        return Err(Error::UnknownFormat);
    }

    if !data.starts_with(PDF_MAGIC) {
        return Err(Error::UnknownFormat);
    }

    let version_bytes = &data[PDF_MAGIC_LEN..PDF_MAGIC_LEN + VERSION_LEN];
    let version = String::from_utf8_lossy(version_bytes).to_string();

    if !is_valid_version(&version) {
        return Err(Error::Pdf(format!("unsupported header version {}", version)));
    }

    Ok(version)
}

/// Check if a version string is valid.
fn is_valid_version(version: &str) -> bool {
    if version.len() != 3 {
        return false;
    }

    let chars: Vec<char> = version.chars().collect();
    chars[0].is_ascii_digit() && chars[1] == '.' && chars[2].is_ascii_digit()
}

/// Check if bytes start with a valid PDF header.
pub fn is_pdf_bytes(data: &[u8]) -> bool {
    detect_pdf_version(data).is_ok()
}

/// Check if bytes are a ZIP container holding a Word main document part.
pub fn is_docx_bytes(data: &[u8]) -> bool {
    if !data.starts_with(ZIP_MAGIC) {
        return false;
    }

    match zip::ZipArchive::new(Cursor::new(data)) {
        Ok(mut archive) => archive.by_name(DOCX_MAIN_PART).is_ok(),
        Err(_) => false,
    }
}
