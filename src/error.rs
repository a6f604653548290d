//! Error types for docscope library.

use std::io;
use thiserror::Error;

/// Result type alias for docscope operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while loading or analyzing an input.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is not a DOCX, PDF or supported image.
    #[error("Unknown file format")]
    UnknownFormat,

    /// The DOCX container or its XML parts could not be read.
    #[error("Invalid DOCX document: {0}")]
    Docx(String),

    /// The PDF structure could not be parsed.
    #[error("Invalid PDF document: {0}")]
    Pdf(String),

    /// The PDF is encrypted and cannot be opened.
    #[error("Document is encrypted")]
    Encrypted,

    /// The image bytes could not be decoded or encoded.
    #[error("Image codec error: {0}")]
    Image(String),

    /// Paragraph number is out of range.
    #[error("Paragraph {0} is out of range (document has {1} paragraphs)")]
    ParagraphOutOfRange(usize, usize),

    /// Page number is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(usize, usize),

    /// The operation is not defined for the image's pixel mode.
    #[error("{operation} is not supported for {mode} images")]
    UnsupportedMode {
        /// Name of the rejected operation
        operation: &'static str,
        /// Pixel mode of the input image
        mode: String,
    },

    /// An average was requested over zero items.
    #[error("Cannot compute statistics: {0} is empty")]
    EmptyContent(&'static str),

    /// A caller-supplied parameter is outside its accepted domain.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error during report rendering.
    #[error("Rendering error: {0}")]
    Render(String),
}

/// Coarse classification of [`Error`] values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Unreadable or corrupt input
    Format,
    /// Out-of-bounds paragraph or page index
    Range,
    /// Operation undefined for the pixel mode
    UnsupportedMode,
    /// Statistics over an empty document
    EmptyContent,
    /// Rejected caller parameter
    InvalidParameter,
    /// File system failure
    Io,
    /// Output rendering failure
    Render,
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Io(_) => ErrorKind::Io,
            Error::UnknownFormat
            | Error::Docx(_)
            | Error::Pdf(_)
            | Error::Encrypted
            | Error::Image(_) => ErrorKind::Format,
            Error::ParagraphOutOfRange(..) | Error::PageOutOfRange(..) => ErrorKind::Range,
            Error::UnsupportedMode { .. } => ErrorKind::UnsupportedMode,
            Error::EmptyContent(_) => ErrorKind::EmptyContent,
            Error::InvalidParameter(_) => ErrorKind::InvalidParameter,
            Error::Render(_) => ErrorKind::Render,
        }
    }

    /// Whether this error is an out-of-range index.
    pub fn is_range_error(&self) -> bool {
        self.kind() == ErrorKind::Range
    }
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::Pdf(err.to_string()),
        }
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::Docx(err.to_string())
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::Docx(format!("XML parsing error: {}", err))
    }
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::IoError(e) => Error::Io(e),
            _ => Error::Image(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Encrypted;
        assert_eq!(err.to_string(), "Document is encrypted");

        let err = Error::PageOutOfRange(10, 5);
        assert_eq!(
            err.to_string(),
            "Page 10 is out of range (document has 5 pages)"
        );

        let err = Error::UnsupportedMode {
            operation: "Color histogram",
            mode: "L8".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Color histogram is not supported for L8 images"
        );
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(Error::UnknownFormat.kind(), ErrorKind::Format);
        assert_eq!(Error::Docx("bad".into()).kind(), ErrorKind::Format);
        assert_eq!(Error::ParagraphOutOfRange(3, 2).kind(), ErrorKind::Range);
        assert_eq!(Error::EmptyContent("document").kind(), ErrorKind::EmptyContent);
        assert!(Error::PageOutOfRange(0, 1).is_range_error());
        assert!(!Error::Encrypted.is_range_error());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert_eq!(err.kind(), ErrorKind::Io);
    }
}
