//! Integration tests for the PDF pipeline.

mod common;

use common::{pdf_with_content_streams, pdf_with_pages, pdf_with_pages_and_info};
use docscope::pdf::{self, PageSelection, PdfOptions, PdfParser};
use docscope::{Error, ErrorKind};

#[test]
fn test_single_page_search_and_count() {
    let doc = pdf::load(&pdf_with_pages(&["foo bar foo"])).unwrap();
    assert_eq!(doc.page_count(), 1);
    assert_eq!(doc.search("foo").unwrap(), Some(vec![1]));
    assert_eq!(doc.statistics().unwrap().word_count, 3);
}

#[test]
fn test_multi_page_statistics() {
    let doc =
        pdf::load(&pdf_with_pages(&["alpha beta ", "gamma ", "delta epsilon zeta "])).unwrap();
    let stats = doc.statistics().unwrap();
    assert_eq!(stats.page_count, 3);
    assert_eq!(stats.word_count, 6);
    assert_eq!(stats.avg_words_per_page, 2.0);
}

#[test]
fn test_search_is_case_insensitive() {
    let doc = pdf::load(&pdf_with_pages(&["Rust book", "nothing", "RUST again"])).unwrap();
    assert_eq!(doc.search("rust").unwrap(), Some(vec![1, 3]));
    assert_eq!(doc.search("python").unwrap(), Some(vec![]));
    assert_eq!(doc.search("").unwrap(), None);
}

#[test]
fn test_page_navigation() {
    let doc = pdf::load(&pdf_with_pages(&["first page", "second page"])).unwrap();
    assert!(doc.page_at(2).unwrap().contains("second"));
    assert_eq!(doc.page_at(2).unwrap(), doc.pages[1]);

    let err = doc.page_at(3).unwrap_err();
    assert!(matches!(err, Error::PageOutOfRange(3, 2)));
    assert_eq!(doc.page_at(0).unwrap_err().kind(), ErrorKind::Range);
}

#[test]
fn test_page_selection() {
    let doc = pdf::load(&pdf_with_pages(&["one", "two", "three", "four"])).unwrap();
    let selection = PageSelection::parse("1,3-4").unwrap();
    let pages = doc.pages_in(&selection).unwrap();
    let numbers: Vec<usize> = pages.iter().map(|(n, _)| *n).collect();
    assert_eq!(numbers, vec![1, 3, 4]);
    assert!(pages[1].1.contains("three"));

    let selection = PageSelection::parse("2-9").unwrap();
    assert!(doc.pages_in(&selection).unwrap_err().is_range_error());
}

#[test]
fn test_metadata() {
    let data = pdf_with_pages_and_info(&["body"], Some(("Annual Report", "Sam Rivera")));
    let doc = pdf::load(&data).unwrap();
    assert_eq!(doc.metadata.pdf_version, "1.5");
    assert!(!doc.metadata.encrypted);
    assert_eq!(doc.metadata.title.as_deref(), Some("Annual Report"));
    assert_eq!(doc.metadata.author.as_deref(), Some("Sam Rivera"));
    assert!(doc.metadata.created.is_some());
}

#[test]
fn test_strict_mode_on_valid_pdf() {
    let data = pdf_with_pages(&["fine"]);
    let doc = pdf::load_with_options(&data, PdfOptions::new().strict()).unwrap();
    assert_eq!(doc.page_count(), 1);
}

/// Page 2 sets a font without naming one, which text extraction rejects.
fn pdf_with_unreadable_second_page() -> Vec<u8> {
    pdf_with_content_streams(
        &[
            "BT /F1 12 Tf 72 720 Td (readable) Tj ET".to_string(),
            "BT Tf 72 720 Td (lost) Tj ET".to_string(),
        ],
        None,
    )
}

#[test]
fn test_lenient_mode_keeps_unreadable_page_empty() {
    let doc = pdf::load(&pdf_with_unreadable_second_page()).unwrap();
    assert_eq!(doc.page_count(), 2);
    assert_eq!(doc.page_at(1).unwrap().trim(), "readable");
    assert_eq!(doc.page_at(2).unwrap(), "");
    assert_eq!(doc.search("lost").unwrap(), Some(vec![]));
}

#[test]
fn test_strict_mode_rejects_unreadable_page() {
    let err = pdf::load_with_options(&pdf_with_unreadable_second_page(), PdfOptions::new().strict())
        .unwrap_err();
    assert!(matches!(err, Error::Pdf(ref m) if m.starts_with("page 2")));
    assert_eq!(err.kind(), ErrorKind::Format);
}

#[test]
fn test_rejects_non_pdf() {
    let err = pdf::load(b"GIF89a not a pdf").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Format);
}

#[test]
fn test_rejects_corrupt_body() {
    assert!(pdf::load(b"%PDF-1.4\nthis is not a pdf body at all").is_err());
}

#[test]
fn test_open_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("paper.pdf");
    std::fs::write(&path, pdf_with_pages(&["on disk"])).unwrap();

    let doc = PdfParser::open(&path).unwrap().parse().unwrap();
    assert_eq!(doc.page_count(), 1);
    assert_eq!(docscope::load_pdf(&path).unwrap().page_count(), 1);
}
