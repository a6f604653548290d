//! Integration tests for the DOCX pipeline.

mod common;

use common::{docx_with_body, docx_with_paragraphs};
use docscope::docx::{self, DocxReader};
use docscope::{Error, ErrorKind};

#[test]
fn test_hello_document_statistics() {
    let data = docx_with_paragraphs(&["Hello world", "Hello again"]);
    let doc = docx::load(&data).unwrap();

    let stats = doc.statistics().unwrap();
    assert_eq!(stats.paragraph_count, 2);
    assert_eq!(stats.word_count, 4);
    assert_eq!(stats.char_count, 22);
    assert_eq!(stats.avg_words_per_paragraph, 2.0);
    assert_eq!(doc.search("hello").unwrap(), Some(2));
}

#[test]
fn test_word_count_is_sum_over_paragraphs() {
    let paragraphs = ["  one  two ", "", "three\tfour five", "six"];
    let doc = docx::load(&docx_with_paragraphs(&paragraphs)).unwrap();

    let expected: usize = paragraphs.iter().map(|p| p.split_whitespace().count()).sum();
    let stats = doc.statistics().unwrap();
    assert_eq!(stats.word_count, expected);
    assert_eq!(stats.paragraph_count, 4);
    assert_eq!(stats.avg_words_per_paragraph, 1.5);
}

#[test]
fn test_search_counts_every_occurrence() {
    let doc = docx::load(&docx_with_paragraphs(&[
        "The cat sat on the mat",
        "THE END",
        "nothing here",
    ]))
    .unwrap();
    assert_eq!(doc.search("the").unwrap(), Some(3));
    assert_eq!(doc.search("at").unwrap(), Some(3));
    assert_eq!(doc.search("dog").unwrap(), Some(0));
    assert_eq!(doc.search("").unwrap(), None);
}

#[test]
fn test_search_term_is_literal() {
    let doc = docx::load(&docx_with_paragraphs(&["costs $5 (approx.)", "a.b and axb"])).unwrap();
    assert_eq!(doc.search("$5 (").unwrap(), Some(1));
    assert_eq!(doc.search("a.b").unwrap(), Some(1));
}

#[test]
fn test_word_frequency() {
    let doc = docx::load(&docx_with_paragraphs(&[
        "b a c a",
        "c a b d",
        "A a.",
    ]))
    .unwrap();

    let top = doc.word_frequency(10);
    assert!(top.len() <= 10);
    assert_eq!(top[0], ("a".to_string(), 3));
    // b and c tie at 2; b appeared first
    assert_eq!(top[1], ("b".to_string(), 2));
    assert_eq!(top[2], ("c".to_string(), 2));
    assert!(top.windows(2).all(|w| w[0].1 >= w[1].1));
    assert_eq!(doc.word_frequency(10), top);
    assert_eq!(doc.word_frequency(2).len(), 2);
}

#[test]
fn test_paragraph_navigation() {
    let doc = docx::load(&docx_with_paragraphs(&["first", "", "third"])).unwrap();
    assert_eq!(doc.paragraph_at(1).unwrap(), "first");
    assert_eq!(doc.paragraph_at(2).unwrap(), "");
    assert_eq!(doc.paragraph_at(3).unwrap(), "third");

    let err = doc.paragraph_at(4).unwrap_err();
    assert!(matches!(err, Error::ParagraphOutOfRange(4, 3)));
    assert_eq!(doc.paragraph_at(0).unwrap_err().kind(), ErrorKind::Range);
}

#[test]
fn test_full_text() {
    let doc = docx::load(&docx_with_paragraphs(&["one", "two"])).unwrap();
    assert_eq!(doc.full_text(), "one\ntwo");
}

#[test]
fn test_empty_document() {
    let doc = docx::load(&docx_with_body("", None)).unwrap();
    assert!(doc.is_empty());
    assert!(matches!(doc.statistics(), Err(Error::EmptyContent(_))));
    assert!(doc.word_frequency(10).is_empty());
    assert_eq!(doc.search("x").unwrap(), Some(0));
}

#[test]
fn test_tables_are_not_paragraphs() {
    let body = r#"<w:p><w:r><w:t>Before</w:t></w:r></w:p><w:tbl><w:tr><w:tc><w:p><w:r><w:t>Cell</w:t></w:r></w:p></w:tc></w:tr></w:tbl><w:p><w:r><w:t>After</w:t></w:r></w:p>"#;
    let doc = docx::load(&docx_with_body(body, None)).unwrap();
    assert_eq!(doc.paragraphs, vec!["Before", "After"]);
}

#[test]
fn test_core_properties() {
    let core = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
<dc:title>Quarterly Notes</dc:title><dc:creator>Jordan Lee</dc:creator>
<dcterms:created xsi:type="dcterms:W3CDTF">2024-03-01T09:30:00Z</dcterms:created>
</cp:coreProperties>"#;
    let body = r#"<w:p><w:r><w:t>Body</w:t></w:r></w:p>"#;
    let doc = docx::load(&docx_with_body(body, Some(core))).unwrap();

    assert_eq!(doc.metadata.title.as_deref(), Some("Quarterly Notes"));
    assert_eq!(doc.metadata.author.as_deref(), Some("Jordan Lee"));
    assert!(doc.metadata.created.is_some());
    assert!(doc.metadata.modified.is_none());
}

#[test]
fn test_rejects_non_zip() {
    let err = docx::load(b"this is not a zip archive").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Format);
}

#[test]
fn test_rejects_zip_without_document_part() {
    use std::io::{Cursor, Write};

    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    writer
        .start_file("hello.txt", zip::write::SimpleFileOptions::default())
        .unwrap();
    writer.write_all(b"hi").unwrap();
    let data = writer.finish().unwrap().into_inner();

    let err = docx::load(&data).unwrap_err();
    assert!(matches!(err, Error::Docx(_)));
}

#[test]
fn test_open_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.docx");
    std::fs::write(&path, docx_with_paragraphs(&["from disk"])).unwrap();

    let doc = DocxReader::open(&path).unwrap().read().unwrap();
    assert_eq!(doc.paragraphs, vec!["from disk"]);

    let doc = docscope::load_docx(&path).unwrap();
    assert_eq!(doc.paragraph_count(), 1);
}
