//! Plain text rendering for analysis reports.

use std::fmt::Write;

use crate::analyze::{AnalysisReport, DocxReport, Excerpt, ImageReport, PdfReport};
use crate::raster::Histogram;

/// Convert a report to a human-readable summary.
pub fn to_text(report: &AnalysisReport) -> String {
    let mut output = String::new();
    match report {
        AnalysisReport::Docx(r) => render_docx(&mut output, r),
        AnalysisReport::Pdf(r) => render_pdf(&mut output, r),
        AnalysisReport::Image(r) => render_image(&mut output, r),
    }
    output.trim_end().to_string()
}

fn render_docx(output: &mut String, report: &DocxReport) {
    let _ = writeln!(output, "Document: {}", report.file_name);
    field(output, "Title", report.metadata.title.as_deref());
    field(output, "Author", report.metadata.author.as_deref());

    let stats = &report.statistics;
    let _ = writeln!(output, "\nDocument Statistics");
    let _ = writeln!(output, "  Paragraphs:               {}", stats.paragraph_count);
    let _ = writeln!(output, "  Words:                    {}", stats.word_count);
    let _ = writeln!(output, "  Characters:               {}", stats.char_count);
    let _ = writeln!(
        output,
        "  Avg words per paragraph:  {:.2}",
        stats.avg_words_per_paragraph
    );

    if let Some(hit) = &report.search {
        let _ = writeln!(
            output,
            "\nFound {} occurrence(s) of '{}'",
            hit.result, hit.term
        );
    }

    if !report.top_words.is_empty() {
        let _ = writeln!(output, "\nTop {} Words", report.top_words.len());
        let width = report
            .top_words
            .iter()
            .map(|w| w.word.chars().count())
            .max()
            .unwrap_or(0);
        for entry in &report.top_words {
            let _ = writeln!(output, "  {:<width$}  {}", entry.word, entry.count, width = width);
        }
    }

    if let Some(paragraph) = &report.paragraph {
        excerpt(output, "Paragraph", paragraph);
    }

    if let Some(text) = &report.full_text {
        let _ = writeln!(output, "\nFull Text\n{}", text);
    }
}

fn render_pdf(output: &mut String, report: &PdfReport) {
    let _ = writeln!(output, "PDF: {}", report.file_name);
    let _ = writeln!(output, "  Version:  {}", report.metadata.pdf_version);
    field(output, "Title", report.metadata.title.as_deref());
    field(output, "Author", report.metadata.author.as_deref());
    if report.metadata.encrypted {
        let _ = writeln!(output, "  Encrypted");
    }

    let stats = &report.statistics;
    let _ = writeln!(output, "\nPDF Statistics");
    let _ = writeln!(output, "  Pages:               {}", stats.page_count);
    let _ = writeln!(output, "  Words:               {}", stats.word_count);
    let _ = writeln!(output, "  Avg words per page:  {:.2}", stats.avg_words_per_page);

    if let Some(hit) = &report.search {
        if hit.result.is_empty() {
            let _ = writeln!(output, "\n'{}' not found", hit.term);
        } else {
            let pages: Vec<String> = hit.result.iter().map(|p| p.to_string()).collect();
            let _ = writeln!(
                output,
                "\nFound '{}' on pages: {}",
                hit.term,
                pages.join(", ")
            );
        }
    }

    for page in &report.pages {
        excerpt(output, "Page", page);
    }
}

fn render_image(output: &mut String, report: &ImageReport) {
    let info = &report.info;
    let _ = writeln!(output, "Image: {}", report.file_name);
    let _ = writeln!(output, "  Width:         {}", info.width);
    let _ = writeln!(output, "  Height:        {}", info.height);
    let _ = writeln!(
        output,
        "  Format:        {}",
        info.format.as_deref().unwrap_or("unknown")
    );
    let _ = writeln!(output, "  Mode:          {}", info.mode);
    let _ = writeln!(output, "  Aspect ratio:  {:.2}", info.aspect_ratio);

    let _ = writeln!(output, "\nEffect: {}", report.effect);
    if report.effect.uses_intensity() {
        let _ = writeln!(output, "  Intensity:  {}", report.intensity);
    }
    let _ = writeln!(
        output,
        "  Zoom:       {:.2} ({}x{})",
        report.zoom, report.display.width, report.display.height
    );

    if let Some(hist) = &report.histogram {
        render_histogram(output, hist);
    }

    if let Some(download) = &report.download {
        let _ = writeln!(
            output,
            "\nDownload: {} ({}, {} bytes)",
            download.file_name,
            download.mime_type,
            download.data.len()
        );
    }
}

fn render_histogram(output: &mut String, hist: &Histogram) {
    let _ = writeln!(output, "\nColor Histogram ({} pixels)", hist.total());
    for (name, channel) in hist.channels() {
        let used = channel.iter().filter(|&&c| c > 0).count();
        match Histogram::peak(channel) {
            Some((value, count)) => {
                let _ = writeln!(
                    output,
                    "  {:<5}  peak {:>3} ({} px), {} distinct values",
                    name, value, count, used
                );
            }
            None => {
                let _ = writeln!(output, "  {:<5}  empty", name);
            }
        }
    }
}

fn field(output: &mut String, label: &str, value: Option<&str>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        let _ = writeln!(output, "  {}:  {}", label, value);
    }
}

fn excerpt(output: &mut String, label: &str, excerpt: &Excerpt) {
    let _ = writeln!(output, "\n{} {}", label, excerpt.number);
    if excerpt.text.trim().is_empty() {
        let _ = writeln!(output, "  (no text)");
    } else {
        let _ = writeln!(output, "{}", excerpt.text.trim_end());
    }
}
