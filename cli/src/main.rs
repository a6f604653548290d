//! docscope CLI - statistics, search and transforms for DOCX, PDF and image files

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;

use docscope::analyze::{DocxReport, ImageReport, PdfReport};
use docscope::raster::{Histogram, ImageFormat};
use docscope::{
    AnalysisReport, AnalyzeOptions, AnalyzerRegistry, Effect, JsonFormat, PageSelection,
};

/// Accepted zoom range.
const MIN_ZOOM: f64 = 0.5;
const MAX_ZOOM: f64 = 2.0;

#[derive(Parser)]
#[command(name = "docscope")]
#[command(version)]
#[command(about = "Statistics, search and simple transforms for DOCX, PDF and image files", long_about = None)]
struct Cli {
    /// Print the report as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Compact JSON output (with --json)
    #[arg(long, global = true)]
    compact: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a Word document
    Docx {
        /// Input DOCX file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Count occurrences of a term (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,

        /// Number of most frequent words to list
        #[arg(long, env = "DOCSCOPE_TOP_WORDS", default_value_t = 10)]
        top: usize,

        /// Show one paragraph (1-indexed)
        #[arg(short, long)]
        paragraph: Option<usize>,

        /// Show the full text
        #[arg(long)]
        full: bool,
    },

    /// Analyze a PDF
    Pdf {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// List pages containing a term (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,

        /// Show one page (1-indexed)
        #[arg(short, long, conflicts_with = "pages")]
        page: Option<usize>,

        /// Show several pages (e.g., "1-3", "1,4,6-7", "all")
        #[arg(long)]
        pages: Option<String>,

        /// Fail when a page's text cannot be extracted
        #[arg(long)]
        strict: bool,
    },

    /// Analyze an image and apply an effect
    Image {
        /// Input PNG or JPEG file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Effect to apply
        #[arg(short, long, value_enum, default_value = "original")]
        effect: EffectArg,

        /// Effect intensity (0-10)
        #[arg(
            short,
            long,
            env = "DOCSCOPE_INTENSITY",
            default_value_t = docscope::raster::DEFAULT_INTENSITY,
            value_parser = clap::value_parser!(u8).range(0..=10)
        )]
        intensity: u8,

        /// Zoom factor (0.5-2.0)
        #[arg(short, long, env = "DOCSCOPE_ZOOM", default_value_t = 1.0, value_parser = parse_zoom)]
        zoom: f64,

        /// Directory to save the processed image in
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Encoding of the processed image (defaults to the input's)
        #[arg(short, long, value_enum)]
        format: Option<FormatArg>,
    },

    /// Detect the input type from its content and analyze it
    Info {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum EffectArg {
    /// Show the image unchanged
    Original,
    /// 8-bit grayscale
    Grayscale,
    /// Per-channel color histogram
    Histogram,
    /// Laplacian edge detection
    Edges,
    /// Gaussian blur with sigma = intensity
    Blur,
}

impl From<EffectArg> for Effect {
    fn from(arg: EffectArg) -> Self {
        match arg {
            EffectArg::Original => Effect::Original,
            EffectArg::Grayscale => Effect::Grayscale,
            EffectArg::Histogram => Effect::ColorHistogram,
            EffectArg::Edges => Effect::EdgeDetection,
            EffectArg::Blur => Effect::Blur,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    /// Lossless PNG
    Png,
    /// Lossy JPEG
    #[value(alias = "jpg")]
    Jpeg,
}

impl From<FormatArg> for ImageFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Png => ImageFormat::Png,
            FormatArg::Jpeg => ImageFormat::Jpeg,
        }
    }
}

fn parse_zoom(s: &str) -> Result<f64, String> {
    let zoom: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a number", s))?;
    if !(MIN_ZOOM..=MAX_ZOOM).contains(&zoom) {
        return Err(format!("zoom must be between {} and {}", MIN_ZOOM, MAX_ZOOM));
    }
    Ok(zoom)
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let json = cli.json.then_some(if cli.compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    });

    let result = match cli.command {
        Commands::Docx {
            input,
            search,
            top,
            paragraph,
            full,
        } => cmd_docx(&input, search, top, paragraph, full, json),
        Commands::Pdf {
            input,
            search,
            page,
            pages,
            strict,
        } => cmd_pdf(&input, search, page, pages.as_deref(), strict, json),
        Commands::Image {
            input,
            effect,
            intensity,
            zoom,
            output,
            format,
        } => cmd_image(
            &input,
            effect.into(),
            intensity,
            zoom,
            output.as_deref(),
            format,
            json,
        ),
        Commands::Info { input } => cmd_info(&input, json),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_docx(
    input: &Path,
    search: Option<String>,
    top: usize,
    paragraph: Option<usize>,
    full: bool,
    json: Option<JsonFormat>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut options = AnalyzeOptions::new()
        .with_top_words(top)
        .with_full_text(full);
    if let Some(term) = search {
        options = options.with_search(term);
    }
    if let Some(n) = paragraph {
        options = options.with_selected(n);
    }

    let report = analyze_as(input, "docx", &options)?;
    if let Some(format) = json {
        println!("{}", docscope::render::to_json(&report, format)?);
        return Ok(());
    }
    if let AnalysisReport::Docx(r) = &report {
        print_docx(r);
    }
    Ok(())
}

fn cmd_pdf(
    input: &Path,
    search: Option<String>,
    page: Option<usize>,
    pages: Option<&str>,
    strict: bool,
    json: Option<JsonFormat>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut options = AnalyzeOptions::new();
    if let Some(term) = search {
        options = options.with_search(term);
    }
    if let Some(n) = page {
        options = options.with_selected(n);
    }
    if let Some(p) = pages {
        let selection =
            PageSelection::parse(p).map_err(|e| format!("Invalid page range: {}", e))?;
        options = options.with_pages(selection);
    }
    if strict {
        options = options.strict_pdf();
    }

    let report = analyze_as(input, "pdf", &options)?;
    if let Some(format) = json {
        println!("{}", docscope::render::to_json(&report, format)?);
        return Ok(());
    }
    if let AnalysisReport::Pdf(r) = &report {
        print_pdf(r);
    }
    Ok(())
}

fn cmd_image(
    input: &Path,
    effect: Effect,
    intensity: u8,
    zoom: f64,
    output: Option<&Path>,
    format: Option<FormatArg>,
    json: Option<JsonFormat>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut options = AnalyzeOptions::new()
        .with_effect(effect)
        .with_intensity(intensity)
        .with_zoom(zoom);
    if let Some(format) = format {
        options.image = options.image.with_output_format(format.into());
    }

    let report = analyze_as(input, "image", &options)?;

    let saved = match (output, report.as_image().and_then(|r| r.download.as_ref())) {
        (Some(dir), Some(download)) => {
            fs::create_dir_all(dir)?;
            Some(download.save_to(dir)?)
        }
        _ => None,
    };

    if let Some(format) = json {
        println!("{}", docscope::render::to_json(&report, format)?);
    } else if let AnalysisReport::Image(r) = &report {
        print_image(r);
    }

    if let Some(path) = saved {
        eprintln!("{} {}", "Saved to".green(), path.display());
    } else if output.is_some() {
        eprintln!(
            "{}",
            format!("Nothing to save: the {} effect produces no image", effect).yellow()
        );
    }
    Ok(())
}

fn cmd_info(input: &Path, json: Option<JsonFormat>) -> Result<(), Box<dyn std::error::Error>> {
    let data = fs::read(input)?;
    let kind = docscope::detect_kind_from_bytes(&data)?;
    let registry = AnalyzerRegistry::with_defaults();
    let report = registry.analyze_detected(&data, &file_name(input), &AnalyzeOptions::default())?;

    if let Some(format) = json {
        println!("{}", docscope::render::to_json(&report, format)?);
        return Ok(());
    }

    println!("{}: {}", "Detected".bold(), kind);
    println!();
    println!("{}", docscope::render::to_text(&report));
    Ok(())
}

fn cmd_version() {
    println!("{} {}", "docscope".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("DOCX, PDF and image analyzer");
    println!();
    println!("License: MIT");
}

/// Analyze `input` with the named analyzer, whatever its extension.
fn analyze_as(
    input: &Path,
    analyzer: &str,
    options: &AnalyzeOptions,
) -> Result<AnalysisReport, Box<dyn std::error::Error>> {
    let registry = AnalyzerRegistry::with_defaults();
    let analyzer = registry
        .get_by_name(analyzer)
        .ok_or_else(|| format!("No analyzer named {}", analyzer))?;
    let data = fs::read(input)?;
    log::debug!("Read {} bytes from {}", data.len(), input.display());
    Ok(analyzer.analyze_bytes(&data, &file_name(input), options)?)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn heading(title: &str) {
    println!();
    println!("{}", title.cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
}

fn print_docx(report: &DocxReport) {
    println!("{}: {}", "File".bold(), report.file_name);
    if let Some(ref title) = report.metadata.title {
        println!("{}: {}", "Title".bold(), title);
    }
    if let Some(ref author) = report.metadata.author {
        println!("{}: {}", "Author".bold(), author);
    }
    if let Some(ref modified) = report.metadata.modified {
        println!("{}: {}", "Modified".bold(), modified);
    }

    heading("Document Statistics");
    let stats = &report.statistics;
    println!("{}: {}", "Paragraphs".bold(), stats.paragraph_count);
    println!("{}: {}", "Words".bold(), stats.word_count);
    println!("{}: {}", "Characters".bold(), stats.char_count);
    println!(
        "{}: {:.2}",
        "Avg words per paragraph".bold(),
        stats.avg_words_per_paragraph
    );

    if let Some(ref hit) = report.search {
        heading("Search");
        println!(
            "Found {} occurrence(s) of '{}'",
            hit.result.to_string().green().bold(),
            hit.term
        );
    }

    if !report.top_words.is_empty() {
        heading(&format!("Top {} Words", report.top_words.len()));
        let max = report.top_words.first().map(|w| w.count).unwrap_or(1).max(1);
        for entry in &report.top_words {
            let bar = "█".repeat((entry.count * 30).div_ceil(max));
            println!("{:>16} {} {}", entry.word, bar.blue(), entry.count);
        }
    }

    if let Some(ref paragraph) = report.paragraph {
        heading(&format!("Paragraph {}", paragraph.number));
        println!("{}", paragraph.text);
    }

    if let Some(ref text) = report.full_text {
        heading("Full Text");
        println!("{}", text);
    }
}

fn print_pdf(report: &PdfReport) {
    println!("{}: {}", "File".bold(), report.file_name);
    println!("{}: PDF {}", "Format".bold(), report.metadata.pdf_version);
    println!(
        "{}: {}",
        "Encrypted".bold(),
        if report.metadata.encrypted { "Yes" } else { "No" }
    );
    if let Some(ref title) = report.metadata.title {
        println!("{}: {}", "Title".bold(), title);
    }
    if let Some(ref author) = report.metadata.author {
        println!("{}: {}", "Author".bold(), author);
    }
    if let Some(ref producer) = report.metadata.producer {
        println!("{}: {}", "Producer".bold(), producer);
    }

    heading("PDF Statistics");
    let stats = &report.statistics;
    println!("{}: {}", "Pages".bold(), stats.page_count);
    println!("{}: {}", "Words".bold(), stats.word_count);
    println!(
        "{}: {:.2}",
        "Avg words per page".bold(),
        stats.avg_words_per_page
    );

    if let Some(ref hit) = report.search {
        heading("Search");
        if hit.result.is_empty() {
            println!("{}", format!("'{}' not found", hit.term).yellow());
        } else {
            let pages: Vec<String> = hit.result.iter().map(|p| p.to_string()).collect();
            println!("Found '{}' on pages: {}", hit.term, pages.join(", ").green());
        }
    }

    for page in &report.pages {
        heading(&format!("Page {} of {}", page.number, stats.page_count));
        if page.text.trim().is_empty() {
            println!("{}", "(no text on this page)".dimmed());
        } else {
            println!("{}", page.text.trim_end());
        }
    }
}

fn print_image(report: &ImageReport) {
    let info = &report.info;
    println!("{}: {}", "File".bold(), report.file_name);

    heading("Image Information");
    println!("{}: {}", "Width".bold(), info.width);
    println!("{}: {}", "Height".bold(), info.height);
    println!(
        "{}: {}",
        "Format".bold(),
        info.format.as_deref().unwrap_or("unknown")
    );
    println!("{}: {}", "Mode".bold(), info.mode);
    println!("{}: {:.2}", "Aspect ratio".bold(), info.aspect_ratio);

    heading(&format!("Effect: {}", report.effect));
    if report.effect.uses_intensity() {
        println!("{}: {}", "Intensity".bold(), report.intensity);
    }
    println!(
        "{}: {:.2} ({}x{})",
        "Zoom".bold(),
        report.zoom,
        report.display.width,
        report.display.height
    );

    if let Some(ref hist) = report.histogram {
        print_histogram(hist);
    }

    if let Some(ref download) = report.download {
        println!(
            "{}: {} ({}, {} bytes)",
            "Download".bold(),
            download.file_name,
            download.mime_type,
            download.data.len()
        );
    }
}

/// Sixteen-bin summary of each channel.
fn print_histogram(hist: &Histogram) {
    const BINS: usize = 16;
    const WIDTH: usize = 24;

    heading("Color Histogram");
    for (name, channel) in hist.channels() {
        let bins: Vec<u64> = channel
            .chunks(channel.len().div_ceil(BINS).max(1))
            .map(|c| c.iter().sum())
            .collect();
        let max = bins.iter().copied().max().unwrap_or(0).max(1);

        println!("{}", name.bold());
        for (i, count) in bins.iter().enumerate() {
            let len = (*count as usize * WIDTH).div_ceil(max as usize);
            let bar = "█".repeat(len);
            let bar = match name {
                "red" => bar.red(),
                "green" => bar.green(),
                _ => bar.blue(),
            };
            println!("  {:>3}-{:<3} {} {}", i * 16, i * 16 + 15, bar, count);
        }
        if let Some((value, count)) = Histogram::peak(channel) {
            println!("  peak at {} ({} px)", value, count);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_zoom() {
        assert_eq!(parse_zoom("1.5"), Ok(1.5));
        assert!(parse_zoom("0.4").is_err());
        assert!(parse_zoom("2.5").is_err());
        assert!(parse_zoom("big").is_err());
    }

    #[test]
    fn test_cli_parses_image_command() {
        let cli = Cli::try_parse_from([
            "docscope", "image", "a.png", "--effect", "blur", "--intensity", "3", "--json",
        ])
        .unwrap();
        assert!(cli.json);
        match cli.command {
            Commands::Image {
                effect, intensity, ..
            } => {
                assert!(effect == EffectArg::Blur);
                assert_eq!(intensity, 3);
            }
            _ => panic!("expected image command"),
        }
    }

    #[test]
    fn test_cli_rejects_high_intensity() {
        let result = Cli::try_parse_from(["docscope", "image", "a.png", "--intensity", "11"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_effect_mapping() {
        assert_eq!(Effect::from(EffectArg::Edges), Effect::EdgeDetection);
        assert_eq!(Effect::from(EffectArg::Histogram), Effect::ColorHistogram);
    }

    fn write_png(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        image::RgbImage::from_pixel(6, 4, image::Rgb([80, 120, 160]))
            .save_with_format(&path, image::ImageFormat::Png)
            .unwrap();
        path
    }

    #[test]
    fn test_image_command_saves_processed_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_png(dir.path(), "photo.png");
        let out = dir.path().join("out");

        cmd_image(
            &input,
            Effect::Grayscale,
            0,
            1.0,
            Some(&out),
            Some(FormatArg::Jpeg),
            Some(JsonFormat::Compact),
        )
        .unwrap();

        let saved = out.join("processed_photo.jpg");
        let data = fs::read(&saved).unwrap();
        assert_eq!(image::guess_format(&data).unwrap(), image::ImageFormat::Jpeg);
        assert_eq!(image::load_from_memory(&data).unwrap().width(), 6);
    }

    #[test]
    fn test_image_command_histogram_saves_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_png(dir.path(), "chart.png");
        let out = dir.path().join("out");

        cmd_image(
            &input,
            Effect::ColorHistogram,
            5,
            1.0,
            Some(&out),
            None,
            Some(JsonFormat::Compact),
        )
        .unwrap();

        assert!(!out.join("processed_chart.png").exists());
    }
}
