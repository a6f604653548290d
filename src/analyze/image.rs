//! Image analyzer.

use crate::error::Result;
use crate::raster::{self, DownloadArtifact, EffectOutcome, Raster};

use super::report::{AnalysisReport, Dimensions, ImageReport};
use super::{AnalyzeOptions, Analyzer};

/// Analyzer for PNG and JPEG files.
#[derive(Debug, Clone, Default)]
pub struct ImageAnalyzer {
    _private: (),
}

impl ImageAnalyzer {
    /// Create a new image analyzer.
    pub fn new() -> Self {
        Self { _private: () }
    }

    /// Build a report for an already decoded image.
    ///
    /// The effect is applied to the full-size image; zoom only sets the
    /// reported display size.
    pub fn report(
        &self,
        image: &Raster,
        file_name: &str,
        options: &AnalyzeOptions,
    ) -> Result<ImageReport> {
        let params = &options.image;
        params.validate()?;
        let (display_width, display_height) =
            raster::scaled_dimensions(image.width(), image.height(), params.zoom)?;
        let outcome = raster::apply(image, params)?;
        let download = DownloadArtifact::for_outcome(&outcome, params.output_format, file_name)?;

        let histogram = match outcome {
            EffectOutcome::ChartOnly(hist) => Some(hist),
            _ => None,
        };

        Ok(ImageReport {
            file_name: file_name.to_string(),
            info: image.info()?,
            effect: params.effect,
            intensity: params.intensity,
            zoom: params.zoom,
            display: Dimensions {
                width: display_width,
                height: display_height,
            },
            histogram,
            download,
        })
    }
}

impl Analyzer for ImageAnalyzer {
    fn supported_extensions(&self) -> &[&str] {
        &["png", "jpg", "jpeg"]
    }

    fn name(&self) -> &str {
        "image"
    }

    fn analyze_bytes(
        &self,
        bytes: &[u8],
        file_name: &str,
        options: &AnalyzeOptions,
    ) -> Result<AnalysisReport> {
        let image = raster::load(bytes)?;
        self.report(&image, file_name, options).map(AnalysisReport::Image)
    }
}
