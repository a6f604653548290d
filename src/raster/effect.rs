//! Effect menu and the parameters that select one.

use std::fmt;
use std::str::FromStr;

use image::ImageFormat;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

use super::model::Raster;
use super::transform::{self, Histogram};

/// Default blur intensity.
pub const DEFAULT_INTENSITY: u8 = 5;

/// Transforms offered for an image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Effect {
    /// Show the image unchanged
    #[default]
    Original,
    /// 8-bit luma
    Grayscale,
    /// Per-channel value counts
    ColorHistogram,
    /// Laplacian edge map
    EdgeDetection,
    /// Gaussian blur at the chosen intensity
    Blur,
}

impl Effect {
    /// All effects in menu order.
    pub const ALL: [Effect; 5] = [
        Effect::Original,
        Effect::Grayscale,
        Effect::ColorHistogram,
        Effect::EdgeDetection,
        Effect::Blur,
    ];

    /// Short identifier accepted by [`Effect::from_str`].
    pub fn id(&self) -> &'static str {
        match self {
            Effect::Original => "original",
            Effect::Grayscale => "grayscale",
            Effect::ColorHistogram => "histogram",
            Effect::EdgeDetection => "edges",
            Effect::Blur => "blur",
        }
    }

    /// Whether the intensity parameter is shown for this effect.
    ///
    /// Edge detection offers the control but its kernel is fixed.
    pub fn uses_intensity(&self) -> bool {
        matches!(self, Effect::Blur | Effect::EdgeDetection)
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Effect::Original => "Original",
            Effect::Grayscale => "Grayscale",
            Effect::ColorHistogram => "Color Histogram",
            Effect::EdgeDetection => "Edge Detection",
            Effect::Blur => "Blur",
        };
        f.write_str(label)
    }
}

impl FromStr for Effect {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace([' ', '_'], "-");
        match normalized.as_str() {
            "original" | "none" => Ok(Effect::Original),
            "grayscale" | "greyscale" | "gray" | "grey" => Ok(Effect::Grayscale),
            "histogram" | "color-histogram" | "colour-histogram" => Ok(Effect::ColorHistogram),
            "edges" | "edge-detection" => Ok(Effect::EdgeDetection),
            "blur" => Ok(Effect::Blur),
            _ => Err(Error::InvalidParameter(format!("unknown effect '{}'", s))),
        }
    }
}

/// User-chosen image parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageParams {
    /// Effect to apply
    pub effect: Effect,

    /// Blur strength, 0 to 10
    pub intensity: u8,

    /// Display scale factor
    pub zoom: f64,

    /// Encoding for the download; the source format when `None`
    #[serde(skip)]
    pub output_format: Option<ImageFormat>,
}

impl Default for ImageParams {
    fn default() -> Self {
        Self {
            effect: Effect::Original,
            intensity: DEFAULT_INTENSITY,
            zoom: 1.0,
            output_format: None,
        }
    }
}

impl ImageParams {
    /// Create default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the effect.
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effect = effect;
        self
    }

    /// Set the intensity.
    pub fn with_intensity(mut self, intensity: u8) -> Self {
        self.intensity = intensity;
        self
    }

    /// Set the zoom factor.
    pub fn with_zoom(mut self, zoom: f64) -> Self {
        self.zoom = zoom;
        self
    }

    /// Set the download encoding.
    pub fn with_output_format(mut self, format: ImageFormat) -> Self {
        self.output_format = Some(format);
        self
    }

    /// Check intensity and zoom without touching an image.
    pub fn validate(&self) -> Result<()> {
        transform::check_intensity(self.intensity)?;
        if !self.zoom.is_finite() || self.zoom <= 0.0 {
            return Err(Error::InvalidParameter(format!(
                "zoom must be positive, got {}",
                self.zoom
            )));
        }
        Ok(())
    }
}

/// Result of applying an [`Effect`].
#[derive(Debug, Clone)]
pub enum EffectOutcome {
    /// Nothing was changed
    Original,
    /// A new raster, eligible for download
    Transformed(Raster),
    /// Only a chart; there is no image to download
    ChartOnly(Histogram),
}

impl EffectOutcome {
    /// The transformed raster, if any.
    pub fn raster(&self) -> Option<&Raster> {
        match self {
            EffectOutcome::Transformed(raster) => Some(raster),
            _ => None,
        }
    }

    /// The histogram, if any.
    pub fn histogram(&self) -> Option<&Histogram> {
        match self {
            EffectOutcome::ChartOnly(hist) => Some(hist),
            _ => None,
        }
    }
}

/// Apply the selected effect to `raster`.
pub fn apply(raster: &Raster, params: &ImageParams) -> Result<EffectOutcome> {
    params.validate()?;
    log::debug!("Applying effect {} at intensity {}", params.effect, params.intensity);

    let outcome = match params.effect {
        Effect::Original => EffectOutcome::Original,
        Effect::Grayscale => EffectOutcome::Transformed(transform::to_grayscale(raster)),
        Effect::ColorHistogram => EffectOutcome::ChartOnly(transform::histogram(raster)?),
        Effect::EdgeDetection => EffectOutcome::Transformed(transform::detect_edges(raster)),
        Effect::Blur => EffectOutcome::Transformed(transform::blur(raster, params.intensity)?),
    };
    Ok(outcome)
}
