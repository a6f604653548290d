//! Raster image wrapper and metadata.

use image::{ColorType, DynamicImage, ImageFormat};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::text::round2;

/// Channel layout of a raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PixelMode {
    /// Single-channel luminance
    Luma,
    /// Luminance with alpha
    LumaAlpha,
    /// Three colour channels
    Rgb,
    /// Three colour channels with alpha
    Rgba,
}

impl PixelMode {
    /// Map an `image` colour type to its channel layout.
    pub fn from_color_type(color: ColorType) -> Self {
        match (color.has_color(), color.has_alpha()) {
            (false, false) => PixelMode::Luma,
            (false, true) => PixelMode::LumaAlpha,
            (true, false) => PixelMode::Rgb,
            (true, true) => PixelMode::Rgba,
        }
    }

    /// Whether the mode carries colour channels.
    pub fn is_color(&self) -> bool {
        matches!(self, PixelMode::Rgb | PixelMode::Rgba)
    }

    /// Number of channels, alpha included.
    pub fn channel_count(&self) -> u8 {
        match self {
            PixelMode::Luma => 1,
            PixelMode::LumaAlpha => 2,
            PixelMode::Rgb => 3,
            PixelMode::Rgba => 4,
        }
    }
}

impl std::fmt::Display for PixelMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PixelMode::Luma => "L",
            PixelMode::LumaAlpha => "LA",
            PixelMode::Rgb => "RGB",
            PixelMode::Rgba => "RGBA",
        };
        f.write_str(name)
    }
}

/// A decoded image together with the encoding it was read from.
///
/// Every transform returns a new `Raster`; the receiver is never modified.
#[derive(Debug, Clone)]
pub struct Raster {
    image: DynamicImage,
    format: Option<ImageFormat>,
}

impl Raster {
    /// Wrap a decoded image.
    pub fn new(image: DynamicImage, format: Option<ImageFormat>) -> Self {
        Self { image, format }
    }

    /// A derived raster that keeps this raster's source format.
    pub(crate) fn derive(&self, image: DynamicImage) -> Self {
        Self {
            image,
            format: self.format,
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Source encoding, if the raster was decoded from bytes.
    pub fn format(&self) -> Option<ImageFormat> {
        self.format
    }

    /// Channel layout.
    pub fn mode(&self) -> PixelMode {
        PixelMode::from_color_type(self.image.color())
    }

    /// The underlying image.
    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    /// Consume the raster, returning the underlying image.
    pub fn into_image(self) -> DynamicImage {
        self.image
    }

    /// Width over height, two decimals.
    pub fn aspect_ratio(&self) -> Result<f64> {
        if self.height() == 0 {
            return Err(Error::EmptyContent("image"));
        }
        Ok(round2(self.width() as f64 / self.height() as f64))
    }

    /// Summary of the raster's metadata.
    pub fn info(&self) -> Result<ImageInfo> {
        Ok(ImageInfo {
            width: self.width(),
            height: self.height(),
            format: self.format.map(format_name),
            mode: self.mode(),
            color_type: format!("{:?}", self.image.color()),
            aspect_ratio: self.aspect_ratio()?,
        })
    }
}

/// Metadata reported for an image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageInfo {
    /// Width in pixels
    pub width: u32,

    /// Height in pixels
    pub height: u32,

    /// Source encoding (e.g., "PNG")
    pub format: Option<String>,

    /// Channel layout
    pub mode: PixelMode,

    /// Precise colour type (e.g., "Rgb8")
    pub color_type: String,

    /// Width over height, two decimals
    pub aspect_ratio: f64,
}

/// Upper-case display name of an image encoding.
pub fn format_name(format: ImageFormat) -> String {
    format
        .extensions_str()
        .first()
        .map(|ext| match *ext {
            "jpg" => "JPEG".to_string(),
            other => other.to_ascii_uppercase(),
        })
        .unwrap_or_else(|| format!("{:?}", format).to_ascii_uppercase())
}
