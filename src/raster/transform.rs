//! Pure raster transforms: resize, grayscale, edges, blur and histogram.

use image::imageops::FilterType;
use image::DynamicImage;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

use super::model::Raster;

/// Largest accepted blur intensity.
pub const MAX_INTENSITY: u8 = 10;

/// Laplacian kernel used for edge detection.
const EDGE_KERNEL: [f32; 9] = [-1.0, -1.0, -1.0, -1.0, 8.0, -1.0, -1.0, -1.0, -1.0];

/// Largest image, in pixels, that [`resize`] will produce.
pub const MAX_PIXELS: u64 = 64 * 1024 * 1024;

/// Resample to `trunc(dim * factor)` in each dimension, at least one pixel.
///
/// Fails with [`Error::InvalidParameter`] if the result would exceed
/// [`MAX_PIXELS`].
pub fn resize(raster: &Raster, factor: f64) -> Result<Raster> {
    let (width, height) = scaled_dimensions(raster.width(), raster.height(), factor)?;
    if width == raster.width() && height == raster.height() {
        return Ok(raster.clone());
    }

    log::debug!(
        "Resizing {}x{} -> {}x{}",
        raster.width(),
        raster.height(),
        width,
        height
    );
    Ok(raster.derive(
        raster
            .image()
            .resize_exact(width, height, FilterType::CatmullRom),
    ))
}

/// Dimensions [`resize`] would produce, without resampling.
pub fn scaled_dimensions(width: u32, height: u32, factor: f64) -> Result<(u32, u32)> {
    if !factor.is_finite() || factor <= 0.0 {
        return Err(Error::InvalidParameter(format!(
            "scale factor must be positive, got {}",
            factor
        )));
    }

    let scaled_width = scaled(width, factor);
    let scaled_height = scaled(height, factor);
    match u64::from(scaled_width).checked_mul(u64::from(scaled_height)) {
        Some(pixels) if pixels <= MAX_PIXELS => Ok((scaled_width, scaled_height)),
        _ => Err(Error::InvalidParameter(format!(
            "scaling {}x{} by {} exceeds {} pixels",
            width, height, factor, MAX_PIXELS
        ))),
    }
}

fn scaled(dim: u32, factor: f64) -> u32 {
    (f64::from(dim) * factor).trunc().clamp(1.0, f64::from(u32::MAX)) as u32
}

/// Convert to single-channel 8-bit luma. Alpha is dropped.
pub fn to_grayscale(raster: &Raster) -> Raster {
    raster.derive(DynamicImage::ImageLuma8(raster.image().to_luma8()))
}

/// Grayscale, then convolve with a 3x3 Laplacian.
pub fn detect_edges(raster: &Raster) -> Raster {
    let gray = DynamicImage::ImageLuma8(raster.image().to_luma8());
    raster.derive(gray.filter3x3(&EDGE_KERNEL))
}

/// Gaussian blur with sigma equal to `intensity`.
///
/// Intensity 0 returns an unchanged copy.
pub fn blur(raster: &Raster, intensity: u8) -> Result<Raster> {
    check_intensity(intensity)?;
    if intensity == 0 {
        return Ok(raster.clone());
    }
    Ok(raster.derive(raster.image().blur(f32::from(intensity))))
}

pub(crate) fn check_intensity(intensity: u8) -> Result<()> {
    if intensity > MAX_INTENSITY {
        return Err(Error::InvalidParameter(format!(
            "intensity must be between 0 and {}, got {}",
            MAX_INTENSITY, intensity
        )));
    }
    Ok(())
}

/// Per-channel 8-bit value counts of a colour image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Histogram {
    /// Red channel, 256 buckets
    pub red: Vec<u64>,

    /// Green channel, 256 buckets
    pub green: Vec<u64>,

    /// Blue channel, 256 buckets
    pub blue: Vec<u64>,
}

impl Histogram {
    /// Number of pixels counted.
    pub fn total(&self) -> u64 {
        self.red.iter().sum()
    }

    /// Channels in red, green, blue order.
    pub fn channels(&self) -> [(&'static str, &[u64]); 3] {
        [
            ("red", self.red.as_slice()),
            ("green", self.green.as_slice()),
            ("blue", self.blue.as_slice()),
        ]
    }

    /// Most populated bucket of a channel, lowest value first on ties.
    pub fn peak(channel: &[u64]) -> Option<(u8, u64)> {
        channel
            .iter()
            .enumerate()
            .rev()
            .max_by_key(|(_, &count)| count)
            .map(|(value, &count)| (value as u8, count))
    }
}

/// Count channel values of an RGB or RGBA image.
///
/// Images without colour channels fail with [`Error::UnsupportedMode`].
pub fn histogram(raster: &Raster) -> Result<Histogram> {
    let mode = raster.mode();
    if !mode.is_color() {
        return Err(Error::UnsupportedMode {
            operation: "Color histogram",
            mode: mode.to_string(),
        });
    }

    let mut hist = Histogram {
        red: vec![0; 256],
        green: vec![0; 256],
        blue: vec![0; 256],
    };
    for pixel in raster.image().to_rgb8().pixels() {
        let [r, g, b] = pixel.0;
        hist.red[r as usize] += 1;
        hist.green[g as usize] += 1;
        hist.blue[b as usize] += 1;
    }
    Ok(hist)
}
