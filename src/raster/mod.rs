//! Image analysis: metadata, effects, zoom and download encoding.
//!
//! Every operation takes a [`Raster`] by reference and returns a new one.
//!
//! ```no_run
//! use docscope::raster::{self, Effect, ImageParams};
//!
//! let bytes = std::fs::read("photo.png")?;
//! let image = raster::load(&bytes)?;
//! let params = ImageParams::new().with_effect(Effect::Blur).with_intensity(3);
//! let outcome = raster::apply(&image, &params)?;
//! # Ok::<(), docscope::Error>(())
//! ```

mod codec;
mod effect;
mod model;
mod transform;

pub use image::ImageFormat;

pub use codec::{
    guess_format, load, parse_format, serialize, DownloadArtifact, JPEG_TOLERANCE,
    SUPPORTED_FORMATS,
};
pub use effect::{apply, Effect, EffectOutcome, ImageParams, DEFAULT_INTENSITY};
pub use model::{format_name, ImageInfo, PixelMode, Raster};
pub use transform::{
    blur, detect_edges, histogram, resize, scaled_dimensions, to_grayscale, Histogram,
    MAX_INTENSITY, MAX_PIXELS,
};
