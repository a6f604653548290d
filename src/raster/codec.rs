//! Image decoding, encoding and the download artifact.

use std::io::Cursor;
use std::path::Path;

use image::{ColorType, DynamicImage, ImageFormat};
use serde::{Serialize, Serializer};

use crate::error::{Error, Result};

use super::effect::EffectOutcome;
use super::model::Raster;

/// Encodings accepted by [`load`].
pub const SUPPORTED_FORMATS: [ImageFormat; 2] = [ImageFormat::Png, ImageFormat::Jpeg];

/// Largest per-channel difference after re-encoding a flat-colour image as
/// JPEG with the default encoder.
pub const JPEG_TOLERANCE: u8 = 8;

/// Sniff a supported image encoding from the leading bytes.
pub fn guess_format(data: &[u8]) -> Option<ImageFormat> {
    image::guess_format(data)
        .ok()
        .filter(|format| SUPPORTED_FORMATS.contains(format))
}

/// Decode a PNG or JPEG image, remembering its encoding.
pub fn load(data: &[u8]) -> Result<Raster> {
    let format = match image::guess_format(data) {
        Ok(format) if SUPPORTED_FORMATS.contains(&format) => format,
        Ok(format) => {
            return Err(Error::Image(format!(
                "{} images are not supported",
                super::model::format_name(format)
            )))
        }
        Err(_) => return Err(Error::Image("unrecognized image encoding".into())),
    };
    let image = image::load_from_memory_with_format(data, format)?;

    log::debug!(
        "Decoded {:?} image {}x{} ({:?})",
        format,
        image.width(),
        image.height(),
        image.color()
    );
    Ok(Raster::new(image, Some(format)))
}

/// Encode a raster in `format`.
///
/// JPEG output is flattened to 8-bit RGB (or luma) first, dropping alpha.
/// JPEG is lossy: dimensions are kept and flat colours come back within
/// [`JPEG_TOLERANCE`] per channel.
pub fn serialize(raster: &Raster, format: ImageFormat) -> Result<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    match format {
        ImageFormat::Jpeg => jpeg_compatible(raster.image()).write_to(&mut buf, format)?,
        _ => raster.image().write_to(&mut buf, format)?,
    }
    Ok(buf.into_inner())
}

fn jpeg_compatible(image: &DynamicImage) -> DynamicImage {
    match image.color() {
        ColorType::L8 | ColorType::Rgb8 => image.clone(),
        ColorType::L16 | ColorType::La8 | ColorType::La16 => {
            DynamicImage::ImageLuma8(image.to_luma8())
        }
        _ => DynamicImage::ImageRgb8(image.to_rgb8()),
    }
}

/// Parse an output format name such as "png" or "jpeg".
pub fn parse_format(name: &str) -> Result<ImageFormat> {
    ImageFormat::from_extension(name.trim().trim_start_matches('.'))
        .ok_or_else(|| Error::InvalidParameter(format!("unknown image format '{}'", name)))
}

/// Encoded bytes of a processed image, ready to be saved.
///
/// Serializes as its name, MIME type and byte size; the bytes themselves
/// are not serialized.
#[derive(Debug, Clone, Serialize)]
pub struct DownloadArtifact {
    /// `processed_<original file name>`
    pub file_name: String,

    /// MIME type of the encoding
    pub mime_type: &'static str,

    /// Encoding used
    #[serde(skip)]
    pub format: ImageFormat,

    /// Encoded image
    #[serde(rename = "size", serialize_with = "serialize_len")]
    pub data: Vec<u8>,
}

fn serialize_len<S: Serializer>(data: &[u8], serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_u64(data.len() as u64)
}

impl DownloadArtifact {
    /// Build the download for an effect outcome.
    ///
    /// Only a transformed raster can be downloaded. The encoding is
    /// `format` when given, else the raster's source format, else PNG. When
    /// the encoding differs from the original file's extension, the
    /// extension is replaced.
    pub fn for_outcome(
        outcome: &EffectOutcome,
        format: Option<ImageFormat>,
        original_name: &str,
    ) -> Result<Option<Self>> {
        let EffectOutcome::Transformed(raster) = outcome else {
            return Ok(None);
        };

        let format = format.or(raster.format()).unwrap_or(ImageFormat::Png);
        let data = serialize(raster, format)?;

        Ok(Some(Self {
            file_name: processed_name(original_name, format),
            mime_type: format.to_mime_type(),
            format,
            data,
        }))
    }

    /// Write the artifact into `dir`, returning the full path.
    pub fn save_to<P: AsRef<Path>>(&self, dir: P) -> Result<std::path::PathBuf> {
        let path = dir.as_ref().join(&self.file_name);
        std::fs::write(&path, &self.data)?;
        Ok(path)
    }
}

fn processed_name(original_name: &str, format: ImageFormat) -> String {
    let path = Path::new(original_name);
    let base = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());

    let ext_matches = path
        .extension()
        .and_then(|ext| ImageFormat::from_extension(ext))
        .is_some_and(|f| f == format);
    if ext_matches {
        return format!("processed_{}", base);
    }

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    let ext = format.extensions_str().first().copied().unwrap_or("bin");
    format!("processed_{}.{}", stem, ext)
}
