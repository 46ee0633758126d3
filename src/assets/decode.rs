use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use image::ImageDecoder as _;

use crate::foundation::error::{CropError, CropResult};
use crate::foundation::math::premultiply_rgba8_in_place;
use crate::geometry::fit::NaturalSize;

/// Largest width or height the rasterizer can sample from.
pub const MAX_SOURCE_DIMENSION: u32 = u16::MAX as u32;

/// A decoded, orientation-normalized source image.
///
/// Pixels are premultiplied RGBA8, tightly packed, row-major. A `SourceImage` is never mutated;
/// loading a new file replaces it wholesale.
#[derive(Clone, Debug, PartialEq)]
pub struct SourceImage {
    width: u32,
    height: u32,
    rgba8_premul: Arc<Vec<u8>>,
}

impl SourceImage {
    /// Build an image from straight (non-premultiplied) RGBA8 pixels.
    pub fn from_rgba8(width: u32, height: u32, mut rgba: Vec<u8>) -> CropResult<Self> {
        if width == 0 || height == 0 {
            return Err(CropError::invalid_dimensions(
                f64::from(width),
                f64::from(height),
            ));
        }
        check_raster_limit(width, height)?;
        let expected = (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4);
        if rgba.len() != expected {
            return Err(CropError::validation(format!(
                "rgba byte length {} does not match {width}x{height}",
                rgba.len()
            )));
        }
        premultiply_rgba8_in_place(&mut rgba);
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba),
        })
    }

    /// Natural width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Natural height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Natural size as used by the fit calculator.
    pub fn natural_size(&self) -> NaturalSize {
        NaturalSize::from((self.width, self.height))
    }

    /// Premultiplied RGBA8 pixel bytes.
    pub fn rgba8_premul(&self) -> &[u8] {
        &self.rgba8_premul
    }

    pub(crate) fn pixels_arc(&self) -> &Arc<Vec<u8>> {
        &self.rgba8_premul
    }
}

/// Input policy for [`decode_image`].
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DecodeOptions {
    /// Accepted declared MIME types.
    pub accepted_mime: Vec<String>,
    /// Optional upper bound on the encoded byte length.
    pub max_bytes: Option<u64>,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            accepted_mime: vec![
                "image/jpeg".to_owned(),
                "image/png".to_owned(),
                "image/webp".to_owned(),
            ],
            max_bytes: None,
        }
    }
}

impl DecodeOptions {
    fn accepts(&self, mime: &str) -> bool {
        self.accepted_mime
            .iter()
            .any(|m| m.eq_ignore_ascii_case(mime.trim()))
    }
}

/// Decode encoded bytes with a declared MIME type into a [`SourceImage`].
///
/// EXIF orientation is applied so the returned pixels are upright. Any failure yields
/// [`CropError::LoadFailed`] (or [`CropError::InvalidImageDimensions`]) and no partial image.
#[tracing::instrument(skip(bytes, opts), fields(len = bytes.len()))]
pub fn decode_image(bytes: &[u8], mime: &str, opts: &DecodeOptions) -> CropResult<SourceImage> {
    if bytes.is_empty() {
        return Err(CropError::load_failed("no file selected"));
    }
    if !opts.accepts(mime) {
        let shown = if mime.trim().is_empty() {
            "unknown"
        } else {
            mime
        };
        return Err(CropError::load_failed(format!(
            "unsupported type: {shown} (need {})",
            opts.accepted_mime.join(", ")
        )));
    }
    if let Some(max) = opts.max_bytes
        && bytes.len() as u64 > max
    {
        return Err(CropError::load_failed(format!(
            "file is {} bytes, limit is {max}",
            bytes.len()
        )));
    }

    let mut decoder = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| CropError::load_failed(format!("sniff image format: {e}")))?
        .into_decoder()
        .map_err(|e| CropError::load_failed(format!("decode image: {e}")))?;
    let (raw_w, raw_h) = decoder.dimensions();
    check_raster_limit(raw_w, raw_h)?;
    let orientation = decoder
        .orientation()
        .unwrap_or(image::metadata::Orientation::NoTransforms);
    let mut dyn_img = image::DynamicImage::from_decoder(decoder)
        .map_err(|e| CropError::load_failed(format!("decode image: {e}")))?;
    dyn_img.apply_orientation(orientation);

    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    let image = SourceImage::from_rgba8(width, height, rgba.into_raw())?;
    tracing::debug!(width, height, ?orientation, "decoded source image");
    Ok(image)
}

fn check_raster_limit(width: u32, height: u32) -> CropResult<()> {
    if width > MAX_SOURCE_DIMENSION || height > MAX_SOURCE_DIMENSION {
        return Err(CropError::load_failed(format!(
            "image is {width}x{height}, limit is {MAX_SOURCE_DIMENSION}px per side"
        )));
    }
    Ok(())
}

/// Guess the declared MIME type from a file extension, or `""` when unknown.
pub fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        _ => "",
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
