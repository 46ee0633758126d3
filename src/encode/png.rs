use std::path::{Path, PathBuf};

use anyhow::Context as _;
use image::ImageEncoder as _;

use crate::foundation::error::{CropError, CropResult};
use crate::render::frame::FrameRGBA;

/// Encode a frame as an RGBA8 PNG at 1:1 pixel mapping.
///
/// Premultiplied frames are converted to straight alpha first.
#[tracing::instrument(skip(frame), fields(w = frame.width, h = frame.height))]
pub fn encode_png(frame: &FrameRGBA) -> CropResult<Vec<u8>> {
    let expected = (frame.width as usize)
        .saturating_mul(frame.height as usize)
        .saturating_mul(4);
    if frame.data.len() != expected {
        return Err(CropError::encode(format!(
            "frame byte length {} does not match {}x{}",
            frame.data.len(),
            frame.width,
            frame.height
        )));
    }
    if frame.width == 0 || frame.height == 0 {
        return Err(CropError::encode("cannot encode an empty frame"));
    }

    let straight = frame.to_straight_rgba8();
    let mut out = Vec::new();
    image::codecs::png::PngEncoder::new(&mut out)
        .write_image(
            &straight,
            frame.width,
            frame.height,
            image::ExtendedColorType::Rgba8,
        )
        .map_err(|e| CropError::encode(format!("png encode: {e}")))?;
    Ok(out)
}

/// Encode `frame` and write it to `path`, creating parent directories.
pub fn save_png(frame: &FrameRGBA, path: &Path) -> CropResult<()> {
    let bytes = encode_png(frame)?;
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("write png '{}'", path.display()))?;
    tracing::info!(path = %path.display(), "exported png");
    Ok(())
}

/// Destination for exported frames.
pub trait ExportSink {
    /// Consume one composited frame.
    fn export(&mut self, frame: &FrameRGBA) -> CropResult<()>;
}

/// Writes each exported frame to a fixed PNG path.
#[derive(Debug, Clone)]
pub struct PngFileSink {
    path: PathBuf,
}

impl PngFileSink {
    /// Create a sink writing to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Output path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ExportSink for PngFileSink {
    fn export(&mut self, frame: &FrameRGBA) -> CropResult<()> {
        save_png(frame, &self.path)
    }
}

/// In-memory sink for tests and embedding; keeps every encoded PNG.
#[derive(Debug, Default)]
pub struct InMemorySink {
    pub(crate) encoded: Vec<Vec<u8>>,
}

impl InMemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Encoded PNGs in export order.
    pub fn encoded(&self) -> &[Vec<u8>] {
        &self.encoded
    }
}

impl ExportSink for InMemorySink {
    fn export(&mut self, frame: &FrameRGBA) -> CropResult<()> {
        self.encoded.push(encode_png(frame)?);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
