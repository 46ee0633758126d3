/// Convenience result type used across covercrop.
pub type CropResult<T> = Result<T, CropError>;

/// Error taxonomy for loading, framing, rendering and exporting.
///
/// Geometry helpers either return a valid value or one of these variants; view mutators never
/// fail and silently clamp instead.
#[derive(thiserror::Error, Debug)]
pub enum CropError {
    /// A source image reported zero or non-finite natural dimensions.
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidImageDimensions {
        /// Reported natural width.
        width: f64,
        /// Reported natural height.
        height: f64,
    },

    /// The image source could not produce a decoded image.
    #[error("load failed: {0}")]
    LoadFailed(String),

    /// Invalid configuration or caller-provided data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Raster surface errors.
    #[error("render error: {0}")]
    Render(String),

    /// PNG serialization errors.
    #[error("encode error: {0}")]
    Encode(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CropError {
    /// Build a [`CropError::InvalidImageDimensions`] value.
    pub fn invalid_dimensions(width: f64, height: f64) -> Self {
        Self::InvalidImageDimensions { width, height }
    }

    /// Build a [`CropError::LoadFailed`] value.
    pub fn load_failed(msg: impl Into<String>) -> Self {
        Self::LoadFailed(msg.into())
    }

    /// Build a [`CropError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CropError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`CropError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
