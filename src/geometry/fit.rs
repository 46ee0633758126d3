//! Cover-fit scale and zoom-range policy.

use crate::foundation::core::OutputFrame;
use crate::foundation::error::{CropError, CropResult};

/// Natural (unscaled) pixel size of a source image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NaturalSize {
    /// Natural width in pixels.
    pub width: f64,
    /// Natural height in pixels.
    pub height: f64,
}

impl NaturalSize {
    /// Build a size from floating-point dimensions.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    fn validate(self) -> CropResult<()> {
        let ok = |v: f64| v.is_finite() && v > 0.0;
        if !ok(self.width) || !ok(self.height) {
            return Err(CropError::invalid_dimensions(self.width, self.height));
        }
        Ok(())
    }
}

impl From<(u32, u32)> for NaturalSize {
    fn from((width, height): (u32, u32)) -> Self {
        Self::new(f64::from(width), f64::from(height))
    }
}

/// Result of [`compute_cover_fit`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoverFit {
    /// Smallest scale at which the image covers the frame with no gaps.
    pub min_scale: f64,
}

/// Compute the cover-fit scale of `image` into `frame`.
///
/// `min_scale = max(frame.width / image.width, frame.height / image.height)`. At that scale one
/// axis matches the frame exactly and the other meets or exceeds it.
pub fn compute_cover_fit(frame: OutputFrame, image: NaturalSize) -> CropResult<CoverFit> {
    image.validate()?;
    let sx = frame.width_f64() / image.width;
    let sy = frame.height_f64() / image.height;
    Ok(CoverFit {
        min_scale: sx.max(sy),
    })
}

/// Which scale a freshly reset view starts at when using [`ZoomRangePolicy::Window`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitialZoom {
    /// Start at the cover-fit scale ("100%").
    #[default]
    Cover,
    /// Start at the arithmetic midpoint of the window.
    Midpoint,
}

/// Policy deriving the allowed zoom range from the cover-fit scale.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ZoomRangePolicy {
    /// `[cover, max(cover * multiplier, cover + offset)]`; the view starts at `cover`.
    Extended {
        /// Multiplicative headroom above the cover scale.
        multiplier: f64,
        /// Additive headroom above the cover scale.
        offset: f64,
    },
    /// `[cover * low, cover * high]`; zooming out below cover is allowed and reveals background.
    Window {
        /// Lower multiplier applied to the cover scale.
        low: f64,
        /// Upper multiplier applied to the cover scale.
        high: f64,
        /// Where a reset view starts inside the window.
        #[serde(default)]
        initial: InitialZoom,
    },
}

impl Default for ZoomRangePolicy {
    fn default() -> Self {
        Self::Extended {
            multiplier: 3.0,
            offset: 0.5,
        }
    }
}

/// Concrete zoom bounds for one loaded image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomRange {
    /// Cover scale the bounds were derived from.
    pub cover: f64,
    /// Lowest allowed scale.
    pub min: f64,
    /// Highest allowed scale.
    pub max: f64,
    /// Scale a reset view starts at; always inside `[min, max]`.
    pub initial: f64,
}

impl ZoomRangePolicy {
    /// Symmetric window policy starting at the cover scale.
    pub fn window(low: f64, high: f64) -> Self {
        Self::Window {
            low,
            high,
            initial: InitialZoom::Cover,
        }
    }

    /// Reject non-finite or non-positive parameters and inverted windows.
    pub fn validate(self) -> CropResult<()> {
        match self {
            Self::Extended { multiplier, offset } => {
                if !multiplier.is_finite() || multiplier <= 0.0 {
                    return Err(CropError::validation(format!(
                        "zoom multiplier must be finite and > 0, got {multiplier}"
                    )));
                }
                if !offset.is_finite() || offset < 0.0 {
                    return Err(CropError::validation(format!(
                        "zoom offset must be finite and >= 0, got {offset}"
                    )));
                }
            }
            Self::Window { low, high, .. } => {
                if !low.is_finite() || !high.is_finite() || low <= 0.0 || high <= 0.0 {
                    return Err(CropError::validation(format!(
                        "zoom window must be finite and > 0, got [{low}, {high}]"
                    )));
                }
                if low > high {
                    return Err(CropError::validation(format!(
                        "zoom window low {low} exceeds high {high}"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Resolve the policy against a cover-fit scale.
    ///
    /// Always yields finite, positive, ordered bounds: unusable parameters fall back to a
    /// neutral value (`1.0` multipliers, `0.0` offset) and an inverted window is reordered.
    pub fn range_for(self, cover_scale: f64) -> ZoomRange {
        let cover = positive_or(cover_scale, 1.0);
        match self {
            Self::Extended { multiplier, offset } => {
                let multiplier = positive_or(multiplier, 1.0);
                let offset = if offset.is_finite() && offset > 0.0 {
                    offset
                } else {
                    0.0
                };
                let max = (cover * multiplier).max(cover + offset).max(cover);
                ZoomRange {
                    cover,
                    min: cover,
                    max,
                    initial: cover,
                }
            }
            Self::Window { low, high, initial } => {
                let (a, b) = (positive_or(low, 1.0), positive_or(high, 1.0));
                let (min, max) = (cover * a.min(b), cover * a.max(b));
                let initial = match initial {
                    InitialZoom::Cover => cover.clamp(min, max),
                    InitialZoom::Midpoint => (min + max) / 2.0,
                };
                ZoomRange {
                    cover,
                    min,
                    max,
                    initial,
                }
            }
        }
    }
}

fn positive_or(v: f64, fallback: f64) -> f64 {
    if v.is_finite() && v > 0.0 { v } else { fallback }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/fit.rs"]
mod tests;
