use crate::foundation::error::{CropError, CropResult};

pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// Fixed destination canvas size in pixels.
///
/// Both dimensions are positive for any value built through [`OutputFrame::new`]; the size never
/// changes for the lifetime of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct OutputFrame {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl OutputFrame {
    /// Build a frame, rejecting zero dimensions.
    pub fn new(width: u32, height: u32) -> CropResult<Self> {
        let frame = Self { width, height };
        frame.validate()?;
        Ok(frame)
    }

    /// Check the positive-dimension invariant.
    pub fn validate(self) -> CropResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(CropError::validation(format!(
                "output frame must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }

    /// Width as `f64`.
    pub fn width_f64(self) -> f64 {
        f64::from(self.width)
    }

    /// Height as `f64`.
    pub fn height_f64(self) -> f64 {
        f64::from(self.height)
    }

    /// Frame center in frame coordinates.
    pub fn center(self) -> Point {
        Point::new(self.width_f64() / 2.0, self.height_f64() / 2.0)
    }

    /// Full frame rectangle anchored at the origin.
    pub fn rect(self) -> Rect {
        Rect::new(0.0, 0.0, self.width_f64(), self.height_f64())
    }

    /// Largest corner radius that keeps adjacent corners from overlapping:
    /// `floor(min(width, height) / 2)`.
    pub fn max_corner_radius(self) -> u32 {
        self.width.min(self.height) / 2
    }
}

impl Default for OutputFrame {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 628,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
