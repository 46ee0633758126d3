//! Pan/zoom view state over a loaded image.

use crate::foundation::core::{OutputFrame, Point, Vec2};
use crate::geometry::fit::{CoverFit, NaturalSize, ZoomRangePolicy};

/// Mutable pan/zoom transform plus its derived scale bounds.
///
/// The image is drawn centered in the frame and then offset by `pan`, so `pan` is expressed in a
/// frame-space coordinate system whose origin is the frame center. Every mutator keeps
/// `min_scale <= scale <= max_scale`; none of them can fail.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewState {
    frame: OutputFrame,
    policy: ZoomRangePolicy,
    pan: Vec2,
    scale: f64,
    cover_scale: f64,
    min_scale: f64,
    max_scale: f64,
}

impl ViewState {
    /// Build a reset view for an image whose cover fit has already been computed.
    pub fn new(frame: OutputFrame, fit: CoverFit, policy: ZoomRangePolicy) -> Self {
        let mut view = Self {
            frame,
            policy,
            pan: Vec2::ZERO,
            scale: fit.min_scale,
            cover_scale: fit.min_scale,
            min_scale: fit.min_scale,
            max_scale: fit.min_scale,
        };
        view.reset_view(fit);
        view
    }

    /// Recompute bounds from `fit`, return to the policy's initial scale and clear the pan.
    pub fn reset_view(&mut self, fit: CoverFit) {
        let range = self.policy.range_for(fit.min_scale);
        self.cover_scale = range.cover;
        self.min_scale = range.min;
        self.max_scale = range.max;
        self.scale = range.initial.clamp(range.min, range.max);
        self.pan = Vec2::ZERO;
    }

    /// Translate by `(dx, dy)` frame pixels. Pan is unbounded; non-finite deltas are ignored.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        if !dx.is_finite() || !dy.is_finite() {
            return;
        }
        self.pan += Vec2::new(dx, dy);
    }

    /// Zoom by `factor` keeping the frame center visually fixed.
    pub fn zoom_by(&mut self, factor: f64) {
        self.zoom_by_at(factor, self.frame.center());
    }

    /// Zoom by `factor` keeping the image point under `anchor` (frame coordinates) fixed.
    ///
    /// The new scale is clamped to the view bounds. When clamping leaves the scale unchanged the
    /// pan is untouched. A zero factor lands on the minimum and `+inf` on the maximum; negative
    /// or NaN factors are ignored.
    pub fn zoom_by_at(&mut self, factor: f64, anchor: Point) {
        if factor.is_nan() || factor < 0.0 {
            return;
        }
        let requested = self.scale * factor;
        let new_scale = requested.clamp(self.min_scale, self.max_scale);
        if new_scale != requested {
            tracing::debug!(requested, clamped = new_scale, "zoom clamped");
        }
        if new_scale == self.scale {
            return;
        }
        let ratio = new_scale / self.scale;
        let a = anchor - self.frame.center();
        if a.x.is_finite() && a.y.is_finite() {
            self.pan = a + (self.pan - a) * ratio;
        }
        self.scale = new_scale;
    }

    /// Set the scale directly (slider input). Does not re-anchor; NaN resets to the minimum.
    pub fn set_zoom_absolute(&mut self, value: f64) {
        let value = if value.is_nan() { self.min_scale } else { value };
        self.scale = value.clamp(self.min_scale, self.max_scale);
    }

    /// Current pan offset from the centered position.
    pub fn pan_offset(&self) -> Vec2 {
        self.pan
    }

    /// Current scale.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Lowest allowed scale.
    pub fn min_scale(&self) -> f64 {
        self.min_scale
    }

    /// Highest allowed scale.
    pub fn max_scale(&self) -> f64 {
        self.max_scale
    }

    /// Cover-fit scale of the current image; equals [`ViewState::min_scale`] under the extended
    /// zoom policy.
    pub fn cover_scale(&self) -> f64 {
        self.cover_scale
    }

    /// Frame the view maps into.
    pub fn frame(&self) -> OutputFrame {
        self.frame
    }

    /// Zoom policy used on reset.
    pub fn policy(&self) -> ZoomRangePolicy {
        self.policy
    }

    /// Map a point in image pixel coordinates (natural size `image`) to frame coordinates.
    pub fn image_to_frame(&self, image: NaturalSize, p: Point) -> Point {
        let c = self.frame.center();
        let center = Vec2::new(image.width / 2.0, image.height / 2.0);
        c + self.pan + (p.to_vec2() - center) * self.scale
    }

    /// Map a point in frame coordinates back to image pixel coordinates.
    pub fn frame_to_image(&self, image: NaturalSize, p: Point) -> Point {
        let c = self.frame.center();
        let center = Vec2::new(image.width / 2.0, image.height / 2.0);
        (center + (p - c - self.pan) / self.scale).to_point()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/view/state.rs"]
mod tests;
