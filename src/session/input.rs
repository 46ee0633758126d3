use crate::geometry::clip::Corner;

/// Discrete user input delivered to an [`crate::EditorSession`].
///
/// Coordinates are in frame pixels. Each event maps to exactly one view or radius mutator; see
/// [`crate::EditorSession::handle`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    /// Primary pointer pressed; starts a drag.
    PointerDown {
        /// Pointer x.
        x: f64,
        /// Pointer y.
        y: f64,
    },
    /// Pointer moved; pans by the delta since the previous position while dragging.
    PointerMove {
        /// Pointer x.
        x: f64,
        /// Pointer y.
        y: f64,
    },
    /// Pointer released; ends the drag.
    PointerUp,
    /// Pointer capture lost; ends the drag.
    PointerCancel,
    /// Wheel scrolled; positive `delta_y` zooms out.
    Wheel {
        /// Vertical scroll delta in pixels.
        delta_y: f64,
    },
    /// Zoom slider moved to an absolute scale.
    ZoomSlider {
        /// Requested scale.
        value: f64,
    },
    /// Radius input for a specific corner.
    CornerRadius {
        /// Corner to update.
        corner: Corner,
        /// Requested radius in pixels (clamped).
        value: f64,
    },
    /// Radius input for the configured adjustable corner.
    AdjustableRadius {
        /// Requested radius in pixels (clamped).
        value: f64,
    },
    /// Reset button.
    Reset,
}

impl InputEvent {
    /// True for events that change the pan/zoom transform and therefore need a loaded image.
    pub fn touches_transform(&self) -> bool {
        matches!(
            self,
            Self::PointerDown { .. }
                | Self::PointerMove { .. }
                | Self::Wheel { .. }
                | Self::ZoomSlider { .. }
                | Self::Reset
        )
    }
}

/// Zoom factor for a wheel delta: `exp(-delta_y * sensitivity)`.
pub fn wheel_zoom_factor(delta_y: f64, sensitivity: f64) -> f64 {
    (-delta_y * sensitivity).exp()
}
