//! Rounded-rectangle clip paths with four independent corner radii.

use std::f64::consts::{FRAC_PI_2, PI};

use kurbo::{Arc, PathEl, Shape as _};

use crate::foundation::core::{BezPath, OutputFrame, Point, Rect, Vec2};

const ARC_TOLERANCE: f64 = 0.1;

/// One of the four frame corners, in clockwise order starting at the top-left.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Corner {
    /// Top-left corner.
    TopLeft,
    /// Top-right corner.
    TopRight,
    /// Bottom-right corner.
    BottomRight,
    /// Bottom-left corner.
    BottomLeft,
}

impl Corner {
    /// All corners in tracing order.
    pub const ALL: [Self; 4] = [
        Self::TopLeft,
        Self::TopRight,
        Self::BottomRight,
        Self::BottomLeft,
    ];

    /// Parse the short or long corner name used on the command line (`tr`, `top-right`, ...).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "tl" | "top-left" => Some(Self::TopLeft),
            "tr" | "top-right" => Some(Self::TopRight),
            "br" | "bottom-right" => Some(Self::BottomRight),
            "bl" | "bottom-left" => Some(Self::BottomLeft),
            _ => None,
        }
    }
}

/// Per-corner radii in pixels.
///
/// Values held by a session are always clamped to `[0, frame.max_corner_radius()]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CornerRadii {
    /// Top-left radius.
    pub top_left: u32,
    /// Top-right radius.
    pub top_right: u32,
    /// Bottom-right radius.
    pub bottom_right: u32,
    /// Bottom-left radius.
    pub bottom_left: u32,
}

impl CornerRadii {
    /// Radii in `top_left, top_right, bottom_right, bottom_left` order.
    pub const fn new(top_left: u32, top_right: u32, bottom_right: u32, bottom_left: u32) -> Self {
        Self {
            top_left,
            top_right,
            bottom_right,
            bottom_left,
        }
    }

    /// The same radius on every corner.
    pub const fn uniform(r: u32) -> Self {
        Self::new(r, r, r, r)
    }

    /// Radius of one corner.
    pub fn get(self, corner: Corner) -> u32 {
        match corner {
            Corner::TopLeft => self.top_left,
            Corner::TopRight => self.top_right,
            Corner::BottomRight => self.bottom_right,
            Corner::BottomLeft => self.bottom_left,
        }
    }

    /// Replace one corner's radius; no clamping.
    pub fn with(mut self, corner: Corner, radius: u32) -> Self {
        match corner {
            Corner::TopLeft => self.top_left = radius,
            Corner::TopRight => self.top_right = radius,
            Corner::BottomRight => self.bottom_right = radius,
            Corner::BottomLeft => self.bottom_left = radius,
        }
        self
    }

    /// Clamp every corner into `[0, frame.max_corner_radius()]`.
    pub fn clamped(self, frame: OutputFrame) -> Self {
        let max = frame.max_corner_radius();
        Self::new(
            self.top_left.min(max),
            self.top_right.min(max),
            self.bottom_right.min(max),
            self.bottom_left.min(max),
        )
    }

    /// True when every corner is sharp.
    pub fn is_zero(self) -> bool {
        Corner::ALL.iter().all(|&c| self.get(c) == 0)
    }
}

/// Clamp a raw radius request (e.g. a text or slider value) to a valid radius for `frame`.
///
/// Fractions are truncated toward zero; negative and non-finite requests become `0`.
pub fn clamp_radius(requested: f64, frame: OutputFrame) -> u32 {
    if !requested.is_finite() || requested <= 0.0 {
        return 0;
    }
    let max = frame.max_corner_radius();
    let r = requested.trunc();
    if r >= f64::from(max) { max } else { r as u32 }
}

/// Curve used for a rounded corner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CornerStyle {
    /// Circular quarter arc of the given radius.
    #[default]
    Arc,
    /// Quadratic curve whose control point is the sharp corner vertex.
    Quadratic,
}

/// Closed outline of the output frame with the corner radii applied.
#[derive(Clone, Debug, PartialEq)]
pub struct ClipPath {
    frame: OutputFrame,
    radii: CornerRadii,
    path: BezPath,
}

impl ClipPath {
    /// The underlying path, traced clockwise from the top edge.
    pub fn bez_path(&self) -> &BezPath {
        &self.path
    }

    /// Consume into the underlying path.
    pub fn into_bez_path(self) -> BezPath {
        self.path
    }

    /// Frame this path was built for.
    pub fn frame(&self) -> OutputFrame {
        self.frame
    }

    /// Radii actually applied (after clamping).
    pub fn radii(&self) -> CornerRadii {
        self.radii
    }

    /// Number of straight segments, counting the closing segment when it has non-zero length.
    pub fn line_count(&self) -> usize {
        self.path
            .segments()
            .filter(|s| matches!(s, kurbo::PathSeg::Line(l) if l.p0 != l.p1))
            .count()
    }

    /// Number of curved segments.
    pub fn curve_count(&self) -> usize {
        self.path
            .elements()
            .iter()
            .filter(|el| matches!(el, PathEl::QuadTo(..) | PathEl::CurveTo(..)))
            .count()
    }

    /// True when the path is the plain frame rectangle.
    pub fn is_rectangle(&self) -> bool {
        self.curve_count() == 0
    }

    /// Tight bounding box of the outline.
    pub fn bounding_box(&self) -> Rect {
        self.path.bounding_box()
    }

    /// Enclosed area in square pixels.
    pub fn area(&self) -> f64 {
        self.path.area().abs()
    }

    /// Nonzero-winding containment test in frame coordinates.
    pub fn contains(&self, p: Point) -> bool {
        self.path.contains(p)
    }
}

/// Build the clip path for `frame` with circular corners.
pub fn build_clip_path(frame: OutputFrame, radii: CornerRadii) -> ClipPath {
    build_clip_path_with_style(frame, radii, CornerStyle::Arc)
}

/// Build the clip path for `frame` using the given corner construction.
///
/// Radii are clamped to the frame first, so adjacent corners never overlap.
pub fn build_clip_path_with_style(
    frame: OutputFrame,
    radii: CornerRadii,
    style: CornerStyle,
) -> ClipPath {
    let radii = radii.clamped(frame);
    let (w, h) = (frame.width_f64(), frame.height_f64());
    let tl = f64::from(radii.top_left);
    let tr = f64::from(radii.top_right);
    let br = f64::from(radii.bottom_right);
    let bl = f64::from(radii.bottom_left);

    let mut path = BezPath::new();
    path.move_to((tl, 0.0));

    line_to(&mut path, Point::new(w - tr, 0.0));
    round_corner(
        &mut path,
        style,
        CornerGeom {
            vertex: Point::new(w, 0.0),
            end: Point::new(w, tr),
            center: Point::new(w - tr, tr),
            start_angle: -FRAC_PI_2,
            radius: tr,
        },
    );

    line_to(&mut path, Point::new(w, h - br));
    round_corner(
        &mut path,
        style,
        CornerGeom {
            vertex: Point::new(w, h),
            end: Point::new(w - br, h),
            center: Point::new(w - br, h - br),
            start_angle: 0.0,
            radius: br,
        },
    );

    line_to(&mut path, Point::new(bl, h));
    round_corner(
        &mut path,
        style,
        CornerGeom {
            vertex: Point::new(0.0, h),
            end: Point::new(0.0, h - bl),
            center: Point::new(bl, h - bl),
            start_angle: FRAC_PI_2,
            radius: bl,
        },
    );

    // A sharp top-left corner is the start point; closing the path draws the left edge into it.
    if tl > 0.0 {
        line_to(&mut path, Point::new(0.0, tl));
        round_corner(
            &mut path,
            style,
            CornerGeom {
                vertex: Point::new(0.0, 0.0),
                end: Point::new(tl, 0.0),
                center: Point::new(tl, tl),
                start_angle: PI,
                radius: tl,
            },
        );
    }
    path.close_path();

    ClipPath { frame, radii, path }
}

struct CornerGeom {
    vertex: Point,
    end: Point,
    center: Point,
    start_angle: f64,
    radius: f64,
}

fn line_to(path: &mut BezPath, p: Point) {
    let current = path.elements().last().and_then(|el| el.end_point());
    if current != Some(p) {
        path.line_to(p);
    }
}

fn round_corner(path: &mut BezPath, style: CornerStyle, g: CornerGeom) {
    if g.radius <= 0.0 {
        return;
    }
    match style {
        CornerStyle::Quadratic => path.quad_to(g.vertex, g.end),
        CornerStyle::Arc => {
            let arc = Arc::new(
                g.center,
                Vec2::new(g.radius, g.radius),
                g.start_angle,
                FRAC_PI_2,
                0.0,
            );
            path.extend(arc.append_iter(ARC_TOLERANCE));
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/clip.rs"]
mod tests;
