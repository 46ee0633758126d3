//! Covercrop frames a raster image inside a fixed-size output rectangle.
//!
//! The image starts cover-fitted and centered; the user can pan and zoom it within bounds, the
//! frame is clipped by a rectangle with independently rounded corners, and the result can be
//! exported as a PNG of exactly the frame size.
//!
//! - Build an [`EditorConfig`] (or use [`Preset`])
//! - Create an [`EditorSession`] and load an image
//! - Feed it [`InputEvent`]s, then [`EditorSession::render`] or [`EditorSession::export_png`]
//!
//! The geometry helpers ([`compute_cover_fit`], [`build_clip_path`], [`ViewState`]) are usable
//! on their own.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod encode;
mod foundation;
mod geometry;
mod render;
mod session;
mod view;

/// Editor configuration and presets.
pub mod config;

pub use crate::foundation::core::{Affine, BezPath, OutputFrame, Point, Rect, Vec2};
pub use crate::foundation::error::{CropError, CropResult};

pub use crate::assets::decode::{
    DecodeOptions, MAX_SOURCE_DIMENSION, SourceImage, decode_image, mime_for_path,
};
pub use crate::config::{DEFAULT_WHEEL_SENSITIVITY, EditorConfig, Preset};
pub use crate::encode::png::{ExportSink, InMemorySink, PngFileSink, encode_png, save_png};
pub use crate::geometry::clip::{
    ClipPath, Corner, CornerRadii, CornerStyle, build_clip_path, build_clip_path_with_style,
    clamp_radius,
};
pub use crate::geometry::fit::{
    CoverFit, InitialZoom, NaturalSize, ZoomRange, ZoomRangePolicy, compute_cover_fit,
};
pub use crate::render::compositor::{Compositor, CompositorOpts, destination_rect, render};
pub use crate::render::frame::FrameRGBA;
pub use crate::session::editor::{EditorSession, LoadOutcome, LoadTicket};
pub use crate::session::input::{InputEvent, wheel_zoom_factor};
pub use crate::view::state::ViewState;
