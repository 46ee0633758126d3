//! Interactive editing session: owns the image, view and radii, and routes input to them.

use crate::assets::decode::{SourceImage, decode_image};
use crate::config::EditorConfig;
use crate::encode::png::{ExportSink, encode_png};
use crate::foundation::core::{OutputFrame, Point};
use crate::foundation::error::CropResult;
use crate::geometry::clip::{ClipPath, Corner, CornerRadii, build_clip_path_with_style, clamp_radius};
use crate::geometry::fit::{CoverFit, compute_cover_fit};
use crate::render::compositor::{Compositor, CompositorOpts};
use crate::render::frame::FrameRGBA;
use crate::session::input::{InputEvent, wheel_zoom_factor};
use crate::view::state::ViewState;

/// Handle for one in-flight load, returned by [`EditorSession::begin_load`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

impl LoadTicket {
    /// Monotonic generation number of this load.
    pub fn generation(self) -> u64 {
        self.generation
    }
}

/// What [`EditorSession::finish_load`] did with a completed load.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The image replaced the previous one and the view was reset.
    Applied,
    /// A newer load was started after this one; the result was dropped.
    Discarded,
}

/// One interactive editing session.
///
/// Transform input is ignored until an image is loaded and while a load is in flight. Radius
/// input is always accepted because it only affects the clip path.
#[derive(Debug)]
pub struct EditorSession {
    config: EditorConfig,
    radii: CornerRadii,
    image: Option<SourceImage>,
    view: Option<ViewState>,
    drag: Option<Point>,
    generation: u64,
    pending: Option<u64>,
    compositor: Compositor,
}

impl EditorSession {
    /// Start a session with no image loaded.
    pub fn new(config: EditorConfig) -> CropResult<Self> {
        config.validate()?;
        let radii = config.corners.clamped(config.frame);
        let compositor =
            Compositor::new(CompositorOpts::default().with_background_rgba(config.background_rgba));
        Ok(Self {
            config,
            radii,
            image: None,
            view: None,
            drag: None,
            generation: 0,
            pending: None,
            compositor,
        })
    }

    /// Session configuration.
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Output frame.
    pub fn frame(&self) -> OutputFrame {
        self.config.frame
    }

    /// Current (clamped) corner radii.
    pub fn radii(&self) -> CornerRadii {
        self.radii
    }

    /// Loaded image, if any.
    pub fn image(&self) -> Option<&SourceImage> {
        self.image.as_ref()
    }

    /// Current view, present exactly when an image is loaded.
    pub fn view(&self) -> Option<&ViewState> {
        self.view.as_ref()
    }

    /// True while a load started with [`EditorSession::begin_load`] has not finished.
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Register a new load. Any earlier in-flight load becomes stale.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.pending = Some(self.generation);
        self.drag = None;
        tracing::debug!(generation = self.generation, "load started");
        LoadTicket {
            generation: self.generation,
        }
    }

    /// Complete a load started with [`EditorSession::begin_load`].
    ///
    /// Stale tickets are discarded without touching state (last load wins). On failure the
    /// previous image and view are kept as they were and the error is returned.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: CropResult<SourceImage>,
    ) -> CropResult<LoadOutcome> {
        if ticket.generation != self.generation {
            tracing::debug!(
                stale = ticket.generation,
                current = self.generation,
                "discarding stale load"
            );
            return Ok(LoadOutcome::Discarded);
        }
        self.pending = None;

        let image = result.inspect_err(|e| tracing::warn!(error = %e, "load failed"))?;
        let fit = compute_cover_fit(self.config.frame, image.natural_size())
            .inspect_err(|e| tracing::warn!(error = %e, "rejecting loaded image"))?;

        let view = ViewState::new(self.config.frame, fit, self.config.zoom);
        tracing::info!(
            width = image.width(),
            height = image.height(),
            min_scale = view.min_scale(),
            max_scale = view.max_scale(),
            "image loaded"
        );
        self.image = Some(image);
        self.view = Some(view);
        self.drag = None;
        Ok(LoadOutcome::Applied)
    }

    /// Decode `bytes` and load the result synchronously.
    pub fn load_bytes(&mut self, bytes: &[u8], mime: &str) -> CropResult<LoadOutcome> {
        let ticket = self.begin_load();
        let result = decode_image(bytes, mime, &self.config.decode);
        self.finish_load(ticket, result)
    }

    /// Route one input event to its mutator. Returns `true` when a redraw is needed.
    pub fn handle(&mut self, event: InputEvent) -> bool {
        if event.touches_transform() && !self.accepts_transform_input() {
            return false;
        }
        let sensitivity = self.config.wheel_sensitivity;

        match event {
            InputEvent::CornerRadius { corner, value } => self.set_radius(corner, value),
            InputEvent::AdjustableRadius { value } => match self.config.adjustable_corner {
                Some(corner) => self.set_radius(corner, value),
                None => false,
            },
            InputEvent::PointerUp | InputEvent::PointerCancel => {
                self.drag = None;
                false
            }
            InputEvent::PointerDown { x, y } => {
                self.drag = Some(Point::new(x, y));
                false
            }
            InputEvent::PointerMove { x, y } => {
                let (Some(last), Some(view)) = (self.drag, self.view.as_mut()) else {
                    return false;
                };
                view.pan(x - last.x, y - last.y);
                self.drag = Some(Point::new(x, y));
                true
            }
            InputEvent::Wheel { delta_y } => self.view.as_mut().is_some_and(|view| {
                view.zoom_by(wheel_zoom_factor(delta_y, sensitivity));
                true
            }),
            InputEvent::ZoomSlider { value } => self.view.as_mut().is_some_and(|view| {
                view.set_zoom_absolute(value);
                true
            }),
            InputEvent::Reset => self.view.as_mut().is_some_and(|view| {
                let fit = CoverFit {
                    min_scale: view.cover_scale(),
                };
                view.reset_view(fit);
                tracing::debug!(scale = view.scale(), "view reset");
                true
            }),
        }
    }

    /// True when pan/zoom input is live: an image is loaded and no load is in flight.
    pub fn accepts_transform_input(&self) -> bool {
        self.view.is_some() && !self.is_loading()
    }

    /// Set one corner's radius, clamped to the frame. Returns `true` if it changed.
    pub fn set_radius(&mut self, corner: Corner, requested: f64) -> bool {
        let r = clamp_radius(requested, self.config.frame);
        if self.radii.get(corner) == r {
            return false;
        }
        self.radii = self.radii.with(corner, r);
        true
    }

    /// Clip path for the current radii.
    pub fn clip_path(&self) -> ClipPath {
        build_clip_path_with_style(self.config.frame, self.radii, self.config.corner_style)
    }

    /// Composite the current state. A cleared frame when nothing is loaded.
    pub fn render(&mut self) -> CropResult<FrameRGBA> {
        let clip = self.clip_path();
        self.compositor
            .render(self.image.as_ref(), self.view.as_ref(), &clip)
    }

    /// Render and encode as PNG.
    pub fn export_png(&mut self) -> CropResult<Vec<u8>> {
        let frame = self.render()?;
        encode_png(&frame)
    }

    /// Render and hand the frame to `sink`.
    pub fn export_to(&mut self, sink: &mut dyn ExportSink) -> CropResult<()> {
        let frame = self.render()?;
        sink.export(&frame)
    }

    /// Short zoom readout, e.g. `zoom 0.63  min 0.63`. "min" is the cover ("100%") scale, even
    /// when the zoom policy allows going below it.
    pub fn status_line(&self) -> Option<String> {
        self.view
            .as_ref()
            .map(|v| format!("zoom {:.2}  min {:.2}", v.scale(), v.cover_scale()))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/editor.rs"]
mod tests;
