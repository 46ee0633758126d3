//! CPU compositor: places the source image under the view transform and clips it.

use std::sync::Arc;

use crate::assets::decode::SourceImage;
use crate::foundation::core::{Affine, OutputFrame, Rect};
use crate::foundation::error::{CropError, CropResult};
use crate::foundation::math::{mul_div255_u8, round_half_up};
use crate::geometry::clip::ClipPath;
use crate::geometry::fit::NaturalSize;
use crate::render::frame::FrameRGBA;
use crate::view::state::ViewState;

/// Options for [`Compositor`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CompositorOpts {
    pub(crate) background_rgba: Option<[u8; 4]>,
}

impl CompositorOpts {
    /// Fill the clipped area with a straight-alpha RGBA8 color before drawing the image.
    pub fn with_background_rgba(mut self, bg: Option<[u8; 4]>) -> Self {
        self.background_rgba = bg;
        self
    }
}

/// Where the scaled image lands in the frame.
///
/// The origin is rounded to whole pixels so repeated redraws do not shimmer; the size is kept
/// exact to preserve the scale.
pub fn destination_rect(frame: OutputFrame, image: NaturalSize, view: &ViewState) -> Rect {
    let scale = view.scale();
    let width = image.width * scale;
    let height = image.height * scale;
    let pan = view.pan_offset();
    let x = round_half_up((frame.width_f64() - width) / 2.0 + pan.x);
    let y = round_half_up((frame.height_f64() - height) / 2.0 + pan.y);
    Rect::new(x, y, x + width, y + height)
}

struct CachedPaint {
    pixels: Arc<Vec<u8>>,
    paint: vello_cpu::Image,
}

/// Reusable renderer for one output frame size.
///
/// Keeps the rasterizer context and the uploaded image paint between redraws; the paint is
/// rebuilt only when a different [`SourceImage`] is rendered.
pub struct Compositor {
    opts: CompositorOpts,
    ctx: Option<vello_cpu::RenderContext>,
    paint: Option<CachedPaint>,
}

impl std::fmt::Debug for Compositor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Compositor")
            .field("opts", &self.opts)
            .field("has_ctx", &self.ctx.is_some())
            .field("has_paint", &self.paint.is_some())
            .finish()
    }
}

impl Default for Compositor {
    fn default() -> Self {
        Self::new(CompositorOpts::default())
    }
}

impl Compositor {
    /// Create a compositor with the given options.
    pub fn new(opts: CompositorOpts) -> Self {
        Self {
            opts,
            ctx: None,
            paint: None,
        }
    }

    /// Render `image` under `view`, clipped to `clip`, at `clip.frame()` resolution.
    ///
    /// With no image (or no view) the result is a cleared, fully transparent frame.
    #[tracing::instrument(skip_all, fields(w = clip.frame().width, h = clip.frame().height))]
    pub fn render(
        &mut self,
        image: Option<&SourceImage>,
        view: Option<&ViewState>,
        clip: &ClipPath,
    ) -> CropResult<FrameRGBA> {
        let frame = clip.frame();
        let (Some(image), Some(view)) = (image, view) else {
            return Ok(FrameRGBA::transparent(frame.width, frame.height));
        };

        let width_u16: u16 = frame
            .width
            .try_into()
            .map_err(|_| CropError::render("frame width exceeds u16"))?;
        let height_u16: u16 = frame
            .height
            .try_into()
            .map_err(|_| CropError::render("frame height exceeds u16"))?;

        let paint = self.image_paint_for(image)?;
        let natural = image.natural_size();
        let dest = destination_rect(frame, natural, view);
        let scale = view.scale();
        let background = self.opts.background_rgba;

        let mut content = vello_cpu::Pixmap::new(width_u16, height_u16);
        self.with_ctx_mut(width_u16, height_u16, |ctx| {
            ctx.set_paint_transform(Affine::IDENTITY);
            if let Some([r, g, b, a]) = background {
                ctx.set_transform(Affine::IDENTITY);
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
                ctx.fill_rect(&frame.rect());
            }
            ctx.set_transform(Affine::translate((dest.x0, dest.y0)) * Affine::scale(scale));
            ctx.set_paint(paint);
            ctx.fill_rect(&Rect::new(0.0, 0.0, natural.width, natural.height));
            ctx.flush();
            ctx.render_to_pixmap(&mut content);
        });

        let mut mask = vello_cpu::Pixmap::new(width_u16, height_u16);
        self.with_ctx_mut(width_u16, height_u16, |ctx| {
            ctx.set_transform(Affine::IDENTITY);
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 255, 255, 255));
            ctx.fill_path(clip.bez_path());
            ctx.flush();
            ctx.render_to_pixmap(&mut mask);
        });

        apply_alpha_mask_in_place(content.data_as_u8_slice_mut(), mask.data_as_u8_slice())?;

        Ok(FrameRGBA {
            width: frame.width,
            height: frame.height,
            data: content.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }

    fn with_ctx_mut<R>(
        &mut self,
        width: u16,
        height: u16,
        f: impl FnOnce(&mut vello_cpu::RenderContext) -> R,
    ) -> R {
        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            _ => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        let out = f(&mut ctx);
        self.ctx = Some(ctx);
        out
    }

    fn image_paint_for(&mut self, image: &SourceImage) -> CropResult<vello_cpu::Image> {
        if let Some(cached) = &self.paint
            && Arc::ptr_eq(&cached.pixels, image.pixels_arc())
        {
            return Ok(cached.paint.clone());
        }

        let pixmap = pixmap_from_premul_bytes(image.rgba8_premul(), image.width(), image.height())?;
        let paint = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler {
                quality: vello_cpu::peniko::ImageQuality::High,
                ..vello_cpu::peniko::ImageSampler::default()
            },
        };
        self.paint = Some(CachedPaint {
            pixels: image.pixels_arc().clone(),
            paint: paint.clone(),
        });
        Ok(paint)
    }
}

/// One-shot render with a fresh [`Compositor`].
pub fn render(
    image: Option<&SourceImage>,
    view: Option<&ViewState>,
    clip: &ClipPath,
) -> CropResult<FrameRGBA> {
    Compositor::default().render(image, view, clip)
}

fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> CropResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| CropError::render("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| CropError::render("image height exceeds u16"))?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(CropError::render("image byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity((width as usize) * (height as usize));
    for px in bytes.chunks_exact(4) {
        may_have_opacities |= px[3] != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8::from_u8_array([
            px[0], px[1], px[2], px[3],
        ]));
    }
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

/// Scale every premultiplied `dst` pixel by the alpha of the matching `mask` pixel.
fn apply_alpha_mask_in_place(dst: &mut [u8], mask: &[u8]) -> CropResult<()> {
    if dst.len() != mask.len() || !dst.len().is_multiple_of(4) {
        return Err(CropError::render("mask surface size mismatch"));
    }
    for (d, m) in dst.chunks_exact_mut(4).zip(mask.chunks_exact(4)) {
        let w = u16::from(m[3]);
        if w == 255 {
            continue;
        }
        for c in d.iter_mut() {
            *c = mul_div255_u8(u16::from(*c), w);
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
