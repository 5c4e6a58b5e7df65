use std::sync::Arc;

use kurbo::{PathEl, Shape};

use crate::foundation::core::{Affine, BezPath, Rect, Rgba8Premul};
use crate::foundation::error::{GlossyError, GlossyResult};
use crate::scene::image::PixelImage;

/// The drawing target handed to [`crate::Renderable::render`].
///
/// Wraps a `vello_cpu` render context sized in device pixels. Elements draw in display units;
/// the surface carries the current transform (scale factor, container offsets) and applies it to
/// every draw call. Nested state (transforms, opacity, clips) is scoped through the `with_*`
/// helpers so it is always unwound, including on error.
pub struct DrawSurface {
    ctx: vello_cpu::RenderContext,
    transform: Affine,
    width: u16,
    height: u16,
}

impl std::fmt::Debug for DrawSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DrawSurface")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("transform", &self.transform)
            .finish_non_exhaustive()
    }
}

impl DrawSurface {
    pub(crate) fn new(width: u16, height: u16, base: Affine) -> Self {
        let mut ctx = vello_cpu::RenderContext::new(width, height);
        ctx.set_blend_mode(vello_cpu::peniko::BlendMode::default());
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        Self {
            ctx,
            transform: base,
            width,
            height,
        }
    }

    /// Surface width in device pixels.
    pub fn width_px(&self) -> u16 {
        self.width
    }

    /// Surface height in device pixels.
    pub fn height_px(&self) -> u16 {
        self.height
    }

    /// Current user-space to device-space transform.
    pub fn transform(&self) -> Affine {
        self.transform
    }

    /// Fill `rect` (in current user space) with a solid color.
    pub fn fill_rect(&mut self, rect: Rect, color: Rgba8Premul) {
        if color.a == 0 || rect.area() == 0.0 {
            return;
        }
        self.ctx.set_transform(affine_to_cpu(self.transform));
        self.ctx.set_paint(color_to_cpu(color));
        self.ctx.fill_rect(&rect_to_cpu(rect));
    }

    /// Fill a closed path (non-zero winding) with a solid color.
    pub fn fill_path(&mut self, path: &BezPath, color: Rgba8Premul) {
        if color.a == 0 || path.elements().is_empty() {
            return;
        }
        self.ctx.set_transform(affine_to_cpu(self.transform));
        self.ctx.set_paint(color_to_cpu(color));
        self.ctx.fill_path(&bezpath_to_cpu(path));
    }

    /// Draw `image` stretched into `rect`.
    pub fn draw_image(&mut self, rect: Rect, image: &PixelImage) -> GlossyResult<()> {
        if image.is_empty() || rect.area() == 0.0 {
            return Ok(());
        }
        let pixmap = pixmap_from_premul_bytes(image.data(), image.width(), image.height())?;
        let paint = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        };
        let iw = f64::from(image.width());
        let ih = f64::from(image.height());
        let placement = Affine::translate((rect.x0, rect.y0))
            * Affine::scale_non_uniform(rect.width() / iw, rect.height() / ih);

        self.ctx.set_transform(affine_to_cpu(self.transform * placement));
        self.ctx.set_paint(paint);
        self.ctx
            .fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, iw, ih));
        Ok(())
    }

    /// Run `f` with `t` appended to the current transform.
    pub fn with_transform<R>(
        &mut self,
        t: Affine,
        f: impl FnOnce(&mut Self) -> GlossyResult<R>,
    ) -> GlossyResult<R> {
        let saved = self.transform;
        self.transform = saved * t;
        let out = f(self);
        self.transform = saved;
        out
    }

    /// Run `f` inside an opacity group. Opacity `>= 1` draws directly.
    pub fn with_opacity<R>(
        &mut self,
        opacity: f32,
        f: impl FnOnce(&mut Self) -> GlossyResult<R>,
    ) -> GlossyResult<R> {
        let opacity = if opacity.is_finite() {
            opacity.clamp(0.0, 1.0)
        } else {
            1.0
        };
        if opacity >= 1.0 {
            return f(self);
        }
        self.ctx.push_opacity_layer(opacity);
        let out = f(self);
        self.ctx.pop_layer();
        out
    }

    /// Run `f` with drawing clipped to `rect` (in current user space).
    pub fn with_clip<R>(
        &mut self,
        rect: Rect,
        f: impl FnOnce(&mut Self) -> GlossyResult<R>,
    ) -> GlossyResult<R> {
        self.ctx.set_transform(affine_to_cpu(self.transform));
        self.ctx.push_clip_layer(&bezpath_to_cpu(&rect.to_path(0.1)));
        let out = f(self);
        self.ctx.pop_layer();
        out
    }

    /// Rasterize everything drawn so far and release the render context.
    pub(crate) fn finish(mut self) -> vello_cpu::Pixmap {
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);
        pixmap
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn color_to_cpu(c: Rgba8Premul) -> vello_cpu::peniko::Color {
    let [r, g, b, a] = c.to_straight_rgba();
    vello_cpu::peniko::Color::from_rgba8(r, g, b, a)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> GlossyResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| GlossyError::render_resource("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| GlossyError::render_resource("image height exceeds u16"))?;
    let mut pixels = Vec::<vello_cpu::peniko::color::PremulRgba8>::with_capacity(
        (width as usize) * (height as usize),
    );
    for px in bytes.chunks_exact(4) {
        pixels.push(vello_cpu::peniko::color::PremulRgba8::from_u8_array([
            px[0], px[1], px[2], px[3],
        ]));
    }
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels, w, h, true,
    ))
}
