use crate::foundation::core::{Affine, ScaleFactor, Size};
use crate::foundation::error::{GlossyError, GlossyResult};
use crate::render::frame::pixel_at;
use crate::render::surface::DrawSurface;
use crate::scene::container::VisualContainer;
use crate::scene::element::Renderable;

/// Limits applied before allocating an offscreen surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotOpts {
    /// Maximum number of device pixels (`width * height`) a single capture may allocate.
    pub max_pixels: u64,
}

impl Default for SnapshotOpts {
    fn default() -> Self {
        Self {
            // 64 Mi pixels, 256 MiB of RGBA8.
            max_pixels: 64 * 1024 * 1024,
        }
    }
}

/// Immutable premultiplied RGBA8 capture of a container at one instant.
///
/// Dimensions are in device pixels (`display units * scale`).
#[derive(Clone, Debug, PartialEq)]
pub struct RawSnapshot {
    width: u32,
    height: u32,
    scale: ScaleFactor,
    data: Vec<u8>,
}

impl RawSnapshot {
    /// A zero-size snapshot.
    pub fn empty(scale: ScaleFactor) -> Self {
        Self {
            width: 0,
            height: 0,
            scale,
            data: Vec::new(),
        }
    }

    /// Wrap an already rasterized premultiplied buffer.
    pub fn from_premul_rgba8(
        width: u32,
        height: u32,
        scale: ScaleFactor,
        data: Vec<u8>,
    ) -> GlossyResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| GlossyError::validation("snapshot buffer size overflow"))?;
        if data.len() != expected {
            return Err(GlossyError::validation(format!(
                "snapshot buffer has {} bytes, expected {expected} for {width}x{height}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            scale,
            data,
        })
    }

    /// Width in device pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in device pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Scale factor the snapshot was rasterized at.
    pub fn scale(&self) -> ScaleFactor {
        self.scale
    }

    /// Premultiplied RGBA8 bytes, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Size in display units.
    pub fn logical_size(&self) -> Size {
        Size::new(
            self.scale.to_units(self.width),
            self.scale.to_units(self.height),
        )
    }

    /// Return `true` when there is nothing to reflect.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Bytes of row `y`, or `None` when out of range.
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        if y >= self.height {
            return None;
        }
        let stride = (self.width as usize) * 4;
        let start = (y as usize) * stride;
        self.data.get(start..start + stride)
    }

    /// Pixel at `(x, y)`, or `None` outside the snapshot.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        pixel_at(&self.data, self.width, self.height, x, y)
    }
}

/// Draw `container` and all of its nested children into a fresh offscreen surface.
///
/// The surface is `ceil(width * scale) x ceil(height * scale)` device pixels and is released
/// before returning. A container with zero (or NaN) width or height yields
/// [`RawSnapshot::empty`] without rendering. Sizes over the raster backend's 65535px edge or
/// over `opts.max_pixels` fail with [`GlossyError::RenderResource`].
#[tracing::instrument(
    skip(container),
    fields(width = container.size().width, height = container.size().height)
)]
pub fn capture_snapshot(
    container: &VisualContainer,
    scale: ScaleFactor,
    opts: SnapshotOpts,
) -> GlossyResult<RawSnapshot> {
    let size = container.size();
    if !(size.width > 0.0 && size.height > 0.0) {
        tracing::debug!("zero-area container, returning empty snapshot");
        return Ok(RawSnapshot::empty(scale));
    }

    let (w, h) = surface_dims(size, scale, opts)?;
    if w == 0 || h == 0 {
        tracing::debug!("container rounds to zero device pixels, returning empty snapshot");
        return Ok(RawSnapshot::empty(scale));
    }
    let mut surface = DrawSurface::new(w, h, Affine::scale(scale.get()));
    container.render(&mut surface)?;
    let pixmap = surface.finish();

    RawSnapshot::from_premul_rgba8(
        u32::from(w),
        u32::from(h),
        scale,
        pixmap.data_as_u8_slice().to_vec(),
    )
}

fn surface_dims(size: Size, scale: ScaleFactor, opts: SnapshotOpts) -> GlossyResult<(u16, u16)> {
    let px_w = scale.to_px(size.width);
    let px_h = scale.to_px(size.height);

    let w: u16 = px_w.try_into().map_err(|_| {
        GlossyError::render_resource(format!(
            "offscreen surface width {px_w}px exceeds the {}px raster limit",
            u16::MAX
        ))
    })?;
    let h: u16 = px_h.try_into().map_err(|_| {
        GlossyError::render_resource(format!(
            "offscreen surface height {px_h}px exceeds the {}px raster limit",
            u16::MAX
        ))
    })?;

    let pixels = u64::from(w) * u64::from(h);
    if pixels > opts.max_pixels {
        return Err(GlossyError::render_resource(format!(
            "offscreen surface {w}x{h} ({pixels} px) exceeds max_pixels {}",
            opts.max_pixels
        )));
    }
    Ok((w, h))
}

#[cfg(test)]
#[path = "../../tests/unit/render/snapshot.rs"]
mod tests;
