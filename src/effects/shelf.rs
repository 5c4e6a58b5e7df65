use crate::effects::composite::over_in_place;
use crate::effects::reflection::ReflectionImage;
use crate::foundation::core::Rgba8Premul;
use crate::foundation::error::{GlossyError, GlossyResult};
use crate::render::frame::FrameRGBA;
use crate::render::snapshot::{RawSnapshot, SnapshotOpts};

/// Lay the snapshot and its reflection out on one canvas.
///
/// The snapshot sits at the top-left. The reflection starts `offset` display units below the
/// snapshot's bottom edge and is drawn source-over on top, so negative offsets overlap the
/// content. Rows pushed above the canvas by a large negative offset are dropped. The canvas is
/// cleared to `background` (transparent when `None`).
///
/// The canvas is bounded by the default [`SnapshotOpts::max_pixels`]; see
/// [`compose_shelf_with_opts`] to override it.
pub fn compose_shelf(
    snapshot: &RawSnapshot,
    reflection: &ReflectionImage,
    offset: f64,
    background: Option<Rgba8Premul>,
) -> GlossyResult<FrameRGBA> {
    compose_shelf_with_opts(
        snapshot,
        reflection,
        offset,
        background,
        SnapshotOpts::default(),
    )
}

/// [`compose_shelf`] with explicit allocation limits. Offsets that push the canvas past
/// `opts.max_pixels` fail with [`GlossyError::RenderResource`].
#[tracing::instrument(skip(snapshot, reflection))]
pub fn compose_shelf_with_opts(
    snapshot: &RawSnapshot,
    reflection: &ReflectionImage,
    offset: f64,
    background: Option<Rgba8Premul>,
    opts: SnapshotOpts,
) -> GlossyResult<FrameRGBA> {
    if !offset.is_finite() {
        return Err(GlossyError::validation("shelf offset must be finite"));
    }
    if !reflection.is_empty() && reflection.scale() != snapshot.scale() {
        return Err(GlossyError::validation(
            "snapshot and reflection were rendered at different scale factors",
        ));
    }

    let overflow = || GlossyError::render_resource(format!("shelf offset {offset} out of range"));
    let offset_f = (offset * snapshot.scale().get()).round();
    if !offset_f.is_finite() || offset_f.abs() > f64::from(u32::MAX) {
        return Err(overflow());
    }
    // |offset_f| <= u32::MAX, so the cast is exact
    let offset_px = offset_f as i64;
    let snap_h = i64::from(snapshot.height());
    let refl_top = snap_h.checked_add(offset_px).ok_or_else(overflow)?;
    let refl_bottom = refl_top
        .checked_add(i64::from(reflection.height()))
        .ok_or_else(overflow)?;

    let width = snapshot.width().max(reflection.width());
    let height = u32::try_from(snap_h.max(refl_bottom).max(0))
        .map_err(|_| GlossyError::render_resource("shelf canvas height overflow"))?;

    let pixels = u64::from(width) * u64::from(height);
    if pixels > opts.max_pixels {
        return Err(GlossyError::render_resource(format!(
            "shelf canvas {width}x{height} ({pixels} px) exceeds max_pixels {}",
            opts.max_pixels
        )));
    }
    let len = usize::try_from(pixels)
        .ok()
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| GlossyError::render_resource("shelf canvas size overflow"))?;
    let clear = background.unwrap_or_else(Rgba8Premul::transparent).to_array();
    let mut data = Vec::with_capacity(len);
    for _ in 0..(len / 4) {
        data.extend_from_slice(&clear);
    }

    let stride = (width as usize) * 4;
    blit_rows(&mut data, stride, snapshot.data(), snapshot.width(), 0)?;
    blit_rows(
        &mut data,
        stride,
        reflection.data(),
        reflection.width(),
        refl_top,
    )?;

    Ok(FrameRGBA {
        width,
        height,
        data,
        premultiplied: true,
    })
}

fn blit_rows(
    dst: &mut [u8],
    dst_stride: usize,
    src: &[u8],
    src_width: u32,
    top: i64,
) -> GlossyResult<()> {
    let src_stride = (src_width as usize) * 4;
    if src_stride == 0 || dst_stride == 0 {
        return Ok(());
    }
    let dst_rows = (dst.len() / dst_stride) as i64;
    for (i, src_row) in src.chunks_exact(src_stride).enumerate() {
        let y = top + i as i64;
        if y < 0 || y >= dst_rows {
            continue;
        }
        let start = (y as usize) * dst_stride;
        over_in_place(&mut dst[start..start + src_stride], src_row, 1.0)?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/effects/shelf.rs"]
mod tests;
