use crate::foundation::error::{GlossyError, GlossyResult};
use crate::foundation::math::mul_div255_u8;

/// One premultiplied RGBA8 pixel.
pub type PremulRgba8 = [u8; 4];

/// Source-over `src` onto `dst`, with `src` further scaled by `opacity`.
pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = ((opacity * 255.0).round() as i32).clamp(0, 255) as u16;
    let sa = mul_div255(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = add_sat_u8(sa, mul_div255(u16::from(dst[3]), inv));

    for i in 0..3 {
        let sc = mul_div255(u16::from(src[i]), op);
        let dc = mul_div255(u16::from(dst[i]), inv);
        out[i] = add_sat_u8(sc, dc);
    }
    out
}

/// Source-over `src` onto `dst` in place, one premultiplied pixel at a time.
pub fn over_in_place(dst: &mut [u8], src: &[u8], opacity: f32) -> GlossyResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(GlossyError::validation(
            "blend rows must be equal-length rgba8",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]], opacity);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Multiply a premultiplied pixel by `coverage / 255`.
///
/// Premultiplied color channels scale together with alpha, so an opaque pixel ends up with
/// alpha exactly equal to `coverage`.
pub fn mask_pixel(px: PremulRgba8, coverage: u8) -> PremulRgba8 {
    match coverage {
        255 => px,
        0 => [0; 4],
        c => {
            let c = u16::from(c);
            [
                mul_div255(u16::from(px[0]), c),
                mul_div255(u16::from(px[1]), c),
                mul_div255(u16::from(px[2]), c),
                mul_div255(u16::from(px[3]), c),
            ]
        }
    }
}

/// Apply [`mask_pixel`] with one coverage value to a whole row.
pub fn mask_row_in_place(row: &mut [u8], coverage: u8) {
    if coverage == 255 {
        return;
    }
    for px in row.chunks_exact_mut(4) {
        let out = mask_pixel([px[0], px[1], px[2], px[3]], coverage);
        px.copy_from_slice(&out);
    }
}

fn mul_div255(x: u16, y: u16) -> u8 {
    mul_div255_u8(x, y)
}

fn add_sat_u8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/composite.rs"]
mod tests;
