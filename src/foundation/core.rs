use crate::foundation::error::{GlossyError, GlossyResult};

pub use kurbo::{Affine, BezPath, Point, Rect, Size, Vec2};

/// Device pixel density multiplier applied when rasterizing.
///
/// Always finite and strictly positive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleFactor(f64);

impl ScaleFactor {
    /// One device pixel per display unit.
    pub const ONE: Self = Self(1.0);

    /// Create a validated scale factor.
    pub fn new(v: f64) -> GlossyResult<Self> {
        if !v.is_finite() || v <= 0.0 {
            return Err(GlossyError::validation(format!(
                "scale factor must be finite and > 0, got {v}"
            )));
        }
        Ok(Self(v))
    }

    /// Raw multiplier.
    pub fn get(self) -> f64 {
        self.0
    }

    /// Convert a length in display units into whole device pixels.
    ///
    /// Values within `1e-6` of an integer snap to it; anything else rounds up so the rasterized
    /// surface always covers the requested extent. Negative or NaN lengths give 0.
    pub fn to_px(self, units: f64) -> u64 {
        let v = units * self.0;
        if v.is_nan() || v <= 0.0 {
            return 0;
        }
        let r = v.round();
        let px = if (v - r).abs() < 1e-6 { r } else { v.ceil() };
        // saturating float -> int cast
        px as u64
    }

    /// Convert a device pixel count back into display units.
    pub fn to_units(self, px: u32) -> f64 {
        f64::from(px) / self.0
    }
}

impl Default for ScaleFactor {
    fn default() -> Self {
        Self::ONE
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    /// Red channel premultiplied by alpha.
    pub r: u8,
    /// Green channel premultiplied by alpha.
    pub g: u8,
    /// Blue channel premultiplied by alpha.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8Premul {
    /// Fully transparent black.
    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    /// Fully opaque color.
    pub fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Convert straight-alpha RGBA8 into premultiplied RGBA8.
    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }

    /// Convert back to straight alpha. Transparent pixels become `[0, 0, 0, 0]`.
    pub fn to_straight_rgba(self) -> [u8; 4] {
        unpremultiply([self.r, self.g, self.b, self.a])
    }

    /// Channels as `[r, g, b, a]`.
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

fn premul(c: u8, a: u8) -> u8 {
    let c = u16::from(c);
    let a = u16::from(a);
    (((c * a) + 127) / 255) as u8
}

pub(crate) fn unpremultiply(px: [u8; 4]) -> [u8; 4] {
    let a = u32::from(px[3]);
    if a == 0 {
        return [0, 0, 0, 0];
    }
    let un = |c: u8| -> u8 { ((u32::from(c) * 255 + a / 2) / a).min(255) as u8 };
    [un(px[0]), un(px[1]), un(px[2]), px[3]]
}

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3];
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = premul(px[0], a);
        px[1] = premul(px[1], a);
        px[2] = premul(px[2], a);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
