use std::path::Path;

use crate::effects::composite::mask_row_in_place;
use crate::effects::gradient::GradientMask;
use crate::foundation::core::{ScaleFactor, Size, unpremultiply};
use crate::foundation::error::{GlossyError, GlossyResult};
use crate::foundation::math::Fnv1a64;
use crate::render::frame::pixel_at;
use crate::render::snapshot::RawSnapshot;

/// Caller-set reflection parameters, all in display units.
///
/// Changing a value never re-renders on its own; it takes effect on the next
/// [`crate::ReflectionView::update_reflection`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReflectionConfig {
    /// Height of the reflection. Clamped to `[0, container height]` when used.
    pub height: f64,
    /// Opacity of the reflection's top row, in `[0, 1]`.
    pub alpha: f32,
    /// Gap between the container's bottom edge and the reflection's top edge. Negative values
    /// overlap the container.
    pub offset: f64,
}

impl Default for ReflectionConfig {
    fn default() -> Self {
        Self {
            height: 60.0,
            alpha: 0.5,
            offset: 0.0,
        }
    }
}

impl ReflectionConfig {
    /// Reject non-finite values, negative heights and alpha outside `[0, 1]`.
    pub fn validate(&self) -> GlossyResult<()> {
        if !self.height.is_finite() || self.height < 0.0 {
            return Err(GlossyError::validation(format!(
                "reflection height must be finite and >= 0, got {}",
                self.height
            )));
        }
        if !self.alpha.is_finite() || !(0.0..=1.0).contains(&self.alpha) {
            return Err(GlossyError::validation(format!(
                "reflection alpha must be in [0, 1], got {}",
                self.alpha
            )));
        }
        if !self.offset.is_finite() {
            return Err(GlossyError::validation(format!(
                "reflection offset must be finite, got {}",
                self.offset
            )));
        }
        Ok(())
    }

    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json_str(s: &str) -> GlossyResult<Self> {
        let cfg: Self = serde_json::from_str(s)
            .map_err(|e| GlossyError::validation(format!("invalid reflection config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> GlossyResult<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path).map_err(|e| {
            GlossyError::io(format!("failed to read config '{}': {e}", path.display()))
        })?;
        Self::from_json_str(&s)
    }

    /// Reflection height clamped to `[0, container_height]`.
    pub fn clamped_height(&self, container_height: f64) -> f64 {
        let max = if container_height.is_finite() {
            container_height.max(0.0)
        } else {
            0.0
        };
        if self.height.is_nan() {
            return 0.0;
        }
        self.height.clamp(0.0, max)
    }
}

/// The final flipped, faded reflection, premultiplied RGBA8.
///
/// Its width always matches the snapshot it was made from; its height is the requested
/// reflection height in device pixels, clamped to the snapshot height.
#[derive(Clone, Debug, PartialEq)]
pub struct ReflectionImage {
    width: u32,
    height: u32,
    scale: ScaleFactor,
    data: Vec<u8>,
}

impl ReflectionImage {
    /// An image with no rows.
    pub fn empty(width: u32, scale: ScaleFactor) -> Self {
        Self {
            width,
            height: 0,
            scale,
            data: Vec::new(),
        }
    }

    /// Width in device pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in device pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Scale factor shared with the source snapshot.
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

    /// Return `true` when there is nothing to display.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Pixel at `(x, y)`, or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        pixel_at(&self.data, self.width, self.height, x, y)
    }

    /// Maximum alpha found in row `y`.
    pub fn row_alpha(&self, y: u32) -> Option<u8> {
        if y >= self.height {
            return None;
        }
        let stride = (self.width as usize) * 4;
        let start = (y as usize) * stride;
        self.data[start..start + stride]
            .chunks_exact(4)
            .map(|px| px[3])
            .max()
    }

    /// Stable 64-bit hash of the dimensions and pixels.
    ///
    /// The pipeline never caches; callers can compare fingerprints to skip redundant uploads.
    pub fn fingerprint(&self) -> u64 {
        let mut h = Fnv1a64::new_default();
        h.write_u32(self.width);
        h.write_u32(self.height);
        h.write_u64(self.scale.get().to_bits());
        h.write_bytes(&self.data);
        h.finish()
    }

    /// Convert into a straight-alpha `image::RgbaImage`.
    pub fn to_rgba_image(&self) -> GlossyResult<image::RgbaImage> {
        let mut data = self.data.clone();
        for px in data.chunks_exact_mut(4) {
            let out = unpremultiply([px[0], px[1], px[2], px[3]]);
            px.copy_from_slice(&out);
        }
        image::RgbaImage::from_raw(self.width, self.height, data).ok_or_else(|| {
            GlossyError::validation("reflection buffer does not match its dimensions")
        })
    }
}

/// Turn a snapshot into its reflection.
///
/// 1. Keep the bottom `config.height * scale` rows (clamped to the snapshot height).
/// 2. Reverse their order so the row nearest the container's bottom edge comes first.
/// 3. Multiply each row by a [`GradientMask`] starting at `config.alpha` and ending at 0.
///
/// Total over its input: an empty or malformed snapshot, or a zero height, gives an empty image.
#[tracing::instrument(
    skip(snapshot),
    fields(src_w = snapshot.width(), src_h = snapshot.height())
)]
pub fn composite_reflection(snapshot: &RawSnapshot, config: &ReflectionConfig) -> ReflectionImage {
    let scale = snapshot.scale();
    let width = snapshot.width();
    let expected = (width as usize)
        .saturating_mul(snapshot.height() as usize)
        .saturating_mul(4);
    if snapshot.is_empty() || snapshot.data().len() != expected {
        tracing::debug!("degenerate snapshot, returning empty reflection");
        return ReflectionImage::empty(width, scale);
    }

    let requested = if config.height.is_finite() {
        scale.to_px(config.height)
    } else {
        0
    };
    let rows = requested.min(u64::from(snapshot.height())) as u32;
    if rows == 0 {
        return ReflectionImage::empty(width, scale);
    }

    let mask = GradientMask::new(rows, config.alpha);
    let stride = (width as usize) * 4;
    let mut data = Vec::with_capacity(stride * rows as usize);
    let last = snapshot.height() - 1;
    for (y, coverage) in mask.coverage_rows().enumerate() {
        let Some(src) = snapshot.row(last - y as u32) else {
            return ReflectionImage::empty(width, scale);
        };
        let start = data.len();
        data.extend_from_slice(src);
        mask_row_in_place(&mut data[start..], coverage);
    }

    ReflectionImage {
        width,
        height: rows,
        scale,
        data,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/reflection.rs"]
mod tests;
