use anyhow::Context as _;

use crate::foundation::core::{Rgba8Premul, premultiply_rgba8_in_place};
use crate::foundation::error::{GlossyError, GlossyResult};

/// A caller-supplied bitmap, stored as premultiplied RGBA8, row-major, tightly packed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelImage {
    width: u32,
    height: u32,
    rgba8_premul: Vec<u8>,
}

impl PixelImage {
    /// Wrap premultiplied RGBA8 bytes. `data.len()` must equal `width * height * 4`.
    pub fn from_premul_rgba8(width: u32, height: u32, data: Vec<u8>) -> GlossyResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| GlossyError::validation("image buffer size overflow"))?;
        if data.len() != expected {
            return Err(GlossyError::validation(format!(
                "image buffer has {} bytes, expected {expected} for {width}x{height}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba8_premul: data,
        })
    }

    /// Wrap straight-alpha RGBA8 bytes, premultiplying them.
    pub fn from_straight_rgba8(width: u32, height: u32, mut data: Vec<u8>) -> GlossyResult<Self> {
        premultiply_rgba8_in_place(&mut data);
        Self::from_premul_rgba8(width, height, data)
    }

    /// A `width x height` image filled with one color.
    pub fn solid(width: u32, height: u32, color: Rgba8Premul) -> Self {
        let px = (width as usize).saturating_mul(height as usize);
        let mut rgba8_premul = Vec::with_capacity(px.saturating_mul(4));
        for _ in 0..px {
            rgba8_premul.extend_from_slice(&color.to_array());
        }
        Self {
            width,
            height,
            rgba8_premul,
        }
    }

    /// Decode encoded image bytes (PNG, JPEG, ...) and convert to premultiplied RGBA8.
    pub fn decode(bytes: &[u8]) -> GlossyResult<Self> {
        let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
        let rgba = dyn_img.to_rgba8();
        let (width, height) = rgba.dimensions();
        Self::from_straight_rgba8(width, height, rgba.into_raw())
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Premultiplied RGBA8 bytes.
    pub fn data(&self) -> &[u8] {
        &self.rgba8_premul
    }

    /// Return `true` when the image has no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/image.rs"]
mod tests;
