use crate::foundation::core::unpremultiply;
use crate::foundation::error::{GlossyError, GlossyResult};

/// A rendered canvas as RGBA8 pixels.
///
/// Frames produced by this crate are **premultiplied alpha**; the `premultiplied` flag makes
/// this explicit at API boundaries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Pixel at `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        pixel_at(&self.data, self.width, self.height, x, y)
    }

    /// Convert into a straight-alpha `image::RgbaImage`, e.g. for PNG encoding.
    pub fn to_rgba_image(&self) -> GlossyResult<image::RgbaImage> {
        let mut data = self.data.clone();
        if self.premultiplied {
            for px in data.chunks_exact_mut(4) {
                let out = unpremultiply([px[0], px[1], px[2], px[3]]);
                px.copy_from_slice(&out);
            }
        }
        image::RgbaImage::from_raw(self.width, self.height, data)
            .ok_or_else(|| GlossyError::validation("frame buffer does not match its dimensions"))
    }
}

pub(crate) fn pixel_at(data: &[u8], width: u32, height: u32, x: u32, y: u32) -> Option<[u8; 4]> {
    if x >= width || y >= height {
        return None;
    }
    let idx = ((y as usize) * (width as usize) + (x as usize)) * 4;
    let px = data.get(idx..idx + 4)?;
    Some([px[0], px[1], px[2], px[3]])
}
