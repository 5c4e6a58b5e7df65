use crate::foundation::math::unit_to_u8;

/// Linear top-to-bottom alpha ramp used to fade a reflection.
///
/// Row 0 carries `base_alpha`, the last row carries 0, and values in between fall off linearly.
/// A single-row mask keeps `base_alpha`. The mask is pure: it is fully determined by its height
/// and base alpha.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientMask {
    height: u32,
    base_alpha: f32,
}

impl GradientMask {
    /// Mask of `height` rows starting at `base_alpha` (clamped to `[0, 1]`, NaN becomes 0).
    pub fn new(height: u32, base_alpha: f32) -> Self {
        let base_alpha = if base_alpha.is_finite() {
            base_alpha.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self { height, base_alpha }
    }

    /// Number of rows.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Alpha at row 0.
    pub fn base_alpha(&self) -> f32 {
        self.base_alpha
    }

    /// Alpha for row `y`; 0 outside the mask.
    pub fn alpha_at(&self, y: u32) -> f32 {
        if y >= self.height {
            return 0.0;
        }
        if self.height == 1 {
            return self.base_alpha;
        }
        let t = f64::from(y) / f64::from(self.height - 1);
        (f64::from(self.base_alpha) * (1.0 - t)) as f32
    }

    /// Alpha for row `y` quantized to `0..=255`.
    pub fn coverage_u8(&self, y: u32) -> u8 {
        unit_to_u8(self.alpha_at(y))
    }

    /// Quantized alpha for every row, top to bottom.
    pub fn coverage_rows(&self) -> impl Iterator<Item = u8> + '_ {
        (0..self.height).map(|y| self.coverage_u8(y))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/gradient.rs"]
mod tests;
