use crate::foundation::core::{Point, Rect, Rgba8Premul, Size};
use crate::foundation::error::GlossyResult;
use crate::render::surface::DrawSurface;
use crate::scene::element::{Element, Renderable};

/// The composition being reflected: a frame, an optional background and an ordered child list.
///
/// Owned and mutated by the caller. The reflection pipeline only borrows it for the duration of
/// one render and never writes to it. Children paint in list order, in the container's local
/// space where `(0, 0)` is the frame's top-left corner.
#[derive(Clone, Debug)]
pub struct VisualContainer {
    frame: Rect,
    background: Option<Rgba8Premul>,
    opacity: f32,
    clips_to_bounds: bool,
    children: Vec<Element>,
}

impl VisualContainer {
    /// Empty, fully opaque, unclipped container at `frame` (parent coordinates).
    pub fn new(frame: Rect) -> Self {
        Self {
            frame: frame.abs(),
            background: None,
            opacity: 1.0,
            clips_to_bounds: false,
            children: Vec::new(),
        }
    }

    /// Set a background fill covering the bounds.
    pub fn with_background(mut self, color: Rgba8Premul) -> Self {
        self.background = Some(color);
        self
    }

    /// Set group opacity, clamped to `[0, 1]`.
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.set_opacity(opacity);
        self
    }

    /// Clip children to the container bounds.
    pub fn with_clip(mut self, clips: bool) -> Self {
        self.clips_to_bounds = clips;
        self
    }

    /// Append a child.
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Frame in parent coordinates.
    pub fn frame(&self) -> Rect {
        self.frame
    }

    /// Move/resize the container.
    pub fn set_frame(&mut self, frame: Rect) {
        self.frame = frame.abs();
    }

    /// Local bounds: origin `(0, 0)`, frame size.
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(Point::ORIGIN, self.frame.size())
    }

    /// Frame size.
    pub fn size(&self) -> Size {
        self.frame.size()
    }

    /// Background color, if any.
    pub fn background(&self) -> Option<Rgba8Premul> {
        self.background
    }

    /// Replace the background.
    pub fn set_background(&mut self, color: Option<Rgba8Premul>) {
        self.background = color;
    }

    /// Group opacity.
    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Set group opacity; non-finite values reset to 1.
    pub fn set_opacity(&mut self, opacity: f32) {
        self.opacity = if opacity.is_finite() {
            opacity.clamp(0.0, 1.0)
        } else {
            1.0
        };
    }

    /// Whether children are clipped to the bounds.
    pub fn clips_to_bounds(&self) -> bool {
        self.clips_to_bounds
    }

    /// Children in paint order.
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Mutable access to the child list.
    pub fn children_mut(&mut self) -> &mut Vec<Element> {
        &mut self.children
    }

    /// Append a child on top of the existing ones.
    pub fn push(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Remove all children.
    pub fn clear(&mut self) {
        self.children.clear();
    }

    fn render_contents(&self, surface: &mut DrawSurface) -> GlossyResult<()> {
        if let Some(bg) = self.background {
            surface.fill_rect(self.bounds(), bg);
        }
        for child in &self.children {
            child.render(surface)?;
        }
        Ok(())
    }
}

impl Renderable for VisualContainer {
    fn render(&self, surface: &mut DrawSurface) -> GlossyResult<()> {
        if self.opacity <= 0.0 {
            return Ok(());
        }
        surface.with_opacity(self.opacity, |s| {
            if self.clips_to_bounds {
                s.with_clip(self.bounds(), |s| self.render_contents(s))
            } else {
                self.render_contents(s)
            }
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/container.rs"]
mod tests;
