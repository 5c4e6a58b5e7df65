use std::sync::Arc;

use crate::foundation::core::{Affine, BezPath, Rect, Rgba8Premul};
use crate::foundation::error::GlossyResult;
use crate::render::surface::DrawSurface;
use crate::scene::container::VisualContainer;
use crate::scene::image::PixelImage;

/// Anything that can draw itself into a [`DrawSurface`].
///
/// Implementations draw in their own local coordinate space (display units); placement is the
/// caller's job. Rendering must not mutate the element.
pub trait Renderable {
    /// Draw into `surface` using its current transform.
    fn render(&self, surface: &mut DrawSurface) -> GlossyResult<()>;
}

/// One child of a [`VisualContainer`], drawn in the container's local coordinates.
#[derive(Clone)]
pub enum Element {
    /// Axis-aligned filled rectangle.
    Solid {
        /// Rectangle in container-local units.
        rect: Rect,
        /// Fill color.
        color: Rgba8Premul,
    },
    /// Filled vector path (non-zero winding).
    Path {
        /// Path in container-local units.
        path: BezPath,
        /// Fill color.
        color: Rgba8Premul,
    },
    /// Bitmap stretched into a rectangle.
    Image {
        /// Destination rectangle in container-local units.
        rect: Rect,
        /// Shared pixels.
        image: Arc<PixelImage>,
    },
    /// Nested container placed at its own frame origin.
    Container(VisualContainer),
    /// Caller-defined drawing, rendered with the container-local transform.
    Custom(Arc<dyn Renderable + Send + Sync>),
}

impl Element {
    /// Solid rectangle.
    pub fn solid(rect: Rect, color: Rgba8Premul) -> Self {
        Self::Solid { rect, color }
    }

    /// Filled path.
    pub fn path(path: BezPath, color: Rgba8Premul) -> Self {
        Self::Path { path, color }
    }

    /// Image stretched into `rect`.
    pub fn image(rect: Rect, image: impl Into<Arc<PixelImage>>) -> Self {
        Self::Image {
            rect,
            image: image.into(),
        }
    }

    /// Nested container.
    pub fn container(container: VisualContainer) -> Self {
        Self::Container(container)
    }

    /// Caller-defined renderable.
    pub fn custom(r: impl Renderable + Send + Sync + 'static) -> Self {
        Self::Custom(Arc::new(r))
    }
}

impl std::fmt::Debug for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Solid { rect, color } => f
                .debug_struct("Solid")
                .field("rect", rect)
                .field("color", color)
                .finish(),
            Self::Path { path, color } => f
                .debug_struct("Path")
                .field("elements", &path.elements().len())
                .field("color", color)
                .finish(),
            Self::Image { rect, image } => f
                .debug_struct("Image")
                .field("rect", rect)
                .field("width", &image.width())
                .field("height", &image.height())
                .finish(),
            Self::Container(c) => f.debug_tuple("Container").field(c).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl Renderable for Element {
    fn render(&self, surface: &mut DrawSurface) -> GlossyResult<()> {
        match self {
            Self::Solid { rect, color } => {
                surface.fill_rect(*rect, *color);
                Ok(())
            }
            Self::Path { path, color } => {
                surface.fill_path(path, *color);
                Ok(())
            }
            Self::Image { rect, image } => surface.draw_image(*rect, image),
            Self::Container(c) => {
                let origin = c.frame().origin();
                surface.with_transform(Affine::translate(origin.to_vec2()), |s| c.render(s))
            }
            Self::Custom(r) => r.render(surface),
        }
    }
}
