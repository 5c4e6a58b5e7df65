//! Glossy renders a vertically flipped, fading reflection of an arbitrary visual composition
//! and places it directly beneath the original, the classic "glossy shelf" effect.
//!
//! # Pipeline overview
//!
//! 1. **Snapshot**: `VisualContainer + ScaleFactor -> RawSnapshot` (offscreen CPU raster of the
//!    container and every nested child, in paint order)
//! 2. **Composite**: `RawSnapshot + ReflectionConfig -> ReflectionImage` (crop the bottom strip,
//!    flip it, multiply by a linear alpha ramp)
//! 3. **Present**: [`ReflectionView`] pushes the image and its frame into a
//!    [`ReflectionSurface`] and keeps the frame in sync with the container's bounds
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Synchronous and deterministic**: an update runs to completion on the calling thread and
//!   the same container always yields the same pixels. Nothing is cached between updates.
//! - **Premultiplied RGBA8** end-to-end.
//! - **Total on degenerate input**: zero-area containers and zero-height reflections produce
//!   empty images, not errors. Only offscreen allocation failures are reported.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod effects;
mod foundation;
mod render;
mod scene;
mod view;

pub use crate::effects::composite::{mask_pixel, mask_row_in_place, over, over_in_place};
pub use crate::effects::gradient::GradientMask;
pub use crate::effects::reflection::{ReflectionConfig, ReflectionImage, composite_reflection};
pub use crate::effects::shelf::{compose_shelf, compose_shelf_with_opts};
pub use crate::foundation::core::{
    Affine, BezPath, Point, Rect, Rgba8Premul, ScaleFactor, Size, Vec2,
};
pub use crate::foundation::error::{GlossyError, GlossyResult};
pub use crate::render::frame::FrameRGBA;
pub use crate::render::snapshot::{RawSnapshot, SnapshotOpts, capture_snapshot};
pub use crate::render::surface::DrawSurface;
pub use crate::scene::container::VisualContainer;
pub use crate::scene::element::{Element, Renderable};
pub use crate::scene::image::PixelImage;
pub use crate::view::reflection_view::{ReflectionView, reflection_frame};
pub use crate::view::surface::{InMemorySurface, ReflectionSurface};
