use crate::effects::reflection::{ReflectionConfig, composite_reflection};
use crate::foundation::core::{Rect, ScaleFactor};
use crate::foundation::error::GlossyResult;
use crate::render::snapshot::{SnapshotOpts, capture_snapshot};
use crate::scene::container::VisualContainer;
use crate::view::surface::{InMemorySurface, ReflectionSurface};

/// Where the reflection goes for a container at `container_frame`.
///
/// Origin is `(container.x0, container.y1 + offset)`; size is the container width by the
/// reflection height clamped to `[0, container height]`. The height is snapped to whole device
/// rows at `scale`, so it matches the logical height of the image the compositor produces.
pub fn reflection_frame(
    container_frame: Rect,
    config: &ReflectionConfig,
    scale: ScaleFactor,
) -> Rect {
    let c = container_frame.abs();
    let rows = u32::try_from(scale.to_px(config.clamped_height(c.height()))).unwrap_or(u32::MAX);
    let h = scale.to_units(rows);
    let offset = if config.offset.is_finite() {
        config.offset
    } else {
        0.0
    };
    let y0 = c.y1 + offset;
    Rect::new(c.x0, y0, c.x1, y0 + h)
}

/// Owns the reflection display surface for one container and keeps it up to date.
///
/// Every [`ReflectionView::update_reflection`] call snapshots the container, composites a fresh
/// reflection and presents it; nothing is cached between calls. Configuration setters only move
/// the surface, they never repaint.
///
/// # Threading
///
/// Must be driven from the thread that owns the display surface. Updates take `&mut self`, so
/// they cannot overlap; each one runs to completion before returning.
#[derive(Debug)]
pub struct ReflectionView<S: ReflectionSurface = InMemorySurface> {
    surface: S,
    config: ReflectionConfig,
    scale: ScaleFactor,
    snapshot_opts: SnapshotOpts,
    container_frame: Rect,
    frame: Rect,
    generation: u64,
}

impl ReflectionView<InMemorySurface> {
    /// View backed by an [`InMemorySurface`].
    pub fn in_memory(config: ReflectionConfig, scale: ScaleFactor) -> Self {
        Self::new(InMemorySurface::new(), config, scale)
    }
}

impl<S: ReflectionSurface> ReflectionView<S> {
    /// Create a view that presents into `surface`.
    pub fn new(surface: S, config: ReflectionConfig, scale: ScaleFactor) -> Self {
        let container_frame = Rect::ZERO;
        Self {
            surface,
            frame: reflection_frame(container_frame, &config, scale),
            config,
            scale,
            snapshot_opts: SnapshotOpts::default(),
            container_frame,
            generation: 0,
        }
    }

    /// Override the offscreen allocation limits.
    pub fn with_snapshot_opts(mut self, opts: SnapshotOpts) -> Self {
        self.snapshot_opts = opts;
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &ReflectionConfig {
        &self.config
    }

    /// Replace the whole configuration. Re-lays out the surface; does not repaint.
    pub fn set_config(&mut self, config: ReflectionConfig) {
        self.config = config;
        self.relayout();
    }

    /// Reflection height in display units.
    pub fn reflection_height(&self) -> f64 {
        self.config.height
    }

    /// Set the reflection height; negative or non-finite values become 0.
    pub fn set_reflection_height(&mut self, height: f64) {
        self.config.height = if height.is_finite() {
            height.max(0.0)
        } else {
            0.0
        };
        self.relayout();
    }

    /// Top-row opacity of the reflection.
    pub fn reflection_alpha(&self) -> f32 {
        self.config.alpha
    }

    /// Set the top-row opacity, clamped to `[0, 1]`; NaN becomes 0.
    pub fn set_reflection_alpha(&mut self, alpha: f32) {
        self.config.alpha = if alpha.is_finite() {
            alpha.clamp(0.0, 1.0)
        } else {
            0.0
        };
    }

    /// Gap between the container bottom and the reflection top.
    pub fn reflection_offset(&self) -> f64 {
        self.config.offset
    }

    /// Set the gap; non-finite values become 0.
    pub fn set_reflection_offset(&mut self, offset: f64) {
        self.config.offset = if offset.is_finite() { offset } else { 0.0 };
        self.relayout();
    }

    /// Scale factor used for snapshots.
    pub fn scale(&self) -> ScaleFactor {
        self.scale
    }

    /// Change the scale factor for subsequent updates. Re-lays out the surface; does not repaint.
    pub fn set_scale(&mut self, scale: ScaleFactor) {
        self.scale = scale;
        self.relayout();
    }

    /// Frame of the reflection surface in the container's parent coordinates.
    pub fn frame(&self) -> Rect {
        self.frame
    }

    /// Last container frame seen through an update or a bounds notification.
    pub fn container_frame(&self) -> Rect {
        self.container_frame
    }

    /// Number of reflections presented so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Borrow the display surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutably borrow the display surface.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Consume the view and return its surface.
    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Reposition the reflection after the container moved or resized. Does not repaint, so the
    /// displayed pixels may be stale until the next update.
    pub fn container_bounds_changed(&mut self, container_frame: Rect) {
        self.container_frame = container_frame.abs();
        self.relayout();
    }

    /// Snapshot `container`, build its reflection and present it.
    ///
    /// On a [`crate::GlossyError::RenderResource`] failure nothing is presented and the
    /// previous image and frame stay on screen; retrying is up to the caller. A zero-area
    /// container presents an empty image.
    #[tracing::instrument(skip_all, fields(generation = self.generation))]
    pub fn update_reflection(&mut self, container: &VisualContainer) -> GlossyResult<()> {
        let snapshot = match capture_snapshot(container, self.scale, self.snapshot_opts) {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!(error = %e, "skipping reflection update");
                return Err(e);
            }
        };
        let image = composite_reflection(&snapshot, &self.config);
        drop(snapshot);

        let container_frame = container.frame();
        let frame = reflection_frame(container_frame, &self.config, self.scale);
        self.surface.present(image, frame)?;

        self.container_frame = container_frame;
        self.frame = frame;
        self.generation = self.generation.saturating_add(1);
        tracing::debug!(?frame, "reflection presented");
        Ok(())
    }

    fn relayout(&mut self) {
        self.frame = reflection_frame(self.container_frame, &self.config, self.scale);
        self.surface.set_frame(self.frame);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/view/reflection_view.rs"]
mod tests;
