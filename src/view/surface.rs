use crate::effects::reflection::ReflectionImage;
use crate::foundation::core::Rect;
use crate::foundation::error::GlossyResult;

/// Anything able to show a pixel image at a rectangle.
///
/// Owned by a [`crate::ReflectionView`], which pushes a new image after every successful
/// update and a new frame whenever the container moves. The surface owns each presented image
/// until the next one replaces it.
pub trait ReflectionSurface {
    /// Replace the displayed image and place it at `frame` (display units).
    fn present(&mut self, image: ReflectionImage, frame: Rect) -> GlossyResult<()>;
    /// Move/resize without repainting.
    fn set_frame(&mut self, frame: Rect);
}

/// Surface that keeps the latest image and frame in memory. Useful for tests and for hosts that
/// pull pixels rather than being pushed to.
#[derive(Debug, Default, Clone)]
pub struct InMemorySurface {
    image: Option<ReflectionImage>,
    frame: Rect,
    presents: u64,
}

impl InMemorySurface {
    /// Create an empty surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest presented image, if any.
    pub fn image(&self) -> Option<&ReflectionImage> {
        self.image.as_ref()
    }

    /// Take ownership of the latest image.
    pub fn take_image(&mut self) -> Option<ReflectionImage> {
        self.image.take()
    }

    /// Current frame.
    pub fn frame(&self) -> Rect {
        self.frame
    }

    /// Number of images presented so far.
    pub fn presents(&self) -> u64 {
        self.presents
    }
}

impl ReflectionSurface for InMemorySurface {
    fn present(&mut self, image: ReflectionImage, frame: Rect) -> GlossyResult<()> {
        self.image = Some(image);
        self.frame = frame;
        self.presents = self.presents.saturating_add(1);
        Ok(())
    }

    fn set_frame(&mut self, frame: Rect) {
        self.frame = frame;
    }
}
