/// Result alias used throughout the crate.
pub type GlossyResult<T> = Result<T, GlossyError>;

/// Errors surfaced by snapshotting, compositing and the reflection view.
///
/// Zero-area inputs are deliberately absent: they are a normal transient layout state and
/// produce empty snapshots/images instead of errors.
#[derive(thiserror::Error, Debug)]
pub enum GlossyError {
    /// The offscreen drawing surface could not be allocated (size over backend or configured
    /// limits). The caller should skip this update and may retry on the next content change.
    #[error("render resource error: {0}")]
    RenderResource(String),

    /// A caller-provided value was rejected (non-finite scale, alpha out of range, bad buffers).
    #[error("validation error: {0}")]
    Validation(String),

    /// Reading or writing an external file failed.
    #[error("io error: {0}")]
    Io(String),

    /// Any other failure, with its source preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GlossyError {
    /// Build a [`GlossyError::RenderResource`].
    pub fn render_resource(msg: impl Into<String>) -> Self {
        Self::RenderResource(msg.into())
    }

    /// Build a [`GlossyError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`GlossyError::Io`].
    pub fn io(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    /// Return `true` for allocation failures that leave the previous reflection in place.
    pub fn is_render_resource(&self) -> bool {
        matches!(self, Self::RenderResource(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
