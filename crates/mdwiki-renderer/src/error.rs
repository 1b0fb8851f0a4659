//! Error types for rendering.

/// Error during rendering.
///
/// Rendering itself cannot fail on any tree shape; the only failure is the
/// output destination rejecting a write.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum RenderError {
    /// Writing to the output failed.
    #[error("failed to write output")]
    Write(#[from] std::io::Error),
}
