//! Error types for rendering and export.

use thiserror::Error;

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors raised while building an exportable image.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The PNG encoder failed.
    #[error("image encoding failed: {0}")]
    Encode(#[from] image::ImageError),

    /// An artifact was requested before any prediction exists.
    #[error("no prediction to compose")]
    NoPrediction,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(RenderError::NoPrediction.to_string(), "no prediction to compose");
    }
}
