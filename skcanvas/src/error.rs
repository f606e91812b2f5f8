//! Error types for skcanvas.

use thiserror::Error;

/// Result type alias using Canvas2dError.
pub type Canvas2dResult<T> = Result<T, Canvas2dError>;

/// Errors that can occur in Canvas 2D operations.
///
/// Most attribute and path calls never fail: non-finite arguments are ignored and
/// unparseable strings fall back to defaults. The variants here are the loud cases.
#[derive(Debug, Error)]
pub enum Canvas2dError {
    /// Invalid canvas dimensions (must be positive and within limits).
    #[error("Invalid dimensions: width={width}, height={height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// A negative radius was passed to an arc-family call.
    #[error("{operation}: the radius provided ({radius}) is negative")]
    NegativeRadius {
        operation: &'static str,
        radius: f32,
    },

    /// PNG encoding error.
    #[error("PNG encoding error: {0}")]
    PngError(String),

    /// JPEG encoding error.
    #[error("JPEG encoding error: {0}")]
    JpegError(String),

    /// `get_context` was asked for something other than "2d".
    #[error("Unsupported context type: {0}")]
    UnsupportedContextType(String),

    /// Requested image encoding is not available.
    #[error("Unsupported image format: {0}")]
    UnsupportedImageFormat(String),

    /// The canvas element was disposed and no longer owns a context.
    #[error("Canvas has been disposed")]
    CanvasDisposed,
}

impl From<png::EncodingError> for Canvas2dError {
    fn from(err: png::EncodingError) -> Self {
        Canvas2dError::PngError(err.to_string())
    }
}

impl From<image::ImageError> for Canvas2dError {
    fn from(err: image::ImageError) -> Self {
        Canvas2dError::JpegError(err.to_string())
    }
}
