//! Canvas element: owns a 2D context and exports its pixels.

use crate::context::{Canvas2dContext, Canvas2dContextBuilder};
use crate::error::{Canvas2dError, Canvas2dResult};
use base64::prelude::BASE64_STANDARD;
use base64::Engine;

pub const PNG_MIME: &str = "image/png";
pub const JPEG_MIME: &str = "image/jpeg";

/// A drawable canvas. The only supported context type is `"2d"`.
pub struct Canvas {
    context: Option<Canvas2dContext>,
}

impl Canvas {
    /// Create a canvas with the default font configuration.
    pub fn new(width: u32, height: u32) -> Canvas2dResult<Self> {
        Ok(Self::from_context(Canvas2dContext::new(width, height)?))
    }

    pub fn from_builder(builder: Canvas2dContextBuilder) -> Canvas2dResult<Self> {
        Ok(Self::from_context(builder.build()?))
    }

    pub fn from_context(context: Canvas2dContext) -> Self {
        Self {
            context: Some(context),
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.context.is_none()
    }

    fn context(&self) -> Canvas2dResult<&Canvas2dContext> {
        self.context.as_ref().ok_or(Canvas2dError::CanvasDisposed)
    }

    pub fn width(&self) -> Canvas2dResult<u32> {
        Ok(self.context()?.width())
    }

    pub fn height(&self) -> Canvas2dResult<u32> {
        Ok(self.context()?.height())
    }

    /// The rendering context for `kind`.
    pub fn get_context(&mut self, kind: &str) -> Canvas2dResult<&mut Canvas2dContext> {
        if kind != "2d" {
            return Err(Canvas2dError::UnsupportedContextType(kind.to_string()));
        }
        self.context.as_mut().ok_or(Canvas2dError::CanvasDisposed)
    }

    /// Encode the pixels as `mime` (`image/png` or `image/jpeg`).
    ///
    /// `quality` applies to JPEG only and is a number in [0, 1].
    pub fn to_buffer(&self, mime: &str, quality: Option<f32>) -> Canvas2dResult<Vec<u8>> {
        let context = self.context()?;
        match mime.to_ascii_lowercase().as_str() {
            PNG_MIME => context.to_png(None),
            JPEG_MIME => context.to_jpeg(quality.and_then(jpeg_quality)),
            _ => Err(Canvas2dError::UnsupportedImageFormat(mime.to_string())),
        }
    }

    /// Encode the pixels as a base64 data URL. Unknown types fall back to PNG.
    pub fn to_data_url(&self, mime: Option<&str>, quality: Option<f32>) -> Canvas2dResult<String> {
        let requested = mime.unwrap_or(PNG_MIME).to_ascii_lowercase();
        let mime = if requested == JPEG_MIME {
            JPEG_MIME
        } else {
            PNG_MIME
        };
        let bytes = self.to_buffer(mime, quality)?;
        Ok(format!("data:{};base64,{}", mime, BASE64_STANDARD.encode(bytes)))
    }

    /// Release the context. Later calls fail with [`Canvas2dError::CanvasDisposed`].
    pub fn dispose(&mut self) {
        if let Some(context) = self.context.take() {
            context.dispose();
        }
    }
}

/// Map a [0, 1] quality to JPEG's 1..=100 scale. Out-of-range values use the default.
fn jpeg_quality(quality: f32) -> Option<u8> {
    if !quality.is_finite() || !(0.0..=1.0).contains(&quality) {
        return None;
    }
    Some((quality * 100.0).round().max(1.0) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::tests::test_context;

    #[test]
    fn test_only_2d_context() {
        let mut canvas = Canvas::from_context(test_context(10, 10));
        assert!(canvas.get_context("2d").is_ok());
        assert!(matches!(
            canvas.get_context("webgl"),
            Err(Canvas2dError::UnsupportedContextType(kind)) if kind == "webgl"
        ));
    }

    #[test]
    fn test_data_url_prefix() {
        let canvas = Canvas::from_context(test_context(10, 10));
        assert!(canvas
            .to_data_url(None, None)
            .unwrap()
            .starts_with("data:image/png;base64,"));
        assert!(canvas
            .to_data_url(Some("image/jpeg"), Some(0.5))
            .unwrap()
            .starts_with("data:image/jpeg;base64,"));
        assert!(canvas
            .to_data_url(Some("image/webp"), None)
            .unwrap()
            .starts_with("data:image/png;base64,"));
    }

    #[test]
    fn test_to_buffer_rejects_unknown_type() {
        let canvas = Canvas::from_context(test_context(10, 10));
        assert!(matches!(
            canvas.to_buffer("image/gif", None),
            Err(Canvas2dError::UnsupportedImageFormat(_))
        ));
    }

    #[test]
    fn test_disposed_canvas_refuses_work() {
        let mut canvas = Canvas::from_context(test_context(10, 10));
        canvas.dispose();
        assert!(canvas.is_disposed());
        assert!(matches!(
            canvas.get_context("2d"),
            Err(Canvas2dError::CanvasDisposed)
        ));
        assert!(canvas.to_data_url(None, None).is_err());
        canvas.dispose();
    }

    #[test]
    fn test_jpeg_quality_mapping() {
        assert_eq!(jpeg_quality(0.92), Some(92));
        assert_eq!(jpeg_quality(0.0), Some(1));
        assert_eq!(jpeg_quality(1.5), None);
        assert_eq!(jpeg_quality(f32::NAN), None);
    }
}
