//! Pixel readback and image encoding for Canvas2dContext.

use super::Canvas2dContext;
use crate::error::Canvas2dResult;
use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;

/// JPEG quality used when none is requested.
pub const DEFAULT_JPEG_QUALITY: u8 = 92;

impl Canvas2dContext {
    /// Read a rectangle of pixels as straight-alpha RGBA.
    ///
    /// Pixels outside the canvas read as transparent black.
    pub fn get_image_data(&self, x: i32, y: i32, width: u32, height: u32) -> Vec<u8> {
        let pixmap = self.surface.pixmap();
        let pixels = pixmap.pixels();
        let canvas_w = pixmap.width() as i64;
        let canvas_h = pixmap.height() as i64;

        let mut data = vec![0u8; width as usize * height as usize * 4];
        for dy in 0..height as i64 {
            let src_y = y as i64 + dy;
            if src_y < 0 || src_y >= canvas_h {
                continue;
            }
            for dx in 0..width as i64 {
                let src_x = x as i64 + dx;
                if src_x < 0 || src_x >= canvas_w {
                    continue;
                }
                let color = pixels[(src_y * canvas_w + src_x) as usize].demultiply();
                let dst = ((dy * width as i64 + dx) * 4) as usize;
                data[dst..dst + 4].copy_from_slice(&[
                    color.red(),
                    color.green(),
                    color.blue(),
                    color.alpha(),
                ]);
            }
        }
        data
    }

    /// Encode the canvas as PNG with the given pixel density (default 72 ppi).
    pub fn to_png(&self, ppi: Option<f32>) -> Canvas2dResult<Vec<u8>> {
        log::debug!(target: "canvas", "toPNG");
        let ppi = ppi.unwrap_or(72.0);
        let (width, height) = (self.width(), self.height());

        let mut buf = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut buf, width, height);
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);

            // Pixel density metadata (pixels per meter)
            let ppm = (ppi.max(0.0) / 0.0254).round() as u32;
            encoder.set_pixel_dims(Some(png::PixelDimensions {
                xppu: ppm,
                yppu: ppm,
                unit: png::Unit::Meter,
            }));

            let mut writer = encoder.write_header()?;
            let data = self.get_image_data(0, 0, width, height);
            writer.write_image_data(&data)?;
        }
        Ok(buf)
    }

    /// Encode the canvas as JPEG. `quality` is clamped to 1..=100.
    ///
    /// JPEG has no alpha channel; translucent pixels are composited over black.
    pub fn to_jpeg(&self, quality: Option<u8>) -> Canvas2dResult<Vec<u8>> {
        let quality = quality.unwrap_or(DEFAULT_JPEG_QUALITY).clamp(1, 100);
        log::debug!(target: "canvas", "toJPEG quality={}", quality);

        // Premultiplied color is exactly the composite over black
        let rgb: Vec<u8> = self
            .surface
            .pixmap()
            .pixels()
            .iter()
            .flat_map(|p| [p.red(), p.green(), p.blue()])
            .collect();

        let mut buf = Vec::new();
        let mut encoder = JpegEncoder::new_with_quality(&mut buf, quality);
        encoder.encode(&rgb, self.width(), self.height(), ExtendedColorType::Rgb8)?;
        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use crate::context::tests::test_context;

    #[test]
    fn test_get_image_data_unpremultiplies() {
        let mut ctx = test_context(4, 4);
        ctx.set_fill_style("rgba(255, 0, 0, 0.5)");
        ctx.fill_rect(0.0, 0.0, 4.0, 4.0);
        let data = ctx.get_image_data(1, 1, 1, 1);
        assert_eq!(data[3], 128);
        assert!(data[0] >= 254);
        assert_eq!(data[1], 0);
    }

    #[test]
    fn test_get_image_data_out_of_bounds() {
        let mut ctx = test_context(4, 4);
        ctx.fill_rect(0.0, 0.0, 4.0, 4.0);
        let data = ctx.get_image_data(-2, -2, 4, 4);
        assert_eq!(&data[0..4], &[0, 0, 0, 0]);
        // (2, 2) in the window is canvas (0, 0)
        let idx = (2 * 4 + 2) * 4;
        assert_eq!(&data[idx..idx + 4], &[0, 0, 0, 255]);
    }

    #[test]
    fn test_png_signature() {
        let ctx = test_context(8, 8);
        let png = ctx.to_png(None).unwrap();
        assert_eq!(&png[..8], &[137, 80, 78, 71, 13, 10, 26, 10]);
    }

    #[test]
    fn test_jpeg_signature() {
        let ctx = test_context(8, 8);
        let jpeg = ctx.to_jpeg(Some(0)).unwrap();
        assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);
    }
}
