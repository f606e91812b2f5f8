//! Gaussian blur mask filter for shadow layers.

use tiny_skia::{Pixmap, PremultipliedColorU8};

/// Blur applied to shadow geometry before it is composited.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlurMaskFilter {
    pub sigma: f32,
}

impl BlurMaskFilter {
    pub fn new(sigma: f32) -> Self {
        Self { sigma }
    }

    /// Kernel half-width in pixels, `ceil(3 * sigma)`.
    pub fn radius(&self) -> usize {
        if !self.sigma.is_finite() {
            return 0;
        }
        (self.sigma.abs() * 3.0).ceil() as usize
    }

    /// Normalized 1D kernel of `2 * radius + 1` taps.
    pub(crate) fn kernel(&self, radius: usize) -> Vec<f32> {
        if radius == 0 {
            return Vec::new();
        }

        let two_sigma_sq = 2.0 * self.sigma * self.sigma;
        let mut kernel: Vec<f32> = (0..=radius * 2)
            .map(|i| {
                let x = i as f32 - radius as f32;
                (-x * x / two_sigma_sq).exp()
            })
            .collect();

        let sum: f32 = kernel.iter().sum();
        if sum > 0.0 {
            for k in &mut kernel {
                *k /= sum;
            }
        }
        kernel
    }

    /// Blur a premultiplied layer in place. Pixels outside the layer count as transparent.
    pub fn apply(&self, pixmap: &mut Pixmap) {
        let width = pixmap.width() as usize;
        let height = pixmap.height() as usize;
        // Taps further away than the layer extent never land on a pixel
        let radius = self.radius().min(width.max(height));
        let kernel = self.kernel(radius);
        if kernel.is_empty() {
            return;
        }
        let radius = radius as isize;

        let src: Vec<[f32; 4]> = pixmap
            .pixels()
            .iter()
            .map(|p| {
                [
                    p.red() as f32,
                    p.green() as f32,
                    p.blue() as f32,
                    p.alpha() as f32,
                ]
            })
            .collect();

        // Horizontal pass
        let mut temp = vec![[0.0f32; 4]; src.len()];
        for y in 0..height {
            let row = y * width;
            for x in 0..width {
                let mut accum = [0.0f32; 4];
                for (i, weight) in kernel.iter().enumerate() {
                    let sx = x as isize + i as isize - radius;
                    if sx < 0 || sx >= width as isize {
                        continue;
                    }
                    let sample = src[row + sx as usize];
                    for c in 0..4 {
                        accum[c] += sample[c] * weight;
                    }
                }
                temp[row + x] = accum;
            }
        }

        // Vertical pass
        let mut dst = vec![[0.0f32; 4]; src.len()];
        for y in 0..height {
            for x in 0..width {
                let mut accum = [0.0f32; 4];
                for (i, weight) in kernel.iter().enumerate() {
                    let sy = y as isize + i as isize - radius;
                    if sy < 0 || sy >= height as isize {
                        continue;
                    }
                    let sample = temp[sy as usize * width + x];
                    for c in 0..4 {
                        accum[c] += sample[c] * weight;
                    }
                }
                dst[y * width + x] = accum;
            }
        }

        for (pixel, vals) in pixmap.pixels_mut().iter_mut().zip(dst.iter()) {
            let a = vals[3].round().clamp(0.0, 255.0) as u8;
            // Premultiplied channels may not exceed alpha after rounding
            let channel = |v: f32| (v.round().clamp(0.0, 255.0) as u8).min(a);
            let (r, g, b) = (channel(vals[0]), channel(vals[1]), channel(vals[2]));
            *pixel = PremultipliedColorU8::from_rgba(r, g, b, a)
                .unwrap_or(PremultipliedColorU8::TRANSPARENT);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tiny_skia::{Color, Paint, Rect, Transform};

    #[test]
    fn test_kernel_is_normalized() {
        let kernel = BlurMaskFilter::new(2.0).kernel(6);
        assert_eq!(kernel.len(), 13);
        let sum: f32 = kernel.iter().sum();
        assert!((sum - 1.0).abs() < 1e-5);
        assert!(kernel[6] > kernel[5]);
        assert_eq!(kernel[0], kernel[12]);
    }

    #[test]
    fn test_zero_sigma_is_identity() {
        assert_eq!(BlurMaskFilter::new(0.0).radius(), 0);
        assert!(BlurMaskFilter::new(f32::NAN).kernel(0).is_empty());
    }

    #[test]
    fn test_blur_spreads_coverage() {
        let mut pixmap = Pixmap::new(20, 20).unwrap();
        let mut paint = Paint::default();
        paint.set_color(Color::BLACK);
        let rect = Rect::from_xywh(8.0, 8.0, 4.0, 4.0).unwrap();
        pixmap.fill_rect(rect, &paint, Transform::identity(), None);

        let outside = |p: &Pixmap| p.pixel(5, 10).map(|c| c.alpha()).unwrap_or(0);
        assert_eq!(outside(&pixmap), 0);

        BlurMaskFilter::new(2.0).apply(&mut pixmap);
        assert!(outside(&pixmap) > 0);
        let center = pixmap.pixel(10, 10).map(|c| c.alpha()).unwrap_or(0);
        assert!(center < 255);
        assert!(center > outside(&pixmap));
    }

    #[test]
    fn test_huge_sigma_is_bounded_by_layer() {
        let mut pixmap = Pixmap::new(20, 20).unwrap();
        let mut paint = Paint::default();
        paint.set_color(Color::BLACK);
        let rect = Rect::from_xywh(8.0, 8.0, 4.0, 4.0).unwrap();
        pixmap.fill_rect(rect, &paint, Transform::identity(), None);

        BlurMaskFilter::new(1e20).apply(&mut pixmap);
        // Coverage is spread evenly over the whole layer
        let corner = pixmap.pixel(0, 0).map(|c| c.alpha()).unwrap_or(0);
        let center = pixmap.pixel(10, 10).map(|c| c.alpha()).unwrap_or(0);
        assert!(corner > 0);
        assert!(center < 10);
    }
}
