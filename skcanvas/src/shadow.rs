//! Shadow pass derivation.
//!
//! A shadow is the same geometry drawn first with the shadow color, blurred, under the
//! current device matrix translated by the shadow offset.

use crate::blur::BlurMaskFilter;
use crate::style_state::ShadowParams;
use tiny_skia::{Paint, Transform};

/// Paint, mask filter and matrix for one shadow draw. Dropped after the draw.
#[derive(Debug, Clone)]
pub struct ShadowPaint {
    pub paint: Paint<'static>,
    pub filter: BlurMaskFilter,
    pub matrix: Transform,
}

impl ShadowPaint {
    /// Derive the shadow for a draw made with `paint` under `current_matrix`.
    ///
    /// Returns `None` when the shadow color is fully transparent, or when blur and
    /// both offsets are zero.
    pub fn derive(
        shadow: &ShadowParams,
        paint: &Paint<'static>,
        current_matrix: &Transform,
    ) -> Option<Self> {
        if shadow.color.is_transparent() {
            return None;
        }
        if shadow.blur == 0.0 && shadow.offset_x == 0.0 && shadow.offset_y == 0.0 {
            return None;
        }

        let mut shadow_paint = paint.clone();
        shadow_paint.set_color(shadow.color.into());
        let matrix =
            current_matrix.post_concat(Transform::from_translate(shadow.offset_x, shadow.offset_y));

        Some(Self {
            paint: shadow_paint,
            filter: BlurMaskFilter::new((shadow.blur / 2.0).max(1.0)),
            matrix,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    fn params(blur: f32, offset_x: f32, offset_y: f32, color: Color) -> ShadowParams {
        ShadowParams {
            offset_x,
            offset_y,
            blur,
            color,
        }
    }

    #[test]
    fn test_no_shadow_when_transparent_or_inert() {
        let paint = Paint::default();
        let id = Transform::identity();
        let red = Color::from_rgba8(255, 0, 0, 255);
        let transparent = params(4.0, 2.0, 2.0, Color::TRANSPARENT);
        assert!(ShadowPaint::derive(&transparent, &paint, &id).is_none());
        assert!(ShadowPaint::derive(&params(0.0, 0.0, 0.0, red), &paint, &id).is_none());
    }

    #[test]
    fn test_sigma_floor_and_offset_matrix() {
        let paint = Paint::default();
        let current = Transform::from_scale(2.0, 2.0);
        let red = Color::from_rgba8(255, 0, 0, 255);

        let shadow = ShadowPaint::derive(&params(0.0, 3.0, 4.0, red), &paint, &current).unwrap();
        assert_eq!(shadow.filter.sigma, 1.0);
        // Offsets are in device pixels, applied after the current matrix
        assert_eq!(shadow.matrix, Transform::from_row(2.0, 0.0, 0.0, 2.0, 3.0, 4.0));

        let blurred = ShadowPaint::derive(&params(10.0, 0.0, 0.0, red), &paint, &current).unwrap();
        assert_eq!(blurred.filter.sigma, 5.0);
    }
}
