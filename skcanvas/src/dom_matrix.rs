//! DOMMatrix type for 2D transformation matrices.

use tiny_skia::Transform;

/// DOMMatrix represents a 2D transformation matrix.
///
/// The matrix is represented as:
/// ```text
/// | a c e |
/// | b d f |
/// | 0 0 1 |
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DOMMatrix {
    /// Scale X component.
    pub a: f32,
    /// Skew Y component.
    pub b: f32,
    /// Skew X component.
    pub c: f32,
    /// Scale Y component.
    pub d: f32,
    /// Translate X component.
    pub e: f32,
    /// Translate Y component.
    pub f: f32,
}

impl DOMMatrix {
    /// Create a new DOMMatrix with the specified components.
    pub fn new(a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) -> Self {
        Self { a, b, c, d, e, f }
    }

    /// Create an identity matrix.
    pub fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }

    /// The full 3x3 matrix in row-major order.
    pub fn to_row_major(&self) -> [f32; 9] {
        [
            self.a, self.c, self.e, //
            self.b, self.d, self.f, //
            0.0, 0.0, 1.0,
        ]
    }

    /// Build a matrix from a 3x3 row-major array. The projective row is ignored.
    pub fn from_row_major(m: &[f32; 9]) -> Self {
        Self::new(m[0], m[3], m[1], m[4], m[2], m[5])
    }

    pub fn is_finite(&self) -> bool {
        [self.a, self.b, self.c, self.d, self.e, self.f]
            .iter()
            .all(|v| v.is_finite())
    }
}

impl Default for DOMMatrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl From<Transform> for DOMMatrix {
    fn from(t: Transform) -> Self {
        DOMMatrix {
            a: t.sx,
            b: t.ky,
            c: t.kx,
            d: t.sy,
            e: t.tx,
            f: t.ty,
        }
    }
}

impl From<DOMMatrix> for Transform {
    fn from(m: DOMMatrix) -> Self {
        Transform::from_row(m.a, m.b, m.c, m.d, m.e, m.f)
    }
}

/// Map a point through a transform.
pub(crate) fn map_point(transform: &Transform, x: f32, y: f32) -> (f32, f32) {
    (
        transform.sx * x + transform.kx * y + transform.tx,
        transform.ky * x + transform.sy * y + transform.ty,
    )
}

/// Rotation by `angle` radians about the origin.
pub(crate) fn rotation(angle: f32) -> Transform {
    let (sin, cos) = angle.sin_cos();
    Transform::from_row(cos, sin, -sin, cos, 0.0, 0.0)
}

/// Average length of the transformed unit axes.
///
/// Path coordinates are stored in device space, so a user-space stroke width has to
/// be multiplied by this factor to look the way it would under the transform.
pub(crate) fn average_scale(t: &Transform) -> f32 {
    ((t.sx * t.sx + t.ky * t.ky).sqrt() + (t.kx * t.kx + t.sy * t.sy).sqrt()) / 2.0
}
