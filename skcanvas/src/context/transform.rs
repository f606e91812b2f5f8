//! Transformation operations for Canvas2dContext.
//!
//! Each call changes only the matrix used for coordinates passed afterwards; points
//! already in the path keep the transform they were added under.

use super::Canvas2dContext;
use crate::dom_matrix::{rotation, DOMMatrix};
use crate::geometry::all_finite;
use tiny_skia::Transform;

impl Canvas2dContext {
    /// Translate the current transformation matrix.
    pub fn translate(&mut self, x: f32, y: f32) {
        log::debug!(target: "canvas", "translate {} {}", x, y);
        if all_finite(&[x, y]) {
            self.transform = self.transform.pre_translate(x, y);
        }
    }

    /// Rotate the current transformation matrix by `angle` radians.
    pub fn rotate(&mut self, angle: f32) {
        log::debug!(target: "canvas", "rotate {}", angle);
        if angle.is_finite() {
            self.transform = self.transform.pre_concat(rotation(angle));
        }
    }

    /// Scale the current transformation matrix.
    pub fn scale(&mut self, x: f32, y: f32) {
        log::debug!(target: "canvas", "scale {} {}", x, y);
        if all_finite(&[x, y]) {
            self.transform = self.transform.pre_scale(x, y);
        }
    }

    /// Multiply the current transformation matrix by `m`.
    pub fn transform(&mut self, m: DOMMatrix) {
        log::debug!(target: "canvas", "transform {:?}", m);
        if m.is_finite() {
            self.transform = self.transform.pre_concat(m.into());
        }
    }

    /// Replace the current transformation matrix.
    pub fn set_transform(&mut self, m: DOMMatrix) {
        log::debug!(target: "canvas", "setTransform {:?}", m);
        if m.is_finite() {
            self.transform = m.into();
        }
    }

    /// Reset the current transformation matrix to identity.
    pub fn reset_transform(&mut self) {
        log::debug!(target: "canvas", "resetTransform");
        self.transform = Transform::identity();
    }

    /// Get the current transformation matrix.
    pub fn get_transform(&self) -> DOMMatrix {
        self.transform.into()
    }
}
