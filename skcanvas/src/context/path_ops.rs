//! Path building operations for Canvas2dContext.

use super::Canvas2dContext;
use crate::error::Canvas2dResult;
use crate::geometry::{
    ArcParams, ArcToParams, CubicBezierParams, EllipseParams, QuadraticBezierParams, RectParams,
};
use crate::path_state::PathPhase;

impl Canvas2dContext {
    /// Begin a new path.
    pub fn begin_path(&mut self) {
        log::debug!(target: "canvas", "beginPath");
        self.path.begin_path();
    }

    /// Move to a point without drawing, starting a new subpath.
    pub fn move_to(&mut self, x: f32, y: f32) {
        log::debug!(target: "canvas", "moveTo {} {}", x, y);
        self.path.move_to(&self.transform, x, y);
    }

    /// Draw a line to a point. Without a current point this only sets one.
    pub fn line_to(&mut self, x: f32, y: f32) {
        log::debug!(target: "canvas", "lineTo {} {}", x, y);
        self.path.line_to(&self.transform, x, y);
    }

    /// Add a cubic Bezier curve to the path.
    pub fn bezier_curve_to(&mut self, params: &CubicBezierParams) {
        log::debug!(
            target: "canvas",
            "bezierCurveTo {} {} {} {} {} {}",
            params.cp1x, params.cp1y, params.cp2x, params.cp2y, params.x, params.y
        );
        self.path.bezier_curve_to(&self.transform, params);
    }

    /// Add a quadratic Bezier curve to the path.
    pub fn quadratic_curve_to(&mut self, params: &QuadraticBezierParams) {
        log::debug!(
            target: "canvas",
            "quadraticCurveTo {} {} {} {}",
            params.cpx, params.cpy, params.x, params.y
        );
        self.path.quadratic_curve_to(&self.transform, params);
    }

    /// Add a circular arc. Errors on a negative radius, leaving the path untouched.
    pub fn arc(&mut self, params: &ArcParams) -> Canvas2dResult<()> {
        log::debug!(
            target: "canvas",
            "arc {} {} {} {} {} {}",
            params.x,
            params.y,
            params.radius,
            params.start_angle,
            params.end_angle,
            params.anticlockwise
        );
        self.path.arc(&self.transform, params)
    }

    /// Add an arc tangent to the lines through the current point, (x1, y1) and (x2, y2).
    pub fn arc_to(&mut self, params: &ArcToParams) -> Canvas2dResult<()> {
        log::debug!(
            target: "canvas",
            "arcTo {} {} {} {} {}",
            params.x1, params.y1, params.x2, params.y2, params.radius
        );
        self.path.arc_to(&self.transform, params)
    }

    /// Add an elliptical arc. Errors on a negative radius, leaving the path untouched.
    pub fn ellipse(&mut self, params: &EllipseParams) -> Canvas2dResult<()> {
        log::debug!(
            target: "canvas",
            "ellipse {} {} {} {} {} {} {} {}",
            params.x,
            params.y,
            params.radius_x,
            params.radius_y,
            params.rotation,
            params.start_angle,
            params.end_angle,
            params.anticlockwise
        );
        self.path.ellipse(&self.transform, params)
    }

    /// Add a closed rectangle subpath.
    pub fn rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        log::debug!(target: "canvas", "rect {} {} {} {}", x, y, width, height);
        self.path.rect(
            &self.transform,
            &RectParams {
                x,
                y,
                width,
                height,
            },
        );
    }

    /// Close the current subpath.
    pub fn close_path(&mut self) {
        log::debug!(target: "canvas", "closePath");
        self.path.close_path();
    }

    /// Lifecycle phase of the current path.
    pub fn path_phase(&self) -> PathPhase {
        self.path.phase()
    }

    /// Device-space current point, if a subpath is open.
    pub fn current_point(&self) -> Option<(f32, f32)> {
        self.path.current_point()
    }
}
