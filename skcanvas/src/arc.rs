//! Arc primitives using bezier curve approximation.
//!
//! tiny-skia does not support arc primitives directly, so arcs are approximated with
//! one cubic bezier per quarter turn (or less). Like the arc primitive of a vector
//! engine, [`add_arc`] takes its start angle and sweep in degrees and starts a new
//! contour at the first point of the arc.

use crate::geometry::ArcToParams;
use std::f32::consts::{FRAC_PI_2, TAU};
use tiny_skia::PathBuilder;

/// Compute the signed sweep, in radians, from `start_angle` to `end_angle`.
///
/// Clockwise sweeps are in `[0, 2π]`; counter-clockwise sweeps are in `[-2π, 0]`,
/// i.e. the clockwise difference reduced by a full turn. Differences of a full turn
/// or more in the drawing direction produce a full ellipse.
pub fn sweep_radians(start_angle: f32, end_angle: f32, anticlockwise: bool) -> f32 {
    if anticlockwise {
        if start_angle - end_angle >= TAU {
            return -TAU;
        }
        -(start_angle - end_angle).rem_euclid(TAU)
    } else {
        if end_angle - start_angle >= TAU {
            return TAU;
        }
        (end_angle - start_angle).rem_euclid(TAU)
    }
}

/// Point on an axis-aligned ellipse at the given angle (radians).
pub fn ellipse_point(cx: f32, cy: f32, rx: f32, ry: f32, angle: f32) -> (f32, f32) {
    (cx + rx * angle.cos(), cy + ry * angle.sin())
}

/// Add an elliptical arc to the path as a new contour.
///
/// # Arguments
/// * `path` - The path builder to add the arc to
/// * `cx`, `cy` - Center of the ellipse
/// * `rx`, `ry` - Radii of the ellipse
/// * `start_degrees` - Starting angle in degrees
/// * `sweep_degrees` - Signed sweep in degrees (negative is counter-clockwise)
pub fn add_arc(
    path: &mut PathBuilder,
    cx: f32,
    cy: f32,
    rx: f32,
    ry: f32,
    start_degrees: f32,
    sweep_degrees: f32,
) {
    let start = start_degrees.to_radians();
    let sweep = sweep_degrees.to_radians();
    let (sx, sy) = ellipse_point(cx, cy, rx, ry, start);
    path.move_to(sx, sy);
    append_arc_segments(path, cx, cy, rx, ry, start, sweep);
}

/// Append arc segments to a contour whose current point is already the arc start.
fn append_arc_segments(
    path: &mut PathBuilder,
    cx: f32,
    cy: f32,
    rx: f32,
    ry: f32,
    start: f32,
    sweep: f32,
) {
    if sweep == 0.0 || rx == 0.0 || ry == 0.0 {
        return;
    }

    // Tolerance keeps a degree-converted quarter turn from spilling into an extra segment
    let num_segments = ((sweep.abs() / FRAC_PI_2 - 1e-4).ceil() as usize).max(1);
    let segment_angle = sweep / num_segments as f32;

    for i in 0..num_segments {
        let angle1 = start + i as f32 * segment_angle;
        let angle2 = start + (i + 1) as f32 * segment_angle;
        arc_segment(path, cx, cy, rx, ry, angle1, angle2);
    }
}

/// Add a single arc segment as a cubic bezier curve.
fn arc_segment(
    path: &mut PathBuilder,
    cx: f32,
    cy: f32,
    rx: f32,
    ry: f32,
    angle1: f32,
    angle2: f32,
) {
    // Control point factor; negative for counter-clockwise segments
    let k = 4.0 / 3.0 * ((angle2 - angle1) / 4.0).tan();

    let (x1, y1) = (angle1.cos(), angle1.sin());
    let (x2, y2) = (angle2.cos(), angle2.sin());

    let cp1 = (x1 - k * y1, y1 + k * x1);
    let cp2 = (x2 + k * y2, y2 - k * x2);

    path.cubic_to(
        cx + rx * cp1.0,
        cy + ry * cp1.1,
        cx + rx * cp2.0,
        cy + ry * cp2.1,
        cx + rx * x2,
        cy + ry * y2,
    );
}

/// Add an arc tangent to the lines (x0, y0)-(x1, y1) and (x1, y1)-(x2, y2).
///
/// The builder's current point must be (x0, y0). Degenerate input (coincident points,
/// collinear points, zero radius) produces a straight line to (x1, y1).
pub fn arc_to(path: &mut PathBuilder, x0: f32, y0: f32, params: &ArcToParams) {
    let ArcToParams {
        x1,
        y1,
        x2,
        y2,
        radius,
    } = *params;

    if radius == 0.0 {
        path.line_to(x1, y1);
        return;
    }

    // Vectors from corner to adjacent points
    let v1x = x0 - x1;
    let v1y = y0 - y1;
    let v2x = x2 - x1;
    let v2y = y2 - y1;

    let len1 = (v1x * v1x + v1y * v1y).sqrt();
    let len2 = (v2x * v2x + v2y * v2y).sqrt();

    if len1 < 1e-6 || len2 < 1e-6 {
        path.line_to(x1, y1);
        return;
    }

    let v1x = v1x / len1;
    let v1y = v1y / len1;
    let v2x = v2x / len2;
    let v2y = v2y / len2;

    let cross = v1x * v2y - v1y * v2x;
    let dot = v1x * v2x + v1y * v2y;

    if cross.abs() < 1e-6 {
        path.line_to(x1, y1);
        return;
    }

    // Tangent points
    let angle = cross.atan2(dot);
    let seg_len = radius / (angle / 2.0).tan().abs();

    let start_x = x1 + v1x * seg_len;
    let start_y = y1 + v1y * seg_len;
    let end_x = x1 + v2x * seg_len;
    let end_y = y1 + v2y * seg_len;

    // Center lies along the normal of the first tangent line
    let sign = if cross < 0.0 { -1.0 } else { 1.0 };
    let cx = start_x - v1y * sign * radius;
    let cy = start_y + v1x * sign * radius;

    let start_angle = (start_y - cy).atan2(start_x - cx);
    let end_angle = (end_y - cy).atan2(end_x - cx);
    let sweep = sweep_radians(start_angle, end_angle, cross > 0.0);

    path.line_to(start_x, start_y);
    append_arc_segments(path, cx, cy, radius, radius, start_angle, sweep);
}
