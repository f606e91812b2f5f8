//! Subpath state machine over tiny-skia path builders.
//!
//! Every coordinate is mapped through the current transform as it arrives, so the
//! builders only ever hold device-space points and the surface draws them under the
//! identity matrix. Committed subpaths pile up in one accumulated builder until
//! `begin_path`; at most one subpath is open at a time.

use crate::arc;
use crate::dom_matrix::{average_scale, map_point, rotation};
use crate::error::{Canvas2dError, Canvas2dResult};
use crate::geometry::{
    all_finite, ArcParams, ArcToParams, CubicBezierParams, EllipseParams, QuadraticBezierParams,
    RectParams,
};
use tiny_skia::{Path, PathBuilder, PathSegment, Transform};

/// Where the path is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathPhase {
    /// Nothing since the last `begin_path`.
    Empty,
    /// A subpath is being built.
    OpenSubpath,
    /// Subpaths have been committed and none is open.
    Committed,
}

#[derive(Debug, Clone)]
struct Subpath {
    builder: PathBuilder,
    start: (f32, f32),
    pen: (f32, f32),
    has_segments: bool,
}

impl Subpath {
    fn new(x: f32, y: f32) -> Self {
        let mut builder = PathBuilder::new();
        builder.move_to(x, y);
        Self {
            builder,
            start: (x, y),
            pen: (x, y),
            has_segments: false,
        }
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.builder.line_to(x, y);
        self.pen = (x, y);
        self.has_segments = true;
    }

    fn quad_to(&mut self, cx: f32, cy: f32, x: f32, y: f32) {
        self.builder.quad_to(cx, cy, x, y);
        self.pen = (x, y);
        self.has_segments = true;
    }

    fn cubic_to(&mut self, c1x: f32, c1y: f32, c2x: f32, c2y: f32, x: f32, y: f32) {
        self.builder.cubic_to(c1x, c1y, c2x, c2y, x, y);
        self.pen = (x, y);
        self.has_segments = true;
    }

    fn close(&mut self) {
        if self.has_segments {
            self.builder.close();
        }
        self.pen = self.start;
    }

    /// Append the segments of a single-contour `path`, mapped through `transform`.
    /// The leading move is dropped; the caller has already connected to it.
    fn extend_mapped(&mut self, path: &Path, transform: &Transform) {
        let mut first = true;
        for segment in path.segments() {
            match segment {
                PathSegment::MoveTo(p) => {
                    if !first {
                        let (x, y) = map_point(transform, p.x, p.y);
                        self.line_to(x, y);
                    }
                }
                PathSegment::LineTo(p) => {
                    let (x, y) = map_point(transform, p.x, p.y);
                    self.line_to(x, y);
                }
                PathSegment::QuadTo(ctrl, p) => {
                    let (cx, cy) = map_point(transform, ctrl.x, ctrl.y);
                    let (x, y) = map_point(transform, p.x, p.y);
                    self.quad_to(cx, cy, x, y);
                }
                PathSegment::CubicTo(ctrl1, ctrl2, p) => {
                    let (c1x, c1y) = map_point(transform, ctrl1.x, ctrl1.y);
                    let (c2x, c2y) = map_point(transform, ctrl2.x, ctrl2.y);
                    let (x, y) = map_point(transform, p.x, p.y);
                    self.cubic_to(c1x, c1y, c2x, c2y, x, y);
                }
                PathSegment::Close => self.close(),
            }
            first = false;
        }
    }

    fn arc_to(&mut self, transform: &Transform, params: &ArcToParams) {
        let mut temp = PathBuilder::new();
        match transform.invert() {
            Some(inverse) => {
                // The pen is in device space; the tangent arc is built in user space
                let (x0, y0) = map_point(&inverse, self.pen.0, self.pen.1);
                temp.move_to(x0, y0);
                arc::arc_to(&mut temp, x0, y0, params);
                if let Some(path) = temp.finish() {
                    self.extend_mapped(&path, transform);
                }
            }
            None => {
                // Non-invertible transform: map the control points and approximate the radius
                let (x1, y1) = map_point(transform, params.x1, params.y1);
                let (x2, y2) = map_point(transform, params.x2, params.y2);
                let device = ArcToParams {
                    x1,
                    y1,
                    x2,
                    y2,
                    radius: params.radius * average_scale(transform),
                };
                temp.move_to(self.pen.0, self.pen.1);
                arc::arc_to(&mut temp, self.pen.0, self.pen.1, &device);
                if let Some(path) = temp.finish() {
                    self.extend_mapped(&path, &Transform::identity());
                }
            }
        }
    }
}

/// Copy every segment of `path` into `builder` unchanged.
fn replay(builder: &mut PathBuilder, path: &Path) {
    for segment in path.segments() {
        match segment {
            PathSegment::MoveTo(p) => builder.move_to(p.x, p.y),
            PathSegment::LineTo(p) => builder.line_to(p.x, p.y),
            PathSegment::QuadTo(c, p) => builder.quad_to(c.x, c.y, p.x, p.y),
            PathSegment::CubicTo(c1, c2, p) => builder.cubic_to(c1.x, c1.y, c2.x, c2.y, p.x, p.y),
            PathSegment::Close => builder.close(),
        }
    }
}

/// The current path: committed subpaths plus at most one open subpath.
#[derive(Debug, Clone, Default)]
pub struct PathState {
    accumulated: Option<PathBuilder>,
    subpath: Option<Subpath>,
}

impl PathState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> PathPhase {
        match (&self.subpath, &self.accumulated) {
            (Some(_), _) => PathPhase::OpenSubpath,
            (None, Some(_)) => PathPhase::Committed,
            (None, None) => PathPhase::Empty,
        }
    }

    /// Device-space pen position of the open subpath.
    pub fn current_point(&self) -> Option<(f32, f32)> {
        self.subpath.as_ref().map(|s| s.pen)
    }

    /// Drop the accumulated path and any open subpath.
    pub fn begin_path(&mut self) {
        self.accumulated = None;
        self.subpath = None;
    }

    /// Move the open subpath, if any, into the accumulated path.
    pub fn commit(&mut self) {
        let Some(subpath) = self.subpath.take() else {
            return;
        };
        let accumulated = self.accumulated.get_or_insert_with(PathBuilder::new);
        if !subpath.has_segments {
            return;
        }
        if let Some(path) = subpath.builder.finish() {
            replay(accumulated, &path);
        }
    }

    /// The committed subpaths, or `None` when nothing drawable was committed.
    pub fn accumulated_path(&self) -> Option<Path> {
        self.accumulated.clone()?.finish()
    }

    fn start_subpath(&mut self, x: f32, y: f32) {
        self.subpath = Some(Subpath::new(x, y));
    }

    /// Open subpath, starting one at the device point `(x, y)` if none is open.
    fn ensure_subpath(&mut self, x: f32, y: f32) -> &mut Subpath {
        self.subpath.get_or_insert_with(|| Subpath::new(x, y))
    }

    /// Line to the device point, or start a subpath there if none is open.
    fn connect_or_start(&mut self, x: f32, y: f32) {
        if let Some(subpath) = self.subpath.as_mut() {
            subpath.line_to(x, y);
        } else {
            self.start_subpath(x, y);
        }
    }

    pub fn move_to(&mut self, transform: &Transform, x: f32, y: f32) {
        if !all_finite(&[x, y]) {
            return;
        }
        self.commit();
        let (x, y) = map_point(transform, x, y);
        self.start_subpath(x, y);
    }

    /// Without an open subpath this only starts one at `(x, y)`.
    pub fn line_to(&mut self, transform: &Transform, x: f32, y: f32) {
        if !all_finite(&[x, y]) {
            return;
        }
        let (x, y) = map_point(transform, x, y);
        self.connect_or_start(x, y);
    }

    pub fn bezier_curve_to(&mut self, transform: &Transform, params: &CubicBezierParams) {
        if !params.is_finite() {
            return;
        }
        let (c1x, c1y) = map_point(transform, params.cp1x, params.cp1y);
        let (c2x, c2y) = map_point(transform, params.cp2x, params.cp2y);
        let (x, y) = map_point(transform, params.x, params.y);
        self.ensure_subpath(c1x, c1y).cubic_to(c1x, c1y, c2x, c2y, x, y);
    }

    pub fn quadratic_curve_to(&mut self, transform: &Transform, params: &QuadraticBezierParams) {
        if !params.is_finite() {
            return;
        }
        let (cx, cy) = map_point(transform, params.cpx, params.cpy);
        let (x, y) = map_point(transform, params.x, params.y);
        self.ensure_subpath(cx, cy).quad_to(cx, cy, x, y);
    }

    pub fn arc_to(&mut self, transform: &Transform, params: &ArcToParams) -> Canvas2dResult<()> {
        if !params.is_finite() {
            return Ok(());
        }
        if params.radius < 0.0 {
            return Err(Canvas2dError::NegativeRadius {
                operation: "arcTo",
                radius: params.radius,
            });
        }
        match self.subpath.as_mut() {
            Some(subpath) => subpath.arc_to(transform, params),
            None => {
                let (x, y) = map_point(transform, params.x1, params.y1);
                self.start_subpath(x, y);
            }
        }
        Ok(())
    }

    pub fn arc(&mut self, transform: &Transform, params: &ArcParams) -> Canvas2dResult<()> {
        self.elliptical_arc("arc", transform, &EllipseParams::from(params))
    }

    pub fn ellipse(&mut self, transform: &Transform, params: &EllipseParams) -> Canvas2dResult<()> {
        self.elliptical_arc("ellipse", transform, params)
    }

    fn elliptical_arc(
        &mut self,
        operation: &'static str,
        transform: &Transform,
        params: &EllipseParams,
    ) -> Canvas2dResult<()> {
        if !params.is_finite() {
            return Ok(());
        }
        for radius in [params.radius_x, params.radius_y] {
            if radius < 0.0 {
                return Err(Canvas2dError::NegativeRadius { operation, radius });
            }
        }

        let sweep = arc::sweep_radians(params.start_angle, params.end_angle, params.anticlockwise);
        // Built around the origin, then placed at the center with the ellipse rotation
        let placement = transform
            .pre_translate(params.x, params.y)
            .pre_concat(rotation(params.rotation));

        let mut temp = PathBuilder::new();
        arc::add_arc(
            &mut temp,
            0.0,
            0.0,
            params.radius_x,
            params.radius_y,
            params.start_angle.to_degrees(),
            sweep.to_degrees(),
        );

        let (sx, sy) = arc::ellipse_point(
            0.0,
            0.0,
            params.radius_x,
            params.radius_y,
            params.start_angle,
        );
        let (sx, sy) = map_point(&placement, sx, sy);
        self.connect_or_start(sx, sy);

        if let (Some(path), Some(subpath)) = (temp.finish(), self.subpath.as_mut()) {
            subpath.extend_mapped(&path, &placement);
        }
        Ok(())
    }

    /// Commit, add a closed rectangle, and leave a subpath open at its origin.
    pub fn rect(&mut self, transform: &Transform, params: &RectParams) {
        if !params.is_finite() {
            return;
        }
        self.commit();
        let [p0, p1, p2, p3] = params.corners().map(|(x, y)| map_point(transform, x, y));

        let mut rect = Subpath::new(p0.0, p0.1);
        rect.line_to(p1.0, p1.1);
        rect.line_to(p2.0, p2.1);
        rect.line_to(p3.0, p3.1);
        rect.close();
        self.subpath = Some(rect);
        self.commit();

        self.start_subpath(p0.0, p0.1);
    }

    /// Close and commit the open subpath, then reopen at its first point.
    pub fn close_path(&mut self) {
        let Some(mut subpath) = self.subpath.take() else {
            return;
        };
        subpath.close();
        let (x, y) = subpath.start;
        self.subpath = Some(subpath);
        self.commit();
        self.start_subpath(x, y);
    }
}
