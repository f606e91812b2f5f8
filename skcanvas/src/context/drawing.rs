//! Drawing operations (fill, stroke, rectangles) for Canvas2dContext.

use super::Canvas2dContext;
use crate::dom_matrix::{average_scale, map_point};
use crate::geometry::RectParams;
use crate::shadow::ShadowPaint;
use crate::style::PaintMode;
use tiny_skia::{Paint, Path, PathBuilder, Stroke};

impl Canvas2dContext {
    /// Fill the current path.
    pub fn fill(&mut self) {
        log::debug!(target: "canvas", "fill");
        self.path.commit();
        if let Some(path) = self.path.accumulated_path() {
            self.draw_path(&path, PaintMode::Fill);
        }
    }

    /// Stroke the current path.
    pub fn stroke(&mut self) {
        log::debug!(target: "canvas", "stroke");
        self.path.commit();
        if let Some(path) = self.path.accumulated_path() {
            self.draw_path(&path, PaintMode::Stroke);
        }
    }

    /// Fill a rectangle without touching the current path.
    pub fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        log::debug!(target: "canvas", "fillRect {} {} {} {}", x, y, width, height);
        if let Some(path) = self.device_rect(x, y, width, height) {
            self.draw_path(&path, PaintMode::Fill);
        }
    }

    /// Stroke a rectangle without touching the current path.
    pub fn stroke_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        log::debug!(target: "canvas", "strokeRect {} {} {} {}", x, y, width, height);
        if let Some(path) = self.device_rect(x, y, width, height) {
            self.draw_path(&path, PaintMode::Stroke);
        }
    }

    /// Make a rectangle transparent. Shadows do not apply.
    pub fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        log::debug!(target: "canvas", "clearRect {} {} {} {}", x, y, width, height);
        if let Some(path) = self.device_rect(x, y, width, height) {
            self.surface.clear_path(&path);
        }
    }

    /// Hit regions are accepted and ignored.
    pub fn add_hit_region(&mut self, id: &str) {
        log::debug!(target: "canvas", "addHitRegion {} (ignored)", id);
    }

    pub fn remove_hit_region(&mut self, id: &str) {
        log::debug!(target: "canvas", "removeHitRegion {} (ignored)", id);
    }

    pub fn clear_hit_regions(&mut self) {
        log::debug!(target: "canvas", "clearHitRegions (ignored)");
    }

    /// Focus rings are not drawn.
    pub fn draw_focus_if_needed(&mut self) {
        log::debug!(target: "canvas", "drawFocusIfNeeded (ignored)");
    }

    /// Closed device-space rectangle, or `None` for non-finite input.
    fn device_rect(&self, x: f32, y: f32, width: f32, height: f32) -> Option<Path> {
        let rect = RectParams {
            x,
            y,
            width,
            height,
        };
        if !rect.is_finite() {
            return None;
        }
        let [p0, p1, p2, p3] = rect.corners().map(|(x, y)| map_point(&self.transform, x, y));
        let mut pb = PathBuilder::new();
        pb.move_to(p0.0, p0.1);
        pb.line_to(p1.0, p1.1);
        pb.line_to(p2.0, p2.1);
        pb.line_to(p3.0, p3.1);
        pb.close();
        pb.finish()
    }

    /// Draw device-space geometry with the fill or stroke paint.
    ///
    /// Stroke widths are scaled by the current transform, since the geometry no
    /// longer carries it.
    fn draw_path(&mut self, path: &Path, mode: PaintMode) {
        let paint = self.style.paint_for(mode);
        let stroke = match mode {
            PaintMode::Fill => None,
            PaintMode::Stroke => Some(self.style.stroke_scaled(average_scale(&self.transform))),
        };
        self.draw_with_shadow(path, &paint, stroke.as_ref());
    }

    /// Shadow pass (if any) under the offset matrix, then the primary draw.
    pub(crate) fn draw_with_shadow(
        &mut self,
        path: &Path,
        paint: &Paint<'static>,
        stroke: Option<&Stroke>,
    ) {
        let current = self.surface.matrix();
        if let Some(shadow) = ShadowPaint::derive(self.style.shadow(), paint, &current) {
            self.surface.set_matrix(shadow.matrix);
            self.surface.draw(path, &shadow.paint, stroke, Some(&shadow.filter));
            self.surface.set_matrix(current);
        }
        self.surface.draw(path, paint, stroke, None);
    }
}
