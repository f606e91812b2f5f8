//! Text rendering operations for Canvas2dContext.

use super::Canvas2dContext;
use crate::geometry::all_finite;
use crate::style::PaintMode;
use crate::text::{text_outline, TextMetrics};

impl Canvas2dContext {
    /// Measure text with the current font. Only the advance width is computed.
    pub fn measure_text(&mut self, text: &str) -> TextMetrics {
        log::debug!(target: "canvas", "measureText \"{}\"", text);
        crate::text::measure_text(
            &mut self.font_system,
            text,
            &self.parsed_font,
            self.hinting_enabled,
        )
    }

    /// Fill text with its alphabetic baseline starting at (x, y).
    pub fn fill_text(&mut self, text: &str, x: f32, y: f32) {
        log::debug!(target: "canvas", "fillText \"{}\" {} {}", text, x, y);
        self.render_text(text, x, y, PaintMode::Fill);
    }

    /// Stroke text with its alphabetic baseline starting at (x, y).
    pub fn stroke_text(&mut self, text: &str, x: f32, y: f32) {
        log::debug!(target: "canvas", "strokeText \"{}\" {} {}", text, x, y);
        self.render_text(text, x, y, PaintMode::Stroke);
    }

    /// Glyph outlines are mapped to device space and drawn like a path, except that
    /// the stroke width is used as is.
    fn render_text(&mut self, text: &str, x: f32, y: f32, mode: PaintMode) {
        if !all_finite(&[x, y]) || text.is_empty() {
            return;
        }

        let Some(path) = text_outline(
            &mut self.font_system,
            &mut self.swash_cache,
            text,
            &self.parsed_font,
            x,
            y,
            &self.transform,
            self.hinting_enabled,
        ) else {
            return;
        };

        let paint = self.style.paint_for(mode);
        let stroke = match mode {
            PaintMode::Fill => None,
            PaintMode::Stroke => Some(self.style.stroke_scaled(1.0)),
        };
        self.draw_with_shadow(&path, &paint, stroke.as_ref());
    }
}

#[cfg(test)]
mod tests {
    use crate::context::tests::test_context;

    #[test]
    fn test_text_without_fonts_draws_nothing() {
        let mut ctx = test_context(20, 20);
        ctx.fill_text("", 0.0, 10.0);
        ctx.stroke_text("", 0.0, 10.0);
        ctx.fill_text("x", f32::NAN, 10.0);
        assert!(ctx.get_image_data(0, 0, 20, 20).iter().all(|&b| b == 0));
        assert_eq!(ctx.measure_text("").width, 0.0);
    }

    #[test]
    fn test_text_does_not_touch_path() {
        let mut ctx = test_context(20, 20);
        ctx.move_to(3.0, 4.0);
        ctx.fill_text("", 0.0, 10.0);
        assert_eq!(ctx.current_point(), Some((3.0, 4.0)));
    }
}
