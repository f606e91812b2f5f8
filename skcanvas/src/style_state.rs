//! Paint attributes mirrored onto tiny-skia's paint and stroke objects.
//!
//! tiny-skia has no notion of a "current" fill/stroke color or shadow, so the context
//! keeps a base [`tiny_skia::Paint`] and [`tiny_skia::Stroke`] and reads attributes back
//! from them. Setters validate their input and leave the previous value in place when
//! it is rejected.

use crate::attribute_stack::StyleSnapshot;
use crate::color::Color;
use crate::dom_matrix::DOMMatrix;
use crate::style::{LineCap, LineJoin, PaintMode};
use tiny_skia::Transform;

/// Shadow attributes of the drawing state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowParams {
    pub offset_x: f32,
    pub offset_y: f32,
    pub blur: f32,
    pub color: Color,
}

impl Default for ShadowParams {
    fn default() -> Self {
        Self {
            offset_x: 0.0,
            offset_y: 0.0,
            blur: 0.0,
            color: Color::TRANSPARENT,
        }
    }
}

/// Fill, stroke, line and shadow attributes.
#[derive(Debug, Clone)]
pub struct StyleState {
    /// Base paint every draw call copies.
    paint: tiny_skia::Paint<'static>,
    /// Stroke parameters (width, cap, join, miter limit).
    stroke: tiny_skia::Stroke,
    fill_color: Color,
    stroke_color: Color,
    shadow: ShadowParams,
}

impl Default for StyleState {
    fn default() -> Self {
        Self::new(true)
    }
}

impl StyleState {
    pub fn new(anti_alias: bool) -> Self {
        let paint = tiny_skia::Paint {
            anti_alias,
            ..Default::default()
        };
        let stroke = tiny_skia::Stroke {
            width: 1.0,
            miter_limit: 10.0,
            line_cap: tiny_skia::LineCap::Butt,
            line_join: tiny_skia::LineJoin::Miter,
            dash: None,
        };
        Self {
            paint,
            stroke,
            fill_color: Color::BLACK,
            stroke_color: Color::BLACK,
            shadow: ShadowParams::default(),
        }
    }

    // --- Line attributes ---

    pub fn line_width(&self) -> f32 {
        self.stroke.width
    }

    /// Ignores non-finite, zero and negative widths.
    pub fn set_line_width(&mut self, width: f32) {
        if width.is_finite() && width > 0.0 {
            self.stroke.width = width;
        }
    }

    pub fn miter_limit(&self) -> f32 {
        self.stroke.miter_limit
    }

    /// Ignores non-finite, zero and negative limits.
    pub fn set_miter_limit(&mut self, limit: f32) {
        if limit.is_finite() && limit > 0.0 {
            self.stroke.miter_limit = limit;
        }
    }

    pub fn line_cap(&self) -> LineCap {
        self.stroke.line_cap.into()
    }

    pub fn set_line_cap(&mut self, cap: LineCap) {
        self.stroke.line_cap = cap.into();
    }

    pub fn line_join(&self) -> LineJoin {
        self.stroke.line_join.into()
    }

    pub fn set_line_join(&mut self, join: LineJoin) {
        self.stroke.line_join = join.into();
    }

    // --- Colors ---

    pub fn fill_color(&self) -> Color {
        self.fill_color
    }

    pub fn set_fill_color(&mut self, color: Color) {
        self.fill_color = color;
    }

    pub fn stroke_color(&self) -> Color {
        self.stroke_color
    }

    pub fn set_stroke_color(&mut self, color: Color) {
        self.stroke_color = color;
    }

    // --- Shadow ---

    pub fn shadow(&self) -> &ShadowParams {
        &self.shadow
    }

    pub fn shadow_blur(&self) -> f32 {
        self.shadow.blur
    }

    /// Ignores negative and non-finite values; zero is accepted.
    pub fn set_shadow_blur(&mut self, blur: f32) {
        if blur.is_finite() && blur >= 0.0 {
            self.shadow.blur = blur;
        }
    }

    pub fn shadow_offset_x(&self) -> f32 {
        self.shadow.offset_x
    }

    /// Ignores non-finite values.
    pub fn set_shadow_offset_x(&mut self, offset: f32) {
        if offset.is_finite() {
            self.shadow.offset_x = offset;
        }
    }

    pub fn shadow_offset_y(&self) -> f32 {
        self.shadow.offset_y
    }

    /// Ignores non-finite values.
    pub fn set_shadow_offset_y(&mut self, offset: f32) {
        if offset.is_finite() {
            self.shadow.offset_y = offset;
        }
    }

    pub fn shadow_color(&self) -> Color {
        self.shadow.color
    }

    pub fn set_shadow_color(&mut self, color: Color) {
        self.shadow.color = color;
    }

    // --- Engine objects ---

    /// Copy of the base paint carrying the fill or stroke color.
    pub(crate) fn paint_for(&self, mode: PaintMode) -> tiny_skia::Paint<'static> {
        let color = match mode {
            PaintMode::Fill => self.fill_color,
            PaintMode::Stroke => self.stroke_color,
        };
        let mut paint = self.paint.clone();
        paint.set_color(color.into());
        paint
    }

    /// Stroke parameters with the width multiplied by `scale`.
    pub(crate) fn stroke_scaled(&self, scale: f32) -> tiny_skia::Stroke {
        let mut stroke = self.stroke.clone();
        stroke.width *= scale;
        stroke
    }

    // --- Save/restore ---

    pub(crate) fn snapshot(&self, transform: &Transform) -> StyleSnapshot {
        StyleSnapshot {
            stroke_width: self.stroke.width,
            stroke_color: self.stroke_color,
            fill_color: self.fill_color,
            line_cap: self.line_cap(),
            line_join: self.line_join(),
            miter_limit: self.stroke.miter_limit,
            shadow_offset_x: self.shadow.offset_x,
            shadow_offset_y: self.shadow.offset_y,
            shadow_blur: self.shadow.blur,
            shadow_color: self.shadow.color,
            transform: DOMMatrix::from(*transform).to_row_major(),
        }
    }

    /// Write every field of `snapshot` back and return its transform.
    pub(crate) fn apply(&mut self, snapshot: &StyleSnapshot) -> Transform {
        self.stroke.width = snapshot.stroke_width;
        self.stroke_color = snapshot.stroke_color;
        self.fill_color = snapshot.fill_color;
        self.stroke.line_cap = snapshot.line_cap.into();
        self.stroke.line_join = snapshot.line_join.into();
        self.stroke.miter_limit = snapshot.miter_limit;
        self.shadow = ShadowParams {
            offset_x: snapshot.shadow_offset_x,
            offset_y: snapshot.shadow_offset_y,
            blur: snapshot.shadow_blur,
            color: snapshot.shadow_color,
        };
        DOMMatrix::from_row_major(&snapshot.transform).into()
    }
}
