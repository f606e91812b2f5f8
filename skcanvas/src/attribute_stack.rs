//! Save/restore stack of drawing attributes.

use crate::color::Color;
use crate::style::{LineCap, LineJoin};

/// Copy of the drawing attributes captured by `save()`.
///
/// The transform is stored as a 3x3 row-major array. Font and path are not captured.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleSnapshot {
    pub stroke_width: f32,
    pub stroke_color: Color,
    pub fill_color: Color,
    pub line_cap: LineCap,
    pub line_join: LineJoin,
    pub miter_limit: f32,
    pub shadow_offset_x: f32,
    pub shadow_offset_y: f32,
    pub shadow_blur: f32,
    pub shadow_color: Color,
    pub transform: [f32; 9],
}

/// LIFO stack of [`StyleSnapshot`]s.
#[derive(Debug, Clone, Default)]
pub struct AttributeStack {
    snapshots: Vec<StyleSnapshot>,
}

impl AttributeStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, snapshot: StyleSnapshot) {
        self.snapshots.push(snapshot);
    }

    /// Remove the most recent snapshot. `None` when nothing was saved.
    pub fn pop(&mut self) -> Option<StyleSnapshot> {
        self.snapshots.pop()
    }

    pub fn depth(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(width: f32) -> StyleSnapshot {
        StyleSnapshot {
            stroke_width: width,
            stroke_color: Color::BLACK,
            fill_color: Color::BLACK,
            line_cap: LineCap::Butt,
            line_join: LineJoin::Miter,
            miter_limit: 10.0,
            shadow_offset_x: 0.0,
            shadow_offset_y: 0.0,
            shadow_blur: 0.0,
            shadow_color: Color::TRANSPARENT,
            transform: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
        }
    }

    #[test]
    fn test_lifo_order() {
        let mut stack = AttributeStack::new();
        stack.push(snapshot(1.0));
        stack.push(snapshot(2.0));
        assert_eq!(stack.depth(), 2);
        assert_eq!(stack.pop().map(|s| s.stroke_width), Some(2.0));
        assert_eq!(stack.pop().map(|s| s.stroke_width), Some(1.0));
        assert!(stack.is_empty());
    }

    #[test]
    fn test_pop_empty_is_none() {
        let mut stack = AttributeStack::new();
        assert!(stack.pop().is_none());
        assert_eq!(stack.depth(), 0);
    }
}
