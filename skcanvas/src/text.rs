//! Text measurement and glyph outlines using cosmic-text.

use crate::dom_matrix::map_point;
use crate::font_parser::ParsedFont;
use cosmic_text::{
    Attrs, Buffer, CacheKeyFlags, Command, Family, FontSystem, Metrics, Shaping, SwashCache,
};
use tiny_skia::{Path, PathBuilder, Transform};

/// Text metrics returned by measureText(). Only the advance width is reported.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TextMetrics {
    /// Advance width of the text.
    pub width: f32,
}

/// Map a CSS family name to a cosmic-text family, recognizing the generic keywords.
fn css_family(name: &str) -> Family<'_> {
    match name.to_ascii_lowercase().as_str() {
        "serif" => Family::Serif,
        "sans-serif" => Family::SansSerif,
        "monospace" => Family::Monospace,
        "cursive" => Family::Cursive,
        "fantasy" => Family::Fantasy,
        _ => Family::Name(name),
    }
}

/// Shape `text` in a single unbounded line. Fonts without a positive finite size
/// produce no layout.
fn shape(
    font_system: &mut FontSystem,
    text: &str,
    font: &ParsedFont,
    hinting: bool,
) -> Option<Buffer> {
    if !font.size.is_finite() || font.size <= 0.0 {
        return None;
    }
    // The parsed size is used directly as the text size
    let metrics = Metrics::new(font.size, font.size * 1.2);
    let mut buffer = Buffer::new(font_system, metrics);

    let family = font
        .families
        .first()
        .map(|f| css_family(f))
        .unwrap_or(Family::SansSerif);
    let mut attrs = Attrs::new()
        .family(family)
        .weight(font.weight)
        .style(font.style);
    if !hinting {
        attrs = attrs.cache_key_flags(CacheKeyFlags::DISABLE_HINTING);
    }

    buffer.set_text(font_system, text, &attrs, Shaping::Advanced, None);
    buffer.shape_until_scroll(font_system, false);
    Some(buffer)
}

/// Measure the advance width of `text`.
pub fn measure_text(
    font_system: &mut FontSystem,
    text: &str,
    font: &ParsedFont,
    hinting: bool,
) -> TextMetrics {
    let Some(buffer) = shape(font_system, text, font, hinting) else {
        return TextMetrics::default();
    };
    let width = buffer
        .layout_runs()
        .map(|run| run.line_w)
        .fold(0.0f32, f32::max);
    TextMetrics { width }
}

/// Outline every glyph of `text` into one device-space path.
///
/// `(x, y)` is the alphabetic baseline origin in user space; each outline point is
/// mapped through `transform`. Returns `None` when no glyph has an outline.
#[allow(clippy::too_many_arguments)]
pub fn text_outline(
    font_system: &mut FontSystem,
    swash_cache: &mut SwashCache,
    text: &str,
    font: &ParsedFont,
    x: f32,
    y: f32,
    transform: &Transform,
    hinting: bool,
) -> Option<Path> {
    let buffer = shape(font_system, text, font, hinting)?;
    let mut pb = PathBuilder::new();

    for run in buffer.layout_runs() {
        for glyph in run.glyphs.iter() {
            let physical = glyph.physical((x, y), 1.0);
            let glyph_x = x + glyph.x + glyph.font_size * glyph.x_offset;
            let glyph_y = y + glyph.y - glyph.font_size * glyph.y_offset;

            let Some(commands) = swash_cache.get_outline_commands(font_system, physical.cache_key)
            else {
                continue;
            };

            // Font outlines are Y-up
            let to_device = |px: f32, py: f32| map_point(transform, glyph_x + px, glyph_y - py);
            for cmd in commands {
                match cmd {
                    Command::MoveTo(p) => {
                        let (px, py) = to_device(p.x, p.y);
                        pb.move_to(px, py);
                    }
                    Command::LineTo(p) => {
                        let (px, py) = to_device(p.x, p.y);
                        pb.line_to(px, py);
                    }
                    Command::QuadTo(ctrl, end) => {
                        let (cx, cy) = to_device(ctrl.x, ctrl.y);
                        let (ex, ey) = to_device(end.x, end.y);
                        pb.quad_to(cx, cy, ex, ey);
                    }
                    Command::CurveTo(c1, c2, end) => {
                        let (c1x, c1y) = to_device(c1.x, c1.y);
                        let (c2x, c2y) = to_device(c2.x, c2.y);
                        let (ex, ey) = to_device(end.x, end.y);
                        pb.cubic_to(c1x, c1y, c2x, c2y, ex, ey);
                    }
                    Command::Close => pb.close(),
                }
            }
        }
    }

    pb.finish()
}
