//! Integration tests for skcanvas.

use base64::prelude::BASE64_STANDARD;
use base64::Engine;
use rstest::rstest;
use skcanvas::{
    parse_color, parse_font_size, serialize_color, ArcToParams, Canvas, Canvas2dContext,
    Canvas2dError, Color, EllipseParams, FontConfig, PathPhase,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Context without system fonts, so tests do not depend on the host.
fn context(width: u32, height: u32) -> Canvas2dContext {
    init_logging();
    Canvas2dContext::builder(width, height)
        .font_config(FontConfig {
            load_system_fonts: false,
            ..FontConfig::default()
        })
        .build()
        .unwrap()
}

fn pixel(ctx: &Canvas2dContext, x: i32, y: i32) -> [u8; 4] {
    let data = ctx.get_image_data(x, y, 1, 1);
    [data[0], data[1], data[2], data[3]]
}

/// Test creating a canvas and drawing basic shapes.
#[test]
fn test_draw_rectangle() {
    let mut ctx = context(200, 200);
    ctx.set_fill_style("#ff0000");
    ctx.fill_rect(10.0, 10.0, 100.0, 100.0);

    assert_eq!(pixel(&ctx, 50, 50), [255, 0, 0, 255]);
    assert_eq!(pixel(&ctx, 150, 150), [0, 0, 0, 0]);
}

/// Test path operations.
#[test]
fn test_path_operations() {
    let mut ctx = context(100, 100);
    ctx.set_fill_style("#00ff00");
    ctx.begin_path();
    ctx.move_to(10.0, 10.0);
    ctx.line_to(90.0, 10.0);
    ctx.line_to(90.0, 90.0);
    ctx.line_to(10.0, 90.0);
    ctx.close_path();
    ctx.fill();

    assert_eq!(pixel(&ctx, 50, 50), [0, 255, 0, 255]);
}

/// Test stroke operations.
#[test]
fn test_stroke_operations() {
    let mut ctx = context(100, 100);
    ctx.set_stroke_style("#0000ff");
    ctx.set_line_width(2.0);
    ctx.begin_path();
    ctx.move_to(10.0, 50.0);
    ctx.line_to(90.0, 50.0);
    ctx.stroke();

    assert_eq!(pixel(&ctx, 50, 49), [0, 0, 255, 255]);
    assert_eq!(pixel(&ctx, 50, 40), [0, 0, 0, 0]);
}

#[test]
fn test_hex_round_trip() {
    for argb in [0xff00_0000u32, 0xffff_ffff, 0xff12_3456, 0xffab_cdef, 0xff80_0000] {
        let color = Color::from_argb(argb);
        assert_eq!(parse_color(&serialize_color(color)), color);
    }
}

#[rstest]
#[case("#abc", "#aabbcc")]
#[case("#abcd", "#aabbccdd")]
#[case("#ABC", "#aabbcc")]
fn test_short_hex_expansion(#[case] short: &str, #[case] long: &str) {
    assert_eq!(parse_color(short), parse_color(long));
}

#[test]
fn test_named_colors() {
    assert_eq!(parse_color("red"), Color::from_rgba8(255, 0, 0, 255));
    assert_eq!(parse_color("transparent"), Color::from_rgba8(0, 0, 0, 0));
}

#[rstest]
#[case("12pt", 12.0)]
#[case("16px", 12.0)]
#[case("2em", 24.0)]
#[case("bold 1in Arial", 72.0)]
#[case("no size here", 16.0)]
fn test_font_sizes(#[case] font: &str, #[case] expected: f32) {
    assert!((parse_font_size(font) - expected).abs() < 1e-4);
}

#[test]
fn test_line_to_without_move_draws_nothing() {
    let mut ctx = context(20, 20);
    ctx.set_line_width(4.0);
    ctx.line_to(10.0, 10.0);
    ctx.stroke();
    assert!(ctx.get_image_data(0, 0, 20, 20).iter().all(|&b| b == 0));
}

#[test]
fn test_close_path_then_line_to_starts_at_origin() {
    let mut ctx = context(20, 20);
    ctx.move_to(0.0, 0.0);
    ctx.line_to(10.0, 0.0);
    ctx.close_path();
    ctx.line_to(5.0, 5.0);
    assert_eq!(ctx.path_phase(), PathPhase::OpenSubpath);
    assert_eq!(ctx.current_point(), Some((5.0, 5.0)));
}

#[test]
fn test_save_restore_symmetry() {
    let mut ctx = context(10, 10);
    ctx.set_line_width(3.0);
    ctx.set_fill_style("rgba(10, 20, 30, 0.5)");
    ctx.set_shadow_offset_x(2.0);
    ctx.translate(4.0, 4.0);

    let before = (
        ctx.get_line_width(),
        ctx.get_fill_style(),
        ctx.get_stroke_style(),
        ctx.get_line_cap(),
        ctx.get_line_join(),
        ctx.get_miter_limit(),
        ctx.get_shadow_offset_x(),
        ctx.get_shadow_offset_y(),
        ctx.get_shadow_blur(),
        ctx.get_shadow_color(),
        ctx.get_transform(),
    );

    ctx.save();
    ctx.set_line_width(8.0);
    ctx.set_fill_style("white");
    ctx.set_stroke_style("green");
    ctx.set_line_cap("square");
    ctx.set_line_join("bevel");
    ctx.set_miter_limit(2.0);
    ctx.set_shadow_offset_x(-5.0);
    ctx.set_shadow_offset_y(6.0);
    ctx.set_shadow_blur(7.0);
    ctx.set_shadow_color("blue");
    ctx.rotate(0.3);
    ctx.restore();

    let after = (
        ctx.get_line_width(),
        ctx.get_fill_style(),
        ctx.get_stroke_style(),
        ctx.get_line_cap(),
        ctx.get_line_join(),
        ctx.get_miter_limit(),
        ctx.get_shadow_offset_x(),
        ctx.get_shadow_offset_y(),
        ctx.get_shadow_blur(),
        ctx.get_shadow_color(),
        ctx.get_transform(),
    );
    assert_eq!(before, after);

    // Unmatched restore changes nothing
    ctx.restore();
    assert_eq!(ctx.get_line_width(), 3.0);
}

#[test]
fn test_negative_radius_errors() {
    let mut ctx = context(20, 20);
    ctx.move_to(1.0, 1.0);
    let arc_to = ctx.arc_to(&ArcToParams {
        x1: 5.0,
        y1: 5.0,
        x2: 10.0,
        y2: 5.0,
        radius: -1.0,
    });
    assert!(matches!(arc_to, Err(Canvas2dError::NegativeRadius { .. })));

    let ellipse = ctx.ellipse(&EllipseParams {
        x: 10.0,
        y: 10.0,
        radius_x: -1.0,
        radius_y: 5.0,
        rotation: 0.0,
        start_angle: 0.0,
        end_angle: 1.0,
        anticlockwise: false,
    });
    assert!(matches!(ellipse, Err(Canvas2dError::NegativeRadius { .. })));
    assert_eq!(ctx.current_point(), Some((1.0, 1.0)));
}

#[rstest]
#[case("rgba(0, 0, 0, 0)", 10.0, 8.0, 8.0)]
#[case("#ff0000", 0.0, 0.0, 0.0)]
fn test_shadow_suppression(
    #[case] color: &str,
    #[case] blur: f32,
    #[case] offset_x: f32,
    #[case] offset_y: f32,
) {
    let mut ctx = context(40, 40);
    ctx.set_shadow_color(color);
    ctx.set_shadow_blur(blur);
    ctx.set_shadow_offset_x(offset_x);
    ctx.set_shadow_offset_y(offset_y);
    ctx.set_fill_style("#0000ff");
    ctx.fill_rect(5.0, 5.0, 10.0, 10.0);

    let data = ctx.get_image_data(0, 0, 40, 40);
    for (i, px) in data.chunks(4).enumerate() {
        let (x, y) = ((i % 40) as f32 + 0.5, (i / 40) as f32 + 0.5);
        let inside = (5.0..15.0).contains(&x) && (5.0..15.0).contains(&y);
        if inside {
            assert_eq!(px, [0, 0, 255, 255]);
        } else {
            assert_eq!(px, [0, 0, 0, 0], "unexpected pixel at {:?}", (x, y));
        }
    }
}

#[test]
fn test_blurred_shadow_is_soft_and_offset() {
    let mut ctx = context(60, 60);
    ctx.set_shadow_color("black");
    ctx.set_shadow_blur(8.0);
    ctx.set_shadow_offset_x(20.0);
    ctx.set_shadow_offset_y(20.0);
    ctx.set_fill_style("#00ff00");
    ctx.fill_rect(10.0, 10.0, 20.0, 20.0);

    assert_eq!(pixel(&ctx, 20, 20), [0, 255, 0, 255]);
    // Center of the shadow is dark, its edge is partially covered
    assert!(pixel(&ctx, 40, 40)[3] > 200);
    let edge = pixel(&ctx, 30, 45)[3];
    assert!(edge > 0 && edge < 255);
}

#[test]
fn test_enormous_shadow_blur_still_draws() {
    let mut ctx = context(20, 20);
    ctx.set_shadow_color("black");
    ctx.set_shadow_blur(1e20);
    ctx.set_fill_style("#ff0000");
    ctx.fill_rect(1.0, 1.0, 5.0, 5.0);

    assert_eq!(ctx.get_shadow_blur(), 1e20);
    assert_eq!(pixel(&ctx, 3, 3), [255, 0, 0, 255]);
}

#[test]
fn test_zero_size_font_measures_and_draws_nothing() {
    let mut ctx = context(20, 20);
    ctx.set_font("0px serif");
    assert_eq!(ctx.measure_text("a").width, 0.0);
    ctx.fill_text("a", 2.0, 10.0);
    ctx.stroke_text("a", 2.0, 10.0);
    assert!(ctx.get_image_data(0, 0, 20, 20).iter().all(|&b| b == 0));
}

#[rstest]
#[case(f32::NAN)]
#[case(0.0)]
#[case(-2.0)]
fn test_invalid_line_width_is_ignored(#[case] width: f32) {
    let mut ctx = context(10, 10);
    ctx.set_line_width(6.0);
    ctx.set_line_width(width);
    assert_eq!(ctx.get_line_width(), 6.0);
}

#[test]
fn test_stroke_scale_doubles_thickness() {
    let mut ctx = context(100, 100);
    ctx.scale(2.0, 2.0);
    ctx.set_line_width(5.0);
    ctx.move_to(5.0, 25.0);
    ctx.line_to(45.0, 25.0);
    ctx.stroke();

    // Device line at y = 50 with width 10 covers [45, 55]
    assert_eq!(pixel(&ctx, 50, 46)[3], 255);
    assert_eq!(pixel(&ctx, 50, 53)[3], 255);
    assert_eq!(pixel(&ctx, 50, 43)[3], 0);
    assert_eq!(pixel(&ctx, 50, 56)[3], 0);
}

#[test]
fn test_png_data_url_decodes_to_drawn_pixels() {
    let mut canvas = Canvas::from_context(context(16, 16));
    {
        let ctx = canvas.get_context("2d").unwrap();
        ctx.set_fill_style("#336699");
        ctx.fill_rect(0.0, 0.0, 8.0, 16.0);
    }

    let url = canvas.to_data_url(None, None).unwrap();
    let encoded = url.strip_prefix("data:image/png;base64,").unwrap();
    let bytes = BASE64_STANDARD.decode(encoded).unwrap();
    let image = image::load_from_memory(&bytes).unwrap().to_rgba8();

    assert_eq!(image.dimensions(), (16, 16));
    assert_eq!(image.get_pixel(2, 2).0, [0x33, 0x66, 0x99, 255]);
    assert_eq!(image.get_pixel(12, 2).0, [0, 0, 0, 0]);
}

#[test]
fn test_jpeg_data_url_decodes() {
    let mut canvas = Canvas::from_context(context(16, 16));
    canvas
        .get_context("2d")
        .unwrap()
        .fill_rect(0.0, 0.0, 16.0, 16.0);

    let url = canvas.to_data_url(Some("image/jpeg"), Some(0.9)).unwrap();
    let encoded = url.strip_prefix("data:image/jpeg;base64,").unwrap();
    let bytes = BASE64_STANDARD.decode(encoded).unwrap();
    let image = image::load_from_memory(&bytes).unwrap().to_rgb8();
    assert_eq!(image.dimensions(), (16, 16));
    assert!(image.get_pixel(8, 8).0.iter().all(|&c| c < 10));
}

#[test]
fn test_canvas_context_type_and_dispose() {
    let mut canvas = Canvas::from_context(context(8, 8));
    assert!(matches!(
        canvas.get_context("webgl"),
        Err(Canvas2dError::UnsupportedContextType(_))
    ));
    canvas.dispose();
    assert!(matches!(
        canvas.to_buffer("image/png", None),
        Err(Canvas2dError::CanvasDisposed)
    ));
}

#[test]
fn test_reset_clears_everything() {
    let mut ctx = context(10, 10);
    ctx.set_stroke_style("red");
    ctx.rect(0.0, 0.0, 5.0, 5.0);
    ctx.fill();
    ctx.save();
    ctx.reset();
    assert_eq!(ctx.path_phase(), PathPhase::Empty);
    assert_eq!(ctx.get_stroke_style(), "#000000");
    assert!(ctx.get_image_data(0, 0, 10, 10).iter().all(|&b| b == 0));
}
