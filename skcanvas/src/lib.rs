//! Canvas 2D drawing context over tiny-skia.
//!
//! tiny-skia draws paths with paints under a matrix and nothing more. This crate adds
//! what the Canvas 2D API layers on top: a current transform applied to each point as
//! it is added, implicit subpath handling, CSS color and font strings, save/restore,
//! transform-aware stroke widths and blurred shadows. It uses:
//! - `tiny-skia` for paths, paints and rasterization
//! - `cosmic-text` for text shaping and glyph outlines
//! - `fontdb` for the font database
//!
//! # Example
//!
//! ```rust,no_run
//! use skcanvas::Canvas2dContext;
//!
//! let mut ctx = Canvas2dContext::new(400, 300)?;
//! ctx.set_fill_style("#ff0000");
//! ctx.fill_rect(10.0, 10.0, 100.0, 50.0);
//! let png_data = ctx.to_png(None)?;
//! # Ok::<(), skcanvas::Canvas2dError>(())
//! ```

mod arc;
mod attribute_stack;
mod blur;
mod color;
mod context;
mod dom_matrix;
mod element;
mod error;
mod font_config;
mod font_parser;
mod geometry;
mod path_state;
mod shadow;
mod style;
mod style_state;
mod surface;
mod text;

// Re-export public API
pub use attribute_stack::{AttributeStack, StyleSnapshot};
pub use blur::BlurMaskFilter;
pub use color::{parse_color, serialize_color, try_parse_color, Color};
pub use context::{Canvas2dContext, Canvas2dContextBuilder};
pub use dom_matrix::DOMMatrix;
pub use element::{Canvas, JPEG_MIME, PNG_MIME};
pub use error::{Canvas2dError, Canvas2dResult};
pub use font_config::{font_config_to_fontdb, FontConfig, GenericFamilyMap, ResolvedFontConfig};
pub use font_parser::{parse_font, parse_font_size, ParsedFont, FALLBACK_FONT_SIZE};
pub use geometry::{
    ArcParams, ArcToParams, CubicBezierParams, EllipseParams, QuadraticBezierParams, RectParams,
};
pub use path_state::{PathPhase, PathState};
pub use shadow::ShadowPaint;
pub use style::{LineCap, LineJoin, PaintMode};
pub use style_state::{ShadowParams, StyleState};
pub use surface::DrawSurface;
pub use text::TextMetrics;
