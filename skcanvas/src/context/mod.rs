//! Canvas 2D rendering context implementation.

mod drawing;
mod image_ops;
mod path_ops;
mod text_rendering;
mod transform;

use crate::attribute_stack::AttributeStack;
use crate::color::{parse_color, serialize_color, Color};
use crate::error::{Canvas2dError, Canvas2dResult};
use crate::font_config::{FontConfig, ResolvedFontConfig};
use crate::font_parser::{parse_font, ParsedFont};
use crate::path_state::PathState;
use crate::style::{LineCap, LineJoin};
use crate::style_state::StyleState;
use crate::surface::DrawSurface;
use cosmic_text::{FontSystem, SwashCache};
use tiny_skia::Transform;

/// Maximum canvas dimension (same as Chrome).
const MAX_DIMENSION: u32 = 32767;

/// Font string a fresh context reports.
pub(crate) const DEFAULT_FONT: &str = "10px sans-serif";

enum FontSource {
    Config(FontConfig),
    Resolved(ResolvedFontConfig),
}

/// Builder for [`Canvas2dContext`].
pub struct Canvas2dContextBuilder {
    width: u32,
    height: u32,
    fonts: FontSource,
    anti_alias: bool,
}

impl Canvas2dContextBuilder {
    /// Create a new builder with specified dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            fonts: FontSource::Config(FontConfig::default()),
            anti_alias: true,
        }
    }

    /// Resolve fonts from `config` when the context is built.
    pub fn font_config(mut self, config: FontConfig) -> Self {
        self.fonts = FontSource::Config(config);
        self
    }

    /// Reuse an already resolved font database (no filesystem scan).
    pub fn resolved_fonts(mut self, resolved: &ResolvedFontConfig) -> Self {
        self.fonts = FontSource::Resolved(resolved.clone());
        self
    }

    pub fn anti_alias(mut self, anti_alias: bool) -> Self {
        self.anti_alias = anti_alias;
        self
    }

    /// Build the Canvas2dContext.
    pub fn build(self) -> Canvas2dResult<Canvas2dContext> {
        let (width, height) = (self.width, self.height);
        if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(Canvas2dError::InvalidDimensions { width, height });
        }

        let resolved = match self.fonts {
            FontSource::Config(config) => config.resolve(),
            FontSource::Resolved(resolved) => resolved,
        };
        let surface = DrawSurface::new(width, height)?;
        let font_system = FontSystem::new_with_locale_and_db("en".to_string(), resolved.fontdb);

        Ok(Canvas2dContext {
            surface,
            font_system,
            swash_cache: SwashCache::new(),
            style: StyleState::new(self.anti_alias),
            stack: AttributeStack::new(),
            path: PathState::new(),
            transform: Transform::identity(),
            font: DEFAULT_FONT.to_string(),
            parsed_font: ParsedFont::default(),
            anti_alias: self.anti_alias,
            hinting_enabled: resolved.hinting_enabled,
        })
    }
}

/// Canvas 2D rendering context.
///
/// Path coordinates are mapped through the current transform when they are added, so
/// the path and the surface matrix live in device space. Styles, the transform and
/// shadow settings are saved and restored together; the path and the font are not.
pub struct Canvas2dContext {
    /// Pixels plus the matrix draws are made under.
    pub(crate) surface: DrawSurface,
    /// Font system for text shaping.
    pub(crate) font_system: FontSystem,
    /// Glyph outline cache.
    pub(crate) swash_cache: SwashCache,
    /// Paint attributes.
    pub(crate) style: StyleState,
    /// Saved attribute snapshots.
    stack: AttributeStack,
    /// Current path.
    pub(crate) path: PathState,
    /// Current transform applied to incoming coordinates.
    pub(crate) transform: Transform,
    /// Last font string set.
    pub(crate) font: String,
    pub(crate) parsed_font: ParsedFont,
    anti_alias: bool,
    /// Whether font hinting is enabled for text rendering.
    pub(crate) hinting_enabled: bool,
}

impl Canvas2dContext {
    /// Create a new Canvas2dContext with the specified dimensions.
    ///
    /// Uses `FontConfig::default()` which loads system fonts and sets up
    /// standard generic family mappings (sans-serif, serif, monospace).
    pub fn new(width: u32, height: u32) -> Canvas2dResult<Self> {
        Canvas2dContextBuilder::new(width, height).build()
    }

    /// Create a new Canvas2dContext with the specified dimensions and font configuration.
    pub fn with_config(width: u32, height: u32, config: FontConfig) -> Canvas2dResult<Self> {
        Canvas2dContextBuilder::new(width, height)
            .font_config(config)
            .build()
    }

    /// Create a new Canvas2dContext using a pre-resolved font configuration.
    pub fn with_resolved(
        width: u32,
        height: u32,
        resolved: &ResolvedFontConfig,
    ) -> Canvas2dResult<Self> {
        Canvas2dContextBuilder::new(width, height)
            .resolved_fonts(resolved)
            .build()
    }

    /// Create a new builder for more configuration options.
    pub fn builder(width: u32, height: u32) -> Canvas2dContextBuilder {
        Canvas2dContextBuilder::new(width, height)
    }

    /// Get canvas width.
    pub fn width(&self) -> u32 {
        self.surface.width()
    }

    /// Get canvas height.
    pub fn height(&self) -> u32 {
        self.surface.height()
    }

    /// Save the current drawing state.
    pub fn save(&mut self) {
        log::debug!(target: "canvas", "save");
        self.stack.push(self.style.snapshot(&self.transform));
    }

    /// Restore the previously saved drawing state. No-op when nothing was saved.
    pub fn restore(&mut self) {
        log::debug!(target: "canvas", "restore");
        if let Some(snapshot) = self.stack.pop() {
            self.transform = self.style.apply(&snapshot);
        }
    }

    /// Number of saved states.
    pub fn save_depth(&self) -> usize {
        self.stack.depth()
    }

    /// Reset the rendering context to its default state.
    ///
    /// Clears the pixels, the path, the saved states and every attribute.
    pub fn reset(&mut self) {
        log::debug!(target: "canvas", "reset");
        self.surface.clear();
        self.surface.set_matrix(Transform::identity());
        self.style = StyleState::new(self.anti_alias);
        self.stack.clear();
        self.path.begin_path();
        self.transform = Transform::identity();
        self.font = DEFAULT_FONT.to_string();
        self.parsed_font = ParsedFont::default();
    }

    /// Release the context and everything it owns.
    pub fn dispose(self) {
        log::debug!(target: "canvas", "dispose");
    }

    // --- Colors ---

    /// Set the fill color from a CSS color string. Unparseable input yields black.
    pub fn set_fill_style(&mut self, style: &str) {
        log::debug!(target: "canvas", "fillStyle {}", style);
        self.style.set_fill_color(parse_color(style));
    }

    /// Set the fill color without going through a CSS string.
    pub fn set_fill_style_color(&mut self, color: Color) {
        self.style.set_fill_color(color);
    }

    /// Serialized fill color (`#rrggbb` or `rgba(...)`).
    pub fn get_fill_style(&self) -> String {
        serialize_color(self.style.fill_color())
    }

    /// Set the stroke color from a CSS color string. Unparseable input yields black.
    pub fn set_stroke_style(&mut self, style: &str) {
        log::debug!(target: "canvas", "strokeStyle {}", style);
        self.style.set_stroke_color(parse_color(style));
    }

    /// Set the stroke color without going through a CSS string.
    pub fn set_stroke_style_color(&mut self, color: Color) {
        self.style.set_stroke_color(color);
    }

    pub fn get_stroke_style(&self) -> String {
        serialize_color(self.style.stroke_color())
    }

    // --- Line attributes ---

    /// Set the line width. Non-finite, zero and negative values are ignored.
    pub fn set_line_width(&mut self, width: f32) {
        log::debug!(target: "canvas", "lineWidth {}", width);
        self.style.set_line_width(width);
    }

    pub fn get_line_width(&self) -> f32 {
        self.style.line_width()
    }

    /// Set the line cap (`butt`, `round`, `square`). Other values are ignored.
    pub fn set_line_cap(&mut self, cap: &str) {
        log::debug!(target: "canvas", "lineCap {}", cap);
        if let Ok(cap) = cap.parse::<LineCap>() {
            self.style.set_line_cap(cap);
        }
    }

    pub fn get_line_cap(&self) -> &'static str {
        self.style.line_cap().as_str()
    }

    /// Set the line join (`miter`, `round`, `bevel`). Other values are ignored.
    pub fn set_line_join(&mut self, join: &str) {
        log::debug!(target: "canvas", "lineJoin {}", join);
        if let Ok(join) = join.parse::<LineJoin>() {
            self.style.set_line_join(join);
        }
    }

    pub fn get_line_join(&self) -> &'static str {
        self.style.line_join().as_str()
    }

    /// Set the miter limit. Non-finite, zero and negative values are ignored.
    pub fn set_miter_limit(&mut self, limit: f32) {
        log::debug!(target: "canvas", "miterLimit {}", limit);
        self.style.set_miter_limit(limit);
    }

    pub fn get_miter_limit(&self) -> f32 {
        self.style.miter_limit()
    }

    // --- Shadows ---

    /// Set the shadow blur. Negative and non-finite values are ignored.
    pub fn set_shadow_blur(&mut self, blur: f32) {
        log::debug!(target: "canvas", "shadowBlur {}", blur);
        self.style.set_shadow_blur(blur);
    }

    pub fn get_shadow_blur(&self) -> f32 {
        self.style.shadow_blur()
    }

    pub fn set_shadow_color(&mut self, color: &str) {
        log::debug!(target: "canvas", "shadowColor {}", color);
        self.style.set_shadow_color(parse_color(color));
    }

    pub fn get_shadow_color(&self) -> String {
        serialize_color(self.style.shadow_color())
    }

    /// Set the horizontal shadow offset. Non-finite values are ignored.
    pub fn set_shadow_offset_x(&mut self, offset: f32) {
        log::debug!(target: "canvas", "shadowOffsetX {}", offset);
        self.style.set_shadow_offset_x(offset);
    }

    pub fn get_shadow_offset_x(&self) -> f32 {
        self.style.shadow_offset_x()
    }

    /// Set the vertical shadow offset. Non-finite values are ignored.
    pub fn set_shadow_offset_y(&mut self, offset: f32) {
        log::debug!(target: "canvas", "shadowOffsetY {}", offset);
        self.style.set_shadow_offset_y(offset);
    }

    pub fn get_shadow_offset_y(&self) -> f32 {
        self.style.shadow_offset_y()
    }

    // --- Font ---

    /// Set the font from a CSS font string.
    pub fn set_font(&mut self, font: &str) {
        log::debug!(target: "canvas", "font {}", font);
        self.parsed_font = parse_font(font);
        self.font = font.to_string();
    }

    /// The last font string set.
    pub fn get_font(&self) -> &str {
        &self.font
    }
}
