//! CSS color strings to and from a packed 32-bit color.
//!
//! Every color attribute of the context (fill, stroke, shadow) is stored as a [`Color`].
//! Parsing accepts hex forms, `rgb()`/`rgba()` and the CSS named colors; anything else
//! logs a warning and yields opaque black.

use std::fmt;

/// A color packed as `0xAARRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(u32);

impl Color {
    /// Opaque black, the fallback for unparseable input.
    pub const BLACK: Color = Color(0xff00_0000);
    /// Transparent black, the default shadow color.
    pub const TRANSPARENT: Color = Color(0x0000_0000);

    /// Create a color from a packed `0xAARRGGBB` value.
    pub const fn from_argb(argb: u32) -> Self {
        Self(argb)
    }

    /// Create a color from 8-bit channels.
    pub const fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    /// Create a color from 8-bit RGB channels and an alpha in `[0, 1]`.
    ///
    /// Alpha is clamped and scaled to an 8-bit channel; NaN alpha becomes 0.
    pub fn from_rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self::from_rgba8(r, g, b, alpha_to_u8(a))
    }

    /// The packed `0xAARRGGBB` value.
    pub const fn argb(self) -> u32 {
        self.0
    }

    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn blue(self) -> u8 {
        self.0 as u8
    }

    /// Alpha as an 8-bit channel.
    pub const fn alpha_u8(self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Alpha in `[0, 1]`.
    pub fn alpha(self) -> f32 {
        self.alpha_u8() as f32 / 255.0
    }

    pub fn is_opaque(self) -> bool {
        self.alpha_u8() == 255
    }

    pub fn is_transparent(self) -> bool {
        self.alpha_u8() == 0
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl From<Color> for tiny_skia::Color {
    fn from(c: Color) -> Self {
        tiny_skia::Color::from_rgba8(c.red(), c.green(), c.blue(), c.alpha_u8())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&serialize_color(*self))
    }
}

fn alpha_to_u8(a: f32) -> u8 {
    if a.is_nan() {
        return 0;
    }
    (a.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Parse a CSS color string.
///
/// Accepted forms: `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`, `rgb(r, g, b[, a])`,
/// `rgba(r, g, b, a)` with a numeric or percentage alpha, and the CSS named colors
/// (including `transparent`). Input is trimmed and matched case-insensitively.
///
/// Unrecognized input is reported with `log::warn!` and returns [`Color::BLACK`].
pub fn parse_color(s: &str) -> Color {
    try_parse_color(s).unwrap_or_else(|| {
        log::warn!(target: "canvas", "unrecognized color {:?}, using black", s);
        Color::BLACK
    })
}

/// Parse a CSS color string, returning `None` for unrecognized input.
pub fn try_parse_color(s: &str) -> Option<Color> {
    let trimmed = s.trim();
    if trimmed.is_empty() || !is_accepted_form(trimmed) {
        return None;
    }
    let parsed = csscolorparser::parse(trimmed).ok()?;
    let [r, g, b, _] = parsed.to_rgba8();
    let [_, _, _, a] = parsed.to_array();
    Some(Color::from_rgba(r, g, b, a))
}

/// Restrict csscolorparser to `#` hex, `rgb()`/`rgba()` and named colors. It also reads
/// bare hex digits and other functional notations, which are not accepted here.
fn is_accepted_form(s: &str) -> bool {
    let lower = s.to_ascii_lowercase();
    if lower.starts_with('#') || lower.starts_with("rgb(") || lower.starts_with("rgba(") {
        return true;
    }
    // No color name is spelled with hex digits only
    let alphabetic = lower.chars().all(|c| c.is_ascii_alphabetic());
    alphabetic && !lower.chars().all(|c| c.is_ascii_hexdigit())
}

/// Serialize a color the way the Canvas 2D API reports it.
///
/// Opaque colors become `#rrggbb`; everything else becomes `rgba(r, g, b, a)` with
/// `a` written as `0`, `1`, or eight fractional digits.
pub fn serialize_color(color: Color) -> String {
    if color.is_opaque() {
        return format!(
            "#{:02x}{:02x}{:02x}",
            color.red(),
            color.green(),
            color.blue()
        );
    }

    let alpha = match color.alpha_u8() {
        0 => "0".to_string(),
        255 => "1".to_string(),
        a => format!("{:.8}", a as f64 / 255.0),
    };
    format!(
        "rgba({}, {}, {}, {})",
        color.red(),
        color.green(),
        color.blue(),
        alpha
    )
}
