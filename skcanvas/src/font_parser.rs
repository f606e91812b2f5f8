//! CSS font string parsing for Canvas 2D.
//!
//! The size of a CSS font string is converted to points with a fixed table of unit
//! factors, using 12pt as the reference height for relative units. The rest of the
//! shorthand (style, weight, families) is split out for text shaping.

use cosmic_text::{Style, Weight};
use lazy_static::lazy_static;
use regex::Regex;

/// Size used when no `<number><unit>` token can be found.
pub const FALLBACK_FONT_SIZE: f32 = 16.0;

/// Reference height, in points, that relative units (`em`, `rem`, `%`) scale.
const DEFAULT_HEIGHT: f32 = 12.0;

lazy_static! {
    static ref FONT_SIZE_RE: Regex =
        Regex::new(r"(?i)(\d*\.?\d+)(px|pt|pc|in|cm|mm|%|em|ex|ch|rem|q)")
            .expect("font size pattern is valid");
}

/// Parsed font specification from a CSS font string.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedFont {
    /// Font style (normal, italic, oblique).
    pub style: Style,
    /// Font weight (100-900 or keywords like bold).
    pub weight: Weight,
    /// Font size in points.
    pub size: f32,
    /// Font families in order of preference.
    pub families: Vec<String>,
}

impl Default for ParsedFont {
    fn default() -> Self {
        Self {
            style: Style::Normal,
            weight: Weight::NORMAL,
            // "10px sans-serif"
            size: 7.5,
            families: vec!["sans-serif".to_string()],
        }
    }
}

/// Extract the font size of a CSS font string, in points.
///
/// The first `<number><unit>` token wins. Unparseable input is logged and yields
/// [`FALLBACK_FONT_SIZE`].
pub fn parse_font_size(font: &str) -> f32 {
    match find_size(font) {
        Some((size, _, _)) => size,
        None => {
            log::warn!(
                target: "canvas",
                "no font size found in {:?}, using {}", font, FALLBACK_FONT_SIZE
            );
            FALLBACK_FONT_SIZE
        }
    }
}

/// Locate the size token. Returns the size in points and the byte range of the token.
fn find_size(font: &str) -> Option<(f32, usize, usize)> {
    let caps = FONT_SIZE_RE.captures(font)?;
    let whole = caps.get(0)?;
    let value: f32 = caps.get(1)?.as_str().parse().ok()?;
    let unit = caps.get(2)?.as_str().to_ascii_lowercase();
    Some((to_points(value, &unit), whole.start(), whole.end()))
}

fn to_points(size: f32, unit: &str) -> f32 {
    match unit {
        "pt" => size,
        "px" => size * 0.75,
        "pc" => size * 12.0,
        "in" => size * 72.0,
        "cm" => size * 72.0 / 2.54,
        "mm" => size * 72.0 / 25.4,
        "%" => size * DEFAULT_HEIGHT / 100.0,
        "em" | "rem" => size * DEFAULT_HEIGHT,
        "q" => size * 96.0 / 25.4 / 3.0,
        // Font-relative glyph units; approximated as half an em.
        "ex" | "ch" => {
            log::debug!(target: "canvas", "approximating {}{} as half an em", size, unit);
            size * DEFAULT_HEIGHT / 2.0
        }
        _ => size,
    }
}

/// Parse a CSS font shorthand.
///
/// Supports format: `[style] [variant] [weight] size[/line-height] family[, family]*`
///
/// Examples:
/// - "12px Arial"
/// - "bold 14px sans-serif"
/// - "italic bold 12pt 'Times New Roman', serif"
pub fn parse_font(font_str: &str) -> ParsedFont {
    let font_str = font_str.trim();
    let mut result = ParsedFont::default();

    let Some((size, start, end)) = find_size(font_str) else {
        log::warn!(
            target: "canvas",
            "no font size found in {:?}, using {}", font_str, FALLBACK_FONT_SIZE
        );
        result.size = FALLBACK_FONT_SIZE;
        return result;
    };
    result.size = size;

    // Style, variant and weight come before the size
    for token in font_str[..start].split_whitespace() {
        match token.to_ascii_lowercase().as_str() {
            "italic" => result.style = Style::Italic,
            "oblique" => result.style = Style::Oblique,
            "bold" => result.weight = Weight::BOLD,
            "bolder" => result.weight = Weight::EXTRA_BOLD,
            "lighter" => result.weight = Weight::LIGHT,
            other => {
                if let Some(weight) = parse_numeric_weight(other) {
                    result.weight = weight;
                }
            }
        }
    }

    let mut remaining = font_str[end..].trim_start();
    if let Some(rest) = remaining.strip_prefix('/') {
        remaining = skip_line_height(rest);
    }

    let remaining = remaining.trim_start();
    if !remaining.is_empty() {
        result.families = parse_font_families(remaining);
    }

    result
}

/// Numeric weight (100-900 in steps of 100).
fn parse_numeric_weight(s: &str) -> Option<Weight> {
    let weight: u16 = s.parse().ok()?;
    if !(100..=900).contains(&weight) || weight % 100 != 0 {
        return None;
    }
    Some(Weight(weight))
}

/// Skip line-height specification after '/'.
fn skip_line_height(s: &str) -> &str {
    let end = s
        .char_indices()
        .find(|(_, c)| c.is_whitespace())
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    &s[end..]
}

/// Parse font family list.
fn parse_font_families(s: &str) -> Vec<String> {
    let mut families = Vec::new();
    let mut remaining = s.trim();

    while !remaining.is_empty() {
        let (family, rest) = parse_single_family(remaining);
        if !family.is_empty() {
            families.push(family);
        }
        remaining = rest.trim_start();
        if let Some(rest) = remaining.strip_prefix(',') {
            remaining = rest.trim_start();
        } else {
            break;
        }
    }

    if families.is_empty() {
        families.push("sans-serif".to_string());
    }

    families
}

/// Parse a single, possibly quoted, family name.
fn parse_single_family(s: &str) -> (String, &str) {
    let s = s.trim_start();

    for quote in ['"', '\''] {
        if let Some(inner) = s.strip_prefix(quote) {
            return match inner.find(quote) {
                Some(end) => (inner[..end].to_string(), &inner[end + 1..]),
                None => (inner.to_string(), ""),
            };
        }
    }

    let end = s.find(',').unwrap_or(s.len());
    (s[..end].trim().to_string(), &s[end..])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[rstest]
    #[case("12pt", 12.0)]
    #[case("16px", 12.0)]
    #[case("2em", 24.0)]
    #[case("2rem", 24.0)]
    #[case("1pc", 12.0)]
    #[case("1in", 72.0)]
    #[case("2.54cm", 72.0)]
    #[case("25.4mm", 72.0)]
    #[case("150%", 18.0)]
    #[case("3q", 96.0 / 25.4)]
    #[case("bold 20px Arial", 15.0)]
    #[case("italic .5em serif", 6.0)]
    #[case("16PX Arial", 12.0)]
    fn test_font_size_units(#[case] input: &str, #[case] expected: f32) {
        let size = parse_font_size(input);
        assert!(approx(size, expected), "{} -> {} (want {})", input, size, expected);
    }

    #[rstest]
    #[case("2ex", 12.0)]
    #[case("4ch", 24.0)]
    fn test_glyph_relative_units_are_half_em(#[case] input: &str, #[case] expected: f32) {
        assert!(approx(parse_font_size(input), expected));
    }

    #[rstest]
    #[case("")]
    #[case("Arial")]
    #[case("12 Arial")]
    #[case("bold large serif")]
    fn test_unparseable_size_defaults(#[case] input: &str) {
        assert_eq!(parse_font_size(input), FALLBACK_FONT_SIZE);
    }

    #[test]
    fn test_first_match_wins() {
        assert!(approx(parse_font_size("10pt/20px Arial"), 10.0));
    }

    #[test]
    fn test_simple_font() {
        let font = parse_font("16px Arial");
        assert!(approx(font.size, 12.0));
        assert_eq!(font.families, vec!["Arial"]);
        assert_eq!(font.weight, Weight::NORMAL);
        assert_eq!(font.style, Style::Normal);
    }

    #[test]
    fn test_bold_italic_font() {
        let font = parse_font("italic bold 14pt 'Times New Roman', serif");
        assert!(approx(font.size, 14.0));
        assert_eq!(font.weight, Weight::BOLD);
        assert_eq!(font.style, Style::Italic);
        assert_eq!(font.families, vec!["Times New Roman", "serif"]);
    }

    #[test]
    fn test_numeric_weight() {
        let font = parse_font("600 12px Helvetica");
        assert_eq!(font.weight, Weight(600));
        let font = parse_font("650 12px Helvetica");
        assert_eq!(font.weight, Weight::NORMAL);
    }

    #[test]
    fn test_line_height_skipped() {
        let font = parse_font("16px/20px Arial, Helvetica");
        assert!(approx(font.size, 12.0));
        assert_eq!(font.families, vec!["Arial", "Helvetica"]);
    }

    #[test]
    fn test_missing_family_defaults() {
        let font = parse_font("12pt");
        assert_eq!(font.families, vec!["sans-serif"]);
    }

    #[test]
    fn test_unparseable_font_uses_fallback_size() {
        let font = parse_font("garbage");
        assert_eq!(font.size, FALLBACK_FONT_SIZE);
        assert_eq!(font.families, vec!["sans-serif"]);
    }
}
