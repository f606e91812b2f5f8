//! Font database configuration.
//!
//! A [`FontConfig`] describes which fonts a context can use. Resolving it scans the
//! filesystem once; the resulting [`ResolvedFontConfig`] can be cloned into as many
//! contexts as needed.

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

/// Font configuration for a rendering context.
#[derive(Clone, Debug)]
pub struct FontConfig {
    /// Raw font files (TTF/OTF/TTC) to register, shared without copying.
    pub custom_fonts: Vec<Arc<Vec<u8>>>,
    /// Concrete families to use for the CSS generic families.
    pub generic_families: GenericFamilyMap,
    /// Whether to load system fonts (default: true).
    pub load_system_fonts: bool,
    /// Additional directories to scan for font files.
    pub font_dirs: Vec<PathBuf>,
    /// Whether glyph outlines are hinted (default: false).
    pub hinting_enabled: bool,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            custom_fonts: Vec::new(),
            generic_families: GenericFamilyMap::defaults(),
            load_system_fonts: true,
            font_dirs: Vec::new(),
            hinting_enabled: false,
        }
    }
}

impl FontConfig {
    /// Resolve this configuration into a concrete font database.
    pub fn resolve(&self) -> ResolvedFontConfig {
        ResolvedFontConfig::new(self)
    }
}

/// Candidate families for each CSS generic family, in priority order.
#[derive(Clone, Debug, Default)]
pub struct GenericFamilyMap {
    pub serif: Vec<String>,
    pub sans_serif: Vec<String>,
    pub monospace: Vec<String>,
    pub cursive: Vec<String>,
    pub fantasy: Vec<String>,
}

impl GenericFamilyMap {
    /// Common browser preferences.
    pub fn defaults() -> Self {
        let names = |list: &[&str]| list.iter().map(|s| s.to_string()).collect();
        Self {
            sans_serif: names(&["Arial", "Helvetica", "Liberation Sans", "DejaVu Sans"]),
            serif: names(&["Times New Roman", "Times", "Liberation Serif", "DejaVu Serif"]),
            monospace: names(&["Courier New", "Courier", "Liberation Mono", "DejaVu Sans Mono"]),
            cursive: names(&["Comic Sans MS", "Apple Chancery"]),
            fantasy: names(&["Impact", "Papyrus"]),
        }
    }
}

/// A [`FontConfig`] resolved into a font database.
///
/// Cloning copies the in-memory database; no filesystem scan is repeated.
#[derive(Clone)]
pub struct ResolvedFontConfig {
    pub(crate) fontdb: fontdb::Database,
    pub(crate) hinting_enabled: bool,
}

impl ResolvedFontConfig {
    pub fn new(config: &FontConfig) -> Self {
        Self {
            fontdb: font_config_to_fontdb(config),
            hinting_enabled: config.hinting_enabled,
        }
    }

    /// Number of font faces available.
    pub fn face_count(&self) -> usize {
        self.fontdb.faces().count()
    }
}

/// Build a [`fontdb::Database`] from a [`FontConfig`].
pub fn font_config_to_fontdb(config: &FontConfig) -> fontdb::Database {
    let mut db = fontdb::Database::new();

    if config.load_system_fonts {
        db.load_system_fonts();
    }
    for dir in &config.font_dirs {
        db.load_fonts_dir(dir);
    }
    for data in &config.custom_fonts {
        let ids = db.load_font_source(fontdb::Source::Binary(data.clone()));
        if ids.is_empty() {
            log::warn!(target: "canvas", "custom font data contained no usable faces");
        }
    }

    apply_generic_families(&mut db, &config.generic_families);
    log::debug!(target: "canvas", "font database ready with {} faces", db.faces().count());
    db
}

/// Point each generic family at the first available candidate.
fn apply_generic_families(db: &mut fontdb::Database, families: &GenericFamilyMap) {
    let available: HashSet<String> = db
        .faces()
        .flat_map(|face| face.families.iter().map(|(name, _lang)| name.clone()))
        .collect();

    type Setter = fn(&mut fontdb::Database, String);
    let slots: [(&[String], Setter); 5] = [
        (&families.serif, fontdb::Database::set_serif_family::<String>),
        (&families.sans_serif, fontdb::Database::set_sans_serif_family::<String>),
        (&families.monospace, fontdb::Database::set_monospace_family::<String>),
        (&families.cursive, fontdb::Database::set_cursive_family::<String>),
        (&families.fantasy, fontdb::Database::set_fantasy_family::<String>),
    ];

    for (candidates, set) in slots {
        if let Some(family) = candidates.iter().find(|f| available.contains(*f)) {
            set(db, family.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_system_fonts() -> FontConfig {
        FontConfig {
            load_system_fonts: false,
            ..FontConfig::default()
        }
    }

    #[test]
    fn test_default_font_config() {
        let config = FontConfig::default();
        assert!(config.custom_fonts.is_empty());
        assert!(config.load_system_fonts);
        assert!(config.font_dirs.is_empty());
        assert_eq!(config.generic_families.sans_serif[0], "Arial");
        assert!(!config.hinting_enabled);
    }

    #[test]
    fn test_empty_database() {
        let resolved = no_system_fonts().resolve();
        assert_eq!(resolved.face_count(), 0);
        assert_eq!(resolved.clone().face_count(), 0);
    }

    #[test]
    fn test_garbage_font_data_is_skipped() {
        let config = FontConfig {
            custom_fonts: vec![Arc::new(vec![0u8; 64])],
            ..no_system_fonts()
        };
        assert_eq!(font_config_to_fontdb(&config).faces().count(), 0);
    }

    #[test]
    fn test_missing_font_dir_is_skipped() {
        let config = FontConfig {
            font_dirs: vec![PathBuf::from("/nonexistent/skcanvas-fonts")],
            ..no_system_fonts()
        };
        assert_eq!(font_config_to_fontdb(&config).faces().count(), 0);
    }
}
