//! Named palettes and the registry that resolves them.

use serde::{Deserialize, Serialize};

use super::Rgb;
use crate::error::PipelineError;

/// Key that always means "no quantization".
pub const PASSTHROUGH_KEY: &str = "none";

/// A named, ordered, non-empty list of colors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    name: String,
    colors: Vec<Rgb>,
}

impl Palette {
    /// Create a palette.
    ///
    /// # Errors
    ///
    /// Returns `PipelineError::PaletteConfig` if the name is blank or the
    /// color list is empty. Surrounding whitespace is stripped from the name.
    pub fn new(name: impl Into<String>, colors: Vec<Rgb>) -> Result<Self, PipelineError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(PipelineError::PaletteConfig(
                "palette name must not be empty".to_string(),
            ));
        }
        if colors.is_empty() {
            return Err(PipelineError::PaletteConfig(format!(
                "palette '{}' has no colors",
                name
            )));
        }
        Ok(Self { name, colors })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Colors in declaration order.
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// Check whether `color` is one of this palette's entries.
    pub fn contains(&self, color: Rgb) -> bool {
        self.colors.contains(&color)
    }
}

#[derive(Debug, Deserialize)]
struct RegistryFile {
    palettes: Vec<Palette>,
}

/// Ordered mapping from palette key to palette.
///
/// The registry is a plain value: build it once at startup (from
/// [`PaletteRegistry::builtin`] or a JSON document) and hand it to the
/// pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteRegistry {
    palettes: Vec<Palette>,
}

impl Default for PaletteRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl PaletteRegistry {
    /// Create a registry with no palettes. Only passthrough resolves.
    pub fn empty() -> Self {
        Self {
            palettes: Vec::new(),
        }
    }

    /// The built-in palette table.
    pub fn builtin() -> Self {
        let palettes = BUILTIN
            .iter()
            .map(|(name, colors)| Palette {
                name: (*name).to_string(),
                colors: colors.iter().map(|&(r, g, b)| Rgb::new(r, g, b)).collect(),
            })
            .collect();
        Self { palettes }
    }

    /// Load palettes from a JSON document.
    ///
    /// Format: `{"palettes": [{"name": "sepia", "colors": ["#704214", ...]}]}`
    ///
    /// # Errors
    ///
    /// Returns `PipelineError::PaletteConfig` for malformed JSON, bad hex colors,
    /// empty palettes, duplicate names or the reserved name `none`.
    pub fn from_json(json: &str) -> Result<Self, PipelineError> {
        let file: RegistryFile =
            serde_json::from_str(json).map_err(|e| PipelineError::PaletteConfig(e.to_string()))?;

        let mut registry = Self::empty();
        for palette in file.palettes {
            // Deserialization bypasses Palette::new, so re-validate here
            let palette = Palette::new(palette.name, palette.colors)?;
            registry.insert(palette)?;
        }
        log::debug!("Loaded {} palettes from JSON", registry.len());
        Ok(registry)
    }

    /// Append a palette after the existing ones.
    ///
    /// # Errors
    ///
    /// Returns `PipelineError::PaletteConfig` if the name is taken or reserved.
    pub fn insert(&mut self, palette: Palette) -> Result<(), PipelineError> {
        if is_passthrough(palette.name()) {
            return Err(PipelineError::PaletteConfig(format!(
                "'{}' is reserved for passthrough",
                palette.name()
            )));
        }
        if self.get(palette.name()).is_some() {
            return Err(PipelineError::PaletteConfig(format!(
                "duplicate palette '{}'",
                palette.name()
            )));
        }
        self.palettes.push(palette);
        Ok(())
    }

    /// Look up a palette by exact key.
    pub fn get(&self, name: &str) -> Option<&Palette> {
        self.palettes.iter().find(|p| p.name == name)
    }

    /// Resolve a caller's palette selector.
    ///
    /// `None`, `""` and `"none"` select passthrough and yield `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns `PipelineError::UnknownPalette` if the key is not registered.
    pub fn resolve(&self, key: Option<&str>) -> Result<Option<&Palette>, PipelineError> {
        match key {
            None => Ok(None),
            Some(key) if is_passthrough(key) => Ok(None),
            Some(key) => self
                .get(key.trim())
                .map(Some)
                .ok_or_else(|| PipelineError::UnknownPalette(key.to_string())),
        }
    }

    /// Palette keys in registry order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.palettes.iter().map(|p| p.name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Palette> {
        self.palettes.iter()
    }

    pub fn len(&self) -> usize {
        self.palettes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.palettes.is_empty()
    }
}

fn is_passthrough(key: &str) -> bool {
    let key = key.trim();
    key.is_empty() || key.eq_ignore_ascii_case(PASSTHROUGH_KEY)
}

type PaletteTable = [(&'static str, &'static [(u8, u8, u8)])];

static BUILTIN: &PaletteTable = &[
    (
        "grayscale",
        &[
            (0, 0, 0),
            (36, 36, 36),
            (73, 73, 73),
            (109, 109, 109),
            (146, 146, 146),
            (182, 182, 182),
            (219, 219, 219),
            (255, 255, 255),
        ],
    ),
    (
        "gameboy",
        &[(15, 56, 15), (48, 98, 48), (139, 172, 15), (155, 188, 15)],
    ),
    (
        "retro",
        &[
            (0, 0, 0),
            (255, 255, 255),
            (136, 0, 0),
            (170, 255, 238),
            (204, 68, 204),
            (0, 204, 85),
            (0, 0, 170),
            (238, 238, 119),
            (221, 136, 85),
            (102, 68, 0),
            (255, 119, 119),
            (51, 51, 51),
            (119, 119, 119),
            (170, 255, 102),
            (0, 136, 255),
            (187, 187, 187),
        ],
    ),
    (
        "onedark",
        &[
            (40, 44, 52),
            (171, 178, 191),
            (224, 108, 117),
            (152, 195, 121),
            (229, 192, 123),
            (97, 175, 239),
            (198, 120, 221),
            (86, 182, 194),
            (190, 80, 70),
            (92, 99, 112),
            (130, 137, 151),
            (209, 154, 102),
            (195, 232, 141),
            (56, 62, 71),
            (239, 241, 245),
            (75, 82, 94),
        ],
    ),
    (
        "dracula",
        &[
            (40, 42, 54),
            (248, 248, 242),
            (255, 85, 85),
            (80, 250, 123),
            (241, 250, 140),
            (189, 147, 249),
            (255, 121, 198),
            (139, 233, 253),
            (255, 184, 108),
            (68, 71, 90),
            (98, 114, 164),
            (255, 110, 110),
            (95, 255, 135),
            (58, 60, 78),
        ],
    ),
    (
        "monochrome",
        &[
            (0, 0, 0),
            (255, 255, 255),
            (85, 85, 85),
            (170, 170, 170),
            (212, 212, 212),
            (128, 128, 128),
            (192, 192, 192),
            (224, 224, 224),
            (160, 160, 160),
            (32, 32, 32),
            (96, 96, 96),
            (144, 144, 144),
            (208, 208, 208),
            (16, 16, 16),
            (240, 240, 240),
            (64, 64, 64),
        ],
    ),
    (
        "monokai",
        &[
            (39, 40, 34),
            (248, 248, 242),
            (249, 38, 114),
            (166, 226, 46),
            (230, 219, 116),
            (102, 217, 239),
            (174, 129, 255),
            (161, 239, 228),
            (253, 151, 31),
            (69, 70, 64),
            (117, 113, 94),
            (56, 56, 48),
        ],
    ),
    (
        "solarized",
        &[
            (0, 43, 54),
            (131, 148, 150),
            (220, 50, 47),
            (133, 153, 0),
            (181, 137, 0),
            (38, 139, 210),
            (211, 54, 130),
            (42, 161, 152),
            (203, 75, 22),
            (7, 54, 66),
            (88, 110, 117),
            (253, 246, 227),
            (238, 232, 213),
            (101, 123, 131),
        ],
    ),
    ("bw", &[(0, 0, 0), (255, 255, 255)]),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_order() {
        let registry = PaletteRegistry::builtin();
        let names: Vec<&str> = registry.names().collect();
        assert_eq!(
            names,
            vec![
                "grayscale",
                "gameboy",
                "retro",
                "onedark",
                "dracula",
                "monochrome",
                "monokai",
                "solarized",
                "bw"
            ]
        );
    }

    #[test]
    fn test_builtin_palettes_have_no_duplicate_colors() {
        for palette in PaletteRegistry::builtin().iter() {
            let colors = palette.colors();
            for (i, c) in colors.iter().enumerate() {
                assert!(
                    !colors[..i].contains(c),
                    "palette {} repeats {}",
                    palette.name(),
                    c
                );
            }
        }
    }

    #[test]
    fn test_resolve_passthrough() {
        let registry = PaletteRegistry::builtin();
        assert!(registry.resolve(None).unwrap().is_none());
        assert!(registry.resolve(Some("none")).unwrap().is_none());
        assert!(registry.resolve(Some("NONE")).unwrap().is_none());
        assert!(registry.resolve(Some("")).unwrap().is_none());
    }

    #[test]
    fn test_resolve_known_palette() {
        let registry = PaletteRegistry::builtin();
        let gameboy = registry.resolve(Some("gameboy")).unwrap().unwrap();
        assert_eq!(gameboy.colors().len(), 4);
        assert!(gameboy.contains(Rgb::new(15, 56, 15)));
    }

    #[test]
    fn test_resolve_unknown_palette() {
        let registry = PaletteRegistry::builtin();
        let result = registry.resolve(Some("doesnotexist"));
        assert!(matches!(result, Err(PipelineError::UnknownPalette(ref k)) if k == "doesnotexist"));
    }

    #[test]
    fn test_empty_registry_only_passthrough() {
        let registry = PaletteRegistry::empty();
        assert!(registry.is_empty());
        assert!(registry.resolve(Some("none")).unwrap().is_none());
        assert!(registry.resolve(Some("gameboy")).is_err());
    }

    #[test]
    fn test_palette_new_validation() {
        assert!(Palette::new("x", vec![]).is_err());
        assert!(Palette::new("  ", vec![Rgb::BLACK]).is_err());
        assert!(Palette::new("x", vec![Rgb::BLACK]).is_ok());
    }

    #[test]
    fn test_palette_name_is_trimmed() {
        let palette = Palette::new("  sepia\t", vec![Rgb::BLACK]).unwrap();
        assert_eq!(palette.name(), "sepia");
    }

    #[test]
    fn test_padded_json_name_is_selectable() {
        let registry = PaletteRegistry::from_json(
            r##"{"palettes": [{"name": " sepia ", "colors": ["#704214"]}]}"##,
        )
        .unwrap();

        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["sepia"]);
        assert_eq!(registry.resolve(Some("sepia")).unwrap().map(|p| p.name()), Some("sepia"));
        assert_eq!(registry.resolve(Some(" sepia ")).unwrap().map(|p| p.name()), Some("sepia"));
    }

    #[test]
    fn test_insert_rejects_duplicates_and_reserved() {
        let mut registry = PaletteRegistry::builtin();
        let dup = Palette::new("bw", vec![Rgb::BLACK]).unwrap();
        assert!(matches!(
            registry.insert(dup),
            Err(PipelineError::PaletteConfig(_))
        ));

        let reserved = Palette::new("None", vec![Rgb::BLACK]).unwrap();
        assert!(registry.insert(reserved).is_err());

        let sepia = Palette::new("sepia", vec![Rgb::new(112, 66, 20)]).unwrap();
        registry.insert(sepia).unwrap();
        assert_eq!(registry.names().last(), Some("sepia"));
    }

    #[test]
    fn test_from_json() {
        let json = r##"{
            "palettes": [
                {"name": "sepia", "colors": ["#704214", "#c8a165", "#f4e3c1"]},
                {"name": "duo", "colors": ["000000", "#FFFFFF"]}
            ]
        }"##;
        let registry = PaletteRegistry::from_json(json).unwrap();

        assert_eq!(registry.len(), 2);
        let sepia = registry.get("sepia").unwrap();
        assert_eq!(sepia.colors()[0], Rgb::new(0x70, 0x42, 0x14));
        assert_eq!(registry.get("duo").unwrap().colors()[1], Rgb::WHITE);
    }

    #[test]
    fn test_from_json_rejects_bad_input() {
        let cases = [
            "not json",
            r#"{"palettes": [{"name": "x", "colors": []}]}"#,
            r##"{"palettes": [{"name": "x", "colors": ["#12345"]}]}"##,
            r##"{"palettes": [{"name": "none", "colors": ["#123456"]}]}"##,
            r##"{"palettes": [{"name": "a", "colors": ["#123456"]}, {"name": "a", "colors": ["#654321"]}]}"##,
        ];
        for json in cases {
            assert!(
                matches!(
                    PaletteRegistry::from_json(json),
                    Err(PipelineError::PaletteConfig(_))
                ),
                "expected PaletteConfig error for {}",
                json
            );
        }
    }
}
