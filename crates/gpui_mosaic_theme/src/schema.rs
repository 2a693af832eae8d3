use std::{fs, path::Path, sync::LazyLock};

use gpui::{AbsoluteLength, App, DefiniteLength, Global, Pixels, Rgba, SharedString};
use serde::Deserialize;
use smallvec::SmallVec;

use crate::{
    ThemeError,
    deserializers::{de_abs_length, de_def_length, de_font_family, de_pixels, de_variants},
};

static BUNDLED: LazyLock<Theme> = LazyLock::new(|| {
    Theme::from_json(include_str!("../themes/default.json"))
        .expect("the bundled theme should always deserialize")
});

#[derive(Debug, Deserialize, Clone)]
pub struct Theme {
    pub name: SharedString,
    pub layout: ThemeLayout,
    pub variants: ThemeVariants,
}

impl Theme {
    /// The theme shipped inside this crate.
    pub fn bundled() -> &'static Theme {
        &BUNDLED
    }

    pub fn from_json(json: impl AsRef<str>) -> Result<Theme, ThemeError> {
        Ok(serde_json::from_str(json.as_ref())?)
    }

    /// Reads and parses a theme file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Theme, ThemeError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ThemeError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_json(json)
    }
}

impl AsRef<Theme> for Theme {
    fn as_ref(&self) -> &Theme {
        self
    }
}

impl Global for Theme {}

#[derive(Debug, Deserialize, Clone)]
pub struct ThemeLayout {
    pub text: ThemeText,
    pub corner_radii: ThemeScale,
    pub size: ThemeScale,
    pub padding: ThemeScale,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ThemeText {
    #[serde(deserialize_with = "de_pixels")]
    pub base_size: Pixels,
    pub default_font: ThemeFont,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ThemeFont {
    #[serde(deserialize_with = "de_font_family")]
    pub family: SmallVec<[SharedString; 1]>,
    #[serde(deserialize_with = "de_def_length")]
    pub line_height: DefiniteLength,
    pub sizes: ThemeTextSizes,
    pub weights: ThemeTextWeights,
}

/// Used when a font has no family listed.
pub const FALLBACK_FONT_FAMILY: &str = ".SystemUIFont";

impl ThemeFont {
    /// The first family in the fallback list.
    pub fn primary_family(&self) -> SharedString {
        self.family
            .first()
            .cloned()
            .unwrap_or_else(|| SharedString::new_static(FALLBACK_FONT_FAMILY))
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ThemeTextSizes {
    #[serde(deserialize_with = "de_abs_length")]
    pub heading_xl: AbsoluteLength,
    #[serde(deserialize_with = "de_abs_length")]
    pub heading_lg: AbsoluteLength,
    #[serde(deserialize_with = "de_abs_length")]
    pub heading_md: AbsoluteLength,
    #[serde(deserialize_with = "de_abs_length")]
    pub body: AbsoluteLength,
    #[serde(deserialize_with = "de_abs_length")]
    pub caption: AbsoluteLength,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ThemeTextWeights {
    pub heading: f32,
    pub body: f32,
    pub button: f32,
}

/// A four-step scale used for sizes, paddings and corner radii.
#[derive(Debug, Deserialize, Clone)]
pub struct ThemeScale {
    #[serde(deserialize_with = "de_pixels")]
    pub sm: Pixels,
    #[serde(deserialize_with = "de_pixels")]
    pub md: Pixels,
    #[serde(deserialize_with = "de_pixels")]
    pub lg: Pixels,
    #[serde(deserialize_with = "de_pixels")]
    pub xl: Pixels,
}

/// The color variants of a theme. Never empty.
#[derive(Debug, Deserialize, Clone)]
#[serde(transparent)]
pub struct ThemeVariants {
    #[serde(deserialize_with = "de_variants")]
    variants: SmallVec<[ThemeVariant; 2]>,
}

impl ThemeVariants {
    pub fn new(variants: impl IntoIterator<Item = ThemeVariant>) -> Result<Self, ThemeError> {
        let variants: SmallVec<[ThemeVariant; 2]> = variants.into_iter().collect();

        if variants.is_empty() {
            return Err(ThemeError::NoVariants);
        }

        Ok(Self { variants })
    }

    /// The variant selected by [`ActiveVariantId`], falling back to the first one
    /// when no id has been set or it is out of range.
    pub fn active(&self, cx: &App) -> &ThemeVariant {
        let index = cx
            .try_global::<ActiveVariantId>()
            .map(|id| id.0)
            .unwrap_or_default();

        self.variants.get(index).unwrap_or_else(|| self.first())
    }

    pub fn first(&self) -> &ThemeVariant {
        // `new` and `de_variants` both reject an empty list.
        &self.variants[0]
    }

    pub fn get(&self, index: usize) -> Option<&ThemeVariant> {
        self.variants.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ThemeVariant> {
        self.variants.iter()
    }

    pub fn position(&self, kind: ThemeVariantKind) -> Option<usize> {
        self.variants.iter().position(|variant| variant.kind == kind)
    }
}

pub struct ActiveVariantId(pub usize);

impl Global for ActiveVariantId {}

#[derive(Debug, Deserialize, Clone)]
pub struct ThemeVariant {
    pub kind: ThemeVariantKind,
    pub colors: ThemeColors,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum ThemeVariantKind {
    Dark,
    Light,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ThemeColors {
    pub background: ThemeBackgroundColors,
    pub accent: ThemeAccentColors,
    pub text: ThemeTextColors,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ThemeBackgroundColors {
    pub primary: Rgba,
    pub secondary: Rgba,
    pub tertiary: Rgba,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ThemeAccentColors {
    pub primary: Rgba,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ThemeTextColors {
    pub primary: Rgba,
    pub heading: Rgba,
    pub on_accent: Rgba,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_theme_parses() {
        let theme = Theme::bundled();

        assert_eq!(theme.name.as_ref(), "Mosaic");
        assert_eq!(theme.variants.iter().count(), 2);
        assert_eq!(theme.variants.position(ThemeVariantKind::Light), Some(0));
        assert_eq!(theme.variants.position(ThemeVariantKind::Dark), Some(1));
    }

    #[test]
    fn test_bundled_scales_are_ordered() {
        let layout = &Theme::bundled().layout;

        for scale in [&layout.size, &layout.padding, &layout.corner_radii] {
            assert!(scale.sm <= scale.md, "sm should be <= md");
            assert!(scale.md <= scale.lg, "md should be <= lg");
            assert!(scale.lg <= scale.xl, "lg should be <= xl");
        }
    }

    #[test]
    fn test_theme_without_variants_is_rejected() {
        let mut json: serde_json::Value =
            serde_json::from_str(include_str!("../themes/default.json")).unwrap();
        json["variants"] = serde_json::Value::Array(Vec::new());

        let error = Theme::from_json(json.to_string()).unwrap_err();
        assert!(matches!(error, ThemeError::Parse(_)));
        assert!(error.to_string().contains("at least one theme variant"));
    }

    #[test]
    fn test_variants_cannot_be_built_empty() {
        assert!(matches!(
            ThemeVariants::new(Vec::new()),
            Err(ThemeError::NoVariants)
        ));

        let dark = Theme::bundled().variants.get(1).unwrap().clone();
        let variants = ThemeVariants::new([dark]).unwrap();
        assert_eq!(variants.first().kind, ThemeVariantKind::Dark);
        assert!(variants.get(1).is_none());
    }

    #[test]
    fn test_font_without_family_falls_back() {
        let mut font = Theme::bundled().layout.text.default_font.clone();
        assert_ne!(font.primary_family().as_ref(), FALLBACK_FONT_FAMILY);

        font.family.clear();
        assert_eq!(font.primary_family().as_ref(), FALLBACK_FONT_FAMILY);
    }

    #[test]
    fn test_missing_theme_file_reports_path() {
        let error = Theme::load("/definitely/not/a/theme.json").unwrap_err();

        assert!(matches!(error, ThemeError::Read { .. }));
        assert!(error.to_string().contains("/definitely/not/a/theme.json"));
    }
}
