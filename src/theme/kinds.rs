#![allow(missing_docs)] // Derive macros generate undocumented methods.

use enum_assoc::Assoc;
use gpui::App;

use crate::theme::ThemeExt;

/// Text size variants that resolve to theme-defined values.
#[derive(Assoc, Clone, Copy, Debug, PartialEq, Eq)]
#[func(pub fn resolve(&self, cx: &App) -> gpui::AbsoluteLength)]
#[func(pub fn weight(&self, cx: &App) -> gpui::FontWeight)]
pub enum ThemeTextSizeKind {
    /// Page titles.
    #[assoc(resolve = cx.get_theme().layout.text.default_font.sizes.heading_xl)]
    #[assoc(weight = gpui::FontWeight(cx.get_theme().layout.text.default_font.weights.heading))]
    HeadingXl,
    #[assoc(resolve = cx.get_theme().layout.text.default_font.sizes.heading_lg)]
    #[assoc(weight = gpui::FontWeight(cx.get_theme().layout.text.default_font.weights.heading))]
    HeadingLg,
    #[assoc(resolve = cx.get_theme().layout.text.default_font.sizes.heading_md)]
    #[assoc(weight = gpui::FontWeight(cx.get_theme().layout.text.default_font.weights.heading))]
    HeadingMd,
    /// Standard body text.
    #[assoc(resolve = cx.get_theme().layout.text.default_font.sizes.body)]
    #[assoc(weight = gpui::FontWeight(cx.get_theme().layout.text.default_font.weights.body))]
    Body,
    /// Small labels and captions.
    #[assoc(resolve = cx.get_theme().layout.text.default_font.sizes.caption)]
    #[assoc(weight = gpui::FontWeight(cx.get_theme().layout.text.default_font.weights.body))]
    Caption,
}

/// Background layers for stacking surfaces.
///
/// `next()` gives the layer an element nested on top of this one should use,
/// which is also the color borders on this layer are drawn with.
#[derive(Assoc, Clone, Copy, Debug, PartialEq, Eq)]
#[func(pub fn resolve(&self, cx: &App) -> gpui::Rgba)]
#[func(pub fn next(&self) -> ThemeLayerKind)]
pub enum ThemeLayerKind {
    #[assoc(resolve = cx.active_variant().colors.background.primary)]
    #[assoc(next = ThemeLayerKind::Secondary)]
    Primary,
    #[assoc(resolve = cx.active_variant().colors.background.secondary)]
    #[assoc(next = ThemeLayerKind::Tertiary)]
    Secondary,
    /// The topmost layer; nesting further stays on it.
    #[assoc(resolve = cx.active_variant().colors.background.tertiary)]
    #[assoc(next = ThemeLayerKind::Tertiary)]
    Tertiary,
}

#[cfg(all(test, feature = "test-support"))]
mod tests {
    use super::*;
    use gpui::{AbsoluteLength, TestAppContext};

    #[gpui::test]
    fn test_text_sizes_resolve_against_bundled_theme(cx: &mut TestAppContext) {
        cx.update(|cx| {
            crate::init(cx);

            let body = ThemeTextSizeKind::Body.resolve(cx);
            let heading = ThemeTextSizeKind::HeadingXl.resolve(cx);

            assert!(matches!(body, AbsoluteLength::Rems(_)));
            assert!(matches!(heading, AbsoluteLength::Rems(_)));
            assert!(
                ThemeTextSizeKind::HeadingXl.weight(cx).0 > ThemeTextSizeKind::Body.weight(cx).0,
                "Headings should be bolder than body text"
            );
        });
    }

    #[gpui::test]
    fn test_layers_follow_active_variant(cx: &mut TestAppContext) {
        cx.update(|cx| {
            crate::init(cx);
            let light = ThemeLayerKind::Primary.resolve(cx);

            cx.set_active_variant(1);
            let dark = ThemeLayerKind::Primary.resolve(cx);

            assert_ne!(light, dark, "Variants should have different backgrounds");
        });
    }

    #[test]
    fn test_layer_next() {
        assert_eq!(ThemeLayerKind::Primary.next(), ThemeLayerKind::Secondary);
        assert_eq!(ThemeLayerKind::Secondary.next(), ThemeLayerKind::Tertiary);
        assert_eq!(ThemeLayerKind::Tertiary.next(), ThemeLayerKind::Tertiary);
    }
}
