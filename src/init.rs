use gpui::{App, Window};

use crate::{
    components::bind_text_field_keys,
    theme::{ActiveVariantId, Theme, ThemeExt},
};

/// Installs the bundled theme and selects its first variant, unless the
/// application has already provided its own, and binds the text field keys.
pub fn init(cx: &mut App) {
    bind_text_field_keys(cx);

    if !cx.has_global::<Theme>() {
        cx.set_theme(Theme::bundled());
    }

    if !cx.has_global::<ActiveVariantId>() {
        cx.set_active_variant(0);
    }
}

pub fn init_for_window(window: &mut Window, cx: &mut App) {
    window.set_rem_size(cx.get_theme().layout.text.base_size);
}
