use gpui::App;

use crate::{ActiveVariantId, Theme, ThemeVariant};

/// Extension trait for accessing and modifying the global theme.
pub trait ThemeExt {
    /// Changes the theme.
    fn set_theme<T: AsRef<Theme>>(&mut self, theme: T);

    /// Gets an immutable reference to the theme.
    fn get_theme(&self) -> &Theme;

    /// Gets the currently active variant of the theme.
    fn active_variant(&self) -> &ThemeVariant;

    /// Selects which variant of the theme is active.
    fn set_active_variant(&mut self, index: usize);
}

impl ThemeExt for App {
    fn set_theme<T: AsRef<Theme>>(&mut self, theme: T) {
        self.set_global::<Theme>(theme.as_ref().clone())
    }

    fn get_theme(&self) -> &Theme {
        self.global()
    }

    fn active_variant(&self) -> &ThemeVariant {
        self.get_theme().variants.active(self)
    }

    fn set_active_variant(&mut self, index: usize) {
        self.set_global(ActiveVariantId(index))
    }
}
