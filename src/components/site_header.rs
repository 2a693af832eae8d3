use gpui::{
    App, ElementId, InteractiveElement, IntoElement, ParentElement, RenderOnce, SharedString,
    Styled, Window, div,
};

use crate::theme::{ThemeExt, ThemeTextSizeKind};

/// A full width page header displaying a title on the accent color.
#[derive(IntoElement)]
pub struct SiteHeader {
    id: ElementId,
    title: SharedString,
}

impl SiteHeader {
    pub fn new(id: impl Into<ElementId>) -> Self {
        Self {
            id: id.into(),
            title: SharedString::default(),
        }
    }

    pub fn title(mut self, title: impl Into<SharedString>) -> Self {
        self.title = title.into();
        self
    }
}

impl RenderOnce for SiteHeader {
    fn render(self, _window: &mut Window, cx: &mut App) -> impl IntoElement {
        let colors = &cx.active_variant().colors;
        let padding = &cx.get_theme().layout.padding;

        div()
            .id(self.id)
            .w_full()
            .flex()
            .items_center()
            .px(padding.xl)
            .py(padding.lg)
            .bg(colors.accent.primary)
            .text_color(colors.text.on_accent)
            .child(
                div()
                    .text_size(ThemeTextSizeKind::HeadingXl.resolve(cx))
                    .font_weight(ThemeTextSizeKind::HeadingXl.weight(cx))
                    .child(self.title),
            )
    }
}
