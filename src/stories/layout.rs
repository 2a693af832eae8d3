use gpui::{App, Div, IntoElement, ParentElement, Styled, div, px};

use crate::theme::{ThemeExt, ThemeLayerKind, ThemeTextSizeKind};

/// Padded column every story renders into.
pub fn story_container(cx: &App) -> Div {
    let padding = &cx.get_theme().layout.padding;

    div()
        .flex()
        .flex_col()
        .gap(padding.lg)
        .p(padding.xl)
        .size_full()
        .bg(ThemeLayerKind::Primary.resolve(cx))
}

/// Section with a caption above its children.
pub fn story_section(title: &str, cx: &App) -> Div {
    div().flex().flex_col().gap(cx.get_theme().layout.padding.md).child(
        div()
            .text_size(ThemeTextSizeKind::Caption.resolve(cx))
            .text_color(cx.active_variant().colors.text.primary)
            .child(title.to_string()),
    )
}

/// Row with a fixed width label followed by the element.
pub fn story_item(label: &str, element: impl IntoElement, cx: &App) -> Div {
    div()
        .flex()
        .flex_row()
        .items_center()
        .gap(cx.get_theme().layout.padding.lg)
        .child(
            div()
                .w(px(120.))
                .text_size(ThemeTextSizeKind::Caption.resolve(cx))
                .text_color(cx.active_variant().colors.text.primary)
                .child(label.to_string()),
        )
        .child(element)
}
