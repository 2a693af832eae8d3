use gpui::{
    App, ElementId, InteractiveElement, IntoElement, ObjectFit, ParentElement, RenderOnce,
    SharedString, Styled, StyledImage, Window, div, img, px,
};
use gpui_squircle::{SquircleStyled, squircle};

use crate::theme::{ThemeExt, ThemeLayerKind, ThemeTextSizeKind};

const CARD_MAX_WIDTH: f32 = 360.;

/// A static card showing a profile picture, a name and a description.
///
/// Values are rendered exactly as given: no validation, fallback image or
/// truncation is applied.
#[derive(IntoElement)]
pub struct ProfileCard {
    id: ElementId,
    name: SharedString,
    description: SharedString,
    image_url: SharedString,
    layer: ThemeLayerKind,
}

impl ProfileCard {
    pub fn new(id: impl Into<ElementId>) -> Self {
        Self {
            id: id.into(),
            name: SharedString::default(),
            description: SharedString::default(),
            image_url: SharedString::default(),
            layer: ThemeLayerKind::Secondary,
        }
    }

    pub fn name(mut self, name: impl Into<SharedString>) -> Self {
        self.name = name.into();
        self
    }

    pub fn description(mut self, description: impl Into<SharedString>) -> Self {
        self.description = description.into();
        self
    }

    pub fn image_url(mut self, image_url: impl Into<SharedString>) -> Self {
        self.image_url = image_url.into();
        self
    }

    /// The surface the card sits on. Defaults to [`ThemeLayerKind::Secondary`].
    pub fn layer(mut self, layer: ThemeLayerKind) -> Self {
        self.layer = layer;
        self
    }
}

impl RenderOnce for ProfileCard {
    fn render(self, _window: &mut Window, cx: &mut App) -> impl IntoElement {
        let background_color = self.layer.resolve(cx);
        let border_color = self.layer.next().resolve(cx);
        let text_colors = cx.active_variant().colors.text.clone();
        let layout = &cx.get_theme().layout;
        let padding = layout.padding.clone();
        let corner_radius = layout.corner_radii.lg;

        div()
            .id(self.id)
            .relative()
            .flex()
            .flex_col()
            .items_center()
            .gap(padding.md)
            .p(padding.xl)
            .max_w(px(CARD_MAX_WIDTH))
            .child(
                squircle()
                    .absolute_expand()
                    .rounded(corner_radius)
                    .bg(background_color)
                    .border(px(1.))
                    .border_inside()
                    .border_color(border_color),
            )
            .child(
                img(self.image_url)
                    .max_w_full()
                    .rounded(layout.corner_radii.md)
                    .object_fit(ObjectFit::Contain),
            )
            .child(
                div()
                    .text_size(ThemeTextSizeKind::HeadingLg.resolve(cx))
                    .font_weight(ThemeTextSizeKind::HeadingLg.weight(cx))
                    .text_color(text_colors.heading)
                    .child(self.name),
            )
            .child(
                div()
                    .text_size(ThemeTextSizeKind::Body.resolve(cx))
                    .text_color(text_colors.primary)
                    .child(self.description),
            )
    }
}
