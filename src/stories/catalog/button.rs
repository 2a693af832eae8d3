use gpui::{ElementId, IntoElement, ParentElement, Styled, div};

use crate::{
    components::{Button, ButtonTheme},
    stories::{StoryRegistry, action, story_container, story_item, story_section},
    theme::ThemeExt,
};

pub(super) fn register(registry: &mut StoryRegistry) {
    registry
        .stories_of("Button")
        .with_knobs()
        .add("themes", |_knobs, _window, cx| {
            story_container(cx)
                .child(
                    story_section("Themes", cx).children(ButtonTheme::ALL.into_iter().map(
                        |theme| {
                            story_item(
                                theme.class_name(),
                                Button::new(ElementId::Name(theme.class_name().into()))
                                    .theme(theme)
                                    .text("Go")
                                    .on_click(action("clicked")),
                                cx,
                            )
                        },
                    )),
                )
                .child(
                    story_section("Disabled", cx).child(story_item(
                        "button",
                        Button::new("disabled").text("Go").disabled(true),
                        cx,
                    )),
                )
                .into_any_element()
        })
        .add("with knobs", |knobs, _window, cx| {
            let theme = knobs.select(
                "Theme",
                ButtonTheme::ALL.map(|theme| theme.key()),
                ButtonTheme::default().key(),
            );
            let text = knobs.text("Text", "Go");

            let button = match Button::new("knob-button")
                .text(text)
                .on_click(action("clicked"))
                .try_theme(&theme)
            {
                Ok(button) => button.into_any_element(),
                Err(error) => div()
                    .text_color(cx.active_variant().colors.accent.primary)
                    .child(error.to_string())
                    .into_any_element(),
            };

            story_container(cx).child(button).into_any_element()
        });
}
