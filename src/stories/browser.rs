//! The story browser view: a sidebar listing every registered story, a preview
//! of the selected one, and a panel with its knobs.

use std::collections::HashMap;

use gpui::{
    AnyElement, App, AppContext, Context, ElementId, Entity, FocusHandle, InteractiveElement,
    IntoElement, ParentElement, Pixels, Render, SharedString, StatefulInteractiveElement, Styled,
    Subscription, WeakEntity, Window, div, prelude::FluentBuilder, px,
};
use tracing::{debug, warn};

use crate::{
    components::{Button, ButtonTheme, TextField, TextFieldEvent, TextFieldState},
    stories::{KnobError, KnobOptions, KnobValue, Knobs, StoryId, StoryRegistry},
    theme::{ActiveVariantId, ThemeExt, ThemeLayerKind, ThemeTextSizeKind},
};

const SIDEBAR_WIDTH: f32 = 220.;

pub struct StoryBrowser {
    registry: StoryRegistry,
    selected: Option<StoryId>,
    knobs: HashMap<StoryId, Knobs>,
    text_fields: HashMap<(StoryId, SharedString), Entity<TextFieldState>>,
    focus_handle: FocusHandle,
    _subscriptions: Vec<Subscription>,
}

impl StoryBrowser {
    /// Creates the browser with the first registered story selected.
    pub fn new(registry: StoryRegistry, cx: &mut Context<Self>) -> Self {
        let selected = registry.ids().into_iter().next();

        Self {
            registry,
            selected,
            knobs: HashMap::new(),
            text_fields: HashMap::new(),
            focus_handle: cx.focus_handle(),
            _subscriptions: Vec::new(),
        }
    }

    pub fn registry(&self) -> &StoryRegistry {
        &self.registry
    }

    pub fn selected(&self) -> Option<&StoryId> {
        self.selected.as_ref()
    }

    /// Selects a story by its `"Group/story"` id. Returns false, leaving the
    /// selection untouched, when no such story is registered.
    pub fn select_story(&mut self, id: &str) -> bool {
        match id.parse::<StoryId>() {
            Ok(id) if self.registry.find(&id).is_some() => {
                self.select(id);
                true
            }
            _ => {
                warn!(story = id, "no story registered under this id");
                false
            }
        }
    }

    /// Knobs of the selected story, once it has rendered with knobs enabled.
    pub fn knobs(&self) -> Option<&Knobs> {
        self.knobs.get(self.selected.as_ref()?)
    }

    /// The field editing text knob `label` of the selected story, once the knob
    /// panel has rendered it.
    pub fn text_field(&self, label: &str) -> Option<Entity<TextFieldState>> {
        let id = self.selected.clone()?;
        self.text_fields
            .get(&(id, SharedString::from(label.to_string())))
            .cloned()
    }

    pub fn set_knob_text(
        &mut self,
        label: &str,
        value: impl Into<SharedString>,
    ) -> Result<(), KnobError> {
        self.selected_knobs_mut(label)?.set_text(label, value)
    }

    pub fn set_knob_selected(
        &mut self,
        label: &str,
        option: impl Into<SharedString>,
    ) -> Result<(), KnobError> {
        self.selected_knobs_mut(label)?.set_selected(label, option)
    }

    pub fn reset_knob(&mut self, label: &str) -> Result<(), KnobError> {
        self.selected_knobs_mut(label)?.reset(label)
    }

    /// Restores every knob of the selected story to its default.
    pub fn reset_knobs(&mut self) {
        if let Some(id) = &self.selected
            && let Some(knobs) = self.knobs.get_mut(id)
        {
            debug!(story = %id, "resetting knobs");
            knobs.reset_all();
        }
    }

    fn select(&mut self, id: StoryId) {
        debug!(story = %id, "selected story");
        self.selected = Some(id);
    }

    fn selected_knobs_mut(&mut self, label: &str) -> Result<&mut Knobs, KnobError> {
        self.selected
            .as_ref()
            .and_then(|id| self.knobs.get_mut(id))
            .ok_or_else(|| KnobError::Missing(SharedString::from(label.to_string())))
    }

    /// Returns the field for a text knob, creating it on first use. An existing
    /// field is brought back in line with the knob, e.g. after a reset.
    fn text_field_for(
        &mut self,
        story: &StoryId,
        label: &SharedString,
        value: &SharedString,
        cx: &mut Context<Self>,
    ) -> Entity<TextFieldState> {
        let key = (story.clone(), label.clone());

        if let Some(field) = self.text_fields.get(&key) {
            let field = field.clone();
            field.update(cx, |field, cx| field.set_value(value.clone(), cx));
            return field;
        }

        let field = cx.new(|cx| TextFieldState::new(value.clone(), cx));
        let subscription = cx.subscribe(&field, {
            let story = story.clone();
            let label = label.clone();

            move |this, _field, event: &TextFieldEvent, cx| {
                let TextFieldEvent::Changed(text) = event;
                let result = match this.knobs.get_mut(&story) {
                    Some(knobs) => knobs.set_text(&label, text.clone()),
                    None => Err(KnobError::Missing(label.clone())),
                };

                if let Err(error) = result {
                    warn!(%error, "could not change knob");
                }
                cx.notify();
            }
        });

        self._subscriptions.push(subscription);
        self.text_fields.insert(key, field.clone());
        field
    }

    fn render_story(&mut self, window: &mut Window, cx: &mut App) -> Option<AnyElement> {
        let id = self.selected.clone()?;
        let (group, story) = self.registry.find(&id)?;
        let render = story.render();

        let element = if group.knobs_enabled() {
            let knobs = self.knobs.entry(id).or_default();
            (*render)(knobs, window, cx)
        } else {
            (*render)(&mut Knobs::new(), window, cx)
        };

        Some(element)
    }

    fn render_sidebar(&self, cx: &mut Context<Self>) -> impl IntoElement + use<> {
        let colors = cx.active_variant().colors.clone();
        let layout = cx.get_theme().layout.clone();
        let caption_size = ThemeTextSizeKind::Caption.resolve(cx);
        let background_color = ThemeLayerKind::Secondary.resolve(cx);

        div()
            .id("storybook-sidebar")
            .w(px(SIDEBAR_WIDTH))
            .h_full()
            .flex()
            .flex_col()
            .gap(layout.padding.lg)
            .p(layout.padding.md)
            .bg(background_color)
            .overflow_y_scroll()
            .children(self.registry.groups().map(|group| {
                div()
                    .flex()
                    .flex_col()
                    .gap(layout.padding.sm)
                    .child(
                        div()
                            .px(layout.padding.md)
                            .text_size(caption_size)
                            .child(group.name().to_uppercase()),
                    )
                    .children(group.stories().map(|story| {
                        let id = StoryId::new(group.name().clone(), story.name().clone());
                        let is_selected = self.selected.as_ref() == Some(&id);

                        div()
                            .id(ElementId::Name(format!("story:{id}").into()))
                            .px(layout.padding.md)
                            .py(layout.padding.sm)
                            .rounded(layout.corner_radii.md)
                            .cursor_pointer()
                            .child(story.name().clone())
                            .when(is_selected, |this| {
                                this.bg(colors.accent.primary)
                                    .text_color(colors.text.on_accent)
                            })
                            .on_click(cx.listener(move |this, _event, _window, cx| {
                                this.select(id.clone());
                                cx.notify();
                            }))
                    }))
            }))
    }

    fn render_toolbar(&self, cx: &mut Context<Self>) -> impl IntoElement + use<> {
        let layout = cx.get_theme().layout.clone();
        let border_color = ThemeLayerKind::Primary.next().resolve(cx);
        let browser = cx.entity().downgrade();
        let title = self
            .selected
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_else(|| "No stories registered".to_string());

        div()
            .flex()
            .flex_row()
            .items_center()
            .justify_between()
            .gap(layout.padding.md)
            .px(layout.padding.lg)
            .py(layout.padding.md)
            .border_b_1()
            .border_color(border_color)
            .child(div().text_size(ThemeTextSizeKind::HeadingMd.resolve(cx)).child(title))
            .child(
                div()
                    .flex()
                    .flex_row()
                    .gap(layout.padding.md)
                    .child(
                        Button::new("storybook-reset-knobs")
                            .theme(ButtonTheme::Outline)
                            .text("Reset knobs")
                            .disabled(self.knobs().is_none_or(Knobs::is_empty))
                            .on_click(move |_window, cx| {
                                let _ = browser.update(cx, |this, cx| {
                                    this.reset_knobs();
                                    cx.notify();
                                });
                            }),
                    )
                    .child(
                        Button::new("storybook-cycle-variant")
                            .theme(ButtonTheme::Clear)
                            .text("Switch variant")
                            .on_click(cycle_variant),
                    ),
            )
    }

    fn render_knob_panel(&mut self, cx: &mut Context<Self>) -> Option<AnyElement> {
        let id = self.selected.clone()?;
        let entries: Vec<(SharedString, KnobValue)> = self
            .knobs
            .get(&id)?
            .iter()
            .map(|(label, value)| (label.clone(), value.clone()))
            .collect();

        if entries.is_empty() {
            return None;
        }

        let layout = cx.get_theme().layout.clone();
        let caption_size = ThemeTextSizeKind::Caption.resolve(cx);
        let background_color = ThemeLayerKind::Secondary.resolve(cx);
        let browser = cx.entity().downgrade();
        let gap = layout.padding.sm;

        let mut rows = Vec::with_capacity(entries.len());
        for (label, value) in entries {
            let control = match value {
                KnobValue::Select {
                    options, selected, ..
                } => select_knob_control(&label, &options, &selected, &browser, gap),
                KnobValue::Text { value, default } => {
                    let field = self.text_field_for(&id, &label, &value, cx);
                    text_knob_control(&label, field, value != default, &browser, gap)
                }
            };

            rows.push(
                div()
                    .flex()
                    .flex_col()
                    .gap(gap)
                    .child(div().text_size(caption_size).child(label))
                    .child(control),
            );
        }

        Some(
            div()
                .id("storybook-knobs")
                .flex()
                .flex_col()
                .gap(layout.padding.lg)
                .p(layout.padding.lg)
                .max_h(px(280.))
                .overflow_y_scroll()
                .bg(background_color)
                .children(rows)
                .into_any_element(),
        )
    }
}

fn select_knob_control(
    label: &SharedString,
    options: &KnobOptions,
    selected: &SharedString,
    browser: &WeakEntity<StoryBrowser>,
    gap: Pixels,
) -> AnyElement {
    div()
        .flex()
        .flex_row()
        .flex_wrap()
        .gap(gap)
        .children(options.iter().map(|option| {
            let browser = browser.clone();
            let label = label.clone();
            let option = option.clone();

            Button::new(ElementId::Name(format!("knob:{label}:{option}").into()))
                .theme(if &option == selected {
                    ButtonTheme::Default
                } else {
                    ButtonTheme::Clear
                })
                .text(option.clone())
                .on_click(move |_window, cx| {
                    let _ = browser.update(cx, |this, cx| {
                        if let Err(error) = this.set_knob_selected(&label, option.clone()) {
                            warn!(%error, "could not change knob");
                        }
                        cx.notify();
                    });
                })
        }))
        .into_any_element()
}

fn text_knob_control(
    label: &SharedString,
    field: Entity<TextFieldState>,
    is_changed: bool,
    browser: &WeakEntity<StoryBrowser>,
    gap: Pixels,
) -> AnyElement {
    let browser = browser.clone();
    let label = label.clone();

    div()
        .flex()
        .flex_row()
        .items_center()
        .gap(gap)
        .child(
            div().flex_1().child(
                TextField::new(ElementId::Name(format!("knob:{label}:field").into()), field)
                    .placeholder(label.clone()),
            ),
        )
        .child(
            Button::new(ElementId::Name(format!("knob:{label}:reset").into()))
                .theme(ButtonTheme::Clear)
                .text("Reset")
                .disabled(!is_changed)
                .on_click(move |_window, cx| {
                    let _ = browser.update(cx, |this, cx| {
                        if let Err(error) = this.reset_knob(&label) {
                            warn!(%error, "could not reset knob");
                        }
                        cx.notify();
                    });
                }),
        )
        .into_any_element()
}

fn cycle_variant(window: &mut Window, cx: &mut App) {
    let count = cx.get_theme().variants.iter().count();
    let current = cx
        .try_global::<ActiveVariantId>()
        .map(|id| id.0)
        .unwrap_or_default();

    cx.set_active_variant((current + 1) % count);
    window.refresh();
}

impl Render for StoryBrowser {
    fn render(&mut self, window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        crate::init_for_window(window, cx);

        let colors = cx.active_variant().colors.clone();
        let font_family = cx.get_theme().layout.text.default_font.primary_family();
        let body_size = ThemeTextSizeKind::Body.resolve(cx);
        let preview = self.render_story(window, cx);

        div()
            .track_focus(&self.focus_handle)
            .size_full()
            .flex()
            .flex_row()
            .font_family(font_family)
            .text_size(body_size)
            .text_color(colors.text.primary)
            .bg(colors.background.primary)
            .child(self.render_sidebar(cx))
            .child(
                div()
                    .flex_1()
                    .h_full()
                    .flex()
                    .flex_col()
                    .overflow_hidden()
                    .child(self.render_toolbar(cx))
                    .child(div().flex_1().overflow_hidden().children(preview))
                    .children(self.render_knob_panel(cx)),
            )
    }
}

#[cfg(all(test, feature = "test-support"))]
mod tests {
    use super::*;
    use gpui::{Focusable, TestAppContext, VisualTestContext};

    use crate::stories::catalog;

    fn open_browser(cx: &mut TestAppContext) -> (gpui::Entity<StoryBrowser>, VisualTestContext) {
        let window = cx.update(|cx| {
            crate::init(cx);
            cx.open_window(Default::default(), |_window, cx| {
                cx.new(|cx| StoryBrowser::new(catalog(), cx))
            })
            .unwrap()
        });

        let browser = window.root(cx).unwrap();
        let mut cx = VisualTestContext::from_window(window.into(), cx);
        cx.run_until_parked();

        (browser, cx)
    }

    #[gpui::test]
    fn test_browser_selects_first_story(cx: &mut TestAppContext) {
        let (browser, cx) = open_browser(cx);

        browser.read_with(&cx, |browser, _| {
            assert_eq!(browser.selected(), Some(&StoryId::new("Button", "themes")));
            assert_eq!(browser.registry().len(), 4);
        });
    }

    #[gpui::test]
    fn test_select_story(cx: &mut TestAppContext) {
        let (browser, mut cx) = open_browser(cx);

        browser.update(&mut cx, |browser, _| {
            assert!(browser.select_story("SiteHeader/with text"));
            assert!(!browser.select_story("SiteHeader/missing"));
            assert!(!browser.select_story("not an id"));
            assert_eq!(
                browser.selected(),
                Some(&StoryId::new("SiteHeader", "with text"))
            );
        });
    }

    #[gpui::test]
    fn test_knobs_register_on_render_and_persist(cx: &mut TestAppContext) {
        let (browser, mut cx) = open_browser(cx);

        browser.update(&mut cx, |browser, cx| {
            assert!(browser.select_story("ProfileCard/with text"));
            cx.notify();
        });
        cx.run_until_parked();

        browser.update(&mut cx, |browser, cx| {
            let labels: Vec<String> = browser
                .knobs()
                .unwrap()
                .iter()
                .map(|(label, _)| label.to_string())
                .collect();
            assert_eq!(labels, ["ImageUrl", "Name", "Description"]);

            browser.set_knob_text("Name", "Sally").unwrap();
            cx.notify();
        });
        cx.run_until_parked();

        browser.read_with(&cx, |browser, _| {
            let name = browser.knobs().unwrap().get("Name").unwrap();
            assert_eq!(name.current().as_ref(), "Sally");
        });
    }

    #[gpui::test]
    fn test_select_knob_rejects_unknown_theme(cx: &mut TestAppContext) {
        let (browser, mut cx) = open_browser(cx);

        browser.update(&mut cx, |browser, cx| {
            assert!(browser.select_story("Button/with knobs"));
            cx.notify();
        });
        cx.run_until_parked();

        browser.update(&mut cx, |browser, _| {
            assert!(browser.set_knob_selected("Theme", "outline").is_ok());
            assert!(matches!(
                browser.set_knob_selected("Theme", "primary"),
                Err(KnobError::UnknownOption { .. })
            ));

            browser.reset_knobs();
            let theme = browser.knobs().unwrap().get("Theme").unwrap();
            assert_eq!(theme.current().as_ref(), "default");
        });
    }

    #[gpui::test]
    fn test_knob_edits_before_render_fail(cx: &mut TestAppContext) {
        let (browser, mut cx) = open_browser(cx);

        browser.update(&mut cx, |browser, _| {
            assert!(browser.select_story("SiteHeader/with text"));
            assert_eq!(
                browser.set_knob_text("Title", "Hi"),
                Err(KnobError::Missing("Title".into()))
            );
        });
    }

    #[gpui::test]
    fn test_typing_into_text_knob_updates_story(cx: &mut TestAppContext) {
        let (browser, mut cx) = open_browser(cx);

        browser.update(&mut cx, |browser, cx| {
            assert!(browser.select_story("SiteHeader/with text"));
            cx.notify();
        });
        cx.run_until_parked();

        let field = browser
            .read_with(&cx, |browser, _| browser.text_field("Title"))
            .expect("text knobs should get a field");
        cx.update(|window, cx| {
            let focus_handle = field.read(cx).focus_handle(cx);
            focus_handle.focus(window, cx);
        });
        cx.run_until_parked();

        cx.simulate_input("!");
        cx.run_until_parked();
        browser.read_with(&cx, |browser, _| {
            let title = browser.knobs().unwrap().get("Title").unwrap();
            assert_eq!(title.current().as_ref(), "Hello SiteHeader!");
        });

        cx.simulate_keystrokes("backspace backspace");
        cx.run_until_parked();
        browser.read_with(&cx, |browser, _| {
            let title = browser.knobs().unwrap().get("Title").unwrap();
            assert_eq!(title.current().as_ref(), "Hello SiteHeade");
        });

        browser.update(&mut cx, |browser, cx| {
            browser.reset_knob("Title").unwrap();
            cx.notify();
        });
        cx.run_until_parked();
        field.read_with(&cx, |field, _| {
            assert_eq!(field.value().as_ref(), "Hello SiteHeader");
        });
    }

    #[gpui::test]
    fn test_text_fields_are_kept_per_story(cx: &mut TestAppContext) {
        let (browser, mut cx) = open_browser(cx);

        browser.update(&mut cx, |browser, cx| {
            assert!(browser.select_story("ProfileCard/with text"));
            cx.notify();
        });
        cx.run_until_parked();

        browser.update(&mut cx, |browser, cx| {
            assert!(browser.text_field("Name").is_some());
            assert!(browser.text_field("Description").is_some());
            assert!(browser.text_field("ImageUrl").is_none(), "select knobs use chips");

            browser.set_knob_text("Name", "Sally").unwrap();
            assert!(browser.select_story("SiteHeader/with text"));
            cx.notify();
        });
        cx.run_until_parked();

        browser.update(&mut cx, |browser, cx| {
            assert!(browser.text_field("Name").is_none());
            assert!(browser.select_story("ProfileCard/with text"));
            cx.notify();
        });
        cx.run_until_parked();

        let field = browser.read_with(&cx, |browser, _| browser.text_field("Name").unwrap());
        field.read_with(&cx, |field, _| assert_eq!(field.value().as_ref(), "Sally"));
    }
}
