use std::{fmt, str::FromStr, time::Duration};

use enum_assoc::Assoc;
use gpui::{
    App, CursorStyle, ElementId, FontWeight, InteractiveElement, IntoElement, ParentElement,
    RenderOnce, Rgba, SharedString, StatefulInteractiveElement, Styled, Window, div,
    prelude::FluentBuilder, px,
};
use gpui_squircle::{SquircleStyled, squircle};
use gpui_transitions::TransitionExt;

use crate::{
    theme::ThemeExt,
    utils::{ElementIdExt, RgbaExt, disabled_transition, keyed_transition},
};

type ClickHandler = Box<dyn Fn(&mut Window, &mut App) + 'static>;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ButtonThemeError {
    #[error("unsupported theme \"{0}\", expected one of \"default\", \"outline\" or \"clear\"")]
    Unsupported(String),
}

/// The visual style of a [`Button`].
#[derive(Assoc, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[func(pub fn class_name(&self) -> &'static str)]
#[func(pub fn key(&self) -> &'static str)]
pub enum ButtonTheme {
    /// Filled with the accent color.
    #[default]
    #[assoc(class_name = "button")]
    #[assoc(key = "default")]
    Default,
    /// Accent colored border and text on a transparent background.
    #[assoc(class_name = "button-outline")]
    #[assoc(key = "outline")]
    Outline,
    /// Accent colored text only.
    #[assoc(class_name = "clear")]
    #[assoc(key = "clear")]
    Clear,
}

impl ButtonTheme {
    pub const ALL: [ButtonTheme; 3] = [ButtonTheme::Default, ButtonTheme::Outline, ButtonTheme::Clear];

    pub fn style(&self, cx: &App) -> ButtonStyle {
        const HOVER_STRENGTH: f32 = 0.2;
        const GHOST_HOVER_ALPHA: f32 = 0.08;

        let colors = &cx.active_variant().colors;
        let accent = colors.accent.primary;
        let transparent = accent.alpha(0.);

        match self {
            ButtonTheme::Default => ButtonStyle {
                bg_color: accent,
                bg_hover_color: accent.mix(&colors.text.primary, HOVER_STRENGTH),
                border_color: accent,
                text_color: colors.text.on_accent,
            },

            ButtonTheme::Outline => ButtonStyle {
                bg_color: transparent,
                bg_hover_color: accent.alpha(GHOST_HOVER_ALPHA),
                border_color: accent,
                text_color: accent,
            },

            ButtonTheme::Clear => ButtonStyle {
                bg_color: transparent,
                bg_hover_color: accent.alpha(GHOST_HOVER_ALPHA),
                border_color: transparent,
                text_color: accent,
            },
        }
    }
}

impl FromStr for ButtonTheme {
    type Err = ButtonThemeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        ButtonTheme::ALL
            .into_iter()
            .find(|theme| theme.key() == value)
            .ok_or_else(|| ButtonThemeError::Unsupported(value.to_string()))
    }
}

impl TryFrom<&str> for ButtonTheme {
    type Error = ButtonThemeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for ButtonTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Colors a [`ButtonTheme`] resolves to under the active theme variant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ButtonStyle {
    pub bg_color: Rgba,
    pub bg_hover_color: Rgba,
    pub border_color: Rgba,
    pub text_color: Rgba,
}

/// A clickable button.
///
/// Defaults: theme [`ButtonTheme::Default`], empty text, and no click handler,
/// in which case clicking does nothing.
#[derive(IntoElement)]
pub struct Button {
    id: ElementId,
    text: SharedString,
    theme: ButtonTheme,
    disabled: bool,
    on_click: Option<ClickHandler>,
}

impl Button {
    pub fn new(id: impl Into<ElementId>) -> Self {
        Self {
            id: id.into(),
            text: SharedString::default(),
            theme: ButtonTheme::default(),
            disabled: false,
            on_click: None,
        }
    }

    pub fn text(mut self, text: impl Into<SharedString>) -> Self {
        self.text = text.into();
        self
    }

    pub fn theme(mut self, theme: ButtonTheme) -> Self {
        self.theme = theme;
        self
    }

    /// Sets the theme from its name, failing on anything but
    /// `"default"`, `"outline"` or `"clear"`.
    pub fn try_theme(self, theme: impl AsRef<str>) -> Result<Self, ButtonThemeError> {
        Ok(self.theme(theme.as_ref().parse()?))
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn on_click(mut self, on_click: impl Fn(&mut Window, &mut App) + 'static) -> Self {
        self.on_click = Some(Box::new(on_click));
        self
    }

    /// Runs the click handler as if the button had been clicked.
    pub fn click(&self, window: &mut Window, cx: &mut App) {
        if !self.disabled {
            Self::handle_on_click(window, cx, self.on_click.as_ref());
        }
    }

    fn handle_on_click(window: &mut Window, cx: &mut App, on_click: Option<&ClickHandler>) {
        if let Some(on_click) = on_click {
            (on_click)(window, cx)
        }
    }
}

impl RenderOnce for Button {
    fn render(self, window: &mut Window, cx: &mut App) -> impl IntoElement {
        let style = self.theme.style(cx);
        let theme = cx.get_theme();
        let font = &theme.layout.text.default_font;
        let font_family = font.primary_family();
        let text_size = font.sizes.body;
        let font_weight = FontWeight(font.weights.button);
        let height = theme.layout.size.lg;
        let horizontal_padding = theme.layout.padding.xl;
        let corner_radius = theme.layout.corner_radii.md;

        let is_disabled = self.disabled;

        let is_hover_state =
            window.use_keyed_state(self.id.with_suffix("state:hover"), cx, |_window, _cx| false);
        let is_hover = *is_hover_state.read(cx) && !is_disabled;

        let bg_color_transition = keyed_transition(
            self.id.with_suffix("state:transition:bg_color"),
            window,
            cx,
            Duration::from_millis(250),
            if is_hover {
                style.bg_hover_color
            } else {
                style.bg_color
            },
        );
        let disabled_transition = disabled_transition(self.id.clone(), window, cx, is_disabled);

        div()
            .id(self.id.clone())
            .cursor(if is_disabled {
                CursorStyle::OperationNotAllowed
            } else {
                CursorStyle::PointingHand
            })
            .h(height)
            .px(horizontal_padding)
            .flex()
            .items_center()
            .justify_center()
            .font_family(font_family)
            .text_size(text_size)
            .font_weight(font_weight)
            .text_color(style.text_color)
            .child(
                squircle()
                    .absolute_expand()
                    .rounded(corner_radius)
                    .border(px(1.))
                    .border_inside()
                    .border_color(style.border_color)
                    .with_transitions(bg_color_transition, |_cx, this, bg_color| {
                        this.bg(bg_color)
                    }),
            )
            .child(div().child(self.text))
            .when(!is_disabled, |this| {
                let on_click = self.on_click;

                this.on_hover(move |hover, _window, cx| {
                    is_hover_state.update(cx, |this, _cx| *this = *hover);
                    cx.notify(is_hover_state.entity_id());
                })
                .on_click(move |_event, window, cx| {
                    Self::handle_on_click(window, cx, on_click.as_ref());
                })
            })
            .with_transitions(disabled_transition, |_cx, this, opacity| this.opacity(opacity))
    }
}
