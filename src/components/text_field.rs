//! A single line text field.
//!
//! [`TextFieldState`] owns the text and selection and receives platform text
//! input. [`TextField`] renders it. Every user edit emits
//! [`TextFieldEvent::Changed`].

use std::ops::Range;

use gpui::{
    App, Bounds, Context, CursorStyle, Element, ElementId, ElementInputHandler, Entity,
    EntityInputHandler, EventEmitter, FocusHandle, Focusable, GlobalElementId, Hsla,
    InspectorElementId, InteractiveElement, IntoElement, KeyBinding, LayoutId, MouseButton,
    MouseDownEvent, PaintQuad, ParentElement, Pixels, Point, RenderOnce, ShapedLine, SharedString,
    Style, Styled, TextAlign, TextRun, UTF16Selection, UnderlineStyle, Window, actions, div, fill,
    point, px, relative, size,
};
use gpui_squircle::{SquircleStyled, squircle};
use tracing::warn;
use unicode_segmentation::UnicodeSegmentation;

use crate::{
    theme::{ThemeExt, ThemeLayerKind, ThemeTextSizeKind},
    utils::RgbaExt,
};

const KEY_CONTEXT: &str = "TextField";

actions!(
    text_field,
    [
        Backspace,
        Delete,
        Left,
        Right,
        SelectLeft,
        SelectRight,
        SelectAll,
        Home,
        End,
    ]
);

pub(crate) fn bind_text_field_keys(cx: &mut App) {
    let context = Some(KEY_CONTEXT);

    cx.bind_keys([
        KeyBinding::new("backspace", Backspace, context),
        KeyBinding::new("delete", Delete, context),
        KeyBinding::new("left", Left, context),
        KeyBinding::new("right", Right, context),
        KeyBinding::new("shift-left", SelectLeft, context),
        KeyBinding::new("shift-right", SelectRight, context),
        KeyBinding::new("cmd-a", SelectAll, context),
        KeyBinding::new("home", Home, context),
        KeyBinding::new("end", End, context),
    ]);
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TextFieldEvent {
    Changed(SharedString),
}

pub struct TextFieldState {
    focus_handle: FocusHandle,
    value: SharedString,
    selected_range: Range<usize>,
    selection_reversed: bool,
    marked_range: Option<Range<usize>>,
    last_layout: Option<ShapedLine>,
    last_bounds: Option<Bounds<Pixels>>,
}

impl EventEmitter<TextFieldEvent> for TextFieldState {}

impl TextFieldState {
    /// Creates the state with the cursor after `value`.
    pub fn new(value: impl Into<SharedString>, cx: &mut Context<Self>) -> Self {
        let value = value.into();
        let end = value.len();

        Self {
            focus_handle: cx.focus_handle().tab_stop(true),
            value,
            selected_range: end..end,
            selection_reversed: false,
            marked_range: None,
            last_layout: None,
            last_bounds: None,
        }
    }

    pub fn value(&self) -> &SharedString {
        &self.value
    }

    pub fn selected_range(&self) -> Range<usize> {
        self.selected_range.clone()
    }

    /// Replaces the whole text without emitting [`TextFieldEvent::Changed`].
    pub fn set_value(&mut self, value: impl Into<SharedString>, cx: &mut Context<Self>) {
        let value = value.into();
        if value == self.value {
            return;
        }

        let end = value.len();
        self.value = value;
        self.selected_range = end..end;
        self.selection_reversed = false;
        self.marked_range = None;
        cx.notify();
    }

    fn backspace(&mut self, _: &Backspace, _window: &mut Window, cx: &mut Context<Self>) {
        if self.selected_range.is_empty() {
            self.select_to(self.previous_boundary(self.cursor_offset()), cx);
        }
        self.replace(self.selected_range.clone(), "", cx);
    }

    fn delete(&mut self, _: &Delete, _window: &mut Window, cx: &mut Context<Self>) {
        if self.selected_range.is_empty() {
            self.select_to(self.next_boundary(self.cursor_offset()), cx);
        }
        self.replace(self.selected_range.clone(), "", cx);
    }

    fn left(&mut self, _: &Left, _window: &mut Window, cx: &mut Context<Self>) {
        if self.selected_range.is_empty() {
            self.move_to(self.previous_boundary(self.cursor_offset()), cx);
        } else {
            self.move_to(self.selected_range.start, cx);
        }
    }

    fn right(&mut self, _: &Right, _window: &mut Window, cx: &mut Context<Self>) {
        if self.selected_range.is_empty() {
            self.move_to(self.next_boundary(self.cursor_offset()), cx);
        } else {
            self.move_to(self.selected_range.end, cx);
        }
    }

    fn select_left(&mut self, _: &SelectLeft, _window: &mut Window, cx: &mut Context<Self>) {
        self.select_to(self.previous_boundary(self.cursor_offset()), cx);
    }

    fn select_right(&mut self, _: &SelectRight, _window: &mut Window, cx: &mut Context<Self>) {
        self.select_to(self.next_boundary(self.cursor_offset()), cx);
    }

    fn select_all(&mut self, _: &SelectAll, _window: &mut Window, cx: &mut Context<Self>) {
        self.move_to(0, cx);
        self.select_to(self.value.len(), cx);
    }

    fn home(&mut self, _: &Home, _window: &mut Window, cx: &mut Context<Self>) {
        self.move_to(0, cx);
    }

    fn end(&mut self, _: &End, _window: &mut Window, cx: &mut Context<Self>) {
        self.move_to(self.value.len(), cx);
    }

    fn on_mouse_down(
        &mut self,
        event: &MouseDownEvent,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        self.focus_handle.focus(window, cx);

        if event.modifiers.shift {
            self.select_to(self.index_for_position(event.position), cx);
        } else {
            self.move_to(self.index_for_position(event.position), cx);
        }
    }

    fn replace(&mut self, range: Range<usize>, new_text: &str, cx: &mut Context<Self>) {
        if range.is_empty() && new_text.is_empty() {
            return;
        }

        let mut value = String::with_capacity(self.value.len() + new_text.len());
        value.push_str(&self.value[..range.start]);
        value.push_str(new_text);
        value.push_str(&self.value[range.end..]);

        let cursor = range.start + new_text.len();
        self.value = value.into();
        self.selected_range = cursor..cursor;
        self.selection_reversed = false;
        self.marked_range = None;

        cx.emit(TextFieldEvent::Changed(self.value.clone()));
        cx.notify();
    }

    fn move_to(&mut self, offset: usize, cx: &mut Context<Self>) {
        self.selected_range = offset..offset;
        self.selection_reversed = false;
        cx.notify();
    }

    fn select_to(&mut self, offset: usize, cx: &mut Context<Self>) {
        if self.selection_reversed {
            self.selected_range.start = offset;
        } else {
            self.selected_range.end = offset;
        }

        if self.selected_range.end < self.selected_range.start {
            self.selection_reversed = !self.selection_reversed;
            self.selected_range = self.selected_range.end..self.selected_range.start;
        }

        cx.notify();
    }

    fn cursor_offset(&self) -> usize {
        if self.selection_reversed {
            self.selected_range.start
        } else {
            self.selected_range.end
        }
    }

    fn index_for_position(&self, position: Point<Pixels>) -> usize {
        let (Some(bounds), Some(line)) = (self.last_bounds.as_ref(), self.last_layout.as_ref())
        else {
            return self.value.len();
        };

        if self.value.is_empty() || position.x < bounds.left() {
            return 0;
        }
        if position.x > bounds.right() {
            return self.value.len();
        }

        line.closest_index_for_x(position.x - bounds.left())
    }

    fn previous_boundary(&self, offset: usize) -> usize {
        self.value
            .grapheme_indices(true)
            .rev()
            .find_map(|(index, _)| (index < offset).then_some(index))
            .unwrap_or(0)
    }

    fn next_boundary(&self, offset: usize) -> usize {
        self.value
            .grapheme_indices(true)
            .find_map(|(index, _)| (index > offset).then_some(index))
            .unwrap_or(self.value.len())
    }

    fn offset_from_utf16(&self, offset: usize) -> usize {
        let mut utf8_offset = 0;
        let mut utf16_count = 0;

        for ch in self.value.chars() {
            if utf16_count >= offset {
                break;
            }
            utf16_count += ch.len_utf16();
            utf8_offset += ch.len_utf8();
        }

        utf8_offset
    }

    fn offset_to_utf16(&self, offset: usize) -> usize {
        let mut utf16_offset = 0;
        let mut utf8_count = 0;

        for ch in self.value.chars() {
            if utf8_count >= offset {
                break;
            }
            utf8_count += ch.len_utf8();
            utf16_offset += ch.len_utf16();
        }

        utf16_offset
    }

    fn range_to_utf16(&self, range: &Range<usize>) -> Range<usize> {
        self.offset_to_utf16(range.start)..self.offset_to_utf16(range.end)
    }

    fn range_from_utf16(&self, range: &Range<usize>) -> Range<usize> {
        self.offset_from_utf16(range.start)..self.offset_from_utf16(range.end)
    }

    fn target_range(&self, range_utf16: Option<Range<usize>>) -> Range<usize> {
        range_utf16
            .map(|range| self.range_from_utf16(&range))
            .or(self.marked_range.clone())
            .unwrap_or(self.selected_range.clone())
    }
}

impl EntityInputHandler for TextFieldState {
    fn text_for_range(
        &mut self,
        range_utf16: Range<usize>,
        actual_range: &mut Option<Range<usize>>,
        _window: &mut Window,
        _cx: &mut Context<Self>,
    ) -> Option<String> {
        let range = self.range_from_utf16(&range_utf16);
        actual_range.replace(self.range_to_utf16(&range));
        Some(self.value[range].to_string())
    }

    fn selected_text_range(
        &mut self,
        _ignore_disabled_input: bool,
        _window: &mut Window,
        _cx: &mut Context<Self>,
    ) -> Option<UTF16Selection> {
        Some(UTF16Selection {
            range: self.range_to_utf16(&self.selected_range),
            reversed: self.selection_reversed,
        })
    }

    fn marked_text_range(
        &self,
        _window: &mut Window,
        _cx: &mut Context<Self>,
    ) -> Option<Range<usize>> {
        self.marked_range
            .as_ref()
            .map(|range| self.range_to_utf16(range))
    }

    fn unmark_text(&mut self, _window: &mut Window, _cx: &mut Context<Self>) {
        self.marked_range = None;
    }

    fn replace_text_in_range(
        &mut self,
        range_utf16: Option<Range<usize>>,
        new_text: &str,
        _window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        let range = self.target_range(range_utf16);
        self.replace(range, new_text, cx);
    }

    fn replace_and_mark_text_in_range(
        &mut self,
        range_utf16: Option<Range<usize>>,
        new_text: &str,
        new_selected_range_utf16: Option<Range<usize>>,
        _window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        let range = self.target_range(range_utf16);
        self.replace(range.clone(), new_text, cx);

        if !new_text.is_empty() {
            self.marked_range = Some(range.start..range.start + new_text.len());
        }

        if let Some(selected) = new_selected_range_utf16 {
            let selected = self.range_from_utf16(&selected);
            self.selected_range = range.start + selected.start..range.start + selected.end;
        }
    }

    fn bounds_for_range(
        &mut self,
        range_utf16: Range<usize>,
        bounds: Bounds<Pixels>,
        _window: &mut Window,
        _cx: &mut Context<Self>,
    ) -> Option<Bounds<Pixels>> {
        let last_layout = self.last_layout.as_ref()?;
        let range = self.range_from_utf16(&range_utf16);

        Some(Bounds::from_corners(
            point(bounds.left() + last_layout.x_for_index(range.start), bounds.top()),
            point(bounds.left() + last_layout.x_for_index(range.end), bounds.bottom()),
        ))
    }

    fn character_index_for_point(
        &mut self,
        point: Point<Pixels>,
        _window: &mut Window,
        _cx: &mut Context<Self>,
    ) -> Option<usize> {
        if self.value.is_empty() {
            return Some(0);
        }

        let bounds = self.last_bounds?;
        let last_layout = self.last_layout.as_ref()?;
        let index = last_layout.index_for_x(point.x - bounds.left())?;

        Some(self.offset_to_utf16(index))
    }
}

impl Focusable for TextFieldState {
    fn focus_handle(&self, _cx: &App) -> FocusHandle {
        self.focus_handle.clone()
    }
}

/// A themed single line input bound to a [`TextFieldState`].
#[derive(IntoElement)]
pub struct TextField {
    id: ElementId,
    state: Entity<TextFieldState>,
    placeholder: SharedString,
    layer: ThemeLayerKind,
}

impl TextField {
    pub fn new(id: impl Into<ElementId>, state: Entity<TextFieldState>) -> Self {
        Self {
            id: id.into(),
            state,
            placeholder: SharedString::default(),
            layer: ThemeLayerKind::Tertiary,
        }
    }

    /// Shown while the field is empty.
    pub fn placeholder(mut self, placeholder: impl Into<SharedString>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn layer(mut self, layer: ThemeLayerKind) -> Self {
        self.layer = layer;
        self
    }
}

impl RenderOnce for TextField {
    fn render(self, window: &mut Window, cx: &mut App) -> impl IntoElement {
        let colors = cx.active_variant().colors.clone();
        let layout = &cx.get_theme().layout;
        let height = layout.size.lg;
        let padding = layout.padding.md;
        let corner_radius = layout.corner_radii.md;

        let focus_handle = self.state.read(cx).focus_handle.clone();
        let is_focused = focus_handle.is_focused(window);
        let border_color = if is_focused {
            colors.accent.primary
        } else {
            self.layer.next().resolve(cx)
        };

        div()
            .id(self.id)
            .key_context(KEY_CONTEXT)
            .track_focus(&focus_handle)
            .relative()
            .flex()
            .items_center()
            .w_full()
            .h(height)
            .px(padding)
            .cursor(CursorStyle::IBeam)
            .text_size(ThemeTextSizeKind::Body.resolve(cx))
            .child(
                squircle()
                    .absolute_expand()
                    .rounded(corner_radius)
                    .bg(self.layer.resolve(cx))
                    .border(px(1.))
                    .border_inside()
                    .border_color(border_color),
            )
            .on_action(window.listener_for(&self.state, TextFieldState::backspace))
            .on_action(window.listener_for(&self.state, TextFieldState::delete))
            .on_action(window.listener_for(&self.state, TextFieldState::left))
            .on_action(window.listener_for(&self.state, TextFieldState::right))
            .on_action(window.listener_for(&self.state, TextFieldState::select_left))
            .on_action(window.listener_for(&self.state, TextFieldState::select_right))
            .on_action(window.listener_for(&self.state, TextFieldState::select_all))
            .on_action(window.listener_for(&self.state, TextFieldState::home))
            .on_action(window.listener_for(&self.state, TextFieldState::end))
            .on_mouse_down(
                MouseButton::Left,
                window.listener_for(&self.state, TextFieldState::on_mouse_down),
            )
            .child(TextLine {
                state: self.state,
                placeholder: self.placeholder,
                text_color: colors.text.primary.into(),
                placeholder_color: colors.text.primary.alpha(0.4).into(),
                selection_color: colors.accent.primary.alpha(0.3).into(),
                cursor_color: colors.accent.primary.into(),
                line_height: px(0.),
            })
    }
}

struct TextLine {
    state: Entity<TextFieldState>,
    placeholder: SharedString,
    text_color: Hsla,
    placeholder_color: Hsla,
    selection_color: Hsla,
    cursor_color: Hsla,
    line_height: Pixels,
}

struct TextLinePrepaint {
    line: Option<ShapedLine>,
    cursor: Option<PaintQuad>,
    selection: Option<PaintQuad>,
}

impl IntoElement for TextLine {
    type Element = Self;

    fn into_element(self) -> Self::Element {
        self
    }
}

impl Element for TextLine {
    type RequestLayoutState = ();
    type PrepaintState = TextLinePrepaint;

    fn id(&self) -> Option<ElementId> {
        None
    }

    fn source_location(&self) -> Option<&'static core::panic::Location<'static>> {
        None
    }

    fn request_layout(
        &mut self,
        _id: Option<&GlobalElementId>,
        _inspector_id: Option<&InspectorElementId>,
        window: &mut Window,
        cx: &mut App,
    ) -> (LayoutId, Self::RequestLayoutState) {
        self.line_height = window.line_height();

        let mut style = Style::default();
        style.size.width = relative(1.).into();
        style.size.height = self.line_height.into();

        (window.request_layout(style, [], cx), ())
    }

    fn prepaint(
        &mut self,
        _id: Option<&GlobalElementId>,
        _inspector_id: Option<&InspectorElementId>,
        bounds: Bounds<Pixels>,
        _request_layout: &mut Self::RequestLayoutState,
        window: &mut Window,
        cx: &mut App,
    ) -> Self::PrepaintState {
        let state = self.state.read(cx);
        let value = state.value.clone();
        let selected_range = state.selected_range.clone();
        let cursor = state.cursor_offset();
        let style = window.text_style();

        let (display_text, color) = if value.is_empty() {
            (self.placeholder.clone(), self.placeholder_color)
        } else {
            (value, self.text_color)
        };

        let run = TextRun {
            len: display_text.len(),
            font: style.font(),
            color,
            background_color: None,
            underline: None,
            strikethrough: None,
        };

        let runs = match state.marked_range.as_ref() {
            Some(marked) if !state.value.is_empty() => [
                TextRun {
                    len: marked.start,
                    ..run.clone()
                },
                TextRun {
                    len: marked.end - marked.start,
                    underline: Some(UnderlineStyle {
                        color: Some(run.color),
                        thickness: px(1.),
                        wavy: false,
                    }),
                    ..run.clone()
                },
                TextRun {
                    len: display_text.len() - marked.end,
                    ..run
                },
            ]
            .into_iter()
            .filter(|run| run.len > 0)
            .collect(),
            _ => vec![run],
        };

        let font_size = style.font_size.to_pixels(window.rem_size());
        let line = window
            .text_system()
            .shape_line(display_text, font_size, &runs, None);

        let (selection, cursor) = if selected_range.is_empty() {
            let cursor_x = if state.value.is_empty() {
                px(0.)
            } else {
                line.x_for_index(cursor)
            };

            (
                None,
                Some(fill(
                    Bounds::new(
                        point(bounds.left() + cursor_x, bounds.top()),
                        size(px(1.), bounds.size.height),
                    ),
                    self.cursor_color,
                )),
            )
        } else {
            (
                Some(fill(
                    Bounds::from_corners(
                        point(
                            bounds.left() + line.x_for_index(selected_range.start),
                            bounds.top(),
                        ),
                        point(
                            bounds.left() + line.x_for_index(selected_range.end),
                            bounds.bottom(),
                        ),
                    ),
                    self.selection_color,
                )),
                None,
            )
        };

        TextLinePrepaint {
            line: Some(line),
            cursor,
            selection,
        }
    }

    fn paint(
        &mut self,
        _id: Option<&GlobalElementId>,
        _inspector_id: Option<&InspectorElementId>,
        bounds: Bounds<Pixels>,
        _request_layout: &mut Self::RequestLayoutState,
        prepaint: &mut Self::PrepaintState,
        window: &mut Window,
        cx: &mut App,
    ) {
        let focus_handle = self.state.read(cx).focus_handle.clone();

        window.handle_input(
            &focus_handle,
            ElementInputHandler::new(bounds, self.state.clone()),
            cx,
        );

        if let Some(selection) = prepaint.selection.take() {
            window.paint_quad(selection);
        }

        let Some(line) = prepaint.line.take() else {
            return;
        };

        if let Err(error) = line.paint(
            bounds.origin,
            self.line_height,
            TextAlign::Left,
            None,
            window,
            cx,
        ) {
            warn!(%error, "failed to paint text field");
        }

        if focus_handle.is_focused(window)
            && let Some(cursor) = prepaint.cursor.take()
        {
            window.paint_quad(cursor);
        }

        self.state.update(cx, |state, _cx| {
            state.last_layout = Some(line);
            state.last_bounds = Some(bounds);
        });
    }
}

#[cfg(all(test, feature = "test-support"))]
mod tests {
    use super::*;
    use gpui::{AppContext, Render, Subscription, TestAppContext, VisualTestContext};

    struct FieldView {
        state: Entity<TextFieldState>,
        changes: Vec<SharedString>,
        _subscription: Subscription,
    }

    impl FieldView {
        fn new(value: &'static str, cx: &mut Context<Self>) -> Self {
            let state = cx.new(|cx| TextFieldState::new(value, cx));
            let subscription =
                cx.subscribe(&state, |this, _state, event: &TextFieldEvent, _cx| {
                    let TextFieldEvent::Changed(value) = event;
                    this.changes.push(value.clone());
                });

            Self {
                state,
                changes: Vec::new(),
                _subscription: subscription,
            }
        }
    }

    impl Render for FieldView {
        fn render(&mut self, _window: &mut Window, _cx: &mut Context<Self>) -> impl IntoElement {
            div()
                .size_full()
                .child(TextField::new("field", self.state.clone()).placeholder("Type here"))
        }
    }

    fn focused_field(
        value: &'static str,
        cx: &mut TestAppContext,
    ) -> (Entity<FieldView>, Entity<TextFieldState>, VisualTestContext) {
        let window = cx.update(|cx| {
            crate::init(cx);
            cx.open_window(Default::default(), |_window, cx| {
                cx.new(|cx| FieldView::new(value, cx))
            })
            .unwrap()
        });

        let view = window.root(cx).unwrap();
        let mut cx = VisualTestContext::from_window(window.into(), cx);
        let state = view.read_with(&cx, |view, _| view.state.clone());

        cx.update(|window, cx| {
            let focus_handle = state.read(cx).focus_handle(cx);
            focus_handle.focus(window, cx);
        });
        cx.run_until_parked();

        (view, state, cx)
    }

    #[gpui::test]
    fn test_typing_appends_at_cursor(cx: &mut TestAppContext) {
        let (view, state, mut cx) = focused_field("Billy", cx);

        cx.simulate_input(" Boy");
        cx.run_until_parked();

        state.read_with(&cx, |state, _| {
            assert_eq!(state.value().as_ref(), "Billy Boy");
            assert_eq!(state.selected_range(), 9..9);
        });
        view.read_with(&cx, |view, _| {
            assert_eq!(view.changes.last(), Some(&SharedString::from("Billy Boy")));
        });
    }

    #[gpui::test]
    fn test_editing_actions(cx: &mut TestAppContext) {
        let (_view, state, mut cx) = focused_field("Sally", cx);

        cx.simulate_keystrokes("backspace");
        cx.run_until_parked();
        state.read_with(&cx, |state, _| assert_eq!(state.value().as_ref(), "Sall"));

        cx.simulate_keystrokes("home delete");
        cx.run_until_parked();
        state.read_with(&cx, |state, _| {
            assert_eq!(state.value().as_ref(), "all");
            assert_eq!(state.selected_range(), 0..0);
        });

        cx.simulate_keystrokes("shift-right shift-right");
        cx.simulate_input("n");
        cx.run_until_parked();
        state.read_with(&cx, |state, _| assert_eq!(state.value().as_ref(), "nl"));
    }

    #[gpui::test]
    fn test_backspace_removes_whole_grapheme(cx: &mut TestAppContext) {
        let (_view, state, mut cx) = focused_field("cafe\u{301}", cx);

        cx.simulate_keystrokes("backspace");
        cx.run_until_parked();

        state.read_with(&cx, |state, _| assert_eq!(state.value().as_ref(), "caf"));
    }

    #[gpui::test]
    fn test_set_value_does_not_emit(cx: &mut TestAppContext) {
        let (view, state, mut cx) = focused_field("Go", cx);

        state.update(&mut cx, |state, cx| state.set_value("Stop", cx));
        cx.run_until_parked();

        state.read_with(&cx, |state, _| {
            assert_eq!(state.value().as_ref(), "Stop");
            assert_eq!(state.selected_range(), 4..4);
        });
        view.read_with(&cx, |view, _| assert!(view.changes.is_empty()));
    }
}
