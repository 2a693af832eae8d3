use std::time::Duration;

use gpui::{App, ElementId, Window, ease_out_quint};
use gpui_transitions::{Transition, TransitionGoal};

use crate::ElementIdExt;

/// Returns the keyed transition for `id`, retargeted at `goal`.
///
/// The owning view is notified when the goal changes so the transition starts
/// animating on the next frame.
pub fn keyed_transition<T>(
    id: impl Into<ElementId>,
    window: &mut Window,
    cx: &mut App,
    duration: Duration,
    goal: T,
) -> Transition<T>
where
    T: TransitionGoal + Clone + PartialEq + 'static,
{
    let initial_goal = goal.clone();
    let transition = Transition::new(id, window, cx, duration, move |_window, _cx| {
        initial_goal.clone()
    })
    .with_easing(ease_out_quint());

    if transition.set(cx, goal) {
        cx.notify(transition.entity_id());
    }

    transition
}

pub fn disabled_transition(
    base_id: impl Into<ElementId>,
    window: &mut Window,
    cx: &mut App,
    is_disabled: bool,
) -> Transition<f32> {
    keyed_transition(
        base_id.into().with_suffix("state:transition:disabled"),
        window,
        cx,
        Duration::from_millis(365),
        if is_disabled { 0.45 } else { 1. },
    )
}
