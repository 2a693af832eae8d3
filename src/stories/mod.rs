//! Stories render components with sample data for isolated visual inspection.
//!
//! - [`StoryRegistry`] collects named stories into groups.
//! - [`Knobs`] let a story expose sample values that can be changed while
//!   viewing it.
//! - [`StoryBrowser`] is the view that lists and previews registered stories.
//! - [`catalog`] returns the stories for every component in this crate.

mod browser;
pub use browser::*;

mod catalog;
pub use catalog::catalog;

mod knobs;
pub use knobs::*;

mod layout;
pub use layout::*;

mod registry;
pub use registry::*;

use gpui::{App, SharedString, Window};
use tracing::info;

/// A click handler that logs `name` under the `storybook::action` target.
pub fn action(name: impl Into<SharedString>) -> impl Fn(&mut Window, &mut App) + 'static {
    let name = name.into();

    move |_window, _cx| info!(target: "storybook::action", action = %name)
}
