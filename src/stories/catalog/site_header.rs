use gpui::{IntoElement, ParentElement};

use crate::{
    components::SiteHeader,
    stories::{StoryRegistry, story_container},
};

pub(super) fn register(registry: &mut StoryRegistry) {
    registry
        .stories_of("SiteHeader")
        .with_knobs()
        .add("with text", |knobs, _window, cx| {
            let header = SiteHeader::new("site-header").title(knobs.text("Title", "Hello SiteHeader"));

            story_container(cx).child(header).into_any_element()
        });
}
