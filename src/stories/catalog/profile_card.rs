use gpui::{IntoElement, ParentElement};

use crate::{
    components::ProfileCard,
    stories::{StoryRegistry, story_container},
};

const DEFAULT_DESCRIPTION: &str = "
Vivamus sagittis lacus vel augue laoreet rutrum faucibus dolor auctor. Cum
sociis natoque penatibus et magnis dis parturient montes, nascetur ridiculus
mus. Vivamus sagittis lacus vel augue laoreet rutrum faucibus dolor auctor.
Donec ullamcorper nulla non metus auctor fringilla. Sed posuere consectetur
est at lobortis. Cum sociis natoque penatibus et magnis dis parturient montes,
nascetur ridiculus mus. Cras justo odio, dapibus ac facilisis in, egestas eget
quam.
";

const CATS: [&str; 5] = [
    "https://placekitten.com/g/200/300",
    "https://placekitten.com/g/300/300",
    "https://placekitten.com/g/300/400",
    "https://placekitten.com/g/400/400",
    "https://placekitten.com/g/400/500",
];

pub(super) fn register(registry: &mut StoryRegistry) {
    registry
        .stories_of("ProfileCard")
        .with_knobs()
        .add("with text", |knobs, _window, cx| {
            let card = ProfileCard::new("profile-card")
                .image_url(knobs.select("ImageUrl", CATS, CATS[0]))
                .name(knobs.text("Name", "Billy Boy"))
                .description(knobs.text("Description", DEFAULT_DESCRIPTION));

            story_container(cx).child(card).into_any_element()
        });
}
