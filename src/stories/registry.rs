//! Story registration.
//!
//! Stories are collected into a [`StoryRegistry`] group by group:
//!
//! ```ignore
//! registry
//!     .stories_of("ProfileCard")
//!     .with_knobs()
//!     .add("with text", |knobs, _window, _cx| {
//!         ProfileCard::new("profile-card")
//!             .name(knobs.text("Name", "Billy Boy"))
//!             .into_any_element()
//!     });
//! ```

use std::{fmt, rc::Rc, str::FromStr};

use gpui::{AnyElement, App, SharedString, Window};
use indexmap::IndexMap;
use tracing::{debug, warn};

use super::Knobs;

pub type StoryRender = Rc<dyn Fn(&mut Knobs, &mut Window, &mut App) -> AnyElement + 'static>;

/// Identifies a story as `"{group}/{story}"`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StoryId {
    pub group: SharedString,
    pub story: SharedString,
}

impl StoryId {
    pub fn new(group: impl Into<SharedString>, story: impl Into<SharedString>) -> Self {
        Self {
            group: group.into(),
            story: story.into(),
        }
    }
}

impl fmt::Display for StoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.group, self.story)
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("story ids look like \"Group/story name\", got \"{0}\"")]
pub struct StoryIdError(String);

impl FromStr for StoryId {
    type Err = StoryIdError;

    fn from_str(id: &str) -> Result<Self, Self::Err> {
        match id.split_once('/') {
            Some((group, story)) if !group.is_empty() && !story.is_empty() => {
                Ok(StoryId::new(group.to_string(), story.to_string()))
            }
            _ => Err(StoryIdError(id.to_string())),
        }
    }
}

pub struct Story {
    name: SharedString,
    render: StoryRender,
}

impl Story {
    pub fn name(&self) -> &SharedString {
        &self.name
    }

    pub fn render(&self) -> StoryRender {
        self.render.clone()
    }
}

pub struct StoryGroup {
    name: SharedString,
    knobs_enabled: bool,
    stories: IndexMap<SharedString, Story>,
}

impl StoryGroup {
    pub fn name(&self) -> &SharedString {
        &self.name
    }

    /// Whether stories in this group keep their knob values between renders.
    pub fn knobs_enabled(&self) -> bool {
        self.knobs_enabled
    }

    pub fn stories(&self) -> impl Iterator<Item = &Story> {
        self.stories.values()
    }

    pub fn story(&self, name: &str) -> Option<&Story> {
        self.stories.get(name)
    }
}

#[derive(Default)]
pub struct StoryRegistry {
    groups: IndexMap<SharedString, StoryGroup>,
}

impl StoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens (or creates) the group `name` for adding stories.
    pub fn stories_of(&mut self, name: impl Into<SharedString>) -> StoryGroupBuilder<'_> {
        let name = name.into();

        let group = self
            .groups
            .entry(name.clone())
            .or_insert_with(|| StoryGroup {
                name,
                knobs_enabled: false,
                stories: IndexMap::new(),
            });

        StoryGroupBuilder { group }
    }

    pub fn groups(&self) -> impl Iterator<Item = &StoryGroup> {
        self.groups.values()
    }

    pub fn group(&self, name: &str) -> Option<&StoryGroup> {
        self.groups.get(name)
    }

    pub fn find(&self, id: &StoryId) -> Option<(&StoryGroup, &Story)> {
        let group = self.groups.get(id.group.as_ref())?;
        let story = group.story(&id.story)?;
        Some((group, story))
    }

    /// Every story id, in registration order.
    pub fn ids(&self) -> Vec<StoryId> {
        self.groups
            .values()
            .flat_map(|group| {
                group
                    .stories
                    .keys()
                    .map(|story| StoryId::new(group.name.clone(), story.clone()))
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.groups.values().map(|group| group.stories.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub struct StoryGroupBuilder<'a> {
    group: &'a mut StoryGroup,
}

impl StoryGroupBuilder<'_> {
    /// Lets stories in this group keep knob values and shows the knob panel.
    pub fn with_knobs(self) -> Self {
        self.group.knobs_enabled = true;
        self
    }

    /// Adds a story; a story with the same name in this group is replaced.
    pub fn add(
        self,
        name: impl Into<SharedString>,
        render: impl Fn(&mut Knobs, &mut Window, &mut App) -> AnyElement + 'static,
    ) -> Self {
        let name = name.into();

        let story = Story {
            name: name.clone(),
            render: Rc::new(render),
        };

        if self.group.stories.insert(name.clone(), story).is_some() {
            warn!(group = %self.group.name, story = %name, "story registered twice, keeping the last one");
        } else {
            debug!(group = %self.group.name, story = %name, "registered story");
        }

        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gpui::{IntoElement, div};

    fn empty_story(_knobs: &mut Knobs, _window: &mut Window, _cx: &mut App) -> AnyElement {
        div().into_any_element()
    }

    fn registry() -> StoryRegistry {
        let mut registry = StoryRegistry::new();

        registry
            .stories_of("ProfileCard")
            .with_knobs()
            .add("with text", empty_story);
        registry
            .stories_of("Button")
            .add("themes", empty_story)
            .add("disabled", empty_story);

        registry
    }

    #[test]
    fn test_groups_and_stories_keep_insertion_order() {
        let ids: Vec<String> = registry().ids().iter().map(ToString::to_string).collect();

        assert_eq!(
            ids,
            ["ProfileCard/with text", "Button/themes", "Button/disabled"]
        );
    }

    #[test]
    fn test_knobs_flag_is_per_group() {
        let registry = registry();

        assert!(registry.group("ProfileCard").unwrap().knobs_enabled());
        assert!(!registry.group("Button").unwrap().knobs_enabled());
    }

    #[test]
    fn test_reopening_group_appends_and_replaces() {
        let mut registry = registry();

        registry
            .stories_of("Button")
            .add("themes", empty_story)
            .add("with knobs", empty_story);

        let names: Vec<&str> = registry
            .group("Button")
            .unwrap()
            .stories()
            .map(|story| story.name().as_ref())
            .collect();

        assert_eq!(names, ["themes", "disabled", "with knobs"]);
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn test_find_by_id() {
        let registry = registry();

        let id: StoryId = "ProfileCard/with text".parse().unwrap();
        let (group, story) = registry.find(&id).unwrap();
        assert_eq!(group.name().as_ref(), "ProfileCard");
        assert_eq!(story.name().as_ref(), "with text");

        assert!(registry.find(&StoryId::new("SiteHeader", "with text")).is_none());
    }

    #[test]
    fn test_story_id_parsing() {
        assert_eq!(
            "SiteHeader/with text".parse::<StoryId>(),
            Ok(StoryId::new("SiteHeader", "with text"))
        );

        for id in ["SiteHeader", "/with text", "SiteHeader/", ""] {
            assert!(id.parse::<StoryId>().is_err(), "{id:?} should not parse");
        }
    }
}
