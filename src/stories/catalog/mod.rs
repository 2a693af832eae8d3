mod button;
mod profile_card;
mod site_header;

use super::StoryRegistry;

/// Every story shipped with the components.
pub fn catalog() -> StoryRegistry {
    let mut registry = StoryRegistry::new();

    button::register(&mut registry);
    profile_card::register(&mut registry);
    site_header::register(&mut registry);

    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_contents() {
        let ids: Vec<String> = catalog().ids().iter().map(ToString::to_string).collect();

        assert_eq!(
            ids,
            [
                "Button/themes",
                "Button/with knobs",
                "ProfileCard/with text",
                "SiteHeader/with text",
            ]
        );
    }

    #[test]
    fn test_catalog_groups_use_knobs() {
        let registry = catalog();

        for group in ["Button", "ProfileCard", "SiteHeader"] {
            assert!(registry.group(group).unwrap().knobs_enabled(), "{group} should use knobs");
        }
    }
}
