//! Storybook, a standalone viewer for the components in `gpui_mosaic`.
//!
//! ```bash
//! cargo run --bin storybook
//! cargo run --bin storybook -- --story "ProfileCard/with text" --dark
//! cargo run --bin storybook -- --theme path/to/theme.json
//! cargo run --bin storybook -- --list
//! ```

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Parser;
use gpui::{
    App, AppContext, Application, Bounds, TitlebarOptions, WindowBounds, WindowOptions, px, size,
};
use gpui_mosaic::{
    stories::{StoryBrowser, catalog},
    theme::{Theme, ThemeExt, ThemeVariantKind},
};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Component preview tool for gpui_mosaic")]
struct Args {
    /// Story to open first, as "Group/story" (e.g. "Button/themes")
    #[arg(long, short)]
    story: Option<String>,
    /// Theme JSON file to use instead of the bundled theme
    #[arg(long)]
    theme: Option<PathBuf>,
    /// Start with the dark variant of the theme
    #[arg(long)]
    dark: bool,
    /// Print every story id and exit
    #[arg(long)]
    list: bool,
}

/// Filter used when `RUST_LOG` is unset or invalid.
fn default_filter() -> EnvFilter {
    EnvFilter::new("info")
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter()))
        .init();

    if args.list {
        for id in catalog().ids() {
            println!("{id}");
        }
        return Ok(());
    }

    let theme = match &args.theme {
        Some(path) => Theme::load(path)
            .with_context(|| format!("failed to load theme from {}", path.display()))?,
        None => Theme::bundled().clone(),
    };
    info!(theme = %theme.name, "starting storybook");

    Application::new()
        .with_quit_mode(gpui::QuitMode::LastWindowClosed)
        .run(move |cx: &mut App| {
            cx.set_theme(&theme);
            gpui_mosaic::init(cx);

            if args.dark {
                match cx.get_theme().variants.position(ThemeVariantKind::Dark) {
                    Some(index) => cx.set_active_variant(index),
                    None => warn!(theme = %theme.name, "theme has no dark variant"),
                }
            }

            let bounds = Bounds::centered(None, size(px(1200.), px(800.)), cx);
            let initial_story = args.story.clone();

            let opened = cx.open_window(
                WindowOptions {
                    window_bounds: Some(WindowBounds::Windowed(bounds)),
                    titlebar: Some(TitlebarOptions {
                        title: Some("Mosaic Storybook".into()),
                        ..Default::default()
                    }),
                    window_min_size: Some(size(px(800.), px(600.))),
                    ..Default::default()
                },
                |window, cx| {
                    gpui_mosaic::init_for_window(window, cx);

                    cx.new(|cx| {
                        let mut browser = StoryBrowser::new(catalog(), cx);

                        if let Some(story) = &initial_story {
                            browser.select_story(story);
                        }

                        browser
                    })
                },
            );

            if let Err(error) = opened {
                error!(%error, "failed to open the storybook window");
                cx.quit();
                return;
            }

            cx.activate(true);
        });

    Ok(())
}

#[cfg(test)]
mod tests {
    use tracing::level_filters::LevelFilter;

    use super::*;

    #[test]
    fn test_default_filter_is_info() {
        assert_eq!(default_filter().max_level_hint(), Some(LevelFilter::INFO));
    }

    #[test]
    fn test_explicit_directives_are_not_capped_at_info() {
        let filter = EnvFilter::try_new("debug").unwrap();
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));

        let filter = EnvFilter::try_new("warn").unwrap();
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::WARN));
    }
}
