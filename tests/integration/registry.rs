use anyhow::Result;
use navmenu::config::Settings;
use navmenu::core::{MenuError, user_friendly_error};
use navmenu::html::Attributes;
use navmenu::menu::{Registry, RenderOptions};
use navmenu::test_utils;
use serde_json::json;

/// Several parts of an application contribute to the same menus during one request
#[test]
fn test_menus_assembled_from_several_places() -> Result<()> {
    let settings = Settings::from_value(&json!({ "menus": { "footer": { "active_class": "here" } } }));
    let mut menus = Registry::new(settings, test_utils::context("imprint"));

    menus.make("main", |menu| {
        menu.add("Home", "/");
    });
    menus.make("footer", |menu| {
        menu.add("Imprint", "imprint");
    });
    // A plugin extends the main menu later on.
    menus.make("main", |menu| {
        menu.add("Plugins", "plugins");
    });

    let names: Vec<&str> = menus.all().map(|menu| menu.name()).collect();
    assert_eq!(names, ["main", "footer"]);
    assert_eq!(menus.get("main")?.len(), 2);

    let footer = menus.get("footer")?.as_ul(&Attributes::new(), RenderOptions::new())?;
    assert_eq!(footer, r#"<ul><li class="here"><a href="https://example.com/imprint">Imprint</a></li></ul>"#);
    Ok(())
}

#[test]
fn test_menus_can_be_changed_after_creation() -> Result<()> {
    let mut menus = Registry::new(Settings::default(), test_utils::context("/"));
    menus.make_with_options("sidebar", &json!({ "inactive_class": "muted" }), |menu| {
        menu.add("Home", "/");
        menu.add("Help", "help");
    });

    menus.get_mut("Sidebar")?.filter(|item| item.title() != "Help");
    let html = menus.get("sidebar")?.as_ul(&Attributes::new(), RenderOptions::new())?;
    assert_eq!(html, r#"<ul><li class="active"><a href="https://example.com">Home</a></li></ul>"#);
    Ok(())
}

#[test]
fn test_missing_menu_error_is_user_friendly() {
    let mut menus = Registry::new(Settings::default(), test_utils::context("/"));
    menus.make("navigation", |_| {});

    let error = menus.get("navigaton").expect_err("menu does not exist");
    assert!(matches!(&error, MenuError::MenuNotFound { suggestion: Some(s), .. } if s == "navigation"));

    let friendly = user_friendly_error(error.into()).to_string();
    assert!(friendly.contains("navigaton"));
    assert!(friendly.contains("navigation"));
}
