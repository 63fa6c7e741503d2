use anyhow::Result;
use navmenu::config::Settings;
use navmenu::core::MenuError;
use navmenu::html::Attributes;
use navmenu::menu::{MenuDefinition, Registry, RenderOptions};
use navmenu::test_utils::{self, DefinitionFixture, SettingsFixture};

use crate::common::TestProject;

fn render(definition: &MenuDefinition, settings: Settings, path: &str) -> Result<String> {
    let mut menus = Registry::new(settings, test_utils::context(path));
    let mut built = Ok(());
    menus.make(&definition.name, |menu| built = definition.build(menu));
    built?;
    Ok(menus.get(&definition.name)?.as_ul(&Attributes::new(), RenderOptions::new())?)
}

#[test]
fn test_toml_and_yaml_definitions_build_the_same_menu() -> Result<()> {
    let project = TestProject::new()?;
    let toml = MenuDefinition::load(&project.write_definition(&DefinitionFixture::basic())?)?;
    let yaml = MenuDefinition::load(&project.write_definition(&DefinitionFixture::yaml())?)?;

    assert_eq!(toml.name, "main");
    assert_eq!(yaml.name, "main");

    let from_toml = render(&toml, Settings::default(), "about/team")?;
    let from_yaml = render(&yaml, Settings::default(), "about/team")?;
    assert_eq!(from_toml, from_yaml);
    assert!(from_toml.contains("<li class=\"nav-about active\">"));
    Ok(())
}

#[test]
fn test_definition_children_and_groups() -> Result<()> {
    let project = TestProject::new()?;
    let definition = MenuDefinition::load(&project.write_definition(&DefinitionFixture::basic())?)?;

    let mut menus = Registry::new(Settings::default(), test_utils::context("about/team"));
    let mut built = Ok(());
    menus.make("main", |menu| built = definition.build(menu));
    built?;
    let menu = menus.get("main")?;

    let roots: Vec<&str> = menu.roots().iter().map(|item| item.title()).collect();
    assert_eq!(roots, ["Home", "About", "Settings", "Dashboard"]);

    let about = menu.get("about").expect("about");
    let children: Vec<&str> = menu.children(about.id()).iter().map(|item| item.title()).collect();
    assert_eq!(children, ["Team", "History"]);
    assert!(about.is_marked_active());
    assert_eq!(about.data("section"), Some(&serde_json::Value::from("company")));
    assert!(menu.get("team").is_some_and(|team| team.is_active()));

    let dashboard = menu.get("dashboard").expect("dashboard");
    assert_eq!(menu.url_of(dashboard).as_deref(), Some("https://example.com/admin/dashboard"));
    assert_eq!(dashboard.attr("class"), Some("admin"));
    Ok(())
}

#[test]
fn test_settings_file_shapes_rendering() -> Result<()> {
    let project = TestProject::new()?;
    let settings = Settings::load(&project.write_settings(&SettingsFixture::basic())?)?;

    assert_eq!(settings.icon_family(), Some("fa"));
    let main = settings.menu_config("main");
    assert_eq!(main.active_class(), Some("current"));
    assert_eq!(main.inactive_class(), Some("inactive"));
    assert_eq!(settings.menu_config("footer").active_class(), Some("active"));

    let definition = MenuDefinition::load(&project.write_definition(&DefinitionFixture::basic())?)?;
    let html = render(&definition, settings, "/")?;
    assert!(html.starts_with(r#"<ul><li class="current"><a href="https://example.com">Home</a></li>"#), "{html}");
    assert!(html.contains(r#"<li class="nav-about inactive""#));
    Ok(())
}

#[test]
fn test_definition_options_enable_restful_matching() -> Result<()> {
    let project = TestProject::new()?;
    let definition = MenuDefinition::load(&project.write_definition(&DefinitionFixture::restful())?)?;

    let mut menus = Registry::new(Settings::default(), test_utils::context("posts/5/edit"));
    let mut built = Ok(());
    menus.make(&definition.name, |menu| built = definition.build(menu));
    built?;

    let menu = menus.get("posts")?;
    assert!(menu.config().restful());
    assert!(menu.get("posts").is_some_and(|item| item.is_active()));
    assert!(menu.get("post5").is_some_and(|item| item.is_active()));
    Ok(())
}

#[test]
fn test_invalid_definitions_are_reported() -> Result<()> {
    let project = TestProject::new()?;

    let malformed = project.write_definition(&DefinitionFixture::malformed())?;
    assert!(MenuDefinition::load(&malformed).is_err());

    let definition = MenuDefinition::load(&project.write_definition(&DefinitionFixture::invalid())?)?;
    let mut menus = Registry::new(Settings::default(), test_utils::context("/"));
    let mut built = Ok(());
    menus.make("main", |menu| built = definition.build(menu));

    let error = built.expect_err("dropdown_type on a link");
    assert!(matches!(error, MenuError::DefinitionError { .. }));
    assert!(error.to_string().contains("dropdown_type"));
    Ok(())
}
