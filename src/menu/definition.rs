//! Menus described in TOML or YAML files.
//!
//! A definition names the menu, optionally overrides its configuration and lists its
//! entries. An entry is either an item or a group of entries sharing attributes:
//!
//! ```toml
//! name = "main"
//!
//! [options]
//! active_class = "current"
//!
//! [[items]]
//! title = "About"
//! url = "about"
//! class = "nav-about"        # unrecognized keys become HTML attributes
//! data = { section = "company" }
//!
//! [[items.children]]
//! title = "Team"
//! url = "about/team"
//!
//! [[items]]
//! title = "Settings"
//! kind = "dropdown"
//!
//! [[items]]
//! group = { prefix = "admin" }
//!
//! [[items.items]]
//! title = "Dashboard"
//! url = "dashboard"
//! only = "admins"
//! ```

use super::{Builder, ItemMut, ItemOptions, OptionsSource};
use crate::config::{ConfigFormat, parse_config, parse_config_str};
use crate::core::MenuError;
use crate::html::Attributes;
use anyhow::Result;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::Path;
use tracing::debug;

/// A whole menu file.
#[derive(Debug, Clone, Deserialize)]
pub struct MenuDefinition {
    /// Menu name, used to pick the `menus.<name>` configuration block
    pub name: String,
    /// Configuration overrides for this menu
    #[serde(default)]
    pub options: Option<Value>,
    #[serde(default)]
    pub items: Vec<Entry>,
}

/// One element of an item list.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Entry {
    Group(GroupDefinition),
    Item(Box<ItemDefinition>),
}

/// Entries added inside a [`Builder::group`].
#[derive(Debug, Clone, Deserialize)]
pub struct GroupDefinition {
    pub group: Attributes,
    #[serde(default)]
    pub items: Vec<Entry>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    #[default]
    Link,
    /// Label without a link
    Raw,
    Dropdown,
}

/// Who may see an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Audience {
    Users,
    Guests,
    Admins,
}

/// One item and its children.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemDefinition {
    pub title: String,
    #[serde(default)]
    pub kind: ItemKind,
    #[serde(default)]
    pub children: Vec<ItemDefinition>,
    pub icon: Option<String>,
    pub append_icon: Option<String>,
    pub svg: Option<String>,
    pub append_svg: Option<String>,
    /// Divider after the item, with extra attributes
    pub divider: Option<Attributes>,
    /// Ability the actor needs
    pub ability: Option<String>,
    pub only: Option<Audience>,
    pub team_permission: Option<String>,
    #[serde(default)]
    pub data: Map<String, Value>,
    /// Toggle element of a dropdown (`button`, `a` or any tag name)
    pub dropdown_type: Option<String>,
    pub tag: Option<String>,
    pub before: Option<String>,
    pub after: Option<String>,
    pub prepend: Option<String>,
    pub append: Option<String>,
    /// Activate when the request path matches this wildcard pattern
    pub active_pattern: Option<String>,
    /// Mark the item active regardless of the request
    #[serde(default)]
    pub active: bool,
    #[serde(flatten)]
    pub options: ItemOptions,
}

impl MenuDefinition {
    /// Read a definition file; the format follows the extension (`.yaml`/`.yml` or TOML).
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read or does not describe a menu.
    pub fn load(path: &Path) -> Result<Self> {
        let definition: Self = parse_config(path)?;
        debug!("Loaded definition of menu '{}' from {}", definition.name, path.display());
        Ok(definition)
    }

    /// Parse a definition from a string.
    ///
    /// # Errors
    ///
    /// Fails when `content` does not describe a menu.
    pub fn parse(content: &str, format: ConfigFormat) -> Result<Self> {
        parse_config_str(content, format)
    }

    /// Apply the options and add every entry to `menu`.
    ///
    /// # Errors
    ///
    /// Returns [`MenuError::DefinitionError`] for entries that cannot be built. Entries
    /// before the failing one stay in the menu.
    pub fn build(&self, menu: &mut Builder) -> Result<(), MenuError> {
        if let Some(options) = &self.options {
            if !options.is_object() {
                return Err(MenuError::DefinitionError {
                    message: format!("options of menu '{}' must be a table", self.name),
                });
            }
            menu.options(options, OptionsSource::Inherit);
        }
        add_entries(menu, &self.items)
    }
}

fn add_entries(menu: &mut Builder, entries: &[Entry]) -> Result<(), MenuError> {
    for entry in entries {
        match entry {
            Entry::Group(group) => {
                let mut result = Ok(());
                menu.group(group.group.clone(), |menu| result = add_entries(menu, &group.items));
                result?;
            }
            Entry::Item(item) => add_item(menu, item, None)?,
        }
    }
    Ok(())
}

fn add_item(menu: &mut Builder, definition: &ItemDefinition, parent: Option<&str>) -> Result<(), MenuError> {
    definition.validate()?;

    let mut options = definition.options.clone();
    if let Some(parent) = parent {
        options = options.with_parent(parent);
    }

    let id = match definition.kind {
        ItemKind::Dropdown => {
            let mut result = Ok(());
            let dropdown = menu.dropdown(definition.title.clone(), options, |dropdown| {
                let id = dropdown.id().to_string();
                result = definition.children.iter().try_for_each(|child| add_item(dropdown.builder(), child, Some(&id)));
            });
            let id = dropdown.id().to_string();
            result?;
            id
        }
        ItemKind::Raw => menu.raw(definition.title.clone(), options).id().to_string(),
        ItemKind::Link => menu.add(definition.title.clone(), options).id().to_string(),
    };

    if definition.kind != ItemKind::Dropdown {
        for child in &definition.children {
            add_item(menu, child, Some(&id))?;
        }
    }

    if let Some(item) = menu.find_mut(&id) {
        decorate(item, definition);
    }
    Ok(())
}

/// Apply the decoration keys of `definition` to a freshly added item.
fn decorate<'a>(mut item: ItemMut<'a>, definition: &ItemDefinition) -> ItemMut<'a> {
    if let Some(icon) = &definition.icon {
        item = item.icon(icon);
    }
    if let Some(icon) = &definition.append_icon {
        item = item.append_icon(icon);
    }
    if let Some(svg) = &definition.svg {
        item = item.svg(svg);
    }
    if let Some(svg) = &definition.append_svg {
        item = item.append_svg(svg);
    }
    if let Some(html) = &definition.prepend {
        item = item.prepend(html);
    }
    if let Some(html) = &definition.append {
        item = item.append(html);
    }
    if let Some(html) = &definition.before {
        item = item.before(html);
    }
    if let Some(html) = &definition.after {
        item = item.after(html);
    }
    if let Some(tag) = &definition.tag {
        item = item.tag(tag.clone());
    }
    if let Some(kind) = &definition.dropdown_type {
        item = item.dropdown_type(kind);
    }
    if let Some(ability) = &definition.ability {
        item = item.permission(ability.as_str());
    }
    item = match definition.only {
        Some(Audience::Users) => item.only_users(),
        Some(Audience::Guests) => item.only_guests(),
        Some(Audience::Admins) => item.only_admins(),
        None => item,
    };
    if let Some(permission) = &definition.team_permission {
        item = item.has_team_permission(permission.clone());
    }
    if !definition.data.is_empty() {
        item = item.data_map(&definition.data);
    }
    if let Some(divider) = &definition.divider {
        item = item.divide(divider.clone());
    }
    if let Some(pattern) = &definition.active_pattern {
        item = item.active_pattern(pattern);
    }
    if definition.active {
        item = item.active();
    }
    item
}

impl ItemDefinition {
    fn validate(&self) -> Result<(), MenuError> {
        if self.title.trim().is_empty() {
            return Err(MenuError::DefinitionError {
                message: "every item needs a non-empty title".to_string(),
            });
        }
        if self.dropdown_type.is_some() && self.kind != ItemKind::Dropdown {
            return Err(MenuError::DefinitionError {
                message: format!("'{}' sets dropdown_type but is not a dropdown", self.title),
            });
        }
        let permissions = [
            ("ability", self.ability.is_some()),
            ("only", self.only.is_some()),
            ("team_permission", self.team_permission.is_some()),
        ];
        let set: Vec<&str> = permissions.iter().filter(|(_, set)| *set).map(|(field, _)| *field).collect();
        if set.len() > 1 {
            return Err(MenuError::DefinitionError {
                message: format!("'{}' sets more than one permission ({})", self.title, set.join(", ")),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{self, DefinitionFixture};

    fn build(fixture: &DefinitionFixture, path: &str) -> Result<Builder> {
        let format = ConfigFormat::from_path(Path::new(&fixture.name));
        let definition = MenuDefinition::parse(&fixture.content, format)?;
        let mut menu = test_utils::builder(path);
        definition.build(&mut menu)?;
        Ok(menu)
    }

    #[test]
    fn test_basic_definition_builds_tree() -> Result<()> {
        let menu = build(&DefinitionFixture::basic(), "about/team")?;

        assert_eq!(menu.len(), 7);
        let about = menu.get("about").expect("about exists");
        assert_eq!(about.attr("class"), Some("nav-about active"));
        assert_eq!(menu.children(about.id()).len(), 2);
        assert_eq!(menu.get("team").and_then(|team| team.data("section")), Some(&Value::from("company")));

        let settings = menu.get("settings").expect("settings exists");
        assert!(settings.is_dropdown());
        assert_eq!(menu.children(settings.id()).len(), 1);

        let dashboard = menu.get("dashboard").expect("dashboard exists");
        assert_eq!(menu.url_of(dashboard).as_deref(), Some("https://example.com/admin/dashboard"));
        assert_eq!(dashboard.attr("class"), Some("admin"));
        Ok(())
    }

    #[test]
    fn test_yaml_matches_toml() -> Result<()> {
        let toml = build(&DefinitionFixture::basic(), "/")?;
        let yaml = build(&DefinitionFixture::yaml(), "/")?;

        let titles = |menu: &Builder| menu.all().iter().map(|item| item.title().to_string()).collect::<Vec<_>>();
        assert_eq!(titles(&toml), titles(&yaml));
        Ok(())
    }

    #[test]
    fn test_options_table_reconfigures_menu() -> Result<()> {
        let menu = build(&DefinitionFixture::restful(), "posts/5/edit")?;

        assert!(menu.config().restful());
        let active: Vec<&str> = menu.where_active(true).iter().map(|item| item.title()).collect();
        assert_eq!(active, ["Posts", "Post 5"]);
        Ok(())
    }

    #[test]
    fn test_dropdown_type_on_link_is_rejected() -> Result<()> {
        let result = build(&DefinitionFixture::invalid(), "/");
        let error = result.expect_err("definition is invalid");
        assert!(matches!(error.downcast_ref::<MenuError>(), Some(MenuError::DefinitionError { .. })));
        Ok(())
    }

    #[test]
    fn test_conflicting_permissions_are_rejected() -> Result<()> {
        let content = r#"
name = "main"

[[items]]
title = "Billing"
url = "billing"
only = "admins"
team_permission = "billing:view"
"#;
        let definition = MenuDefinition::parse(content, ConfigFormat::Toml)?;
        let mut menu = test_utils::builder("/");
        let error = definition.build(&mut menu).expect_err("two permissions on one item");

        match error {
            MenuError::DefinitionError { message } => {
                assert!(message.contains("only, team_permission"), "{message}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(menu.get("billing").is_none());
        Ok(())
    }

    #[test]
    fn test_target_lists_and_decorations() -> Result<()> {
        let content = r#"
name = "main"

[[items]]
title = "Post"
url = ["posts", 5]
tag = "span"
prepend = "> "
active_pattern = "posts/*"
"#;
        let definition = MenuDefinition::parse(content, ConfigFormat::Toml)?;
        let mut menu = test_utils::builder("posts/7");
        definition.build(&mut menu)?;

        let post = menu.get("post").expect("post exists");
        assert_eq!(post.title(), "> Post");
        assert_eq!(post.tag(), Some("span"));
        assert_eq!(menu.url_of(post).as_deref(), Some("https://example.com/posts/5"));
        assert!(post.is_active());
        Ok(())
    }
}
