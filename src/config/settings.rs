//! The global settings tree.
//!
//! Settings have two top-level sections: `config` holds global options that apply to
//! every menu (icon family, SVG path, default decoration attributes) and `menus`
//! holds per-menu configuration keyed by lowercase menu name, with `menus.default`
//! as the base every menu inherits from.

use crate::config::{MenuConfig, deep_merge_json, lookup, parse_config};
use crate::html::Attributes;
use anyhow::Result;
use serde_json::{Value, json};
use std::path::Path;
use tracing::debug;

/// Resolved global settings, deep-merged over the built-in defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    tree: Value,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tree: default_tree(),
        }
    }
}

/// Built-in settings matching the documented defaults of every key.
#[must_use]
pub fn default_tree() -> Value {
    json!({
        "config": {
            "icon_family": null,
            "svg_path": null,
            "icon_attributes": { "class": null },
            "svg_attributes": { "class": "svg" }
        },
        "menus": {
            "default": {
                "auto_activate": true,
                "activate_parents": true,
                "active_class": "active",
                "inactive_class": null,
                "restful": false,
                "cascade_data": true,
                "rest_base": "",
                "active_element": "item",
                "data_toggle_attribute": "data-toggle",
                "active_icon_class": null,
                "inactive_icon_class": null,
                "active_svg_class": null,
                "inactive_svg_class": null,
                "dropdown_defaults": {
                    "item_attributes": { "class": "dropdown dropdown-item" },
                    "link_type": "button",
                    "link_attributes": {
                        "data-toggle": "dropdown",
                        "aria-haspopup": "true",
                        "aria-expanded": "false"
                    },
                    "child_wrapper_attributes": { "aria-labelledby": "dropdownMenuButton" },
                    "child_link_wrapper": false
                }
            }
        }
    })
}

impl Settings {
    /// Settings with `overrides` deep-merged over the defaults.
    #[must_use]
    pub fn from_value(overrides: &Value) -> Self {
        Self {
            tree: deep_merge_json(default_tree(), overrides),
        }
    }

    /// Load a TOML or YAML settings file and merge it over the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let overrides: Value = parse_config(path)?;
        debug!("Loaded menu settings from {}", path.display());
        Ok(Self::from_value(&overrides))
    }

    /// The whole merged tree.
    #[must_use]
    pub fn tree(&self) -> &Value {
        &self.tree
    }

    /// Dotted-path lookup into the whole tree.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        lookup(&self.tree, key)
    }

    /// Raw configuration block for one menu name, if any.
    #[must_use]
    pub fn menu_block(&self, name: &str) -> Option<&Value> {
        self.tree.get("menus").and_then(|menus| menus.get(name.to_lowercase())).filter(|v| v.is_object())
    }

    /// Configuration for `name`: `menus.default` deep-merged with `menus.<name>`.
    #[must_use]
    pub fn menu_config(&self, name: &str) -> MenuConfig {
        self.compose(Some(name), &Value::Null)
    }

    /// Configuration layered as default, then the named block (if present), then `overrides`.
    #[must_use]
    pub fn compose(&self, name: Option<&str>, overrides: &Value) -> MenuConfig {
        let mut tree = self.menu_block("default").cloned().unwrap_or_else(|| json!({}));

        if let Some(block) = name.filter(|n| !n.eq_ignore_ascii_case("default")).and_then(|n| self.menu_block(n)) {
            tree = deep_merge_json(tree, block);
        }

        if overrides.is_object() {
            tree = deep_merge_json(tree, overrides);
        }

        MenuConfig::new(tree)
    }

    /// Icon font family; the icon decoration is disabled when unset.
    #[must_use]
    pub fn icon_family(&self) -> Option<&str> {
        self.get("config.icon_family").and_then(Value::as_str).filter(|s| !s.is_empty())
    }

    /// Logical SVG directory prefix; the SVG decoration is disabled when unset.
    #[must_use]
    pub fn svg_path(&self) -> Option<&str> {
        self.get("config.svg_path").and_then(Value::as_str)
    }

    /// Default attributes merged into every icon decoration.
    #[must_use]
    pub fn icon_attributes(&self) -> Attributes {
        self.get("config.icon_attributes").map(Attributes::from_value).unwrap_or_default()
    }

    /// Default attributes merged into every SVG decoration.
    #[must_use]
    pub fn svg_attributes(&self) -> Attributes {
        self.get("config.svg_attributes").map(Attributes::from_value).unwrap_or_default()
    }
}
