//! Per-menu configuration.

use crate::config::{deep_merge_json, lookup};
use crate::html::Attributes;
use serde_json::Value;

/// Which element receives the active class when an item is activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveElement {
    /// The wrapping element of the item (`<li>`)
    #[default]
    Item,
    /// The item's link element (`<a>`); items without a link fall back to `Item`
    Link,
}

/// The resolved configuration a [`Builder`](crate::menu::Builder) owns.
///
/// Backed by a JSON tree so arbitrary keys can be read with [`conf`](Self::conf);
/// the typed accessors cover every documented key.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MenuConfig {
    tree: Value,
}

impl MenuConfig {
    /// Wrap an already-resolved configuration tree.
    #[must_use]
    pub const fn new(tree: Value) -> Self {
        Self {
            tree,
        }
    }

    /// The whole configuration tree.
    #[must_use]
    pub fn tree(&self) -> &Value {
        &self.tree
    }

    /// Dotted-path lookup (`dropdown_defaults.link_type`).
    #[must_use]
    pub fn conf(&self, key: &str) -> Option<&Value> {
        lookup(&self.tree, key)
    }

    /// Dotted-path lookup with a fallback for missing keys.
    #[must_use]
    pub fn conf_or(&self, key: &str, default: Value) -> Value {
        self.conf(key).cloned().unwrap_or(default)
    }

    /// True only when the key holds the boolean `true`.
    #[must_use]
    pub fn is_enabled(&self, key: &str) -> bool {
        matches!(self.conf(key), Some(Value::Bool(true)))
    }

    /// Non-empty string value at `key`.
    #[must_use]
    pub fn string(&self, key: &str) -> Option<&str> {
        self.conf(key).and_then(Value::as_str).filter(|s| !s.is_empty())
    }

    /// Attribute map at `key`; empty when missing.
    #[must_use]
    pub fn attributes(&self, key: &str) -> Attributes {
        self.conf(key).map(Attributes::from_value).unwrap_or_default()
    }

    /// Deep-merge `overrides` into this configuration.
    pub fn merge(&mut self, overrides: &Value) {
        self.tree = deep_merge_json(std::mem::take(&mut self.tree), overrides);
    }

    pub fn auto_activate(&self) -> bool {
        self.is_enabled("auto_activate")
    }

    pub fn activate_parents(&self) -> bool {
        self.is_enabled("activate_parents")
    }

    pub fn restful(&self) -> bool {
        self.is_enabled("restful")
    }

    pub fn cascade_data(&self) -> bool {
        self.is_enabled("cascade_data")
    }

    pub fn active_class(&self) -> Option<&str> {
        self.string("active_class")
    }

    pub fn inactive_class(&self) -> Option<&str> {
        self.string("inactive_class")
    }

    pub fn active_icon_class(&self) -> Option<&str> {
        self.string("active_icon_class")
    }

    pub fn inactive_icon_class(&self) -> Option<&str> {
        self.string("inactive_icon_class")
    }

    pub fn active_svg_class(&self) -> Option<&str> {
        self.string("active_svg_class")
    }

    pub fn inactive_svg_class(&self) -> Option<&str> {
        self.string("inactive_svg_class")
    }

    /// Name of the attribute that makes a dropdown link toggle its menu.
    pub fn data_toggle_attribute(&self) -> &str {
        self.string("data_toggle_attribute").unwrap_or("data-toggle")
    }

    /// `link` selects the link element; anything else (or nothing) selects the item.
    #[must_use]
    pub fn active_element(&self) -> ActiveElement {
        match self.string("active_element") {
            Some(element) if element.eq_ignore_ascii_case("link") => ActiveElement::Link,
            _ => ActiveElement::Item,
        }
    }

    /// RESTful base prefixes, given as one string or a list of alternatives.
    ///
    /// Surrounding slashes are trimmed and empty entries dropped.
    #[must_use]
    pub fn rest_base(&self) -> Vec<String> {
        let normalize = |s: &str| s.trim_matches('/').to_string();
        match self.conf("rest_base") {
            Some(Value::String(base)) => vec![normalize(base)],
            Some(Value::Array(bases)) => bases.iter().filter_map(Value::as_str).map(normalize).collect(),
            _ => Vec::new(),
        }
        .into_iter()
        .filter(|base| !base.is_empty())
        .collect()
    }

    pub fn dropdown_link_type(&self) -> &str {
        self.string("dropdown_defaults.link_type").unwrap_or("button")
    }

    pub fn dropdown_item_attributes(&self) -> Attributes {
        self.attributes("dropdown_defaults.item_attributes")
    }

    /// Link attributes of a new dropdown. A `data-toggle` key is written under the
    /// configured [`data_toggle_attribute`](Self::data_toggle_attribute) name, in place.
    pub fn dropdown_link_attributes(&self) -> Attributes {
        let toggle = self.data_toggle_attribute();
        self.attributes("dropdown_defaults.link_attributes").iter().fold(
            Attributes::new(),
            |mut attributes, (key, value)| {
                let key = if key == "data-toggle" { toggle } else { key };
                attributes.set_opt(key, value.map(str::to_string));
                attributes
            },
        )
    }

    pub fn child_wrapper_attributes(&self) -> Attributes {
        self.attributes("dropdown_defaults.child_wrapper_attributes")
    }

    pub fn child_link_wrapper(&self) -> bool {
        self.is_enabled("dropdown_defaults.child_link_wrapper")
    }
}
