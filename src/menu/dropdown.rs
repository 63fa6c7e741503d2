//! Dropdown toggles.
//!
//! A dropdown is an item whose link renders as a toggle control (a `<button>` by
//! default) and whose children render inside a list carrying the configured
//! `child_wrapper_attributes`.
//!
//! Defaults from `dropdown_defaults` are applied asymmetrically when the dropdown is
//! created:
//! - `item_attributes` only fill keys the caller did not pass, so an explicit `class`
//!   replaces the default `dropdown dropdown-item` entirely;
//! - `link_attributes` are the base of the toggle's attribute set and anything already
//!   on the link is laid over them.

use super::Item;
use crate::config::MenuConfig;
use crate::html::Attributes;
use std::fmt;

/// Element used for a dropdown toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropdownType {
    /// `<button type="button">`
    Button,
    /// `<a href="#">`
    Anchor,
    /// Any other element name
    Custom(String),
}

impl DropdownType {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Button => "button",
            Self::Anchor => "a",
            Self::Custom(tag) => tag,
        }
    }
}

impl From<&str> for DropdownType {
    /// `href` and `link` are aliases of `a`.
    fn from(name: &str) -> Self {
        match name.trim() {
            "button" => Self::Button,
            "a" | "href" | "link" => Self::Anchor,
            other => Self::Custom(other.to_string()),
        }
    }
}

impl fmt::Display for DropdownType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Item attributes for a new dropdown, before group merging: the configured defaults
/// with the caller's attributes laid over them.
pub(crate) fn item_attributes(config: &MenuConfig, requested: &Attributes) -> Attributes {
    config.dropdown_item_attributes().overlaid(requested)
}

/// Turn a freshly constructed item into a dropdown.
pub(crate) fn convert(item: &mut Item, config: &MenuConfig) {
    item.dropdown = Some(DropdownType::from(config.dropdown_link_type()));
    if let Some(link) = item.link.as_mut() {
        link.attributes = config.dropdown_link_attributes().overlaid(&link.attributes);
    }
}
