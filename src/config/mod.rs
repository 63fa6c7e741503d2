//! Configuration management for navmenu
//!
//! Menus are configured from a single settings tree with two sections:
//!
//! ```toml
//! # Global options shared by every menu
//! [config]
//! icon_family = "fa"          # enables `icon()` decorations
//! svg_path = "svg"            # enables `svg()` decorations
//! [config.icon_attributes]
//! class = "icon"
//! [config.svg_attributes]
//! class = "svg"
//!
//! # Base options inherited by every menu
//! [menus.default]
//! auto_activate = true
//! activate_parents = true
//! active_class = "active"
//! restful = false
//! rest_base = ""              # or a list: ["api", "admin"]
//! active_element = "item"     # or "link"
//!
//! [menus.default.dropdown_defaults]
//! link_type = "button"
//! child_link_wrapper = false
//!
//! # Options for the menu named "main", deep-merged over the default block
//! [menus.main]
//! active_class = "current"
//! ```
//!
//! The same tree can be written in YAML. [`Settings`] holds the merged tree and hands
//! each menu a resolved [`MenuConfig`]; nothing inside the menu engine reads settings
//! from anywhere else.
//!
//! # Modules
//!
//! - `parser` - TOML/YAML file parsing with error context
//! - `merge` - deep merging and dotted-path lookup over JSON trees
//! - `settings` - the global settings tree and its defaults
//! - `menu` - per-menu configuration with typed accessors

mod menu;
mod merge;
mod parser;
mod settings;

pub use menu::{ActiveElement, MenuConfig};
pub use merge::{deep_merge_json, lookup};
pub use parser::{ConfigFormat, parse_config, parse_config_str};
pub use settings::{Settings, default_tree};
