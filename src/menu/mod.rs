//! The menu engine.
//!
//! A menu is a [`Builder`] holding a flat, ordered list of [`Item`]s that reference
//! their parents by id. Items are added through the builder or through the
//! [`ItemMut`] handle of a parent, decorated fluently, matched against the current
//! request as they are created, and finally rendered to HTML.
//!
//! # Modules
//!
//! - `builder` - item storage, groups, lookup and URL dispatch
//! - `handle` - fluent decoration of single items
//! - `activation` - exact and RESTful matching against the request
//! - `query` - field-based filtering and sorting
//! - `render` - HTML output and the per-item render hook
//! - `views` - top, sub, sibling and breadcrumb menus
//! - `registry` - named menus for one request
//! - `definition` - menus loaded from TOML or YAML
//!
//! # Example
//!
//! ```rust
//! use navmenu::config::Settings;
//! use navmenu::context::MenuContext;
//! use navmenu::html::Attributes;
//! use navmenu::menu::{Builder, ItemOptions, RenderOptions};
//! use std::sync::Arc;
//!
//! # fn example() -> anyhow::Result<()> {
//! let context = MenuContext::for_url("https://example.com/")?;
//! let mut menu = Builder::new("main", Arc::new(Settings::default()), context);
//!
//! menu.add("Home", "/");
//! menu.dropdown("Settings", ItemOptions::new(), |settings| {
//!     settings.add("General", "settings/general");
//! });
//!
//! let html = menu.as_ul(&Attributes::from([("class", "nav")]), RenderOptions::new())?;
//! assert!(html.starts_with(r#"<ul class="nav"><li class="active">"#));
//! # Ok(())
//! # }
//! ```

mod activation;
mod builder;
mod definition;
mod dropdown;
mod handle;
mod item;
mod link;
mod options;
mod permission;
mod query;
mod registry;
mod render;
mod views;

pub use builder::{Builder, OptionsSource};
pub use definition::{Audience, Entry, GroupDefinition, ItemDefinition, ItemKind, MenuDefinition};
pub use dropdown::DropdownType;
pub use handle::ItemMut;
pub use item::{Item, SvgIcon, nickname_from_title};
pub use link::Link;
pub use options::{ItemOptions, LinkPath, RESERVED_KEYS, Target};
pub use permission::Permission;
pub use query::{ItemField, SortOrder};
pub use registry::Registry;
pub use render::{AfterItemHook, ItemScope, RenderOptions};
