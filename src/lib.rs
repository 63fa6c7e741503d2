//! navmenu - hierarchical navigation menus for server-rendered pages
//!
//! A menu is built once per request: items are added with a title and a navigation
//! target, grouped under shared attributes and URL prefixes, nested into dropdowns,
//! matched against the current request so the active item and its ancestors are
//! marked, and finally rendered as nested HTML lists.
//!
//! # Core Modules
//!
//! - [`menu`] - Builder, items, activation, queries, rendering, views and the registry
//! - [`config`] - Settings tree with per-menu defaults, loaded from TOML or YAML
//! - [`context`] - Request, URL, icon and actor collaborators
//! - [`html`] - Attribute maps and the merge rules used for groups and classes
//! - [`core`] - Error types and user-facing error formatting
//! - [`cli`] - The `navmenu` command-line interface
//!
//! # Example
//!
//! ```rust
//! use navmenu::config::Settings;
//! use navmenu::context::MenuContext;
//! use navmenu::html::Attributes;
//! use navmenu::menu::{ItemOptions, Registry, RenderOptions};
//!
//! # fn example() -> anyhow::Result<()> {
//! let mut menus = Registry::new(Settings::default(), MenuContext::for_url("https://example.com/about/team")?);
//!
//! menus.make("main", |menu| {
//!     menu.add("Home", "/");
//!     let mut about = menu.add("About", "about");
//!     about.add("Team", "about/team");
//!     menu.group(Attributes::from([("prefix", "admin")]), |menu| {
//!         menu.add("Dashboard", ItemOptions::from("dashboard")).only_admins();
//!     });
//! });
//!
//! let main = menus.get("main")?;
//! assert_eq!(main.active().map(|item| item.title()), Some("Team"));
//!
//! let html = main.as_ul(&Attributes::from([("class", "nav")]), RenderOptions::new())?;
//! assert!(!html.contains("Dashboard"));
//! # Ok(())
//! # }
//! ```
//!
//! # Command-Line Usage
//!
//! ```bash
//! # Render the menu defined in menu.toml for a request
//! navmenu render menu.toml --url https://example.com/about/team
//!
//! # Only the breadcrumbs, as an ordered list
//! navmenu render menu.toml --url https://example.com/about/team --view crumb --format ol
//!
//! # Check a definition in CI
//! navmenu validate menu.toml --strict --format json
//! ```

pub mod cli;
pub mod config;
pub mod context;
pub mod core;
pub mod html;
pub mod menu;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
