//! Test utilities for navmenu
//!
//! Helpers shared by unit tests and the integration suite (enabled there through the
//! `test-utils` feature):
//! - menus bound to a request on a fixed test origin
//! - actors and an in-memory icon resolver
//! - definition and settings file fixtures
//!
//! # Example
//!
//! ```rust,no_run
//! use navmenu::test_utils;
//!
//! let mut menu = test_utils::builder("about");
//! menu.add("About", "about");
//! assert!(menu.active().is_some());
//! ```

pub mod fixtures;

pub use fixtures::{DefinitionFixture, SettingsFixture};

use crate::config::Settings;
use crate::context::{IconResolver, MenuContext, User};
use crate::core::MenuError;
use crate::html::Attributes;
use crate::menu::Builder;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Once};
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Origin every test request and resolved URL lives on.
pub const BASE_URL: &str = "https://example.com";

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has an effect. With `None` the `RUST_LOG` environment variable
/// decides, and nothing is logged when it is unset.
///
/// ```bash
/// RUST_LOG=navmenu=trace cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .with_ansi(true)
            .try_init();
    });
}

/// Absolute URL of `path` on [`BASE_URL`].
pub fn url(path: &str) -> String {
    format!("{BASE_URL}/{}", path.trim_start_matches('/'))
}

/// Context for a request to `path` on [`BASE_URL`], as a guest.
pub fn context(path: &str) -> MenuContext {
    MenuContext::for_url(&url(path)).unwrap_or_else(|e| panic!("invalid test URL for '{path}': {e}"))
}

/// Default settings with `overrides` deep-merged over them.
pub fn settings(overrides: &Value) -> Arc<Settings> {
    Arc::new(Settings::from_value(overrides))
}

/// Empty `main` menu with default settings for a request to `path`.
pub fn builder(path: &str) -> Builder {
    Builder::new("main", Arc::new(Settings::default()), context(path))
}

/// Empty `main` menu whose settings carry `overrides`.
pub fn builder_with(path: &str, overrides: &Value) -> Builder {
    Builder::new("main", settings(overrides), context(path))
}

/// Signed-in user with the `admin` role.
pub fn admin() -> User {
    User::new("ada").with_role("admin")
}

/// Signed-in user without roles.
pub fn member() -> User {
    User::new("bob")
}

/// Icon resolver backed by a map of logical names to inner SVG markup.
#[derive(Debug, Clone, Default)]
pub struct MemoryIcons {
    icons: HashMap<String, String>,
}

impl MemoryIcons {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `inner` under the logical name of `path` (`social/github` becomes
    /// `navmenu-social-github`).
    #[must_use]
    pub fn with_icon(mut self, path: &str, inner: &str) -> Self {
        self.icons.insert(crate::context::logical_name(path), inner.to_string());
        self
    }
}

impl IconResolver for MemoryIcons {
    fn svg(&self, name: &str, attributes: &Attributes) -> Result<String, MenuError> {
        let inner = self.icons.get(name).ok_or_else(|| MenuError::IconNotFound {
            path: name.to_string(),
        })?;
        Ok(format!("<svg{}>{inner}</svg>", attributes.to_html()))
    }
}
