//! Named menus shared by one request.
//!
//! A [`Registry`] owns every menu built for the current request, keyed by name. The
//! host creates one per request (or per render pass) and hands it to whatever renders
//! the page; there is no process-wide instance.
//!
//! ```rust
//! use navmenu::config::Settings;
//! use navmenu::context::MenuContext;
//! use navmenu::menu::Registry;
//!
//! # fn example() -> anyhow::Result<()> {
//! let mut menus = Registry::new(Settings::default(), MenuContext::for_url("https://example.com/")?);
//!
//! menus.make("main", |menu| {
//!     menu.add("Home", "/");
//! });
//! // Later callers extend the same menu.
//! menus.make("main", |menu| {
//!     menu.add("Contact", "contact");
//! });
//!
//! assert_eq!(menus.get("main")?.len(), 2);
//! assert!(menus.make_once("main", |_| {}).is_none());
//! # Ok(())
//! # }
//! ```

use super::Builder;
use crate::config::Settings;
use crate::context::MenuContext;
use crate::core::MenuError;
use indexmap::IndexMap;
use serde_json::Value;
use std::sync::Arc;
use strsim::levenshtein;
use tracing::debug;

/// Menus by name, in creation order.
#[derive(Debug, Clone)]
pub struct Registry {
    settings: Arc<Settings>,
    context: MenuContext,
    menus: IndexMap<String, Builder>,
}

impl Registry {
    pub fn new(settings: Settings, context: MenuContext) -> Self {
        Self {
            settings: Arc::new(settings),
            context,
            menus: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn exists(&self, name: &str) -> bool {
        self.menus.contains_key(name)
    }

    /// Create the menu if needed, then run `populate` on it.
    ///
    /// `populate` runs on every call, so several parts of an application can
    /// contribute items to the same menu.
    pub fn make<F>(&mut self, name: &str, populate: F) -> &mut Builder
    where
        F: FnOnce(&mut Builder),
    {
        self.make_with_options(name, &Value::Null, populate)
    }

    /// [`make`](Self::make) with configuration overrides for a newly created menu.
    ///
    /// `options` are laid over the `menus.default` and `menus.<name>` blocks. They are
    /// ignored when the menu already exists.
    pub fn make_with_options<F>(&mut self, name: &str, options: &Value, populate: F) -> &mut Builder
    where
        F: FnOnce(&mut Builder),
    {
        let menu = self.menus.entry(name.to_string()).or_insert_with(|| {
            debug!("Creating menu '{}'", name);
            let config = self.settings.compose(Some(name), options);
            Builder::with_config(name, config, Arc::clone(&self.settings), self.context.clone())
        });
        populate(menu);
        menu
    }

    /// Create and populate the menu only if it does not exist yet.
    pub fn make_once<F>(&mut self, name: &str, populate: F) -> Option<&mut Builder>
    where
        F: FnOnce(&mut Builder),
    {
        if self.exists(name) {
            debug!("Menu '{}' already exists, skipping", name);
            return None;
        }
        Some(self.make(name, populate))
    }

    /// The menu registered as `name`, falling back to a case-insensitive match.
    ///
    /// # Errors
    ///
    /// Returns [`MenuError::MenuNotFound`], with the closest registered name as a
    /// suggestion when one is similar enough.
    pub fn get(&self, name: &str) -> Result<&Builder, MenuError> {
        let key = self.resolve(name)?;
        self.menus.get(&key).ok_or_else(|| self.not_found(name))
    }

    /// Mutable access to the menu registered as `name`.
    ///
    /// # Errors
    ///
    /// Returns [`MenuError::MenuNotFound`] as [`get`](Self::get) does.
    pub fn get_mut(&mut self, name: &str) -> Result<&mut Builder, MenuError> {
        let key = self.resolve(name)?;
        let not_found = self.not_found(name);
        self.menus.get_mut(&key).ok_or(not_found)
    }

    /// Every menu in creation order.
    pub fn all(&self) -> impl Iterator<Item = &Builder> {
        self.menus.values()
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[must_use]
    pub fn context(&self) -> &MenuContext {
        &self.context
    }

    fn resolve(&self, name: &str) -> Result<String, MenuError> {
        if self.menus.contains_key(name) {
            return Ok(name.to_string());
        }
        self.menus.keys().find(|key| key.eq_ignore_ascii_case(name)).cloned().ok_or_else(|| self.not_found(name))
    }

    fn not_found(&self, name: &str) -> MenuError {
        let threshold = (name.len() / 3).max(2);
        let suggestion = self
            .menus
            .keys()
            .map(|key| (key, levenshtein(name, key)))
            .filter(|(_, distance)| *distance <= threshold)
            .min_by_key(|(_, distance)| *distance)
            .map(|(key, _)| key.clone());

        MenuError::MenuNotFound {
            name: name.to_string(),
            suggestion,
        }
    }
}
