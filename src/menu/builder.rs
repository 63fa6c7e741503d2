//! Menu builder: flat item storage, grouping and dispatch.
//!
//! A [`Builder`] owns every item of one named menu in insertion order. The tree is
//! implicit: each item records the id of its parent, and traversals look children up
//! by id. Adding an item returns an [`ItemMut`] handle for fluent decoration.
//!
//! ```rust
//! use navmenu::config::Settings;
//! use navmenu::context::MenuContext;
//! use navmenu::menu::{Builder, ItemOptions};
//! use std::sync::Arc;
//!
//! # fn example() -> anyhow::Result<()> {
//! let context = MenuContext::for_url("https://example.com/about/team")?;
//! let mut menu = Builder::new("main", Arc::new(Settings::default()), context);
//!
//! menu.add("Home", "/");
//! let mut about = menu.add("About", "about");
//! about.add("Team", "about/team");
//!
//! assert_eq!(menu.active().map(|item| item.title()), Some("Team"));
//! assert!(menu.get("about").is_some_and(|item| item.is_marked_active()));
//! # Ok(())
//! # }
//! ```

use super::{ItemMut, ItemOptions, Link, LinkPath, dropdown, item::Item, item::nickname_from_title};
use crate::config::{MenuConfig, Settings};
use crate::context::{MenuContext, is_absolute};
use crate::core::MenuError;
use crate::html::{Attributes, merge_class_lists, merge_group};
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, trace};

/// Where [`Builder::options`] takes its base configuration from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OptionsSource {
    /// Use the overrides as the whole configuration
    Replace,
    /// `menus.default`, then the block named like this menu
    #[default]
    Inherit,
    /// `menus.default`, then the named block (or this menu's block if it does not exist)
    Menu(String),
}

/// One named menu.
#[derive(Debug, Clone)]
pub struct Builder {
    pub(crate) name: String,
    pub(crate) items: Vec<Item>,
    next_key: u64,
    pub(crate) group_stack: Vec<Attributes>,
    pub(crate) config: MenuConfig,
    pub(crate) settings: Arc<Settings>,
    pub(crate) context: MenuContext,
}

impl Builder {
    /// Empty menu configured from the `menus.default` and `menus.<name>` blocks.
    pub fn new(name: impl Into<String>, settings: Arc<Settings>, context: MenuContext) -> Self {
        let name = name.into();
        let config = settings.menu_config(&name);
        Self::with_config(name, config, settings, context)
    }

    /// Empty menu with an already-resolved configuration.
    pub fn with_config(
        name: impl Into<String>,
        config: MenuConfig,
        settings: Arc<Settings>,
        context: MenuContext,
    ) -> Self {
        Self {
            name: name.into(),
            items: Vec::new(),
            next_key: 0,
            group_stack: Vec::new(),
            config,
            settings,
            context,
        }
    }

    /// Empty menu sharing this menu's configuration and collaborators.
    #[must_use]
    pub fn spawn(&self, name: impl Into<String>) -> Self {
        Self::with_config(name, self.config.clone(), Arc::clone(&self.settings), self.context.clone())
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn config(&self) -> &MenuConfig {
        &self.config
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[must_use]
    pub fn context(&self) -> &MenuContext {
        &self.context
    }

    /// Dotted-path lookup into this menu's configuration.
    #[must_use]
    pub fn conf(&self, key: &str) -> Option<&Value> {
        self.config.conf(key)
    }

    /// Reconfigure the menu.
    ///
    /// Items already added keep the state they were created with.
    pub fn options(&mut self, overrides: &Value, source: OptionsSource) {
        self.config = match source {
            OptionsSource::Replace => MenuConfig::new(overrides.clone()),
            OptionsSource::Inherit => self.settings.compose(Some(&self.name), overrides),
            OptionsSource::Menu(name) => {
                let base = if self.settings.menu_block(&name).is_some() { name.as_str() } else { self.name.as_str() };
                self.settings.compose(Some(base), overrides)
            }
        };
        debug!("Reconfigured menu '{}'", self.name);
    }

    /// Add an item and return a handle to it.
    ///
    /// The item checks whether it matches the current request right away when
    /// `auto_activate` is enabled, so the request context must be final before items
    /// are added.
    pub fn add(&mut self, title: impl Into<String>, options: impl Into<ItemOptions>) -> ItemMut<'_> {
        let index = self.insert(title.into(), options.into(), false);
        ItemMut::new(self, index)
    }

    /// Add a plain label without a link.
    pub fn raw(&mut self, title: impl Into<String>, options: impl Into<ItemOptions>) -> ItemMut<'_> {
        let index = self.insert(title.into(), options.into().raw(), false);
        ItemMut::new(self, index)
    }

    /// Add a dropdown and populate it.
    ///
    /// The dropdown's passthrough attributes are open as a group while `populate`
    /// runs. Children are attached by adding them through the handle passed in.
    pub fn dropdown<F>(&mut self, title: impl Into<String>, options: impl Into<ItemOptions>, populate: F) -> ItemMut<'_>
    where
        F: FnOnce(&mut ItemMut<'_>),
    {
        let options = options.into();
        let group = options.attributes.clone();
        let index = self.insert(title.into(), options, true);

        self.push_group(&group);
        let (key, id) = {
            let mut handle = ItemMut::new(self, index);
            populate(&mut handle);
            handle.into_identity()
        };
        self.group_stack.pop();

        ItemMut::resume(self, key, id)
    }

    /// Run `f` with `attributes` shared by every item it adds.
    ///
    /// Nested groups join their `prefix` values with `/` and merge their classes.
    pub fn group<F>(&mut self, attributes: Attributes, f: F)
    where
        F: FnOnce(&mut Builder),
    {
        self.push_group(&attributes);
        f(self);
        self.group_stack.pop();
        trace!("Closed group, depth now {}", self.group_stack.len());
    }

    fn push_group(&mut self, attributes: &Attributes) {
        let merged = match self.group_stack.last() {
            Some(top) => merge_group(attributes, top),
            None => attributes.clone(),
        };
        trace!("Opened group {:?}", merged);
        self.group_stack.push(merged);
    }

    /// Number of open groups.
    #[must_use]
    pub fn group_depth(&self) -> usize {
        self.group_stack.len()
    }

    /// Attributes for a new item: merged with the innermost group, reserved keys removed.
    #[must_use]
    pub fn extract_attributes(&self, attributes: &Attributes) -> Attributes {
        let merged = match self.group_stack.last() {
            Some(top) => merge_group(attributes, top),
            None => attributes.clone(),
        };
        merged.without(&super::RESERVED_KEYS)
    }

    /// Path prefix of the innermost group; `None` outside of any group.
    #[must_use]
    pub fn last_group_prefix(&self) -> Option<String> {
        self.group_stack.last().map(|top| top.get("prefix").unwrap_or_default().to_string())
    }

    fn insert(&mut self, title: String, options: ItemOptions, is_dropdown: bool) -> usize {
        let id = options.id.clone().unwrap_or_else(generate_id);
        let nickname = options.nickname.clone().unwrap_or_else(|| nickname_from_title(&title));

        let mut item = Item::new(id, title, nickname);
        item.key = self.next_key;
        self.next_key += 1;
        let requested = options.html_attributes();
        item.attributes = if is_dropdown {
            self.extract_attributes(&dropdown::item_attributes(&self.config, &requested))
        } else {
            self.extract_attributes(&requested)
        };
        item.parent = options.parent.clone();
        item.disable_activation_by_url = options.disable_activation_by_url;

        if let Some(mut path) = options.link_path() {
            if !path.is_empty() || is_dropdown {
                path.prefix = self.last_group_prefix();
                item.link = Some(Link::new(path));
            }
        }

        if is_dropdown {
            dropdown::convert(&mut item, &self.config);
        }

        debug!("Added item '{}' ({}) to menu '{}'", item.title, item.id, self.name);
        self.items.push(item);
        let index = self.items.len() - 1;

        if self.config.auto_activate() {
            self.check_activation_status(index);
        }

        index
    }

    /// Resolve a link path to a URL.
    ///
    /// `url` wins over `route`, which wins over `action`. Absolute URLs are returned
    /// unchanged; other paths are joined to the link's group prefix first.
    #[must_use]
    pub fn dispatch(&self, path: &LinkPath) -> Option<String> {
        let urls = &self.context.urls;

        if let Some(url) = &path.url {
            if is_absolute(&url.name) {
                return Some(url.name.clone());
            }
            let prefixed = format!("{}/{}", path.prefix.as_deref().unwrap_or_default(), url.name);
            return Some(urls.to(&prefixed, &url.params, path.secure));
        }

        if let Some(route) = &path.route {
            let resolved = urls.route(&route.name, &route.params);
            if resolved.is_none() {
                debug!("Unknown route '{}'", route.name);
            }
            return resolved;
        }

        if let Some(action) = &path.action {
            let resolved = urls.action(&action.name, &action.params);
            if resolved.is_none() {
                debug!("Unknown action '{}'", action.name);
            }
            return resolved;
        }

        None
    }

    /// URL of an item: the explicit href of its link, or its dispatched path.
    #[must_use]
    pub fn url_of(&self, item: &Item) -> Option<String> {
        let link = item.link.as_ref()?;
        match link.href() {
            Some(href) if !href.is_empty() => Some(href.to_string()),
            _ => self.dispatch(link.path()),
        }
    }

    /// First item with this nickname.
    #[must_use]
    pub fn get(&self, nickname: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.nickname == nickname)
    }

    /// Alias of [`get`](Self::get).
    #[must_use]
    pub fn item(&self, nickname: &str) -> Option<&Item> {
        self.get(nickname)
    }

    /// First item with this id.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Handle to the first item with this nickname.
    pub fn get_mut(&mut self, nickname: &str) -> Option<ItemMut<'_>> {
        let index = self.items.iter().position(|item| item.nickname == nickname)?;
        Some(ItemMut::new(self, index))
    }

    /// Handle to the first item with this id.
    pub fn find_mut(&mut self, id: &str) -> Option<ItemMut<'_>> {
        let index = self.position(id)?;
        Some(ItemMut::new(self, index))
    }

    pub(crate) fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    #[must_use]
    pub fn first(&self) -> Option<&Item> {
        self.items.first()
    }

    #[must_use]
    pub fn last(&self) -> Option<&Item> {
        self.items.last()
    }

    /// Every item in insertion order.
    #[must_use]
    pub fn all(&self) -> &[Item] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The item that matched the request, if any.
    #[must_use]
    pub fn active(&self) -> Option<&Item> {
        self.items.iter().find(|item| item.is_active)
    }

    /// Top-level items.
    #[must_use]
    pub fn roots(&self) -> Vec<&Item> {
        self.items.iter().filter(|item| item.parent.is_none()).collect()
    }

    /// Direct children of the item with id `id`.
    #[must_use]
    pub fn children(&self, id: &str) -> Vec<&Item> {
        self.items.iter().filter(|item| item.parent.as_deref() == Some(id)).collect()
    }

    #[must_use]
    pub fn has_children(&self, id: &str) -> bool {
        self.items.iter().any(|item| item.parent.as_deref() == Some(id))
    }

    /// Parent of `item`; `None` for top-level items and dangling parent ids.
    #[must_use]
    pub fn parent(&self, item: &Item) -> Option<&Item> {
        item.parent.as_deref().and_then(|id| self.find(id))
    }

    /// All descendants of the item with id `id`, depth-first.
    ///
    /// # Errors
    ///
    /// Returns [`MenuError::CyclicParent`] if an item is reached twice.
    pub fn descendants(&self, id: &str) -> Result<Vec<&Item>, MenuError> {
        let mut visited = HashSet::from([id.to_string()]);
        let mut collected = Vec::new();
        self.collect_descendants(id, &mut visited, &mut collected)?;
        Ok(collected)
    }

    fn collect_descendants<'a>(
        &'a self,
        id: &str,
        visited: &mut HashSet<String>,
        collected: &mut Vec<&'a Item>,
    ) -> Result<(), MenuError> {
        for child in self.items.iter().filter(|item| item.parent.as_deref() == Some(id)) {
            if !visited.insert(child.id.clone()) {
                return Err(MenuError::CyclicParent {
                    id: child.id.clone(),
                });
            }
            collected.push(child);
            self.collect_descendants(&child.id, visited, collected)?;
        }
        Ok(())
    }

    /// Depth at which children of `parent_id` sit: 0 for top level, 1 below a root, ...
    ///
    /// # Errors
    ///
    /// Returns [`MenuError::ItemNotFound`] if an id on the way up does not resolve and
    /// [`MenuError::CyclicParent`] if the parent chain loops.
    pub fn find_level(&self, parent_id: Option<&str>) -> Result<usize, MenuError> {
        let mut level = 0;
        let mut visited = HashSet::new();
        let mut current = parent_id;

        while let Some(id) = current {
            if !visited.insert(id) {
                return Err(MenuError::CyclicParent {
                    id: id.to_string(),
                });
            }
            let item = self.find(id).ok_or_else(|| MenuError::ItemNotFound {
                id: id.to_string(),
            })?;
            level += 1;
            current = item.parent.as_deref();
        }

        Ok(level)
    }

    /// Keep only the items matching `predicate`.
    pub fn filter<F>(&mut self, predicate: F) -> &mut Self
    where
        F: FnMut(&Item) -> bool,
    {
        self.items.retain(predicate);
        self
    }

    /// Attach a divider after the most recently added item.
    pub fn divide(&mut self, attributes: Attributes) -> &mut Self {
        if let Some(item) = self.items.last_mut() {
            item.divider = Some(divider_attributes(attributes));
        }
        self
    }

    /// Set an attribute on every item in `ids`.
    pub fn each_attr(&mut self, ids: &[&str], key: &str, value: &str) -> &mut Self {
        for item in self.items.iter_mut().filter(|item| ids.contains(&item.id.as_str())) {
            item.attributes.set(key, value);
        }
        self
    }

    /// Set metadata on every item in `ids`, cascading like [`ItemMut::data`].
    pub fn each_data(&mut self, ids: &[&str], key: &str, value: &Value) -> &mut Self {
        for id in ids {
            self.set_data(id, key, value);
        }
        self
    }

    /// Append markup to the title of every item in `ids`.
    pub fn each_append(&mut self, ids: &[&str], html: &str) -> &mut Self {
        for item in self.items.iter_mut().filter(|item| ids.contains(&item.id.as_str())) {
            item.title.push_str(html);
        }
        self
    }

    /// Prepend markup to the title of every item in `ids`.
    pub fn each_prepend(&mut self, ids: &[&str], html: &str) -> &mut Self {
        for item in self.items.iter_mut().filter(|item| ids.contains(&item.id.as_str())) {
            item.title.insert_str(0, html);
        }
        self
    }

    /// Set metadata on an item, and on all its descendants when `cascade_data` is on.
    pub(crate) fn set_data(&mut self, id: &str, key: &str, value: &Value) {
        let cascade = self.config.cascade_data();
        let mut pending = vec![id.to_string()];
        let mut visited = HashSet::new();

        while let Some(current) = pending.pop() {
            if !visited.insert(current.clone()) {
                continue;
            }
            for item in self.items.iter_mut().filter(|item| item.id == current) {
                item.insert_data(key, value.clone());
            }
            if cascade {
                pending.extend(
                    self.items.iter().filter(|item| item.parent.as_deref() == Some(current.as_str())).map(|item| item.id.clone()),
                );
            }
        }
    }
}

/// Divider attributes: the caller's classes followed by `divider`.
pub(crate) fn divider_attributes(mut attributes: Attributes) -> Attributes {
    let class = merge_class_lists(&Attributes::from([("class", "divider")]), &attributes);
    attributes.set_opt("class", class);
    attributes
}

/// Random element-safe id.
fn generate_id() -> String {
    format!("id-{}", uuid::Uuid::new_v4().simple())
}

#[cfg(test)]
#[path = "builder_tests.rs"]
mod tests;
