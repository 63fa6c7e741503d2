//! Fluent handle for decorating an item in place.

use super::{Builder, DropdownType, Item, ItemOptions, Permission, SvgIcon, builder::divider_attributes};
use crate::context::logical_name;
use crate::core::MenuError;
use crate::html::{Attributes, merge_attributes};
use serde_json::Value;
use tracing::debug;

/// Mutable access to one item of a [`Builder`].
///
/// Decoration methods take the handle by value and return it, so calls chain:
///
/// ```rust
/// # use navmenu::config::Settings;
/// # use navmenu::context::MenuContext;
/// # use navmenu::menu::Builder;
/// # use std::sync::Arc;
/// # fn example() -> anyhow::Result<()> {
/// # let mut menu = Builder::new("main", Arc::new(Settings::default()), MenuContext::for_url("https://example.com")?);
/// menu.add("Blog", "blog").attr("class", "nav-item").prepend("» ").data("badge", 3);
///
/// let mut about = menu.add("About", "about");
/// about.add("Team", "about/team").append(" (12)");
/// # Ok(())
/// # }
/// ```
///
/// Creating children (`add`, `raw`, `dropdown`) borrows the handle instead, so the
/// parent handle stays usable for further children.
///
/// The handle follows its item when the builder is sorted. Once the item has been
/// filtered out, decorations are ignored and [`item`](Self::item) returns `None`.
#[derive(Debug)]
pub struct ItemMut<'a> {
    builder: &'a mut Builder,
    key: u64,
    id: String,
}

impl<'a> ItemMut<'a> {
    pub(crate) fn new(builder: &'a mut Builder, index: usize) -> Self {
        let item = &builder.items[index];
        let (key, id) = (item.key, item.id.clone());
        Self {
            builder,
            key,
            id,
        }
    }

    pub(crate) fn resume(builder: &'a mut Builder, key: u64, id: String) -> Self {
        Self {
            builder,
            key,
            id,
        }
    }

    pub(crate) fn into_identity(self) -> (u64, String) {
        (self.key, self.id)
    }

    /// Read access to the item, `None` once it has been removed from the builder.
    #[must_use]
    pub fn item(&self) -> Option<&Item> {
        self.builder.items.iter().find(|item| item.key == self.key)
    }

    fn position(&self) -> Option<usize> {
        self.builder.items.iter().position(|item| item.key == self.key)
    }

    fn edit(mut self, f: impl FnOnce(&mut Item)) -> Self {
        match self.position() {
            Some(index) => f(&mut self.builder.items[index]),
            None => debug!("Item '{}' is no longer in menu '{}'; ignoring change", self.id, self.builder.name),
        }
        self
    }

    /// The builder that owns this item.
    pub fn builder(&mut self) -> &mut Builder {
        self.builder
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn nickname(&self) -> Option<&str> {
        self.item().map(Item::nickname)
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.item().map(Item::title)
    }

    /// Add a child item.
    pub fn add(&mut self, title: impl Into<String>, options: impl Into<ItemOptions>) -> ItemMut<'_> {
        let options = options.into().with_parent(self.id().to_string());
        self.builder.add(title, options)
    }

    /// Add a child label without a link.
    pub fn raw(&mut self, title: impl Into<String>, options: impl Into<ItemOptions>) -> ItemMut<'_> {
        let options = options.into().with_parent(self.id().to_string());
        self.builder.raw(title, options)
    }

    /// Add a child dropdown.
    pub fn dropdown<F>(&mut self, title: impl Into<String>, options: impl Into<ItemOptions>, populate: F) -> ItemMut<'_>
    where
        F: FnOnce(&mut ItemMut<'_>),
    {
        let options = options.into().with_parent(self.id().to_string());
        self.builder.dropdown(title, options, populate)
    }

    /// Open a group on the owning builder.
    pub fn group<F>(&mut self, attributes: Attributes, f: F)
    where
        F: FnOnce(&mut Builder),
    {
        self.builder.group(attributes, f);
    }

    /// Render a separator after this item; `divider` is appended to its classes.
    pub fn divide(self, attributes: Attributes) -> Self {
        let divider = divider_attributes(attributes);
        self.edit(|item| item.divider = Some(divider))
    }

    /// Set one attribute.
    pub fn attr(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.edit(|item| item.attributes.set(key, value))
    }

    /// Lay several attributes over the current ones.
    pub fn attrs(self, attributes: &Attributes) -> Self {
        self.edit(|item| item.attributes.extend(attributes))
    }

    /// Set an attribute on the item's link; no-op for items without one.
    pub fn link_attr(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.edit(|item| {
            if let Some(link) = item.link.as_mut() {
                link.set_attr(key, value);
            }
        })
    }

    /// Link to `href` regardless of the item's url, route or action.
    pub fn href(self, href: impl Into<String>) -> Self {
        self.edit(|item| {
            if let Some(link) = item.link.as_mut() {
                link.set_href(href);
            }
        })
    }

    /// Resolve the item's URL with the secure scheme.
    pub fn secure(self) -> Self {
        self.edit(|item| {
            if let Some(link) = item.link.as_mut() {
                link.secure();
            }
        })
    }

    pub fn prepend(self, html: &str) -> Self {
        self.edit(|item| item.title.insert_str(0, html))
    }

    pub fn append(self, html: &str) -> Self {
        self.edit(|item| item.title.push_str(html))
    }

    /// Markup emitted before the item's link.
    pub fn before(self, html: &str) -> Self {
        self.edit(|item| item.before_html.insert_str(0, html))
    }

    /// Markup emitted after the item's link.
    pub fn after(self, html: &str) -> Self {
        self.edit(|item| item.after_html.push_str(html))
    }

    pub fn permission(self, permission: impl Into<Permission>) -> Self {
        let permission = permission.into();
        self.edit(|item| item.permission = permission)
    }

    pub fn only_users(self) -> Self {
        self.permission(Permission::only_users())
    }

    pub fn only_guests(self) -> Self {
        self.permission(Permission::only_guests())
    }

    pub fn only_admins(self) -> Self {
        self.permission(Permission::only_admins())
    }

    pub fn has_team_permission(self, permission: impl Into<String>) -> Self {
        self.permission(Permission::has_team_permission(permission))
    }

    /// Icon-font decoration before the title. Ignored unless `icon_family` is set.
    pub fn icon(self, name: &str) -> Self {
        match self.icon_attributes(name) {
            Some(attributes) => self.edit(|item| item.before_icon = Some(attributes)),
            None => self,
        }
    }

    /// Icon-font decoration after the title. Ignored unless `icon_family` is set.
    pub fn append_icon(self, name: &str) -> Self {
        match self.icon_attributes(name) {
            Some(attributes) => self.edit(|item| item.after_icon = Some(attributes)),
            None => self,
        }
    }

    fn icon_attributes(&self, name: &str) -> Option<Attributes> {
        let Some(family) = self.builder.settings.icon_family() else {
            debug!("Ignoring icon '{}': no icon_family configured", name);
            return None;
        };
        let icon = Attributes::from([("class", format!("{family} {name}"))]);
        Some(merge_attributes(&self.builder.settings.icon_attributes(), &icon))
    }

    /// Inline SVG before the title. Ignored unless `svg_path` is set.
    pub fn svg(self, path: &str) -> Self {
        match self.svg_icon(path) {
            Some(icon) => self.edit(|item| item.before_svg = Some(icon)),
            None => self,
        }
    }

    /// Inline SVG after the title. Ignored unless `svg_path` is set.
    pub fn append_svg(self, path: &str) -> Self {
        match self.svg_icon(path) {
            Some(icon) => self.edit(|item| item.after_svg = Some(icon)),
            None => self,
        }
    }

    fn svg_icon(&self, path: &str) -> Option<SvgIcon> {
        if self.builder.settings.svg_path().is_none() {
            debug!("Ignoring svg '{}': no svg_path configured", path);
            return None;
        }
        Some(SvgIcon {
            path: logical_name(path),
            attributes: self.builder.settings.svg_attributes(),
        })
    }

    pub fn with_nickname(self, nickname: impl Into<String>) -> Self {
        self.edit(|item| item.nickname = nickname.into())
    }

    /// Change the item's id. Children added earlier keep pointing at the old id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        let id = id.into();
        if self.position().is_some() {
            self.id.clone_from(&id);
        }
        self.edit(|item| item.id = id)
    }

    /// Wrap the item in `tag` instead of the list's row element.
    pub fn tag(self, tag: impl Into<String>) -> Self {
        self.edit(|item| item.tag = Some(tag.into()))
    }

    /// Set metadata; cascades to every descendant when `cascade_data` is enabled.
    pub fn data(mut self, key: &str, value: impl Into<Value>) -> Self {
        if self.position().is_some() {
            self.builder.set_data(&self.id, key, &value.into());
        }
        self
    }

    /// Set several metadata entries at once.
    pub fn data_map(self, values: &serde_json::Map<String, Value>) -> Self {
        values.iter().fold(self, |handle, (key, value)| handle.data(key, value.clone()))
    }

    /// Change the toggle element of a dropdown; no-op for other items.
    pub fn dropdown_type(self, name: &str) -> Self {
        self.edit(|item| {
            if item.dropdown.is_some() {
                item.dropdown = Some(DropdownType::from(name));
            }
        })
    }

    /// Do not activate this item by comparing its URL with the request.
    pub fn disable_activation_by_url(self) -> Self {
        self.edit(|item| item.disable_activation_by_url = true)
    }

    /// Mark this item active without touching its ancestors.
    pub fn active(mut self) -> Self {
        if let Some(index) = self.position() {
            self.builder.mark_manually_active(index);
        }
        self
    }

    /// Activate this item (and its ancestors) when the request path matches `pattern`.
    ///
    /// `*` matches anything and a trailing `/*` also matches the bare prefix, so
    /// `users/*` matches `users`, `users/5` and `users/5/edit`.
    pub fn active_pattern(mut self, pattern: &str) -> Self {
        if let Some(index) = self.position() {
            self.builder.activate_by_pattern(index, pattern);
        }
        self
    }

    /// Run the full activation: mark this item and, if configured, its ancestors.
    pub fn activate(mut self) -> Self {
        if let Some(index) = self.position() {
            self.builder.activate(index);
        }
        self
    }

    /// Resolved URL of the item.
    #[must_use]
    pub fn url(&self) -> Option<String> {
        self.item().and_then(|item| self.builder.url_of(item))
    }

    #[must_use]
    pub fn has_children(&self) -> bool {
        self.builder.has_children(self.id())
    }

    #[must_use]
    pub fn children(&self) -> Vec<&Item> {
        self.builder.children(self.id())
    }

    #[must_use]
    pub fn parent(&self) -> Option<&Item> {
        self.item().and_then(|item| self.builder.parent(item))
    }

    /// All descendants of this item.
    ///
    /// # Errors
    ///
    /// Returns [`MenuError::CyclicParent`] if the subtree loops back on itself.
    pub fn descendants(&self) -> Result<Vec<&Item>, MenuError> {
        self.builder.descendants(self.id())
    }
}
