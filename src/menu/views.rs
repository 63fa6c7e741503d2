//! Derived menus built from the active item.
//!
//! Every view is a new [`Builder`] with its own items; changing it leaves the source
//! menu untouched. Apart from [`Builder::top_menu`], which copies the top-level items
//! as they are, views re-add each item by title and resolved URL, so the copies run
//! through activation again and carry no children.

use super::{Builder, Item, ItemOptions};
use crate::core::MenuError;
use std::collections::HashSet;
use tracing::debug;

impl Builder {
    /// Top-level items only.
    #[must_use]
    pub fn top_menu(&self) -> Builder {
        let mut menu = self.spawn("topLevel");
        menu.items = self.items.iter().filter(|item| item.parent.is_none()).cloned().collect();
        menu
    }

    /// Children of the active item; empty when nothing is active.
    #[must_use]
    pub fn sub_menu(&self) -> Builder {
        let mut menu = self.spawn("subMenu");
        if let Some(active) = self.active() {
            self.copy_into(&mut menu, self.children(&active.id));
        }
        menu
    }

    /// The active item and its siblings; empty when there is only one of them.
    ///
    /// Without an active item the top-level items are used.
    #[must_use]
    pub fn sibling_menu(&self) -> Builder {
        let mut menu = self.spawn("siblingMenu");
        let siblings = match self.active().and_then(|active| self.parent(active)) {
            Some(parent) => self.children(&parent.id),
            None => self.roots(),
        };

        if siblings.len() > 1 {
            self.copy_into(&mut menu, siblings);
        } else {
            debug!("No siblings to show in menu '{}'", self.name);
        }
        menu
    }

    /// Breadcrumbs: the active item's ancestors, root first, ending with the item.
    ///
    /// # Errors
    ///
    /// Returns [`MenuError::CyclicParent`] if the ancestor chain loops.
    pub fn crumb_menu(&self) -> Result<Builder, MenuError> {
        let mut menu = self.spawn("crumbMenu");
        let Some(active) = self.active() else {
            return Ok(menu);
        };

        let mut trail = vec![active];
        let mut seen = HashSet::from([active.id.as_str()]);
        let mut current = active;
        while let Some(parent) = self.parent(current) {
            if !seen.insert(parent.id.as_str()) {
                return Err(MenuError::CyclicParent {
                    id: parent.id.clone(),
                });
            }
            trail.push(parent);
            current = parent;
        }
        trail.reverse();

        self.copy_into(&mut menu, trail);
        Ok(menu)
    }

    /// Re-add `items` to `menu` by title and URL; items without a URL become labels.
    fn copy_into(&self, menu: &mut Builder, items: Vec<&Item>) {
        for item in items {
            match self.url_of(item) {
                Some(url) => {
                    menu.add(item.title.clone(), ItemOptions::new().with_url(url));
                }
                None => {
                    menu.raw(item.title.clone(), ItemOptions::new());
                }
            }
        }
    }
}
