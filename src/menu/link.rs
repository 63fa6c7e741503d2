//! The navigation target of an item.

use super::LinkPath;
use crate::html::{Attributes, merge_class_lists};

/// A link owned by an [`Item`](super::Item).
///
/// The URL is resolved lazily from [`path`](Self::path) by the builder unless an
/// explicit [`href`](Self::href) has been set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Link {
    path: LinkPath,
    href: Option<String>,
    /// Attributes of the `<a>` (or dropdown toggle) element
    pub attributes: Attributes,
    is_active: bool,
}

impl Link {
    #[must_use]
    pub fn new(path: LinkPath) -> Self {
        Self {
            path,
            ..Self::default()
        }
    }

    /// The deferred dispatch target.
    #[must_use]
    pub fn path(&self) -> &LinkPath {
        &self.path
    }

    /// Explicit URL override, if one was set.
    #[must_use]
    pub fn href(&self) -> Option<&str> {
        self.href.as_deref()
    }

    /// Bypass dispatch and always link to `href`.
    pub fn set_href(&mut self, href: impl Into<String>) {
        self.href = Some(href.into());
    }

    /// Resolve the path with the secure scheme.
    pub fn secure(&mut self) {
        self.path.secure = Some(true);
    }

    #[must_use]
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key)
    }

    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.set(key, value);
    }

    /// True once the link carries the active class.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Merge `active_class` into the link's classes and flag it active. Idempotent.
    pub fn activate(&mut self, active_class: Option<&str>) {
        if let Some(class) = active_class {
            let merged = merge_class_lists(&Attributes::from([("class", class)]), &self.attributes);
            self.attributes.set_opt("class", merged);
        }
        self.is_active = true;
    }
}
