//! Menu items.

use super::{DropdownType, Link, Permission};
use crate::context::Actor;
use crate::html::{Attributes, merge_class_lists};
use serde_json::{Map, Value};
use unicode_normalization::UnicodeNormalization;

/// An SVG decoration: the logical icon name and the attributes for its root element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvgIcon {
    /// Logical name passed to the icon resolver (`navmenu-social-github`)
    pub path: String,
    pub attributes: Attributes,
}

/// One node of a menu.
///
/// Items are stored flat inside their [`Builder`](super::Builder) and reference their
/// parent by id. Read access goes through this type; changes go through an
/// [`ItemMut`](super::ItemMut) handle so they can consult the owning builder.
#[derive(Debug, Clone)]
pub struct Item {
    /// Identity within the owning builder; unlike `id` it never changes.
    pub(crate) key: u64,
    pub(crate) id: String,
    pub(crate) title: String,
    pub(crate) nickname: String,
    pub(crate) parent: Option<String>,
    pub(crate) attributes: Attributes,
    pub(crate) link: Option<Link>,
    pub(crate) before_html: String,
    pub(crate) after_html: String,
    pub(crate) before_icon: Option<Attributes>,
    pub(crate) after_icon: Option<Attributes>,
    pub(crate) before_svg: Option<SvgIcon>,
    pub(crate) after_svg: Option<SvgIcon>,
    pub(crate) dropdown: Option<DropdownType>,
    pub(crate) tag: Option<String>,
    pub(crate) divider: Option<Attributes>,
    pub(crate) permission: Permission,
    pub(crate) data: Map<String, Value>,
    /// This exact item matched the request.
    pub(crate) is_active: bool,
    /// Carries the active class, either as the matched item or as one of its ancestors.
    pub(crate) marked_active: bool,
    pub(crate) disable_activation_by_url: bool,
}

impl Item {
    pub(crate) fn new(id: String, title: String, nickname: String) -> Self {
        Self {
            key: 0,
            id,
            title,
            nickname,
            parent: None,
            attributes: Attributes::new(),
            link: None,
            before_html: String::new(),
            after_html: String::new(),
            before_icon: None,
            after_icon: None,
            before_svg: None,
            after_svg: None,
            dropdown: None,
            tag: None,
            divider: None,
            permission: Permission::default(),
            data: Map::new(),
            is_active: false,
            marked_active: false,
            disable_activation_by_url: false,
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn nickname(&self) -> &str {
        &self.nickname
    }

    /// Id of the parent item, `None` for top-level items.
    #[must_use]
    pub fn parent_id(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    #[must_use]
    pub fn has_parent(&self) -> bool {
        self.parent.is_some()
    }

    #[must_use]
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    #[must_use]
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key)
    }

    #[must_use]
    pub fn link(&self) -> Option<&Link> {
        self.link.as_ref()
    }

    #[must_use]
    pub fn before_html(&self) -> &str {
        &self.before_html
    }

    #[must_use]
    pub fn after_html(&self) -> &str {
        &self.after_html
    }

    #[must_use]
    pub fn is_dropdown(&self) -> bool {
        self.dropdown.is_some()
    }

    #[must_use]
    pub fn dropdown_type(&self) -> Option<&DropdownType> {
        self.dropdown.as_ref()
    }

    /// Wrapping element override.
    #[must_use]
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    #[must_use]
    pub fn divider(&self) -> Option<&Attributes> {
        self.divider.as_ref()
    }

    #[must_use]
    pub fn before_icon(&self) -> Option<&Attributes> {
        self.before_icon.as_ref()
    }

    #[must_use]
    pub fn after_icon(&self) -> Option<&Attributes> {
        self.after_icon.as_ref()
    }

    #[must_use]
    pub fn before_svg(&self) -> Option<&SvgIcon> {
        self.before_svg.as_ref()
    }

    #[must_use]
    pub fn after_svg(&self) -> Option<&SvgIcon> {
        self.after_svg.as_ref()
    }

    /// True only for the item that matched the request, not for its ancestors.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// True when the item carries the active class, as the match or as an ancestor of it.
    #[must_use]
    pub fn is_marked_active(&self) -> bool {
        self.marked_active
    }

    #[must_use]
    pub fn permission(&self) -> &Permission {
        &self.permission
    }

    /// Evaluate the item's permission; failing checks deny.
    #[must_use]
    pub fn is_allowed(&self, actor: &dyn Actor) -> bool {
        self.permission.is_allowed(actor)
    }

    /// Metadata value for `key` (keys are stored lowercase).
    #[must_use]
    pub fn data(&self, key: &str) -> Option<&Value> {
        self.data.get(&key.to_lowercase())
    }

    #[must_use]
    pub fn data_map(&self) -> &Map<String, Value> {
        &self.data
    }

    /// Merge `active_class` into the item's own classes and mark it.
    pub(crate) fn mark_active(&mut self, active_class: Option<&str>) {
        if let Some(class) = active_class {
            let merged = merge_class_lists(&Attributes::from([("class", class)]), &self.attributes);
            self.attributes.set_opt("class", merged);
        }
        self.marked_active = true;
    }

    pub(crate) fn insert_data(&mut self, key: &str, value: Value) {
        self.data.insert(key.to_lowercase(), value);
    }
}

/// Lookup name derived from a title: `About Us` becomes `aboutUs`.
///
/// Words are split on whitespace, `-` and `_`. Accented letters lose their marks
/// (`Café` becomes `cafe`); other non-ASCII characters are dropped.
#[must_use]
pub fn nickname_from_title(title: &str) -> String {
    let ascii: String = title.nfkd().filter(char::is_ascii).collect();
    let mut nickname = String::with_capacity(ascii.len());

    for word in ascii.split(|c: char| c.is_whitespace() || c == '-' || c == '_').filter(|w| !w.is_empty()) {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            if nickname.is_empty() {
                nickname.push(first.to_ascii_lowercase());
            } else {
                nickname.push(first.to_ascii_uppercase());
            }
            nickname.push_str(chars.as_str());
        }
    }

    nickname
}
