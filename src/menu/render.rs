//! HTML rendering of a menu tree.
//!
//! Rendering walks the flat item list depth-first, starting with the items whose
//! parent is the requested one, and emits one row element per item:
//!
//! ```text
//! <li class="active"><a href="https://example.com/about">About</a>
//!   <ul><li><a href="https://example.com/about/team">Team</a></li></ul>
//! </li>
//! ```
//!
//! Rows are `li` inside `ul`/`ol` and use the outer tag otherwise. Items denied by
//! their permission are skipped along with their subtree.
//!
//! # Hook
//!
//! [`RenderOptions::after_item`] installs a callback that runs for every linked item
//! before its markup is emitted. It receives the item and an [`ItemScope`] through
//! which the children attributes, item attributes and params of the current level can
//! be changed, along with the attributes of this item's link. Level changes persist
//! for the rest of the level; link changes apply to the current item only. For a
//! dropdown the children attributes already include the configured
//! `child_wrapper_attributes` and changes to them apply to that dropdown's subtree.

use super::{Builder, DropdownType, Item, SvgIcon};
use crate::core::MenuError;
use crate::html::{Attributes, escape_html, merge_class_lists};
use serde_json::Value;
use std::fmt;
use tracing::{debug, trace};

/// Callback invoked before a linked item is rendered.
pub type AfterItemHook<'h> = dyn FnMut(&Item, ItemScope<'_>) + 'h;

/// Mutable view of the rendering state handed to the [`AfterItemHook`].
#[derive(Debug)]
pub struct ItemScope<'s> {
    /// Attributes of child lists on this level
    pub children_attributes: &'s mut Attributes,
    /// Attributes merged into every row wrapper on this level
    pub item_attributes: &'s mut Attributes,
    /// Attributes of the current item's link
    pub link_attributes: &'s mut Attributes,
    /// Free-form state shared by the hook calls of this level
    pub params: &'s mut Value,
}

/// Options for [`Builder::render`] and the `as_*` wrappers.
#[derive(Default)]
pub struct RenderOptions<'h> {
    pub children_attributes: Attributes,
    pub item_attributes: Attributes,
    pub after_item: Option<Box<AfterItemHook<'h>>>,
    pub params: Value,
}

impl<'h> RenderOptions<'h> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attributes for every nested list.
    #[must_use]
    pub fn children_attributes(mut self, attributes: Attributes) -> Self {
        self.children_attributes = attributes;
        self
    }

    /// Attributes merged into every row wrapper.
    #[must_use]
    pub fn item_attributes(mut self, attributes: Attributes) -> Self {
        self.item_attributes = attributes;
        self
    }

    #[must_use]
    pub fn after_item(mut self, hook: impl FnMut(&Item, ItemScope<'_>) + 'h) -> Self {
        self.after_item = Some(Box::new(hook));
        self
    }

    /// Initial value of the hook's `params`.
    #[must_use]
    pub fn params(mut self, params: Value) -> Self {
        self.params = params;
        self
    }
}

impl fmt::Debug for RenderOptions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderOptions")
            .field("children_attributes", &self.children_attributes)
            .field("item_attributes", &self.item_attributes)
            .field("after_item", &self.after_item.is_some())
            .field("params", &self.params)
            .finish()
    }
}

impl Builder {
    /// The menu as `<ul{attributes}>...</ul>`.
    ///
    /// # Errors
    ///
    /// Returns [`MenuError::CyclicParent`] if the item tree loops.
    pub fn as_ul(&self, attributes: &Attributes, options: RenderOptions<'_>) -> Result<String, MenuError> {
        self.wrapped("ul", attributes, options)
    }

    /// The menu as `<ol{attributes}>...</ol>`.
    ///
    /// # Errors
    ///
    /// Returns [`MenuError::CyclicParent`] if the item tree loops.
    pub fn as_ol(&self, attributes: &Attributes, options: RenderOptions<'_>) -> Result<String, MenuError> {
        self.wrapped("ol", attributes, options)
    }

    /// The menu as `<div{attributes}>...</div>`, one `div` per item.
    ///
    /// # Errors
    ///
    /// Returns [`MenuError::CyclicParent`] if the item tree loops.
    pub fn as_div(&self, attributes: &Attributes, options: RenderOptions<'_>) -> Result<String, MenuError> {
        self.wrapped("div", attributes, options)
    }

    fn wrapped(&self, tag: &str, attributes: &Attributes, options: RenderOptions<'_>) -> Result<String, MenuError> {
        let inner = self.render(tag, None, options)?;
        Ok(format!("<{tag}{}>{inner}</{tag}>", attributes.to_html()))
    }

    /// Markup of the items below `parent` (top-level items for `None`), without an
    /// enclosing `tag` element.
    ///
    /// # Errors
    ///
    /// Returns [`MenuError::CyclicParent`] if an item is reached twice on the way down.
    pub fn render(&self, tag: &str, parent: Option<&str>, options: RenderOptions<'_>) -> Result<String, MenuError> {
        let RenderOptions {
            children_attributes,
            item_attributes,
            after_item,
            params,
        } = options;

        let mut renderer = Renderer {
            builder: self,
            tag,
            row_tag: if matches!(tag, "ul" | "ol") { "li" } else { tag },
            hook: after_item,
            ancestry: parent.map(str::to_string).into_iter().collect(),
        };

        let mut out = String::new();
        renderer.level(parent, children_attributes, item_attributes, params, &mut out)?;
        trace!("Rendered menu '{}' as {} ({} bytes)", self.name, tag, out.len());
        Ok(out)
    }
}

struct Renderer<'a, 'h> {
    builder: &'a Builder,
    tag: &'a str,
    row_tag: &'a str,
    hook: Option<Box<AfterItemHook<'h>>>,
    ancestry: Vec<String>,
}

impl Renderer<'_, '_> {
    fn level(
        &mut self,
        parent: Option<&str>,
        mut children_attributes: Attributes,
        mut item_attributes: Attributes,
        mut params: Value,
        out: &mut String,
    ) -> Result<(), MenuError> {
        let builder = self.builder;
        let (tag, row_tag) = (self.tag, self.row_tag);

        for item in builder.items.iter().filter(|item| item.parent.as_deref() == parent) {
            if !item.is_allowed(builder.context.actor.as_ref()) {
                debug!("Skipping '{}' in menu '{}': not allowed", item.title, builder.name);
                continue;
            }

            // A dropdown's child list starts from the configured wrapper attributes and
            // stays local to its subtree.
            let mut dropdown_children =
                item.is_dropdown().then(|| builder.config.child_wrapper_attributes().overlaid(&children_attributes));

            let mut link_attributes = item.link.as_ref().map(|link| link.attributes.clone());
            if let (Some(link_attributes), Some(hook)) = (link_attributes.as_mut(), self.hook.as_mut()) {
                hook(
                    item,
                    ItemScope {
                        children_attributes: dropdown_children.as_mut().unwrap_or(&mut children_attributes),
                        item_attributes: &mut item_attributes,
                        link_attributes,
                        params: &mut params,
                    },
                );
            }

            let subtree_attributes = dropdown_children.unwrap_or_else(|| children_attributes.clone());

            let item_tag = item.tag.as_deref().unwrap_or(row_tag);
            let wrap = self.has_wrapper(item);
            if wrap {
                out.push_str(&format!("<{item_tag}{}>", self.wrapper_attributes(item, &item_attributes).to_html()));
            }

            self.content(item, link_attributes.as_ref(), out);

            if builder.has_children(&item.id) {
                if self.ancestry.contains(&item.id) {
                    return Err(MenuError::CyclicParent {
                        id: item.id.clone(),
                    });
                }
                self.ancestry.push(item.id.clone());
                out.push_str(&format!("<{tag}{}>", subtree_attributes.to_html()));
                self.level(Some(item.id.as_str()), subtree_attributes, item_attributes.clone(), params.clone(), out)?;
                out.push_str(&format!("</{tag}>"));
                self.ancestry.pop();
            }

            if wrap {
                out.push_str(&format!("</{item_tag}>"));
            }

            if let Some(divider) = &item.divider {
                out.push_str(&format!("<{item_tag}{}></{item_tag}>", divider.to_html()));
            }
        }

        Ok(())
    }

    /// Top-level items are always wrapped; children only inside a dropdown with
    /// `child_link_wrapper` enabled.
    fn has_wrapper(&self, item: &Item) -> bool {
        let Some(parent_id) = item.parent.as_deref() else {
            return true;
        };
        match self.builder.find(parent_id) {
            Some(parent) if parent.is_dropdown() => self.builder.config.child_link_wrapper(),
            _ => false,
        }
    }

    /// Level attributes under the item's own, with the inactive class and the level's
    /// classes appended to the item's classes.
    fn wrapper_attributes(&self, item: &Item, item_attributes: &Attributes) -> Attributes {
        let mut attributes = item_attributes.overlaid(&item.attributes);

        let mut classes = Attributes::new();
        classes.set_opt("class", item.attributes.class().map(str::to_string));
        if !item.marked_active {
            if let Some(inactive) = self.builder.config.inactive_class() {
                classes.set_opt("class", merge_class_lists(&Attributes::from([("class", inactive)]), &classes));
            }
        }
        if let Some(level) = item_attributes.class() {
            classes.set_opt("class", merge_class_lists(&Attributes::from([("class", level)]), &classes));
        }

        if let Some(class) = classes.class() {
            attributes.set("class", class);
        }
        attributes
    }

    fn content(&self, item: &Item, link_attributes: Option<&Attributes>, out: &mut String) {
        let title = self.title_with_icons(item);
        let link = link_attributes.map(Attributes::to_html).unwrap_or_default();

        match (&item.dropdown, &item.link) {
            (Some(kind), _) => {
                let toggle = match kind {
                    DropdownType::Button => format!("<button type=\"button\"{link}>{title}</button>"),
                    DropdownType::Anchor => format!("<a{link} href=\"#\">{title}</a>"),
                    DropdownType::Custom(tag) => format!("<{tag}{link}>{title}</{tag}>"),
                };
                out.push_str(&item.before_html);
                out.push_str(&toggle);
                out.push_str(&item.after_html);
            }
            (None, Some(_)) => {
                let href = self
                    .builder
                    .url_of(item)
                    .filter(|url| !url.is_empty())
                    .map(|url| format!(" href=\"{}\"", escape_html(&url)))
                    .unwrap_or_default();
                out.push_str(&item.before_html);
                out.push_str(&format!("<a{link}{href}>{title}</a>"));
                out.push_str(&item.after_html);
            }
            (None, None) => out.push_str(&title),
        }
    }

    fn title_with_icons(&self, item: &Item) -> String {
        let mut title = String::new();
        if let Some(icon) = &item.before_icon {
            title.push_str(&self.icon(item, icon));
        }
        if let Some(svg) = &item.before_svg {
            title.push_str(&self.svg(item, svg));
        }
        title.push_str(&item.title);
        if let Some(svg) = &item.after_svg {
            title.push_str(&self.svg(item, svg));
        }
        if let Some(icon) = &item.after_icon {
            title.push_str(&self.icon(item, icon));
        }
        title
    }

    fn icon(&self, item: &Item, icon: &Attributes) -> String {
        let config = &self.builder.config;
        let state = if item.marked_active { config.active_icon_class() } else { config.inactive_icon_class() };
        format!("<i{}></i>", with_state_class(icon, state).to_html())
    }

    /// Inline SVG from the icon resolver; empty when there is none or the icon is missing.
    fn svg(&self, item: &Item, svg: &SvgIcon) -> String {
        let Some(icons) = &self.builder.context.icons else {
            debug!("Omitting svg '{}': no icon resolver", svg.path);
            return String::new();
        };
        let config = &self.builder.config;
        let state = if item.marked_active { config.active_svg_class() } else { config.inactive_svg_class() };

        match icons.svg(&svg.path, &with_state_class(&svg.attributes, state)) {
            Ok(markup) => markup,
            Err(e) => {
                debug!("Omitting svg '{}': {}", svg.path, e);
                String::new()
            }
        }
    }
}

/// `attributes` with `state` appended to its class; an empty class is dropped.
fn with_state_class(attributes: &Attributes, state: Option<&str>) -> Attributes {
    let mut decorated = attributes.clone();
    let class = format!("{} {}", attributes.class().unwrap_or_default(), state.unwrap_or_default());
    let class = class.trim();
    if class.is_empty() {
        decorated.remove("class");
    } else {
        decorated.set("class", class);
    }
    decorated
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod tests;
