//! Property queries over a menu's items.
//!
//! Items are filtered by comparing one field with a value for strict equality.
//! Fields are named by [`ItemField`]; any name that is not a built-in field refers to
//! the item's metadata.
//!
//! ```rust
//! # use navmenu::config::Settings;
//! # use navmenu::context::MenuContext;
//! # use navmenu::menu::{Builder, ItemField};
//! # use serde_json::json;
//! # use std::sync::Arc;
//! # fn example() -> anyhow::Result<()> {
//! # let mut menu = Builder::new("main", Arc::new(Settings::default()), MenuContext::for_url("https://example.com")?);
//! menu.add("Docs", "docs").data("section", "help");
//! menu.add("FAQ", "faq").data("section", "help");
//! menu.add("Blog", "blog");
//!
//! let help = menu.filter_by(&"section".parse::<ItemField>()?, &json!("help"));
//! assert_eq!(help.len(), 2);
//! # Ok(())
//! # }
//! ```

use super::{Builder, Item};
use serde_json::Value;
use std::cmp::Ordering;
use std::convert::Infallible;
use std::str::FromStr;

/// A queryable item property.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ItemField {
    Id,
    Nickname,
    Title,
    /// Parent id; `null` for top-level items
    Parent,
    /// The item itself matched the request
    Active,
    /// The item carries the active class
    MarkedActive,
    Dropdown,
    Tag,
    /// Metadata key (stored lowercase)
    Data(String),
}

impl FromStr for ItemField {
    type Err = Infallible;

    /// Case-insensitive; underscores are ignored (`is_dropdown` = `isDropdown`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.replace('_', "").to_lowercase();
        Ok(match normalized.as_str() {
            "id" => Self::Id,
            "nickname" => Self::Nickname,
            "title" => Self::Title,
            "parent" | "parentid" => Self::Parent,
            "active" => Self::Active,
            "isactive" | "markedactive" => Self::MarkedActive,
            "dropdown" | "isdropdown" => Self::Dropdown,
            "tag" => Self::Tag,
            _ => Self::Data(s.to_lowercase()),
        })
    }
}

/// Sort direction for [`Builder::sort_by`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl Item {
    /// Value of `field`, `None` when the item has no such property.
    #[must_use]
    pub fn property(&self, field: &ItemField) -> Option<Value> {
        match field {
            ItemField::Id => Some(Value::from(self.id.as_str())),
            ItemField::Nickname => Some(Value::from(self.nickname.as_str())),
            ItemField::Title => Some(Value::from(self.title.as_str())),
            ItemField::Parent => Some(self.parent.as_deref().map_or(Value::Null, Value::from)),
            ItemField::Active => Some(Value::Bool(self.is_active)),
            ItemField::MarkedActive => Some(Value::Bool(self.marked_active)),
            ItemField::Dropdown => Some(Value::Bool(self.is_dropdown())),
            ItemField::Tag => Some(self.tag.as_deref().map_or(Value::Null, Value::from)),
            ItemField::Data(key) => self.data(key).cloned(),
        }
    }

    /// True when `name` is a built-in field or a metadata key present on the item.
    #[must_use]
    pub fn has_property(&self, name: &str) -> bool {
        name.parse::<ItemField>().is_ok_and(|field| self.property(&field).is_some())
    }
}

impl Builder {
    /// Items whose `field` equals `value`.
    #[must_use]
    pub fn filter_by(&self, field: &ItemField, value: &Value) -> Vec<&Item> {
        self.items.iter().filter(|item| item.property(field).as_ref() == Some(value)).collect()
    }

    /// Items whose `field` equals `value`, each followed by its descendants.
    ///
    /// An item reachable both ways is listed once.
    #[must_use]
    pub fn filter_by_recursive(&self, field: &ItemField, value: &Value) -> Vec<&Item> {
        let mut collected: Vec<&Item> = Vec::new();
        for item in self.filter_by(field, value) {
            if collected.iter().any(|c| std::ptr::eq(*c, item)) {
                continue;
            }
            collected.push(item);
            if let Ok(descendants) = self.descendants(&item.id) {
                for descendant in descendants {
                    if !collected.iter().any(|c| std::ptr::eq(*c, descendant)) {
                        collected.push(descendant);
                    }
                }
            }
        }
        collected
    }

    /// Query by a field name: `where_field("section", &json!("help"), false)`.
    #[must_use]
    pub fn where_field(&self, name: &str, value: &Value, recursive: bool) -> Vec<&Item> {
        let field = ItemField::from_str(name).unwrap_or_else(|never| match never {});
        if recursive {
            self.filter_by_recursive(&field, value)
        } else {
            self.filter_by(&field, value)
        }
    }

    #[must_use]
    pub fn where_nickname(&self, nickname: &str) -> Vec<&Item> {
        self.filter_by(&ItemField::Nickname, &Value::from(nickname))
    }

    #[must_use]
    pub fn where_id(&self, id: &str) -> Vec<&Item> {
        self.filter_by(&ItemField::Id, &Value::from(id))
    }

    /// Children of `parent` (top-level items for `None`); with `recursive`, all
    /// descendants.
    #[must_use]
    pub fn where_parent(&self, parent: Option<&str>, recursive: bool) -> Vec<&Item> {
        let value = parent.map_or(Value::Null, Value::from);
        if recursive {
            self.filter_by_recursive(&ItemField::Parent, &value)
        } else {
            self.filter_by(&ItemField::Parent, &value)
        }
    }

    #[must_use]
    pub fn where_active(&self, active: bool) -> Vec<&Item> {
        self.filter_by(&ItemField::Active, &Value::Bool(active))
    }

    /// Stable sort of the flat collection by `field`. Items without the field sort first.
    pub fn sort_by(&mut self, field: &ItemField, order: SortOrder) -> &mut Self {
        self.items.sort_by(|a, b| {
            let ordering = compare_values(a.property(field).as_ref(), b.property(field).as_ref());
            match order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });
        self
    }
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            x.as_f64().unwrap_or_default().partial_cmp(&y.as_f64().unwrap_or_default()).unwrap_or(Ordering::Equal)
        }
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (None | Some(Value::Null), None | Some(Value::Null)) => Ordering::Equal,
        (None | Some(Value::Null), _) => Ordering::Less,
        (_, None | Some(Value::Null)) => Ordering::Greater,
        (Some(x), Some(y)) => x.to_string().cmp(&y.to_string()),
    }
}
