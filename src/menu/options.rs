//! Options accepted when adding items.
//!
//! An item is created from a title and an [`ItemOptions`] value. Plain strings convert
//! to options carrying only a URL, so the common case reads naturally:
//!
//! ```rust
//! use navmenu::menu::{ItemOptions, Target};
//!
//! let about: ItemOptions = "about".into();
//! assert_eq!(about.url, Some(Target::new("about")));
//!
//! let edit = ItemOptions::new()
//!     .with_route(Target::new("posts.edit").param("5"))
//!     .with_id("edit-post")
//!     .attr("class", "nav-link");
//! assert_eq!(edit.attributes.get("class"), Some("nav-link"));
//! ```
//!
//! In TOML or YAML files every key that is not one of the recognized options below is
//! kept as an HTML attribute of the item.

use crate::html::Attributes;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Option keys that never become HTML attributes.
pub const RESERVED_KEYS: [&str; 7] = ["route", "action", "url", "prefix", "parent", "secure", "raw"];

/// A path, route name or action plus positional parameters.
///
/// Deserializes from a bare string (`"posts.index"`) or from a list whose first
/// element is the name and the rest are parameters (`["posts.show", 5]`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "TargetRepr")]
pub struct Target {
    /// Path, route name or action identifier
    pub name: String,
    /// Positional parameters
    pub params: Vec<String>,
}

impl Target {
    /// Target without parameters.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
        }
    }

    /// Append a positional parameter.
    #[must_use]
    pub fn param(mut self, value: impl ToString) -> Self {
        self.params.push(value.to_string());
        self
    }
}

impl From<&str> for Target {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Target {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TargetRepr {
    Name(String),
    List(Vec<Value>),
}

impl TryFrom<TargetRepr> for Target {
    type Error = String;

    fn try_from(repr: TargetRepr) -> Result<Self, Self::Error> {
        match repr {
            TargetRepr::Name(name) => Ok(Self::new(name)),
            TargetRepr::List(values) => {
                let mut values = values.iter().map(scalar_to_string);
                let name = values
                    .next()
                    .flatten()
                    .ok_or_else(|| "target list must start with a path, route or action name".to_string())?;
                let params = values
                    .map(|v| v.ok_or_else(|| "target parameters must be strings, numbers or booleans".to_string()))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Self {
                    name,
                    params,
                })
            }
        }
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn deserialize_scalar<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(v) => scalar_to_string(&v)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom("expected a string or a number")),
    }
}

/// The navigation target of a link, as handed to dispatch.
///
/// At most one of `url`, `route` and `action` is consulted, in that order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkPath {
    pub url: Option<Target>,
    pub route: Option<Target>,
    pub action: Option<Target>,
    /// Force (`Some(true)`) or forbid (`Some(false)`) the secure scheme
    pub secure: Option<bool>,
    /// Prefix of the group the link was created in
    pub prefix: Option<String>,
}

impl LinkPath {
    /// True when none of `url`, `route` or `action` is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.url.is_none() && self.route.is_none() && self.action.is_none()
    }
}

/// Options for a new item.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ItemOptions {
    /// Explicit id; a random one is generated otherwise. Also rendered as the HTML `id`.
    #[serde(deserialize_with = "deserialize_scalar")]
    pub id: Option<String>,
    /// Lookup name; derived from the title otherwise
    pub nickname: Option<String>,
    /// Id of the parent item
    #[serde(deserialize_with = "deserialize_scalar")]
    pub parent: Option<String>,
    pub url: Option<Target>,
    pub route: Option<Target>,
    pub action: Option<Target>,
    pub secure: Option<bool>,
    /// Plain label without a link
    pub raw: bool,
    /// Never activate this item by comparing its URL with the request
    #[serde(alias = "disableActivationByURL")]
    pub disable_activation_by_url: bool,
    /// Every other key, kept as HTML attributes
    #[serde(flatten)]
    pub attributes: Attributes,
}

impl ItemOptions {
    /// Empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_url(mut self, url: impl Into<Target>) -> Self {
        self.url = Some(url.into());
        self
    }

    #[must_use]
    pub fn with_route(mut self, route: impl Into<Target>) -> Self {
        self.route = Some(route.into());
        self
    }

    #[must_use]
    pub fn with_action(mut self, action: impl Into<Target>) -> Self {
        self.action = Some(action.into());
        self
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_nickname(mut self, nickname: impl Into<String>) -> Self {
        self.nickname = Some(nickname.into());
        self
    }

    #[must_use]
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Resolve the URL with the secure scheme.
    #[must_use]
    pub fn secure(mut self) -> Self {
        self.secure = Some(true);
        self
    }

    /// Create a plain label without a link.
    #[must_use]
    pub fn raw(mut self) -> Self {
        self.raw = true;
        self
    }

    #[must_use]
    pub fn without_url_activation(mut self) -> Self {
        self.disable_activation_by_url = true;
        self
    }

    /// Add a passthrough HTML attribute.
    #[must_use]
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.set(key, value);
        self
    }

    /// The link target selected by these options, `None` for raw items.
    #[must_use]
    pub fn link_path(&self) -> Option<LinkPath> {
        if self.raw {
            return None;
        }

        Some(LinkPath {
            url: self.url.clone(),
            route: self.route.clone(),
            action: self.action.clone(),
            secure: self.secure,
            prefix: None,
        })
    }

    /// Passthrough attributes plus the explicit `id`, reserved keys removed.
    #[must_use]
    pub fn html_attributes(&self) -> Attributes {
        let mut attributes = self.attributes.without(&RESERVED_KEYS);
        if let Some(id) = &self.id {
            attributes.set("id", id.clone());
        }
        attributes
    }
}

impl From<&str> for ItemOptions {
    fn from(url: &str) -> Self {
        Self::new().with_url(url)
    }
}

impl From<String> for ItemOptions {
    fn from(url: String) -> Self {
        Self::new().with_url(url)
    }
}

impl From<Target> for ItemOptions {
    fn from(url: Target) -> Self {
        Self::new().with_url(url)
    }
}

impl From<Attributes> for ItemOptions {
    fn from(attributes: Attributes) -> Self {
        Self {
            attributes,
            ..Self::default()
        }
    }
}
