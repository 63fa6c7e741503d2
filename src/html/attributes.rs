//! Ordered HTML attribute maps.
//!
//! Menu items, links, dividers and icon decorations all carry an [`Attributes`]
//! map. Insertion order is preserved so rendered markup is deterministic, and a
//! value may be explicitly `None` (a "null" attribute) which is kept in the map
//! for merging purposes but omitted from serialized output.
//!
//! Keys that are plain integers are positional flags: the stored value is the
//! attribute name and it renders without a value (`disabled`, `hidden`).

use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::LazyLock;

/// Matches `key="value"` pairs in a static attribute string.
static STATIC_ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\s*([\w-]+)\s*=\s*"([^"]+)""#).expect("static attribute pattern is valid")
});

/// Insertion-ordered mapping of attribute names to optional values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes {
    entries: IndexMap<String, Option<String>>,
}

impl Attributes {
    /// Create an empty attribute map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`set`](Self::set).
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Builder-style [`flag`](Self::flag).
    #[must_use]
    pub fn with_flag(mut self, name: impl Into<String>) -> Self {
        self.flag(name);
        self
    }

    /// Set `key` to `value`, keeping the original position if the key exists.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), Some(value.into()));
    }

    /// Set `key` to an optional value; `None` records an explicit null.
    pub fn set_opt(&mut self, key: impl Into<String>, value: Option<String>) {
        self.entries.insert(key.into(), value);
    }

    /// Append a valueless boolean attribute such as `disabled`.
    pub fn flag(&mut self, name: impl Into<String>) {
        let index = self.entries.keys().filter(|k| is_positional(k)).count();
        self.entries.insert(index.to_string(), Some(name.into()));
    }

    /// Non-null value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).and_then(|v| v.as_deref())
    }

    /// True when the key is present, even with a null value.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Remove a key, preserving the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<Option<String>> {
        self.entries.shift_remove(key)
    }

    /// Shorthand for `get("class")`.
    #[must_use]
    pub fn class(&self) -> Option<&str> {
        self.get("class")
    }

    /// Iterate over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    /// Number of entries, null values included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the map has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Overlay `other` onto `self`; values from `other` win per key.
    ///
    /// Positional flags from `other` are appended rather than overwriting flags
    /// that happen to share the same index.
    pub fn extend(&mut self, other: &Attributes) {
        for (key, value) in &other.entries {
            if is_positional(key) {
                if let Some(name) = value {
                    if !self.entries.values().any(|v| v.as_deref() == Some(name.as_str())) {
                        self.flag(name.clone());
                    }
                }
            } else {
                self.entries.insert(key.clone(), value.clone());
            }
        }
    }

    /// Copy of `self` with `other` overlaid.
    #[must_use]
    pub fn overlaid(&self, other: &Attributes) -> Attributes {
        let mut merged = self.clone();
        merged.extend(other);
        merged
    }

    /// Copy of `self` without the given keys.
    #[must_use]
    pub fn without(&self, keys: &[&str]) -> Attributes {
        Attributes {
            entries: self
                .entries
                .iter()
                .filter(|(k, _)| !keys.contains(&k.as_str()))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        }
    }

    /// Serialize to markup attribute text; see [`serialize_attributes`].
    #[must_use]
    pub fn to_html(&self) -> String {
        serialize_attributes(self)
    }

    /// Read attributes out of a configuration value.
    ///
    /// Objects map key by key (scalars are stringified, `null` stays null) and arrays
    /// become positional flags. Anything else yields an empty map.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        let mut attributes = Attributes::new();
        match value {
            Value::Object(map) => {
                for (key, value) in map {
                    match value {
                        Value::Null => attributes.set_opt(key.clone(), None),
                        Value::String(s) => attributes.set(key.clone(), s.clone()),
                        Value::Bool(_) | Value::Number(_) => {
                            attributes.set(key.clone(), value.to_string());
                        }
                        _ => {}
                    }
                }
            }
            Value::Array(flags) => {
                for flag in flags.iter().filter_map(Value::as_str) {
                    attributes.flag(flag);
                }
            }
            _ => {}
        }
        attributes
    }
}

impl<K, V> FromIterator<(K, V)> for Attributes
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attributes = Attributes::new();
        for (key, value) in iter {
            attributes.set(key, value);
        }
        attributes
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Attributes
where
    K: Into<String>,
    V: Into<String>,
{
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

fn is_positional(key: &str) -> bool {
    !key.is_empty() && key.bytes().all(|b| b.is_ascii_digit())
}

/// Merge the class list of `new` into the class list of `old`.
///
/// When `new` carries a non-null `class`, the result is `old`'s classes followed by
/// `new`'s, split on whitespace and de-duplicated keeping the first occurrence.
/// Otherwise `old`'s class is returned unchanged. An empty result is `None`.
#[must_use]
pub fn merge_class_lists(new: &Attributes, old: &Attributes) -> Option<String> {
    let Some(new_class) = new.class() else {
        return old.class().map(str::to_string);
    };

    let mut seen: Vec<&str> = Vec::new();
    for class in old.class().unwrap_or_default().split_whitespace().chain(new_class.split_whitespace())
    {
        if !seen.contains(&class) {
            seen.push(class);
        }
    }

    if seen.is_empty() {
        None
    } else {
        Some(seen.join(" "))
    }
}

/// Overlay `new` onto `old`, merging class lists instead of replacing them.
#[must_use]
pub fn merge_attributes(new: &Attributes, old: &Attributes) -> Attributes {
    let class = merge_class_lists(new, old);
    let mut merged = old.overlaid(new);
    match class {
        Some(class) => merged.set("class", class),
        None => {
            if merged.contains_key("class") {
                merged.set_opt("class", None);
            }
        }
    }
    merged
}

/// Merge a group's attributes with the enclosing group.
///
/// `prefix` values are joined with a single `/`, class lists are merged, and every
/// other key from `new` overrides `old`.
#[must_use]
pub fn merge_group(new: &Attributes, old: &Attributes) -> Attributes {
    let mut computed = new.clone();
    computed.set_opt("prefix", format_group_prefix(new, old));
    computed.set_opt("class", merge_class_lists(new, old));
    old.without(&["prefix", "class"]).overlaid(&computed)
}

/// Combined path prefix of a nested group.
///
/// `admin` inside no group becomes `/admin`; `users` inside `/admin` becomes `admin/users`.
#[must_use]
pub fn format_group_prefix(new: &Attributes, old: &Attributes) -> Option<String> {
    match new.get("prefix") {
        Some(prefix) => Some(format!(
            "{}/{}",
            old.get("prefix").unwrap_or_default().trim_matches('/'),
            prefix.trim_matches('/')
        )),
        None => old.get("prefix").map(str::to_string),
    }
}

/// Serialize attributes to markup text.
///
/// Null values are skipped, positional flags render as a bare name, and every
/// other entry renders as `key="escaped value"`. A non-empty result starts with a
/// single space so it can be appended directly after a tag name.
#[must_use]
pub fn serialize_attributes(attributes: &Attributes) -> String {
    let parts: Vec<String> = attributes
        .iter()
        .filter_map(|(key, value)| {
            let value = value?;
            if is_positional(key) {
                Some(value.to_string())
            } else {
                Some(format!("{key}=\"{}\"", escape_html(value)))
            }
        })
        .collect();

    if parts.is_empty() {
        String::new()
    } else {
        format!(" {}", parts.join(" "))
    }
}

/// Escape text for use inside a double-quoted attribute or element body.
#[must_use]
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Parse a static `key="value" ...` string into an attribute map.
#[must_use]
pub fn parse_static(markup: &str) -> Attributes {
    STATIC_ATTRIBUTE
        .captures_iter(markup)
        .map(|caps| (caps[1].to_string(), caps[2].to_string()))
        .collect()
}

/// Merge hand-written static attribute markup with an item's attributes.
///
/// Classes are merged; for every other key the static markup wins. Returns
/// serialized attribute text, ready to splice into a tag.
#[must_use]
pub fn merge_static(markup: &str, old: &Attributes) -> String {
    let mut parsed = parse_static(markup);
    parsed.set_opt("class", merge_class_lists(&parsed, old));
    serialize_attributes(&old.without(&["class"]).overlaid(&parsed))
}
