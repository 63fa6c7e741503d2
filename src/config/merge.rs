//! Deep merging and dotted-path lookup over JSON configuration trees.

use serde_json::Value;

/// Perform a deep merge of two JSON values.
///
/// Recursively merges `overrides` into `base`. For objects, fields from `overrides`
/// are added or replace fields in `base`. For arrays and primitives, `overrides`
/// completely replaces `base`.
///
/// ```rust
/// use serde_json::json;
/// use navmenu::config::deep_merge_json;
///
/// let base = json!({ "dropdown_defaults": { "link_type": "button", "child_link_wrapper": false } });
/// let overrides = json!({ "dropdown_defaults": { "link_type": "a" } });
///
/// let result = deep_merge_json(base, &overrides);
/// assert_eq!(result["dropdown_defaults"]["link_type"], "a");
/// assert_eq!(result["dropdown_defaults"]["child_link_wrapper"], false);
/// ```
pub fn deep_merge_json(mut base: Value, overrides: &Value) -> Value {
    match (base.as_object_mut(), overrides.as_object()) {
        (Some(base_obj), Some(override_obj)) => {
            for (key, override_value) in override_obj {
                match base_obj.get_mut(key) {
                    Some(base_value) if base_value.is_object() && override_value.is_object() => {
                        let merged = deep_merge_json(base_value.take(), override_value);
                        base_obj.insert(key.clone(), merged);
                    }
                    _ => {
                        base_obj.insert(key.clone(), override_value.clone());
                    }
                }
            }
            base
        }
        (_, _) => overrides.clone(),
    }
}

/// Look up a dotted path (`dropdown_defaults.link_type`) in a JSON tree.
///
/// Array elements can be addressed by numeric segments. Returns `None` when any
/// segment is missing; an explicit `null` at the end of the path is returned as is.
#[must_use]
pub fn lookup<'a>(tree: &'a Value, key: &str) -> Option<&'a Value> {
    if key.is_empty() {
        return Some(tree);
    }

    key.split('.').try_fold(tree, |node, segment| match node {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}
