//! HTML attribute utilities.
//!
//! Pure functions shared by items, links and the renderer:
//! - [`merge_class_lists`] / [`merge_attributes`] - class-aware attribute merging
//! - [`merge_group`] - nested group merging (prefix joining + class merging)
//! - [`serialize_attributes`] - attribute map to markup text
//! - [`merge_static`] - merge a hand-written attribute string with an item's attributes

mod attributes;

pub use attributes::{
    Attributes, escape_html, format_group_prefix, merge_attributes, merge_class_lists, merge_group,
    merge_static, parse_static, serialize_attributes,
};
