//! Matching items against the current request.
//!
//! Activation runs when an item is created (with `auto_activate`), when a pattern is
//! given through [`ItemMut::active_pattern`](super::ItemMut::active_pattern), or on
//! request through [`ItemMut::activate`](super::ItemMut::activate).
//!
//! Two matching modes exist:
//! - exact (default): the item's URL equals the request URL, with or without query;
//! - RESTful (`restful = true`): the request path is the item's path or lies below it
//!   on a segment boundary, after stripping an optional `rest_base` prefix from both.

use super::Builder;
use crate::config::ActiveElement;
use regex::Regex;
use std::collections::HashSet;
use tracing::{debug, warn};
use url::Url;

impl Builder {
    /// Activate the item at `index` if its URL matches the request.
    pub(crate) fn check_activation_status(&mut self, index: usize) {
        let item = &self.items[index];
        if item.disable_activation_by_url {
            return;
        }
        let Some(url) = self.url_of(item) else {
            return;
        };

        let matched = if self.config.restful() {
            self.matches_restful(&url)
        } else {
            let request = &self.context.request;
            url == request.url() || url == request.full_url()
        };

        if matched {
            debug!("Item '{}' matches the current request", self.items[index].title);
            self.activate(index);
        }
    }

    fn matches_restful(&self, url: &str) -> bool {
        let mut path = path_of(url).trim_start_matches('/').to_string();
        let mut request_path = self.context.request.path().trim_start_matches('/').to_string();

        let bases = self.config.rest_base();
        if !bases.is_empty() {
            let alternatives = bases.iter().map(|base| regex::escape(base)).collect::<Vec<_>>().join("|");
            if let Ok(base) = Regex::new(&format!("^({alternatives})/")) {
                path = base.replacen(&path, 1, "").into_owned();
                request_path = base.replacen(&request_path, 1, "").into_owned();
            }
        }

        Regex::new(&format!("^{}(/.+)?$", regex::escape(&path))).is_ok_and(|re| re.is_match(&request_path))
    }

    /// Mark the item at `index` as the active one and propagate to its ancestors.
    ///
    /// Ancestors receive the active class but not the own-activation flag. A cycle in
    /// the parent chain stops propagation with a warning.
    pub(crate) fn activate(&mut self, index: usize) {
        let propagate = self.config.activate_parents();
        let mut visited = HashSet::new();
        let mut current = Some(index);
        let mut origin = true;

        while let Some(i) = current {
            if !visited.insert(self.items[i].id.clone()) {
                warn!("Cyclic parent chain at '{}' in menu '{}'; stopping activation", self.items[i].id, self.name);
                break;
            }

            self.mark_element_active(i);
            if origin {
                self.items[i].is_active = true;
                origin = false;
            }

            if !propagate {
                break;
            }
            current = self.items[i].parent.as_deref().and_then(|parent| self.position(parent));
        }
    }

    fn mark_element_active(&mut self, index: usize) {
        let active_class = self.config.active_class().map(str::to_string);
        let element = self.config.active_element();
        let item = &mut self.items[index];

        match (element, item.link.as_mut()) {
            (ActiveElement::Link, Some(link)) => link.activate(active_class.as_deref()),
            _ => item.mark_active(active_class.as_deref()),
        }
    }

    /// Give the item at `index` the active class and flag, ancestors untouched.
    pub(crate) fn mark_manually_active(&mut self, index: usize) {
        let active_class = self.config.active_class().map(str::to_string);
        let item = &mut self.items[index];
        item.mark_active(active_class.as_deref());
        item.is_active = true;
    }

    /// Activate the item at `index` when the request path matches a wildcard pattern.
    pub(crate) fn activate_by_pattern(&mut self, index: usize, pattern: &str) {
        let Some(regex) = pattern_regex(pattern) else {
            warn!("Ignoring invalid activation pattern '{}'", pattern);
            return;
        };

        if regex.is_match(&self.context.request.path()) {
            debug!("Item '{}' matches pattern '{}'", self.items[index].title, pattern);
            self.activate(index);
        }
    }
}

/// Anchored regex for an activation pattern: `/*` also matches the bare prefix and
/// `*` matches anything. Leading slashes are ignored.
fn pattern_regex(pattern: &str) -> Option<Regex> {
    let escaped = regex::escape(pattern).replace(r"/\*", "(/.*)?").replace(r"\*", ".*");
    Regex::new(&format!("^{}$", escaped.trim_start_matches('/'))).ok()
}

/// Path component of an absolute or relative URL.
fn path_of(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => parsed.path().to_string(),
        Err(_) => url.split(['?', '#']).next().unwrap_or_default().to_string(),
    }
}
